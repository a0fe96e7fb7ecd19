use {
    anyhow::anyhow,
    std::path::{Path, PathBuf},
};

/// Where MiniVote keeps its config. Defaults to `~/.minivote` unless the user
/// passes `--home`.
pub struct HomeDirectory {
    home: PathBuf,
}

impl HomeDirectory {
    pub fn new_or_default(home: Option<PathBuf>) -> anyhow::Result<Self> {
        let home = match home {
            Some(home) => home,
            None => home::home_dir()
                .ok_or_else(|| anyhow!("failed to locate the user home directory"))?
                .join(".minivote"),
        };

        Ok(Self { home })
    }

    pub fn exists(&self) -> bool {
        self.home.exists()
    }

    pub fn config_file(&self) -> PathBuf {
        self.home.join("app.toml")
    }
}

impl AsRef<Path> for HomeDirectory {
    fn as_ref(&self) -> &Path {
        &self.home
    }
}

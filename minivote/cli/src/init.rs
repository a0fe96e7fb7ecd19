use {
    crate::{config::Config, home_directory::HomeDirectory},
    anyhow::ensure,
    clap::Parser,
    std::fs,
};

#[derive(Parser)]
pub struct InitCmd;

impl InitCmd {
    pub fn run(self, home: &HomeDirectory) -> anyhow::Result<()> {
        ensure!(
            !home.exists(),
            "home directory already exists: {}",
            home.as_ref().display()
        );

        fs::create_dir_all(home)?;
        fs::write(home.config_file(), toml::to_string_pretty(&Config::default())?)?;

        tracing::info!("MiniVote home initiated at: {}", home.as_ref().display());

        Ok(())
    }
}

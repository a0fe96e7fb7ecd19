use {
    alloy::primitives::Address,
    anyhow::anyhow,
    serde::{Deserialize, Serialize},
    std::{env, fs, path::PathBuf, str::FromStr},
};

/// Environment variable that overrides the configured contract address.
pub const CONTRACT_ENV_VAR: &str = "MINIVOTE_CONTRACT";

/// Address the voting contract lands at on a fresh local devnet deployment.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

#[derive(Serialize, Deserialize)]
pub struct Config {
    pub log_level: String,
    pub node: NodeConfig,
    pub contract: ContractConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            node: NodeConfig::default(),
            contract: ContractConfig::default(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct NodeConfig {
    pub rpc_url: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ContractConfig {
    pub address: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_CONTRACT_ADDRESS.to_string(),
        }
    }
}

impl Config {
    /// Read the config file, or fall back to defaults when it doesn't exist
    /// (so queries work before `init` has ever been run).
    pub fn load(path: PathBuf) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path)?;

        Ok(toml::from_str(&raw)?)
    }

    /// The deployed contract address. `MINIVOTE_CONTRACT` wins over the
    /// config file; the compiled-in devnet address is the last resort.
    pub fn contract_address(&self) -> anyhow::Result<Address> {
        let raw = env::var(CONTRACT_ENV_VAR).unwrap_or_else(|_| self.contract.address.clone());

        Address::from_str(&raw).map_err(|err| anyhow!("invalid contract address `{raw}`: {err}"))
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let serialized = toml::to_string_pretty(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.log_level, "info");
        assert_eq!(parsed.node.rpc_url, "http://localhost:8545");
        assert_eq!(parsed.contract.address, DEFAULT_CONTRACT_ADDRESS);
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load(dir.path().join("app.toml")).unwrap();

        assert_eq!(cfg.contract.address, DEFAULT_CONTRACT_ADDRESS);
    }

    #[test]
    fn contract_address_prefers_the_environment_override() {
        env::remove_var(CONTRACT_ENV_VAR);

        let cfg = Config::default();
        assert_eq!(
            cfg.contract_address().unwrap(),
            Address::from_str(DEFAULT_CONTRACT_ADDRESS).unwrap(),
        );

        env::set_var(CONTRACT_ENV_VAR, "0x000000000000000000000000000000000000dEaD");
        let overridden = cfg.contract_address().unwrap();
        env::remove_var(CONTRACT_ENV_VAR);

        assert_eq!(
            overridden,
            Address::from_str("0x000000000000000000000000000000000000dEaD").unwrap(),
        );
    }
}

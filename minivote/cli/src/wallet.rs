use {
    crate::{config::Config, context::report_no_wallet},
    clap::Subcommand,
    minivote_client::{EnvProvider, WalletConnector},
    minivote_types::{network_name, shorten_address},
};

#[derive(Subcommand)]
pub enum WalletCmd {
    /// Connect and show the active wallet session
    Status,

    /// Hold the session open, reacting to provider events until interrupted
    Watch,
}

impl WalletCmd {
    pub async fn run(self, cfg: &Config) -> anyhow::Result<()> {
        let provider = EnvProvider::from_env(&cfg.node.rpc_url)?;
        let mut connector = WalletConnector::new(provider);

        let Some(connection) = connector.connect().await else {
            report_no_wallet();
            return Ok(());
        };

        println!(
            "address: {} ({})",
            connection.address,
            shorten_address(&connection.address),
        );
        println!(
            "network: {} (chain id {})",
            network_name(connection.chain_id),
            connection.chain_id,
        );

        if let Self::Watch = self {
            println!("watching for wallet events; press Ctrl-C to stop");
            connector.watch().await;
        }

        Ok(())
    }
}

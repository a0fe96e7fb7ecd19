use {
    crate::config::Config,
    alloy::providers::Provider,
    colored::Colorize,
    minivote_client::{build_provider, EnvProvider, Gateway, WalletConnection, WalletConnector},
};

/// Everything a command needs once the wallet handshake is done: the bound
/// contract handle and the connection it was built from.
pub struct AppContext<P> {
    pub gateway: Gateway<P>,
    pub connection: WalletConnection,
}

/// Connect the wallet and bind the contract handle. `None` means there is no
/// usable wallet and the user has already been told; commands just return.
pub async fn connect(cfg: &Config) -> anyhow::Result<Option<AppContext<impl Provider>>> {
    let contract = cfg.contract_address()?;
    let provider = EnvProvider::from_env(&cfg.node.rpc_url)?;
    let mut connector = WalletConnector::new(provider);

    let Some(connection) = connector.connect().await else {
        report_no_wallet();
        return Ok(None);
    };

    let provider = build_provider(&cfg.node.rpc_url, &connection)?;
    let gateway = Gateway::new(contract, provider);

    Ok(Some(AppContext {
        gateway,
        connection,
    }))
}

pub fn report_no_wallet() {
    println!(
        "{}",
        format!(
            "❌ No wallet available. Set the {} environment variable (a .env file works too) and try again.",
            EnvProvider::MNEMONIC_VAR,
        )
        .red(),
    );
}

use {
    crate::{
        config::Config, home_directory::HomeDirectory, init::InitCmd, query::QueryCmd, tx::TxCmd,
        wallet::WalletCmd,
    },
    clap::Parser,
    std::path::PathBuf,
    tracing::metadata::LevelFilter,
};

mod config;
mod context;
mod display;
mod home_directory;
mod init;
mod prompt;
mod query;
mod tx;
mod wallet;

#[derive(Parser)]
#[command(author, version, about, next_display_order = None)]
struct Cli {
    /// Directory for the config file [default: ~/.minivote]
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Create the home directory and a default config file
    Init(InitCmd),

    /// Make a query [alias: q]
    #[command(next_display_order = None, alias = "q")]
    Query(QueryCmd),

    /// Send transactions
    #[command(next_display_order = None)]
    Tx(TxCmd),

    /// Inspect or watch the wallet connection
    #[command(subcommand, next_display_order = None)]
    Wallet(WalletCmd),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments.
    let cli = Cli::parse();

    // Find the home directory from the CLI `--home` flag.
    let app_dir = HomeDirectory::new_or_default(cli.home)?;

    // Parse the config file; defaults apply if it doesn't exist yet.
    let cfg = Config::load(app_dir.config_file())?;

    // Set up tracing.
    tracing_subscriber::fmt()
        .with_max_level(cfg.log_level.parse::<LevelFilter>()?)
        .init();

    match cli.command {
        Command::Init(cmd) => cmd.run(&app_dir),
        Command::Query(cmd) => cmd.run(&cfg).await,
        Command::Tx(cmd) => cmd.run(&cfg).await,
        Command::Wallet(cmd) => cmd.run(&cfg).await,
    }
}

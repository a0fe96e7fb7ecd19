use {
    crate::{config::Config, context, display::render_card, prompt::print_json_pretty},
    chrono::Utc,
    clap::{Parser, Subcommand},
    colored::Colorize,
    minivote_client::{load_proposals, load_stats, DaoQuerier},
    minivote_types::ProposalFilter,
    tracing::error,
};

#[derive(Parser)]
pub struct QueryCmd {
    #[command(subcommand)]
    subcmd: SubCmd,
}

#[derive(Subcommand)]
enum SubCmd {
    /// Enumerate proposals
    Proposals {
        /// Show only proposals in this state: all|active|passed|failed|finalized
        #[arg(long, default_value = "all")]
        filter: String,

        /// Print raw JSON instead of cards
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Get a single proposal by id
    Proposal {
        /// Proposal id
        id: u64,

        /// Print raw JSON instead of a card
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Aggregate DAO statistics
    Stats,
    /// The contract owner address
    Owner,
}

impl QueryCmd {
    pub async fn run(self, cfg: &Config) -> anyhow::Result<()> {
        let Some(ctx) = context::connect(cfg).await? else {
            return Ok(());
        };

        match self.subcmd {
            SubCmd::Proposals { filter, json } => {
                let filter: ProposalFilter = filter.parse()?;
                let proposals = load_proposals(&ctx.gateway).await;
                let now = Utc::now();
                let visible = filter.apply(&proposals, now);

                if json {
                    return print_json_pretty(&visible);
                }

                if visible.is_empty() {
                    println!("no proposals to show");
                } else {
                    for proposal in visible {
                        println!("{}", render_card(proposal, now));
                    }
                }
            },
            SubCmd::Proposal { id, json } => match ctx.gateway.proposal(id).await {
                Ok(raw) => {
                    let proposal = raw.into_proposal(id);
                    if json {
                        return print_json_pretty(&proposal);
                    }

                    println!("{}", render_card(&proposal, Utc::now()));
                },
                Err(err) => {
                    error!(%err, id, "failed to fetch proposal");
                    println!("{}", format!("❌ Failed to fetch proposal #{id}.").red());
                },
            },
            SubCmd::Stats => {
                let stats = load_stats(&ctx.gateway).await;
                print_json_pretty(&stats)?;
            },
            SubCmd::Owner => match ctx.gateway.owner().await {
                Ok(owner) => println!("{owner}"),
                Err(err) => {
                    error!(%err, "failed to query contract owner");
                    println!("{}", "❌ Failed to query the contract owner.".red());
                },
            },
        }

        Ok(())
    }
}

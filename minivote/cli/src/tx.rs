use {
    crate::{config::Config, context, display::render_card, prompt::confirm},
    anyhow::{bail, ensure},
    chrono::Utc,
    clap::{Parser, Subcommand},
    colored::Colorize,
    minivote_client::{is_owner, load_proposals, DaoQuerier, Gateway},
    minivote_types::{Proposal, ProposalStatus, TxOutcome},
};

#[derive(Parser)]
pub struct TxCmd {
    /// Skip the confirmation prompt
    #[arg(long, default_value_t = false)]
    yes: bool,

    #[command(subcommand)]
    subcmd: SubCmd,
}

#[derive(Subcommand)]
enum SubCmd {
    /// Submit a new proposal
    CreateProposal {
        /// Proposal title
        title: String,

        /// What the DAO is being asked to decide
        description: String,

        /// Length of the voting window, in days from now
        #[arg(long, default_value_t = 7)]
        duration_in_days: u64,
    },
    /// Vote on an active proposal
    Vote {
        /// Proposal id
        proposal_id: u64,

        /// `yes` to support, `no` to reject
        choice: String,
    },
    /// Close voting on a proposal and fix its outcome permanently
    Finalize {
        /// Proposal id
        proposal_id: u64,
    },
}

impl TxCmd {
    pub async fn run(self, cfg: &Config) -> anyhow::Result<()> {
        let Some(ctx) = context::connect(cfg).await? else {
            return Ok(());
        };

        match self.subcmd {
            SubCmd::CreateProposal {
                title,
                description,
                duration_in_days,
            } => {
                ensure!(!title.trim().is_empty(), "proposal title must not be empty");
                ensure!(
                    !description.trim().is_empty(),
                    "proposal description must not be empty"
                );

                if !self.yes
                    && !confirm(format!(
                        "🤔 Create proposal \"{title}\" with a {duration_in_days}-day voting window?"
                    ))?
                {
                    println!("🤷 aborted");
                    return Ok(());
                }

                println!("⏳ Submitting transaction and awaiting confirmation...");
                let outcome = ctx
                    .gateway
                    .create_proposal(&title, &description, duration_in_days)
                    .await;

                report_outcome(&ctx.gateway, outcome, None).await
            },
            SubCmd::Vote {
                proposal_id,
                choice,
            } => {
                let support = parse_choice(&choice)?;
                let proposal = find_proposal(&ctx.gateway, proposal_id).await?;
                let status = proposal.status(Utc::now());
                ensure!(
                    status == ProposalStatus::Active,
                    "proposal #{proposal_id} is {status}; voting is closed"
                );

                if !self.yes
                    && !confirm(format!(
                        "🤔 Vote {choice} on proposal #{proposal_id} \"{}\"?",
                        proposal.title
                    ))?
                {
                    println!("🤷 aborted");
                    return Ok(());
                }

                println!("⏳ Submitting transaction and awaiting confirmation...");
                let outcome = ctx.gateway.vote(proposal_id, support).await;

                report_outcome(&ctx.gateway, outcome, Some(proposal_id)).await
            },
            SubCmd::Finalize { proposal_id } => {
                let proposal = find_proposal(&ctx.gateway, proposal_id).await?;
                ensure!(
                    !proposal.executed,
                    "proposal #{proposal_id} is already finalized"
                );
                ensure!(
                    proposal.status(Utc::now()) != ProposalStatus::Active,
                    "proposal #{proposal_id} is still open for voting"
                );
                ensure!(
                    is_owner(&ctx.gateway, ctx.connection.address).await,
                    "only the contract owner may finalize proposals"
                );

                if !self.yes
                    && !confirm(format!(
                        "🤔 Finalize proposal #{proposal_id} \"{}\"? This cannot be undone.",
                        proposal.title
                    ))?
                {
                    println!("🤷 aborted");
                    return Ok(());
                }

                println!("⏳ Submitting transaction and awaiting confirmation...");
                let outcome = ctx.gateway.finalize_proposal(proposal_id).await;

                report_outcome(&ctx.gateway, outcome, Some(proposal_id)).await
            },
        }
    }
}

fn parse_choice(choice: &str) -> anyhow::Result<bool> {
    match choice {
        "yes" => Ok(true),
        "no" => Ok(false),
        _ => bail!("invalid vote choice `{choice}`; expecting: yes|no"),
    }
}

async fn find_proposal<Q>(querier: &Q, proposal_id: u64) -> anyhow::Result<Proposal>
where
    Q: DaoQuerier + Sync,
{
    load_proposals(querier)
        .await
        .into_iter()
        .find(|p| p.id == proposal_id)
        .ok_or_else(|| anyhow::anyhow!("proposal #{proposal_id} not found"))
}

/// Report the outcome uniformly, then refresh the proposal set so the user
/// sees the effect of a successful write immediately. `focus` names the
/// proposal to show; `None` shows the newest one (after a create).
async fn report_outcome<P>(
    gateway: &Gateway<P>,
    outcome: TxOutcome,
    focus: Option<u64>,
) -> anyhow::Result<()>
where
    P: alloy::providers::Provider,
{
    if !outcome.success {
        println!(
            "{}",
            "❌ Transaction failed; see the log for details.".red()
        );
        return Ok(());
    }

    if let Some(tx_hash) = outcome.tx_hash {
        println!("{}", format!("✅ Transaction confirmed: {tx_hash}").green());
    }

    let proposals = load_proposals(gateway).await;
    let now = Utc::now();
    let shown = match focus {
        Some(id) => proposals.iter().find(|p| p.id == id),
        None => proposals.last(),
    };

    if let Some(proposal) = shown {
        println!("{}", render_card(proposal, now));
    }

    Ok(())
}

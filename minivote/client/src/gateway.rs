use {
    crate::{Error, WalletConnection},
    alloy::{
        primitives::{Address, TxHash, U256},
        providers::{Provider, ProviderBuilder},
        sol,
    },
    async_trait::async_trait,
    chrono::{DateTime, Utc},
    minivote_types::{deadline_from_unix, Proposal, TxOutcome},
    tracing::{error, info},
    url::Url,
};

sol! {
    #[sol(rpc)]
    contract MiniVoteDao {
        function proposalCount() external view returns (uint256);

        function proposals(uint256 index) external view returns (
            string memory title,
            string memory description,
            uint256 yesVotes,
            uint256 noVotes,
            uint256 deadline,
            bool executed,
            bool passed,
            address proposer
        );

        function owner() external view returns (address);

        function createProposal(string memory title, string memory description, uint256 deadline) external;

        function vote(uint256 proposalId, bool support) external;

        function finalizeProposal(uint256 proposalId) external;
    }
}

/// One proposal as the contract hands it out, before any display mapping.
#[derive(Clone, Debug)]
pub struct RawProposal {
    pub title: String,
    pub description: String,
    pub yes_votes: U256,
    pub no_votes: U256,
    pub deadline: u64,
    pub executed: bool,
    pub passed: bool,
    pub proposer: Address,
}

impl RawProposal {
    pub fn into_proposal(self, id: u64) -> Proposal {
        Proposal {
            id,
            title: self.title,
            description: self.description,
            yes_votes: self.yes_votes,
            no_votes: self.no_votes,
            deadline: deadline_from_unix(self.deadline),
            executed: self.executed,
            passed: self.passed,
            proposer: self.proposer,
        }
    }
}

/// The raw read surface of the contract. The repository and its tests work
/// against this seam rather than a live RPC connection.
#[async_trait]
pub trait DaoQuerier {
    async fn proposal_count(&self) -> Result<u64, Error>;

    async fn proposal(&self, index: u64) -> Result<RawProposal, Error>;

    async fn owner(&self) -> Result<Address, Error>;
}

/// An RPC provider with the connection's signing capability attached. The
/// gateway is a stateless factory over this: build a provider, bind the
/// handle, no retries and no caching beyond the signer's lifetime.
pub fn build_provider(
    rpc_url: &str,
    connection: &WalletConnection,
) -> Result<impl Provider + Clone, Error> {
    let url: Url = rpc_url.parse()?;

    Ok(ProviderBuilder::new()
        .wallet(connection.wallet.clone())
        .connect_http(url))
}

/// A bound handle to the deployed voting contract.
pub struct Gateway<P> {
    dao: MiniVoteDao::MiniVoteDaoInstance<P>,
}

impl<P> Gateway<P>
where
    P: Provider,
{
    pub fn new(contract: Address, provider: P) -> Self {
        Self {
            dao: MiniVoteDao::new(contract, provider),
        }
    }

    /// Submit a new proposal whose voting window closes `duration_in_days`
    /// from now, and wait for it to land on chain.
    pub async fn create_proposal(
        &self,
        title: &str,
        description: &str,
        duration_in_days: u64,
    ) -> TxOutcome {
        let deadline = deadline_after_days(Utc::now(), duration_in_days);

        match self.try_create_proposal(title, description, deadline).await {
            Ok(tx_hash) => {
                info!(%tx_hash, title, "proposal created");
                TxOutcome::confirmed(tx_hash)
            },
            Err(err) => {
                error!(%err, title, "failed to create proposal");
                TxOutcome::failed()
            },
        }
    }

    /// Cast a yes/no vote on a proposal and wait for confirmation.
    pub async fn vote(&self, proposal_id: u64, support: bool) -> TxOutcome {
        match self.try_vote(proposal_id, support).await {
            Ok(tx_hash) => {
                info!(%tx_hash, proposal_id, support, "vote confirmed");
                TxOutcome::confirmed(tx_hash)
            },
            Err(err) => {
                error!(%err, proposal_id, "failed to vote on proposal");
                TxOutcome::failed()
            },
        }
    }

    /// Close voting permanently, fixing the proposal's outcome.
    pub async fn finalize_proposal(&self, proposal_id: u64) -> TxOutcome {
        match self.try_finalize_proposal(proposal_id).await {
            Ok(tx_hash) => {
                info!(%tx_hash, proposal_id, "proposal finalized");
                TxOutcome::confirmed(tx_hash)
            },
            Err(err) => {
                error!(%err, proposal_id, "failed to finalize proposal");
                TxOutcome::failed()
            },
        }
    }

    async fn try_create_proposal(
        &self,
        title: &str,
        description: &str,
        deadline: u64,
    ) -> Result<TxHash, Error> {
        let pending = self
            .dao
            .createProposal(
                title.to_string(),
                description.to_string(),
                U256::from(deadline),
            )
            .send()
            .await?;

        Ok(pending.watch().await?)
    }

    async fn try_vote(&self, proposal_id: u64, support: bool) -> Result<TxHash, Error> {
        let pending = self
            .dao
            .vote(U256::from(proposal_id), support)
            .send()
            .await?;

        Ok(pending.watch().await?)
    }

    async fn try_finalize_proposal(&self, proposal_id: u64) -> Result<TxHash, Error> {
        let pending = self
            .dao
            .finalizeProposal(U256::from(proposal_id))
            .send()
            .await?;

        Ok(pending.watch().await?)
    }
}

#[async_trait]
impl<P> DaoQuerier for Gateway<P>
where
    P: Provider,
{
    async fn proposal_count(&self) -> Result<u64, Error> {
        let count = self.dao.proposalCount().call().await?;

        Ok(count.saturating_to())
    }

    async fn proposal(&self, index: u64) -> Result<RawProposal, Error> {
        let raw = self.dao.proposals(U256::from(index)).call().await?;

        Ok(RawProposal {
            title: raw.title,
            description: raw.description,
            yes_votes: raw.yesVotes,
            no_votes: raw.noVotes,
            deadline: raw.deadline.saturating_to(),
            executed: raw.executed,
            passed: raw.passed,
            proposer: raw.proposer,
        })
    }

    async fn owner(&self) -> Result<Address, Error> {
        Ok(self.dao.owner().call().await?)
    }
}

/// Absolute unix deadline for a voting window of `days` days starting at
/// `now`, matching how the contract expects deadlines to be quoted.
pub fn deadline_after_days(now: DateTime<Utc>, days: u64) -> u64 {
    let now = now.timestamp().max(0) as u64;

    now.saturating_add(days.saturating_mul(86_400))
}

// ----------------------------------- tests -----------------------------------

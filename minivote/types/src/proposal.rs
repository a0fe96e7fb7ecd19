use {
    crate::{math::vote_percentages, serde_dec},
    alloy_primitives::{Address, U256},
    chrono::{DateTime, Utc},
    serde::Serialize,
    std::fmt,
};

/// A read-only projection of one proposal's on-chain state.
///
/// The contract assigns ids sequentially; everything except the vote tallies
/// and the `executed`/`passed` pair is immutable after creation. Vote tallies
/// only ever grow until the proposal is finalized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Proposal {
    pub id: u64,
    pub title: String,
    pub description: String,
    #[serde(with = "serde_dec")]
    pub yes_votes: U256,
    #[serde(with = "serde_dec")]
    pub no_votes: U256,
    pub deadline: DateTime<Utc>,
    pub executed: bool,
    pub passed: bool,
    pub proposer: Address,
}

impl Proposal {
    /// Derive the proposal's status at the given instant. Never cached; the
    /// caller is expected to pass the current time at render/read time.
    ///
    /// `executed` dominates every other signal: a proposal past its deadline
    /// and marked passed that has since been executed reports `Finalized`,
    /// never `Passed`.
    pub fn status(&self, now: DateTime<Utc>) -> ProposalStatus {
        if self.executed {
            ProposalStatus::Finalized
        } else if now < self.deadline {
            ProposalStatus::Active
        } else if self.passed {
            ProposalStatus::Passed
        } else {
            ProposalStatus::Failed
        }
    }

    pub fn total_votes(&self) -> U256 {
        self.yes_votes.saturating_add(self.no_votes)
    }

    /// Yes and no vote shares in percent, two decimal places.
    pub fn vote_split(&self) -> (f64, f64) {
        vote_percentages(self.yes_votes, self.no_votes)
    }
}

/// Convert the contract's unix-seconds deadline into a timestamp. Values
/// beyond the representable range clamp rather than fail; the contract never
/// produces them, but a display model must not panic on garbage.
pub fn deadline_from_unix(secs: u64) -> DateTime<Utc> {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ProposalStatus {
    Active,
    Passed,
    Failed,
    Finalized,
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            Self::Active => "Active",
            Self::Passed => "Passed",
            Self::Failed => "Failed",
            Self::Finalized => "Finalized",
        };

        f.write_str(label)
    }
}

/// Aggregate counts shown by the stats view, derived from a full proposal
/// load at a fixed instant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DaoStats {
    pub total_proposals: usize,
    pub active_proposals: usize,
    pub proposals_passed: usize,
}

impl DaoStats {
    pub fn derive(proposals: &[Proposal], now: DateTime<Utc>) -> Self {
        Self {
            total_proposals: proposals.len(),
            active_proposals: proposals
                .iter()
                .filter(|p| p.status(now) == ProposalStatus::Active)
                .count(),
            proposals_passed: proposals.iter().filter(|p| p.passed).count(),
        }
    }
}

// ----------------------------------- tests -----------------------------------

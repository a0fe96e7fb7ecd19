use {
    crate::proposal::{Proposal, ProposalStatus},
    chrono::{DateTime, Utc},
    std::{fmt, str::FromStr},
    thiserror::Error,
};

/// The view selector over a loaded proposal set. Filtering is a pure function
/// of the set, the selector, and the instant it is evaluated at; it never
/// reorders, so the repository's ascending-id order survives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProposalFilter {
    #[default]
    All,
    Active,
    Passed,
    Failed,
    Finalized,
}

impl ProposalFilter {
    /// The four non-identity filters. At any fixed instant they partition a
    /// proposal set; `All` is their union.
    pub const STATUSES: [Self; 4] = [Self::Active, Self::Passed, Self::Failed, Self::Finalized];

    fn status(&self) -> Option<ProposalStatus> {
        match self {
            Self::All => None,
            Self::Active => Some(ProposalStatus::Active),
            Self::Passed => Some(ProposalStatus::Passed),
            Self::Failed => Some(ProposalStatus::Failed),
            Self::Finalized => Some(ProposalStatus::Finalized),
        }
    }

    pub fn matches(&self, proposal: &Proposal, now: DateTime<Utc>) -> bool {
        match self.status() {
            Some(status) => proposal.status(now) == status,
            None => true,
        }
    }

    pub fn apply<'a>(&self, proposals: &'a [Proposal], now: DateTime<Utc>) -> Vec<&'a Proposal> {
        proposals.iter().filter(|p| self.matches(p, now)).collect()
    }
}

impl fmt::Display for ProposalFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Finalized => "finalized",
        };

        f.write_str(label)
    }
}

impl FromStr for ProposalFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "passed" => Ok(Self::Passed),
            "failed" => Ok(Self::Failed),
            "finalized" => Ok(Self::Finalized),
            unknown => Err(ParseFilterError(unknown.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("unknown proposal filter `{0}`; expecting: all|active|passed|failed|finalized")]
pub struct ParseFilterError(String);

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy_primitives::{Address, U256},
        chrono::TimeDelta,
        proptest::prelude::*,
        test_case::test_case,
    };

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_754_000_000, 0).unwrap()
    }

    fn proposal(id: u64, deadline_offset_secs: i64, executed: bool, passed: bool) -> Proposal {
        Proposal {
            id,
            title: format!("proposal {id}"),
            description: String::new(),
            yes_votes: U256::ZERO,
            no_votes: U256::ZERO,
            deadline: now() + TimeDelta::seconds(deadline_offset_secs),
            executed,
            passed,
            proposer: Address::ZERO,
        }
    }

    fn sample_set() -> Vec<Proposal> {
        vec![
            proposal(0, 3600, false, false),
            proposal(1, -3600, false, true),
            proposal(2, -3600, false, false),
            proposal(3, -3600, true, true),
            proposal(4, 3600, false, true),
        ]
    }

    #[test_case(ProposalFilter::All => vec![0, 1, 2, 3, 4]; "all")]
    #[test_case(ProposalFilter::Active => vec![0, 4]; "active")]
    #[test_case(ProposalFilter::Passed => vec![1]; "passed")]
    #[test_case(ProposalFilter::Failed => vec![2]; "failed")]
    #[test_case(ProposalFilter::Finalized => vec![3]; "finalized")]
    fn filters_select_the_expected_ids(filter: ProposalFilter) -> Vec<u64> {
        filter
            .apply(&sample_set(), now())
            .into_iter()
            .map(|p| p.id)
            .collect()
    }

    #[test]
    fn filtering_is_idempotent() {
        let proposals = sample_set();
        let once: Vec<Proposal> = ProposalFilter::Active
            .apply(&proposals, now())
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<Proposal> = ProposalFilter::Active
            .apply(&once, now())
            .into_iter()
            .cloned()
            .collect();

        assert_eq!(once, twice);
    }

    #[test]
    fn parsing_round_trips_every_filter() {
        for filter in [ProposalFilter::All]
            .into_iter()
            .chain(ProposalFilter::STATUSES)
        {
            assert_eq!(filter.to_string().parse::<ProposalFilter>().unwrap(), filter);
        }

        assert!("pending".parse::<ProposalFilter>().is_err());
    }

    proptest! {
        /// At a fixed instant, every proposal is selected by exactly one of
        /// the four status filters, so together they tile the `all` view.
        #[test]
        fn status_filters_partition_any_set(
            cases in prop::collection::vec((-10_000i64..10_000, any::<bool>(), any::<bool>()), 0..50),
        ) {
            let proposals: Vec<Proposal> = cases
                .into_iter()
                .enumerate()
                .map(|(id, (offset, executed, passed))| proposal(id as u64, offset, executed, passed))
                .collect();

            let mut tiled = 0;
            for filter in ProposalFilter::STATUSES {
                tiled += filter.apply(&proposals, now()).len();
            }
            prop_assert_eq!(tiled, ProposalFilter::All.apply(&proposals, now()).len());

            for p in &proposals {
                let hits = ProposalFilter::STATUSES
                    .iter()
                    .filter(|filter| filter.matches(p, now()))
                    .count();
                prop_assert_eq!(hits, 1);
            }
        }
    }
}

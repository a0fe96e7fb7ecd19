use {
    crate::{DaoQuerier, Error},
    alloy::primitives::Address,
    chrono::Utc,
    minivote_types::{DaoStats, Proposal},
    tracing::error,
};

/// Pull every proposal off the contract, in ascending id order. Reads go one
/// index at a time; any single failure aborts the whole load and yields an
/// empty list rather than a partial one, so callers see either the complete
/// set or nothing. An empty result is therefore ambiguous between "no
/// proposals" and "load failed"; the diagnostic for the latter is in the log.
pub async fn load_proposals<Q>(querier: &Q) -> Vec<Proposal>
where
    Q: DaoQuerier + Sync,
{
    match try_load_proposals(querier).await {
        Ok(proposals) => proposals,
        Err(err) => {
            error!(%err, "failed to load proposals");
            Vec::new()
        },
    }
}

async fn try_load_proposals<Q>(querier: &Q) -> Result<Vec<Proposal>, Error>
where
    Q: DaoQuerier + Sync,
{
    let count = querier.proposal_count().await?;
    let mut proposals = Vec::with_capacity(count as usize);

    for index in 0..count {
        let raw = querier.proposal(index).await?;
        proposals.push(raw.into_proposal(index));
    }

    Ok(proposals)
}

/// Aggregate statistics over a full load, evaluated at the current instant.
/// A failed load shows up as all-zero counts, same as an empty DAO.
pub async fn load_stats<Q>(querier: &Q) -> DaoStats
where
    Q: DaoQuerier + Sync,
{
    let proposals = load_proposals(querier).await;

    DaoStats::derive(&proposals, Utc::now())
}

/// Whether the connected address is the contract owner. A failed read logs
/// and reports `false`; the worst outcome is a hidden finalize action, not a
/// crash.
pub async fn is_owner<Q>(querier: &Q, address: Address) -> bool
where
    Q: DaoQuerier + Sync,
{
    match querier.owner().await {
        Ok(owner) => owner == address,
        Err(err) => {
            error!(%err, "failed to query contract owner");
            false
        },
    }
}

// ----------------------------------- tests -----------------------------------

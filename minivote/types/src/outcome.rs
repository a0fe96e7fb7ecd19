use {alloy_primitives::TxHash, serde::Serialize};

/// The uniform result of every write against the contract: either the
/// transaction was included on chain and we have its hash, or it wasn't and
/// we don't. Failures never carry an error out of the gateway; the diagnostic
/// goes to the log and callers branch on `success` alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TxOutcome {
    pub success: bool,
    pub tx_hash: Option<TxHash>,
}

impl TxOutcome {
    pub fn confirmed(tx_hash: TxHash) -> Self {
        Self {
            success: true,
            tx_hash: Some(tx_hash),
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            tx_hash: None,
        }
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no wallet provider is available")]
    NoProvider,

    #[error("wallet connection request was rejected")]
    Rejected,

    #[error("invalid RPC endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error(transparent)]
    Signer(#[from] alloy::signers::local::LocalSignerError),

    #[error(transparent)]
    Rpc(#[from] alloy::transports::TransportError),

    #[error(transparent)]
    Contract(#[from] alloy::contract::Error),

    #[error(transparent)]
    Confirmation(#[from] alloy::providers::PendingTransactionError),
}

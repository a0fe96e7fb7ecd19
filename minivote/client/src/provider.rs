use {
    crate::Error,
    alloy::{
        network::EthereumWallet,
        primitives::Address,
        providers::{Provider, ProviderBuilder},
        signers::local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner},
    },
    async_trait::async_trait,
    std::{env, pin::Pin},
    tokio_stream::Stream,
    url::Url,
};

/// Notifications a wallet provider pushes at the application: the user
/// switched or disconnected accounts, or moved the wallet to another chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletEvent {
    AccountsChanged(Vec<Address>),
    ChainChanged(u64),
}

pub type WalletEventStream = Pin<Box<dyn Stream<Item = WalletEvent> + Send>>;

/// The boundary to whatever holds the user's key. Everything above this trait
/// only ever asks for accounts, the chain id, a signing capability, and a
/// subscription to change notifications.
#[async_trait]
pub trait WalletProvider {
    /// Ask the provider for the accounts it is willing to expose. An empty
    /// vector means the user declined.
    async fn request_accounts(&self) -> Result<Vec<Address>, Error>;

    async fn chain_id(&self) -> Result<u64, Error>;

    fn wallet(&self) -> Result<EthereumWallet, Error>;

    /// Change notifications for the lifetime of the session. Providers that
    /// never emit any return a stream that stays pending forever.
    fn subscribe(&self) -> WalletEventStream;
}

/// A wallet provider backed by a BIP-39 mnemonic from the environment. This
/// is the CLI's stand-in for a browser extension: if the variable isn't set,
/// there is no wallet, and that's a user-visible state rather than an error.
pub struct EnvProvider {
    rpc_url: Url,
    signer: PrivateKeySigner,
}

impl EnvProvider {
    pub const MNEMONIC_VAR: &'static str = "MNEMONIC";

    /// Build the provider from `MNEMONIC` (a `.env` file is honored).
    /// Returns `Ok(None)` when the variable is unset; fails only when a
    /// mnemonic is present but unusable.
    pub fn from_env(rpc_url: &str) -> Result<Option<Self>, Error> {
        dotenvy::dotenv().ok();

        let Ok(mnemonic) = env::var(Self::MNEMONIC_VAR) else {
            return Ok(None);
        };

        let signer = MnemonicBuilder::<English>::default()
            .phrase(mnemonic.trim())
            .build()?;

        Ok(Some(Self {
            rpc_url: rpc_url.parse()?,
            signer,
        }))
    }
}

#[async_trait]
impl WalletProvider for EnvProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>, Error> {
        Ok(vec![self.signer.address()])
    }

    async fn chain_id(&self) -> Result<u64, Error> {
        let provider = ProviderBuilder::new().connect_http(self.rpc_url.clone());

        Ok(provider.get_chain_id().await?)
    }

    fn wallet(&self) -> Result<EthereumWallet, Error> {
        Ok(EthereumWallet::new(self.signer.clone()))
    }

    fn subscribe(&self) -> WalletEventStream {
        // A local signer never changes accounts or chains behind our back.
        Box::pin(tokio_stream::pending())
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, std::str::FromStr};

    // Both cases in one test: the suite runs multi-threaded and `MNEMONIC` is
    // process-global state.
    #[test]
    fn provider_presence_follows_the_environment() {
        env::remove_var(EnvProvider::MNEMONIC_VAR);
        assert!(EnvProvider::from_env("http://localhost:8545")
            .unwrap()
            .is_none());

        env::set_var(
            EnvProvider::MNEMONIC_VAR,
            "test test test test test test test test test test test junk",
        );
        let provider = EnvProvider::from_env("http://localhost:8545")
            .unwrap()
            .unwrap();
        env::remove_var(EnvProvider::MNEMONIC_VAR);

        // The first account of the well-known test mnemonic.
        assert_eq!(
            provider.signer.address(),
            Address::from_str("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266").unwrap(),
        );
    }
}

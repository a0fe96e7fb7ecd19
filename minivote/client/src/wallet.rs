use {
    crate::{Error, WalletEvent, WalletProvider},
    alloy::{network::EthereumWallet, primitives::Address},
    tokio_stream::StreamExt,
    tracing::{error, info},
};

/// An established wallet session: who is signing, on which chain, and the
/// capability to do so.
#[derive(Clone)]
pub struct WalletConnection {
    pub address: Address,
    pub chain_id: u64,
    pub wallet: EthereumWallet,
}

/// Connection lifecycle. Only the connector mutates this, and only in
/// response to `connect` calls and provider events.
#[derive(Clone, Default)]
pub enum ConnectionState {
    #[default]
    Uninitialized,
    Connecting,
    Connected(WalletConnection),
    Disconnected,
}

/// Owns the wallet provider and the single logical connection derived from
/// it. Lives on one task; all state transitions happen between awaits, so no
/// synchronization is needed.
pub struct WalletConnector<P> {
    provider: Option<P>,
    state: ConnectionState,
}

impl<P> WalletConnector<P>
where
    P: WalletProvider,
{
    pub fn new(provider: Option<P>) -> Self {
        Self {
            provider,
            state: ConnectionState::Uninitialized,
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    pub fn connection(&self) -> Option<&WalletConnection> {
        match &self.state {
            ConnectionState::Connected(connection) => Some(connection),
            _ => None,
        }
    }

    /// Request account access and establish a connection. Every failure mode
    /// (no provider, declined request, transport trouble) lands in the
    /// `Disconnected` state and yields `None`; nothing escapes to the caller.
    pub async fn connect(&mut self) -> Option<WalletConnection> {
        let Some(provider) = &self.provider else {
            error!("no wallet provider is available");
            self.state = ConnectionState::Disconnected;
            return None;
        };

        self.state = ConnectionState::Connecting;

        match Self::try_connect(provider).await {
            Ok(connection) => {
                info!(
                    address = %connection.address,
                    chain_id = connection.chain_id,
                    "wallet connected",
                );
                self.state = ConnectionState::Connected(connection.clone());

                Some(connection)
            },
            Err(err) => {
                error!(%err, "failed to connect wallet");
                self.state = ConnectionState::Disconnected;

                None
            },
        }
    }

    async fn try_connect(provider: &P) -> Result<WalletConnection, Error> {
        let accounts = provider.request_accounts().await?;
        let address = accounts.first().copied().ok_or(Error::Rejected)?;
        let chain_id = provider.chain_id().await?;
        let wallet = provider.wallet()?;

        Ok(WalletConnection {
            address,
            chain_id,
            wallet,
        })
    }

    /// React to one provider notification. Losing all accounts disconnects;
    /// a different account or a chain switch re-runs `connect`. In-flight
    /// requests elsewhere are not touched, only subsequent state.
    pub async fn handle_event(&mut self, event: WalletEvent) {
        match event {
            WalletEvent::AccountsChanged(accounts) => match accounts.first() {
                None => {
                    info!("wallet disconnected");
                    self.state = ConnectionState::Disconnected;
                },
                Some(address) => {
                    let current = self.connection().map(|connection| connection.address);
                    if current != Some(*address) {
                        self.connect().await;
                    }
                },
            },
            WalletEvent::ChainChanged(chain_id) => {
                info!(chain_id, "wallet switched chain");
                self.connect().await;
            },
        }
    }

    /// Drive the provider's event stream until it ends. This is the session
    /// subscription: the stream is acquired once and disposed when the call
    /// returns.
    pub async fn watch(&mut self) {
        let mut events = match &self.provider {
            Some(provider) => provider.subscribe(),
            None => return,
        };

        while let Some(event) = events.next().await {
            self.handle_event(event).await;
        }
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::WalletEventStream,
        alloy::signers::local::PrivateKeySigner,
        async_trait::async_trait,
        std::sync::{Arc, Mutex},
        tokio::sync::mpsc,
        tokio_stream::wrappers::ReceiverStream,
    };

    /// A scriptable provider: accounts and chain id can be swapped out from
    /// the test while the connector holds it, and events arrive over a
    /// channel like they would from a browser extension.
    struct MockProvider {
        accounts: Arc<Mutex<Vec<Address>>>,
        chain_id: Arc<Mutex<u64>>,
        events: Mutex<Option<mpsc::Receiver<WalletEvent>>>,
    }

    impl MockProvider {
        fn new(accounts: Vec<Address>, chain_id: u64) -> (Self, Arc<Mutex<Vec<Address>>>, Arc<Mutex<u64>>) {
            let accounts = Arc::new(Mutex::new(accounts));
            let chain_id = Arc::new(Mutex::new(chain_id));
            let provider = Self {
                accounts: accounts.clone(),
                chain_id: chain_id.clone(),
                events: Mutex::new(None),
            };

            (provider, accounts, chain_id)
        }

        fn with_events(self, events: mpsc::Receiver<WalletEvent>) -> Self {
            *self.events.lock().unwrap() = Some(events);
            self
        }
    }

    #[async_trait]
    impl WalletProvider for MockProvider {
        async fn request_accounts(&self) -> Result<Vec<Address>, Error> {
            Ok(self.accounts.lock().unwrap().clone())
        }

        async fn chain_id(&self) -> Result<u64, Error> {
            Ok(*self.chain_id.lock().unwrap())
        }

        fn wallet(&self) -> Result<EthereumWallet, Error> {
            Ok(EthereumWallet::new(PrivateKeySigner::random()))
        }

        fn subscribe(&self) -> WalletEventStream {
            match self.events.lock().unwrap().take() {
                Some(events) => Box::pin(ReceiverStream::new(events)),
                None => Box::pin(tokio_stream::pending()),
            }
        }
    }

    #[tokio::test]
    async fn connecting_without_a_provider_is_a_soft_failure() {
        let mut connector = WalletConnector::<MockProvider>::new(None);

        assert!(connector.connect().await.is_none());
        assert!(matches!(connector.state(), ConnectionState::Disconnected));
    }

    #[tokio::test]
    async fn connecting_with_no_exposed_accounts_is_rejected() {
        let (provider, ..) = MockProvider::new(vec![], 1);
        let mut connector = WalletConnector::new(Some(provider));

        assert!(connector.connect().await.is_none());
        assert!(matches!(connector.state(), ConnectionState::Disconnected));
    }

    #[tokio::test]
    async fn connecting_yields_the_first_account() {
        let (provider, ..) = MockProvider::new(vec![Address::repeat_byte(1), Address::repeat_byte(2)], 31_337);
        let mut connector = WalletConnector::new(Some(provider));

        let connection = connector.connect().await.unwrap();
        assert_eq!(connection.address, Address::repeat_byte(1));
        assert_eq!(connection.chain_id, 31_337);
        assert!(connector.connection().is_some());
    }

    #[tokio::test]
    async fn losing_all_accounts_disconnects() {
        let (provider, ..) = MockProvider::new(vec![Address::repeat_byte(1)], 1);
        let mut connector = WalletConnector::new(Some(provider));
        connector.connect().await.unwrap();

        connector
            .handle_event(WalletEvent::AccountsChanged(vec![]))
            .await;

        assert!(matches!(connector.state(), ConnectionState::Disconnected));
    }

    #[tokio::test]
    async fn switching_accounts_reconnects_to_the_new_one() {
        let (provider, accounts, _) = MockProvider::new(vec![Address::repeat_byte(1)], 1);
        let mut connector = WalletConnector::new(Some(provider));
        connector.connect().await.unwrap();

        *accounts.lock().unwrap() = vec![Address::repeat_byte(9)];
        connector
            .handle_event(WalletEvent::AccountsChanged(vec![Address::repeat_byte(9)]))
            .await;

        assert_eq!(connector.connection().unwrap().address, Address::repeat_byte(9));
    }

    #[tokio::test]
    async fn switching_chains_reconnects() {
        let (provider, _, chain_id) = MockProvider::new(vec![Address::repeat_byte(1)], 1);
        let mut connector = WalletConnector::new(Some(provider));
        connector.connect().await.unwrap();

        *chain_id.lock().unwrap() = 11_155_111;
        connector
            .handle_event(WalletEvent::ChainChanged(11_155_111))
            .await;

        assert_eq!(connector.connection().unwrap().chain_id, 11_155_111);
    }

    #[tokio::test]
    async fn watch_drains_the_subscription_until_it_closes() {
        let (tx, rx) = mpsc::channel(8);
        let (provider, ..) = MockProvider::new(vec![Address::repeat_byte(1)], 1);
        let provider = provider.with_events(rx);
        let mut connector = WalletConnector::new(Some(provider));
        connector.connect().await.unwrap();

        tx.send(WalletEvent::AccountsChanged(vec![])).await.unwrap();
        drop(tx);
        connector.watch().await;

        assert!(matches!(connector.state(), ConnectionState::Disconnected));
    }
}

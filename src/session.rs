// Raffle DApp - Wallet session seam
use alloy_primitives::Address;
use tokio::sync::watch;
use tracing::info;

use crate::config::{ChainId, WalletId};
use crate::error::{SessionError, TransactionError};
use crate::raffle_contract::{PreparedTransaction, TransactionResult};
use crate::raffle_state::{ConnectionStatus, Session};

/// Injected wallet capability: session state plus signing.
///
/// The DApp never mutates the session itself; it asks the provider and
/// observes the result through [`WalletProvider::subscribe`].
#[allow(async_fn_in_trait)]
pub trait WalletProvider {
    /// Receiver that yields every session change
    fn subscribe(&self) -> watch::Receiver<Session>;

    async fn connect(&self, wallet: WalletId, chain: ChainId) -> Result<Session, SessionError>;

    async fn disconnect(&self) -> Result<(), SessionError>;

    async fn switch_chain(&self, chain: ChainId) -> Result<Session, SessionError>;

    /// Sign and broadcast a prepared transaction
    async fn send_transaction(&self, transaction: PreparedTransaction) -> Result<TransactionResult, TransactionError>;

    /// Current session
    fn session(&self) -> Session {
        self.subscribe().borrow().clone()
    }
}

/// Broadcasts session changes on behalf of a wallet provider implementation
#[derive(Debug)]
pub struct SessionPublisher {
    sender: watch::Sender<Session>,
}

impl Default for SessionPublisher {
    fn default() -> Self {
        Self::new(Session::default())
    }
}

impl SessionPublisher {
    pub fn new(initial: Session) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.sender.subscribe()
    }

    pub fn current(&self) -> Session {
        self.sender.borrow().clone()
    }

    pub fn connecting(&self) {
        self.sender.send_modify(|session| session.status = ConnectionStatus::Connecting);
    }

    pub fn connected(&self, account: Address, chain: ChainId) -> Session {
        let session = Session::connected(account, chain);
        info!("Wallet connected: account={}, chain={}", account, chain);
        self.sender.send_replace(session.clone());
        session
    }

    pub fn chain_changed(&self, chain: ChainId) -> Session {
        self.sender.send_modify(|session| session.chain = Some(chain));
        info!("Wallet switched to chain {}", chain);
        self.current()
    }

    pub fn account_changed(&self, account: Option<Address>) -> Session {
        self.sender.send_modify(|session| {
            session.account = account;
            if account.is_none() {
                session.status = ConnectionStatus::Disconnected;
            }
        });
        self.current()
    }

    pub fn disconnected(&self) {
        info!("Wallet disconnected");
        self.sender.send_replace(Session::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_see_every_change() {
        let publisher = SessionPublisher::default();
        let mut receiver = publisher.subscribe();
        assert_eq!(receiver.borrow_and_update().status, ConnectionStatus::Disconnected);

        publisher.connecting();
        assert!(receiver.has_changed().unwrap());
        assert_eq!(receiver.borrow_and_update().status, ConnectionStatus::Connecting);

        let account = Address::repeat_byte(0x01);
        publisher.connected(account, 1);
        publisher.chain_changed(11_155_111);
        let session = receiver.borrow_and_update().clone();
        assert_eq!(session.account, Some(account));
        assert_eq!(session.chain, Some(11_155_111));

        publisher.account_changed(None);
        assert_eq!(publisher.current().status, ConnectionStatus::Disconnected);

        publisher.disconnected();
        assert_eq!(publisher.current(), Session::default());
    }
}

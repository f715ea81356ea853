// Raffle DApp - Raffle page
use alloy_primitives::Address;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::config::{ChainId, RaffleConfig};
use crate::error::{ContractCallError, SessionError, TransactionError};
use crate::raffle_contract::{RaffleContract, TransactionResult};
use crate::raffle_state::{RaffleSnapshot, Session};
use crate::session::WalletProvider;
use crate::transport::RpcTransport;
use crate::view_model::{fetch_snapshot, EntryPhase, RaffleView};

/// Cancels a pending mount fetch
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

/// Observed by a fetch to learn it is no longer wanted
#[derive(Clone, Debug)]
pub struct CancellationToken {
    receiver: watch::Receiver<bool>,
}

impl CancellationToken {
    pub fn pair() -> (CancelHandle, CancellationToken) {
        let (sender, receiver) = watch::channel(false);
        (CancelHandle { sender }, CancellationToken { receiver })
    }

    /// A token nobody can cancel
    pub fn never() -> CancellationToken {
        Self::pair().1
    }

    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolves once cancelled. Pends forever if the handle is dropped first.
    pub async fn cancelled(&mut self) {
        if self.receiver.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Result of the fetch-on-mount
#[derive(Debug)]
pub enum MountOutcome {
    Loaded,
    Cancelled,
    /// Snapshot keeps its previous value
    Failed(ContractCallError),
}

/// Result of one click on "enter raffle"
#[derive(Debug)]
pub enum EntryOutcome {
    /// Wallet accepted the transaction
    Confirmed(TransactionResult),
    /// Session precondition failed; nothing was prepared or sent
    Rejected(SessionError),
    /// Preparation or submission failed; snapshot unchanged
    Failed(TransactionError),
}

/// Holds the page in `Submitting` and restores `Idle` when dropped,
/// including when the entry future is dropped mid-await.
struct SubmittingGuard<'a> {
    view: &'a watch::Sender<RaffleView>,
}

impl<'a> SubmittingGuard<'a> {
    fn enter(view: &'a watch::Sender<RaffleView>) -> Self {
        view.send_modify(|view| view.set_phase(EntryPhase::Submitting));
        Self { view }
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.view.send_modify(|view| view.set_phase(EntryPhase::Idle));
    }
}

/// Owns the raffle page state and publishes it as a [`RaffleView`]
pub struct RafflePage<T, W> {
    contract: RaffleContract<T>,
    wallet: W,
    required_chain: ChainId,
    session: watch::Receiver<Session>,
    snapshot: Option<RaffleSnapshot>,
    view: watch::Sender<RaffleView>,
}

impl<T: RpcTransport, W: WalletProvider> RafflePage<T, W> {
    pub fn new(contract: RaffleContract<T>, wallet: W, required_chain: ChainId) -> Self {
        let mut session = wallet.subscribe();
        let view = RaffleView::new(None, &session.borrow_and_update(), required_chain, EntryPhase::Idle);
        let (view, _) = watch::channel(view);

        Self {
            contract,
            wallet,
            required_chain,
            session,
            snapshot: None,
            view,
        }
    }

    pub fn from_config(config: &RaffleConfig, transport: T, wallet: W) -> Self {
        Self::new(RaffleContract::from_config(config, transport), wallet, config.required_chain)
    }

    pub fn subscribe(&self) -> watch::Receiver<RaffleView> {
        self.view.subscribe()
    }

    pub fn view(&self) -> RaffleView {
        self.view.borrow().clone()
    }

    pub fn snapshot(&self) -> Option<&RaffleSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn phase(&self) -> EntryPhase {
        self.view.borrow().phase
    }

    pub fn contract(&self) -> &RaffleContract<T> {
        &self.contract
    }

    fn publish(&mut self) {
        let session = self.session.borrow_and_update().clone();
        let view = RaffleView::new(self.snapshot.clone(), &session, self.required_chain, self.phase());
        self.view.send_replace(view);
    }

    /// Fetch raffle fields on attach
    pub async fn mount(&mut self, cancel: &mut CancellationToken) -> MountOutcome {
        info!("Mounting raffle page for {}", self.contract.address());

        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("Raffle fetch cancelled");
                return MountOutcome::Cancelled;
            }
            result = fetch_snapshot(&self.contract) => result,
        };

        match fetched {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                self.publish();
                MountOutcome::Loaded
            }
            Err(e) => {
                error!("Failed to load raffle state: {}", e);
                MountOutcome::Failed(e)
            }
        }
    }

    /// Re-read the snapshot, keeping the old one on failure
    pub async fn refresh(&mut self) -> Result<(), ContractCallError> {
        match fetch_snapshot(&self.contract).await {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                self.publish();
                Ok(())
            }
            Err(e) => {
                warn!("Raffle refresh failed, keeping last snapshot: {}", e);
                Err(e)
            }
        }
    }

    /// Recompute the connected flag from the latest session
    pub fn sync_session(&mut self) {
        self.publish();
    }

    /// Wait for the next account or chain change and republish.
    /// Returns false once the wallet provider is gone.
    pub async fn session_changed(&mut self) -> bool {
        if self.session.changed().await.is_err() {
            return false;
        }
        self.publish();
        true
    }

    fn check_session(&self, session: &Session) -> Result<Address, SessionError> {
        let account = session.account.ok_or(SessionError::NoAccount)?;
        if session.chain != Some(self.required_chain) {
            return Err(SessionError::WrongChain {
                expected: self.required_chain,
                actual: session.chain,
            });
        }
        Ok(account)
    }

    /// Handle a click on "enter raffle"
    pub async fn enter_raffle(&mut self) -> EntryOutcome {
        let session = self.session.borrow().clone();
        let payer = match self.check_session(&session) {
            Ok(payer) => payer,
            Err(e) => {
                warn!("Enter raffle rejected: {}", e);
                return EntryOutcome::Rejected(e);
            }
        };

        if self.phase() == EntryPhase::Submitting {
            warn!("Enter raffle ignored, an entry is already pending");
            return EntryOutcome::Failed(TransactionError::AlreadyPending);
        }

        let submitted = {
            let _submitting = SubmittingGuard::enter(&self.view);
            self.submit_entry(payer).await
        };

        match submitted {
            Ok(result) => {
                info!("Transaction response: {}", result.transaction_hash);
                if self.refresh().await.is_err() {
                    info!("Entry confirmed, raffle fields stay at the last snapshot");
                }
                EntryOutcome::Confirmed(result)
            }
            Err(e) => {
                error!("Enter raffle failed: {}", e);
                EntryOutcome::Failed(e)
            }
        }
    }

    async fn submit_entry(&self, payer: Address) -> Result<TransactionResult, TransactionError> {
        // Always pay the live fee
        let fee = self.contract.get_entrance_fee().await?;
        let request = self.contract.enter_raffle_request(payer, fee);
        let transaction = self.contract.enter_raffle(&request);

        info!("Submitting {} from {} with value {} wei", request.abi.name(), payer, request.value_wei);
        self.wallet.send_transaction(transaction).await
    }
}

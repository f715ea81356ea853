// Raffle DApp - View-model
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ChainId;
use crate::error::ContractCallError;
use crate::raffle_contract::RaffleContract;
use crate::raffle_state::{RaffleSnapshot, Session};
use crate::transport::RpcTransport;

/// Write-path phase of the raffle page
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryPhase {
    #[default]
    Idle,
    Submitting,
}

/// Everything the renderer needs, published as one value
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaffleView {
    /// Last successfully fetched raffle fields
    pub snapshot: Option<RaffleSnapshot>,
    pub connected: bool,
    pub account: Option<Address>,
    pub phase: EntryPhase,
    /// Enter button state: connected and no entry in flight
    pub enter_enabled: bool,
}

impl RaffleView {
    pub fn new(snapshot: Option<RaffleSnapshot>, session: &Session, required_chain: ChainId, phase: EntryPhase) -> Self {
        let connected = is_connected(session, required_chain);
        Self {
            snapshot,
            connected,
            account: session.account,
            phase,
            enter_enabled: connected && phase == EntryPhase::Idle,
        }
    }

    /// Move to `phase`, keeping `enter_enabled` consistent with it
    pub fn set_phase(&mut self, phase: EntryPhase) {
        self.phase = phase;
        self.enter_enabled = self.connected && phase == EntryPhase::Idle;
    }
}

/// Account present and wallet on the raffle's chain
pub fn is_connected(session: &Session, required_chain: ChainId) -> bool {
    session.account.is_some() && session.chain == Some(required_chain)
}

/// Read players, recent winner and entrance fee in one round
pub async fn fetch_snapshot<T: RpcTransport>(contract: &RaffleContract<T>) -> Result<RaffleSnapshot, ContractCallError> {
    let (total_players, recent_winner, entrance_fee) = tokio::try_join!(
        contract.get_number_of_players(),
        contract.get_recent_winner(),
        contract.get_entrance_fee(),
    )?;

    let snapshot = RaffleSnapshot::new(total_players, recent_winner, entrance_fee);
    debug!(
        "Raffle snapshot: players={}, winner={:?}, fee={} ETH",
        snapshot.total_players, snapshot.last_winner, snapshot.entrance_fee_display
    );
    Ok(snapshot)
}

// Raffle DApp - Raffle state
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::config::ChainId;
use crate::error::ContractCallError;
use crate::utils::wei_to_ether;

/// Lifecycle of the on-chain raffle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaffleState {
    /// Raffle is open for entries
    Open,
    /// Interval elapsed, waiting for the VRF coordinator to pick a winner
    Calculating,
}

impl TryFrom<u8> for RaffleState {
    type Error = ContractCallError;

    fn try_from(val: u8) -> Result<Self, Self::Error> {
        match val {
            0 => Ok(RaffleState::Open),
            1 => Ok(RaffleState::Calculating),
            other => Err(ContractCallError::InvalidRaffleState(other)),
        }
    }
}

impl From<RaffleState> for u8 {
    fn from(state: RaffleState) -> Self {
        match state {
            RaffleState::Open => 0,
            RaffleState::Calculating => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Wallet session as reported by the wallet provider
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub status: ConnectionStatus,
    /// Active account, if any
    pub account: Option<Address>,
    /// Chain the wallet is currently on
    pub chain: Option<ChainId>,
}

impl Session {
    pub fn connected(account: Address, chain: ChainId) -> Self {
        Self {
            status: ConnectionStatus::Connected,
            account: Some(account),
            chain: Some(chain),
        }
    }
}

/// Raffle fields read from the contract in one fetch
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaffleSnapshot {
    pub total_players: U256,
    /// Most recent winner; `None` until the first draw
    pub last_winner: Option<Address>,
    pub entrance_fee_wei: U256,
    /// `entrance_fee_wei` in ETH
    pub entrance_fee_display: String,
}

impl RaffleSnapshot {
    pub fn new(total_players: U256, recent_winner: Address, entrance_fee_wei: U256) -> Self {
        // The contract reports the zero address until a winner is picked
        let last_winner = if recent_winner == Address::ZERO {
            None
        } else {
            Some(recent_winner)
        };

        Self {
            total_players,
            last_winner,
            entrance_fee_wei,
            entrance_fee_display: wei_to_ether(entrance_fee_wei),
        }
    }
}

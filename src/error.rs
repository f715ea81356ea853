// Raffle DApp - Errors
use thiserror::Error;

use crate::config::ChainId;

/// Wallet session problems that block the write path
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No wallet account is connected
    #[error("Connect your wallet to enter the raffle")]
    NoAccount,

    /// Wallet is connected to a chain other than the raffle's chain
    #[error("Wrong network: expected chain {expected}, wallet is on {actual:?}")]
    WrongChain {
        expected: ChainId,
        actual: Option<ChainId>,
    },

    /// Wallet is not one of the providers offered by the connect control
    #[error("Unsupported wallet: {0}")]
    UnsupportedWallet(String),

    /// The wallet provider failed to complete a session change
    #[error("Wallet provider error: {0}")]
    Provider(String),
}

/// Failures of a contract read (or of preparing a contract call)
#[derive(Error, Debug)]
pub enum ContractCallError {
    #[error("Contract call reverted: {0}")]
    Reverted(String),

    #[error("RPC endpoint unreachable: {0}")]
    Transport(String),

    #[error("Could not decode contract return data: {0}")]
    Decode(#[from] alloy_sol_types::Error),

    #[error("Unknown raffle state {0}")]
    InvalidRaffleState(u8),
}

/// Failures while signing or broadcasting a prepared transaction
#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("Signature request rejected by the user")]
    Rejected,

    #[error("Insufficient funds for entrance fee and gas")]
    InsufficientFunds,

    #[error("Transaction broadcast failed: {0}")]
    Broadcast(String),

    #[error("An entry is already being submitted")]
    AlreadyPending,

    #[error("Could not prepare transaction: {0}")]
    Prepare(#[from] ContractCallError),
}

/// Any error surfaced by the DApp
#[derive(Error, Debug)]
pub enum DappError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    ContractCall(#[from] ContractCallError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

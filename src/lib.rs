// Raffle DApp
// Client for the Sepolia raffle contract: wallet session, contract bindings,
// raffle view-model and the enter-raffle write path

// Core modules
pub mod config;
pub mod error;
pub mod transport;
pub mod utils;

// Raffle modules
pub mod raffle_contract;
pub mod raffle_state;
pub mod session;
pub mod view_model;

// UI composition
pub mod navbar;
pub mod raffle_page;

pub use config::{RaffleConfig, SEPOLIA_CHAIN_ID};
pub use error::{ContractCallError, DappError, SessionError, TransactionError};
pub use raffle_contract::{PreparedTransaction, RaffleContract, TransactionResult};
pub use raffle_page::{CancellationToken, EntryOutcome, MountOutcome, RafflePage};
pub use raffle_state::{RaffleSnapshot, Session};
pub use session::WalletProvider;
pub use transport::{CallRequest, RpcTransport};

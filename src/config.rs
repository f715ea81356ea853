// Raffle DApp - Static configuration
use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

/// EIP-155 chain identifier
pub type ChainId = u64;

/// Ethereum Sepolia test network
pub const SEPOLIA_CHAIN_ID: ChainId = 11_155_111;

/// Deployed raffle contract on Sepolia
pub const RAFFLE_CONTRACT_ADDRESS: Address = address!("2fC699ebE3833268BcDdC40Ed778FF9f40e317fB");

/// Wallets offered by the connect control
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WalletId {
    MetaMask,
    Backpack,
    CoinbaseWallet,
}

impl WalletId {
    /// Reverse-DNS identifier used by wallet providers
    pub fn rdns(&self) -> &'static str {
        match self {
            WalletId::MetaMask => "io.metamask",
            WalletId::Backpack => "app.backpack",
            WalletId::CoinbaseWallet => "com.coinbase.wallet",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModalSize {
    Compact,
    Wide,
}

/// Presentation of the wallet-connect modal
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectModalOptions {
    pub size: ModalSize,
    pub title: String,
    pub show_branding: bool,
}

/// Document metadata for the single page route
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    pub title: String,
    pub description: String,
}

/// Everything the DApp needs to know about its deployment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaffleConfig {
    /// Raffle contract address
    pub contract_address: Address,
    /// The one chain the raffle lives on
    pub required_chain: ChainId,
    /// Wallets the connect control offers, in display order
    pub wallets: Vec<WalletId>,
    pub connect_button_label: String,
    pub connect_modal: ConnectModalOptions,
    pub metadata: AppMetadata,
}

impl Default for RaffleConfig {
    fn default() -> Self {
        // Hardcoded deployment: raffle on Sepolia at 0x2fC6...17fB
        Self {
            contract_address: RAFFLE_CONTRACT_ADDRESS,
            required_chain: SEPOLIA_CHAIN_ID,
            wallets: vec![WalletId::MetaMask, WalletId::Backpack, WalletId::CoinbaseWallet],
            connect_button_label: "Connect wallet".to_string(),
            connect_modal: ConnectModalOptions {
                size: ModalSize::Wide,
                title: "Connect your Wallet".to_string(),
                show_branding: false,
            },
            metadata: AppMetadata {
                title: "Dev Raffle".to_string(),
                description: "Raffle DApp".to_string(),
            },
        }
    }
}

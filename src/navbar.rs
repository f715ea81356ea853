// Raffle DApp - Navigation bar
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{ChainId, ConnectModalOptions, RaffleConfig, WalletId};
use crate::error::SessionError;
use crate::raffle_state::Session;
use crate::session::WalletProvider;

pub const BRAND_TITLE: &str = "Raffle DApp";
pub const PORTFOLIO_LABEL: &str = "My Portfolio";
pub const PORTFOLIO_URL: &str = "https://devsadisatsowala.tech";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub href: String,
}

/// Configuration handed to the wallet provider's connect control
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectControl {
    pub wallets: Vec<WalletId>,
    pub required_chain: ChainId,
    pub button_label: String,
    pub modal: ConnectModalOptions,
}

/// Static chrome plus the connect control; no raffle state
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navbar {
    pub title: String,
    pub portfolio: Link,
    pub connect: ConnectControl,
}

impl Navbar {
    pub fn from_config(config: &RaffleConfig) -> Self {
        Self {
            title: BRAND_TITLE.to_string(),
            portfolio: Link {
                label: PORTFOLIO_LABEL.to_string(),
                href: PORTFOLIO_URL.to_string(),
            },
            connect: ConnectControl {
                wallets: config.wallets.clone(),
                required_chain: config.required_chain,
                button_label: config.connect_button_label.clone(),
                modal: config.connect_modal.clone(),
            },
        }
    }

    /// Connect through one of the offered wallets, on the raffle's chain
    pub async fn connect<W: WalletProvider>(&self, provider: &W, wallet: WalletId) -> Result<Session, SessionError> {
        if !self.connect.wallets.contains(&wallet) {
            warn!("Wallet {} is not offered by the connect control", wallet.rdns());
            return Err(SessionError::UnsupportedWallet(wallet.rdns().to_string()));
        }

        info!("Connecting {} on chain {}", wallet.rdns(), self.connect.required_chain);
        provider.connect(wallet, self.connect.required_chain).await
    }

    pub async fn disconnect<W: WalletProvider>(&self, provider: &W) -> Result<(), SessionError> {
        provider.disconnect().await
    }

    /// Ask the wallet to move to the raffle's chain
    pub async fn switch_to_required_chain<W: WalletProvider>(&self, provider: &W) -> Result<Session, SessionError> {
        provider.switch_chain(self.connect.required_chain).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ModalSize, SEPOLIA_CHAIN_ID};

    #[test]
    fn navbar_from_default_config() {
        let navbar = Navbar::from_config(&RaffleConfig::default());

        assert_eq!(navbar.title, "Raffle DApp");
        assert_eq!(navbar.portfolio.href, "https://devsadisatsowala.tech");
        assert_eq!(navbar.connect.required_chain, SEPOLIA_CHAIN_ID);
        assert_eq!(navbar.connect.button_label, "Connect wallet");
        assert_eq!(navbar.connect.modal.size, ModalSize::Wide);
        assert_eq!(navbar.connect.modal.title, "Connect your Wallet");
        assert!(!navbar.connect.modal.show_branding);
        assert_eq!(
            navbar.connect.wallets.iter().map(WalletId::rdns).collect::<Vec<_>>(),
            vec!["io.metamask", "app.backpack", "com.coinbase.wallet"]
        );
    }
}

// Raffle DApp - Node transport seam
use alloy_primitives::{Address, Bytes};

use crate::config::ChainId;
use crate::error::ContractCallError;

/// A read-only contract call (`eth_call`) against a deployed contract
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallRequest {
    pub chain_id: ChainId,
    pub to: Address,
    /// 4-byte selector followed by the ABI-encoded arguments
    pub data: Bytes,
}

/// Connection to a chain node. Implementations own retries and timeouts.
///
/// Reverts must map to [`ContractCallError::Reverted`] and connectivity
/// problems to [`ContractCallError::Transport`].
#[allow(async_fn_in_trait)]
pub trait RpcTransport {
    async fn call(&self, request: CallRequest) -> Result<Bytes, ContractCallError>;
}

impl<T: RpcTransport> RpcTransport for &T {
    async fn call(&self, request: CallRequest) -> Result<Bytes, ContractCallError> {
        (**self).call(request).await
    }
}

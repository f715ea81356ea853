// Raffle DApp - Contract bindings
// Reads go through an RpcTransport. Writes only produce a PreparedTransaction,
// submission belongs to the wallet provider.

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{sol, SolCall, SolEvent, SolEventInterface};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{ChainId, RaffleConfig};
use crate::error::ContractCallError;
use crate::raffle_state::RaffleState;
use crate::transport::{CallRequest, RpcTransport};

sol! {
    #![sol(extra_derives(Debug))]

    #[sol(all_derives)]
    interface IRaffle {
        event CoordinatorSet(address vrfCoordinator);
        event OwnershipTransferRequested(address indexed from, address indexed to);
        event OwnershipTransferred(address indexed from, address indexed to);
        event RaffleEnter(address indexed player);
        event RequestFulfilled(uint256 requestId, uint256[] randomWords);
        event RequestSent(uint256 requestId, uint32 numWords);
        event RequestedRaffleWinner(uint256 indexed requestId);
        event WinnerPicked(address indexed player);

        function callbackGasLimit() external view returns (uint32);
        function checkUpkeep(bytes memory) external view returns (bool upkeepNeeded, bytes memory);
        function getEntranceFee() external view returns (uint256);
        function getInterval() external view returns (uint256);
        function getLastTimeStamp() external view returns (uint256);
        function getNumberOfPlayers() external view returns (uint256);
        function getPlayer(uint256 index) external view returns (address);
        function getRaffleState() external view returns (uint8);
        function getRecentWinner() external view returns (address);
        function getRequestConfirmations() external view returns (uint256);
        function keyHash() external view returns (bytes32);
        function lastRequestId() external view returns (uint256);
        function numWords() external view returns (uint32);
        function owner() external view returns (address);
        function requestIds(uint256) external view returns (uint256);
        function s_requests(uint256) external view returns (bool fulfilled, bool exists);
        function s_subscriptionId() external view returns (uint256);
        function s_vrfCoordinator() external view returns (address);

        function acceptOwnership() external;
        function enterRaffle() external payable;
        function performUpkeep(bytes memory performData) external;
        function rawFulfillRandomWords(uint256 requestId, uint256[] memory randomWords) external;
        function setCoordinator(address _vrfCoordinator) external;
        function transferOwnership(address to) external;
    }
}

/// Decoded raffle contract event
pub type RaffleEvent = IRaffle::IRaffleEvents;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mutability {
    View,
    NonPayable,
    Payable,
}

/// Static description of one contract method
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub signature: &'static str,
    pub selector: [u8; 4],
    pub mutability: Mutability,
}

impl MethodDescriptor {
    const fn of<C: SolCall>(mutability: Mutability) -> Self {
        Self {
            signature: C::SIGNATURE,
            selector: C::SELECTOR,
            mutability,
        }
    }

    /// Method name without the parameter list
    pub fn name(&self) -> &'static str {
        match self.signature.find('(') {
            Some(end) => &self.signature[..end],
            None => self.signature,
        }
    }
}

/// The payable entry point players call to join
pub const ENTER_RAFFLE: MethodDescriptor = MethodDescriptor::of::<IRaffle::enterRaffleCall>(Mutability::Payable);

/// Every method of the raffle ABI
pub const METHODS: &[MethodDescriptor] = &[
    MethodDescriptor::of::<IRaffle::callbackGasLimitCall>(Mutability::View),
    MethodDescriptor::of::<IRaffle::checkUpkeepCall>(Mutability::View),
    MethodDescriptor::of::<IRaffle::getEntranceFeeCall>(Mutability::View),
    MethodDescriptor::of::<IRaffle::getIntervalCall>(Mutability::View),
    MethodDescriptor::of::<IRaffle::getLastTimeStampCall>(Mutability::View),
    MethodDescriptor::of::<IRaffle::getNumberOfPlayersCall>(Mutability::View),
    MethodDescriptor::of::<IRaffle::getPlayerCall>(Mutability::View),
    MethodDescriptor::of::<IRaffle::getRaffleStateCall>(Mutability::View),
    MethodDescriptor::of::<IRaffle::getRecentWinnerCall>(Mutability::View),
    MethodDescriptor::of::<IRaffle::getRequestConfirmationsCall>(Mutability::View),
    MethodDescriptor::of::<IRaffle::keyHashCall>(Mutability::View),
    MethodDescriptor::of::<IRaffle::lastRequestIdCall>(Mutability::View),
    MethodDescriptor::of::<IRaffle::numWordsCall>(Mutability::View),
    MethodDescriptor::of::<IRaffle::ownerCall>(Mutability::View),
    MethodDescriptor::of::<IRaffle::requestIdsCall>(Mutability::View),
    MethodDescriptor::of::<IRaffle::s_requestsCall>(Mutability::View),
    MethodDescriptor::of::<IRaffle::s_subscriptionIdCall>(Mutability::View),
    MethodDescriptor::of::<IRaffle::s_vrfCoordinatorCall>(Mutability::View),
    MethodDescriptor::of::<IRaffle::acceptOwnershipCall>(Mutability::NonPayable),
    ENTER_RAFFLE,
    MethodDescriptor::of::<IRaffle::performUpkeepCall>(Mutability::NonPayable),
    MethodDescriptor::of::<IRaffle::rawFulfillRandomWordsCall>(Mutability::NonPayable),
    MethodDescriptor::of::<IRaffle::setCoordinatorCall>(Mutability::NonPayable),
    MethodDescriptor::of::<IRaffle::transferOwnershipCall>(Mutability::NonPayable),
];

/// Resolve calldata to the method it invokes
pub fn describe_call(calldata: &[u8]) -> Option<&'static MethodDescriptor> {
    let selector = calldata.get(..4)?;
    METHODS.iter().find(|method| method.selector == selector)
}

/// Unsigned transaction ready to be signed and broadcast by a wallet
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedTransaction {
    pub chain_id: ChainId,
    pub to: Address,
    pub from: Option<Address>,
    pub data: Bytes,
    /// Native value attached to the call, in wei
    pub value: U256,
}

/// Receipt handle returned once a wallet accepted a transaction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResult {
    pub transaction_hash: B256,
}

/// A player's request to join the raffle
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnterRaffleRequest {
    pub contract_address: Address,
    pub abi: &'static MethodDescriptor,
    pub payer: Address,
    pub value_wei: U256,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestStatus {
    pub fulfilled: bool,
    pub exists: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpkeepCheck {
    pub upkeep_needed: bool,
    pub perform_data: Bytes,
}

/// Handle on the raffle contract at a fixed address
#[derive(Clone, Debug)]
pub struct RaffleContract<T> {
    address: Address,
    chain_id: ChainId,
    transport: T,
}

impl<T: RpcTransport> RaffleContract<T> {
    pub fn new(address: Address, chain_id: ChainId, transport: T) -> Self {
        Self {
            address,
            chain_id,
            transport,
        }
    }

    /// Bind the configured deployment
    pub fn from_config(config: &RaffleConfig, transport: T) -> Self {
        Self::new(config.contract_address, config.required_chain, transport)
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    async fn read<C: SolCall>(&self, call: C) -> Result<C::Return, ContractCallError> {
        let request = CallRequest {
            chain_id: self.chain_id,
            to: self.address,
            data: call.abi_encode().into(),
        };
        debug!("eth_call {} on {}", C::SIGNATURE, self.address);

        let output = self.transport.call(request).await.map_err(|e| {
            warn!("Read {} failed: {}", C::SIGNATURE, e);
            e
        })?;
        Ok(C::abi_decode_returns(&output, true)?)
    }

    fn prepare<C: SolCall>(&self, call: C, from: Option<Address>, value: U256) -> PreparedTransaction {
        let data: Bytes = call.abi_encode().into();
        if let Some(method) = describe_call(&data) {
            debug!("Prepared {} ({:?}) for {}", method.name(), method.mutability, self.address);
        }

        PreparedTransaction {
            chain_id: self.chain_id,
            to: self.address,
            from,
            data,
            value,
        }
    }

    pub async fn callback_gas_limit(&self) -> Result<u32, ContractCallError> {
        Ok(self.read(IRaffle::callbackGasLimitCall {}).await?._0)
    }

    pub async fn check_upkeep(&self, check_data: Bytes) -> Result<UpkeepCheck, ContractCallError> {
        let ret = self.read(IRaffle::checkUpkeepCall { _0: check_data }).await?;
        Ok(UpkeepCheck {
            upkeep_needed: ret.upkeepNeeded,
            perform_data: ret._1,
        })
    }

    pub async fn get_entrance_fee(&self) -> Result<U256, ContractCallError> {
        Ok(self.read(IRaffle::getEntranceFeeCall {}).await?._0)
    }

    pub async fn get_interval(&self) -> Result<U256, ContractCallError> {
        Ok(self.read(IRaffle::getIntervalCall {}).await?._0)
    }

    pub async fn get_last_timestamp(&self) -> Result<U256, ContractCallError> {
        Ok(self.read(IRaffle::getLastTimeStampCall {}).await?._0)
    }

    pub async fn get_number_of_players(&self) -> Result<U256, ContractCallError> {
        Ok(self.read(IRaffle::getNumberOfPlayersCall {}).await?._0)
    }

    pub async fn get_player(&self, index: U256) -> Result<Address, ContractCallError> {
        Ok(self.read(IRaffle::getPlayerCall { index }).await?._0)
    }

    pub async fn get_raffle_state(&self) -> Result<RaffleState, ContractCallError> {
        let raw = self.read(IRaffle::getRaffleStateCall {}).await?._0;
        RaffleState::try_from(raw)
    }

    pub async fn get_recent_winner(&self) -> Result<Address, ContractCallError> {
        Ok(self.read(IRaffle::getRecentWinnerCall {}).await?._0)
    }

    pub async fn get_request_confirmations(&self) -> Result<U256, ContractCallError> {
        Ok(self.read(IRaffle::getRequestConfirmationsCall {}).await?._0)
    }

    pub async fn key_hash(&self) -> Result<B256, ContractCallError> {
        Ok(self.read(IRaffle::keyHashCall {}).await?._0)
    }

    pub async fn last_request_id(&self) -> Result<U256, ContractCallError> {
        Ok(self.read(IRaffle::lastRequestIdCall {}).await?._0)
    }

    pub async fn num_words(&self) -> Result<u32, ContractCallError> {
        Ok(self.read(IRaffle::numWordsCall {}).await?._0)
    }

    pub async fn owner(&self) -> Result<Address, ContractCallError> {
        Ok(self.read(IRaffle::ownerCall {}).await?._0)
    }

    pub async fn request_ids(&self, index: U256) -> Result<U256, ContractCallError> {
        Ok(self.read(IRaffle::requestIdsCall { _0: index }).await?._0)
    }

    pub async fn s_requests(&self, request_id: U256) -> Result<RequestStatus, ContractCallError> {
        let ret = self.read(IRaffle::s_requestsCall { _0: request_id }).await?;
        Ok(RequestStatus {
            fulfilled: ret.fulfilled,
            exists: ret.exists,
        })
    }

    pub async fn s_subscription_id(&self) -> Result<U256, ContractCallError> {
        Ok(self.read(IRaffle::s_subscriptionIdCall {}).await?._0)
    }

    pub async fn s_vrf_coordinator(&self) -> Result<Address, ContractCallError> {
        Ok(self.read(IRaffle::s_vrfCoordinatorCall {}).await?._0)
    }

    /// Build the request a player signs to join with `value_wei`
    pub fn enter_raffle_request(&self, payer: Address, value_wei: U256) -> EnterRaffleRequest {
        EnterRaffleRequest {
            contract_address: self.address,
            abi: &ENTER_RAFFLE,
            payer,
            value_wei,
        }
    }

    /// Prepare the payable `enterRaffle()` call
    pub fn enter_raffle(&self, request: &EnterRaffleRequest) -> PreparedTransaction {
        PreparedTransaction {
            to: request.contract_address,
            ..self.prepare(IRaffle::enterRaffleCall {}, Some(request.payer), request.value_wei)
        }
    }

    pub fn accept_ownership(&self) -> PreparedTransaction {
        self.prepare(IRaffle::acceptOwnershipCall {}, None, U256::ZERO)
    }

    pub fn perform_upkeep(&self, perform_data: Bytes) -> PreparedTransaction {
        self.prepare(IRaffle::performUpkeepCall { performData: perform_data }, None, U256::ZERO)
    }

    pub fn raw_fulfill_random_words(&self, request_id: U256, random_words: Vec<U256>) -> PreparedTransaction {
        let call = IRaffle::rawFulfillRandomWordsCall {
            requestId: request_id,
            randomWords: random_words,
        };
        self.prepare(call, None, U256::ZERO)
    }

    pub fn set_coordinator(&self, vrf_coordinator: Address) -> PreparedTransaction {
        self.prepare(IRaffle::setCoordinatorCall { _vrfCoordinator: vrf_coordinator }, None, U256::ZERO)
    }

    pub fn transfer_ownership(&self, to: Address) -> PreparedTransaction {
        self.prepare(IRaffle::transferOwnershipCall { to }, None, U256::ZERO)
    }
}

/// Log filter: contract address plus up to four topics (`None` matches any)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventFilter {
    pub address: Address,
    pub topics: [Option<B256>; 4],
}

impl EventFilter {
    fn for_event<E: SolEvent>(address: Address) -> Self {
        Self {
            address,
            topics: [Some(E::SIGNATURE_HASH), None, None, None],
        }
    }

    fn with_topic(mut self, position: usize, topic: Option<B256>) -> Self {
        self.topics[position] = topic;
        self
    }

    pub fn matches(&self, address: Address, topics: &[B256]) -> bool {
        if address != self.address {
            return false;
        }
        self.topics.iter().enumerate().all(|(i, wanted)| match wanted {
            Some(wanted) => topics.get(i) == Some(wanted),
            None => true,
        })
    }
}

fn address_topic(address: Address) -> B256 {
    address.into_word()
}

fn uint_topic(value: U256) -> B256 {
    B256::from(value.to_be_bytes::<32>())
}

pub fn coordinator_set_event(contract: Address) -> EventFilter {
    EventFilter::for_event::<IRaffle::CoordinatorSet>(contract)
}

pub fn ownership_transfer_requested_event(
    contract: Address,
    from: Option<Address>,
    to: Option<Address>,
) -> EventFilter {
    EventFilter::for_event::<IRaffle::OwnershipTransferRequested>(contract)
        .with_topic(1, from.map(address_topic))
        .with_topic(2, to.map(address_topic))
}

pub fn ownership_transferred_event(contract: Address, from: Option<Address>, to: Option<Address>) -> EventFilter {
    EventFilter::for_event::<IRaffle::OwnershipTransferred>(contract)
        .with_topic(1, from.map(address_topic))
        .with_topic(2, to.map(address_topic))
}

pub fn raffle_enter_event(contract: Address, player: Option<Address>) -> EventFilter {
    EventFilter::for_event::<IRaffle::RaffleEnter>(contract).with_topic(1, player.map(address_topic))
}

pub fn request_fulfilled_event(contract: Address) -> EventFilter {
    EventFilter::for_event::<IRaffle::RequestFulfilled>(contract)
}

pub fn request_sent_event(contract: Address) -> EventFilter {
    EventFilter::for_event::<IRaffle::RequestSent>(contract)
}

pub fn requested_raffle_winner_event(contract: Address, request_id: Option<U256>) -> EventFilter {
    EventFilter::for_event::<IRaffle::RequestedRaffleWinner>(contract).with_topic(1, request_id.map(uint_topic))
}

pub fn winner_picked_event(contract: Address, player: Option<Address>) -> EventFilter {
    EventFilter::for_event::<IRaffle::WinnerPicked>(contract).with_topic(1, player.map(address_topic))
}

/// Decode a raw log emitted by the raffle contract
pub fn decode_raffle_log(topics: &[B256], data: &[u8]) -> Result<RaffleEvent, ContractCallError> {
    Ok(RaffleEvent::decode_raw_log(topics, data, true)?)
}

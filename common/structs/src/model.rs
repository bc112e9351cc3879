#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

/// Which branch of the flash loan callback executes. Always the first field of
/// the callback payload so it can be decoded before the rest of the schema.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operation {
    Loop,
    Unloop,
}

impl Operation {
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Operation::Loop),
            1 => Some(Operation::Unloop),
            _ => None,
        }
    }
}

/// Reads the operation tag from an encoded `CallbackParams` blob without
/// decoding the remaining fields. Returns `None` on an empty or unknown tag.
pub fn decode_operation_tag<M: ManagedTypeApi>(buffer: &ManagedBuffer<M>) -> Option<Operation> {
    let mut tag = [0u8; 1];
    if buffer.load_slice(0, &mut tag).is_err() {
        return None;
    }
    Operation::from_tag(tag[0])
}

/// How the debt leg of a loop is sized: either the caller pins the exact
/// amount to borrow, or the engine reverse-quotes the input needed to produce
/// the flash loan repayment through the swap route.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub enum BorrowSizing<M: ManagedTypeApi> {
    Quoted,
    Exact(BigUint<M>),
}

/// One hop of a swap path: the token received by this hop and the venue fee
/// charged on the hop's input.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, ManagedVecItem)]
pub struct SwapHop<M: ManagedTypeApi> {
    pub token_out: EgldOrEsdtTokenIdentifier<M>,
    pub fee_bps: u32,
}

/// Ordered route descriptor handed to the swap venue. Built by the engine's
/// path builder; the last hop's `token_out` is the final output token.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct SwapPath<M: ManagedTypeApi> {
    pub token_in: EgldOrEsdtTokenIdentifier<M>,
    pub hops: ManagedVec<M, SwapHop<M>>,
}

impl<M: ManagedTypeApi> SwapPath<M> {
    pub fn token_out(&self) -> EgldOrEsdtTokenIdentifier<M> {
        self.hops.get(self.hops.len() - 1).token_out.clone()
    }
}

/// Caller description of a hop-and-fee swap route. The input and output
/// tokens are implied by the operation (borrow -> supply for loops, supply ->
/// borrow for unloops); fees must hold one entry per hop, including the final
/// hop to the output token.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct SwapPathSpec<M: ManagedTypeApi> {
    pub intermediate_hops: ManagedVec<M, EgldOrEsdtTokenIdentifier<M>>,
    pub fees_bps: ManagedVec<M, u32>,
    pub max_amount_in: BigUint<M>,
}

/// Opaque swap payload forwarded verbatim to the venue. The engine only
/// enforces the slippage bounds around the call.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct GenericSwapSpec<M: ManagedTypeApi> {
    pub endpoint: ManagedBuffer<M>,
    pub args: ManagedVec<M, ManagedBuffer<M>>,
    pub max_amount_in: BigUint<M>,
    pub min_amount_out: BigUint<M>,
}

/// Unified swap route. `None` is an exact no-op passthrough, used by wrappers
/// that resupply without converting.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub enum SwapRoute<M: ManagedTypeApi> {
    None,
    Path(SwapPathSpec<M>),
    Generic(GenericSwapSpec<M>),
}

/// Everything the engine needs to resume execution inside the flash loan
/// callback. Serialized at `loop`/`unloop` entry, carried through the lending
/// market as an opaque blob, decoded once in the callback and discarded.
///
/// `user` is captured before the flash loan is issued; inside the callback the
/// caller context is the market, not the user. For unloops `supply_amount`
/// holds the receipt token amount taken into custody at entry and
/// `borrow_sizing` is unused.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct CallbackParams<M: ManagedTypeApi> {
    pub operation: Operation,
    pub user: ManagedAddress<M>,
    pub supply_token: EgldOrEsdtTokenIdentifier<M>,
    pub borrow_token: EgldOrEsdtTokenIdentifier<M>,
    pub supply_amount: BigUint<M>,
    pub borrow_sizing: BorrowSizing<M>,
    pub close_position: bool,
    pub route: SwapRoute<M>,
}

/// Reserve summary returned by the lending market for a listed asset.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct ReserveData<M: ManagedTypeApi> {
    pub receipt_token: TokenIdentifier<M>,
    pub risk_mode_category: u8,
    pub flash_premium_bps: BigUint<M>,
}

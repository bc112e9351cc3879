multiversx_sc::imports!();

#[multiversx_sc::module]
pub trait Storage {
    /// Address of the external lending market. The flash loan callback only
    /// accepts calls from this address.
    #[view(getMarketAddress)]
    #[storage_mapper("market_address")]
    fn market_address(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getSwapRouterAddress)]
    #[storage_mapper("swap_router_address")]
    fn swap_router_address(&self) -> SingleValueMapper<ManagedAddress>;

    /// Protocol fee in basis points, taken on the gross supplied amount of a
    /// loop. Zero disables the fee.
    #[view(getFeeBps)]
    #[storage_mapper("fee_bps")]
    fn fee_bps(&self) -> SingleValueMapper<BigUint>;

    #[view(getFeeTreasury)]
    #[storage_mapper("fee_treasury")]
    fn fee_treasury(&self) -> SingleValueMapper<ManagedAddress>;

    // Reentrancy guard, held across the whole loop/unloop call
    #[view(isFlashLoanOngoing)]
    #[storage_mapper("flash_loan_ongoing")]
    fn flash_loan_ongoing(&self) -> SingleValueMapper<bool>;
}

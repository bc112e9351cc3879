#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

use common_constants::BPS;
use common_errors::{
    ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO, ERROR_INSUFFICIENT_LIQUIDITY,
    ERROR_INSUFFICIENT_SWAP_INPUT, ERROR_INVALID_SWAP_PATH, ERROR_PAIR_NOT_CONFIGURED,
    ERROR_WRONG_PAYMENT_TOKEN,
};
use common_structs::SwapPath;

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct PairRate<M: ManagedTypeApi> {
    pub numerator: BigUint<M>,
    pub denominator: BigUint<M>,
}

/// Exact-output swap venue used in scenario tests. Pair prices are fixed
/// rates set by the owner: `amount_in = ceil(amount_out * num / den)`, with
/// each hop's fee charged on the hop's input. Output liquidity comes from the
/// contract's own balances.
#[multiversx_sc::contract]
pub trait SwapMock {
    #[init]
    fn init(&self) {}

    #[upgrade]
    fn upgrade(&self) {}

    #[only_owner]
    #[endpoint(setRate)]
    fn set_rate(
        &self,
        token_in: EgldOrEsdtTokenIdentifier,
        token_out: EgldOrEsdtTokenIdentifier,
        numerator: BigUint,
        denominator: BigUint,
    ) {
        require!(
            denominator > BigUint::zero(),
            ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO
        );
        self.rate(&token_in, &token_out).set(PairRate {
            numerator,
            denominator,
        });
    }

    #[view(quoteExactOutput)]
    fn quote_exact_output(&self, amount_out: BigUint, path: SwapPath<Self::Api>) -> BigUint {
        self.required_input(&amount_out, &path)
    }

    #[payable("*")]
    #[endpoint(swapExactOutput)]
    fn swap_exact_output(&self, amount_out: BigUint, path: SwapPath<Self::Api>) {
        let (token_in, amount_in) = self.call_value().egld_or_single_fungible_esdt();
        require!(token_in == path.token_in, ERROR_WRONG_PAYMENT_TOKEN);

        let required = self.required_input(&amount_out, &path);
        require!(amount_in >= required, ERROR_INSUFFICIENT_SWAP_INPUT);

        let token_out = path.token_out();
        require!(
            self.blockchain().get_sc_balance(&token_out, 0) >= amount_out,
            ERROR_INSUFFICIENT_LIQUIDITY
        );

        let caller = self.blockchain().get_caller();
        self.tx()
            .to(&caller)
            .egld_or_single_esdt(&token_out, 0, &amount_out)
            .transfer();

        let surplus = &amount_in - &required;
        if surplus > BigUint::zero() {
            self.tx()
                .to(&caller)
                .egld_or_single_esdt(&token_in, 0, &surplus)
                .transfer();
        }
    }

    /// Fixed-output endpoint for opaque swap payloads: consumes the payment
    /// and sends back exactly the requested amount.
    #[payable("*")]
    #[endpoint(swap)]
    fn swap(&self, wanted_token: EgldOrEsdtTokenIdentifier, wanted_amount: BigUint) {
        require!(
            self.blockchain().get_sc_balance(&wanted_token, 0) >= wanted_amount,
            ERROR_INSUFFICIENT_LIQUIDITY
        );
        let caller = self.blockchain().get_caller();
        self.tx()
            .to(&caller)
            .egld_or_single_esdt(&wanted_token, 0, &wanted_amount)
            .transfer();
    }

    /// Walks the path backwards: the output required from each hop fixes the
    /// input of the hop before it.
    fn required_input(&self, amount_out: &BigUint, path: &SwapPath<Self::Api>) -> BigUint {
        require!(!path.hops.is_empty(), ERROR_INVALID_SWAP_PATH);

        let mut needed = amount_out.clone();
        let mut idx = path.hops.len();
        while idx > 0 {
            idx -= 1;
            let hop = path.hops.get(idx);
            let token_in = if idx == 0 {
                path.token_in.clone()
            } else {
                path.hops.get(idx - 1).token_out.clone()
            };

            let rate_mapper = self.rate(&token_in, &hop.token_out);
            require!(!rate_mapper.is_empty(), ERROR_PAIR_NOT_CONFIGURED);
            let rate = rate_mapper.get();

            let gross = self.ceil_div(&needed * &rate.numerator, &rate.denominator);
            needed = if hop.fee_bps == 0 {
                gross
            } else {
                let keep_bps = BigUint::from(BPS - hop.fee_bps as u64);
                self.ceil_div(gross * BigUint::from(BPS), &keep_bps)
            };
        }
        needed
    }

    fn ceil_div(&self, numerator: BigUint, denominator: &BigUint) -> BigUint {
        (numerator + denominator - &BigUint::from(1u64)) / denominator
    }

    #[storage_mapper("rate")]
    fn rate(
        &self,
        token_in: &EgldOrEsdtTokenIdentifier,
        token_out: &EgldOrEsdtTokenIdentifier,
    ) -> SingleValueMapper<PairRate<Self::Api>>;
}

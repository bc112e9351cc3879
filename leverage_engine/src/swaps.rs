multiversx_sc::imports!();

use common_errors::{
    ERROR_INVALID_SWAP_PATH, ERROR_SLIPPAGE_EXCEEDED, ERROR_SWAP_OUTPUT_TOO_LOW,
};
use common_proxies::proxy_swap_router;
use common_structs::{GenericSwapSpec, SwapHop, SwapPath, SwapPathSpec, SwapRoute};

use crate::storage;

/// Path building, exact-output quoting and swap execution against the
/// external venue. Swap outputs land in engine custody; callers reconcile
/// balances afterwards.
#[multiversx_sc::module]
pub trait SwapsModule: storage::Storage {
    /// Zips the intermediate hops with their fees into the venue's route
    /// descriptor. Requires one fee per hop, including the final hop to
    /// `token_out`.
    fn build_swap_path(
        &self,
        token_in: &EgldOrEsdtTokenIdentifier,
        token_out: &EgldOrEsdtTokenIdentifier,
        spec: &SwapPathSpec<Self::Api>,
    ) -> SwapPath<Self::Api> {
        require!(
            spec.fees_bps.len() == spec.intermediate_hops.len() + 1,
            ERROR_INVALID_SWAP_PATH
        );

        let mut hops = ManagedVec::new();
        for (index, fee_bps) in spec.fees_bps.iter().enumerate() {
            let hop_out = if index < spec.intermediate_hops.len() {
                spec.intermediate_hops.get(index).clone()
            } else {
                token_out.clone()
            };
            hops.push(SwapHop {
                token_out: hop_out,
                fee_bps,
            });
        }

        SwapPath {
            token_in: token_in.clone(),
            hops,
        }
    }

    /// How much of `path.token_in` the venue currently charges for an exact
    /// `amount_out`. Read-only.
    fn quote_exact_output(&self, path: &SwapPath<Self::Api>, amount_out: &BigUint) -> BigUint {
        self.tx()
            .to(self.swap_router_address().get())
            .typed(proxy_swap_router::SwapRouterProxy)
            .quote_exact_output(amount_out, path)
            .returns(ReturnsResult)
            .sync_call_readonly()
    }

    /// Swaps for an exact output, spending at most `max_amount_in`. Returns
    /// the amount actually spent.
    fn execute_exact_output(
        &self,
        path: &SwapPath<Self::Api>,
        max_amount_in: &BigUint,
        amount_out: &BigUint,
    ) -> BigUint {
        let required_in = self.quote_exact_output(path, amount_out);
        require!(&required_in <= max_amount_in, ERROR_SLIPPAGE_EXCEEDED);

        let back_transfers = self
            .tx()
            .to(self.swap_router_address().get())
            .typed(proxy_swap_router::SwapRouterProxy)
            .swap_exact_output(amount_out, path)
            .egld_or_single_esdt(&path.token_in, 0, &required_in)
            .returns(ReturnsBackTransfers)
            .sync_call();

        let token_out = path.token_out();
        let mut received = BigUint::zero();
        for payment in back_transfers.payments {
            if payment.token_identifier == token_out {
                received += &payment.amount;
            }
        }
        require!(&received >= amount_out, ERROR_SWAP_OUTPUT_TOO_LOW);

        required_in
    }

    /// Forwards an opaque payload to the venue and only enforces the caller's
    /// slippage bounds around it. Unspent input refunded by the venue stays
    /// in custody and is picked up by leftover reconciliation.
    fn execute_generic(
        &self,
        spec: &GenericSwapSpec<Self::Api>,
        token_in: &EgldOrEsdtTokenIdentifier,
        available_in: &BigUint,
        token_out: &EgldOrEsdtTokenIdentifier,
    ) -> BigUint {
        let paid_in = core::cmp::min(available_in, &spec.max_amount_in).clone();

        let mut args = ManagedArgBuffer::new();
        for arg in spec.args.clone().into_iter() {
            args.push_arg_raw(arg);
        }

        let back_transfers = self
            .tx()
            .to(self.swap_router_address().get())
            .raw_call(spec.endpoint.clone())
            .arguments_raw(args)
            .egld_or_single_esdt(token_in, 0, &paid_in)
            .returns(ReturnsBackTransfers)
            .sync_call();

        let mut received = BigUint::zero();
        let mut refunded = BigUint::zero();
        for payment in back_transfers.payments {
            if &payment.token_identifier == token_out {
                received += &payment.amount;
            } else if &payment.token_identifier == token_in {
                refunded += &payment.amount;
            }
        }

        let spent = &paid_in - &refunded;
        require!(spent <= spec.max_amount_in, ERROR_SLIPPAGE_EXCEEDED);
        require!(received >= spec.min_amount_out, ERROR_SWAP_OUTPUT_TOO_LOW);

        spent
    }

    /// Route dispatch. An empty route is an exact no-op passthrough: the
    /// input amount is reported back unchanged and no external call is made.
    fn execute_route(
        &self,
        route: &SwapRoute<Self::Api>,
        token_in: &EgldOrEsdtTokenIdentifier,
        available_in: &BigUint,
        token_out: &EgldOrEsdtTokenIdentifier,
        exact_amount_out: &BigUint,
    ) -> BigUint {
        match route {
            SwapRoute::None => available_in.clone(),
            SwapRoute::Path(spec) => {
                let path = self.build_swap_path(token_in, token_out, spec);
                let bound = core::cmp::min(available_in, &spec.max_amount_in);
                self.execute_exact_output(&path, bound, exact_amount_out)
            }
            SwapRoute::Generic(spec) => {
                self.execute_generic(spec, token_in, available_in, token_out)
            }
        }
    }
}

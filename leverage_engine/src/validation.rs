multiversx_sc::imports!();

use common_errors::{
    ERROR_ADDRESS_IS_ZERO, ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO, ERROR_FLASH_LOAN_ONGOING,
    ERROR_INVALID_SWAP_ENDPOINT, ERROR_INVALID_SWAP_PATH,
};
use common_structs::SwapRoute;

use crate::storage;

#[multiversx_sc::module]
pub trait ValidationModule: storage::Storage {
    fn reentrancy_guard(&self) {
        require!(!self.flash_loan_ongoing().get(), ERROR_FLASH_LOAN_ONGOING);
    }

    fn require_amount_greater_than_zero(&self, amount: &BigUint) {
        require!(
            amount > &BigUint::zero(),
            ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO
        );
    }

    fn require_not_zero_address(&self, address: &ManagedAddress) {
        require!(!address.is_zero(), ERROR_ADDRESS_IS_ZERO);
    }

    /// Structural route validation, run at the entry point so a malformed
    /// route fails before any external call is made.
    fn validate_route(&self, route: &SwapRoute<Self::Api>) {
        match route {
            SwapRoute::None => {}
            SwapRoute::Path(spec) => {
                require!(
                    spec.fees_bps.len() == spec.intermediate_hops.len() + 1,
                    ERROR_INVALID_SWAP_PATH
                );
            }
            SwapRoute::Generic(spec) => {
                require!(!spec.endpoint.is_empty(), ERROR_INVALID_SWAP_ENDPOINT);
            }
        }
    }
}

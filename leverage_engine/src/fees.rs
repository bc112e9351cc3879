multiversx_sc::imports!();

use common_constants::{BPS, MAX_FEE_BPS};
use common_errors::{
    ERROR_ADDRESS_IS_ZERO, ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO, ERROR_FEE_EXCEEDS_CAP,
    ERROR_TREASURY_NOT_SET,
};

use crate::storage;

/// Protocol fee policy: a bps cut of the gross supplied amount of each loop,
/// forwarded to the treasury. Injected into the engine at fixed points rather
/// than mixed into the flow.
#[multiversx_sc::module]
pub trait FeesModule: storage::Storage + common_events::EventsModule {
    #[only_owner]
    #[endpoint(setFeeBps)]
    fn set_fee_bps(&self, new_fee_bps: BigUint) {
        require!(
            new_fee_bps <= BigUint::from(MAX_FEE_BPS),
            ERROR_FEE_EXCEEDS_CAP
        );
        require!(
            new_fee_bps == BigUint::zero() || !self.fee_treasury().is_empty(),
            ERROR_TREASURY_NOT_SET
        );
        self.fee_bps().set(&new_fee_bps);
        self.update_fee_config_event(&new_fee_bps, &self.fee_treasury().get());
    }

    #[only_owner]
    #[endpoint(setTreasury)]
    fn set_treasury(&self, treasury: ManagedAddress) {
        require!(!treasury.is_zero(), ERROR_ADDRESS_IS_ZERO);
        self.fee_treasury().set(&treasury);
        self.update_fee_config_event(&self.fee_bps().get(), &treasury);
    }

    /// Returns the fee taken out of `amount` and transfers it to the
    /// treasury. With no fee configured this is a silent zero; a zero
    /// principal with an active fee is a guarded error, not a no-op.
    fn take_fee(&self, token: &EgldOrEsdtTokenIdentifier, amount: &BigUint) -> BigUint {
        let fee_bps = self.fee_bps().get();
        if fee_bps == BigUint::zero() {
            return BigUint::zero();
        }
        require!(
            amount > &BigUint::zero(),
            ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO
        );

        let fee = amount * &fee_bps / BigUint::from(BPS);
        if fee > BigUint::zero() {
            let treasury = self.fee_treasury().get();
            self.tx()
                .to(&treasury)
                .egld_or_single_esdt(token, 0, &fee)
                .transfer();
            self.collect_fee_event(token, &treasury, &fee);
        }
        fee
    }
}

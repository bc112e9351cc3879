#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();
pub use common_structs::*;

#[multiversx_sc::module]
pub trait EventsModule {
    /// Emitted after a successful leveraged loop. `supplied_amount` is the
    /// net amount deposited for the user (upfront payment plus flash loan,
    /// minus the protocol fee); leftovers are already reconciled.
    #[event("loop_position")]
    fn loop_event(
        &self,
        #[indexed] user: &ManagedAddress,
        #[indexed] supply_token: &EgldOrEsdtTokenIdentifier,
        #[indexed] borrow_token: &EgldOrEsdtTokenIdentifier,
        #[indexed] supplied_amount: &BigUint,
        #[indexed] borrowed_amount: &BigUint,
        #[indexed] flash_loan_amount: &BigUint,
        #[indexed] premium: &BigUint,
        #[indexed] fee: &BigUint,
    );

    #[event("unloop_position")]
    fn unloop_event(
        &self,
        #[indexed] user: &ManagedAddress,
        #[indexed] supply_token: &EgldOrEsdtTokenIdentifier,
        #[indexed] borrow_token: &EgldOrEsdtTokenIdentifier,
        #[indexed] repaid_amount: &BigUint,
        #[indexed] withdrawn_amount: &BigUint,
        #[indexed] premium: &BigUint,
        #[indexed] close_position: bool,
    );

    /// Degenerate loop with no flash loan: a direct supply on behalf of the
    /// caller.
    #[event("plain_supply")]
    fn plain_supply_event(
        &self,
        #[indexed] user: &ManagedAddress,
        #[indexed] supply_token: &EgldOrEsdtTokenIdentifier,
        #[indexed] amount: &BigUint,
    );

    /// Degenerate unloop with nothing to repay: receipts redeemed straight to
    /// the caller.
    #[event("plain_withdraw")]
    fn plain_withdraw_event(
        &self,
        #[indexed] user: &ManagedAddress,
        #[indexed] supply_token: &EgldOrEsdtTokenIdentifier,
        #[indexed] receipt_amount: &BigUint,
    );

    #[event("collect_fee")]
    fn collect_fee_event(
        &self,
        #[indexed] token: &EgldOrEsdtTokenIdentifier,
        #[indexed] treasury: &ManagedAddress,
        #[indexed] amount: &BigUint,
    );

    #[event("update_fee_config")]
    fn update_fee_config_event(
        &self,
        #[indexed] fee_bps: &BigUint,
        #[indexed] treasury: &ManagedAddress,
    );

    #[event("create_strategy")]
    fn create_strategy_event(
        &self,
        #[indexed] user: &ManagedAddress,
        #[indexed] strategy: &ManagedAddress,
        #[indexed] market: &ManagedAddress,
        #[indexed] yield_asset: &EgldOrEsdtTokenIdentifier,
        #[indexed] debt_asset: &EgldOrEsdtTokenIdentifier,
        #[indexed] risk_mode: u8,
    );
}

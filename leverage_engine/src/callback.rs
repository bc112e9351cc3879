multiversx_sc::imports!();

use common_errors::{
    ERROR_CALLER_NOT_MARKET, ERROR_INSUFFICIENT_SWAP_PROCEEDS, ERROR_INVALID_FLASH_LOAN_INITIATOR,
    ERROR_QUOTED_SIZING_REQUIRES_PATH, ERROR_UNEXPECTED_FLASH_ASSET,
    ERROR_UNEXPECTED_FLASH_LOAN_CALLBACK,
};
use common_structs::{BorrowSizing, Operation, SwapRoute};

use crate::{codec, fees, market, storage, swaps, validation};

/// The flash loan callback and the two operation branches it dispatches to.
/// Everything here runs nested inside a `loop`/`unloop` call, between the
/// market handing over the loan and pulling the repayment; any failure
/// unwinds the whole transaction.
#[multiversx_sc::module]
pub trait CallbackModule:
    storage::Storage
    + validation::ValidationModule
    + codec::CodecModule
    + swaps::SwapsModule
    + market::MarketModule
    + fees::FeesModule
    + common_events::EventsModule
{
    /// Flash loan entry point. The caller identity check is the trust
    /// boundary: without it anyone could fabricate a "flash loan" with
    /// arbitrary params. The in-flight flag and initiator check are the
    /// second layer.
    #[payable("*")]
    #[endpoint(onFlashLoan)]
    fn on_flash_loan(
        &self,
        initiator: ManagedAddress,
        premium: BigUint,
        params: ManagedBuffer,
    ) -> bool {
        require!(
            self.blockchain().get_caller() == self.market_address().get(),
            ERROR_CALLER_NOT_MARKET
        );
        require!(
            self.flash_loan_ongoing().get(),
            ERROR_UNEXPECTED_FLASH_LOAN_CALLBACK
        );
        require!(
            initiator == self.blockchain().get_sc_address(),
            ERROR_INVALID_FLASH_LOAN_INITIATOR
        );

        let (flashed_token, flashed_amount) = self.call_value().egld_or_single_fungible_esdt();

        // Dispatch on the fixed-position tag first; each branch decodes the
        // full payload itself.
        match self.decode_operation(&params) {
            Operation::Loop => self.execute_loop(flashed_token, flashed_amount, premium, &params),
            Operation::Unloop => {
                self.execute_unloop(flashed_token, flashed_amount, premium, &params)
            }
        }

        true
    }

    fn execute_loop(
        &self,
        flashed_token: EgldOrEsdtTokenIdentifier,
        flashed_amount: BigUint,
        premium: BigUint,
        params_buffer: &ManagedBuffer,
    ) {
        let params = self.decode_callback_params(params_buffer);
        require!(
            flashed_token == params.supply_token,
            ERROR_UNEXPECTED_FLASH_ASSET
        );

        let flash_repay_amount = &flashed_amount + &premium;

        // Fee comes off the gross amount before it is put to work
        let mut total_supply = &params.supply_amount + &flashed_amount;
        let fee = self.take_fee(&params.supply_token, &total_supply);
        total_supply -= &fee;

        self.market_supply(&params.supply_token, &total_supply, &params.user);

        let borrow_amount = match &params.borrow_sizing {
            BorrowSizing::Exact(amount) => amount.clone(),
            BorrowSizing::Quoted => match &params.route {
                SwapRoute::Path(spec) => {
                    let path =
                        self.build_swap_path(&params.borrow_token, &params.supply_token, spec);
                    self.quote_exact_output(&path, &flash_repay_amount)
                }
                _ => sc_panic!(ERROR_QUOTED_SIZING_REQUIRES_PATH),
            },
        };
        self.require_amount_greater_than_zero(&borrow_amount);
        self.market_borrow(&params.borrow_token, &borrow_amount, &params.user);

        // Convert the borrowed funds into exactly what the flash loan costs
        self.execute_route(
            &params.route,
            &params.borrow_token,
            &borrow_amount,
            &params.supply_token,
            &flash_repay_amount,
        );

        // Leftover reconciliation. The balance check doubles as the
        // underflow guard: a shortfall aborts instead of wrapping.
        let supply_balance = self.blockchain().get_sc_balance(&params.supply_token, 0);
        require!(
            supply_balance >= flash_repay_amount,
            ERROR_INSUFFICIENT_SWAP_PROCEEDS
        );
        let leftover_supply = &supply_balance - &flash_repay_amount;
        if leftover_supply > BigUint::zero() {
            self.market_supply(&params.supply_token, &leftover_supply, &params.user);
        }

        let leftover_borrow = self.blockchain().get_sc_balance(&params.borrow_token, 0);
        if leftover_borrow > BigUint::zero() {
            self.market_repay(&params.borrow_token, &leftover_borrow, &params.user);
        }

        self.repay_flash_loan(&params.supply_token, &flash_repay_amount);

        self.loop_event(
            &params.user,
            &params.supply_token,
            &params.borrow_token,
            &total_supply,
            &borrow_amount,
            &flashed_amount,
            &premium,
            &fee,
        );
    }

    fn execute_unloop(
        &self,
        flashed_token: EgldOrEsdtTokenIdentifier,
        flashed_amount: BigUint,
        premium: BigUint,
        params_buffer: &ManagedBuffer,
    ) {
        let params = self.decode_callback_params(params_buffer);
        require!(
            flashed_token == params.borrow_token,
            ERROR_UNEXPECTED_FLASH_ASSET
        );

        let flash_repay_amount = &flashed_amount + &premium;

        // Clear the debt first, then free the collateral backing it
        self.market_repay(&params.borrow_token, &flashed_amount, &params.user);

        let reserve = self.reserve_data(&params.supply_token);
        self.market_withdraw(
            &reserve.receipt_token,
            &params.supply_amount,
            &self.blockchain().get_sc_address(),
        );

        let withdrawn = self.blockchain().get_sc_balance(&params.supply_token, 0);
        self.execute_route(
            &params.route,
            &params.supply_token,
            &withdrawn,
            &params.borrow_token,
            &flash_repay_amount,
        );

        let borrow_balance = self.blockchain().get_sc_balance(&params.borrow_token, 0);
        require!(
            borrow_balance >= flash_repay_amount,
            ERROR_INSUFFICIENT_SWAP_PROCEEDS
        );
        let leftover_borrow = &borrow_balance - &flash_repay_amount;
        if leftover_borrow > BigUint::zero() {
            let remaining_debt = self.debt_of(&params.user, &params.borrow_token);
            let repayable = core::cmp::min(&leftover_borrow, &remaining_debt).clone();
            if repayable > BigUint::zero() {
                self.market_repay(&params.borrow_token, &repayable, &params.user);
            }
            let refund = &leftover_borrow - &repayable;
            if refund > BigUint::zero() {
                self.tx()
                    .to(&params.user)
                    .egld_or_single_esdt(&params.borrow_token, 0, &refund)
                    .transfer();
            }
        }

        let leftover_supply = self.blockchain().get_sc_balance(&params.supply_token, 0);
        if leftover_supply > BigUint::zero() {
            if params.close_position {
                // Re-supplying here would defeat the close; hand the rest
                // back to the user instead
                self.tx()
                    .to(&params.user)
                    .egld_or_single_esdt(&params.supply_token, 0, &leftover_supply)
                    .transfer();
            } else {
                self.market_supply(&params.supply_token, &leftover_supply, &params.user);
            }
        }

        self.repay_flash_loan(&params.borrow_token, &flash_repay_amount);

        self.unloop_event(
            &params.user,
            &params.supply_token,
            &params.borrow_token,
            &flashed_amount,
            &params.supply_amount,
            &premium,
            params.close_position,
        );
    }
}

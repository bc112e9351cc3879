#![no_std]

multiversx_sc::imports!();

pub mod callback;
pub mod codec;
pub mod fees;
pub mod market;
pub mod storage;
pub mod swaps;
pub mod validation;

pub use common_errors::*;
pub use common_proxies::*;
pub use common_structs::*;

/// Leverage engine: atomically increases ("loop") or decreases ("unloop")
/// leveraged positions against the external lending market, funding the move
/// with one of the market's flash loans and converting between the supply and
/// borrow assets through the external swap venue.
///
/// Positions always belong to the caller; the engine never holds value
/// between transactions. A strategy wrapper calling in is just another
/// caller, so one engine serves every wrapper the factory deploys.
#[multiversx_sc::contract]
pub trait LeverageEngine:
    storage::Storage
    + validation::ValidationModule
    + codec::CodecModule
    + swaps::SwapsModule
    + market::MarketModule
    + fees::FeesModule
    + callback::CallbackModule
    + common_events::EventsModule
    + multiversx_sc_modules::pause::PauseModule
{
    /// # Arguments
    /// - `market_address`: the external lending market (flash loan issuer).
    /// - `swap_router_address`: the external exact-output swap venue.
    #[init]
    fn init(&self, market_address: &ManagedAddress, swap_router_address: &ManagedAddress) {
        self.require_not_zero_address(market_address);
        self.require_not_zero_address(swap_router_address);
        self.market_address().set(market_address);
        self.swap_router_address().set(swap_router_address);
    }

    #[upgrade]
    fn upgrade(&self) {}

    /// Increases leverage: supplies the attached payment plus a flash loan of
    /// the same asset, borrows against the grown collateral on behalf of the
    /// caller and swaps the borrowed funds back into the supply asset to
    /// repay the flash loan. Everything settles in this one transaction or
    /// not at all.
    ///
    /// With `flash_loan_amount` zero this degenerates to a plain supply: no
    /// flash loan, no borrow, no swap.
    ///
    /// # Arguments
    /// - `supply_token`: collateral asset; must match the attached payment.
    /// - `borrow_token`: debt asset, distinct from `supply_token`.
    /// - `flash_loan_amount`: extra collateral to flash-borrow (0 = plain supply).
    /// - `borrow_sizing`: exact debt amount, or quote-derived from the route.
    /// - `route`: how borrowed funds convert back into the supply asset.
    ///
    /// # Preconditions
    /// - the attached payment (if any) is `supply_token`;
    /// - when borrowing, the caller has approved borrow delegation to the
    ///   engine on `borrow_token`.
    #[payable]
    #[endpoint(loopPosition)]
    fn loop_position(
        &self,
        supply_token: EgldOrEsdtTokenIdentifier,
        borrow_token: EgldOrEsdtTokenIdentifier,
        flash_loan_amount: BigUint,
        borrow_sizing: BorrowSizing<Self::Api>,
        route: SwapRoute<Self::Api>,
    ) {
        self.require_not_paused();
        self.reentrancy_guard();

        require!(supply_token != borrow_token, ERROR_ASSETS_ARE_THE_SAME);
        self.validate_route(&route);

        let payment = self.call_value().egld_or_single_esdt();
        let supply_amount = if payment.amount > BigUint::zero() {
            require!(
                payment.token_identifier == supply_token,
                ERROR_WRONG_PAYMENT_TOKEN
            );
            payment.amount.clone()
        } else {
            BigUint::zero()
        };

        let caller = self.blockchain().get_caller();

        if flash_loan_amount == BigUint::zero() {
            match &borrow_sizing {
                BorrowSizing::Exact(amount) => {
                    require!(
                        amount == &BigUint::zero(),
                        ERROR_BORROW_WITHOUT_FLASH_LOAN
                    );
                }
                BorrowSizing::Quoted => sc_panic!(ERROR_BORROW_WITHOUT_FLASH_LOAN),
            }
            self.require_amount_greater_than_zero(&supply_amount);
            self.market_supply(&supply_token, &supply_amount, &caller);
            self.plain_supply_event(&caller, &supply_token, &supply_amount);
            return;
        }

        let params = CallbackParams {
            operation: Operation::Loop,
            user: caller,
            supply_token: supply_token.clone(),
            borrow_token,
            supply_amount,
            borrow_sizing,
            close_position: false,
            route,
        };
        let encoded = self.encode_callback_params(&params);

        self.flash_loan_ongoing().set(true);
        self.market_flash_loan(&supply_token, &flash_loan_amount, encoded);
        self.flash_loan_ongoing().set(false);
    }

    /// Decreases leverage: flash-borrows the debt asset, repays the caller's
    /// debt, redeems the attached collateral receipts and swaps the freed
    /// underlying back into the debt asset to repay the flash loan.
    ///
    /// `close_position` resolves the repay amount to the full outstanding
    /// debt and routes leftover underlying to the caller instead of
    /// re-supplying it. With nothing to repay the call degenerates to a plain
    /// redeem of the attached receipts.
    ///
    /// # Arguments
    /// - `supply_token`: collateral asset backing the attached receipts.
    /// - `borrow_token`: debt asset to repay.
    /// - `repay_amount`: debt to clear; ignored when `close_position` is set.
    /// - `close_position`: repay everything and return leftovers directly.
    /// - `route`: how freed collateral converts into the debt asset.
    #[payable]
    #[endpoint(unloopPosition)]
    fn unloop_position(
        &self,
        supply_token: EgldOrEsdtTokenIdentifier,
        borrow_token: EgldOrEsdtTokenIdentifier,
        repay_amount: BigUint,
        close_position: bool,
        route: SwapRoute<Self::Api>,
    ) {
        self.require_not_paused();
        self.reentrancy_guard();

        require!(supply_token != borrow_token, ERROR_ASSETS_ARE_THE_SAME);
        self.validate_route(&route);

        let receipt_payment = self.call_value().single_esdt();
        self.require_amount_greater_than_zero(&receipt_payment.amount);
        let reserve = self.reserve_data(&supply_token);
        require!(
            receipt_payment.token_identifier == reserve.receipt_token,
            ERROR_WRONG_RECEIPT_TOKEN
        );

        let caller = self.blockchain().get_caller();
        let resolved_repay = if close_position {
            self.debt_of(&caller, &borrow_token)
        } else {
            repay_amount
        };

        if resolved_repay == BigUint::zero() {
            self.market_withdraw(&reserve.receipt_token, &receipt_payment.amount, &caller);
            self.plain_withdraw_event(&caller, &supply_token, &receipt_payment.amount);
            return;
        }

        let params = CallbackParams {
            operation: Operation::Unloop,
            user: caller,
            supply_token,
            borrow_token: borrow_token.clone(),
            supply_amount: receipt_payment.amount.clone(),
            borrow_sizing: BorrowSizing::Exact(BigUint::zero()),
            close_position,
            route,
        };
        let encoded = self.encode_callback_params(&params);

        self.flash_loan_ongoing().set(true);
        self.market_flash_loan(&borrow_token, &resolved_repay, encoded);
        self.flash_loan_ongoing().set(false);
    }

    /// Emergency sweep for tokens stranded in engine custody. The engine is
    /// stateless between transactions, so anything sitting here is not user
    /// position value.
    #[only_owner]
    #[endpoint(rescueToken)]
    fn rescue_token(&self, token: EgldOrEsdtTokenIdentifier, amount: BigUint) {
        self.reentrancy_guard();
        self.tx()
            .to(&self.blockchain().get_owner_address())
            .egld_or_single_esdt(&token, 0, &amount)
            .transfer();
    }
}

#![no_std]

multiversx_sc::imports!();

use common_constants::RISK_MODE_NONE;
use common_errors::{
    ERROR_ALREADY_ACTIVATED, ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO, ERROR_NOT_ACTIVATED,
    ERROR_ONLY_STRATEGY_USER, ERROR_WRONG_PAYMENT_TOKEN,
};
use common_proxies::{proxy_leverage_engine, proxy_market};
use common_structs::{BorrowSizing, SwapRoute};

/// Per-user strategy wrapper: one isolated position per
/// (market, yield asset, debt asset, risk mode) tuple. The wrapper is the
/// position owner from the market's point of view, so collateral receipts and
/// debt are segregated from everything else the user does.
///
/// Deployed from a template and activated by the factory; the deploying
/// factory is the contract owner, while value endpoints answer only to the
/// configured user.
#[multiversx_sc::contract]
pub trait Strategy {
    #[init]
    fn init(
        &self,
        user: ManagedAddress,
        engine: ManagedAddress,
        market: ManagedAddress,
        yield_asset: EgldOrEsdtTokenIdentifier,
        debt_asset: EgldOrEsdtTokenIdentifier,
        risk_mode: u8,
    ) {
        self.user().set(&user);
        self.engine().set(&engine);
        self.market().set(&market);
        self.yield_asset().set(&yield_asset);
        self.debt_asset().set(&debt_asset);
        self.risk_mode().set(risk_mode);
    }

    #[upgrade]
    fn upgrade(&self) {}

    /// One-time setup done by the factory in the deployment transaction:
    /// resolves the receipt token, opts into the risk mode and delegates
    /// borrowing on the debt asset to the engine.
    #[only_owner]
    #[endpoint(activate)]
    fn activate(&self) {
        require!(self.receipt_token().is_empty(), ERROR_ALREADY_ACTIVATED);
        let market = self.market().get();

        let reserve = self
            .tx()
            .to(&market)
            .typed(proxy_market::LendingMarketProxy)
            .get_reserve_data(self.yield_asset().get())
            .returns(ReturnsResult)
            .sync_call_readonly();
        self.receipt_token().set(&reserve.receipt_token);

        let risk_mode = self.risk_mode().get();
        if risk_mode != RISK_MODE_NONE {
            self.tx()
                .to(&market)
                .typed(proxy_market::LendingMarketProxy)
                .set_user_e_mode(risk_mode)
                .sync_call();
        }

        self.tx()
            .to(&market)
            .typed(proxy_market::LendingMarketProxy)
            .approve_delegation(self.engine().get(), self.debt_asset().get())
            .sync_call();
    }

    /// Forwards the attached yield-asset payment into the engine's loop. The
    /// engine sees this contract as the position owner.
    #[payable]
    #[endpoint(loopPosition)]
    fn loop_position(
        &self,
        flash_loan_amount: BigUint,
        borrow_sizing: BorrowSizing<Self::Api>,
        route: SwapRoute<Self::Api>,
    ) {
        self.require_user();
        self.require_activated();

        let payment = self.call_value().egld_or_single_esdt();
        let yield_asset = self.yield_asset().get();
        if payment.amount > BigUint::zero() {
            require!(
                payment.token_identifier == yield_asset,
                ERROR_WRONG_PAYMENT_TOKEN
            );
        }

        self.tx()
            .to(self.engine().get())
            .typed(proxy_leverage_engine::LeverageEngineProxy)
            .loop_position(
                &yield_asset,
                self.debt_asset().get(),
                flash_loan_amount,
                borrow_sizing,
                route,
            )
            .egld_or_single_esdt(&payment.token_identifier, 0, &payment.amount)
            .sync_call();
    }

    /// Unwinds through the engine, attaching `withdraw_amount` of this
    /// position's receipts (the full balance when closing).
    #[endpoint(unloopPosition)]
    fn unloop_position(
        &self,
        repay_amount: BigUint,
        withdraw_amount: BigUint,
        close_position: bool,
        route: SwapRoute<Self::Api>,
    ) {
        self.require_user();
        self.require_activated();

        let receipt_token = self.receipt_token().get();
        let receipt_amount = if close_position {
            self.get_receipt_balance()
        } else {
            withdraw_amount
        };
        require!(
            receipt_amount > BigUint::zero(),
            ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO
        );

        self.tx()
            .to(self.engine().get())
            .typed(proxy_leverage_engine::LeverageEngineProxy)
            .unloop_position(
                self.yield_asset().get(),
                self.debt_asset().get(),
                repay_amount,
                close_position,
                route,
            )
            .single_esdt(&receipt_token, 0, &receipt_amount)
            .sync_call();
    }

    /// Emergency sweep to the user for anything the wrapper holds, receipts
    /// included.
    #[endpoint(sweep)]
    fn sweep(&self, token: EgldOrEsdtTokenIdentifier, amount: BigUint) {
        let user = self.require_user();
        self.tx()
            .to(&user)
            .egld_or_single_esdt(&token, 0, &amount)
            .transfer();
    }

    #[view(getDebt)]
    fn get_debt(&self) -> BigUint {
        self.tx()
            .to(self.market().get())
            .typed(proxy_market::LendingMarketProxy)
            .get_debt(
                self.blockchain().get_sc_address(),
                self.debt_asset().get(),
            )
            .returns(ReturnsResult)
            .sync_call_readonly()
    }

    #[view(getReceiptBalance)]
    fn get_receipt_balance(&self) -> BigUint {
        let receipt_token = self.receipt_token().get();
        self.blockchain()
            .get_sc_balance(&EgldOrEsdtTokenIdentifier::esdt(receipt_token), 0)
    }

    fn require_user(&self) -> ManagedAddress {
        let caller = self.blockchain().get_caller();
        require!(caller == self.user().get(), ERROR_ONLY_STRATEGY_USER);
        caller
    }

    fn require_activated(&self) {
        require!(!self.receipt_token().is_empty(), ERROR_NOT_ACTIVATED);
    }

    #[view(getUser)]
    #[storage_mapper("user")]
    fn user(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getEngine)]
    #[storage_mapper("engine")]
    fn engine(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getMarket)]
    #[storage_mapper("market")]
    fn market(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getYieldAsset)]
    #[storage_mapper("yield_asset")]
    fn yield_asset(&self) -> SingleValueMapper<EgldOrEsdtTokenIdentifier>;

    #[view(getDebtAsset)]
    #[storage_mapper("debt_asset")]
    fn debt_asset(&self) -> SingleValueMapper<EgldOrEsdtTokenIdentifier>;

    #[view(getRiskMode)]
    #[storage_mapper("risk_mode")]
    fn risk_mode(&self) -> SingleValueMapper<u8>;

    #[view(getReceiptToken)]
    #[storage_mapper("receipt_token")]
    fn receipt_token(&self) -> SingleValueMapper<TokenIdentifier>;
}

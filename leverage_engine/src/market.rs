multiversx_sc::imports!();

use common_proxies::proxy_market;
use common_structs::ReserveData;

use crate::storage;

/// Typed-proxy access to the external lending market. All position-changing
/// calls act on behalf of `user`; borrowed funds and withdrawn collateral
/// land in engine custody and are reconciled by the caller.
#[multiversx_sc::module]
pub trait MarketModule: storage::Storage {
    fn market_supply(
        &self,
        token: &EgldOrEsdtTokenIdentifier,
        amount: &BigUint,
        on_behalf_of: &ManagedAddress,
    ) {
        self.tx()
            .to(self.market_address().get())
            .typed(proxy_market::LendingMarketProxy)
            .supply(OptionalValue::Some(on_behalf_of.clone()))
            .egld_or_single_esdt(token, 0, amount)
            .sync_call();
    }

    fn market_borrow(
        &self,
        token: &EgldOrEsdtTokenIdentifier,
        amount: &BigUint,
        on_behalf_of: &ManagedAddress,
    ) {
        self.tx()
            .to(self.market_address().get())
            .typed(proxy_market::LendingMarketProxy)
            .borrow(token, amount, on_behalf_of)
            .sync_call();
    }

    fn market_repay(
        &self,
        token: &EgldOrEsdtTokenIdentifier,
        amount: &BigUint,
        on_behalf_of: &ManagedAddress,
    ) {
        self.tx()
            .to(self.market_address().get())
            .typed(proxy_market::LendingMarketProxy)
            .repay(on_behalf_of)
            .egld_or_single_esdt(token, 0, amount)
            .sync_call();
    }

    fn market_withdraw(&self, receipt_token: &TokenIdentifier, amount: &BigUint, to: &ManagedAddress) {
        self.tx()
            .to(self.market_address().get())
            .typed(proxy_market::LendingMarketProxy)
            .withdraw(to)
            .single_esdt(receipt_token, 0, amount)
            .sync_call();
    }

    fn market_flash_loan(
        &self,
        asset: &EgldOrEsdtTokenIdentifier,
        amount: &BigUint,
        params: ManagedBuffer,
    ) {
        self.tx()
            .to(self.market_address().get())
            .typed(proxy_market::LendingMarketProxy)
            .flash_loan_simple(self.blockchain().get_sc_address(), asset, amount, params)
            .sync_call();
    }

    /// Transfers the repayment back to the market, which validates it against
    /// `amount + premium` as soon as the callback returns.
    fn repay_flash_loan(&self, asset: &EgldOrEsdtTokenIdentifier, amount: &BigUint) {
        self.tx()
            .to(self.market_address().get())
            .egld_or_single_esdt(asset, 0, amount)
            .transfer();
    }

    fn reserve_data(&self, asset: &EgldOrEsdtTokenIdentifier) -> ReserveData<Self::Api> {
        self.tx()
            .to(self.market_address().get())
            .typed(proxy_market::LendingMarketProxy)
            .get_reserve_data(asset)
            .returns(ReturnsResult)
            .sync_call_readonly()
    }

    fn debt_of(&self, user: &ManagedAddress, asset: &EgldOrEsdtTokenIdentifier) -> BigUint {
        self.tx()
            .to(self.market_address().get())
            .typed(proxy_market::LendingMarketProxy)
            .get_debt(user, asset)
            .returns(ReturnsResult)
            .sync_call_readonly()
    }
}

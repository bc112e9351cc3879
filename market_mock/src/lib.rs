#![no_std]

multiversx_sc::imports!();

use common_constants::BPS;
use common_errors::{
    ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO, ERROR_ASSET_NOT_SUPPORTED,
    ERROR_DELEGATION_NOT_APPROVED, ERROR_INSUFFICIENT_LIQUIDITY,
    ERROR_INVALID_FLASHLOAN_REPAYMENT,
};
use common_structs::ReserveData;

/// Stand-in for the external lending market used in scenario tests. Receipt
/// tokens are real ESDTs minted/burned 1:1 against the underlying; the test
/// world grants the local roles. Interest accrual is deliberately absent.
#[multiversx_sc::contract]
pub trait MarketMock {
    #[init]
    fn init(&self) {}

    #[upgrade]
    fn upgrade(&self) {}

    #[only_owner]
    #[endpoint(addReserve)]
    fn add_reserve(
        &self,
        asset: EgldOrEsdtTokenIdentifier,
        receipt_token: TokenIdentifier,
        risk_mode_category: u8,
        flash_premium_bps: BigUint,
    ) {
        self.underlying(&receipt_token).set(&asset);
        self.reserve(&asset).set(ReserveData {
            receipt_token,
            risk_mode_category,
            flash_premium_bps,
        });
    }

    #[payable("*")]
    #[endpoint(supply)]
    fn supply(&self, opt_on_behalf_of: OptionalValue<ManagedAddress>) {
        let (asset, amount) = self.call_value().egld_or_single_fungible_esdt();
        require!(
            amount > BigUint::zero(),
            ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO
        );
        let reserve = self.require_reserve(&asset);

        let beneficiary = match opt_on_behalf_of {
            OptionalValue::Some(address) => address,
            OptionalValue::None => self.blockchain().get_caller(),
        };

        self.send()
            .esdt_local_mint(&reserve.receipt_token, 0, &amount);
        self.tx()
            .to(&beneficiary)
            .single_esdt(&reserve.receipt_token, 0, &amount)
            .transfer();
    }

    /// Credit delegation: `on_behalf_of` authorizes `delegatee` to open debt
    /// in its name for one asset.
    #[endpoint(approveDelegation)]
    fn approve_delegation(&self, delegatee: ManagedAddress, asset: EgldOrEsdtTokenIdentifier) {
        let caller = self.blockchain().get_caller();
        self.borrow_delegation(&caller, &asset).insert(delegatee);
    }

    #[endpoint(borrow)]
    fn borrow(
        &self,
        asset: EgldOrEsdtTokenIdentifier,
        amount: BigUint,
        on_behalf_of: ManagedAddress,
    ) {
        let caller = self.blockchain().get_caller();
        self.require_reserve(&asset);
        require!(
            amount > BigUint::zero(),
            ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO
        );
        require!(
            caller == on_behalf_of
                || self.borrow_delegation(&on_behalf_of, &asset).contains(&caller),
            ERROR_DELEGATION_NOT_APPROVED
        );
        require!(
            self.blockchain().get_sc_balance(&asset, 0) >= amount,
            ERROR_INSUFFICIENT_LIQUIDITY
        );

        self.debt(&on_behalf_of, &asset).update(|debt| *debt += &amount);
        self.tx()
            .to(&caller)
            .egld_or_single_esdt(&asset, 0, &amount)
            .transfer();
    }

    /// Repays debt for `on_behalf_of`; any overpayment is refunded to the
    /// caller.
    #[payable("*")]
    #[endpoint(repay)]
    fn repay(&self, on_behalf_of: ManagedAddress) {
        let (asset, amount) = self.call_value().egld_or_single_fungible_esdt();
        require!(
            amount > BigUint::zero(),
            ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO
        );
        self.require_reserve(&asset);

        let debt_mapper = self.debt(&on_behalf_of, &asset);
        let debt = debt_mapper.get();
        let applied = if amount > debt { debt.clone() } else { amount.clone() };
        debt_mapper.set(&(&debt - &applied));

        let overpaid = &amount - &applied;
        if overpaid > BigUint::zero() {
            self.tx()
                .to(&self.blockchain().get_caller())
                .egld_or_single_esdt(&asset, 0, &overpaid)
                .transfer();
        }
    }

    /// Burns the attached receipt tokens and releases the underlying 1:1.
    #[payable("*")]
    #[endpoint(withdraw)]
    fn withdraw(&self, to: ManagedAddress) {
        let receipt = self.call_value().single_esdt();
        require!(
            receipt.amount > BigUint::zero(),
            ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO
        );
        let underlying_mapper = self.underlying(&receipt.token_identifier);
        require!(!underlying_mapper.is_empty(), ERROR_ASSET_NOT_SUPPORTED);
        let asset = underlying_mapper.get();

        self.send()
            .esdt_local_burn(&receipt.token_identifier, 0, &receipt.amount);
        self.tx()
            .to(&to)
            .egld_or_single_esdt(&asset, 0, &receipt.amount)
            .transfer();
    }

    /// Sends the loan to `receiver` inside a sync call to its `onFlashLoan`
    /// endpoint and requires the back-transferred repayment to cover the loan
    /// plus the reserve's premium. The premium stays in the reserve.
    #[endpoint(flashLoanSimple)]
    fn flash_loan_simple(
        &self,
        receiver: ManagedAddress,
        asset: EgldOrEsdtTokenIdentifier,
        amount: BigUint,
        params: ManagedBuffer,
    ) {
        let caller = self.blockchain().get_caller();
        let reserve = self.require_reserve(&asset);
        require!(
            amount > BigUint::zero(),
            ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO
        );
        require!(
            self.blockchain().get_sc_balance(&asset, 0) >= amount,
            ERROR_INSUFFICIENT_LIQUIDITY
        );

        let premium = &amount * &reserve.flash_premium_bps / BigUint::from(BPS);
        let required_repayment = &amount + &premium;

        let back_transfers = self
            .tx()
            .to(&receiver)
            .raw_call(ManagedBuffer::new_from_bytes(b"onFlashLoan"))
            .argument(&caller)
            .argument(&premium)
            .argument(&params)
            .egld_or_single_esdt(&asset, 0, &amount)
            .returns(ReturnsBackTransfers)
            .sync_call();

        let mut repayment = BigUint::zero();
        for payment in back_transfers.payments {
            require!(
                payment.token_identifier == asset,
                ERROR_INVALID_FLASHLOAN_REPAYMENT
            );
            repayment += &payment.amount;
        }
        require!(
            repayment >= required_repayment,
            ERROR_INVALID_FLASHLOAN_REPAYMENT
        );
    }

    #[endpoint(setUserEMode)]
    fn set_user_e_mode(&self, category: u8) {
        let caller = self.blockchain().get_caller();
        self.user_e_mode(&caller).set(category);
    }

    #[view(getReserveData)]
    fn get_reserve_data(&self, asset: EgldOrEsdtTokenIdentifier) -> ReserveData<Self::Api> {
        self.require_reserve(&asset)
    }

    fn require_reserve(&self, asset: &EgldOrEsdtTokenIdentifier) -> ReserveData<Self::Api> {
        let mapper = self.reserve(asset);
        require!(!mapper.is_empty(), ERROR_ASSET_NOT_SUPPORTED);
        mapper.get()
    }

    #[storage_mapper("reserve")]
    fn reserve(&self, asset: &EgldOrEsdtTokenIdentifier) -> SingleValueMapper<ReserveData<Self::Api>>;

    #[storage_mapper("underlying")]
    fn underlying(&self, receipt_token: &TokenIdentifier) -> SingleValueMapper<EgldOrEsdtTokenIdentifier>;

    #[view(getDebt)]
    #[storage_mapper("debt")]
    fn debt(
        &self,
        user: &ManagedAddress,
        asset: &EgldOrEsdtTokenIdentifier,
    ) -> SingleValueMapper<BigUint>;

    #[storage_mapper("borrow_delegation")]
    fn borrow_delegation(
        &self,
        user: &ManagedAddress,
        asset: &EgldOrEsdtTokenIdentifier,
    ) -> UnorderedSetMapper<ManagedAddress>;

    #[view(getUserEMode)]
    #[storage_mapper("user_e_mode")]
    fn user_e_mode(&self, user: &ManagedAddress) -> SingleValueMapper<u8>;
}

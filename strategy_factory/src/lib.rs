#![no_std]

multiversx_sc::imports!();

use common_constants::RISK_MODE_NONE;
use common_errors::{
    ERROR_ADDRESS_IS_ZERO, ERROR_ASSETS_ARE_THE_SAME, ERROR_RISK_MODE_MISMATCH,
    ERROR_STRATEGY_ALREADY_EXISTS,
};
use common_proxies::{proxy_market, proxy_strategy};
use common_structs::ReserveData;

/// Deploys and registers per-user strategy wrappers. At most one strategy per
/// user per (market, yield asset, debt asset, risk mode) key; a non-zero risk
/// mode requires both assets to sit in that market category.
#[multiversx_sc::contract]
pub trait StrategyFactory: common_events::EventsModule {
    /// # Arguments
    /// - `engine`: the shared leverage engine every wrapper calls into.
    /// - `strategy_template`: deployed strategy used as the code source.
    #[init]
    fn init(&self, engine: ManagedAddress, strategy_template: ManagedAddress) {
        require!(!engine.is_zero(), ERROR_ADDRESS_IS_ZERO);
        require!(!strategy_template.is_zero(), ERROR_ADDRESS_IS_ZERO);
        self.engine_address().set(&engine);
        self.strategy_template().set(&strategy_template);
    }

    #[upgrade]
    fn upgrade(&self) {}

    #[endpoint(createStrategy)]
    fn create_strategy(
        &self,
        market: ManagedAddress,
        yield_asset: EgldOrEsdtTokenIdentifier,
        debt_asset: EgldOrEsdtTokenIdentifier,
        risk_mode: u8,
    ) -> ManagedAddress {
        require!(yield_asset != debt_asset, ERROR_ASSETS_ARE_THE_SAME);

        let caller = self.blockchain().get_caller();
        let key = self.strategy_key(&market, &yield_asset, &debt_asset, risk_mode);
        let registry = self.strategy_by_key(&caller, &key);
        require!(registry.is_empty(), ERROR_STRATEGY_ALREADY_EXISTS);

        // Both assets must be listed; a non-zero risk mode additionally
        // requires a matching category on both sides
        let yield_reserve = self.reserve_data(&market, &yield_asset);
        let debt_reserve = self.reserve_data(&market, &debt_asset);
        if risk_mode != RISK_MODE_NONE {
            require!(
                yield_reserve.risk_mode_category == risk_mode
                    && debt_reserve.risk_mode_category == risk_mode,
                ERROR_RISK_MODE_MISMATCH
            );
        }

        let strategy_address = self
            .tx()
            .typed(proxy_strategy::StrategyProxy)
            .init(
                &caller,
                self.engine_address().get(),
                &market,
                &yield_asset,
                &debt_asset,
                risk_mode,
            )
            .from_source(self.strategy_template().get())
            .code_metadata(
                CodeMetadata::UPGRADEABLE
                    | CodeMetadata::READABLE
                    | CodeMetadata::PAYABLE
                    | CodeMetadata::PAYABLE_BY_SC,
            )
            .returns(ReturnsNewManagedAddress)
            .sync_call();

        self.tx()
            .to(&strategy_address)
            .typed(proxy_strategy::StrategyProxy)
            .activate()
            .sync_call();

        registry.set(&strategy_address);
        self.strategies(&caller).insert(strategy_address.clone());
        self.create_strategy_event(
            &caller,
            &strategy_address,
            &market,
            &yield_asset,
            &debt_asset,
            risk_mode,
        );

        strategy_address
    }

    #[view(getStrategyByKey)]
    fn get_strategy_by_key(
        &self,
        user: ManagedAddress,
        market: ManagedAddress,
        yield_asset: EgldOrEsdtTokenIdentifier,
        debt_asset: EgldOrEsdtTokenIdentifier,
        risk_mode: u8,
    ) -> ManagedAddress {
        let key = self.strategy_key(&market, &yield_asset, &debt_asset, risk_mode);
        self.strategy_by_key(&user, &key).get()
    }

    fn strategy_key(
        &self,
        market: &ManagedAddress,
        yield_asset: &EgldOrEsdtTokenIdentifier,
        debt_asset: &EgldOrEsdtTokenIdentifier,
        risk_mode: u8,
    ) -> ManagedByteArray<Self::Api, 32> {
        let mut data = ManagedBuffer::new();
        let _ = market.dep_encode(&mut data);
        let _ = yield_asset.dep_encode(&mut data);
        let _ = debt_asset.dep_encode(&mut data);
        data.append_bytes(&[risk_mode]);
        self.crypto().keccak256(&data)
    }

    fn reserve_data(
        &self,
        market: &ManagedAddress,
        asset: &EgldOrEsdtTokenIdentifier,
    ) -> ReserveData<Self::Api> {
        self.tx()
            .to(market)
            .typed(proxy_market::LendingMarketProxy)
            .get_reserve_data(asset)
            .returns(ReturnsResult)
            .sync_call_readonly()
    }

    #[view(getEngineAddress)]
    #[storage_mapper("engine_address")]
    fn engine_address(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getStrategyTemplate)]
    #[storage_mapper("strategy_template")]
    fn strategy_template(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getStrategies)]
    #[storage_mapper("strategies")]
    fn strategies(&self, user: &ManagedAddress) -> UnorderedSetMapper<ManagedAddress>;

    #[storage_mapper("strategy_by_key")]
    fn strategy_by_key(
        &self,
        user: &ManagedAddress,
        key: &ManagedByteArray<Self::Api, 32>,
    ) -> SingleValueMapper<ManagedAddress>;
}

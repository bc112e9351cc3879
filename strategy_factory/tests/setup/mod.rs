use crate::constants::*;

use common_proxies::{
    proxy_leverage_engine, proxy_market, proxy_strategy, proxy_strategy_factory,
    proxy_swap_router,
};
use multiversx_sc::types::{BigUint, EsdtLocalRole, ManagedAddress};
use multiversx_sc_scenario::{
    api::StaticApi,
    imports::{ExpectMessage, ReturnsNewManagedAddress, ReturnsResult, TestAddress,
        TestTokenIdentifier},
    ScenarioTxRun, ScenarioWorld,
};

pub static RECEIPT_ROLES: &[EsdtLocalRole] = &[EsdtLocalRole::Mint, EsdtLocalRole::Burn];

pub fn world() -> ScenarioWorld {
    let mut blockchain = ScenarioWorld::new();

    blockchain.register_contract(FACTORY_PATH, strategy_factory::ContractBuilder);
    blockchain.register_contract(STRATEGY_PATH, strategy::ContractBuilder);
    blockchain.register_contract(ENGINE_PATH, leverage_engine::ContractBuilder);
    blockchain.register_contract(MARKET_MOCK_PATH, market_mock::ContractBuilder);
    blockchain.register_contract(SWAP_MOCK_PATH, swap_mock::ContractBuilder);

    blockchain
}

pub struct FactoryTestState {
    pub world: ScenarioWorld,
    pub factory_sc: ManagedAddress<StaticApi>,
    pub strategy_template_sc: ManagedAddress<StaticApi>,
    pub engine_sc: ManagedAddress<StaticApi>,
    pub market_sc: ManagedAddress<StaticApi>,
    pub swap_router_sc: ManagedAddress<StaticApi>,
}

impl FactoryTestState {
    pub fn new() -> Self {
        let mut world = world();

        world.account(OWNER_ADDRESS).nonce(1);
        world
            .account(USER_ADDRESS)
            .nonce(1)
            .esdt_balance(WEGLD_TOKEN, units(1_000));
        world.account(OTHER_USER_ADDRESS).nonce(1);

        let market_sc = world
            .tx()
            .from(OWNER_ADDRESS)
            .typed(proxy_market::LendingMarketProxy)
            .init()
            .code(MARKET_MOCK_PATH)
            .returns(ReturnsNewManagedAddress)
            .run();

        let swap_router_sc = world
            .tx()
            .from(OWNER_ADDRESS)
            .typed(proxy_swap_router::SwapRouterProxy)
            .init()
            .code(SWAP_MOCK_PATH)
            .returns(ReturnsNewManagedAddress)
            .run();

        let engine_sc = world
            .tx()
            .from(OWNER_ADDRESS)
            .typed(proxy_leverage_engine::LeverageEngineProxy)
            .init(&market_sc, &swap_router_sc)
            .code(ENGINE_PATH)
            .returns(ReturnsNewManagedAddress)
            .run();

        // template instance; its own config is never used
        let strategy_template_sc = world
            .tx()
            .from(OWNER_ADDRESS)
            .typed(proxy_strategy::StrategyProxy)
            .init(
                OWNER_ADDRESS.to_managed_address(),
                &engine_sc,
                &market_sc,
                WEGLD_TOKEN,
                USDC_TOKEN,
                0u8,
            )
            .code(STRATEGY_PATH)
            .returns(ReturnsNewManagedAddress)
            .run();

        let factory_sc = world
            .tx()
            .from(OWNER_ADDRESS)
            .typed(proxy_strategy_factory::StrategyFactoryProxy)
            .init(&engine_sc, &strategy_template_sc)
            .code(FACTORY_PATH)
            .returns(ReturnsNewManagedAddress)
            .run();

        world.set_esdt_local_roles(market_sc.clone(), WEGLD_RECEIPT_TOKEN.as_bytes(), RECEIPT_ROLES);
        world.set_esdt_local_roles(market_sc.clone(), USDC_RECEIPT_TOKEN.as_bytes(), RECEIPT_ROLES);
        world.set_esdt_local_roles(market_sc.clone(), XTK_RECEIPT_TOKEN.as_bytes(), RECEIPT_ROLES);

        let mut state = Self {
            world,
            factory_sc,
            strategy_template_sc,
            engine_sc,
            market_sc,
            swap_router_sc,
        };

        state.add_reserve(WEGLD_TOKEN, WEGLD_RECEIPT_TOKEN, CORRELATED_RISK_MODE);
        state.add_reserve(USDC_TOKEN, USDC_RECEIPT_TOKEN, CORRELATED_RISK_MODE);
        state.add_reserve(XTK_TOKEN, XTK_RECEIPT_TOKEN, LONELY_RISK_MODE);

        state.set_rate(USDC_TOKEN, WEGLD_TOKEN, 20, 1);
        state.set_rate(WEGLD_TOKEN, USDC_TOKEN, 1, 20);

        state
            .world
            .set_esdt_balance(state.market_sc.clone(), &WEGLD_TOKEN.as_bytes(), units(10_000));
        state
            .world
            .set_esdt_balance(state.market_sc.clone(), &USDC_TOKEN.as_bytes(), units(1_000_000));
        state
            .world
            .set_esdt_balance(state.swap_router_sc.clone(), &WEGLD_TOKEN.as_bytes(), units(10_000));
        state
            .world
            .set_esdt_balance(state.swap_router_sc.clone(), &USDC_TOKEN.as_bytes(), units(1_000_000));

        state
    }

    pub fn add_reserve(
        &mut self,
        asset: TestTokenIdentifier,
        receipt_token: TestTokenIdentifier,
        risk_mode_category: u8,
    ) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(&self.market_sc)
            .typed(proxy_market::LendingMarketProxy)
            .add_reserve(
                asset,
                receipt_token,
                risk_mode_category,
                BigUint::from(FLASH_PREMIUM_BPS),
            )
            .run();
    }

    pub fn set_rate(
        &mut self,
        token_in: TestTokenIdentifier,
        token_out: TestTokenIdentifier,
        numerator: u64,
        denominator: u64,
    ) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(&self.swap_router_sc)
            .typed(proxy_swap_router::SwapRouterProxy)
            .set_rate(
                token_in,
                token_out,
                BigUint::from(numerator),
                BigUint::from(denominator),
            )
            .run();
    }

    pub fn create_strategy(
        &mut self,
        from: &TestAddress,
        yield_asset: TestTokenIdentifier,
        debt_asset: TestTokenIdentifier,
        risk_mode: u8,
    ) -> ManagedAddress<StaticApi> {
        self.world
            .tx()
            .from(from.to_managed_address())
            .to(&self.factory_sc)
            .typed(proxy_strategy_factory::StrategyFactoryProxy)
            .create_strategy(&self.market_sc, yield_asset, debt_asset, risk_mode)
            .returns(ReturnsResult)
            .run()
    }

    pub fn create_strategy_error(
        &mut self,
        from: &TestAddress,
        yield_asset: TestTokenIdentifier,
        debt_asset: TestTokenIdentifier,
        risk_mode: u8,
        error_message: &[u8],
    ) {
        self.world
            .tx()
            .from(from.to_managed_address())
            .to(&self.factory_sc)
            .typed(proxy_strategy_factory::StrategyFactoryProxy)
            .create_strategy(&self.market_sc, yield_asset, debt_asset, risk_mode)
            .returns(ExpectMessage(core::str::from_utf8(error_message).unwrap()))
            .run();
    }

    pub fn strategy_by_key(
        &mut self,
        user: &TestAddress,
        yield_asset: TestTokenIdentifier,
        debt_asset: TestTokenIdentifier,
        risk_mode: u8,
    ) -> ManagedAddress<StaticApi> {
        self.world
            .query()
            .to(&self.factory_sc)
            .typed(proxy_strategy_factory::StrategyFactoryProxy)
            .get_strategy_by_key(
                user.to_managed_address(),
                &self.market_sc,
                yield_asset,
                debt_asset,
                risk_mode,
            )
            .returns(ReturnsResult)
            .run()
    }

    pub fn strategy_debt(&mut self, strategy: &ManagedAddress<StaticApi>) -> BigUint<StaticApi> {
        self.world
            .query()
            .to(strategy)
            .typed(proxy_strategy::StrategyProxy)
            .get_debt()
            .returns(ReturnsResult)
            .run()
    }

    pub fn strategy_receipt_balance(
        &mut self,
        strategy: &ManagedAddress<StaticApi>,
    ) -> BigUint<StaticApi> {
        self.world
            .query()
            .to(strategy)
            .typed(proxy_strategy::StrategyProxy)
            .get_receipt_balance()
            .returns(ReturnsResult)
            .run()
    }
}

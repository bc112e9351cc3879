use crate::constants::*;

use common_proxies::{proxy_leverage_engine, proxy_market, proxy_swap_router};
use common_structs::{BorrowSizing, GenericSwapSpec, SwapPathSpec, SwapRoute};
use multiversx_sc::types::{
    BigUint, EgldOrEsdtTokenIdentifier, EsdtLocalRole, ManagedAddress, ManagedBuffer, ManagedVec,
};
use multiversx_sc_scenario::{
    api::StaticApi,
    imports::{ExpectMessage, ReturnsNewManagedAddress, ReturnsResult, TestAddress,
        TestTokenIdentifier},
    ScenarioTxRun, ScenarioWorld,
};

pub static RECEIPT_ROLES: &[EsdtLocalRole] = &[EsdtLocalRole::Mint, EsdtLocalRole::Burn];

pub fn world() -> ScenarioWorld {
    let mut blockchain = ScenarioWorld::new();

    blockchain.register_contract(ENGINE_PATH, leverage_engine::ContractBuilder);
    blockchain.register_contract(MARKET_MOCK_PATH, market_mock::ContractBuilder);
    blockchain.register_contract(SWAP_MOCK_PATH, swap_mock::ContractBuilder);

    blockchain
}

pub struct EngineTestState {
    pub world: ScenarioWorld,
    pub engine_sc: ManagedAddress<StaticApi>,
    pub market_sc: ManagedAddress<StaticApi>,
    pub swap_router_sc: ManagedAddress<StaticApi>,
}

impl EngineTestState {
    pub fn new() -> Self {
        let mut world = world();

        world.account(OWNER_ADDRESS).nonce(1);
        world.account(TREASURY_ADDRESS).nonce(1);
        world
            .account(USER_ADDRESS)
            .nonce(1)
            .esdt_balance(WEGLD_TOKEN, units(1_000))
            .esdt_balance(USDC_TOKEN, units(10_000));

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

        world.set_esdt_local_roles(market_sc.clone(), WEGLD_RECEIPT_TOKEN.as_bytes(), RECEIPT_ROLES);
        world.set_esdt_local_roles(market_sc.clone(), USDC_RECEIPT_TOKEN.as_bytes(), RECEIPT_ROLES);

        let mut state = Self {
            world,
            engine_sc,
            market_sc,
            swap_router_sc,
        };

        state.add_reserve(WEGLD_TOKEN, WEGLD_RECEIPT_TOKEN, 1);
        state.add_reserve(USDC_TOKEN, USDC_RECEIPT_TOKEN, 1);

        // 1 WEGLD = 20 USDC = 10 XTK, consistent across the hop pairs
        state.set_rate(USDC_TOKEN, WEGLD_TOKEN, 20, 1);
        state.set_rate(WEGLD_TOKEN, USDC_TOKEN, 1, 20);
        state.set_rate(USDC_TOKEN, XTK_TOKEN, 2, 1);
        state.set_rate(XTK_TOKEN, WEGLD_TOKEN, 10, 1);

        // reserve and venue liquidity
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

    pub fn approve_delegation(&mut self, from: &TestAddress, asset: TestTokenIdentifier) {
        self.world
            .tx()
            .from(from.to_managed_address())
            .to(&self.market_sc)
            .typed(proxy_market::LendingMarketProxy)
            .approve_delegation(&self.engine_sc, asset)
            .run();
    }

    pub fn loop_position(
        &mut self,
        from: &TestAddress,
        supply_token: TestTokenIdentifier,
        borrow_token: TestTokenIdentifier,
        supply_amount: BigUint<StaticApi>,
        flash_loan_amount: BigUint<StaticApi>,
        borrow_sizing: BorrowSizing<StaticApi>,
        route: SwapRoute<StaticApi>,
    ) {
        self.world
            .tx()
            .from(from.to_managed_address())
            .to(&self.engine_sc)
            .typed(proxy_leverage_engine::LeverageEngineProxy)
            .loop_position(supply_token, borrow_token, flash_loan_amount, borrow_sizing, route)
            .single_esdt(&supply_token.to_token_identifier(), 0, &supply_amount)
            .run();
    }

    pub fn loop_position_error(
        &mut self,
        from: &TestAddress,
        supply_token: TestTokenIdentifier,
        borrow_token: TestTokenIdentifier,
        supply_amount: BigUint<StaticApi>,
        flash_loan_amount: BigUint<StaticApi>,
        borrow_sizing: BorrowSizing<StaticApi>,
        route: SwapRoute<StaticApi>,
        error_message: &[u8],
    ) {
        self.world
            .tx()
            .from(from.to_managed_address())
            .to(&self.engine_sc)
            .typed(proxy_leverage_engine::LeverageEngineProxy)
            .loop_position(supply_token, borrow_token, flash_loan_amount, borrow_sizing, route)
            .single_esdt(&supply_token.to_token_identifier(), 0, &supply_amount)
            .returns(ExpectMessage(core::str::from_utf8(error_message).unwrap()))
            .run();
    }

    pub fn unloop_position(
        &mut self,
        from: &TestAddress,
        receipt_token: TestTokenIdentifier,
        receipt_amount: BigUint<StaticApi>,
        supply_token: TestTokenIdentifier,
        borrow_token: TestTokenIdentifier,
        repay_amount: BigUint<StaticApi>,
        close_position: bool,
        route: SwapRoute<StaticApi>,
    ) {
        self.world
            .tx()
            .from(from.to_managed_address())
            .to(&self.engine_sc)
            .typed(proxy_leverage_engine::LeverageEngineProxy)
            .unloop_position(supply_token, borrow_token, repay_amount, close_position, route)
            .single_esdt(&receipt_token.to_token_identifier(), 0, &receipt_amount)
            .run();
    }

    pub fn unloop_position_error(
        &mut self,
        from: &TestAddress,
        receipt_token: TestTokenIdentifier,
        receipt_amount: BigUint<StaticApi>,
        supply_token: TestTokenIdentifier,
        borrow_token: TestTokenIdentifier,
        repay_amount: BigUint<StaticApi>,
        close_position: bool,
        route: SwapRoute<StaticApi>,
        error_message: &[u8],
    ) {
        self.world
            .tx()
            .from(from.to_managed_address())
            .to(&self.engine_sc)
            .typed(proxy_leverage_engine::LeverageEngineProxy)
            .unloop_position(supply_token, borrow_token, repay_amount, close_position, route)
            .single_esdt(&receipt_token.to_token_identifier(), 0, &receipt_amount)
            .returns(ExpectMessage(core::str::from_utf8(error_message).unwrap()))
            .run();
    }

    pub fn set_treasury(&mut self, treasury: &TestAddress) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(&self.engine_sc)
            .typed(proxy_leverage_engine::LeverageEngineProxy)
            .set_treasury(treasury.to_managed_address())
            .run();
    }

    pub fn set_fee_bps(&mut self, fee_bps: u64) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(&self.engine_sc)
            .typed(proxy_leverage_engine::LeverageEngineProxy)
            .set_fee_bps(BigUint::from(fee_bps))
            .run();
    }

    pub fn set_fee_bps_error(&mut self, fee_bps: u64, error_message: &[u8]) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(&self.engine_sc)
            .typed(proxy_leverage_engine::LeverageEngineProxy)
            .set_fee_bps(BigUint::from(fee_bps))
            .returns(ExpectMessage(core::str::from_utf8(error_message).unwrap()))
            .run();
    }

    pub fn debt_of(&mut self, user: &TestAddress, asset: TestTokenIdentifier) -> BigUint<StaticApi> {
        self.world
            .query()
            .to(&self.market_sc)
            .typed(proxy_market::LendingMarketProxy)
            .get_debt(user.to_managed_address(), asset)
            .returns(ReturnsResult)
            .run()
    }
}

/// Hop-and-fee route through the venue's rate chain.
pub fn path_route(
    intermediate_hops: &[TestTokenIdentifier],
    fees_bps: &[u32],
    max_amount_in: BigUint<StaticApi>,
) -> SwapRoute<StaticApi> {
    let mut hops = ManagedVec::new();
    for hop in intermediate_hops {
        hops.push(EgldOrEsdtTokenIdentifier::esdt(hop.to_token_identifier()));
    }
    let mut fees = ManagedVec::new();
    for fee in fees_bps {
        fees.push(*fee);
    }
    SwapRoute::Path(SwapPathSpec {
        intermediate_hops: hops,
        fees_bps: fees,
        max_amount_in,
    })
}

/// Opaque payload route hitting the venue's fixed-output `swap` endpoint.
pub fn generic_swap_route(
    wanted_token: TestTokenIdentifier,
    wanted_amount: BigUint<StaticApi>,
    max_amount_in: BigUint<StaticApi>,
    min_amount_out: BigUint<StaticApi>,
) -> SwapRoute<StaticApi> {
    let mut args = ManagedVec::new();
    args.push(ManagedBuffer::from(wanted_token.as_bytes()));
    args.push(wanted_amount.to_bytes_be_buffer());
    SwapRoute::Generic(GenericSwapSpec {
        endpoint: ManagedBuffer::from(&b"swap"[..]),
        args,
        max_amount_in,
        min_amount_out,
    })
}

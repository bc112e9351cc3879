#![allow(dead_code)]

use multiversx_sc::types::BigUint;
use multiversx_sc_scenario::api::StaticApi;
use multiversx_sc_scenario::imports::{MxscPath, TestAddress, TestTokenIdentifier};

pub const OWNER_ADDRESS: TestAddress = TestAddress::new("owner");
pub const USER_ADDRESS: TestAddress = TestAddress::new("user");
pub const OTHER_USER_ADDRESS: TestAddress = TestAddress::new("other_user");

pub const FACTORY_PATH: MxscPath = MxscPath::new("output/strategy-factory.mxsc.json");
pub const STRATEGY_PATH: MxscPath = MxscPath::new("../strategy/output/strategy.mxsc.json");
pub const ENGINE_PATH: MxscPath =
    MxscPath::new("../leverage_engine/output/leverage-engine.mxsc.json");
pub const MARKET_MOCK_PATH: MxscPath =
    MxscPath::new("../market_mock/output/market-mock.mxsc.json");
pub const SWAP_MOCK_PATH: MxscPath = MxscPath::new("../swap_mock/output/swap-mock.mxsc.json");

pub const WEGLD_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("WEGLD-123456");
pub const USDC_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("USDC-123456");
pub const XTK_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("XTK-123456");
pub const WEGLD_RECEIPT_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("RWEGLD-123456");
pub const USDC_RECEIPT_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("RUSDC-123456");
pub const XTK_RECEIPT_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("RXTK-123456");
/// Never listed as a reserve
pub const GHOST_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("GHOST-123456");

pub const FLASH_PREMIUM_BPS: u64 = 50;

/// Correlated category shared by WEGLD and USDC in the mock market
pub const CORRELATED_RISK_MODE: u8 = 1;
/// XTK sits alone in its own category
pub const LONELY_RISK_MODE: u8 = 2;

pub fn units(amount: u64) -> BigUint<StaticApi> {
    BigUint::from(amount) * BigUint::from(10u64).pow(18)
}

pub fn scaled(amount: u64, scale: u32) -> BigUint<StaticApi> {
    BigUint::from(amount) * BigUint::from(10u64).pow(scale)
}

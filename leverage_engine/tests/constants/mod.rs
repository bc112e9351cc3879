#![allow(dead_code)]

use multiversx_sc::types::BigUint;
use multiversx_sc_scenario::api::StaticApi;
use multiversx_sc_scenario::imports::{MxscPath, TestAddress, TestTokenIdentifier};

pub const OWNER_ADDRESS: TestAddress = TestAddress::new("owner");
pub const USER_ADDRESS: TestAddress = TestAddress::new("user");
pub const TREASURY_ADDRESS: TestAddress = TestAddress::new("treasury");

pub const ENGINE_PATH: MxscPath = MxscPath::new("output/leverage-engine.mxsc.json");
pub const MARKET_MOCK_PATH: MxscPath =
    MxscPath::new("../market_mock/output/market-mock.mxsc.json");
pub const SWAP_MOCK_PATH: MxscPath = MxscPath::new("../swap_mock/output/swap-mock.mxsc.json");

pub const WEGLD_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("WEGLD-123456");
pub const USDC_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("USDC-123456");
pub const XTK_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("XTK-123456");
pub const WEGLD_RECEIPT_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("RWEGLD-123456");
pub const USDC_RECEIPT_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("RUSDC-123456");

/// 0.5% on both reserves
pub const FLASH_PREMIUM_BPS: u64 = 50;

/// Whole tokens in 18-decimals raw units
pub fn units(amount: u64) -> BigUint<StaticApi> {
    BigUint::from(amount) * BigUint::from(10u64).pow(18)
}

/// `amount * 10^scale` raw units, for fractional expectations
pub fn scaled(amount: u64, scale: u32) -> BigUint<StaticApi> {
    BigUint::from(amount) * BigUint::from(10u64).pow(scale)
}

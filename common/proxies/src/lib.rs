#![no_std]

pub mod proxy_leverage_engine;
pub mod proxy_market;
pub mod proxy_strategy;
pub mod proxy_strategy_factory;
pub mod proxy_swap_router;

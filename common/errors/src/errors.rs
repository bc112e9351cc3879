#![no_std]

pub static ERROR_ASSET_NOT_SUPPORTED: &[u8] = b"Asset not supported.";

pub static ERROR_ASSETS_ARE_THE_SAME: &[u8] = b"Assets are the same.";

pub static ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO: &[u8] = b"Amount must be greater than zero.";

pub static ERROR_ADDRESS_IS_ZERO: &[u8] = b"Address is zero.";

pub static ERROR_INSUFFICIENT_LIQUIDITY: &[u8] = b"Not enough liquidity in the reserve.";

pub static ERROR_INVALID_FLASHLOAN_REPAYMENT: &[u8] = b"Invalid flash loan repayment.";

pub static ERROR_CALLER_NOT_MARKET: &[u8] = b"Caller is not the lending market.";

pub static ERROR_INVALID_FLASH_LOAN_INITIATOR: &[u8] =
    b"Flash loan was not initiated by this contract.";

pub static ERROR_UNEXPECTED_FLASH_LOAN_CALLBACK: &[u8] = b"No flash loan is in flight.";

pub static ERROR_FLASH_LOAN_ONGOING: &[u8] = b"Flash loan already in progress.";

pub static ERROR_UNEXPECTED_FLASH_ASSET: &[u8] =
    b"Flashed asset does not match the requested operation.";

pub static ERROR_INVALID_CALLBACK_PARAMS: &[u8] = b"Malformed flash loan callback params.";

pub static ERROR_WRONG_PAYMENT_TOKEN: &[u8] = b"Payment token does not match the supply asset.";

pub static ERROR_WRONG_RECEIPT_TOKEN: &[u8] = b"Payment is not the reserve receipt token.";

pub static ERROR_BORROW_WITHOUT_FLASH_LOAN: &[u8] =
    b"Borrowing requires a flash loan amount greater than zero.";

pub static ERROR_INVALID_SWAP_PATH: &[u8] =
    b"Swap path requires exactly one fee per hop, including the final hop.";

pub static ERROR_INVALID_SWAP_ENDPOINT: &[u8] = b"Swap endpoint is empty.";

pub static ERROR_QUOTED_SIZING_REQUIRES_PATH: &[u8] =
    b"Quoted borrow sizing requires a path swap route.";

pub static ERROR_SLIPPAGE_EXCEEDED: &[u8] = b"Swap exceeds the maximum input bound.";

pub static ERROR_SWAP_OUTPUT_TOO_LOW: &[u8] = b"Swap produced less than the required output.";

pub static ERROR_INSUFFICIENT_SWAP_PROCEEDS: &[u8] =
    b"Swap proceeds cannot cover the flash loan repayment.";

pub static ERROR_INSUFFICIENT_SWAP_INPUT: &[u8] =
    b"Swap input does not cover the requested output.";

pub static ERROR_PAIR_NOT_CONFIGURED: &[u8] = b"No rate configured for this pair.";

pub static ERROR_FEE_EXCEEDS_CAP: &[u8] = b"Fee exceeds the maximum allowed.";

pub static ERROR_TREASURY_NOT_SET: &[u8] = b"Treasury must be configured before enabling fees.";

pub static ERROR_DELEGATION_NOT_APPROVED: &[u8] = b"Borrow delegation not approved.";

pub static ERROR_STRATEGY_ALREADY_EXISTS: &[u8] = b"Strategy already exists for this key.";

pub static ERROR_RISK_MODE_MISMATCH: &[u8] = b"Assets are not in the requested risk mode.";

pub static ERROR_ONLY_STRATEGY_USER: &[u8] = b"Only the strategy user can call this.";

pub static ERROR_ALREADY_ACTIVATED: &[u8] = b"Strategy already activated.";

pub static ERROR_NOT_ACTIVATED: &[u8] = b"Strategy not activated.";

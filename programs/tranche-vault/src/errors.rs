use anchor_lang::prelude::*;

use crate::math::MathError;

#[error_code]
#[derive(PartialEq, Eq)]
pub enum ErrorCode {
    #[msg("Minting is paused.")]
    MintPaused,
    #[msg("Redemptions are paused.")]
    RedeemPaused,
    #[msg("Amount must be greater than zero.")]
    ZeroAmount,
    #[msg("Amount below minimum threshold.")]
    AmountTooSmall,
    #[msg("Output below requested minimum.")]
    SlippageExceeded,
    #[msg("Insufficient collateral in vault.")]
    InsufficientCollateral,
    #[msg("Insufficient token balance to burn.")]
    InsufficientSupply,
    #[msg("Collateral ratio would fall below the minimum.")]
    CollateralRatioTooLow,
    #[msg("Protocol is insolvent; equity redemptions are frozen.")]
    InsolventProtocol,
    #[msg("Operation would strand collateral below the protocol minimum.")]
    BelowMinimumTVL,
    #[msg("Oracle price snapshot is stale.")]
    OraclePriceStale,
    #[msg("Oracle confidence interval too wide.")]
    OracleConfidenceTooWide,
    #[msg("LST exchange-rate snapshot is stale.")]
    LstRateStale,
    #[msg("Unauthorized.")]
    Unauthorized,
    #[msg("Instruction must be called directly, not via CPI.")]
    InvalidCPIContext,
    #[msg("Collateral mint is not the supported LST.")]
    UnsupportedCollateral,
    #[msg("Invalid parameter value.")]
    InvalidParameter,
    #[msg("Already initialized.")]
    AlreadyInitialized,
    #[msg("Math overflow.")]
    MathOverflow,
    #[msg("Division by zero.")]
    DivisionByZero,
    #[msg("Balance sheet invariant violated.")]
    BalanceSheetViolation,
    #[msg("Oracle account is invalid.")]
    InvalidOracle,
}

impl From<MathError> for Error {
    fn from(e: MathError) -> Self {
        match e {
            MathError::Overflow => ErrorCode::MathOverflow.into(),
            MathError::DivisionByZero => ErrorCode::DivisionByZero.into(),
        }
    }
}

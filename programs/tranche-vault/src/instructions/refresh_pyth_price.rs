use anchor_lang::prelude::*;
use pyth_sdk_solana::state::SolanaPriceAccount;

use crate::constants::{PROTOCOL_SEED, PYTH_MAX_AGE_SECS};
use crate::engine;
use crate::errors::ErrorCode;
use crate::events::PricesUpdated;
use crate::state::ProtocolState;

/// Permissionless snapshot refresh from the configured Pyth SOL/USD feed.
/// The LST exchange rate is not oracle-fed and stays untouched.
pub fn refresh_pyth_price(ctx: Context<RefreshPythPrice>) -> Result<()> {
    let state = &mut ctx.accounts.protocol_state;
    let price_info = &ctx.accounts.price_feed;

    require!(
        price_info.key() == state.sol_usd_pyth_feed,
        ErrorCode::InvalidOracle
    );
    require!(
        price_info.owner == &state.pyth_program_id,
        ErrorCode::InvalidOracle
    );

    let clock = Clock::get()?;
    let feed = SolanaPriceAccount::account_info_to_feed(&price_info.to_account_info())
        .map_err(|_| ErrorCode::InvalidOracle)?;
    let price = feed
        .get_price_no_older_than(clock.unix_timestamp, PYTH_MAX_AGE_SECS)
        .ok_or(ErrorCode::OraclePriceStale)?;
    require!(price.price > 0, ErrorCode::InvalidOracle);

    let sol_usd = scale_to_usd_6(price.price as u128, price.expo)?;
    let conf_usd = scale_to_usd_6(price.conf as u128, price.expo)?;

    engine::record_oracle_refresh(state, clock.slot, sol_usd, conf_usd)?;

    emit!(PricesUpdated {
        source: price_info.key(),
        sol_usd_price: sol_usd,
        lst_sol_rate: state.lst_sol_rate,
        sol_usd_conf: conf_usd,
        slot: clock.slot,
    });

    Ok(())
}

/// Rescale a Pyth mantissa to 6-decimal USD units.
fn scale_to_usd_6(value: u128, expo: i32) -> Result<u64> {
    let shift = expo.checked_add(6).ok_or(ErrorCode::MathOverflow)?;
    let scaled = if shift >= 0 {
        let factor = 10u128
            .checked_pow(shift as u32)
            .ok_or(ErrorCode::MathOverflow)?;
        value.checked_mul(factor).ok_or(ErrorCode::MathOverflow)?
    } else {
        let factor = 10u128
            .checked_pow((-shift) as u32)
            .ok_or(ErrorCode::MathOverflow)?;
        value / factor
    };
    u64::try_from(scaled).map_err(|_| error!(ErrorCode::MathOverflow))
}

#[derive(Accounts)]
pub struct RefreshPythPrice<'info> {
    #[account(mut, seeds = [PROTOCOL_SEED], bump = protocol_state.bump)]
    pub protocol_state: Account<'info, ProtocolState>,
    /// CHECK: key and owner are validated against the configured feed.
    pub price_feed: UncheckedAccount<'info>,
}

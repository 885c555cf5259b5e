//! Balance-sheet view. The single pricing source consumed by the fee
//! engine and the mint/redeem planners; derived fresh from the state
//! snapshot, never cached across operations.

use crate::constants::{BPS_PRECISION, CR_SENTINEL, SOL_PRECISION};
use crate::math::{mul_div_down, mul_div_up, MathError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BalanceSheet {
    /// SOL value of vault collateral, rounded down.
    pub tvl_sol: u64,
    /// SOL value of outstanding stable supply, rounded up.
    pub liability_sol: u64,
    /// TVL minus liability, floored at zero.
    pub equity_sol: u64,
    /// `CR_SENTINEL` when no stable debt exists.
    pub cr_bps: u64,
    /// SOL per lever token; par when lever supply is zero.
    pub lever_nav: u64,
}

impl BalanceSheet {
    pub fn derive(
        total_lst_amount: u64,
        lst_sol_rate: u64,
        stable_supply: u64,
        sol_usd_price: u64,
        lever_supply: u64,
    ) -> Result<Self, MathError> {
        let tvl_sol = mul_div_down(total_lst_amount, lst_sol_rate, SOL_PRECISION)?;

        // Liability rounds up: an extra lamport of accounted debt can only
        // overstate what the protocol owes.
        let liability_sol = if stable_supply == 0 {
            0
        } else {
            mul_div_up(stable_supply, SOL_PRECISION, sol_usd_price)?
        };

        let equity_sol = tvl_sol.saturating_sub(liability_sol);

        let cr_bps = if liability_sol == 0 {
            CR_SENTINEL
        } else {
            mul_div_down(tvl_sol, BPS_PRECISION, liability_sol)?
        };

        let lever_nav = if lever_supply == 0 {
            SOL_PRECISION
        } else {
            mul_div_down(equity_sol, SOL_PRECISION, lever_supply)?
        };

        Ok(Self {
            tvl_sol,
            liability_sol,
            equity_sol,
            cr_bps,
            lever_nav,
        })
    }

    pub fn solvent(&self) -> bool {
        self.tvl_sol >= self.liability_sol
    }
}

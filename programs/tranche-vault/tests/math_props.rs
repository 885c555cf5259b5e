//! Property tests for the fixed-point primitives, the pricing view, and
//! the fee engine's bounds.

use proptest::prelude::*;

use tranche_vault::constants::{BPS_PRECISION, SOL_PRECISION, USD_PRECISION};
use tranche_vault::fees::{effective_fee_bps, FeeCurve, FeeDirection};
use tranche_vault::math::{mul_div_down, mul_div_up};
use tranche_vault::pricing::BalanceSheet;

proptest! {
    #[test]
    fn mul_div_up_dominates_down(a in 0u64..=u64::MAX, b in 0u64..1_000_000, c in 1u64..1_000_000) {
        if let (Ok(down), Ok(up)) = (mul_div_down(a, b, c), mul_div_up(a, b, c)) {
            prop_assert!(down <= up);
            prop_assert!(up - down <= 1);
        }
    }

    #[test]
    fn mul_div_exact_when_divisible(a in 0u64..1_000_000_000, b in 0u64..1_000_000, c in 1u64..1_000) {
        let prod = a.checked_mul(b).filter(|p| p % c == 0);
        if let Some(p) = prod {
            prop_assert_eq!(mul_div_down(a, b, c).unwrap(), p / c);
            prop_assert_eq!(mul_div_up(a, b, c).unwrap(), p / c);
        }
    }

    #[test]
    fn solvent_sheet_claims_match_tvl(
        total_lst in 0u64..1_000_000_000 * 1_000_000_000u64 / 1_000,
        rate in 900_000_000u64..1_200_000_000,
        stable in 0u64..1_000_000_000_000,
        price in 1_000_000u64..1_000 * USD_PRECISION,
        lever in 0u64..1_000_000_000_000,
    ) {
        // NAV can legitimately overflow u64 for dust lever supplies
        // against a large vault; those cases reject, not lie.
        if let Ok(sheet) = BalanceSheet::derive(total_lst, rate, stable, price, lever) {
            if sheet.solvent() {
                prop_assert_eq!(sheet.liability_sol + sheet.equity_sol, sheet.tvl_sol);
            } else {
                prop_assert_eq!(sheet.equity_sol, 0);
                prop_assert!(sheet.cr_bps < BPS_PRECISION);
            }
        }
    }

    #[test]
    fn lever_nav_never_exceeds_equity_per_unit(
        total_lst in 1u64..1_000_000 * SOL_PRECISION,
        stable in 0u64..1_000_000_000,
        lever in 1u64..1_000_000 * SOL_PRECISION,
    ) {
        if let Ok(sheet) =
            BalanceSheet::derive(total_lst, SOL_PRECISION, stable, 100 * USD_PRECISION, lever)
        {
            let implied = mul_div_down(sheet.lever_nav, lever, SOL_PRECISION).unwrap();
            prop_assert!(implied <= sheet.equity_sol);
        }
    }

    #[test]
    fn fee_is_bounded_by_multiplier_range(
        base in 0u64..=500,
        cr in 0u64..30_000,
        unc in 0u64..=2_000,
    ) {
        let curve = FeeCurve {
            min_cr_bps: 13_000,
            target_cr_bps: 15_000,
            fee_min_multiplier_bps: 10_000,
            fee_max_multiplier_bps: 40_000,
            uncertainty_index_bps: unc,
            uncertainty_max_bps: 20_000,
        };
        for direction in [FeeDirection::RiskIncreasing, FeeDirection::RiskReducing] {
            let fee = effective_fee_bps(base, direction, cr, &curve).unwrap();
            prop_assert!(fee <= base * 4);
            match direction {
                FeeDirection::RiskIncreasing => prop_assert!(fee >= base),
                FeeDirection::RiskReducing => prop_assert!(fee <= base),
            }
        }
    }

    #[test]
    fn risk_increasing_fee_is_antitone_in_cr(
        base in 1u64..=500,
        cr_lo in 0u64..30_000,
        delta in 0u64..10_000,
    ) {
        let curve = FeeCurve {
            min_cr_bps: 13_000,
            target_cr_bps: 15_000,
            fee_min_multiplier_bps: 10_000,
            fee_max_multiplier_bps: 40_000,
            uncertainty_index_bps: 0,
            uncertainty_max_bps: 20_000,
        };
        let cr_hi = cr_lo + delta;
        let lo = effective_fee_bps(base, FeeDirection::RiskIncreasing, cr_lo, &curve).unwrap();
        let hi = effective_fee_bps(base, FeeDirection::RiskIncreasing, cr_hi, &curve).unwrap();
        prop_assert!(hi <= lo);
    }

    #[test]
    fn fee_equals_base_at_target_without_uncertainty(
        base in 0u64..=500,
        above in 0u64..100_000,
    ) {
        let curve = FeeCurve {
            min_cr_bps: 13_000,
            target_cr_bps: 15_000,
            fee_min_multiplier_bps: 10_000,
            fee_max_multiplier_bps: 40_000,
            uncertainty_index_bps: 0,
            uncertainty_max_bps: 20_000,
        };
        let cr = 15_000 + above;
        for direction in [FeeDirection::RiskIncreasing, FeeDirection::RiskReducing] {
            prop_assert_eq!(effective_fee_bps(base, direction, cr, &curve), Some(base));
        }
    }
}

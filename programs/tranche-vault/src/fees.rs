//! Dynamic fee engine. A pure function from (base fee, direction, current
//! CR, curve parameters) to an effective fee in bps. Operations that push
//! the collateral ratio down pay more as CR approaches the minimum;
//! operations that restore it pay less. Oracle uncertainty only ever makes
//! risk-increasing operations more expensive, never cheaper.

use crate::constants::{BPS_PRECISION, UNCERTAINTY_K};
use crate::math::mul_div_down;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeeDirection {
    /// Worsens the collateral ratio: stable mint, lever redeem.
    RiskIncreasing,
    /// Restores the collateral ratio: lever mint, stable redeem.
    RiskReducing,
}

#[derive(Clone, Copy, Debug)]
pub struct FeeCurve {
    pub min_cr_bps: u64,
    pub target_cr_bps: u64,
    pub fee_min_multiplier_bps: u64,
    pub fee_max_multiplier_bps: u64,
    pub uncertainty_index_bps: u64,
    pub uncertainty_max_bps: u64,
}

/// Effective fee in bps, or `None` on arithmetic failure or inverted
/// multiplier bounds (admin validation keeps live state out of that case).
pub fn effective_fee_bps(
    base_fee_bps: u64,
    direction: FeeDirection,
    cr_bps: u64,
    curve: &FeeCurve,
) -> Option<u64> {
    if curve.fee_min_multiplier_bps > curve.fee_max_multiplier_bps {
        return None;
    }

    let cr_mult = cr_multiplier_bps(direction, cr_bps, curve)?;
    let unc_mult = match direction {
        FeeDirection::RiskIncreasing => uncertainty_multiplier_bps(curve)?,
        FeeDirection::RiskReducing => BPS_PRECISION,
    };

    let mut total = mul_div_down(cr_mult, unc_mult, BPS_PRECISION).ok()?;
    total = match direction {
        FeeDirection::RiskIncreasing => total.max(BPS_PRECISION),
        FeeDirection::RiskReducing => total.min(BPS_PRECISION),
    };
    total = total.clamp(curve.fee_min_multiplier_bps, curve.fee_max_multiplier_bps);

    mul_div_down(base_fee_bps, total, BPS_PRECISION).ok()
}

/// Piecewise-linear CR multiplier. 1.0x at or above target, interpolated
/// between target and min, pinned at the directional extreme at or below
/// min.
fn cr_multiplier_bps(direction: FeeDirection, cr_bps: u64, curve: &FeeCurve) -> Option<u64> {
    if cr_bps >= curve.target_cr_bps {
        return Some(BPS_PRECISION);
    }
    if cr_bps <= curve.min_cr_bps {
        return Some(match direction {
            FeeDirection::RiskIncreasing => curve.fee_max_multiplier_bps,
            FeeDirection::RiskReducing => curve.fee_min_multiplier_bps,
        });
    }

    let span = curve.target_cr_bps - curve.min_cr_bps;
    let drop = curve.target_cr_bps - cr_bps;
    match direction {
        FeeDirection::RiskIncreasing => {
            let rise_span = curve.fee_max_multiplier_bps.saturating_sub(BPS_PRECISION);
            let rise = mul_div_down(drop, rise_span, span).ok()?;
            BPS_PRECISION.checked_add(rise)
        }
        FeeDirection::RiskReducing => {
            let fall_span = BPS_PRECISION.saturating_sub(curve.fee_min_multiplier_bps);
            let fall = mul_div_down(drop, fall_span, span).ok()?;
            Some(BPS_PRECISION - fall)
        }
    }
}

fn uncertainty_multiplier_bps(curve: &FeeCurve) -> Option<u64> {
    let boost = mul_div_down(curve.uncertainty_index_bps, BPS_PRECISION, UNCERTAINTY_K).ok()?;
    let mult = BPS_PRECISION.checked_add(boost)?;
    Some(mult.min(curve.uncertainty_max_bps).max(BPS_PRECISION))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve() -> FeeCurve {
        FeeCurve {
            min_cr_bps: 13_000,
            target_cr_bps: 15_000,
            fee_min_multiplier_bps: 10_000,
            fee_max_multiplier_bps: 40_000,
            uncertainty_index_bps: 0,
            uncertainty_max_bps: 20_000,
        }
    }

    #[test]
    fn base_fee_at_or_above_target() {
        let c = curve();
        for cr in [15_000, 20_000, u64::MAX] {
            assert_eq!(
                effective_fee_bps(50, FeeDirection::RiskIncreasing, cr, &c),
                Some(50)
            );
            assert_eq!(
                effective_fee_bps(25, FeeDirection::RiskReducing, cr, &c),
                Some(25)
            );
        }
    }

    #[test]
    fn midpoint_interpolation() {
        let c = curve();
        // Halfway between target and min: multiplier 2.5x for risk-increasing.
        assert_eq!(
            effective_fee_bps(50, FeeDirection::RiskIncreasing, 14_000, &c),
            Some(125)
        );
        // Risk-reducing stays at 1.0x with the default floor multiplier.
        assert_eq!(
            effective_fee_bps(50, FeeDirection::RiskReducing, 14_000, &c),
            Some(50)
        );
    }

    #[test]
    fn discount_floor_interpolates_when_below_one() {
        let mut c = curve();
        c.fee_min_multiplier_bps = 5_000;
        c.fee_max_multiplier_bps = 20_000;
        assert_eq!(
            effective_fee_bps(100, FeeDirection::RiskIncreasing, 14_000, &c),
            Some(150)
        );
        assert_eq!(
            effective_fee_bps(100, FeeDirection::RiskReducing, 14_000, &c),
            Some(75)
        );
    }

    #[test]
    fn pinned_at_and_below_min() {
        let c = curve();
        for cr in [13_000, 12_000, 1, 0] {
            assert_eq!(
                effective_fee_bps(50, FeeDirection::RiskIncreasing, cr, &c),
                Some(200)
            );
        }
    }

    #[test]
    fn monotone_in_cr_for_risk_increasing() {
        let c = curve();
        let mut last = u64::MAX;
        for cr in (12_000..=16_000).step_by(100) {
            let fee = effective_fee_bps(50, FeeDirection::RiskIncreasing, cr, &c).unwrap();
            assert!(fee <= last);
            assert!(fee >= 50);
            assert!(fee <= 200);
            last = fee;
        }
    }

    #[test]
    fn uncertainty_boosts_risk_increasing_only() {
        let mut c = curve();
        c.uncertainty_index_bps = 100;
        // boost = 100 * 10_000 / 1_000 = 1_000 bps -> 1.1x.
        assert_eq!(
            effective_fee_bps(50, FeeDirection::RiskIncreasing, 20_000, &c),
            Some(55)
        );
        assert_eq!(
            effective_fee_bps(50, FeeDirection::RiskReducing, 20_000, &c),
            Some(50)
        );
    }

    #[test]
    fn uncertainty_multiplier_is_capped() {
        let mut c = curve();
        c.uncertainty_index_bps = 10_000;
        c.uncertainty_max_bps = 12_000;
        // Uncapped boost would be 10x; cap holds it to 1.2x.
        assert_eq!(
            effective_fee_bps(100, FeeDirection::RiskIncreasing, u64::MAX, &c),
            Some(120)
        );
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let mut c = curve();
        c.fee_min_multiplier_bps = 12_000;
        c.fee_max_multiplier_bps = 9_000;
        assert_eq!(
            effective_fee_bps(100, FeeDirection::RiskIncreasing, 14_000, &c),
            None
        );
    }

    #[test]
    fn zero_base_fee_stays_zero() {
        let c = curve();
        assert_eq!(
            effective_fee_bps(0, FeeDirection::RiskIncreasing, 13_500, &c),
            Some(0)
        );
    }
}

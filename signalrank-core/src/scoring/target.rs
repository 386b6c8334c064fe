//! Price target, volatility band and risk tier.

use crate::domain::RiskTier;

/// Target premium over a resistance level above the price.
pub const RESISTANCE_PREMIUM: f64 = 1.03;
/// Target premium over the price when no resistance lies above it.
pub const PRICE_PREMIUM: f64 = 1.05;
/// Band half-width in units of floored volatility.
pub const BAND_MULTIPLIER: f64 = 1.0;

pub const HIGH_RISK_SCORE: f64 = 40.0;
pub const HIGH_RISK_VOLATILITY: f64 = 0.08;
pub const MEDIUM_RISK_SCORE: f64 = 65.0;
pub const MEDIUM_RISK_VOLATILITY: f64 = 0.04;

/// Target with its band and the implied return.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetBand {
    pub target: f64,
    pub low: f64,
    pub high: f64,
    pub expected_return_pct: f64,
}

/// Single target rule: 3% over resistance when it lies above the price,
/// otherwise 5% over the price.
pub fn target_price(price: f64, resistance: Option<f64>) -> f64 {
    match resistance {
        Some(r) if r > price => r * RESISTANCE_PREMIUM,
        _ => price * PRICE_PREMIUM,
    }
}

/// Target band around the target. `None` unless the price is a positive
/// finite number; `vol_floor` is the already-floored volatility.
pub fn target_band(price: Option<f64>, resistance: Option<f64>, vol_floor: f64) -> Option<TargetBand> {
    let price = price.filter(|p| p.is_finite() && *p > 0.0)?;
    let target = target_price(price, resistance);
    let half_width = BAND_MULTIPLIER * vol_floor;
    Some(TargetBand {
        target,
        low: target * (1.0 - half_width),
        high: target * (1.0 + half_width),
        expected_return_pct: (target / price - 1.0) * 100.0,
    })
}

/// Tier from the composite score and the unfloored volatility.
pub fn risk_tier(score: f64, volatility: f64) -> RiskTier {
    if score < HIGH_RISK_SCORE || volatility > HIGH_RISK_VOLATILITY {
        RiskTier::High
    } else if volatility > MEDIUM_RISK_VOLATILITY || score < MEDIUM_RISK_SCORE {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

#![allow(dead_code)]

//! Static China -> Korea shipping rate reference. Informational display data
//! only — the margin engine prices shipping from its own per-country flat
//! rate and never reads these tiers.

/// Per-kg KRW rates for one weight bracket, by carriage mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateTier {
    pub min_kg: f64,
    pub max_kg: f64,
    pub air: f64,
    pub sea: f64,
    pub express: f64,
}

/// Approximate 2026 rates, heaviest brackets cheapest per kg.
pub const RATE_TIERS: [RateTier; 8] = [
    RateTier { min_kg: 0.0, max_kg: 0.5, air: 8000.0, sea: 5000.0, express: 15000.0 },
    RateTier { min_kg: 0.5, max_kg: 1.0, air: 7500.0, sea: 4500.0, express: 12000.0 },
    RateTier { min_kg: 1.0, max_kg: 2.0, air: 7000.0, sea: 4000.0, express: 10000.0 },
    RateTier { min_kg: 2.0, max_kg: 5.0, air: 6500.0, sea: 3500.0, express: 9000.0 },
    RateTier { min_kg: 5.0, max_kg: 10.0, air: 6000.0, sea: 3000.0, express: 8000.0 },
    RateTier { min_kg: 10.0, max_kg: 20.0, air: 5500.0, sea: 2500.0, express: 7500.0 },
    RateTier { min_kg: 20.0, max_kg: 50.0, air: 5000.0, sea: 2000.0, express: 7000.0 },
    RateTier { min_kg: 50.0, max_kg: 100.0, air: 4500.0, sea: 1800.0, express: 6500.0 },
];

/// Bracket containing the weight (`min < w <= max`); anything beyond the
/// table falls into the heaviest bracket.
pub fn tier_for_weight(weight_kg: f64) -> &'static RateTier {
    RATE_TIERS
        .iter()
        .find(|tier| weight_kg > tier.min_kg && weight_kg <= tier.max_kg)
        .unwrap_or(&RATE_TIERS[RATE_TIERS.len() - 1])
}

/// Quick estimate: weight times the bracket's per-kg rate, rounded.
pub fn estimate_cost(weight_kg: f64, rate_per_kg: f64) -> f64 {
    (weight_kg * rate_per_kg).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_bounds_are_exclusive_inclusive() {
        assert_eq!(tier_for_weight(0.5).max_kg, 0.5);
        assert_eq!(tier_for_weight(0.51).max_kg, 1.0);
        assert_eq!(tier_for_weight(1.0).max_kg, 1.0);
        assert_eq!(tier_for_weight(2.0).max_kg, 2.0);
    }

    #[test]
    fn overweight_falls_into_heaviest_bracket() {
        assert_eq!(tier_for_weight(500.0).min_kg, 50.0);
    }

    #[test]
    fn estimates_round_to_whole_krw() {
        let tier = tier_for_weight(1.5);
        assert_eq!(estimate_cost(1.5, tier.air), 10_500.0);
        assert_eq!(estimate_cost(1.5, tier.sea), 6_000.0);
    }
}

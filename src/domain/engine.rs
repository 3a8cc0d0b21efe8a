#![allow(dead_code)]

//! The margin engine: one pure pass from an input snapshot to every derived
//! financial quantity. Safe to call on every keystroke — arithmetic only,
//! no I/O, no shared state.

use super::entities::{
    CalculationInput, CalculationResult, CategoryAmount, CostCategory, Platform,
};

/// Combined Korea import duty + VAT estimate applied above the de-minimis
/// threshold.
pub const DUTY_TAX_RATE: f64 = 0.18;

/// Industry-standard divisor: cm³ / 6000 = kilograms of volumetric weight.
pub const VOLUMETRIC_DIVISOR: f64 = 6000.0;

/// Commission the Coupang family charges on the buyer-paid shipping line.
pub const SHIPPING_COMMISSION_RATE: f64 = 0.033;

/// Margin at or above this is flagged as high profit.
pub const HIGH_PROFIT_MARGIN_PERCENT: f64 = 20.0;

/// Recommended prices are rounded up to this unit so sellers never round
/// down into a worse-than-target margin.
pub const PRICE_ROUNDING_UNIT: f64 = 100.0;

pub fn compute_margin(raw: &CalculationInput) -> CalculationResult {
    let input = raw.sanitized();
    let customs = input.source_country.customs();

    let resolved_weight = resolve_weight(&input);

    let revenue = input.selling_price + input.customer_shipping_fee;
    let cost_of_goods = (input.sourcing_price + input.local_shipping) * input.exchange_rate;

    let international_shipping_cost = resolved_weight * customs.shipping_rate_per_kg;
    let logistics_cost =
        international_shipping_cost + input.domestic_shipping_cost + input.packing_cost;

    let base_fee_rate = base_fee_rate(&input);
    let extra_shipping_commission = if input.platform.has_shipping_commission() {
        input.customer_shipping_fee * SHIPPING_COMMISSION_RATE
    } else {
        0.0
    };
    let platform_fee = revenue * base_fee_rate + extra_shipping_commission;

    // Duty eligibility is tested in USD space; the tax base is in KRW.
    // Above the threshold the whole declared value is dutiable, not just the
    // excess — a deliberate cliff, no interpolation at the boundary.
    let sourcing_usd_equivalent =
        (input.sourcing_price + input.local_shipping) / customs.to_usd_rate;
    let duty_tax = if sourcing_usd_equivalent > customs.threshold_usd {
        (cost_of_goods + international_shipping_cost) * DUTY_TAX_RATE
    } else {
        0.0
    };

    let vat_rate = input.vat_regime.rate();
    let vat = revenue * vat_rate;

    let total_expenses =
        cost_of_goods + logistics_cost + platform_fee + duty_tax + vat + input.ad_cost;
    let net_profit = revenue - total_expenses;
    let profit_margin_percent = if revenue > 0.0 {
        net_profit / revenue * 100.0
    } else {
        0.0
    };

    let recommended_selling_price = recommend_selling_price(
        &input,
        cost_of_goods,
        logistics_cost,
        duty_tax,
        extra_shipping_commission,
        base_fee_rate,
        vat_rate,
    );

    let breakdown = [
        CategoryAmount {
            category: CostCategory::Goods,
            amount: cost_of_goods,
        },
        CategoryAmount {
            category: CostCategory::Logistics,
            amount: logistics_cost,
        },
        CategoryAmount {
            category: CostCategory::FeesAndTaxes,
            amount: platform_fee + duty_tax + vat + input.ad_cost,
        },
        CategoryAmount {
            category: CostCategory::Profit,
            amount: net_profit.max(0.0),
        },
    ];

    CalculationResult {
        revenue,
        cost_of_goods,
        resolved_weight,
        international_shipping_cost,
        logistics_cost,
        platform_fee,
        extra_shipping_commission,
        sourcing_usd_equivalent,
        duty_tax,
        vat,
        total_expenses,
        net_profit,
        profit_margin_percent,
        is_loss: net_profit < 0.0,
        is_high_profit: profit_margin_percent >= HIGH_PROFIT_MARGIN_PERCENT,
        breakdown,
        recommended_selling_price,
    }
}

/// Carriers bill by the larger of actual and volumetric weight. Unset
/// dimensions are 0 and can only lower the volumetric figure.
pub fn resolve_weight(input: &CalculationInput) -> f64 {
    if !input.use_volumetric {
        return input.weight;
    }
    let volumetric = input.dim_width * input.dim_depth * input.dim_height / VOLUMETRIC_DIVISOR;
    input.weight.max(volumetric)
}

fn base_fee_rate(input: &CalculationInput) -> f64 {
    match input.platform {
        Platform::Custom => input.custom_fee_rate_percent / 100.0,
        platform => platform.base_fee_rate(),
    }
}

/// Solve revenue = fixed / (1 - scaling - target) where only the platform
/// fee and VAT scale with revenue, then strip the buyer-paid shipping to get
/// the item price. Infeasible targets yield 0 ("no recommendation").
fn recommend_selling_price(
    input: &CalculationInput,
    cost_of_goods: f64,
    logistics_cost: f64,
    duty_tax: f64,
    extra_shipping_commission: f64,
    base_fee_rate: f64,
    vat_rate: f64,
) -> f64 {
    let fixed_costs =
        cost_of_goods + logistics_cost + input.ad_cost + duty_tax + extra_shipping_commission;
    let scaling_rate = base_fee_rate + vat_rate;
    let divisor = 1.0 - scaling_rate - input.target_margin_percent / 100.0;

    if divisor <= 0.0 || fixed_costs <= 0.0 {
        return 0.0;
    }

    let required_revenue = fixed_costs / divisor;
    let item_price = (required_revenue - input.customer_shipping_fee).max(0.0);
    round_up_to_unit(item_price, PRICE_ROUNDING_UNIT)
}

fn round_up_to_unit(value: f64, unit: f64) -> f64 {
    (value / unit).ceil() * unit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{SourceCountry, VatRegime};
    use proptest::prelude::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    fn china_naver_input() -> CalculationInput {
        CalculationInput {
            sourcing_price: 100.0,
            exchange_rate: 200.0,
            weight: 1.0,
            selling_price: 40_000.0,
            platform: Platform::NaverGeneral,
            source_country: SourceCountry::China,
            vat_regime: VatRegime::Standard,
            ..CalculationInput::default()
        }
    }

    #[test]
    fn end_to_end_china_naver_example() {
        let result = compute_margin(&china_naver_input());

        assert_close(result.cost_of_goods, 20_000.0);
        assert_close(result.international_shipping_cost, 7_000.0);
        assert_close(result.logistics_cost, 7_000.0);
        assert_close(result.sourcing_usd_equivalent, 100.0 / 7.25);
        assert_close(result.duty_tax, 0.0);
        assert_close(result.platform_fee, 40_000.0 * 0.0563);
        assert_close(result.vat, 4_000.0);
        assert_close(result.total_expenses, 33_252.0);
        assert_close(result.net_profit, 6_748.0);
        assert_close(result.profit_margin_percent, 6_748.0 / 40_000.0 * 100.0);
        assert!(!result.is_loss);
        assert!(!result.is_high_profit);
    }

    #[test]
    fn volumetric_weight_wins_when_enabled() {
        let mut input = china_naver_input();
        input.weight = 2.0;
        input.use_volumetric = true;
        input.dim_width = 40.0;
        input.dim_depth = 40.0;
        input.dim_height = 40.0;

        let on = compute_margin(&input);
        assert_close(on.resolved_weight, 40.0 * 40.0 * 40.0 / 6000.0);

        input.use_volumetric = false;
        let off = compute_margin(&input);
        assert_close(off.resolved_weight, 2.0);
    }

    #[test]
    fn missing_dimensions_never_raise_resolved_weight() {
        let mut input = china_naver_input();
        input.weight = 2.0;
        input.use_volumetric = true;
        // dims left at 0
        let result = compute_margin(&input);
        assert_close(result.resolved_weight, 2.0);
    }

    #[test]
    fn duty_cliff_is_binary() {
        // 1087.5 CNY / 7.25 = exactly $150: at the threshold, still duty free.
        let mut input = china_naver_input();
        input.sourcing_price = 1_087.5;
        let at_threshold = compute_margin(&input);
        assert_close(at_threshold.duty_tax, 0.0);

        // One USD-equivalent above: duty on the entire base, not the excess.
        input.sourcing_price = 1_087.5 + 7.25;
        let above = compute_margin(&input);
        let expected =
            (above.cost_of_goods + above.international_shipping_cost) * DUTY_TAX_RATE;
        assert_close(above.duty_tax, expected);
        assert!(above.duty_tax > 0.0);
    }

    #[test]
    fn shipping_commission_counted_once_inside_platform_fee() {
        let mut input = china_naver_input();
        input.platform = Platform::CoupangGeneral;
        input.customer_shipping_fee = 3_000.0;

        let result = compute_margin(&input);
        let revenue = 40_000.0 + 3_000.0;
        assert_close(result.extra_shipping_commission, 3_000.0 * 0.033);
        assert_close(
            result.platform_fee,
            revenue * 0.1199 + result.extra_shipping_commission,
        );
        // The surcharge must not appear again outside platform_fee.
        let expected_expenses = result.cost_of_goods
            + result.logistics_cost
            + result.platform_fee
            + result.duty_tax
            + result.vat;
        assert_close(result.total_expenses, expected_expenses);
    }

    #[test]
    fn naver_has_no_shipping_commission() {
        let mut input = china_naver_input();
        input.customer_shipping_fee = 3_000.0;
        let result = compute_margin(&input);
        assert_close(result.extra_shipping_commission, 0.0);
        assert_close(result.platform_fee, 43_000.0 * 0.0563);
    }

    #[test]
    fn custom_platform_uses_entered_rate() {
        let mut input = china_naver_input();
        input.platform = Platform::Custom;
        input.custom_fee_rate_percent = 8.5;
        let result = compute_margin(&input);
        assert_close(result.platform_fee, 40_000.0 * 0.085);
    }

    #[test]
    fn zero_revenue_yields_zero_margin_not_nan() {
        let mut input = china_naver_input();
        input.selling_price = 0.0;
        input.customer_shipping_fee = 0.0;
        let result = compute_margin(&input);
        assert_close(result.revenue, 0.0);
        assert_close(result.profit_margin_percent, 0.0);
        assert_close(result.net_profit, -result.total_expenses);
        assert!(result.is_loss);
    }

    #[test]
    fn negative_inputs_are_clamped_to_zero() {
        let mut input = china_naver_input();
        input.sourcing_price = -100.0;
        input.weight = -5.0;
        let result = compute_margin(&input);
        assert_close(result.cost_of_goods, 0.0);
        assert_close(result.resolved_weight, 0.0);
    }

    #[test]
    fn infeasible_target_gives_no_recommendation() {
        let mut input = china_naver_input();
        // 13% fee + 10% VAT + 80% target > 100%.
        input.platform = Platform::Others;
        input.target_margin_percent = 80.0;
        let result = compute_margin(&input);
        assert_close(result.recommended_selling_price, 0.0);
    }

    #[test]
    fn recommendation_rounds_up_to_hundreds() {
        let input = china_naver_input();
        let result = compute_margin(&input);
        assert!(result.recommended_selling_price > 0.0);
        assert_close(result.recommended_selling_price % 100.0, 0.0);

        // Substituting the recommendation back must reach the target.
        let mut adopted = input.clone();
        adopted.selling_price = result.recommended_selling_price;
        let check = compute_margin(&adopted);
        assert!(check.profit_margin_percent >= input.target_margin_percent - 1e-6);
    }

    #[test]
    fn breakdown_profit_bucket_is_non_negative() {
        let mut input = china_naver_input();
        input.selling_price = 1_000.0;
        let result = compute_margin(&input);
        assert!(result.is_loss);
        assert_close(result.breakdown[3].amount, 0.0);
    }

    #[test]
    fn breakdown_buckets_sum_to_revenue_when_profitable() {
        let result = compute_margin(&china_naver_input());
        let sum: f64 = result.breakdown.iter().map(|b| b.amount).sum();
        assert_close(sum, result.revenue);
    }

    proptest! {
        #[test]
        fn expenses_sum_their_components(
            sourcing in 0.0..5_000.0f64,
            local in 0.0..500.0f64,
            weight in 0.0..50.0f64,
            selling in 0.0..1_000_000.0f64,
            ship_fee in 0.0..10_000.0f64,
            packing in 0.0..10_000.0f64,
            ad in 0.0..50_000.0f64,
            domestic in 0.0..10_000.0f64,
        ) {
            let input = CalculationInput {
                sourcing_price: sourcing,
                local_shipping: local,
                weight,
                selling_price: selling,
                customer_shipping_fee: ship_fee,
                packing_cost: packing,
                ad_cost: ad,
                domestic_shipping_cost: domestic,
                ..china_naver_input()
            };
            let r = compute_margin(&input);
            let expected = r.cost_of_goods
                + r.logistics_cost
                + r.platform_fee
                + r.duty_tax
                + r.vat
                + ad;
            prop_assert!((r.total_expenses - expected).abs() < 1e-6);
            prop_assert!((r.net_profit - (r.revenue - r.total_expenses)).abs() < 1e-6);
        }

        #[test]
        fn higher_selling_price_means_higher_profit(
            selling in 0.0..1_000_000.0f64,
            bump in 1.0..100_000.0f64,
        ) {
            // 1 - 5.63% fee - 10% VAT is comfortably positive.
            let mut input = china_naver_input();
            input.selling_price = selling;
            let before = compute_margin(&input);
            input.selling_price = selling + bump;
            let after = compute_margin(&input);
            prop_assert!(after.net_profit > before.net_profit);
        }

        #[test]
        fn feasible_recommendation_reaches_target(
            sourcing in 1.0..2_000.0f64,
            weight in 0.0..30.0f64,
            ad in 0.0..30_000.0f64,
            target in 5.0..40.0f64,
        ) {
            let mut input = china_naver_input();
            input.sourcing_price = sourcing;
            input.weight = weight;
            input.ad_cost = ad;
            input.customer_shipping_fee = 0.0;
            input.target_margin_percent = target;

            let recommended = compute_margin(&input).recommended_selling_price;
            prop_assert!(recommended > 0.0);

            input.selling_price = recommended;
            let achieved = compute_margin(&input).profit_margin_percent;
            prop_assert!(achieved >= target - 1e-6);
        }
    }
}

#![allow(dead_code)]

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fallback CNY -> KRW rate used until the live fetch answers (or fails).
pub const DEFAULT_EXCHANGE_RATE: f64 = 200.0;

/// Sales channel the product is listed on. Each variant is bound to a base
/// fee rate; `Custom` takes its rate from the user instead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    #[default]
    NaverGeneral,
    NaverSmall,
    NaverLink,
    CoupangGeneral,
    CoupangDigital,
    Others,
    Custom,
}

impl Platform {
    pub const ALL: [Platform; 7] = [
        Platform::NaverGeneral,
        Platform::NaverSmall,
        Platform::NaverLink,
        Platform::CoupangGeneral,
        Platform::CoupangDigital,
        Platform::Others,
        Platform::Custom,
    ];

    /// Base fee as a fraction of revenue. `Custom` is 0 here; the engine
    /// substitutes the user-entered percentage.
    pub const fn base_fee_rate(&self) -> f64 {
        match self {
            Platform::NaverGeneral => 0.0563,
            Platform::NaverSmall => 0.0398,
            Platform::NaverLink => 0.0363,
            Platform::CoupangGeneral => 0.1199,
            Platform::CoupangDigital => 0.066,
            Platform::Others => 0.13,
            Platform::Custom => 0.0,
        }
    }

    /// Marketplaces that charge a separate commission on the buyer-paid
    /// shipping line (the Coupang family).
    pub const fn has_shipping_commission(&self) -> bool {
        matches!(self, Platform::CoupangGeneral | Platform::CoupangDigital)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Platform::NaverGeneral => "네이버 (일반/검색연동) - 5.63%",
            Platform::NaverSmall => "네이버 (영세/초기) - 3.98%",
            Platform::NaverLink => "네이버 (링크결제/SNS) - 3.63%",
            Platform::CoupangGeneral => "쿠팡 (의류/잡화/생활) - 11.99%",
            Platform::CoupangDigital => "쿠팡 (디지털/가전) - 6.6%",
            Platform::Others => "11번가/G마켓 - 13%",
            Platform::Custom => "직접 입력",
        }
    }

    /// Stable key used in share links and persisted state.
    pub fn key(&self) -> &'static str {
        match self {
            Platform::NaverGeneral => "naver_general",
            Platform::NaverSmall => "naver_small",
            Platform::NaverLink => "naver_link",
            Platform::CoupangGeneral => "coupang_general",
            Platform::CoupangDigital => "coupang_digital",
            Platform::Others => "others",
            Platform::Custom => "custom",
        }
    }

    pub fn from_key(key: &str) -> Option<Platform> {
        Platform::ALL.into_iter().find(|p| p.key() == key)
    }
}

/// Customs/logistics profile for a sourcing country.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CountryCustoms {
    /// Display code of the sourcing currency (e.g. "CNY").
    pub currency: &'static str,
    /// How many units of the sourcing currency buy one USD.
    pub to_usd_rate: f64,
    /// De-minimis threshold; declared value above this is dutiable.
    pub threshold_usd: f64,
    /// Flat international shipping rate in KRW per kilogram.
    pub shipping_rate_per_kg: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceCountry {
    #[default]
    China,
    Usa,
    Japan,
    Eu,
}

impl SourceCountry {
    pub const ALL: [SourceCountry; 4] = [
        SourceCountry::China,
        SourceCountry::Usa,
        SourceCountry::Japan,
        SourceCountry::Eu,
    ];

    pub const fn customs(&self) -> CountryCustoms {
        match self {
            SourceCountry::China => CountryCustoms {
                currency: "CNY",
                to_usd_rate: 7.25,
                threshold_usd: 150.0,
                shipping_rate_per_kg: 7000.0,
            },
            SourceCountry::Usa => CountryCustoms {
                currency: "USD",
                to_usd_rate: 1.0,
                threshold_usd: 200.0,
                shipping_rate_per_kg: 12000.0,
            },
            SourceCountry::Japan => CountryCustoms {
                currency: "JPY",
                to_usd_rate: 150.0,
                threshold_usd: 130.0,
                shipping_rate_per_kg: 8000.0,
            },
            SourceCountry::Eu => CountryCustoms {
                currency: "EUR",
                to_usd_rate: 0.92,
                threshold_usd: 150.0,
                shipping_rate_per_kg: 15000.0,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SourceCountry::China => "중국",
            SourceCountry::Usa => "미국",
            SourceCountry::Japan => "일본",
            SourceCountry::Eu => "유럽",
        }
    }

    pub fn flag(&self) -> &'static str {
        match self {
            SourceCountry::China => "🇨🇳",
            SourceCountry::Usa => "🇺🇸",
            SourceCountry::Japan => "🇯🇵",
            SourceCountry::Eu => "🇪🇺",
        }
    }

    /// Stable key used in select widgets and persisted state.
    pub fn key(&self) -> &'static str {
        match self {
            SourceCountry::China => "china",
            SourceCountry::Usa => "usa",
            SourceCountry::Japan => "japan",
            SourceCountry::Eu => "eu",
        }
    }

    pub fn from_key(key: &str) -> Option<SourceCountry> {
        SourceCountry::ALL.into_iter().find(|c| c.key() == key)
    }
}

/// Seller tax classification. VAT is charged on revenue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VatRegime {
    #[default]
    Standard,
    Simplified,
}

impl VatRegime {
    pub const fn rate(&self) -> f64 {
        match self {
            VatRegime::Standard => 0.10,
            VatRegime::Simplified => 0.015,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VatRegime::Standard => "일반과세자 (10%)",
            VatRegime::Simplified => "간이과세자 (1.5%)",
        }
    }
}

/// One immutable snapshot of everything the engine needs. Blank form fields
/// are normalized to 0 before this struct is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationInput {
    /// Item price in the sourcing country's currency.
    pub sourcing_price: f64,
    /// Shipping inside the sourcing country, same currency.
    pub local_shipping: f64,
    /// Actual mass in kilograms.
    pub weight: f64,
    pub use_volumetric: bool,
    /// Box dimensions in centimeters; only read when `use_volumetric` is set.
    pub dim_width: f64,
    pub dim_depth: f64,
    pub dim_height: f64,
    /// Item selling price in KRW.
    pub selling_price: f64,
    pub customer_shipping_fee: f64,
    pub packing_cost: f64,
    pub ad_cost: f64,
    pub domestic_shipping_cost: f64,
    pub platform: Platform,
    /// Only read when `platform` is `Custom`, in percent.
    pub custom_fee_rate_percent: f64,
    pub source_country: SourceCountry,
    /// Sourcing currency -> KRW, live-fetched or user-overridden.
    pub exchange_rate: f64,
    pub vat_regime: VatRegime,
    /// Desired net margin in percent, drives the price recommendation.
    pub target_margin_percent: f64,
}

impl Default for CalculationInput {
    fn default() -> Self {
        Self {
            sourcing_price: 0.0,
            local_shipping: 0.0,
            weight: 0.0,
            use_volumetric: false,
            dim_width: 0.0,
            dim_depth: 0.0,
            dim_height: 0.0,
            selling_price: 0.0,
            customer_shipping_fee: 0.0,
            packing_cost: 0.0,
            ad_cost: 0.0,
            domestic_shipping_cost: 0.0,
            platform: Platform::default(),
            custom_fee_rate_percent: 0.0,
            source_country: SourceCountry::default(),
            exchange_rate: DEFAULT_EXCHANGE_RATE,
            vat_regime: VatRegime::default(),
            target_margin_percent: 30.0,
        }
    }
}

impl CalculationInput {
    /// Amounts, weights and rates are non-negative by contract; anything
    /// below zero (or non-finite) is clamped rather than rejected so the
    /// engine never has an error path.
    pub fn sanitized(&self) -> Self {
        let clamp = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            sourcing_price: clamp(self.sourcing_price),
            local_shipping: clamp(self.local_shipping),
            weight: clamp(self.weight),
            use_volumetric: self.use_volumetric,
            dim_width: clamp(self.dim_width),
            dim_depth: clamp(self.dim_depth),
            dim_height: clamp(self.dim_height),
            selling_price: clamp(self.selling_price),
            customer_shipping_fee: clamp(self.customer_shipping_fee),
            packing_cost: clamp(self.packing_cost),
            ad_cost: clamp(self.ad_cost),
            domestic_shipping_cost: clamp(self.domestic_shipping_cost),
            platform: self.platform,
            custom_fee_rate_percent: clamp(self.custom_fee_rate_percent),
            source_country: self.source_country,
            exchange_rate: clamp(self.exchange_rate),
            vat_regime: self.vat_regime,
            target_margin_percent: clamp(self.target_margin_percent),
        }
    }
}

/// Display bucket for the expense breakdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CostCategory {
    Goods,
    Logistics,
    FeesAndTaxes,
    Profit,
}

impl CostCategory {
    pub fn label(&self) -> &'static str {
        match self {
            CostCategory::Goods => "상품 원가",
            CostCategory::Logistics => "물류/포장",
            CostCategory::FeesAndTaxes => "수수료/세금",
            CostCategory::Profit => "순수익",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CategoryAmount {
    pub category: CostCategory,
    pub amount: f64,
}

/// Everything the engine derives from one input snapshot. Fully determined
/// by `CalculationInput` and the static tables above; no hidden state.
#[derive(Clone, Debug, PartialEq)]
pub struct CalculationResult {
    pub revenue: f64,
    pub cost_of_goods: f64,
    pub resolved_weight: f64,
    pub international_shipping_cost: f64,
    pub logistics_cost: f64,
    pub platform_fee: f64,
    /// Coupang shipping-line commission, already included in `platform_fee`;
    /// tracked on its own because the price solver treats it as a fixed cost.
    pub extra_shipping_commission: f64,
    pub sourcing_usd_equivalent: f64,
    pub duty_tax: f64,
    pub vat: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub profit_margin_percent: f64,
    pub is_loss: bool,
    pub is_high_profit: bool,
    pub breakdown: [CategoryAmount; 4],
    /// Suggested item price for the target margin, 0 when infeasible.
    pub recommended_selling_price: f64,
}

/// Snapshot saved from the calculator; later input changes never touch it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    /// Unix seconds at save time.
    pub saved_at: u64,
    pub sourcing_price: f64,
    pub selling_price: f64,
    pub margin_percent: f64,
    pub net_profit: f64,
}

impl HistoryEntry {
    pub fn capture(input: &CalculationInput, result: &CalculationResult) -> Self {
        let saved_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            id: Uuid::new_v4().to_string(),
            saved_at,
            sourcing_price: input.sourcing_price,
            selling_price: input.selling_price,
            margin_percent: result.profit_margin_percent,
            net_profit: result.net_profit,
        }
    }
}

//! Domain logic for margin calculation lives here.

pub mod app_state;
pub mod comparison;
pub mod engine;
pub mod entities;
pub mod shipping_table;

#[allow(unused_imports)]
pub use app_state::{AppState, CacheResource, CacheTimestamps, PersistedState};
#[allow(unused_imports)]
pub use comparison::{
    best_row, default_products, evaluate_products, next_product_name, ComparisonProduct,
    ComparisonRow, MAX_PRODUCTS, MIN_PRODUCTS,
};
#[allow(unused_imports)]
pub use engine::{compute_margin, resolve_weight, HIGH_PROFIT_MARGIN_PERCENT};
#[allow(unused_imports)]
pub use entities::{
    CalculationInput, CalculationResult, CategoryAmount, CostCategory, CountryCustoms,
    HistoryEntry, Platform, SourceCountry, VatRegime, DEFAULT_EXCHANGE_RATE,
};
#[allow(unused_imports)]
pub use shipping_table::{estimate_cost, tier_for_weight, RateTier, RATE_TIERS};

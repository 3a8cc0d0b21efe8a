pub mod calculator;
pub mod compare;
pub mod rates;
pub mod settings;

pub use calculator::CalculatorPage;
pub use compare::ComparePage;
pub use rates::RatesPage;
pub use settings::SettingsPage;

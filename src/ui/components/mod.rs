pub mod breakdown_bar;
pub mod history_table;
pub mod kpi_card;
pub mod margin_badge;
pub mod toast;

use dioxus::prelude::*;

use crate::ui::format::{format_krw, format_percent};

#[derive(Clone, PartialEq)]
pub struct HistoryRow {
    pub id: String,
    pub date: String,
    pub sourcing_price: f64,
    pub selling_price: f64,
    pub margin_percent: f64,
    pub net_profit: f64,
}

#[component]
pub fn HistoryTable(rows: Vec<HistoryRow>, on_remove: EventHandler<String>) -> Element {
    let is_empty = rows.is_empty();
    rsx! {
        div {
            class: "overflow-x-auto rounded-xl border border-slate-800",
            table {
                class: "min-w-full divide-y divide-slate-800 text-sm",
                thead {
                    class: "text-left text-xs uppercase tracking-wide text-slate-500",
                    tr {
                        th { class: "px-4 py-3 font-medium", "Date" }
                        th { class: "px-4 py-3 font-medium", "소싱가 (CNY)" }
                        th { class: "px-4 py-3 font-medium", "판매가 (KRW)" }
                        th { class: "px-4 py-3 font-medium", "마진율" }
                        th { class: "px-4 py-3 font-medium", "순수익" }
                        th { class: "px-4 py-3" }
                    }
                }
                tbody {
                    class: "divide-y divide-slate-800",
                    for row in rows {
                        HistoryRowView { row, on_remove: on_remove.clone() }
                    }
                    if is_empty {
                        tr {
                            td {
                                class: "px-4 py-6 text-center text-sm text-slate-500",
                                colspan: "6",
                                "저장된 기록이 없습니다."
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn HistoryRowView(row: HistoryRow, on_remove: EventHandler<String>) -> Element {
    let margin_class = if row.margin_percent < 0.0 {
        "px-4 py-3 font-semibold text-rose-300"
    } else {
        "px-4 py-3 font-semibold text-sky-300"
    };
    let profit_class = if row.net_profit < 0.0 {
        "px-4 py-3 font-mono font-semibold text-rose-300"
    } else {
        "px-4 py-3 font-mono font-semibold text-sky-300"
    };
    let remove_id = row.id.clone();
    rsx! {
        tr {
            class: "transition-colors hover:bg-slate-800/40",
            td { class: "px-4 py-3 text-slate-400", "{row.date}" }
            td { class: "px-4 py-3 font-mono text-slate-300", "¥{row.sourcing_price}" }
            td { class: "px-4 py-3 font-mono text-slate-200", {format_krw(row.selling_price)} }
            td { class: margin_class, {format_percent(row.margin_percent)} }
            td { class: profit_class, {format_krw(row.net_profit)} }
            td {
                class: "px-4 py-3 text-right",
                button {
                    class: "rounded-md border border-rose-500/40 px-2 py-1 text-[10px] font-semibold uppercase tracking-wide text-rose-200 hover:bg-rose-500/10",
                    onclick: move |evt| {
                        evt.stop_propagation();
                        on_remove.call(remove_id.clone());
                    },
                    "삭제"
                }
            }
        }
    }
}

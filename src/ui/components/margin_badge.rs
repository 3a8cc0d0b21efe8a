use dioxus::prelude::*;

use crate::ui::format::format_percent;

/// Margin pill colored by outcome: loss, ordinary, or high profit (>= 20%).
#[component]
pub fn MarginBadge(margin_percent: f64, is_loss: bool, is_high_profit: bool) -> Element {
    let color = if is_loss {
        "bg-rose-500/10 text-rose-300 border-rose-500/40"
    } else if is_high_profit {
        "bg-emerald-500/10 text-emerald-300 border-emerald-500/40"
    } else {
        "bg-slate-700/40 text-slate-300 border-slate-600/60"
    };
    let label = format_percent(margin_percent);

    rsx! {
        span {
            class: "inline-flex items-center rounded-full border px-2 py-0.5 text-xs font-semibold {color}",
            "마진율 {label}"
        }
    }
}

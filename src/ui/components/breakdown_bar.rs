use dioxus::prelude::*;

use crate::ui::format::format_krw;

/// One slice of the expense/profit breakdown, already non-negative.
#[derive(Clone, PartialEq)]
pub struct BreakdownSegment {
    pub label: &'static str,
    pub amount: f64,
    /// Tailwind background class for the slice and its legend dot.
    pub color: &'static str,
}

/// Proportional bar replacing the original pie chart: four buckets that sum
/// to revenue when profitable.
#[component]
pub fn BreakdownBar(segments: Vec<BreakdownSegment>) -> Element {
    let total: f64 = segments.iter().map(|s| s.amount.max(0.0)).sum();
    if total <= 0.0 {
        return rsx! {
            p { class: "text-xs text-slate-500", "입력값이 없어 비용 구성을 표시할 수 없습니다." }
        };
    }

    let slices = segments
        .iter()
        .filter(|s| s.amount > 0.0)
        .map(|s| (s.color, s.amount / total * 100.0))
        .collect::<Vec<_>>();
    let legend = segments
        .iter()
        .map(|s| (s.color, s.label, format_krw(s.amount)))
        .collect::<Vec<_>>();

    rsx! {
        div {
            div {
                class: "flex h-3 w-full overflow-hidden rounded-full border border-slate-800",
                for (color, width) in slices {
                    div { class: "{color}", style: "width: {width}%" }
                }
            }
            ul {
                class: "mt-3 space-y-1 text-xs text-slate-400",
                for (color, label, amount) in legend {
                    li {
                        class: "flex items-center justify-between",
                        span {
                            class: "flex items-center gap-2",
                            span { class: "h-2 w-2 rounded-full {color}" }
                            "{label}"
                        }
                        span { class: "font-mono", "{amount}" }
                    }
                }
            }
        }
    }
}

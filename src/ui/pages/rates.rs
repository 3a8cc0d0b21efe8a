use dioxus::prelude::*;

use crate::{
    domain::{estimate_cost, tier_for_weight, RATE_TIERS},
    ui::format::{format_krw, parse_field},
};

/// Reference table of China -> Korea per-kg rates with a quick estimator.
/// Display data only; the calculator prices shipping on its own flat rate.
#[component]
pub fn RatesPage() -> Element {
    let mut weight_input = use_signal(|| "1".to_string());

    // Reference tool floor, same as a courier's minimum billable weight.
    let weight = parse_field(&weight_input()).max(0.1);
    let tier = tier_for_weight(weight);

    let tier_rows = RATE_TIERS
        .iter()
        .map(|rate| {
            let active = weight > rate.min_kg && weight <= rate.max_kg;
            let row_class = if active {
                "bg-amber-500/10 font-medium"
            } else {
                "transition-colors hover:bg-slate-800/40"
            };
            (rate, active, row_class)
        })
        .collect::<Vec<_>>();

    rsx! {
        div { class: "space-y-6",
            div {
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "배송비 참조 테이블" }
                p { class: "mt-1 text-xs text-slate-500", "중국 → 한국 배송 방법별 예상 비용 (kg당)" }
            }

            section {
                class: "space-y-4 rounded-xl border border-slate-800 bg-slate-900/40 p-6",
                div {
                    label { class: "block text-xs font-semibold uppercase text-slate-500", "빠른 계산: 무게 입력 (kg)" }
                    input {
                        class: "mt-1 w-40 rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-right text-sm text-slate-100 focus:border-amber-500 focus:outline-none",
                        inputmode: "decimal",
                        value: weight_input(),
                        oninput: move |evt: FormEvent| weight_input.set(evt.value()),
                    }
                }
                div { class: "grid gap-3 sm:grid-cols-3",
                    QuickEstimate { icon: "✈️", label: "항공", amount: estimate_cost(weight, tier.air), accent: "text-sky-300" }
                    QuickEstimate { icon: "🚢", label: "해운", amount: estimate_cost(weight, tier.sea), accent: "text-emerald-300" }
                    QuickEstimate { icon: "🚚", label: "특송", amount: estimate_cost(weight, tier.express), accent: "text-purple-300" }
                }
            }

            section {
                class: "overflow-x-auto rounded-xl border border-slate-800",
                table {
                    class: "min-w-full divide-y divide-slate-800 text-sm",
                    thead {
                        class: "text-left text-xs uppercase tracking-wide text-slate-500",
                        tr {
                            th { class: "px-4 py-3 font-medium", "무게 구간" }
                            th { class: "px-4 py-3 text-right font-medium", "✈️ 항공" }
                            th { class: "px-4 py-3 text-right font-medium", "🚢 해운" }
                            th { class: "px-4 py-3 text-right font-medium", "🚚 특송" }
                        }
                    }
                    tbody {
                        class: "divide-y divide-slate-800",
                        for (rate, active, row_class) in tier_rows {
                            tr {
                                class: "{row_class}",
                                td { class: "px-4 py-3 text-slate-300",
                                    {format!("{}kg ~ {}kg", rate.min_kg, rate.max_kg)}
                                    if active {
                                        span { class: "ml-2 rounded bg-amber-500 px-1.5 py-0.5 text-[10px] font-semibold text-slate-950", "현재" }
                                    }
                                }
                                td { class: "px-4 py-3 text-right font-mono text-sky-300", {format!("{}원/kg", format_krw(rate.air))} }
                                td { class: "px-4 py-3 text-right font-mono text-emerald-300", {format!("{}원/kg", format_krw(rate.sea))} }
                                td { class: "px-4 py-3 text-right font-mono text-purple-300", {format!("{}원/kg", format_krw(rate.express))} }
                            }
                        }
                    }
                }
            }

            p {
                class: "rounded-lg border border-amber-500/30 bg-amber-500/10 p-3 text-xs text-amber-200",
                "ℹ️ 위 요금은 2026년 기준 대략적인 참고 자료입니다. 실제 배송비는 배대지, 부피무게, 품목에 따라 달라질 수 있습니다."
            }
        }
    }
}

#[component]
fn QuickEstimate(icon: &'static str, label: &'static str, amount: f64, accent: &'static str) -> Element {
    rsx! {
        div {
            class: "rounded-lg border border-slate-800 bg-slate-950 p-3 text-center",
            div { class: "text-lg", "{icon}" }
            div { class: "text-xs text-slate-500", "{label}" }
            div { class: "font-semibold {accent}", {format!("{}원", format_krw(amount))} }
        }
    }
}

use dioxus::prelude::*;

use crate::{
    app::persist_user_state,
    domain::{
        best_row, evaluate_products, next_product_name, AppState, ComparisonProduct,
        ComparisonRow, MAX_PRODUCTS, MIN_PRODUCTS,
    },
    ui::format::{field_text, format_krw, format_percent, parse_field},
};

const CARD_INPUT_CLASS: &str = "w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-right text-sm text-slate-100 focus:border-indigo-500 focus:outline-none";

/// Which numeric column of a comparison card changed.
#[derive(Clone, Copy, PartialEq)]
enum ProductField {
    SourcingPrice,
    Weight,
    SellingPrice,
}

#[component]
pub fn ComparePage() -> Element {
    let state = use_context::<Signal<AppState>>();

    let products = state.with(|st| st.comparison_products.clone());
    let exchange_rate = state.with(|st| st.inputs.exchange_rate);

    let rows = evaluate_products(&products, exchange_rate);
    let best_id = best_row(&rows).map(|row| row.id.clone());
    let rendered_rows = rows
        .into_iter()
        .map(|row| {
            let is_best = best_id.as_deref() == Some(row.id.as_str());
            (row, is_best)
        })
        .collect::<Vec<_>>();

    let on_add = {
        let mut state = state.clone();
        move |_| {
            state.with_mut(|st| {
                if st.comparison_products.len() < MAX_PRODUCTS {
                    let name = next_product_name(st.comparison_products.len());
                    st.comparison_products.push(ComparisonProduct::named(name));
                }
            });
            persist_user_state(&state);
        }
    };

    let on_remove = {
        let mut state = state.clone();
        move |id: String| {
            state.with_mut(|st| {
                if st.comparison_products.len() > MIN_PRODUCTS {
                    st.comparison_products.retain(|p| p.id != id);
                }
            });
            persist_user_state(&state);
        }
    };

    let on_rename = {
        let mut state = state.clone();
        move |(id, name): (String, String)| {
            state.with_mut(|st| {
                if let Some(product) = st.comparison_products.iter_mut().find(|p| p.id == id) {
                    product.name = name;
                }
            });
        }
    };

    let on_update_field = {
        let mut state = state.clone();
        move |(id, field, raw): (String, ProductField, String)| {
            let value = parse_field(&raw);
            state.with_mut(|st| {
                if let Some(product) = st.comparison_products.iter_mut().find(|p| p.id == id) {
                    match field {
                        ProductField::SourcingPrice => product.sourcing_price = value,
                        ProductField::Weight => product.weight = value,
                        ProductField::SellingPrice => product.selling_price = value,
                    }
                }
            });
        }
    };

    let can_add = products.len() < MAX_PRODUCTS;
    let can_remove = products.len() > MIN_PRODUCTS;

    rsx! {
        div { class: "space-y-6",
            div { class: "flex items-center justify-between",
                div {
                    h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "다중 상품 비교" }
                    p { class: "mt-1 text-xs text-slate-500",
                        {format!("현재 환율 {} 적용 · 비교는 기본 네이버 수수료(5.63%) 기준입니다.", format_krw(exchange_rate))}
                    }
                }
                if can_add {
                    button {
                        class: "rounded-lg bg-indigo-500 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-white hover:bg-indigo-400",
                        onclick: on_add,
                        "+ 상품 추가"
                    }
                }
            }

            section {
                class: "grid gap-4 sm:grid-cols-2 lg:grid-cols-3 xl:grid-cols-5",
                for product in products.iter().cloned() {
                    ProductCard {
                        product,
                        can_remove,
                        on_remove: on_remove.clone(),
                        on_rename: on_rename.clone(),
                        on_update_field: on_update_field.clone(),
                    }
                }
            }

            section {
                class: "overflow-x-auto rounded-xl border border-slate-800",
                table {
                    class: "min-w-full divide-y divide-slate-800 text-sm",
                    thead {
                        class: "text-left text-xs uppercase tracking-wide text-slate-500",
                        tr {
                            th { class: "px-4 py-3 font-medium", "상품" }
                            th { class: "px-4 py-3 text-right font-medium", "원가 (KRW)" }
                            th { class: "px-4 py-3 text-right font-medium", "배송비" }
                            th { class: "px-4 py-3 text-right font-medium", "수수료" }
                            th { class: "px-4 py-3 text-right font-medium", "순수익" }
                            th { class: "px-4 py-3 text-right font-medium", "마진율" }
                        }
                    }
                    tbody {
                        class: "divide-y divide-slate-800",
                        for (row, is_best) in rendered_rows {
                            ComparisonRowView { row, is_best }
                        }
                    }
                }
            }

            p { class: "text-center text-xs text-slate-500",
                "* 상세 계산(관세·부가세·광고비 포함)은 메인 계산기를 이용하세요."
            }
        }
    }
}

#[component]
fn ComparisonRowView(row: ComparisonRow, is_best: bool) -> Element {
    let is_loss = row.is_loss();
    let row_class = if is_best {
        "bg-indigo-500/10"
    } else {
        "transition-colors hover:bg-slate-800/40"
    };
    let margin_class = if is_loss {
        "px-4 py-3 text-right font-semibold text-rose-300"
    } else if row.margin_percent >= 20.0 {
        "px-4 py-3 text-right font-semibold text-emerald-300"
    } else {
        "px-4 py-3 text-right font-semibold text-slate-200"
    };
    let profit_class = if is_loss {
        "px-4 py-3 text-right font-mono font-semibold text-rose-300"
    } else {
        "px-4 py-3 text-right font-mono font-semibold text-sky-300"
    };

    rsx! {
        tr {
            class: "{row_class}",
            td { class: "px-4 py-3 font-medium text-slate-200",
                {row.name.clone()}
                if is_best {
                    span { class: "ml-2 rounded bg-indigo-500 px-1.5 py-0.5 text-[10px] font-semibold text-white", "BEST" }
                }
            }
            td { class: "px-4 py-3 text-right font-mono text-slate-400", {format_krw(row.cost_krw)} }
            td { class: "px-4 py-3 text-right font-mono text-slate-400", {format_krw(row.shipping_krw)} }
            td { class: "px-4 py-3 text-right font-mono text-slate-400", {format_krw(row.platform_fee)} }
            td { class: "{profit_class}", {format_krw(row.net_profit)} }
            td { class: "{margin_class}", {format_percent(row.margin_percent)} }
        }
    }
}

#[component]
fn ProductCard(
    product: ComparisonProduct,
    can_remove: bool,
    on_remove: EventHandler<String>,
    on_rename: EventHandler<(String, String)>,
    on_update_field: EventHandler<(String, ProductField, String)>,
) -> Element {
    let remove_id = product.id.clone();
    let rename_id = product.id.clone();
    let sourcing_id = product.id.clone();
    let weight_id = product.id.clone();
    let selling_id = product.id.clone();

    rsx! {
        div {
            class: "relative space-y-2 rounded-xl border border-slate-800 bg-slate-900/40 p-4",
            if can_remove {
                button {
                    class: "absolute right-2 top-2 text-xs text-slate-600 transition hover:text-rose-400",
                    onclick: move |_| on_remove.call(remove_id.clone()),
                    "✕"
                }
            }
            input {
                class: "w-full bg-transparent text-sm font-semibold text-slate-200 focus:outline-none",
                value: product.name.clone(),
                placeholder: "상품명",
                oninput: move |evt: FormEvent| on_rename.call((rename_id.clone(), evt.value())),
            }
            input {
                class: CARD_INPUT_CLASS,
                inputmode: "decimal",
                placeholder: "소싱가 (CNY)",
                value: field_text(product.sourcing_price),
                oninput: move |evt: FormEvent| {
                    on_update_field.call((sourcing_id.clone(), ProductField::SourcingPrice, evt.value()))
                },
            }
            input {
                class: CARD_INPUT_CLASS,
                inputmode: "decimal",
                placeholder: "무게 (kg)",
                value: field_text(product.weight),
                oninput: move |evt: FormEvent| {
                    on_update_field.call((weight_id.clone(), ProductField::Weight, evt.value()))
                },
            }
            input {
                class: CARD_INPUT_CLASS,
                inputmode: "decimal",
                placeholder: "판매가 (KRW)",
                value: field_text(product.selling_price),
                oninput: move |evt: FormEvent| {
                    on_update_field.call((selling_id.clone(), ProductField::SellingPrice, evt.value()))
                },
            }
        }
    }
}

use dioxus::prelude::*;

use crate::{
    app::{persist_user_state, request_rate_fetch},
    domain::{
        compute_margin, AppState, CostCategory, HistoryEntry, Platform, SourceCountry, VatRegime,
    },
    ui::{
        components::{
            breakdown_bar::{BreakdownBar, BreakdownSegment},
            history_table::{HistoryRow, HistoryTable},
            kpi_card::KpiCard,
            margin_badge::MarginBadge,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        format::{field_text, format_krw, format_unix_date, parse_field, trim_num},
    },
    util::{
        export::export_history,
        share::{apply_share_link, share_url},
    },
};

const INPUT_CLASS: &str = "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-right text-sm text-slate-100 focus:border-sky-500 focus:outline-none";
const SELECT_CLASS: &str = "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-sky-500 focus:outline-none";
const LABEL_CLASS: &str = "block text-xs font-semibold uppercase text-slate-500";

#[component]
pub fn CalculatorPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let rate_request = use_context::<Signal<Option<SourceCountry>>>();

    let initial = state.peek().inputs.clone();
    let mut sourcing_price_input = use_signal(|| field_text(initial.sourcing_price));
    let mut local_shipping_input = use_signal(|| field_text(initial.local_shipping));
    let mut weight_input = use_signal(|| field_text(initial.weight));
    let mut dim_width_input = use_signal(|| field_text(initial.dim_width));
    let mut dim_depth_input = use_signal(|| field_text(initial.dim_depth));
    let mut dim_height_input = use_signal(|| field_text(initial.dim_height));
    let mut packing_cost_input = use_signal(|| field_text(initial.packing_cost));
    let mut domestic_shipping_input = use_signal(|| field_text(initial.domestic_shipping_cost));
    let mut selling_price_input = use_signal(|| field_text(initial.selling_price));
    let mut customer_fee_input = use_signal(|| field_text(initial.customer_shipping_fee));
    let mut ad_cost_input = use_signal(|| field_text(initial.ad_cost));
    let mut custom_fee_input = use_signal(|| field_text(initial.custom_fee_rate_percent));
    let mut share_link_output = use_signal(String::new);
    let mut share_link_input = use_signal(String::new);

    // Recompute on every change: the engine is pure arithmetic on a snapshot.
    let inputs = state.with(|st| st.inputs.clone());
    let result = compute_margin(&inputs);
    let rate_live = state.with(|st| st.rate_live);
    let history = state.with(|st| st.history.clone());

    let customs = inputs.source_country.customs();
    let recommended = result.recommended_selling_price;
    let volumetric_applied = inputs.use_volumetric && result.resolved_weight > inputs.weight;

    let segments = result
        .breakdown
        .iter()
        .map(|bucket| BreakdownSegment {
            label: bucket.category.label(),
            amount: bucket.amount,
            color: category_color(bucket.category),
        })
        .collect::<Vec<_>>();

    let history_rows = history
        .iter()
        .map(|entry| HistoryRow {
            id: entry.id.clone(),
            date: format_unix_date(entry.saved_at),
            sourcing_price: entry.sourcing_price,
            selling_price: entry.selling_price,
            margin_percent: entry.margin_percent,
            net_profit: entry.net_profit,
        })
        .collect::<Vec<_>>();
    let history_is_empty = history.is_empty();

    let on_save_history = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            let (snapshot, result) = state.with(|st| {
                let snapshot = st.inputs.clone();
                let result = compute_margin(&snapshot);
                (snapshot, result)
            });
            let entry = HistoryEntry::capture(&snapshot, &result);
            state.with_mut(|st| st.push_history(entry));
            persist_user_state(&state);
            push_toast(toasts.clone(), ToastKind::Success, "계산 기록을 저장했습니다.");
        }
    };

    let on_remove_history = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        move |id: String| {
            state.with_mut(|st| st.remove_history(&id));
            persist_user_state(&state);
            push_toast(toasts.clone(), ToastKind::Info, "기록을 삭제했습니다.");
        }
    };

    let on_export_csv = {
        let state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            let entries = state.with(|st| st.history.clone());
            match export_history(&entries) {
                Ok(path) => push_toast(
                    toasts.clone(),
                    ToastKind::Success,
                    format!("CSV 저장 완료: {}", path.display()),
                ),
                Err(err) => push_toast(
                    toasts.clone(),
                    ToastKind::Warning,
                    format!("CSV 내보내기 실패: {err}"),
                ),
            }
        }
    };

    let on_make_share_link = {
        let state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            let url = share_url(&state.with(|st| st.inputs.clone()));
            share_link_output.set(url);
            push_toast(
                toasts.clone(),
                ToastKind::Info,
                "공유 링크를 생성했습니다. 아래 링크를 선택해 복사하세요.",
            );
        }
    };

    let on_import_share_link = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            let raw = share_link_input();
            let mut imported = state.with(|st| st.inputs.clone());
            if apply_share_link(&raw, &mut imported) {
                state.with_mut(|st| st.inputs = imported.clone());
                sourcing_price_input.set(field_text(imported.sourcing_price));
                weight_input.set(field_text(imported.weight));
                selling_price_input.set(field_text(imported.selling_price));
                customer_fee_input.set(field_text(imported.customer_shipping_fee));
                ad_cost_input.set(field_text(imported.ad_cost));
                share_link_input.set(String::new());
                persist_user_state(&state);
                push_toast(toasts.clone(), ToastKind::Success, "공유 링크를 불러왔습니다.");
            } else {
                push_toast(toasts.clone(), ToastKind::Error, "공유 링크를 해석하지 못했습니다.");
            }
        }
    };

    let on_apply_recommended = {
        let mut state = state.clone();
        move |_| {
            if recommended > 0.0 {
                selling_price_input.set(trim_num(recommended));
                state.with_mut(|st| st.inputs.selling_price = recommended);
            }
        }
    };

    rsx! {
        div { class: "space-y-8",
            section {
                class: "grid gap-6 lg:grid-cols-12",

                // --- Column 1: Settings ---
                div {
                    class: "space-y-6 rounded-xl border border-slate-800 bg-slate-900/40 p-6 lg:col-span-3",
                    h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "기본 설정" }

                    div {
                        label { class: LABEL_CLASS, "판매 플랫폼" }
                        select {
                            class: SELECT_CLASS,
                            value: inputs.platform.key(),
                            onchange: {
                                let mut state = state.clone();
                                move |evt: FormEvent| {
                                    if let Some(platform) = Platform::from_key(&evt.value()) {
                                        state.with_mut(|st| st.inputs.platform = platform);
                                        persist_user_state(&state);
                                    }
                                }
                            },
                            for platform in Platform::ALL {
                                option {
                                    value: platform.key(),
                                    selected: platform == inputs.platform,
                                    {platform.label()}
                                }
                            }
                        }
                        if inputs.platform == Platform::Custom {
                            input {
                                class: INPUT_CLASS,
                                inputmode: "decimal",
                                placeholder: "수수료율 (%)",
                                value: custom_fee_input(),
                                oninput: {
                                    let mut state = state.clone();
                                    move |evt: FormEvent| {
                                        custom_fee_input.set(evt.value());
                                        state.with_mut(|st| {
                                            st.inputs.custom_fee_rate_percent = parse_field(&evt.value())
                                        });
                                    }
                                },
                            }
                        }
                    }

                    div {
                        label { class: LABEL_CLASS, "소싱 국가" }
                        select {
                            class: SELECT_CLASS,
                            value: inputs.source_country.key(),
                            onchange: {
                                let mut state = state.clone();
                                let rate_request = rate_request.clone();
                                move |evt: FormEvent| {
                                    if let Some(country) = SourceCountry::from_key(&evt.value()) {
                                        state.with_mut(|st| st.inputs.source_country = country);
                                        persist_user_state(&state);
                                        request_rate_fetch(state.clone(), rate_request.clone(), country);
                                    }
                                }
                            },
                            for country in SourceCountry::ALL {
                                option {
                                    value: country.key(),
                                    selected: country == inputs.source_country,
                                    {format!(
                                        "{} {} ({}) - ${} 면세",
                                        country.flag(),
                                        country.name(),
                                        country.customs().currency,
                                        country.customs().threshold_usd
                                    )}
                                }
                            }
                        }
                        p { class: "mt-2 rounded bg-slate-900/60 p-2 text-[10px] text-slate-500",
                            {format!(
                                "💡 {} {} 배송비: ₩{}/kg",
                                customs.currency,
                                inputs.source_country.name(),
                                format_krw(customs.shipping_rate_per_kg)
                            )}
                        }
                    }

                    div {
                        div { class: "flex items-center justify-between",
                            label { class: LABEL_CLASS, {format!("적용 환율 ({})", customs.currency)} }
                            if rate_live {
                                span { class: "text-[10px] font-medium text-emerald-400", "● 실시간 연동됨" }
                            }
                        }
                        input {
                            class: INPUT_CLASS,
                            inputmode: "decimal",
                            value: trim_num(inputs.exchange_rate),
                            oninput: {
                                let mut state = state.clone();
                                move |evt: FormEvent| {
                                    // A manual edit overrides the live feed.
                                    state.with_mut(|st| {
                                        st.inputs.exchange_rate = parse_field(&evt.value());
                                        st.rate_live = false;
                                    });
                                }
                            },
                        }
                    }

                    div {
                        label { class: LABEL_CLASS, "목표 마진율 (%)" }
                        input {
                            class: INPUT_CLASS,
                            inputmode: "decimal",
                            value: trim_num(inputs.target_margin_percent),
                            oninput: {
                                let mut state = state.clone();
                                move |evt: FormEvent| {
                                    state.with_mut(|st| {
                                        st.inputs.target_margin_percent = parse_field(&evt.value())
                                    });
                                }
                            },
                        }
                    }

                    div {
                        label { class: LABEL_CLASS, "사업자 유형" }
                        div { class: "mt-2 flex flex-col gap-2",
                            for regime in [VatRegime::Standard, VatRegime::Simplified] {
                                label {
                                    class: "flex cursor-pointer items-center gap-2 rounded-lg border border-slate-800 bg-slate-950 p-3 text-xs text-slate-300 hover:border-sky-700",
                                    input {
                                        r#type: "radio",
                                        name: "vat",
                                        checked: inputs.vat_regime == regime,
                                        onclick: {
                                            let mut state = state.clone();
                                            move |_| {
                                                state.with_mut(|st| st.inputs.vat_regime = regime);
                                                persist_user_state(&state);
                                            }
                                        },
                                    }
                                    span { class: "font-semibold", {regime.label()} }
                                }
                            }
                        }
                    }
                }

                // --- Column 2: Costs & Revenue ---
                div {
                    class: "space-y-6 lg:col-span-6",

                    div {
                        class: "space-y-4 rounded-xl border border-slate-800 bg-slate-900/40 p-6",
                        h3 { class: "text-sm font-semibold text-slate-200",
                            {format!("📦 상품 소싱 ({})", customs.currency)}
                        }
                        div { class: "grid gap-4 sm:grid-cols-2",
                            div {
                                label { class: LABEL_CLASS, "상품 단가" }
                                input {
                                    class: INPUT_CLASS,
                                    inputmode: "decimal",
                                    value: sourcing_price_input(),
                                    oninput: {
                                        let mut state = state.clone();
                                        move |evt: FormEvent| {
                                            sourcing_price_input.set(evt.value());
                                            state.with_mut(|st| {
                                                st.inputs.sourcing_price = parse_field(&evt.value())
                                            });
                                        }
                                    },
                                }
                            }
                            div {
                                label { class: LABEL_CLASS, "현지 배송비" }
                                input {
                                    class: INPUT_CLASS,
                                    inputmode: "decimal",
                                    value: local_shipping_input(),
                                    oninput: {
                                        let mut state = state.clone();
                                        move |evt: FormEvent| {
                                            local_shipping_input.set(evt.value());
                                            state.with_mut(|st| {
                                                st.inputs.local_shipping = parse_field(&evt.value())
                                            });
                                        }
                                    },
                                }
                            }
                        }
                    }

                    div {
                        class: "space-y-4 rounded-xl border border-slate-800 bg-slate-900/40 p-6",
                        div { class: "flex items-center justify-between",
                            h3 { class: "text-sm font-semibold text-slate-200", "🚚 배송 / 물류비 (KRW)" }
                            label {
                                class: "flex cursor-pointer items-center gap-2 text-xs text-slate-400",
                                input {
                                    r#type: "checkbox",
                                    checked: inputs.use_volumetric,
                                    onclick: {
                                        let mut state = state.clone();
                                        move |_| {
                                            state.with_mut(|st| {
                                                st.inputs.use_volumetric = !st.inputs.use_volumetric
                                            });
                                        }
                                    },
                                }
                                span { class: "font-medium", "부피무게 체크 (CBM)" }
                            }
                        }

                        div { class: "flex items-center gap-2",
                            div { class: "flex-1",
                                label { class: LABEL_CLASS, "실무게 (kg)" }
                                input {
                                    class: INPUT_CLASS,
                                    inputmode: "decimal",
                                    value: weight_input(),
                                    oninput: {
                                        let mut state = state.clone();
                                        move |evt: FormEvent| {
                                            weight_input.set(evt.value());
                                            state.with_mut(|st| st.inputs.weight = parse_field(&evt.value()));
                                        }
                                    },
                                }
                            }
                            if volumetric_applied {
                                span {
                                    class: "rounded bg-amber-500/10 px-2 py-1 text-xs font-semibold text-amber-300",
                                    {format!("CBM {:.1}kg 적용", result.resolved_weight)}
                                }
                            }
                        }

                        if inputs.use_volumetric {
                            div {
                                class: "grid grid-cols-3 gap-2 rounded-lg border border-dashed border-slate-700 bg-slate-950 p-3",
                                input {
                                    class: "rounded border border-slate-700 bg-slate-900 p-1 text-center text-xs text-slate-100",
                                    inputmode: "decimal",
                                    placeholder: "가로(cm)",
                                    value: dim_width_input(),
                                    oninput: {
                                        let mut state = state.clone();
                                        move |evt: FormEvent| {
                                            dim_width_input.set(evt.value());
                                            state.with_mut(|st| st.inputs.dim_width = parse_field(&evt.value()));
                                        }
                                    },
                                }
                                input {
                                    class: "rounded border border-slate-700 bg-slate-900 p-1 text-center text-xs text-slate-100",
                                    inputmode: "decimal",
                                    placeholder: "세로(cm)",
                                    value: dim_depth_input(),
                                    oninput: {
                                        let mut state = state.clone();
                                        move |evt: FormEvent| {
                                            dim_depth_input.set(evt.value());
                                            state.with_mut(|st| st.inputs.dim_depth = parse_field(&evt.value()));
                                        }
                                    },
                                }
                                input {
                                    class: "rounded border border-slate-700 bg-slate-900 p-1 text-center text-xs text-slate-100",
                                    inputmode: "decimal",
                                    placeholder: "높이(cm)",
                                    value: dim_height_input(),
                                    oninput: {
                                        let mut state = state.clone();
                                        move |evt: FormEvent| {
                                            dim_height_input.set(evt.value());
                                            state.with_mut(|st| st.inputs.dim_height = parse_field(&evt.value()));
                                        }
                                    },
                                }
                            }
                        }

                        div { class: "grid gap-4 sm:grid-cols-2",
                            div {
                                label { class: LABEL_CLASS, "창고 포장비" }
                                input {
                                    class: INPUT_CLASS,
                                    inputmode: "decimal",
                                    value: packing_cost_input(),
                                    oninput: {
                                        let mut state = state.clone();
                                        move |evt: FormEvent| {
                                            packing_cost_input.set(evt.value());
                                            state.with_mut(|st| st.inputs.packing_cost = parse_field(&evt.value()));
                                        }
                                    },
                                }
                            }
                            div {
                                label { class: LABEL_CLASS, "국내 택배비" }
                                input {
                                    class: INPUT_CLASS,
                                    inputmode: "decimal",
                                    value: domestic_shipping_input(),
                                    oninput: {
                                        let mut state = state.clone();
                                        move |evt: FormEvent| {
                                            domestic_shipping_input.set(evt.value());
                                            state.with_mut(|st| {
                                                st.inputs.domestic_shipping_cost = parse_field(&evt.value())
                                            });
                                        }
                                    },
                                }
                            }
                        }
                    }

                    div {
                        class: "space-y-4 rounded-xl border border-sky-900/40 bg-sky-950/20 p-6",
                        h3 { class: "text-sm font-semibold text-sky-200", "💰 매출 및 마케팅 (KRW)" }
                        div { class: "grid gap-4 sm:grid-cols-2",
                            div {
                                label { class: LABEL_CLASS, "판매 가격" }
                                input {
                                    class: INPUT_CLASS,
                                    inputmode: "decimal",
                                    value: selling_price_input(),
                                    oninput: {
                                        let mut state = state.clone();
                                        move |evt: FormEvent| {
                                            selling_price_input.set(evt.value());
                                            state.with_mut(|st| st.inputs.selling_price = parse_field(&evt.value()));
                                        }
                                    },
                                }
                                if recommended > 0.0 {
                                    button {
                                        class: "mt-2 w-full rounded-lg border border-dashed border-sky-800 bg-slate-950 p-2 text-left text-xs text-slate-400 transition hover:bg-sky-900/30 hover:text-sky-200",
                                        onclick: on_apply_recommended,
                                        span {
                                            "✨ 마진 "
                                            span { class: "font-semibold text-sky-300", {trim_num(inputs.target_margin_percent)} "%" }
                                            " 기준 권장가:"
                                        }
                                        span { class: "block font-semibold text-sky-300",
                                            {format!("{}원 (클릭 시 적용)", format_krw(recommended))}
                                        }
                                    }
                                }
                            }
                            div {
                                label { class: LABEL_CLASS, "고객부담 배송비" }
                                input {
                                    class: INPUT_CLASS,
                                    inputmode: "decimal",
                                    value: customer_fee_input(),
                                    oninput: {
                                        let mut state = state.clone();
                                        move |evt: FormEvent| {
                                            customer_fee_input.set(evt.value());
                                            state.with_mut(|st| {
                                                st.inputs.customer_shipping_fee = parse_field(&evt.value())
                                            });
                                        }
                                    },
                                }
                            }
                            div { class: "sm:col-span-2",
                                label { class: LABEL_CLASS, "광고비" }
                                input {
                                    class: INPUT_CLASS,
                                    inputmode: "decimal",
                                    value: ad_cost_input(),
                                    oninput: {
                                        let mut state = state.clone();
                                        move |evt: FormEvent| {
                                            ad_cost_input.set(evt.value());
                                            state.with_mut(|st| st.inputs.ad_cost = parse_field(&evt.value()));
                                        }
                                    },
                                }
                            }
                        }
                    }
                }

                // --- Column 3: Analysis ---
                div {
                    class: "space-y-4 lg:col-span-3",
                    KpiCard {
                        title: "순수익 (KRW)".to_string(),
                        value: format_krw(result.net_profit),
                        description: Some(format!("총 매출 {}원 기준", format_krw(result.revenue))),
                    }
                    div { class: "flex justify-center",
                        MarginBadge {
                            margin_percent: result.profit_margin_percent,
                            is_loss: result.is_loss,
                            is_high_profit: result.is_high_profit,
                        }
                    }

                    div {
                        class: "rounded-xl border border-slate-800 bg-slate-900/40 p-4",
                        h3 { class: "mb-3 text-xs font-semibold uppercase tracking-wide text-slate-500", "비용 구성" }
                        BreakdownBar { segments: segments }
                    }

                    div {
                        class: "space-y-2 rounded-xl border border-slate-800 bg-slate-900/40 p-4 text-xs",
                        SummaryRow { label: "(+) 총 매출", value: result.revenue }
                        SummaryRow { label: "(-) 상품 원가", value: result.cost_of_goods }
                        SummaryRow { label: "(-) 물류비", value: result.logistics_cost }
                        SummaryRow { label: "(-) 수수료 (마켓)", value: result.platform_fee }
                        SummaryRow { label: "(-) 세금 (관/부가세)", value: result.duty_tax + result.vat }
                        SummaryRow { label: "(-) 광고비", value: inputs.ad_cost }
                        if result.duty_tax > 0.0 {
                            p { class: "pt-1 text-[10px] text-amber-300",
                                {format!(
                                    "⚠️ 소싱가 ${:.0} > 면세 한도 ${:.0} — 관·부가세가 부과됩니다.",
                                    result.sourcing_usd_equivalent,
                                    customs.threshold_usd
                                )}
                            }
                        }
                    }

                    button {
                        class: "w-full rounded-lg bg-sky-600 py-2 text-sm font-semibold text-white transition hover:bg-sky-500",
                        onclick: on_save_history,
                        "💾 기록 저장"
                    }
                }
            }

            // --- Share link ---
            section {
                class: "space-y-3 rounded-xl border border-slate-800 bg-slate-900/40 p-6",
                div { class: "flex items-center justify-between",
                    h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "계산 공유" }
                    button {
                        class: "rounded-lg border border-sky-500/40 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-sky-200 hover:bg-sky-500/10",
                        onclick: on_make_share_link,
                        "🔗 공유 링크 만들기"
                    }
                }
                if !share_link_output().is_empty() {
                    input {
                        class: "w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 font-mono text-xs text-sky-200",
                        readonly: true,
                        value: share_link_output(),
                    }
                }
                div { class: "flex gap-3",
                    input {
                        class: "flex-1 rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-xs text-slate-100 focus:border-sky-500 focus:outline-none",
                        placeholder: "받은 공유 링크 붙여넣기",
                        value: share_link_input(),
                        oninput: move |evt: FormEvent| share_link_input.set(evt.value()),
                    }
                    button {
                        class: "rounded-lg border border-slate-600 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-slate-200 hover:bg-slate-800",
                        onclick: on_import_share_link,
                        "불러오기"
                    }
                }
            }

            // --- History ---
            section {
                class: "space-y-4",
                div { class: "flex items-center justify-between",
                    h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "최근 계산 기록" }
                    if !history_is_empty {
                        button {
                            class: "rounded-lg border border-emerald-500/40 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-emerald-200 hover:bg-emerald-500/10",
                            onclick: on_export_csv,
                            "⬇ CSV 내보내기"
                        }
                    }
                }
                HistoryTable { rows: history_rows, on_remove: on_remove_history }
            }
        }
    }
}

#[component]
fn SummaryRow(label: &'static str, value: f64) -> Element {
    rsx! {
        div { class: "flex items-center justify-between text-slate-400",
            span { "{label}" }
            span { class: "font-mono", {format_krw(value)} }
        }
    }
}

fn category_color(category: CostCategory) -> &'static str {
    match category {
        CostCategory::Goods => "bg-sky-500",
        CostCategory::Logistics => "bg-slate-400",
        CostCategory::FeesAndTaxes => "bg-rose-500",
        CostCategory::Profit => "bg-emerald-500",
    }
}


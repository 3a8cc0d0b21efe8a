use dioxus::prelude::*;

use crate::{
    app::persist_user_state,
    domain::{AppState, CacheResource, SourceCountry},
    ui::{
        components::toast::{push_toast, ToastKind, ToastMessage},
        format::{humanize_age, trim_num},
    },
    util::version::{check_for_update, version_label, APP_NAME, APP_REPO_URL},
};

#[component]
pub fn SettingsPage() -> Element {
    let state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let rate_request = use_context::<Signal<Option<SourceCountry>>>();

    let inputs = state.with(|st| st.inputs.clone());
    let rate_live = state.with(|st| st.rate_live);
    let currency = inputs.source_country.customs().currency;

    let cache_entries = state.with(|st| {
        st.cache
            .iter()
            .map(|(resource, time)| (cache_label(resource), humanize_age(*time)))
            .collect::<Vec<_>>()
    });

    let update_info = use_resource(|| async move { check_for_update().await });

    let on_refresh_rate = {
        let state = state.clone();
        let toasts = toasts.clone();
        let mut rate_request = rate_request.clone();
        move |_| {
            let country = state.with(|st| st.inputs.source_country);
            rate_request.set(Some(country));
            push_toast(
                toasts.clone(),
                ToastKind::Info,
                format!("{} 환율을 새로 가져옵니다...", country.customs().currency),
            );
        }
    };

    let on_clear_cache = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            state.with_mut(|st| st.cache.clear());
            push_toast(
                toasts.clone(),
                ToastKind::Info,
                "캐시 타임스탬프를 비웠습니다. 다음 조회 시 새로 가져옵니다.",
            );
        }
    };

    let on_reset_data = {
        let mut state = state.clone();
        let toasts = toasts.clone();
        move |_| {
            state.set(AppState::default());
            persist_user_state(&state);
            push_toast(
                toasts.clone(),
                ToastKind::Warning,
                "저장된 입력값과 기록을 모두 초기화했습니다.",
            );
        }
    };

    let update_status = match &*update_info.read() {
        Some(Ok(info)) => info.to_string(),
        Some(Err(err)) => format!("업데이트 확인 실패: {err}"),
        None => "업데이트 확인 중...".to_string(),
    };

    rsx! {
        div { class: "space-y-8",
            section {
                class: "rounded-xl border border-slate-800 bg-slate-900/40 p-6",
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "환율" }
                div { class: "mt-4 flex items-center justify-between rounded-lg border border-slate-800 bg-slate-950 px-4 py-3",
                    div {
                        p { class: "text-xs text-slate-500", {format!("현재 적용 환율 ({currency} → KRW)")} }
                        p { class: "mt-1 text-xl font-semibold text-slate-100", {trim_num(inputs.exchange_rate)} }
                    }
                    if rate_live {
                        span { class: "rounded-full border border-emerald-500/30 bg-emerald-500/10 px-3 py-1 text-xs text-emerald-300", "실시간" }
                    } else {
                        span { class: "rounded-full border border-slate-700 bg-slate-800/60 px-3 py-1 text-xs text-slate-400", "수동 / 기본값" }
                    }
                }
                button {
                    class: "mt-4 rounded-lg border border-sky-500/40 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-sky-200 hover:bg-sky-500/10",
                    onclick: on_refresh_rate,
                    "환율 새로고침"
                }
            }

            section {
                class: "rounded-xl border border-slate-800 bg-slate-900/40 p-6",
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "캐시 상태" }
                if cache_entries.is_empty() {
                    p { class: "mt-3 text-sm text-slate-400", "아직 가져온 데이터가 없습니다." }
                } else {
                    ul {
                        class: "mt-3 space-y-2 text-sm text-slate-300",
                        for (label, age) in cache_entries {
                            li { class: "flex items-center justify-between rounded-lg border border-slate-800 bg-slate-900/60 px-3 py-2",
                                span { "{label}" }
                                span { class: "text-xs text-slate-500", "{age}" }
                            }
                        }
                    }
                }
                button {
                    class: "mt-4 rounded-lg border border-amber-500/40 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-amber-200 hover:bg-amber-500/10",
                    onclick: on_clear_cache,
                    "캐시 타임스탬프 비우기"
                }
            }

            section {
                class: "rounded-xl border border-slate-800 bg-slate-900/40 p-6",
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "데이터 관리" }
                p { class: "mt-2 text-sm text-slate-400", "입력값, 비교 상품, 계산 기록이 로컬에 저장됩니다." }
                button {
                    class: "mt-3 rounded-lg border border-rose-500/40 px-4 py-2 text-xs font-semibold uppercase tracking-wide text-rose-200 hover:bg-rose-500/10",
                    onclick: on_reset_data,
                    "저장 데이터 초기화"
                }
            }

            section {
                class: "flex flex-col items-center gap-3 rounded-xl border border-slate-800 bg-slate-900/40 p-6 text-center text-slate-400",
                h2 { class: "text-sm font-semibold uppercase tracking-wide text-slate-500", "정보" }
                p { class: "text-sm", {format!("{APP_NAME} {}", version_label())} }
                p { class: "text-xs text-slate-500", "{update_status}" }
                a {
                    href: APP_REPO_URL,
                    target: "_blank",
                    rel: "noreferrer",
                    class: "text-xs text-sky-400 transition hover:text-sky-300",
                    {APP_REPO_URL}
                }
                p {
                    class: "text-xs text-slate-500",
                    "환율 데이터 제공: open.er-api.com (Exchange Rate API). 모든 계산 결과는 참고용 추정치입니다."
                }
            }
        }
    }
}

fn cache_label(resource: &CacheResource) -> String {
    match resource {
        CacheResource::ExchangeRate(country) => {
            format!("환율 ({})", country.customs().currency)
        }
    }
}

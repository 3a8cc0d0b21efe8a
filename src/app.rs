use std::time::Duration;

use dioxus::{prelude::*, signals::Signal};

use crate::{
    domain::{AppState, CacheResource, SourceCountry},
    infra::rates::{CacheStatus, RateClient},
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::{CalculatorPage, ComparePage, RatesPage, SettingsPage},
        shell::Shell,
    },
    util::{
        assets,
        persistence::{load_persisted_state, save_persisted_state},
    },
};

/// Shared TTL for the cached exchange rate before a refresh is triggered.
pub const CACHE_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    #[route("/calculator")]
    Calculator {},
    #[route("/compare")]
    Compare {},
    #[route("/rates")]
    Rates {},
    #[route("/settings")]
    Settings {},
}

#[component]
pub fn App() -> Element {
    let state = use_signal(AppState::default);
    use_hook({
        let mut state = state.clone();
        move || {
            if let Some(saved) = load_persisted_state() {
                state.with_mut(|st| st.apply_persisted(saved));
            }
        }
    });
    use_context_provider(|| state.clone());

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts.clone());

    // Rate fetch trigger shared across routes; pre-armed for the restored
    // sourcing country so the rate goes live right after launch.
    let rate_request = use_signal(|| Some(state.peek().inputs.source_country));
    use_context_provider(|| rate_request.clone());

    let _rates = use_resource({
        let state = state.clone();
        let toasts = toasts.clone();
        let rate_request = rate_request.clone();
        move || async move { fetch_exchange_rate(state.clone(), toasts.clone(), rate_request.clone()).await }
    });

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        document::Style { "{assets::tailwind_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

pub fn persist_user_state(state: &Signal<AppState>) {
    let snapshot = state.with(|st| st.to_persisted());
    if let Err(err) = save_persisted_state(&snapshot) {
        println!("Failed to persist user state: {err}");
    }
}

/// Queue a rate fetch for the country unless the cached value is still fresh.
pub fn request_rate_fetch(
    state: Signal<AppState>,
    mut rate_request: Signal<Option<SourceCountry>>,
    country: SourceCountry,
) {
    let resource = CacheResource::ExchangeRate(country);
    let needs_fetch = state.with(|st| st.is_stale(&resource, CACHE_TTL));

    if needs_fetch {
        println!("[rates] Queueing rate fetch for {}", country.key());
        rate_request.set(Some(country));
    } else {
        println!(
            "[rates] Skipping rate fetch for {}; cache still fresh.",
            country.key()
        );
    }
}

/// One-shot, best-effort: on failure the previous (or default) rate stays in
/// place and only the live indicator is withheld.
async fn fetch_exchange_rate(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    mut rate_request: Signal<Option<SourceCountry>>,
) -> Option<CacheStatus> {
    let requested = rate_request();
    let Some(country) = requested else {
        return None;
    };

    let Ok(client) = RateClient::new() else {
        push_toast(
            toasts.clone(),
            ToastKind::Error,
            "환율 클라이언트를 초기화하지 못했습니다.",
        );
        return None;
    };

    let currency = country.customs().currency;
    println!("[rates] Starting rate fetch for {currency}");

    match client.get_rate(currency).await {
        Ok(payload) => {
            rate_request.set(None);
            let rounded = (payload.data * 100.0).round() / 100.0;
            state.with_mut(|st| {
                st.inputs.exchange_rate = rounded;
                st.rate_live = payload.status == CacheStatus::Fresh;
                st.cache
                    .record_fetch(CacheResource::ExchangeRate(country), payload.fetched_at);
            });
            if payload.status == CacheStatus::Stale {
                push_toast(
                    toasts.clone(),
                    ToastKind::Warning,
                    format!("{currency} 환율을 캐시에서 불러왔습니다. 최신이 아닐 수 있습니다."),
                );
            }
            Some(payload.status)
        }
        Err(err) => {
            rate_request.set(None);
            println!("[rates] Failed to load rate for {currency}: {err}");
            state.with_mut(|st| st.rate_live = false);
            push_toast(
                toasts.clone(),
                ToastKind::Warning,
                format!("실시간 환율을 가져오지 못해 기존 환율을 사용합니다. ({err})"),
            );
            None
        }
    }
}

#[component]
pub fn Calculator() -> Element {
    rsx! { Shell { CalculatorPage {} } }
}

#[component]
pub fn Compare() -> Element {
    rsx! { Shell { ComparePage {} } }
}

#[component]
pub fn Rates() -> Element {
    rsx! { Shell { RatesPage {} } }
}

#[component]
pub fn Settings() -> Element {
    rsx! { Shell { SettingsPage {} } }
}

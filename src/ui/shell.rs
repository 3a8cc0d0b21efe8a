use dioxus::prelude::*;

use crate::app::Route;
use crate::domain::AppState;
use crate::util::version;

#[component]
pub fn Shell(children: Element) -> Element {
    let state = use_context::<Signal<AppState>>();
    let rate_live = state.with(|s| s.rate_live);
    let current_route = use_route::<Route>();
    let nav = use_navigator();

    rsx! {
        div { class: "min-h-screen bg-slate-950 text-slate-100 font-sans",
            header {
                class: "border-b border-slate-900/60 bg-slate-950/80 backdrop-blur px-6 py-4",
                div { class: "mx-auto flex max-w-6xl items-center justify-between gap-4",
                    div { class: "flex items-center gap-3",
                        span { class: "text-2xl", "🧮" }
                        div {
                            h1 { class: "text-xl font-semibold tracking-tight", {version::APP_NAME} }
                            p { class: "text-xs italic text-slate-500", "해외소싱 셀러의 마진을 한눈에" }
                        }
                    }

                    if rate_live {
                        span {
                            class: "rounded-full border border-emerald-500/30 bg-emerald-500/10 px-3 py-1 text-xs font-medium text-emerald-300",
                            "● 실시간 환율 연동됨"
                        }
                    }

                    nav { class: "flex justify-end gap-2 text-sm",
                        NavButton {
                            active: matches!(current_route, Route::Calculator {}),
                            onclick: move |_| { nav.push(Route::Calculator {}); },
                            label: "🧮 계산기",
                        }
                        NavButton {
                            active: matches!(current_route, Route::Compare {}),
                            onclick: move |_| { nav.push(Route::Compare {}); },
                            label: "⚖️ 상품 비교",
                        }
                        NavButton {
                            active: matches!(current_route, Route::Rates {}),
                            onclick: move |_| { nav.push(Route::Rates {}); },
                            label: "🚚 배송비",
                        }
                        NavButton {
                            active: matches!(current_route, Route::Settings {}),
                            onclick: move |_| { nav.push(Route::Settings {}); },
                            label: "⚙️",
                        }
                    }
                }
            }
            main { class: "mx-auto max-w-6xl px-6 py-10",
                {children}
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    let class = if active {
        "min-w-[5.5rem] rounded-lg border border-sky-500/60 bg-sky-500/15 px-4 py-2 font-semibold text-sky-300"
    } else {
        "min-w-[5.5rem] rounded-lg border border-transparent px-4 py-2 text-slate-400 transition hover:border-slate-700 hover:bg-slate-900/80 hover:text-slate-200"
    };

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}

//! Range-collection modals for report generation
//!
//! Two shapes recur: numeric stock bounds and date bounds. Both refuse to
//! fire while a bound is unset - surfaced as an inline warning, not an
//! error - and show a spinner while the aggregate request is out.

use leptos::*;
use pop_core::format::input_date_to_epoch_ms;
use pop_core::report::stock_bounds_set;

use super::primitives::{LoadingSpinner, Modal};
use crate::pages::parse_f64;

/// Collects inclusive stock bounds before requesting a report.
#[component]
pub fn StockRangeModal(
    open: RwSignal<bool>,
    busy: RwSignal<bool>,
    on_generate: Callback<(f64, f64)>,
) -> impl IntoView {
    let start = create_rw_signal(String::new());
    let end = create_rw_signal(String::new());

    let bounds = move || (parse_f64(&start.get()), parse_f64(&end.get()));
    let ready = move || {
        let (s, e) = bounds();
        stock_bounds_set(s, e)
    };

    let generate = move |_| {
        let (s, e) = bounds();
        // no request leaves the app while a bound is unset
        if !stock_bounds_set(s, e) {
            return;
        }
        on_generate.call((s, e));
    };

    view! {
        <Show when=move || open.get()>
            <Modal on_close=Callback::new(move |_| open.set(false))>
                <h2 class="modal-title">
                    {move || if busy.get() { "Aguarde..." } else { "Defina o intervalo de estoque para o seu relatório" }}
                </h2>
                <Show when=move || !busy.get() fallback=|| view! { <LoadingSpinner/> }>
                    <div class="modal-fields">
                        <label class="field">
                            <span>"Estoque Inicial"</span>
                            <input
                                type="number"
                                prop:value=move || start.get()
                                on:input=move |ev| start.set(event_target_value(&ev))
                            />
                        </label>
                        <label class="field">
                            <span>"Estoque Final"</span>
                            <input
                                type="number"
                                prop:value=move || end.get()
                                on:input=move |ev| end.set(event_target_value(&ev))
                            />
                        </label>
                    </div>
                    <button type="button" class="btn btn-primary btn-block" on:click=generate>
                        "Gerar relatório"
                    </button>
                    <Show when=move || !ready()>
                        <span class="modal-warning">
                            "Informe o estoque inicial e final para gerar o relatório!"
                        </span>
                    </Show>
                </Show>
            </Modal>
        </Show>
    }
}

/// Collects a date range before requesting a report; bounds go out as
/// epoch milliseconds.
#[component]
pub fn DateRangeModal(
    open: RwSignal<bool>,
    busy: RwSignal<bool>,
    on_generate: Callback<(i64, i64)>,
) -> impl IntoView {
    let start = create_rw_signal(String::new());
    let end = create_rw_signal(String::new());

    let bounds = move || {
        (
            input_date_to_epoch_ms(&start.get()),
            input_date_to_epoch_ms(&end.get()),
        )
    };
    let ready = move || matches!(bounds(), (Some(_), Some(_)));

    let generate = move |_| {
        if let (Some(s), Some(e)) = bounds() {
            on_generate.call((s, e));
        }
    };

    view! {
        <Show when=move || open.get()>
            <Modal on_close=Callback::new(move |_| open.set(false))>
                <h2 class="modal-title">
                    {move || if busy.get() { "Aguarde..." } else { "Defina as datas para o seu relatório" }}
                </h2>
                <Show when=move || !busy.get() fallback=|| view! { <LoadingSpinner/> }>
                    <div class="modal-fields">
                        <label class="field">
                            <span>"Data Inicial"</span>
                            <input
                                type="date"
                                prop:value=move || start.get()
                                on:input=move |ev| start.set(event_target_value(&ev))
                            />
                        </label>
                        <label class="field">
                            <span>"Data Final"</span>
                            <input
                                type="date"
                                prop:value=move || end.get()
                                on:input=move |ev| end.set(event_target_value(&ev))
                            />
                        </label>
                    </div>
                    <button type="button" class="btn btn-primary btn-block" on:click=generate>
                        "Gerar relatório"
                    </button>
                    <Show when=move || !ready()>
                        <span class="modal-warning">
                            "Informe a data inicial e final para gerar o relatório!"
                        </span>
                    </Show>
                </Show>
            </Modal>
        </Show>
    }
}

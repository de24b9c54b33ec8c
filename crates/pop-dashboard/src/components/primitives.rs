//! Reusable UI primitive components
//!
//! The building blocks every page shares:
//! - Loading skeletons and spinners
//! - Empty, error and "no records" states
//! - Status badges
//! - Pagination controls
//! - Modal container and field-level error text

use leptos::*;
use pop_core::listing::Pager;
use pop_core::validate::FieldErrors;

use super::icons::XIcon;

// ============================================================================
// Loading States
// ============================================================================

/// Spinner shown inside buttons and report modals while a call is in
/// flight.
#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <svg class="spinner" viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg" role="status" aria-label="Aguarde">
            <circle class="spinner-track" cx="12" cy="12" r="10" fill="none" stroke-width="3"/>
            <circle class="spinner-head" cx="12" cy="12" r="10" fill="none" stroke-width="3"
                    stroke-dasharray="31.4 31.4" stroke-linecap="round"/>
        </svg>
    }
}

/// Pulsing table placeholder rendered while the first page fetch is in
/// flight.
#[component]
pub fn TableSkeleton(#[prop(optional, default = 5)] columns: usize) -> impl IntoView {
    view! {
        <div class="table-card" aria-hidden="true">
            <table>
                <thead>
                    <tr>
                        {(0..columns).map(|_| view! {
                            <th><div class="skeleton skeleton-head"></div></th>
                        }).collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {(0..10).map(|_| view! {
                        <tr class="skeleton-row">
                            {(0..columns).map(|_| view! {
                                <td><div class="skeleton skeleton-cell"></div></td>
                            }).collect_view()}
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
        </div>
    }
}

// ============================================================================
// Empty / error states
// ============================================================================

/// Empty-collection illustration.
#[component]
pub fn EmptyState() -> impl IntoView {
    view! {
        <div class="empty-state" role="status">
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="1.5" class="empty-icon" aria-hidden="true">
                <path stroke-linecap="round" stroke-linejoin="round" d="M20.25 7.5l-.625 10.632a2.25 2.25 0 0 1-2.247 2.118H6.622a2.25 2.25 0 0 1-2.247-2.118L3.75 7.5m16.5 0h-16.5m16.5 0-1.5-3h-13.5l-1.5 3"/>
            </svg>
            <span class="empty-text">"Ops! Parece que não tem nada aqui"</span>
        </div>
    }
}

/// Visible retry affordance for a failed list fetch.
#[component]
pub fn RetryNotice(message: String, on_retry: Callback<()>) -> impl IntoView {
    view! {
        <div class="retry-notice" role="alert">
            <p class="retry-message">{message}</p>
            <button type="button" class="btn btn-secondary" on:click=move |_| on_retry.call(())>
                "Tentar novamente"
            </button>
        </div>
    }
}

// ============================================================================
// Badges
// ============================================================================

/// Active/inactive badge for the soft-delete flag.
#[component]
pub fn StatusBadge(ativo: bool) -> impl IntoView {
    let (class, text) = if ativo {
        ("badge badge-success", "Ativo")
    } else {
        ("badge badge-error", "Inativo")
    };
    view! { <span class=class>{text}</span> }
}

// ============================================================================
// Pagination
// ============================================================================

/// Previous/next controls with the `Página N de M` caption; both buttons
/// disable at their bound, so clicking past the edge is impossible.
#[component]
pub fn PaginationBar(pager: RwSignal<Pager>) -> impl IntoView {
    view! {
        <div class="pagination" role="navigation" aria-label="Paginação">
            <button
                type="button"
                class="btn btn-page"
                disabled=move || !pager.with(|p| p.can_prev())
                on:click=move |_| pager.update(|p| { p.prev(); })
            >
                "Anterior"
            </button>
            <span class="pagination-label">{move || pager.with(|p| p.label())}</span>
            <button
                type="button"
                class="btn btn-page"
                disabled=move || !pager.with(|p| p.can_next())
                on:click=move |_| pager.update(|p| { p.next(); })
            >
                "Próxima"
            </button>
        </div>
    }
}

// ============================================================================
// Modals
// ============================================================================

/// Centered modal with a corner close button.
#[component]
pub fn Modal(children: Children, on_close: Callback<()>) -> impl IntoView {
    view! {
        <div class="modal-overlay">
            <div class="modal" role="dialog">
                <button type="button" class="modal-close icon-btn" aria-label="Fechar" on:click=move |_| on_close.call(())>
                    <XIcon/>
                </button>
                {children()}
            </div>
        </div>
    }
}

/// "No records" notice shown when a report query comes back empty; a
/// dedicated informational state, not an error.
#[component]
pub fn NoRecordsModal(visible: RwSignal<bool>) -> impl IntoView {
    view! {
        <Show when=move || visible.get()>
            <div class="modal-overlay">
                <div class="modal" role="alertdialog">
                    <h2 class="modal-title">
                        "Nenhum registro para o relatório solicitado foi encontrado!"
                    </h2>
                    <button type="button" class="btn btn-primary btn-block" on:click=move |_| visible.set(false)>
                        "Entendi"
                    </button>
                </div>
            </div>
        </Show>
    }
}

// ============================================================================
// Form helpers
// ============================================================================

/// Field-scoped validation message.
#[component]
pub fn FieldErrorText(errors: RwSignal<FieldErrors>, field: &'static str) -> impl IntoView {
    view! {
        <Show when=move || errors.with(|e| e.contains_key(field))>
            <p class="field-error">
                {move || errors.with(|e| e.get(field).cloned().unwrap_or_default())}
            </p>
        </Show>
    }
}

/// Submit button that swaps to a spinner while the request is out.
#[component]
pub fn SubmitButton(
    saving: RwSignal<bool>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
) -> impl IntoView {
    view! {
        <button type="submit" class="btn btn-primary btn-submit" disabled=move || saving.get() || disabled.get()>
            <Show when=move || saving.get() fallback=|| "Salvar">
                <LoadingSpinner/>
            </Show>
        </button>
    }
}

//! Product types: list and slide-in form.

use leptos::ev::SubmitEvent;
use leptos::logging::warn;
use leptos::*;
use leptos_router::*;
use wasm_bindgen_futures::spawn_local;

use pop_core::format;
use pop_core::listing::ArmedDelete;
use pop_core::model::{collection, TipoProduto, TipoProdutoPayload};
use pop_core::validate::{self, FieldErrors};

use crate::api::{self, ApiClient};
use crate::components::icons::{CheckCircleIcon, PencilIcon, PlusIcon, TrashIcon};
use crate::components::{
    EmptyState, FieldErrorText, PaginationBar, RetryNotice, StatusBadge, SubmitButton,
    TableSkeleton,
};
use crate::panel::{PanelController, SlidePanel};
use crate::pages::{number_input_value, parse_f64};
use crate::resource::{use_entity, use_paged_list, ResourceStore};

#[component]
pub fn TiposProdutosPage() -> impl IntoView {
    let list = use_paged_list(collection::TIPO_PRODUTO);
    let state = list.state;
    let tipos = list.items::<TipoProduto>();
    let armed = create_rw_signal(ArmedDelete::default());
    let deleting = create_rw_signal(false);
    let navigate = use_navigate();

    let client = expect_context::<ApiClient>();

    let delete_tipo = {
        let client = client.clone();
        let list = list.clone();
        Callback::new(move |id: String| {
            if deleting.get_untracked() {
                return;
            }
            deleting.set(true);
            let client = client.clone();
            let list = list.clone();
            spawn_local(async move {
                let result = client
                    .delete(&api::entity_key(collection::TIPO_PRODUTO, &id))
                    .await;
                armed.update(|a| a.disarm());
                deleting.set(false);
                match result {
                    Ok(()) => list.invalidate(),
                    Err(err) => warn!("falha ao desativar tipo de produto: {err}"),
                }
            });
        })
    };

    let retry = {
        let list = list.clone();
        Callback::new(move |_| list.invalidate())
    };

    view! {
        <div class="page">
            <div class="page-toolbar">
                <A href="/tipos-produtos/form" class="btn btn-primary">
                    <PlusIcon/>
                    <span>"Novo Tipo De Produto"</span>
                </A>
            </div>

            {move || {
                let current = state.get();
                if let Some(err) = current.error {
                    view! { <RetryNotice message=err.to_string() on_retry=retry/> }.into_view()
                } else if current.is_initial_loading() {
                    view! { <TableSkeleton columns=4/> }.into_view()
                } else if tipos.with(|t| t.is_empty()) {
                    view! { <EmptyState/> }.into_view()
                } else {
                    let navigate = navigate.clone();
                    view! {
                        <div class="table-card">
                            <table>
                                <thead>
                                    <tr>
                                        <th>"Tipo"</th>
                                        <th>"Valor"</th>
                                        <th>"Status"</th>
                                        <th>"Ações"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || tipos.get()
                                        key=|t| t.id.clone()
                                        children=move |tipo: TipoProduto| {
                                            let id = tipo.id.clone();
                                            let armed_here = {
                                                let id = id.clone();
                                                Signal::derive(move || armed.with(|a| a.is_armed(&id)))
                                            };
                                            let arm = {
                                                let id = id.clone();
                                                move |_| armed.update(|a| a.arm(id.clone()))
                                            };
                                            let confirm = {
                                                let id = id.clone();
                                                move |_| delete_tipo.call(id.clone())
                                            };
                                            let edit = {
                                                let navigate = navigate.clone();
                                                let id = tipo.id.clone();
                                                move |_| navigate(&format!("/tipos-produtos/form/{id}"), Default::default())
                                            };
                                            view! {
                                                <tr>
                                                    <td>{tipo.tipo.clone()}</td>
                                                    <td>{format::format_brl(tipo.valor)}</td>
                                                    <td><StatusBadge ativo=tipo.ativo/></td>
                                                    <td>
                                                        <div class="row-actions">
                                                            <button type="button" class="icon-btn row-action" aria-label="Editar" on:click=edit>
                                                                <PencilIcon/>
                                                            </button>
                                                            <Show
                                                                when=move || armed_here.get()
                                                                fallback=move || view! {
                                                                    <button
                                                                        type="button"
                                                                        class="icon-btn row-action"
                                                                        aria-label="Desativar"
                                                                        disabled=move || deleting.get()
                                                                        on:click=arm.clone()
                                                                    >
                                                                        <TrashIcon/>
                                                                    </button>
                                                                }
                                                            >
                                                                <button
                                                                    type="button"
                                                                    class="icon-btn row-action confirm"
                                                                    aria-label="Confirmar desativação"
                                                                    disabled=move || deleting.get()
                                                                    on:click=confirm.clone()
                                                                >
                                                                    <CheckCircleIcon/>
                                                                </button>
                                                            </Show>
                                                        </div>
                                                    </td>
                                                </tr>
                                            }
                                        }
                                    />
                                </tbody>
                            </table>
                        </div>
                    }
                    .into_view()
                }
            }}

            <PaginationBar pager=list.pager/>
        </div>

        <Outlet/>
    }
}

#[component]
pub fn TipoProdutoFormPage() -> impl IntoView {
    view! {
        <SlidePanel title="Tipo de Produto">
            <TipoProdutoForm/>
        </SlidePanel>
    }
}

#[component]
fn TipoProdutoForm() -> impl IntoView {
    let params = use_params_map();
    let id = create_memo(move |_| params.with(|p| p.get("id").cloned()));
    let entity = use_entity(collection::TIPO_PRODUTO, move || id.get());

    let ativo = create_rw_signal(String::from("true"));
    let tipo = create_rw_signal(String::new());
    let valor = create_rw_signal(String::new());
    let errors = create_rw_signal(FieldErrors::new());
    let saving = create_rw_signal(false);
    let server_error = create_rw_signal(Option::<String>::None);

    let hydrated = store_value(false);
    create_effect(move |_| {
        if hydrated.get_value() || id.get().is_none() {
            return;
        }
        if let Some(t) = entity.get().decode::<TipoProduto>() {
            ativo.set(if t.ativo { "true" } else { "false" }.to_string());
            tipo.set(t.tipo);
            valor.set(number_input_value(t.valor));
            hydrated.set_value(true);
        }
    });

    let client = expect_context::<ApiClient>();
    let store = expect_context::<ResourceStore>();
    let panel = expect_context::<PanelController>();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }

        let mut field_errors = FieldErrors::new();
        validate::require_text(&mut field_errors, "tipo", &tipo.get_untracked());
        validate::require_positive(&mut field_errors, "valor", &valor.get_untracked());
        let blocked = !field_errors.is_empty();
        errors.set(field_errors);
        if blocked {
            return;
        }

        saving.set(true);
        server_error.set(None);

        let payload = TipoProdutoPayload {
            tipo: tipo.get_untracked(),
            valor: parse_f64(&valor.get_untracked()),
            ativo: ativo.get_untracked() == "true",
        };

        let client = client.clone();
        let store = store.clone();
        spawn_local(async move {
            let result = match id.get_untracked() {
                None => {
                    client
                        .post(&api::collection_key(collection::TIPO_PRODUTO), &payload)
                        .await
                }
                Some(id) => {
                    client
                        .put(&api::entity_key(collection::TIPO_PRODUTO, &id), &payload)
                        .await
                }
            };
            saving.set(false);
            match result {
                Ok(()) => {
                    store.invalidate_collection(&client, collection::TIPO_PRODUTO);
                    panel.request_close();
                }
                Err(err) => server_error.set(Some(err.user_message())),
            }
        });
    };

    view! {
        <form class="panel-form" on:submit=on_submit>
            <label class="field">
                <span>"Status:"</span>
                <select
                    prop:value=move || ativo.get()
                    on:change=move |ev| ativo.set(event_target_value(&ev))
                >
                    <option value="true">"Ativo"</option>
                    <option value="false">"Inativo"</option>
                </select>
            </label>

            <label class="field">
                <span>"Tipo:"</span>
                <input
                    type="text"
                    placeholder="Especial, leite, frutas..."
                    prop:value=move || tipo.get()
                    disabled=move || saving.get()
                    on:input=move |ev| tipo.set(event_target_value(&ev))
                />
                <FieldErrorText errors=errors field="tipo"/>
            </label>

            <label class="field">
                <span>"Valor:"</span>
                <input
                    type="number"
                    step="0.01"
                    placeholder="R$3,50"
                    prop:value=move || valor.get()
                    disabled=move || saving.get()
                    on:input=move |ev| valor.set(event_target_value(&ev))
                />
                <FieldErrorText errors=errors field="valor"/>
            </label>

            <Show when=move || server_error.with(|e| e.is_some())>
                <p class="form-error">{move || server_error.get().unwrap_or_default()}</p>
            </Show>

            <SubmitButton saving=saving disabled=Signal::derive(move || entity.get().loading)/>
        </form>
    }
}

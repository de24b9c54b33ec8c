//! Clients: list and slide-in form.

use leptos::ev::SubmitEvent;
use leptos::logging::warn;
use leptos::*;
use leptos_router::*;
use wasm_bindgen_futures::spawn_local;

use pop_core::format;
use pop_core::listing::ArmedDelete;
use pop_core::model::{collection, Cliente, ClientePayload};
use pop_core::validate::{self, FieldErrors};

use crate::api::{self, ApiClient};
use crate::components::icons::{CheckCircleIcon, PlusIcon, TrashIcon};
use crate::components::{
    EmptyState, FieldErrorText, PaginationBar, RetryNotice, StatusBadge, SubmitButton,
    TableSkeleton,
};
use crate::panel::{PanelController, SlidePanel};
use crate::resource::{use_entity, use_paged_list, ResourceStore};

#[component]
pub fn ClientesPage() -> impl IntoView {
    let list = use_paged_list(collection::CLIENTE);
    let state = list.state;
    let clientes = list.items::<Cliente>();
    let armed = create_rw_signal(ArmedDelete::default());
    let deleting = create_rw_signal(false);

    let client = expect_context::<ApiClient>();

    let delete_cliente = {
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
                    .delete(&api::entity_key(collection::CLIENTE, &id))
                    .await;
                armed.update(|a| a.disarm());
                deleting.set(false);
                match result {
                    Ok(()) => list.invalidate(),
                    Err(err) => warn!("falha ao desativar cliente: {err}"),
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
                <A href="/clientes/form" class="btn btn-primary">
                    <PlusIcon/>
                    <span>"Novo Cliente"</span>
                </A>
            </div>

            {move || {
                let current = state.get();
                if let Some(err) = current.error {
                    view! { <RetryNotice message=err.to_string() on_retry=retry/> }.into_view()
                } else if current.is_initial_loading() {
                    view! { <TableSkeleton columns=4/> }.into_view()
                } else if clientes.with(|c| c.is_empty()) {
                    view! { <EmptyState/> }.into_view()
                } else {
                    view! {
                        <div class="table-card">
                            <table>
                                <thead>
                                    <tr>
                                        <th>"Nome"</th>
                                        <th>"Telefone"</th>
                                        <th>"Ativo"</th>
                                        <th>"Ação"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || clientes.get()
                                        key=|c| c.id.clone()
                                        children=move |cliente: Cliente| {
                                            let id = cliente.id.clone();
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
                                                move |_| delete_cliente.call(id.clone())
                                            };
                                            let telefone = cliente.telefone.clone().unwrap_or_default();
                                            view! {
                                                <tr>
                                                    <td>
                                                        <A href=format!("/clientes/form/{}", cliente.id) class="row-link">
                                                            {cliente.nome.clone()}
                                                        </A>
                                                    </td>
                                                    <td>{format::format_phone(&telefone)}</td>
                                                    <td><StatusBadge ativo=cliente.ativo/></td>
                                                    <td>
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
pub fn ClienteFormPage() -> impl IntoView {
    view! {
        <SlidePanel title="Cliente">
            <ClienteForm/>
        </SlidePanel>
    }
}

#[component]
fn ClienteForm() -> impl IntoView {
    let params = use_params_map();
    let id = create_memo(move |_| params.with(|p| p.get("id").cloned()));
    let entity = use_entity(collection::CLIENTE, move || id.get());

    let ativo = create_rw_signal(String::from("true"));
    let nome = create_rw_signal(String::new());
    let telefone = create_rw_signal(String::new());
    let documento = create_rw_signal(String::new());
    let errors = create_rw_signal(FieldErrors::new());
    let saving = create_rw_signal(false);
    let server_error = create_rw_signal(Option::<String>::None);

    let hydrated = store_value(false);
    create_effect(move |_| {
        if hydrated.get_value() || id.get().is_none() {
            return;
        }
        if let Some(c) = entity.get().decode::<Cliente>() {
            ativo.set(if c.ativo { "true" } else { "false" }.to_string());
            nome.set(c.nome);
            telefone.set(c.telefone.unwrap_or_default());
            documento.set(c.documento.unwrap_or_default());
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
        validate::require_text(&mut field_errors, "nome", &nome.get_untracked());
        let blocked = !field_errors.is_empty();
        errors.set(field_errors);
        if blocked {
            return;
        }

        saving.set(true);
        server_error.set(None);

        let payload = ClientePayload {
            nome: nome.get_untracked(),
            telefone: telefone.get_untracked(),
            documento: documento.get_untracked(),
            ativo: ativo.get_untracked() == "true",
        };

        let client = client.clone();
        let store = store.clone();
        spawn_local(async move {
            let result = match id.get_untracked() {
                None => {
                    client
                        .post(&api::collection_key(collection::CLIENTE), &payload)
                        .await
                }
                Some(id) => {
                    client
                        .put(&api::entity_key(collection::CLIENTE, &id), &payload)
                        .await
                }
            };
            saving.set(false);
            match result {
                Ok(()) => {
                    store.invalidate_collection(&client, collection::CLIENTE);
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
                <span>"Nome:"</span>
                <input
                    type="text"
                    placeholder="Ex: Maria"
                    prop:value=move || nome.get()
                    disabled=move || saving.get()
                    on:input=move |ev| nome.set(event_target_value(&ev))
                />
                <FieldErrorText errors=errors field="nome"/>
            </label>

            <label class="field">
                <span>"Telefone:"</span>
                <input
                    type="text"
                    placeholder="(xx) x xxxx-xxxx"
                    maxlength="11"
                    prop:value=move || telefone.get()
                    disabled=move || saving.get()
                    on:input=move |ev| telefone.set(event_target_value(&ev))
                />
            </label>

            <label class="field">
                <span>"Documento:"</span>
                <input
                    type="text"
                    placeholder="CPF ou CNPJ"
                    prop:value=move || documento.get()
                    disabled=move || saving.get()
                    on:input=move |ev| documento.set(event_target_value(&ev))
                />
            </label>

            <Show when=move || server_error.with(|e| e.is_some())>
                <p class="form-error">{move || server_error.get().unwrap_or_default()}</p>
            </Show>

            <SubmitButton saving=saving disabled=Signal::derive(move || entity.get().loading)/>
        </form>
    }
}

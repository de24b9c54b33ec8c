//! Users: list and slide-in form.
//!
//! Creation goes through `/auth/register`; updates through the regular
//! collection. The status field only appears in edit mode.

use leptos::ev::SubmitEvent;
use leptos::*;
use leptos_router::*;
use wasm_bindgen_futures::spawn_local;

use pop_core::model::{collection, AtualizaUsuario, RegisterRequest, Usuario};
use pop_core::validate::{self, FieldErrors};

use crate::api::{self, ApiClient};
use crate::components::icons::{PencilIcon, PlusIcon};
use crate::components::{
    EmptyState, FieldErrorText, PaginationBar, RetryNotice, StatusBadge, SubmitButton,
    TableSkeleton,
};
use crate::panel::{PanelController, SlidePanel};
use crate::resource::{use_entity, use_paged_list, ResourceStore};

#[component]
pub fn UsuariosPage() -> impl IntoView {
    let list = use_paged_list(collection::USUARIO);
    let state = list.state;
    let usuarios = list.items::<Usuario>();
    let navigate = use_navigate();

    let retry = {
        let list = list.clone();
        Callback::new(move |_| list.invalidate())
    };

    view! {
        <div class="page">
            <div class="page-toolbar">
                <A href="/usuarios/form" class="btn btn-primary">
                    <PlusIcon/>
                    <span>"Novo Usuário"</span>
                </A>
            </div>

            {move || {
                let current = state.get();
                if let Some(err) = current.error {
                    view! { <RetryNotice message=err.to_string() on_retry=retry/> }.into_view()
                } else if current.is_initial_loading() {
                    view! { <TableSkeleton columns=5/> }.into_view()
                } else if usuarios.with(|u| u.is_empty()) {
                    view! { <EmptyState/> }.into_view()
                } else {
                    let navigate = navigate.clone();
                    view! {
                        <div class="table-card">
                            <table>
                                <thead>
                                    <tr>
                                        <th>"Nome"</th>
                                        <th>"E-mail"</th>
                                        <th>"Cargo"</th>
                                        <th>"Ativo"</th>
                                        <th>"Ações"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || usuarios.get()
                                        key=|u| u.id.clone()
                                        children=move |usuario: Usuario| {
                                            let edit = {
                                                let navigate = navigate.clone();
                                                let id = usuario.id.clone();
                                                move |_| navigate(&format!("/usuarios/form/{id}"), Default::default())
                                            };
                                            view! {
                                                <tr>
                                                    <td>{usuario.nome.clone()}</td>
                                                    <td>{usuario.email.clone()}</td>
                                                    <td>{usuario.cargo_label().to_string()}</td>
                                                    <td><StatusBadge ativo=usuario.ativo/></td>
                                                    <td>
                                                        <button type="button" class="icon-btn row-action" aria-label="Editar" on:click=edit>
                                                            <PencilIcon/>
                                                        </button>
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
pub fn UsuarioFormPage() -> impl IntoView {
    view! {
        <SlidePanel title="Usuário">
            <UsuarioForm/>
        </SlidePanel>
    }
}

#[component]
fn UsuarioForm() -> impl IntoView {
    let params = use_params_map();
    let id = create_memo(move |_| params.with(|p| p.get("id").cloned()));
    let entity = use_entity(collection::USUARIO, move || id.get());

    let ativo = create_rw_signal(String::from("true"));
    let nome = create_rw_signal(String::new());
    let email = create_rw_signal(String::new());
    let senha = create_rw_signal(String::new());
    let confirma_senha = create_rw_signal(String::new());
    let errors = create_rw_signal(FieldErrors::new());
    let saving = create_rw_signal(false);

    let hydrated = store_value(false);
    create_effect(move |_| {
        if hydrated.get_value() || id.get().is_none() {
            return;
        }
        if let Some(u) = entity.get().decode::<Usuario>() {
            ativo.set(if u.ativo { "true" } else { "false" }.to_string());
            nome.set(u.nome);
            email.set(u.email);
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

        let editing = id.get_untracked().is_some();
        let mut field_errors = FieldErrors::new();
        validate::require_text(&mut field_errors, "nome", &nome.get_untracked());
        validate::require_text(&mut field_errors, "email", &email.get_untracked());
        if !editing {
            validate::require_password_match(
                &mut field_errors,
                "confirmaSenha",
                &senha.get_untracked(),
                &confirma_senha.get_untracked(),
            );
        }
        let blocked = !field_errors.is_empty();
        errors.set(field_errors);
        if blocked {
            return;
        }

        saving.set(true);

        let client = client.clone();
        let store = store.clone();
        spawn_local(async move {
            let result = match id.get_untracked() {
                None => {
                    let body = RegisterRequest {
                        nome: nome.get_untracked(),
                        email: email.get_untracked(),
                        senha: senha.get_untracked(),
                        confirma_senha: confirma_senha.get_untracked(),
                    };
                    client.register(&body).await
                }
                Some(id) => {
                    let nova_senha = senha.get_untracked();
                    let body = AtualizaUsuario {
                        nome: nome.get_untracked(),
                        email: email.get_untracked(),
                        senha: (!nova_senha.is_empty()).then_some(nova_senha),
                        ativo: ativo.get_untracked() == "true",
                    };
                    client
                        .put(&api::entity_key(collection::USUARIO, &id), &body)
                        .await
                }
            };
            saving.set(false);
            match result {
                Ok(()) => {
                    store.invalidate_collection(&client, collection::USUARIO);
                    panel.request_close();
                }
                // account failures land on the e-mail field, where the
                // conflict usually is
                Err(err) => errors.update(|e| {
                    e.insert("email", err.user_message());
                }),
            }
        });
    };

    view! {
        <form class="panel-form" on:submit=on_submit>
            // the status field is configured per entity: users only expose
            // it once the record exists
            <Show when=move || id.get().is_some()>
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
            </Show>

            <label class="field">
                <span>"Nome:"</span>
                <input
                    type="text"
                    placeholder="Ex: João"
                    prop:value=move || nome.get()
                    disabled=move || saving.get()
                    on:input=move |ev| nome.set(event_target_value(&ev))
                />
                <FieldErrorText errors=errors field="nome"/>
            </label>

            <label class="field">
                <span>"E-mail:"</span>
                <input
                    type="email"
                    placeholder="email@email.com"
                    prop:value=move || email.get()
                    disabled=move || saving.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <FieldErrorText errors=errors field="email"/>
            </label>

            <label class="field">
                <span>{move || if id.get().is_some() { "Trocar Senha:" } else { "Senha:" }}</span>
                <input
                    type="password"
                    autocomplete="new-password"
                    placeholder="Informe a senha"
                    prop:value=move || senha.get()
                    disabled=move || saving.get()
                    on:input=move |ev| senha.set(event_target_value(&ev))
                />
            </label>

            <Show when=move || id.get().is_none()>
                <label class="field">
                    <span>"Confirmar Senha:"</span>
                    <input
                        type="password"
                        autocomplete="new-password"
                        placeholder="Confirme sua senha"
                        prop:value=move || confirma_senha.get()
                        disabled=move || saving.get()
                        on:input=move |ev| confirma_senha.set(event_target_value(&ev))
                    />
                    <FieldErrorText errors=errors field="confirmaSenha"/>
                </label>
            </Show>

            <SubmitButton saving=saving disabled=Signal::derive(move || entity.get().loading)/>
        </form>
    }
}

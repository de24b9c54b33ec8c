//! Recipes: list and slide-in form with the raw-material selection.

use leptos::ev::SubmitEvent;
use leptos::*;
use leptos_router::*;
use wasm_bindgen_futures::spawn_local;

use pop_core::lines::{LineItem, LineSelection};
use pop_core::model::{
    collection, MateriaPrima, NovaReceita, NovaReceitaLinha, Produto, Receita,
};
use pop_core::validate::{self, FieldErrors};

use crate::api::{self, ApiClient};
use crate::components::icons::{PencilIcon, PlusIcon, XIcon};
use crate::components::{
    EmptyState, FieldErrorText, Modal, PaginationBar, RetryNotice, StatusBadge, SubmitButton,
    TableSkeleton,
};
use crate::pages::{number_input_value, parse_f64};
use crate::panel::{PanelController, SlidePanel};
use crate::resource::{use_collection, use_entity, use_paged_list, use_resource, ResourceStore};

#[component]
pub fn ReceitasPage() -> impl IntoView {
    let list = use_paged_list(collection::RECEITA);
    let state = list.state;
    let receitas = list.items::<Receita>();
    let navigate = use_navigate();

    let retry = {
        let list = list.clone();
        Callback::new(move |_| list.invalidate())
    };

    view! {
        <div class="page">
            <div class="page-toolbar">
                <A href="/receitas/form" class="btn btn-primary">
                    <PlusIcon/>
                    <span>"Nova Receita"</span>
                </A>
            </div>

            {move || {
                let current = state.get();
                if let Some(err) = current.error {
                    view! { <RetryNotice message=err.to_string() on_retry=retry/> }.into_view()
                } else if current.is_initial_loading() {
                    view! { <TableSkeleton columns=4/> }.into_view()
                } else if receitas.with(|r| r.is_empty()) {
                    view! { <EmptyState/> }.into_view()
                } else {
                    let navigate = navigate.clone();
                    view! {
                        <div class="table-card">
                            <table>
                                <thead>
                                    <tr>
                                        <th>"Produto"</th>
                                        <th>"Matéria Prima"</th>
                                        <th>"Ativo"</th>
                                        <th>"Ações"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || receitas.get()
                                        key=|r| r.id.clone()
                                        children=move |receita: Receita| {
                                            let edit = {
                                                let navigate = navigate.clone();
                                                let id = receita.id.clone();
                                                move |_| navigate(&format!("/receitas/form/{id}"), Default::default())
                                            };
                                            let materias = receita
                                                .receita_materia_prima
                                                .iter()
                                                .map(|linha| linha.materia_prima.nome.clone())
                                                .collect::<Vec<_>>()
                                                .join(", ");
                                            view! {
                                                <tr>
                                                    <td>{receita.produto.nome.clone()}</td>
                                                    <td>{materias}</td>
                                                    <td><StatusBadge ativo=receita.ativo/></td>
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
pub fn ReceitaFormPage() -> impl IntoView {
    view! {
        <SlidePanel title="Receita">
            <ReceitaForm/>
        </SlidePanel>
    }
}

#[component]
fn ReceitaForm() -> impl IntoView {
    let params = use_params_map();
    let id = create_memo(move |_| params.with(|p| p.get("id").cloned()));
    let entity = use_entity(collection::RECEITA, move || id.get());
    // only products not yet bound to a recipe are offered
    let produtos_state = use_resource(move || Some("/produto/no-recipe".to_string()));
    let produtos = Signal::derive(move || {
        produtos_state
            .get()
            .decode::<Vec<Produto>>()
            .unwrap_or_default()
    });
    let materias_state = use_collection(collection::MATERIA_PRIMA);
    let materias = Signal::derive(move || {
        materias_state
            .get()
            .decode::<Vec<MateriaPrima>>()
            .unwrap_or_default()
    });

    let produto_id = create_rw_signal(String::new());
    let selecao = create_rw_signal(LineSelection::new());
    let picker_open = create_rw_signal(false);
    let errors = create_rw_signal(FieldErrors::new());
    let saving = create_rw_signal(false);
    let server_error = create_rw_signal(Option::<String>::None);

    let hydrated = store_value(false);
    create_effect(move |_| {
        if hydrated.get_value() || id.get().is_none() {
            return;
        }
        if let Some(r) = entity.get().decode::<Receita>() {
            produto_id.set(r.produto.id);
            selecao.set(LineSelection::from_items(
                r.receita_materia_prima
                    .into_iter()
                    .map(|linha| LineItem {
                        id: linha.materia_prima.id,
                        nome: linha.materia_prima.nome,
                        quantidade: linha.quantidade_mp,
                        quantidade_volta: 0,
                    })
                    .collect(),
            ));
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
        validate::require_selection(&mut field_errors, "produto", &produto_id.get_untracked());
        validate::require_lines(
            &mut field_errors,
            "materiasPrimas",
            &selecao.with_untracked(|s| s.quantidades()),
        );
        let blocked = !field_errors.is_empty();
        errors.set(field_errors);
        if blocked {
            return;
        }

        saving.set(true);
        server_error.set(None);

        let payload = NovaReceita {
            produto_id: produto_id.get_untracked(),
            receita_materia_prima_list: selecao.with_untracked(|s| {
                s.items()
                    .iter()
                    .map(|item| NovaReceitaLinha {
                        materia_prima_id: item.id.clone(),
                        quantidade: item.quantidade,
                    })
                    .collect()
            }),
        };

        let client = client.clone();
        let store = store.clone();
        spawn_local(async move {
            let result = match id.get_untracked() {
                None => {
                    client
                        .post(&api::collection_key(collection::RECEITA), &payload)
                        .await
                }
                Some(id) => {
                    client
                        .put(&api::entity_key(collection::RECEITA, &id), &payload)
                        .await
                }
            };
            saving.set(false);
            match result {
                Ok(()) => {
                    store.invalidate_collection(&client, collection::RECEITA);
                    panel.request_close();
                }
                Err(err) => server_error.set(Some(err.user_message())),
            }
        });
    };

    view! {
        <form class="panel-form" on:submit=on_submit>
            <label class="field">
                <span>"Produto:"</span>
                <select
                    disabled=move || saving.get() || produtos_state.get().loading
                    prop:value=move || produto_id.get()
                    on:change=move |ev| produto_id.set(event_target_value(&ev))
                >
                    <option value="">"Selecione um produto"</option>
                    <For
                        each=move || produtos.get()
                        key=|p| p.id.clone()
                        children=move |produto: Produto| {
                            view! { <option value=produto.id.clone()>{produto.nome.clone()}</option> }
                        }
                    />
                </select>
                <FieldErrorText errors=errors field="produto"/>
            </label>

            <div class="field">
                <Show
                    when=move || selecao.with(|s| !s.is_empty())
                    fallback=|| view! { <span class="field-hint">"Nenhuma matéria prima selecionada"</span> }
                >
                    <span>"Matérias-Primas:"</span>
                </Show>

                <div class="line-items">
                    <For
                        each=move || selecao.get().items().to_vec()
                        key=|item| item.id.clone()
                        children=move |item: LineItem| {
                            let id = item.id.clone();
                            let set_qty = {
                                let id = id.clone();
                                move |ev| {
                                    let qty = parse_f64(&event_target_value(&ev));
                                    selecao.update(|s| s.set_quantidade(&id, qty));
                                }
                            };
                            let remove = {
                                let id = id.clone();
                                move |_| selecao.update(|s| s.remove(&id))
                            };
                            view! {
                                <div class="line-item">
                                    <span class="line-name">{item.nome.clone()}</span>
                                    <input
                                        type="number"
                                        min="1"
                                        class="line-qty"
                                        prop:value=number_input_value(item.quantidade)
                                        on:input=set_qty
                                    />
                                    <button type="button" class="icon-btn line-remove" aria-label="Remover" on:click=remove>
                                        <XIcon/>
                                    </button>
                                </div>
                            }
                        }
                    />
                </div>
                <FieldErrorText errors=errors field="materiasPrimas"/>

                <button type="button" class="btn btn-primary btn-block" on:click=move |_| picker_open.set(true)>
                    "Selecionar Matérias-Primas"
                </button>
            </div>

            <Show when=move || server_error.with(|e| e.is_some())>
                <p class="form-error">{move || server_error.get().unwrap_or_default()}</p>
            </Show>

            <SubmitButton saving=saving disabled=Signal::derive(move || entity.get().loading)/>
        </form>

        <Show when=move || picker_open.get()>
            <Modal on_close=Callback::new(move |_| picker_open.set(false))>
                <h2 class="modal-title">"Selecionar Matérias-Primas"</h2>
                <div class="chip-grid">
                    <For
                        each=move || materias.get()
                        key=|mp| mp.id.clone()
                        children=move |mp: MateriaPrima| {
                            let id = mp.id.clone();
                            let nome = mp.nome.clone();
                            let selected = {
                                let id = id.clone();
                                Signal::derive(move || selecao.with(|s| s.contains(&id)))
                            };
                            let toggle = {
                                let id = id.clone();
                                let nome = nome.clone();
                                move |_| selecao.update(|s| s.toggle(id.clone(), nome.clone()))
                            };
                            view! {
                                <button
                                    type="button"
                                    class="chip"
                                    class:selected=move || selected.get()
                                    on:click=toggle
                                >
                                    {mp.nome.clone()}
                                </button>
                            }
                        }
                    />
                </div>
            </Modal>
        </Show>
    }
}

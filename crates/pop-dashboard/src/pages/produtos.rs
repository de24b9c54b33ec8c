//! Products: list, slide-in form and the stock-range report.

use leptos::ev::SubmitEvent;
use leptos::logging::warn;
use leptos::*;
use leptos_router::*;
use wasm_bindgen_futures::spawn_local;

use pop_core::model::{collection, Produto, ProdutoPayload, TipoProduto};
use pop_core::report::{render_text, ReportBuilder};
use pop_core::validate::{self, FieldErrors};

use crate::api::{self, ApiClient};
use crate::components::icons::{FileIcon, PencilIcon, PlusIcon};
use crate::components::{
    EmptyState, FieldErrorText, NoRecordsModal, PaginationBar, RetryNotice, StatusBadge,
    StockRangeModal, SubmitButton, TableSkeleton,
};
use crate::download;
use crate::pages::{number_input_value, parse_f64};
use crate::panel::{PanelController, SlidePanel};
use crate::resource::{use_collection, use_entity, use_paged_list, ResourceStore};

#[component]
pub fn ProdutosPage() -> impl IntoView {
    let list = use_paged_list(collection::PRODUTO);
    let state = list.state;
    let produtos = list.items::<Produto>();
    let report_open = create_rw_signal(false);
    let report_busy = create_rw_signal(false);
    let no_records = create_rw_signal(false);
    let navigate = use_navigate();

    let client = expect_context::<ApiClient>();

    let generate = {
        let client = client.clone();
        Callback::new(move |(start, end): (f64, f64)| {
            if report_busy.get_untracked() {
                return;
            }
            report_busy.set(true);
            let client = client.clone();
            spawn_local(async move {
                let result = client
                    .get::<Vec<Produto>>(&format!("/produto/report?start={start}&end={end}"))
                    .await;
                report_busy.set(false);
                report_open.set(false);
                match result {
                    Ok(produtos) => {
                        if produtos.is_empty() {
                            no_records.set(true);
                            return;
                        }
                        let mut builder = ReportBuilder::new(
                            "Relatório de Produtos",
                            download::generated_at_label(),
                        )
                        .with_columns(&["Nome", "Estoque", "Tipo", "Ativo"]);
                        for p in &produtos {
                            builder.push_row(&[
                                &p.nome,
                                &number_input_value(p.estoque),
                                &p.tipo_produto.tipo,
                                if p.ativo { "Sim" } else { "Não" },
                            ]);
                        }
                        download::save_text_file(
                            &format!("relatorio_produtos_{}.txt", download::date_stamp()),
                            &render_text(&builder.finish()),
                        );
                    }
                    Err(err) => warn!("falha ao gerar relatório de produtos: {err}"),
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
                <A href="/produtos/form" class="btn btn-primary">
                    <PlusIcon/>
                    <span>"Novo Produto"</span>
                </A>
                <button type="button" class="btn btn-primary" on:click=move |_| report_open.set(true)>
                    <FileIcon/>
                    <span>"Gerar Relatório"</span>
                </button>
            </div>

            {move || {
                let current = state.get();
                if let Some(err) = current.error {
                    view! { <RetryNotice message=err.to_string() on_retry=retry/> }.into_view()
                } else if current.is_initial_loading() {
                    view! { <TableSkeleton columns=5/> }.into_view()
                } else if produtos.with(|p| p.is_empty()) {
                    view! { <EmptyState/> }.into_view()
                } else {
                    let navigate = navigate.clone();
                    view! {
                        <div class="table-card">
                            <table>
                                <thead>
                                    <tr>
                                        <th>"Nome"</th>
                                        <th>"Estoque"</th>
                                        <th>"Ativo"</th>
                                        <th>"Tipo"</th>
                                        <th>"Ações"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || produtos.get()
                                        key=|p| p.id.clone()
                                        children=move |produto: Produto| {
                                            let edit = {
                                                let navigate = navigate.clone();
                                                let id = produto.id.clone();
                                                move |_| navigate(&format!("/produtos/form/{id}"), Default::default())
                                            };
                                            view! {
                                                <tr>
                                                    <td>{produto.nome.clone()}</td>
                                                    <td>{number_input_value(produto.estoque)}</td>
                                                    <td><StatusBadge ativo=produto.ativo/></td>
                                                    <td>{produto.tipo_produto.tipo.clone()}</td>
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
        <StockRangeModal open=report_open busy=report_busy on_generate=generate/>
        <NoRecordsModal visible=no_records/>
    }
}

#[component]
pub fn ProdutoFormPage() -> impl IntoView {
    view! {
        <SlidePanel title="Produto">
            <ProdutoForm/>
        </SlidePanel>
    }
}

#[component]
fn ProdutoForm() -> impl IntoView {
    let params = use_params_map();
    let id = create_memo(move |_| params.with(|p| p.get("id").cloned()));
    let entity = use_entity(collection::PRODUTO, move || id.get());
    // picker over the product-type collection; shares the cache entry
    // with every other consumer of that key
    let tipos_state = use_collection(collection::TIPO_PRODUTO);
    let tipos = Signal::derive(move || {
        tipos_state
            .get()
            .decode::<Vec<TipoProduto>>()
            .unwrap_or_default()
    });

    let ativo = create_rw_signal(String::from("true"));
    let nome = create_rw_signal(String::new());
    let estoque = create_rw_signal(String::new());
    let tipo_produto_id = create_rw_signal(String::new());
    let errors = create_rw_signal(FieldErrors::new());
    let saving = create_rw_signal(false);
    let server_error = create_rw_signal(Option::<String>::None);

    let hydrated = store_value(false);
    create_effect(move |_| {
        if hydrated.get_value() || id.get().is_none() {
            return;
        }
        if let Some(p) = entity.get().decode::<Produto>() {
            ativo.set(if p.ativo { "true" } else { "false" }.to_string());
            nome.set(p.nome);
            estoque.set(number_input_value(p.estoque));
            tipo_produto_id.set(p.tipo_produto.id);
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
        validate::require_non_negative(&mut field_errors, "estoque", &estoque.get_untracked());
        validate::require_selection(&mut field_errors, "tipoProduto", &tipo_produto_id.get_untracked());
        let blocked = !field_errors.is_empty();
        errors.set(field_errors);
        if blocked {
            return;
        }

        saving.set(true);
        server_error.set(None);

        let payload = ProdutoPayload {
            nome: nome.get_untracked(),
            estoque: parse_f64(&estoque.get_untracked()),
            ativo: ativo.get_untracked() == "true",
            tipo_produto_id: tipo_produto_id.get_untracked(),
        };

        let client = client.clone();
        let store = store.clone();
        spawn_local(async move {
            let result = match id.get_untracked() {
                None => {
                    client
                        .post(&api::collection_key(collection::PRODUTO), &payload)
                        .await
                }
                Some(id) => {
                    client
                        .put(&api::entity_key(collection::PRODUTO, &id), &payload)
                        .await
                }
            };
            saving.set(false);
            match result {
                Ok(()) => {
                    store.invalidate_collection(&client, collection::PRODUTO);
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
                    placeholder="Limão..."
                    prop:value=move || nome.get()
                    disabled=move || saving.get()
                    on:input=move |ev| nome.set(event_target_value(&ev))
                />
                <FieldErrorText errors=errors field="nome"/>
            </label>

            <label class="field">
                <span>"Estoque:"</span>
                <input
                    type="number"
                    placeholder="10"
                    prop:value=move || estoque.get()
                    disabled=move || saving.get()
                    on:input=move |ev| estoque.set(event_target_value(&ev))
                />
                <FieldErrorText errors=errors field="estoque"/>
            </label>

            <label class="field">
                <span>"Tipo do Produto:"</span>
                <select
                    disabled=move || saving.get() || tipos_state.get().loading
                    prop:value=move || tipo_produto_id.get()
                    on:change=move |ev| tipo_produto_id.set(event_target_value(&ev))
                >
                    <option value="">"Selecione um tipo"</option>
                    <For
                        each=move || tipos.get()
                        key=|t| t.id.clone()
                        children=move |tipo: TipoProduto| {
                            view! {
                                <option value=tipo.id.clone()>
                                    {format!("{} - R$ {:.2}", tipo.tipo, tipo.valor)}
                                </option>
                            }
                        }
                    />
                </select>
                <FieldErrorText errors=errors field="tipoProduto"/>
            </label>

            <Show when=move || server_error.with(|e| e.is_some())>
                <p class="form-error">{move || server_error.get().unwrap_or_default()}</p>
            </Show>

            <SubmitButton saving=saving disabled=Signal::derive(move || entity.get().loading)/>
        </form>
    }
}

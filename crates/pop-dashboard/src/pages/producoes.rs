//! Production batches: list with the recipe-details modal, slide-in form
//! and the date-range report.

use leptos::ev::SubmitEvent;
use leptos::logging::warn;
use leptos::*;
use leptos_router::*;
use wasm_bindgen_futures::spawn_local;

use pop_core::format::{br_date_to_input, input_date_to_br};
use pop_core::lines::{LineItem, LineSelection};
use pop_core::model::{
    collection, AtualizaProducao, NovaProducao, Producao, ProducaoLinha, ProducaoReceita, Receita,
};
use pop_core::report::{render_text, ReportBuilder};
use pop_core::validate::{self, FieldErrors};

use crate::api::{self, ApiClient};
use crate::components::icons::{FileIcon, PencilIcon, PlusIcon, XIcon};
use crate::components::{
    DateRangeModal, EmptyState, FieldErrorText, LoadingSpinner, Modal, NoRecordsModal,
    PaginationBar, RetryNotice, StatusBadge, SubmitButton, TableSkeleton,
};
use crate::download;
use crate::pages::{number_input_value, parse_u32};
use crate::panel::{PanelController, SlidePanel};
use crate::resource::{use_collection, use_entity, use_paged_list, ResourceStore};

#[component]
pub fn ProducoesPage() -> impl IntoView {
    let list = use_paged_list(collection::PRODUCAO);
    let state = list.state;
    let producoes = list.items::<Producao>();
    let detalhes = create_rw_signal(Option::<Vec<ProducaoReceita>>::None);
    let report_open = create_rw_signal(false);
    let report_busy = create_rw_signal(false);
    let no_records = create_rw_signal(false);
    let navigate = use_navigate();

    let client = expect_context::<ApiClient>();

    let generate = {
        let client = client.clone();
        Callback::new(move |(start, end): (i64, i64)| {
            if report_busy.get_untracked() {
                return;
            }
            report_busy.set(true);
            let client = client.clone();
            spawn_local(async move {
                let result = client
                    .get::<Vec<Producao>>(&format!("/producao/report?start={start}&end={end}"))
                    .await;
                report_busy.set(false);
                report_open.set(false);
                match result {
                    Ok(producoes) => {
                        if producoes.is_empty() {
                            no_records.set(true);
                            return;
                        }
                        let mut builder = ReportBuilder::new(
                            "Relatório de Produções",
                            download::generated_at_label(),
                        );
                        for producao in &producoes {
                            builder.ensure_room(4 + producao.receita_producao_model.len());
                            builder.push_line(format!("Criado em: {}", producao.data_atual));
                            builder.push_line(format!("Vencimento: {}", producao.vencimento));
                            builder.push_line(format!(
                                "Status: {}",
                                if producao.ativo { "Ativo" } else { "Inativo" }
                            ));
                            for linha in &producao.receita_producao_model {
                                builder.push_line(format!(
                                    "  {} x{}",
                                    linha.receita.produto.nome, linha.quantidade_produzida
                                ));
                            }
                            builder.blank_line();
                        }
                        download::save_text_file(
                            &format!("relatorio_producoes_{}.txt", download::date_stamp()),
                            &render_text(&builder.finish()),
                        );
                    }
                    Err(err) => warn!("falha ao gerar relatório de produções: {err}"),
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
                <A href="/producoes/form" class="btn btn-primary">
                    <PlusIcon/>
                    <span>"Nova Produção"</span>
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
                } else if producoes.with(|p| p.is_empty()) {
                    view! { <EmptyState/> }.into_view()
                } else {
                    let navigate = navigate.clone();
                    view! {
                        <div class="table-card">
                            <table>
                                <thead>
                                    <tr>
                                        <th>"Criado em"</th>
                                        <th>"Vencimento"</th>
                                        <th>"Receita"</th>
                                        <th>"Ativo"</th>
                                        <th>"Ações"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || producoes.get()
                                        key=|p| p.id.clone()
                                        children=move |producao: Producao| {
                                            let edit = {
                                                let navigate = navigate.clone();
                                                let id = producao.id.clone();
                                                move |_| navigate(&format!("/producoes/form/{id}"), Default::default())
                                            };
                                            let receitas = producao.receita_producao_model.clone();
                                            let ver = move |_| detalhes.set(Some(receitas.clone()));
                                            view! {
                                                <tr>
                                                    <td>{producao.data_atual.clone()}</td>
                                                    <td>{producao.vencimento.clone()}</td>
                                                    <td>
                                                        <button type="button" class="link-btn" on:click=ver>
                                                            "Ver receitas"
                                                        </button>
                                                    </td>
                                                    <td><StatusBadge ativo=producao.ativo/></td>
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

        <Show when=move || detalhes.with(|d| d.is_some())>
            <Modal on_close=Callback::new(move |_| detalhes.set(None))>
                <h2 class="modal-title">"Receitas da Produção"</h2>
                <ul class="detail-list">
                    {move || {
                        detalhes
                            .get()
                            .unwrap_or_default()
                            .into_iter()
                            .map(|linha| view! {
                                <li>
                                    <span>{linha.receita.produto.nome.clone()}</span>
                                    <span class="detail-qty">{format!("x{}", linha.quantidade_produzida)}</span>
                                </li>
                            })
                            .collect_view()
                    }}
                </ul>
            </Modal>
        </Show>

        <DateRangeModal open=report_open busy=report_busy on_generate=generate/>
        <NoRecordsModal visible=no_records/>
    }
}

#[component]
pub fn ProducaoFormPage() -> impl IntoView {
    view! {
        <SlidePanel title="Produção">
            <ProducaoForm/>
        </SlidePanel>
    }
}

#[component]
fn ProducaoForm() -> impl IntoView {
    let params = use_params_map();
    let id = create_memo(move |_| params.with(|p| p.get("id").cloned()));
    let entity = use_entity(collection::PRODUCAO, move || id.get());
    let receitas_state = use_collection(collection::RECEITA);
    let receitas = Signal::derive(move || {
        receitas_state
            .get()
            .decode::<Vec<Receita>>()
            .unwrap_or_default()
    });

    let ativo = create_rw_signal(String::from("true"));
    let vencimento = create_rw_signal(String::new());
    let selecao = create_rw_signal(LineSelection::new());
    let errors = create_rw_signal(FieldErrors::new());
    let saving = create_rw_signal(false);
    let server_error = create_rw_signal(Option::<String>::None);

    let hydrated = store_value(false);
    create_effect(move |_| {
        if hydrated.get_value() || id.get().is_none() {
            return;
        }
        if let Some(p) = entity.get().decode::<Producao>() {
            ativo.set(if p.ativo { "true" } else { "false" }.to_string());
            vencimento.set(br_date_to_input(&p.vencimento).unwrap_or_default());
            selecao.set(LineSelection::from_items(
                p.receita_producao_model
                    .into_iter()
                    .map(|linha| LineItem {
                        id: linha.receita.id,
                        nome: linha.receita.produto.nome,
                        quantidade: linha.quantidade_produzida as f64,
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
        validate::require_text(&mut field_errors, "vencimento", &vencimento.get_untracked());
        validate::require_lines(
            &mut field_errors,
            "receitas",
            &selecao.with_untracked(|s| s.quantidades()),
        );
        let blocked = !field_errors.is_empty();
        errors.set(field_errors);
        if blocked {
            return;
        }

        saving.set(true);
        server_error.set(None);

        let linhas: Vec<ProducaoLinha> = selecao.with_untracked(|s| {
            s.items()
                .iter()
                .map(|item| ProducaoLinha {
                    receita_id: item.id.clone(),
                    quantidade: item.quantidade as u32,
                })
                .collect()
        });
        let vencimento_br = input_date_to_br(&vencimento.get_untracked()).unwrap_or_default();

        let client = client.clone();
        let store = store.clone();
        spawn_local(async move {
            let result = match id.get_untracked() {
                None => {
                    let body = NovaProducao {
                        data_atual: download::today_br(),
                        vencimento: vencimento_br,
                        receita: linhas,
                    };
                    client
                        .post(&api::collection_key(collection::PRODUCAO), &body)
                        .await
                }
                Some(id) => {
                    let body = AtualizaProducao {
                        vencimento: vencimento_br,
                        ativo: ativo.get_untracked() == "true",
                        receita: linhas,
                    };
                    client
                        .put(&api::entity_key(collection::PRODUCAO, &id), &body)
                        .await
                }
            };
            saving.set(false);
            match result {
                Ok(()) => {
                    store.invalidate_collection(&client, collection::PRODUCAO);
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
                <span>"Vencimento:"</span>
                <input
                    type="date"
                    prop:value=move || vencimento.get()
                    disabled=move || saving.get()
                    on:input=move |ev| vencimento.set(event_target_value(&ev))
                />
                <FieldErrorText errors=errors field="vencimento"/>
            </label>

            <label class="field">
                <span>"Receitas:"</span>
                {move || {
                    if receitas_state.get().loading && receitas.with(|r| r.is_empty()) {
                        view! {
                            <span class="field-hint loading-hint">"Aguarde " <LoadingSpinner/></span>
                        }
                        .into_view()
                    } else if receitas.with(|r| r.is_empty()) {
                        view! { <span class="field-hint">"Nenhuma receita encontrada"</span> }.into_view()
                    } else {
                        view! {
                            <select
                                prop:value=""
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    if value.is_empty() {
                                        return;
                                    }
                                    if let Some(receita) = receitas
                                        .get_untracked()
                                        .into_iter()
                                        .find(|r| r.id == value)
                                    {
                                        selecao.update(|s| s.add(receita.id, receita.produto.nome));
                                    }
                                }
                            >
                                <option value="">"Selecione uma receita"</option>
                                <For
                                    // active recipes of products whose type is
                                    // still active, not yet selected
                                    each=move || {
                                        let selected = selecao.get();
                                        receitas
                                            .get()
                                            .into_iter()
                                            .filter(|r| r.ativo)
                                            .filter(|r| r.produto.tipo_produto.ativo)
                                            .filter(|r| !selected.contains(&r.id))
                                            .collect::<Vec<_>>()
                                    }
                                    key=|r| r.id.clone()
                                    children=move |receita: Receita| {
                                        view! {
                                            <option value=receita.id.clone()>{receita.produto.nome.clone()}</option>
                                        }
                                    }
                                />
                            </select>
                        }
                        .into_view()
                    }
                }}
            </label>

            <div class="line-items">
                <For
                    each=move || selecao.get().items().to_vec()
                    key=|item| item.id.clone()
                    children=move |item: LineItem| {
                        let id = item.id.clone();
                        let set_qty = {
                            let id = id.clone();
                            move |ev| {
                                let qty = parse_u32(&event_target_value(&ev));
                                selecao.update(|s| s.set_quantidade(&id, qty as f64));
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
            <FieldErrorText errors=errors field="receitas"/>

            <Show when=move || server_error.with(|e| e.is_some())>
                <p class="form-error">{move || server_error.get().unwrap_or_default()}</p>
            </Show>

            <SubmitButton saving=saving disabled=Signal::derive(move || entity.get().loading)/>
        </form>
    }
}

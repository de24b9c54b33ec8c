//! Sales: list with the sold-products modal, slide-in form and the
//! date-range report.
//!
//! A sale is created open, then closed (sending the per-line returned
//! quantities) or canceled. Stock reconciliation is the server's job; the
//! returned quantities in the closing payload are advisory.

use leptos::ev::SubmitEvent;
use leptos::logging::warn;
use leptos::*;
use leptos_router::*;
use wasm_bindgen_futures::spawn_local;

use pop_core::format::{format_brl, format_epoch_ms};
use pop_core::lines::{LineItem, LineSelection};
use pop_core::model::{
    collection, FechaVenda, FechaVendaLinha, NovaVenda, NovaVendaLinha, Produto, ProdutoVenda,
    Venda, VendaStatus, Vendedor,
};
use pop_core::validate::{self, FieldErrors};

use crate::api::{self, ApiClient};
use crate::components::icons::{FileIcon, PlusIcon, XIcon};
use crate::components::{
    DateRangeModal, EmptyState, FieldErrorText, LoadingSpinner, Modal, NoRecordsModal,
    PaginationBar, RetryNotice, SubmitButton, TableSkeleton,
};
use crate::download;
use crate::pages::{number_input_value, parse_u32};
use crate::panel::{PanelController, SlidePanel};
use crate::resource::{use_collection, use_entity, use_paged_list, ResourceStore};

#[component]
pub fn VendasPage() -> impl IntoView {
    let list = use_paged_list(collection::VENDA);
    let state = list.state;
    let vendas = list.items::<Venda>();
    let produtos_modal = create_rw_signal(Option::<Vec<ProdutoVenda>>::None);
    let report_open = create_rw_signal(false);
    let report_busy = create_rw_signal(false);
    let no_records = create_rw_signal(false);

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
                    .get::<Vec<Venda>>(&format!("/venda/report?start={start}&end={end}"))
                    .await;
                report_busy.set(false);
                report_open.set(false);
                match result {
                    Ok(vendas) => {
                        if vendas.is_empty() {
                            no_records.set(true);
                            return;
                        }
                        let builder = ReportBuilderParts::build(&vendas);
                        download::save_text_file(
                            &format!("relatorio_vendas_{}.txt", download::date_stamp()),
                            &pop_core::report::render_text(&builder.finish()),
                        );
                    }
                    Err(err) => warn!("falha ao gerar relatório de vendas: {err}"),
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
                <A href="/vendas/form" class="btn btn-primary">
                    <PlusIcon/>
                    <span>"Nova Venda"</span>
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
                    view! { <TableSkeleton columns=7/> }.into_view()
                } else if vendas.with(|v| v.is_empty()) {
                    view! { <EmptyState/> }.into_view()
                } else {
                    view! {
                        <div class="table-card">
                            <table>
                                <thead>
                                    <tr>
                                        <th>"Data"</th>
                                        <th>"Total"</th>
                                        <th>"Saída"</th>
                                        <th>"Volta"</th>
                                        <th>"Status"</th>
                                        <th>"Vendedor"</th>
                                        <th>"Produtos"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || vendas.get()
                                        key=|v| v.id.clone()
                                        children=move |venda: Venda| {
                                            let saida: u32 = venda.produto_venda.iter().map(|p| p.quantidade_saida).sum();
                                            let volta: u32 = venda.produto_venda.iter().map(|p| p.quantidade_volta).sum();
                                            let produtos = venda.produto_venda.clone();
                                            let ver = move |_| produtos_modal.set(Some(produtos.clone()));
                                            let vendedor = venda
                                                .vendedor
                                                .as_ref()
                                                .map(|v| v.nome.clone())
                                                .unwrap_or_else(|| "---".to_string());
                                            view! {
                                                <tr>
                                                    <td>
                                                        <A href=format!("/vendas/form/{}", venda.id) class="row-link">
                                                            {format_epoch_ms(venda.data_criacao)}
                                                        </A>
                                                    </td>
                                                    <td>{format_brl(venda.total)}</td>
                                                    <td>{saida}</td>
                                                    <td>{volta}</td>
                                                    <td>{venda.status.label()}</td>
                                                    <td>{vendedor}</td>
                                                    <td>
                                                        <button type="button" class="link-btn" on:click=ver>
                                                            "Ver produtos"
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

        <Show when=move || produtos_modal.with(|p| p.is_some())>
            <Modal on_close=Callback::new(move |_| produtos_modal.set(None))>
                <h2 class="modal-title">"Produtos da Venda"</h2>
                <ul class="detail-list">
                    {move || {
                        produtos_modal
                            .get()
                            .unwrap_or_default()
                            .into_iter()
                            .map(|pv| {
                                let subtotal = pv.valor * f64::from(pv.quantidade_saida);
                                view! {
                                    <li>
                                        <span>{pv.nome.clone()}</span>
                                        <span class="detail-qty">
                                            {format!(
                                                "{} x {} = {}",
                                                pv.quantidade_saida,
                                                format_brl(pv.valor),
                                                format_brl(subtotal)
                                            )}
                                        </span>
                                    </li>
                                }
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

/// Free-form sales report: one block per sale, line items indented, page
/// breaks kept outside blocks.
struct ReportBuilderParts;

impl ReportBuilderParts {
    fn build(vendas: &[Venda]) -> pop_core::report::ReportBuilder {
        let mut builder = pop_core::report::ReportBuilder::new(
            "Relatório de Vendas",
            download::generated_at_label(),
        );
        for venda in vendas {
            builder.ensure_room(5 + venda.produto_venda.len());
            builder.push_line(format!("Data: {}", format_epoch_ms(venda.data_criacao)));
            builder.push_line(format!("Status: {}", venda.status.label()));
            builder.push_line(format!("Total: {}", format_brl(venda.total)));
            let vendedor = venda
                .vendedor
                .as_ref()
                .map(|v| format!("{} ({})", v.nome, v.telefone))
                .unwrap_or_else(|| "---".to_string());
            builder.push_line(format!("Vendedor: {vendedor}"));
            builder.push_line("Produtos:");
            for pv in &venda.produto_venda {
                let subtotal = pv.valor * f64::from(pv.quantidade_saida);
                builder.push_line(format!(
                    "  {} - {} x {} = {}",
                    pv.nome,
                    pv.quantidade_saida,
                    format_brl(pv.valor),
                    format_brl(subtotal)
                ));
            }
            builder.blank_line();
        }
        builder
    }
}

#[component]
pub fn VendaFormPage() -> impl IntoView {
    view! {
        <SlidePanel title="Venda">
            <VendaForm/>
        </SlidePanel>
    }
}

#[component]
fn VendaForm() -> impl IntoView {
    let params = use_params_map();
    let id = create_memo(move |_| params.with(|p| p.get("id").cloned()));
    let entity = use_entity(collection::VENDA, move || id.get());
    let vendedores_state = use_collection(collection::VENDEDOR);
    let vendedores = Signal::derive(move || {
        vendedores_state
            .get()
            .decode::<Vec<Vendedor>>()
            .unwrap_or_default()
    });
    let produtos_state = use_collection(collection::PRODUTO);
    let produtos = Signal::derive(move || {
        produtos_state
            .get()
            .decode::<Vec<Produto>>()
            .unwrap_or_default()
    });

    let venda = Signal::derive(move || entity.get().decode::<Venda>());
    let status = Signal::derive(move || {
        venda
            .get()
            .map(|v| v.status)
            .unwrap_or(VendaStatus::Opened)
    });
    let editing = move || id.get().is_some();
    let editable = move || !editing() || status.get() == VendaStatus::Opened;

    let vendedor_id = create_rw_signal(String::new());
    let selecao = create_rw_signal(LineSelection::new());
    let errors = create_rw_signal(FieldErrors::new());
    let saving = create_rw_signal(false);
    let server_error = create_rw_signal(Option::<String>::None);

    let hydrated = store_value(false);
    create_effect(move |_| {
        if hydrated.get_value() || id.get().is_none() {
            return;
        }
        if let Some(v) = venda.get() {
            vendedor_id.set(v.vendedor.as_ref().map(|v| v.id.clone()).unwrap_or_default());
            selecao.set(LineSelection::from_items(
                v.produto_venda
                    .into_iter()
                    .map(|pv| LineItem {
                        id: pv.id,
                        nome: pv.nome,
                        quantidade: f64::from(pv.quantidade_saida),
                        quantidade_volta: pv.quantidade_volta,
                    })
                    .collect(),
            ));
            hydrated.set_value(true);
        }
    });

    let client = expect_context::<ApiClient>();
    let store = expect_context::<ResourceStore>();
    let panel = expect_context::<PanelController>();

    // stock ceiling for the quantity input of a picked product
    let estoque_de = move |produto_id: &str| -> f64 {
        produtos
            .get_untracked()
            .iter()
            .find(|p| p.id == produto_id)
            .map(|p| p.estoque)
            .unwrap_or(0.0)
    };

    let finish_mutation = {
        let client = client.clone();
        let store = store.clone();
        Callback::new(move |result: Result<(), crate::api::ApiError>| {
            saving.set(false);
            match result {
                Ok(()) => {
                    store.invalidate_collection(&client, collection::VENDA);
                    panel.request_close();
                }
                Err(err) => server_error.set(Some(err.user_message())),
            }
        })
    };

    let on_submit = {
        let client = client.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            // the submit path only creates; edit mode mutates through the
            // close/cancel actions
            if saving.get_untracked() || editing() {
                return;
            }

            let mut field_errors = FieldErrors::new();
            validate::require_lines(
                &mut field_errors,
                "produtos",
                &selecao.with_untracked(|s| s.quantidades()),
            );
            let blocked = !field_errors.is_empty();
            errors.set(field_errors);
            if blocked {
                return;
            }

            saving.set(true);
            server_error.set(None);

            let body = NovaVenda {
                vendedor_id: vendedor_id.get_untracked(),
                produto_venda: selecao.with_untracked(|s| {
                    s.items()
                        .iter()
                        .map(|item| NovaVendaLinha {
                            product_id: item.id.clone(),
                            quantidade_saida: item.quantidade as u32,
                        })
                        .collect()
                }),
            };

            let client = client.clone();
            spawn_local(async move {
                let result = client
                    .post(&api::collection_key(collection::VENDA), &body)
                    .await;
                finish_mutation.call(result);
            });
        }
    };

    let fechar_venda = {
        let client = client.clone();
        move |_| {
            let Some(id) = id.get_untracked() else { return };
            if saving.get_untracked() {
                return;
            }
            saving.set(true);
            server_error.set(None);

            let body = FechaVenda {
                produtos_venda: selecao.with_untracked(|s| {
                    s.items()
                        .iter()
                        .map(|item| FechaVendaLinha {
                            produto_venda_id: item.id.clone(),
                            quantidade_volta: item.quantidade_volta,
                        })
                        .collect()
                }),
            };

            let client = client.clone();
            spawn_local(async move {
                let result = client
                    .post(&api::entity_key(collection::VENDA, &id), &body)
                    .await;
                finish_mutation.call(result);
            });
        }
    };

    let cancelar_venda = {
        let client = client.clone();
        move |_| {
            let Some(id) = id.get_untracked() else { return };
            if saving.get_untracked() {
                return;
            }
            saving.set(true);
            server_error.set(None);

            let client = client.clone();
            spawn_local(async move {
                let result = client
                    .delete(&api::entity_key(collection::VENDA, &id))
                    .await;
                finish_mutation.call(result);
            });
        }
    };

    view! {
        <form class="panel-form" on:submit=on_submit>
            <label class="field">
                <span>"Status:"</span>
                <input
                    type="text"
                    disabled
                    prop:value=move || if editing() {
                        status.get().label().to_string()
                    } else {
                        VendaStatus::Opened.label().to_string()
                    }
                />
            </label>

            <Show when=move || editing() && status.get() == VendaStatus::Opened>
                <div class="form-actions">
                    <button
                        type="button"
                        class="btn btn-primary"
                        disabled=move || saving.get() || entity.get().loading
                        on:click=fechar_venda.clone()
                    >
                        <Show when=move || saving.get() fallback=|| "Fechar Venda">
                            <LoadingSpinner/>
                        </Show>
                    </button>
                    <button
                        type="button"
                        class="btn btn-primary"
                        disabled=move || saving.get() || entity.get().loading
                        on:click=cancelar_venda.clone()
                    >
                        <Show when=move || saving.get() fallback=|| "Cancelar Venda">
                            <LoadingSpinner/>
                        </Show>
                    </button>
                </div>
            </Show>

            <label class="field">
                <span>"Vendedor:"</span>
                <Show
                    when=move || !editing()
                    fallback=move || view! {
                        <input
                            type="text"
                            disabled
                            prop:value=move || {
                                venda
                                    .get()
                                    .and_then(|v| v.vendedor.map(|v| v.nome))
                                    .unwrap_or_default()
                            }
                        />
                    }
                >
                    {move || {
                        if vendedores_state.get().loading && vendedores.with(|v| v.is_empty()) {
                            view! {
                                <span class="field-hint loading-hint">"Aguarde " <LoadingSpinner/></span>
                            }
                            .into_view()
                        } else {
                            view! {
                                <select
                                    prop:value=move || vendedor_id.get()
                                    on:change=move |ev| vendedor_id.set(event_target_value(&ev))
                                >
                                    <option value="">"Selecione um vendedor"</option>
                                    <For
                                        each=move || {
                                            vendedores
                                                .get()
                                                .into_iter()
                                                .filter(|v| v.ativo)
                                                .collect::<Vec<_>>()
                                        }
                                        key=|v| v.id.clone()
                                        children=move |vendedor: Vendedor| {
                                            view! {
                                                <option value=vendedor.id.clone()>{vendedor.nome.clone()}</option>
                                            }
                                        }
                                    />
                                </select>
                            }
                            .into_view()
                        }
                    }}
                </Show>
            </label>

            <Show when=move || !editing()>
                <label class="field">
                    <span>"Produtos:"</span>
                    <select
                        prop:value=""
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            if value.is_empty() {
                                return;
                            }
                            if let Some(produto) = produtos
                                .get_untracked()
                                .into_iter()
                                .find(|p| p.id == value)
                            {
                                selecao.update(|s| s.add(produto.id, produto.nome));
                            }
                        }
                    >
                        <option value="">"Selecione um produto"</option>
                        <For
                            each=move || {
                                let selected = selecao.get();
                                produtos
                                    .get()
                                    .into_iter()
                                    .filter(|p| p.ativo)
                                    .filter(|p| !selected.contains(&p.id))
                                    .collect::<Vec<_>>()
                            }
                            key=|p| p.id.clone()
                            children=move |produto: Produto| {
                                view! { <option value=produto.id.clone()>{produto.nome.clone()}</option> }
                            }
                        />
                    </select>
                </label>
            </Show>

            <div class="line-items">
                <For
                    each=move || selecao.get().items().to_vec()
                    key=|item| item.id.clone()
                    children=move |item: LineItem| {
                        let id = item.id.clone();
                        let max = estoque_de(&id);
                        let set_qty = {
                            let id = id.clone();
                            move |ev| {
                                let qty = parse_u32(&event_target_value(&ev));
                                selecao.update(|s| s.set_quantidade(&id, f64::from(qty)));
                            }
                        };
                        let set_volta = {
                            let id = id.clone();
                            move |ev| {
                                let volta = parse_u32(&event_target_value(&ev));
                                selecao.update(|s| s.set_quantidade_volta(&id, volta));
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
                                    max=number_input_value(max)
                                    class="line-qty"
                                    disabled=move || !editable()
                                    prop:value=number_input_value(item.quantidade)
                                    on:input=set_qty
                                />
                                <Show when=move || editing()>
                                    <input
                                        type="number"
                                        min="0"
                                        class="line-qty"
                                        aria-label="Quantidade devolvida"
                                        disabled=move || status.get() != VendaStatus::Opened
                                        prop:value=item.quantidade_volta.to_string()
                                        on:input=set_volta.clone()
                                    />
                                </Show>
                                <Show when=move || !editing()>
                                    <button type="button" class="icon-btn line-remove" aria-label="Remover" on:click=remove.clone()>
                                        <XIcon/>
                                    </button>
                                </Show>
                            </div>
                        }
                    }
                />
            </div>
            <FieldErrorText errors=errors field="produtos"/>

            <Show when=move || server_error.with(|e| e.is_some())>
                <p class="form-error">{move || server_error.get().unwrap_or_default()}</p>
            </Show>

            <Show when=move || !editing()>
                <SubmitButton saving=saving disabled=Signal::derive(move || entity.get().loading)/>
            </Show>
        </form>
    }
}

//! Raw materials: list, slide-in form and the stock-range report.

use leptos::ev::SubmitEvent;
use leptos::logging::warn;
use leptos::*;
use leptos_router::*;
use wasm_bindgen_futures::spawn_local;

use pop_core::model::{collection, MateriaPrima, MateriaPrimaPayload, UnidadeMedida};
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
use crate::resource::{use_entity, use_paged_list, ResourceStore};

#[component]
pub fn MateriasPrimasPage() -> impl IntoView {
    let list = use_paged_list(collection::MATERIA_PRIMA);
    let state = list.state;
    let materias = list.items::<MateriaPrima>();
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
                    .get::<Vec<MateriaPrima>>(&format!(
                        "/materia-prima/report?start={start}&end={end}"
                    ))
                    .await;
                report_busy.set(false);
                report_open.set(false);
                match result {
                    Ok(materias) => {
                        if materias.is_empty() {
                            no_records.set(true);
                            return;
                        }
                        let mut builder = ReportBuilder::new(
                            "Relatório de Matérias Primas",
                            download::generated_at_label(),
                        )
                        .with_columns(&["Nome", "Estoque", "Unidade de medida", "Ativo"]);
                        for mp in &materias {
                            builder.push_row(&[
                                &mp.nome,
                                &number_input_value(mp.quantidade_estoque),
                                mp.unidade_medida.label(),
                                if mp.ativo { "Sim" } else { "Não" },
                            ]);
                        }
                        download::save_text_file(
                            &format!("relatorio_materias_primas_{}.txt", download::date_stamp()),
                            &render_text(&builder.finish()),
                        );
                    }
                    Err(err) => warn!("falha ao gerar relatório de matérias primas: {err}"),
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
                <A href="/materias-primas/form" class="btn btn-primary">
                    <PlusIcon/>
                    <span>"Nova Matéria Prima"</span>
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
                } else if materias.with(|m| m.is_empty()) {
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
                                        <th>"Un. Medida"</th>
                                        <th>"Ativo"</th>
                                        <th>"Ações"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || materias.get()
                                        key=|mp| mp.id.clone()
                                        children=move |mp: MateriaPrima| {
                                            let edit = {
                                                let navigate = navigate.clone();
                                                let id = mp.id.clone();
                                                move |_| navigate(&format!("/materias-primas/form/{id}"), Default::default())
                                            };
                                            view! {
                                                <tr>
                                                    <td>{mp.nome.clone()}</td>
                                                    <td>{number_input_value(mp.quantidade_estoque)}</td>
                                                    <td>{mp.unidade_medida.label()}</td>
                                                    <td><StatusBadge ativo=mp.ativo/></td>
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
pub fn MateriaPrimaFormPage() -> impl IntoView {
    view! {
        <SlidePanel title="Matéria Prima">
            <MateriaPrimaForm/>
        </SlidePanel>
    }
}

#[component]
fn MateriaPrimaForm() -> impl IntoView {
    let params = use_params_map();
    let id = create_memo(move |_| params.with(|p| p.get("id").cloned()));
    let entity = use_entity(collection::MATERIA_PRIMA, move || id.get());

    let ativo = create_rw_signal(String::from("true"));
    let nome = create_rw_signal(String::new());
    let estoque = create_rw_signal(String::new());
    let unidade = create_rw_signal(UnidadeMedida::QuilogramaKg.code().to_string());
    let errors = create_rw_signal(FieldErrors::new());
    let saving = create_rw_signal(false);
    let server_error = create_rw_signal(Option::<String>::None);

    let hydrated = store_value(false);
    create_effect(move |_| {
        if hydrated.get_value() || id.get().is_none() {
            return;
        }
        if let Some(mp) = entity.get().decode::<MateriaPrima>() {
            ativo.set(if mp.ativo { "true" } else { "false" }.to_string());
            nome.set(mp.nome);
            estoque.set(number_input_value(mp.quantidade_estoque));
            unidade.set(mp.unidade_medida.code().to_string());
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
        validate::require_non_negative(&mut field_errors, "quantidadeEstoque", &estoque.get_untracked());
        let blocked = !field_errors.is_empty();
        errors.set(field_errors);
        if blocked {
            return;
        }

        saving.set(true);
        server_error.set(None);

        let payload = MateriaPrimaPayload {
            nome: nome.get_untracked(),
            quantidade_estoque: parse_f64(&estoque.get_untracked()),
            unidade_medida: UnidadeMedida::from_code(&unidade.get_untracked())
                .unwrap_or_default(),
            ativo: ativo.get_untracked() == "true",
        };

        let client = client.clone();
        let store = store.clone();
        spawn_local(async move {
            let result = match id.get_untracked() {
                None => {
                    client
                        .post(&api::collection_key(collection::MATERIA_PRIMA), &payload)
                        .await
                }
                Some(id) => {
                    client
                        .put(&api::entity_key(collection::MATERIA_PRIMA, &id), &payload)
                        .await
                }
            };
            saving.set(false);
            match result {
                Ok(()) => {
                    store.invalidate_collection(&client, collection::MATERIA_PRIMA);
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
                <span>"Unidade de Medida:"</span>
                <select
                    prop:value=move || unidade.get()
                    on:change=move |ev| unidade.set(event_target_value(&ev))
                >
                    {UnidadeMedida::ALL.map(|u| view! {
                        <option value=u.code()>
                            {format!("{} ({})", u.label(), u.abreviacao())}
                        </option>
                    }).collect_view()}
                </select>
            </label>

            <label class="field">
                <span>"Nome:"</span>
                <input
                    type="text"
                    placeholder="Açúcar..."
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
                <FieldErrorText errors=errors field="quantidadeEstoque"/>
            </label>

            <Show when=move || server_error.with(|e| e.is_some())>
                <p class="form-error">{move || server_error.get().unwrap_or_default()}</p>
            </Show>

            <SubmitButton saving=saving disabled=Signal::derive(move || entity.get().loading)/>
        </form>
    }
}

//! Sellers: list, slide-in form and the status-scoped report.

use leptos::ev::SubmitEvent;
use leptos::logging::warn;
use leptos::*;
use leptos_router::*;
use wasm_bindgen_futures::spawn_local;

use pop_core::format;
use pop_core::listing::ArmedDelete;
use pop_core::model::{collection, Vendedor, VendedorPayload};
use pop_core::report::{render_text, ReportBuilder};
use pop_core::validate::{self, FieldErrors};

use crate::api::{self, ApiClient};
use crate::components::icons::{CheckCircleIcon, FileIcon, PlusIcon, TrashIcon};
use crate::components::{
    EmptyState, FieldErrorText, LoadingSpinner, Modal, NoRecordsModal, PaginationBar, RetryNotice,
    StatusBadge, SubmitButton, TableSkeleton,
};
use crate::download;
use crate::panel::{PanelController, SlidePanel};
use crate::pages::{number_input_value, parse_f64};
use crate::resource::{use_entity, use_paged_list, ResourceStore};

#[component]
pub fn VendedoresPage() -> impl IntoView {
    let list = use_paged_list(collection::VENDEDOR);
    let state = list.state;
    let vendedores = list.items::<Vendedor>();
    let armed = create_rw_signal(ArmedDelete::default());
    let deleting = create_rw_signal(false);
    let report_open = create_rw_signal(false);
    let no_records = create_rw_signal(false);

    let client = expect_context::<ApiClient>();

    let delete_vendedor = {
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
                    .delete(&api::entity_key(collection::VENDEDOR, &id))
                    .await;
                // the armed flag never survives the attempt
                armed.update(|a| a.disarm());
                deleting.set(false);
                match result {
                    Ok(()) => list.invalidate(),
                    Err(err) => warn!("falha ao desativar vendedor: {err}"),
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
                <A href="/vendedores/form" class="btn btn-primary">
                    <PlusIcon/>
                    <span>"Novo Vendedor"</span>
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
                } else if vendedores.with(|v| v.is_empty()) {
                    view! { <EmptyState/> }.into_view()
                } else {
                    view! {
                        <div class="table-card">
                            <table>
                                <thead>
                                    <tr>
                                        <th>"Nome"</th>
                                        <th>"Comissão"</th>
                                        <th>"Telefone"</th>
                                        <th>"Ativo"</th>
                                        <th>"Ações"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For
                                        each=move || vendedores.get()
                                        key=|v| v.id.clone()
                                        children=move |vendedor: Vendedor| {
                                            let id = vendedor.id.clone();
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
                                                move |_| delete_vendedor.call(id.clone())
                                            };
                                            view! {
                                                <tr>
                                                    <td>
                                                        <A href=format!("/vendedores/form/{}", vendedor.id) class="row-link">
                                                            {vendedor.nome.clone()}
                                                        </A>
                                                    </td>
                                                    <td>{format::format_percent(vendedor.comissao)}</td>
                                                    <td>{format::format_phone(&vendedor.telefone)}</td>
                                                    <td><StatusBadge ativo=vendedor.ativo/></td>
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
        <VendedorReportModal open=report_open no_records=no_records/>
        <NoRecordsModal visible=no_records/>
    }
}

/// Report scoped by active status: `GET /vendedor/report/{status}`.
#[component]
fn VendedorReportModal(open: RwSignal<bool>, no_records: RwSignal<bool>) -> impl IntoView {
    let client = expect_context::<ApiClient>();
    let busy = create_rw_signal(false);

    let generate = {
        let client = client.clone();
        Callback::new(move |status: bool| {
            if busy.get_untracked() {
                return;
            }
            busy.set(true);
            let client = client.clone();
            spawn_local(async move {
                let result = client
                    .get::<Vec<Vendedor>>(&format!("/vendedor/report/{status}"))
                    .await;
                busy.set(false);
                open.set(false);
                match result {
                    Ok(vendedores) => {
                        if vendedores.is_empty() {
                            no_records.set(true);
                            return;
                        }
                        let mut builder = ReportBuilder::new(
                            "Relatório de Vendedores",
                            download::generated_at_label(),
                        )
                        .with_columns(&["Nome", "Comissão", "Telefone", "Ativo"]);
                        for v in &vendedores {
                            builder.push_row(&[
                                &v.nome,
                                &format::format_percent(v.comissao),
                                &format::format_phone(&v.telefone),
                                if v.ativo { "Sim" } else { "Não" },
                            ]);
                        }
                        let suffix = if status { "ativos" } else { "inativos" };
                        download::save_text_file(
                            &format!(
                                "relatorio_vendedores_{}_{}.txt",
                                suffix,
                                download::date_stamp()
                            ),
                            &render_text(&builder.finish()),
                        );
                    }
                    Err(err) => warn!("falha ao gerar relatório de vendedores: {err}"),
                }
            });
        })
    };

    view! {
        <Show when=move || open.get()>
            <Modal on_close=Callback::new(move |_| open.set(false))>
                <h2 class="modal-title">
                    {move || if busy.get() {
                        "Aguarde..."
                    } else {
                        "Qual Status deseja considerar no seu relatório?"
                    }}
                </h2>
                <Show when=move || !busy.get() fallback=|| view! { <LoadingSpinner/> }>
                    <div class="modal-actions">
                        <button type="button" class="btn btn-primary btn-block" on:click=move |_| generate.call(true)>
                            "Ativos"
                        </button>
                        <button type="button" class="btn btn-primary btn-block" on:click=move |_| generate.call(false)>
                            "Inativos"
                        </button>
                    </div>
                </Show>
            </Modal>
        </Show>
    }
}

#[component]
pub fn VendedorFormPage() -> impl IntoView {
    view! {
        <SlidePanel title="Vendedor">
            <VendedorForm/>
        </SlidePanel>
    }
}

#[component]
fn VendedorForm() -> impl IntoView {
    let params = use_params_map();
    let id = create_memo(move |_| params.with(|p| p.get("id").cloned()));
    let entity = use_entity(collection::VENDEDOR, move || id.get());

    let ativo = create_rw_signal(String::from("true"));
    let nome = create_rw_signal(String::new());
    let cpf = create_rw_signal(String::new());
    let telefone = create_rw_signal(String::new());
    let comissao = create_rw_signal(String::new());
    let errors = create_rw_signal(FieldErrors::new());
    let saving = create_rw_signal(false);
    let server_error = create_rw_signal(Option::<String>::None);

    // Populate once from the fetched record; later edits win.
    let hydrated = store_value(false);
    create_effect(move |_| {
        if hydrated.get_value() || id.get().is_none() {
            return;
        }
        if let Some(v) = entity.get().decode::<Vendedor>() {
            ativo.set(if v.ativo { "true" } else { "false" }.to_string());
            nome.set(v.nome);
            cpf.set(v.cpf);
            telefone.set(v.telefone);
            // the form edits the commission as a percentage
            comissao.set(number_input_value(v.comissao * 100.0));
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
        validate::require_cpf(&mut field_errors, "cpf", &cpf.get_untracked());
        validate::require_non_negative(&mut field_errors, "comissao", &comissao.get_untracked());
        let blocked = !field_errors.is_empty();
        errors.set(field_errors);
        if blocked {
            return;
        }

        saving.set(true);
        server_error.set(None);

        let payload = VendedorPayload {
            nome: nome.get_untracked(),
            cpf: cpf.get_untracked(),
            telefone: telefone.get_untracked(),
            comissao: parse_f64(&comissao.get_untracked()) / 100.0,
            ativo: id
                .get_untracked()
                .is_some()
                .then(|| ativo.get_untracked() == "true"),
        };

        let client = client.clone();
        let store = store.clone();
        spawn_local(async move {
            let result = match id.get_untracked() {
                None => {
                    client
                        .post(&api::collection_key(collection::VENDEDOR), &payload)
                        .await
                }
                Some(id) => {
                    client
                        .put(&api::entity_key(collection::VENDEDOR, &id), &payload)
                        .await
                }
            };
            saving.set(false);
            match result {
                Ok(()) => {
                    store.invalidate_collection(&client, collection::VENDEDOR);
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
                    placeholder="Ex: João"
                    prop:value=move || nome.get()
                    disabled=move || saving.get()
                    on:input=move |ev| nome.set(event_target_value(&ev))
                />
                <FieldErrorText errors=errors field="nome"/>
            </label>

            <label class="field">
                <span>"CPF:"</span>
                <input
                    type="text"
                    placeholder="xxx.xxx.xxx.xx"
                    maxlength="11"
                    prop:value=move || cpf.get()
                    disabled=move || saving.get()
                    on:input=move |ev| cpf.set(event_target_value(&ev))
                />
                <FieldErrorText errors=errors field="cpf"/>
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
                <span>"Comissão (%):"</span>
                <input
                    type="text"
                    placeholder="5"
                    prop:value=move || comissao.get()
                    disabled=move || saving.get()
                    on:input=move |ev| comissao.set(event_target_value(&ev))
                />
                <FieldErrorText errors=errors field="comissao"/>
            </label>

            <Show when=move || server_error.with(|e| e.is_some())>
                <p class="form-error">{move || server_error.get().unwrap_or_default()}</p>
            </Show>

            <SubmitButton saving=saving disabled=Signal::derive(move || entity.get().loading)/>
        </form>
    }
}

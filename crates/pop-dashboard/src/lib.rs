//! Manhattan Pop! Dashboard - Leptos-based WebAssembly UI
//!
//! Single-page administrative dashboard for the Manhattan Pop! business:
//! users, product types, products, raw materials, recipes, production
//! batches, sellers, clients and sales, all backed by a remote REST API.
//!
//! ## Architecture
//!
//! The app runs entirely in the browser via WebAssembly:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       Browser                            │
//! │  ┌──────────────────────────────────────────────────┐    │
//! │  │            pop-dashboard (WASM)                  │    │
//! │  │  ┌────────┐  ┌───────────┐  ┌───────────────┐    │    │
//! │  │  │ Leptos │→ │ resource  │→ │ gloo-net HTTP │    │    │
//! │  │  │ pages  │  │ cache     │  │ + bearer auth │    │    │
//! │  │  └────────┘  └───────────┘  └───────┬───────┘    │    │
//! │  └──────────────────────────────────────┼───────────┘    │
//! └─────────────────────────────────────────┼────────────────┘
//!                                           │ HTTP
//!                              ┌────────────▼────────────┐
//!                              │   Manhattan Pop! API    │
//!                              │  (/{entity}, /auth/*)   │
//!                              └─────────────────────────┘
//! ```
//!
//! Every list view reads through the keyed resource cache
//! ([`resource::ResourceStore`]); every form mutates through the API
//! client and invalidates the owning collection, so the originating list
//! reflects the change without a page reload. Session expiry (401) is
//! handled globally: credential cleared, logout signal raised, router
//! shell redirects to the login screen.

pub mod api;
pub mod components;
pub mod config;
pub mod download;
pub mod pages;
pub mod panel;
pub mod resource;
pub mod session;

use leptos::*;
use leptos_router::*;

use crate::api::ApiClient;
use crate::components::ProtectedShell;
use crate::config::DashboardConfig;
use crate::pages::clientes::{ClienteFormPage, ClientesPage};
use crate::pages::login::LoginPage;
use crate::pages::materias_primas::{MateriaPrimaFormPage, MateriasPrimasPage};
use crate::pages::producoes::{ProducaoFormPage, ProducoesPage};
use crate::pages::produtos::{ProdutoFormPage, ProdutosPage};
use crate::pages::receitas::{ReceitaFormPage, ReceitasPage};
use crate::pages::tipos_produtos::{TipoProdutoFormPage, TiposProdutosPage};
use crate::pages::usuarios::{UsuarioFormPage, UsuariosPage};
use crate::pages::vendas::{VendaFormPage, VendasPage};
use crate::pages::vendedores::{VendedorFormPage, VendedoresPage};
use crate::resource::ResourceStore;
use crate::session::{LogoutSignal, SessionContext};

/// Main application component: context wiring plus the route table.
/// Form routes nest under their list route and render into its
/// `<Outlet/>` as a slide-in panel.
#[component]
pub fn App() -> impl IntoView {
    // Better panic messages while debugging in the browser
    console_error_panic_hook::set_once();

    let config = DashboardConfig::load();
    let session = SessionContext::browser();
    let logout = LogoutSignal(create_rw_signal(false));
    {
        let signal = logout.0;
        session.set_expire_hook(move || signal.set(true));
    }
    let client = ApiClient::new(&config, session.clone());

    provide_context(config);
    provide_context(session);
    provide_context(logout);
    provide_context(client);
    provide_context(ResourceStore::new());

    view! {
        <Router>
            <Routes>
                <Route path="/" view=LoginPage/>
                <Route path="/login" view=LoginPage/>

                <Route path="" view=ProtectedShell>
                    <Route path="usuarios" view=UsuariosPage>
                        <Route path="form" view=UsuarioFormPage/>
                        <Route path="form/:id" view=UsuarioFormPage/>
                        <Route path="" view=|| ()/>
                    </Route>

                    <Route path="tipos-produtos" view=TiposProdutosPage>
                        <Route path="form" view=TipoProdutoFormPage/>
                        <Route path="form/:id" view=TipoProdutoFormPage/>
                        <Route path="" view=|| ()/>
                    </Route>

                    <Route path="produtos" view=ProdutosPage>
                        <Route path="form" view=ProdutoFormPage/>
                        <Route path="form/:id" view=ProdutoFormPage/>
                        <Route path="" view=|| ()/>
                    </Route>

                    <Route path="materias-primas" view=MateriasPrimasPage>
                        <Route path="form" view=MateriaPrimaFormPage/>
                        <Route path="form/:id" view=MateriaPrimaFormPage/>
                        <Route path="" view=|| ()/>
                    </Route>

                    <Route path="receitas" view=ReceitasPage>
                        <Route path="form" view=ReceitaFormPage/>
                        <Route path="form/:id" view=ReceitaFormPage/>
                        <Route path="" view=|| ()/>
                    </Route>

                    <Route path="producoes" view=ProducoesPage>
                        <Route path="form" view=ProducaoFormPage/>
                        <Route path="form/:id" view=ProducaoFormPage/>
                        <Route path="" view=|| ()/>
                    </Route>

                    <Route path="vendedores" view=VendedoresPage>
                        <Route path="form" view=VendedorFormPage/>
                        <Route path="form/:id" view=VendedorFormPage/>
                        <Route path="" view=|| ()/>
                    </Route>

                    <Route path="clientes" view=ClientesPage>
                        <Route path="form" view=ClienteFormPage/>
                        <Route path="form/:id" view=ClienteFormPage/>
                        <Route path="" view=|| ()/>
                    </Route>

                    <Route path="vendas" view=VendasPage>
                        <Route path="form" view=VendaFormPage/>
                        <Route path="form/:id" view=VendaFormPage/>
                        <Route path="" view=|| ()/>
                    </Route>
                </Route>
            </Routes>
        </Router>
    }
}

/// Mount the application to the DOM
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    mount_to_body(|| view! { <App/> });
}

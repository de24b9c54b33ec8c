//! Sidebar navigation
//!
//! Branding, one link per entity collection with active-route
//! highlighting, and the logout button. On narrow screens the sidebar
//! collapses behind a menu toggle.

use leptos::*;
use leptos_router::*;

use super::icons::{LogOutIcon, MenuIcon, PopsicleIcon};
use crate::session::SessionContext;

const NAV_LINKS: [(&str, &str); 9] = [
    ("/usuarios", "Usuários"),
    ("/tipos-produtos", "Tipos de produto"),
    ("/produtos", "Produtos"),
    ("/materias-primas", "Matérias primas"),
    ("/receitas", "Receitas"),
    ("/producoes", "Produções"),
    ("/vendedores", "Vendedores"),
    ("/clientes", "Clientes"),
    ("/vendas", "Vendas"),
];

#[component]
pub fn Sidebar() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let navigate = use_navigate();
    let open = create_rw_signal(false);

    let logout = move |_| {
        session.clear();
        navigate("/login", Default::default());
    };

    view! {
        <button type="button" class="menu-toggle" aria-label="Menu" on:click=move |_| open.update(|o| *o = !*o)>
            <MenuIcon/>
        </button>

        <aside class="sidebar" class:open=move || open.get() role="navigation" aria-label="Navegação principal">
            <A href="/usuarios" class="logo">
                <PopsicleIcon/>
                <span class="logo-text">"Manhattan Pop!"</span>
            </A>

            <nav class="nav" aria-label="Coleções" on:click=move |_| open.set(false)>
                {NAV_LINKS
                    .into_iter()
                    .map(|(href, label)| view! {
                        <A href=href class="nav-link" active_class="active">
                            {label}
                        </A>
                    })
                    .collect_view()}
            </nav>

            <button type="button" class="nav-link logout" on:click=logout>
                <span>"Sair"</span>
                <LogOutIcon/>
            </button>
        </aside>

        <Show when=move || open.get()>
            <div class="sidebar-backdrop" on:click=move |_| open.set(false)></div>
        </Show>
    }
}

//! Route guard and protected shell
//!
//! Entity routes render only behind a session token. The shell also
//! observes the global logout signal raised by the HTTP layer on 401, so
//! session expiry funnels into this single redirect site no matter which
//! request tripped it.

use leptos::*;
use leptos_router::*;

use super::sidebar::Sidebar;
use crate::session::{LogoutSignal, SessionContext};

/// Layout wrapper for every protected route: sidebar plus the routed
/// content, gated on session presence.
#[component]
pub fn ProtectedShell() -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let logout = expect_context::<LogoutSignal>();

    let navigate = use_navigate();
    create_effect(move |_| {
        if logout.0.get() {
            logout.0.set_untracked(false);
            navigate("/login", Default::default());
        }
    });

    view! {
        <Show
            when=move || session.is_authenticated()
            fallback=|| view! { <Redirect path="/login"/> }
        >
            <div class="app">
                <Sidebar/>
                <main class="main">
                    <Outlet/>
                </main>
            </div>
        </Show>
    }
}

//! Login screen
//!
//! Authenticates against `/auth/login`, stores the credential through the
//! session context and lands on the users list.

use leptos::ev::SubmitEvent;
use leptos::*;
use leptos_router::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::api::ApiClient;
use crate::components::icons::{EyeIcon, EyeOffIcon, PopsicleIcon};
use crate::components::LoadingSpinner;

#[component]
pub fn LoginPage() -> impl IntoView {
    let email = create_rw_signal(String::new());
    let senha = create_rw_signal(String::new());
    let show_password = create_rw_signal(false);
    let busy = create_rw_signal(false);
    let error = create_rw_signal(Option::<String>::None);

    let client = expect_context::<ApiClient>();
    let navigate = use_navigate();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        error.set(None);

        let client = client.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = client
                .login(&email.get_untracked(), &senha.get_untracked())
                .await;
            busy.set(false);
            match result {
                Ok(_) => navigate("/usuarios", Default::default()),
                Err(err) => error.set(Some(err.user_message())),
            }
        });
    };

    view! {
        <div class="login-screen">
            <div class="login-brand">
                <PopsicleIcon/>
                <h1>"Manhattan Pop!"</h1>
            </div>

            <div class="login-card">
                <h2>"Login"</h2>

                <form class="login-form" on:submit=on_submit>
                    <input
                        type="email"
                        placeholder="Email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />

                    <label class="password-field">
                        <input
                            type=move || if show_password.get() { "text" } else { "password" }
                            placeholder="Senha"
                            prop:value=move || senha.get()
                            on:input=move |ev| senha.set(event_target_value(&ev))
                        />
                        <button
                            type="button"
                            class="icon-btn password-toggle"
                            aria-label="Mostrar senha"
                            on:click=move |_| show_password.update(|s| *s = !*s)
                        >
                            <Show when=move || show_password.get() fallback=|| view! { <EyeOffIcon/> }>
                                <EyeIcon/>
                            </Show>
                        </button>
                    </label>

                    <Show when=move || error.with(|e| e.is_some())>
                        <p class="form-error">{move || error.get().unwrap_or_default()}</p>
                    </Show>

                    <button type="submit" class="btn btn-primary btn-block" disabled=move || busy.get()>
                        <Show when=move || busy.get() fallback=|| "Entrar">
                            <LoadingSpinner/>
                        </Show>
                    </button>
                </form>
            </div>
        </div>
    }
}

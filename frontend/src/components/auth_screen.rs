use wasm_bindgen_futures::spawn_local;
use web_sys::InputEvent;
use yew::prelude::*;

use super::AppServices;

#[derive(Clone, Copy, PartialEq)]
enum AuthMode {
    Register,
    Login,
}

#[function_component(AuthScreen)]
pub fn auth_screen() -> Html {
    let services = use_context::<AppServices>();
    let email = use_state(|| "".to_string());
    let password = use_state(|| "".to_string());
    let loading = use_state(|| false);
    let Some(services) = services else {
        return html! {};
    };

    let submit = {
        let email = email.clone();
        let password = password.clone();
        let loading = loading.clone();
        move |mode: AuthMode| {
            let services = services.clone();
            let email = email.clone();
            let password = password.clone();
            let loading = loading.clone();
            Callback::from(move |_: MouseEvent| {
                let services = services.clone();
                let email_val = (*email).clone();
                let password_val = (*password).clone();
                let loading = loading.clone();
                loading.set(true);
                spawn_local(async move {
                    let result = match mode {
                        AuthMode::Register => services.auth.register(&email_val, &password_val).await,
                        AuthMode::Login => services.auth.login(&email_val, &password_val).await,
                    };
                    match (result, mode) {
                        (Ok(_), AuthMode::Register) => services.notifier.notify("✅ Registered successfully!"),
                        (Ok(_), AuthMode::Login) => services.notifier.notify("✅ Logged in successfully!"),
                        (Err(err), _) => {
                            tracing::warn!("Authentication failed: {}", err);
                            services.notifier.notify(&format!("❌ {}", err));
                        }
                    }
                    loading.set(false);
                });
            })
        }
    };

    html! {
        <div class="auth-container">
            <h2>{"🔐 Login / Register"}</h2>
            <input
                type="email"
                placeholder="Email"
                value={(*email).clone()}
                oninput={{
                    let email = email.clone();
                    Callback::from(move |e: InputEvent| {
                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                        email.set(input.value());
                    })
                }}
            />
            <input
                type="password"
                placeholder="Password"
                value={(*password).clone()}
                oninput={{
                    let password = password.clone();
                    Callback::from(move |e: InputEvent| {
                        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                        password.set(input.value());
                    })
                }}
            />

            <div class="auth-actions">
                <button onclick={submit(AuthMode::Register)} disabled={*loading}>{"Register"}</button>
                <button onclick={submit(AuthMode::Login)} disabled={*loading}>{"Login"}</button>
            </div>
        </div>
    }
}

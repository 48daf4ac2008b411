//! Owner login: exchanges a username/password pair for the bearer
//! token every owner-side call carries.

use leptos::*;
use leptos_router::use_navigate;

use crate::frontend::{api, session::Session};

#[component]
pub fn OwnerLoginPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let navigate = use_navigate();

    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (pending, set_pending) = create_signal(false);

    let on_submit = move |event: web_sys::SubmitEvent| {
        event.prevent_default();
        if pending.get_untracked() {
            return;
        }
        set_pending.set(true);
        set_error.set(None);

        let user = username.get_untracked();
        let pass = password.get_untracked();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::login(&user, &pass).await {
                Ok(token) => {
                    session.login(&token);
                    navigate("/owner/dashboard", Default::default());
                }
                Err(err) => {
                    log::error!("login failed: {err}");
                    set_error.set(Some("Invalid username or password".to_string()));
                    set_pending.set(false);
                }
            }
        });
    };

    view! {
        <div class="page-wrapper">
            <div class="form-container border-container login-container">
                <h1>"Owner Login"</h1>
                <Show when=move || error.get().is_some()>
                    <p class="error-message">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <form class="name-form" on:submit=on_submit>
                    <input
                        type="text"
                        class="text-input"
                        placeholder="Username"
                        required
                        prop:value=move || username.get()
                        on:input=move |event| set_username.set(event_target_value(&event))
                    />
                    <input
                        type="password"
                        class="text-input"
                        placeholder="Password"
                        required
                        prop:value=move || password.get()
                        on:input=move |event| set_password.set(event_target_value(&event))
                    />
                    <button type="submit" class="submit-button" disabled=move || pending.get()>
                        {move || if pending.get() { "Logging in..." } else { "Login" }}
                    </button>
                </form>
            </div>
        </div>
    }
}

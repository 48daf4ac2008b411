//! Name gate: a display name is required before anything can be
//! uploaded. The name is checked against the server for uniqueness and
//! then persisted for the session.

use leptos::*;
use leptos_router::use_navigate;

use crate::frontend::{api, session::Session};
use crate::{validate, ApiError};

#[component]
pub fn NameInputPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let navigate = use_navigate();

    let (name, set_name) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (checking, set_checking) = create_signal(false);

    let on_submit = move |event: web_sys::SubmitEvent| {
        event.prevent_default();
        let raw = name.get_untracked();
        if let Some(message) = validate::name_error(&raw) {
            set_error.set(Some(message.to_string()));
            return;
        }
        let trimmed = raw.trim().to_string();
        if checking.get_untracked() {
            return;
        }
        set_checking.set(true);
        set_error.set(None);

        let navigate = navigate.clone();
        spawn_local(async move {
            match api::check_username(&trimmed).await {
                Ok(()) => {
                    session.set_username(&trimmed);
                    navigate("/upload", Default::default());
                }
                Err(ApiError::Status { code: 400 }) => {
                    set_error.set(Some("Username already exists".to_string()));
                }
                Err(err) => {
                    log::error!("name check failed: {err}");
                    set_error.set(Some(
                        "Could not verify the name. Please try again.".to_string(),
                    ));
                }
            }
            set_checking.set(false);
        });
    };

    view! {
        <div class="page-wrapper">
            <div class="page-header">
                <h1>"PRINTQ"</h1>
            </div>
            <div class="form-container border-container">
                <h2>"Welcome!"</h2>
                <form class="name-form" on:submit=on_submit>
                    <input
                        id="username"
                        type="text"
                        class="text-input"
                        placeholder="Enter your name"
                        prop:value=move || name.get()
                        on:input=move |event| {
                            set_name.set(event_target_value(&event));
                            set_error.set(None);
                        }
                    />
                    <Show when=move || error.get().is_some()>
                        <p class="error-message">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <button type="submit" class="submit-button" disabled=move || checking.get()>
                        {move || if checking.get() { "Checking..." } else { "Submit" }}
                    </button>
                </form>
            </div>
        </div>
    }
}

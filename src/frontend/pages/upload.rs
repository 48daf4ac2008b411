//! Upload page: one multipart request carrying every selected file and
//! the session username. Submitting with nothing selected never issues
//! a request.

use gloo_file::{File, FileList};
use leptos::*;
use leptos_router::use_navigate;

use crate::frontend::{api, session::Session};
use crate::validate;

#[component]
pub fn FileUploadPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let navigate = use_navigate();

    let Some(username) = session.username() else {
        let navigate = navigate.clone();
        create_effect(move |_| navigate("/", Default::default()));
        return ().into_view();
    };

    let (selected, set_selected) = create_signal(Vec::<File>::new());
    let (error, set_error) = create_signal(None::<String>);
    let (uploading, set_uploading) = create_signal(false);
    let input_ref = create_node_ref::<html::Input>();

    let on_file_change = move |_| {
        if let Some(input) = input_ref.get_untracked() {
            if let Some(files) = input.files() {
                let list = FileList::from(files);
                set_selected.set(list.iter().cloned().collect());
                set_error.set(None);
            }
        }
    };

    let greeting = username.clone();
    let on_upload = move |_| {
        let files = selected.get_untracked();
        if let Some(message) = validate::selection_error(files.len()) {
            set_error.set(Some(message.to_string()));
            return;
        }
        if uploading.get_untracked() {
            return;
        }
        set_uploading.set(true);
        set_error.set(None);

        let username = username.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::upload(&username, &files).await {
                Ok(()) => navigate("/dashboard", Default::default()),
                Err(err) => {
                    log::error!("upload failed: {err}");
                    set_error.set(Some("File upload failed!".to_string()));
                    set_uploading.set(false);
                }
            }
        });
    };

    view! {
        <div class="page-wrapper">
            <div class="page-header">
                <h1>"PRINTQ"</h1>
            </div>
            <div class="form-container border-container">
                <h2>{format!("Hi, {greeting}!")}</h2>
                <p class="description">"Upload your files here:"</p>
                <div class="file-upload-form">
                    <input
                        type="file"
                        class="file-input"
                        multiple
                        node_ref=input_ref
                        on:change=on_file_change
                    />
                    <Show when=move || !selected.get().is_empty()>
                        <ul class="selected-files">
                            <For
                                each=move || selected.get()
                                key=|file| file.name()
                                let:file
                            >
                                <li>{file.name()}</li>
                            </For>
                        </ul>
                    </Show>
                    <Show when=move || error.get().is_some()>
                        <p class="error-message">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <button
                        type="button"
                        class="submit-button"
                        disabled=move || uploading.get()
                        on:click=on_upload
                    >
                        {move || if uploading.get() { "Uploading..." } else { "Upload" }}
                    </button>
                </div>
            </div>
        </div>
    }
    .into_view()
}

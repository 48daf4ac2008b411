//! User dashboard: polls the user's own files, allows one-at-a-time
//! uploads and a bulk delete, and listens on the notification channel
//! so an owner-side print shows up without waiting for the next poll.

use gloo_file::{File, FileList};
use leptos::*;
use leptos_router::use_navigate;

use crate::frontend::feed::use_feed;
use crate::frontend::notify::NotificationClient;
use crate::frontend::{api, session::Session};
use crate::stomp;

const POLL_INTERVAL_MS: u32 = 5_000;

#[component]
pub fn UserDashboardPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let navigate = use_navigate();

    let Some(username) = session.username() else {
        let navigate = navigate.clone();
        create_effect(move |_| navigate("/", Default::default()));
        return ().into_view();
    };

    let feed = {
        let username = username.clone();
        use_feed(POLL_INTERVAL_MS, move || {
            let username = username.clone();
            async move { api::user_files(&username).await }
        })
    };

    // Push channel: a "deleted" notice means the owner printed one of
    // our files, so refresh right away.
    let notifications = {
        let feed = feed.clone();
        NotificationClient::connect(&username, move |body| {
            if stomp::is_deleted_notice(&body) {
                feed.refresh();
            }
        })
    };
    on_cleanup(move || notifications.close());

    let (selected, set_selected) = create_signal(None::<File>);
    let (error, set_error) = create_signal(None::<String>);
    let (busy, set_busy) = create_signal(false);
    let (popup, set_popup) = create_signal(false);
    let input_ref = create_node_ref::<html::Input>();

    // The completion notice fires only when a non-empty snapshot turns
    // empty, not on every empty poll.
    let last_count = store_value(None::<usize>);
    {
        let snapshot = feed.snapshot;
        create_effect(move |_| {
            if let Some(files) = snapshot.get() {
                let count = files.len();
                if count == 0 && last_count.get_value().is_some_and(|previous| previous > 0) {
                    set_popup.set(true);
                }
                last_count.set_value(Some(count));
            }
        });
    }

    let on_file_change = move |_| {
        if let Some(input) = input_ref.get_untracked() {
            if let Some(files) = input.files() {
                set_selected.set(FileList::from(files).iter().next().cloned());
                set_error.set(None);
            }
        }
    };

    let on_upload = {
        let username = username.clone();
        let feed = feed.clone();
        move |_| {
            let Some(file) = selected.get_untracked() else {
                set_error.set(Some("Please select a file!".to_string()));
                return;
            };
            if busy.get_untracked() {
                return;
            }
            set_busy.set(true);
            set_error.set(None);

            let username = username.clone();
            let feed = feed.clone();
            spawn_local(async move {
                match api::upload(&username, &[file]).await {
                    Ok(()) => {
                        set_selected.set(None);
                        if let Some(input) = input_ref.get_untracked() {
                            input.set_value("");
                        }
                        feed.refresh();
                    }
                    Err(err) => {
                        log::error!("upload failed: {err}");
                        set_error.set(Some("Failed to upload file.".to_string()));
                    }
                }
                set_busy.set(false);
            });
        }
    };

    let on_delete_all = {
        let username = username.clone();
        let feed = feed.clone();
        move |_| {
            if busy.get_untracked() {
                return;
            }
            set_busy.set(true);
            let username = username.clone();
            let feed = feed.clone();
            spawn_local(async move {
                match api::delete_by_username(&username).await {
                    Ok(()) => feed.refresh(),
                    Err(err) => {
                        log::error!("delete-all failed: {err}");
                        set_error.set(Some(
                            "Error deleting files. Please try again.".to_string(),
                        ));
                    }
                }
                set_busy.set(false);
            });
        }
    };

    let on_popup_close = {
        let navigate = navigate.clone();
        move |_| {
            set_popup.set(false);
            navigate("/", Default::default());
        }
    };

    let snapshot = feed.snapshot;
    let files = move || snapshot.get().unwrap_or_default();

    view! {
        <div class="page-wrapper">
            <div class="page-header">
                <h1>"PRINTQ"</h1>
            </div>
            <div class="dashboard-container">
                <h2 class="welcome-message">{format!("Welcome, {username}!")}</h2>

                <section class="form-container border-container">
                    <h3>"Upload a File"</h3>
                    <input
                        type="file"
                        class="file-input"
                        node_ref=input_ref
                        on:change=on_file_change
                    />
                    <Show when=move || error.get().is_some()>
                        <p class="error-message">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <button
                        type="button"
                        class="submit-button"
                        disabled=move || busy.get()
                        on:click=on_upload
                    >
                        "Upload File"
                    </button>
                </section>

                <section class="form-container border-container">
                    <h3>"Your Uploaded Files"</h3>
                    <Show
                        when=move || !files().is_empty()
                        fallback=|| view! { <p class="empty-message">"No files found."</p> }
                    >
                        <ul class="file-items">
                            <For each=files key=|file| file.id let:file>
                                <li class="file-item">{file.file_name.clone()}</li>
                            </For>
                        </ul>
                    </Show>
                </section>

                <button
                    type="button"
                    class="submit-button danger-button"
                    disabled=move || busy.get()
                    on:click=on_delete_all
                >
                    "Delete All Files"
                </button>
            </div>

            <Show when=move || popup.get()>
                <div class="popup-modal">
                    <div class="popup-content border-container">
                        <div class="popup-success-text">"Success"</div>
                        <h3>"All files printed successfully!"</h3>
                        <button type="button" class="submit-button" on:click=on_popup_close.clone()>
                            "Go Back to Upload"
                        </button>
                    </div>
                </div>
            </Show>
        </div>
    }
    .into_view()
}

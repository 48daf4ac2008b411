//! Owner dashboard: the full username -> files mapping with preview,
//! print (with asynchronous operator confirmation), download, per-user
//! delete, and a global delete-all. Refreshes by polling plus a manual
//! refresh button.

use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use leptos::*;
use leptos_router::use_navigate;

use crate::frontend::components::{FileAction, FileList};
use crate::frontend::feed::use_feed;
use crate::frontend::{api, media, session::Session};
use crate::mapping::{self, FileMapping};
use crate::naming;
use crate::printflow::{Confirmation, PrintFlow, PrintStage};
use crate::ApiError;

const POLL_INTERVAL_MS: u32 = 20_000;
/// Grace period between invoking the print dialog and asking the
/// operator whether it worked. A heuristic, not a guarantee.
const PRINT_SETTLE_MS: u32 = 3_000;

#[derive(Clone)]
struct Preview {
    url: Rc<media::ObjectUrl>,
    file_name: String,
}

#[component]
pub fn OwnerDashboardPage() -> impl IntoView {
    let session = expect_context::<Session>();
    let navigate = use_navigate();

    if session.token().is_none() {
        let navigate = navigate.clone();
        create_effect(move |_| navigate("/owner/login", Default::default()));
        return ().into_view();
    }

    let feed = use_feed(POLL_INTERVAL_MS, move || async move {
        match session.token() {
            Some(token) => api::owner_files(&token).await,
            None => Err(ApiError::Unauthorized),
        }
    });
    let snapshot = feed.snapshot;
    let feed_error = feed.error;

    // A rejected token means the session is over, not a transient
    // failure: clear it and go back to login.
    {
        let navigate = navigate.clone();
        create_effect(move |_| {
            if matches!(feed_error.get(), Some(ApiError::Unauthorized)) {
                session.logout();
                navigate("/owner/login", Default::default());
            }
        });
    }

    let (search, set_search) = create_signal(String::new());
    let (notice, set_notice) = create_signal(None::<String>);
    let (error, set_error) = create_signal(None::<String>);
    let (preview, set_preview) = create_signal(None::<Preview>);
    let (pending_delete_all, set_pending_delete_all) = create_signal(false);
    let (action_busy, set_action_busy) = create_signal(false);
    let flow = create_rw_signal(PrintFlow::new());

    // No debounce: the filter is recomputed per keystroke, and an empty
    // query restores the mapping exactly as last fetched.
    let displayed = create_memo(move |_| {
        if feed_error.get().is_some() {
            return FileMapping::new();
        }
        match snapshot.get() {
            Some(files) => mapping::filter(&files, &search.get()),
            None => FileMapping::new(),
        }
    });

    let load_error = move || {
        feed_error.get().map(|err| {
            match err {
                ApiError::Decode(_) => "Invalid file structure received from the server.",
                ApiError::Unauthorized => "Session expired. Please log in again.",
                _ => "Failed to load files. Please try again.",
            }
            .to_string()
        })
    };

    let on_preview = Callback::new(move |action: FileAction| {
        let Some(token) = session.token() else {
            return;
        };
        spawn_local(async move {
            match api::file_content(action.file_id, &token).await {
                Ok(bytes) => match media::ObjectUrl::from_bytes(&bytes) {
                    Some(url) => {
                        set_error.set(None);
                        set_preview.set(Some(Preview {
                            url: Rc::new(url),
                            file_name: action.file_name,
                        }));
                    }
                    None => set_error.set(Some("Error previewing the file.".to_string())),
                },
                Err(err) => {
                    log::error!("preview fetch failed: {err}");
                    set_error.set(Some("Error previewing the file.".to_string()));
                }
            }
        });
    });

    let on_print = Callback::new(move |action: FileAction| {
        let began = flow
            .try_update(|flow| flow.begin(action.file_id, &action.file_name))
            .unwrap_or(false);
        if !began {
            return;
        }
        let Some(token) = session.token() else {
            flow.update(|flow| flow.reset());
            return;
        };
        spawn_local(async move {
            let bytes = match api::file_content(action.file_id, &token).await {
                Ok(bytes) => bytes,
                Err(err) => {
                    log::error!("print fetch failed: {err}");
                    set_error.set(Some("Error printing the file.".to_string()));
                    flow.update(|flow| flow.reset());
                    return;
                }
            };
            flow.update(|flow| {
                flow.binary_fetched();
            });

            let Some(frame) = media::open_print_frame(&bytes).await else {
                set_error.set(Some("Error printing the file.".to_string()));
                flow.update(|flow| flow.reset());
                return;
            };
            flow.update(|flow| {
                flow.dialog_opened();
            });
            if !frame.print() {
                set_error.set(Some("Error printing the file.".to_string()));
                flow.update(|flow| flow.reset());
                return;
            }

            TimeoutFuture::new(PRINT_SETTLE_MS).await;
            drop(frame);
            flow.update(|flow| {
                flow.await_confirmation();
            });
        });
    });

    let on_confirm = {
        let feed = feed.clone();
        Callback::new(move |printed: bool| {
            let job = flow.with_untracked(|flow| flow.job().cloned());
            let decision = flow.try_update(|flow| flow.confirm(printed)).flatten();
            match (decision, job) {
                (Some(Confirmation::Delete), Some(job)) => {
                    let Some(token) = session.token() else {
                        flow.update(|flow| flow.reset());
                        return;
                    };
                    let feed = feed.clone();
                    spawn_local(async move {
                        match api::mark_printed(job.file_id, &token).await {
                            Ok(()) => {
                                flow.update(|flow| {
                                    flow.deleted();
                                    flow.reset();
                                });
                                set_error.set(None);
                                feed.refresh();
                            }
                            Err(err) => {
                                log::error!("post-print delete failed: {err}");
                                set_error.set(Some(
                                    "Error deleting the file after printing.".to_string(),
                                ));
                                flow.update(|flow| flow.reset());
                            }
                        }
                    });
                }
                (Some(Confirmation::Keep), _) => {
                    set_error.set(Some("Print not confirmed. File not deleted.".to_string()));
                    flow.update(|flow| flow.reset());
                }
                _ => {}
            }
        })
    };

    let on_download = Callback::new(move |action: FileAction| {
        if action_busy.get_untracked() {
            return;
        }
        let Some(token) = session.token() else {
            return;
        };
        set_action_busy.set(true);
        spawn_local(async move {
            match api::file_content(action.file_id, &token).await {
                Ok(bytes) => {
                    let file_name =
                        naming::download_file_name(&action.username, &action.file_name);
                    if media::save_bytes(&bytes, &file_name) {
                        set_error.set(None);
                        set_notice.set(Some(format!("File downloaded as {file_name}.")));
                        api::log_download(&file_name, &action.username).await;
                    } else {
                        set_error.set(Some("Error downloading file.".to_string()));
                    }
                }
                Err(err) => {
                    log::error!("download fetch failed: {err}");
                    set_error.set(Some("Error downloading file.".to_string()));
                }
            }
            set_action_busy.set(false);
        });
    });

    let on_delete_user = {
        let feed = feed.clone();
        Callback::new(move |username: String| {
            if action_busy.get_untracked() {
                return;
            }
            set_action_busy.set(true);
            let feed = feed.clone();
            spawn_local(async move {
                match api::delete_by_username(&username).await {
                    Ok(()) => {
                        set_notice.set(Some(format!("All files for {username} deleted.")));
                        feed.refresh();
                    }
                    Err(err) => {
                        log::error!("delete by username failed: {err}");
                        set_error.set(Some(
                            "Failed to delete files. Please try again.".to_string(),
                        ));
                    }
                }
                set_action_busy.set(false);
            });
        })
    };

    // Global delete-all sweeps every group through the per-user delete
    // endpoint, then asks the server to clear its download folder.
    let on_delete_all = {
        let feed = feed.clone();
        Callback::new(move |_: ()| {
            set_pending_delete_all.set(false);
            if action_busy.get_untracked() {
                return;
            }
            let Some(token) = session.token() else {
                return;
            };
            let usernames: Vec<String> = snapshot
                .get_untracked()
                .map(|files| files.keys().cloned().collect())
                .unwrap_or_default();
            set_action_busy.set(true);
            let feed = feed.clone();
            spawn_local(async move {
                let mut failed = false;
                for username in usernames {
                    if api::delete_by_username(&username).await.is_err() {
                        failed = true;
                    }
                }
                api::delete_downloaded_files(&token).await;
                if failed {
                    set_error.set(Some(
                        "Failed to delete all files. Please try again.".to_string(),
                    ));
                } else {
                    feed.set_snapshot.set(Some(FileMapping::new()));
                    set_notice.set(Some("All files deleted successfully!".to_string()));
                }
                feed.refresh();
                set_action_busy.set(false);
            });
        })
    };

    let on_refresh = {
        let feed = feed.clone();
        move |_| feed.refresh()
    };

    let on_logout = {
        let navigate = navigate.clone();
        move |_| {
            session.logout();
            navigate("/owner/login", Default::default());
        }
    };

    let close_preview = move |_| set_preview.set(None);
    let awaiting_confirmation =
        move || flow.with(|flow| flow.stage() == PrintStage::AwaitingConfirmation);
    let confirm_file_name = move || {
        flow.with(|flow| {
            flow.job()
                .map(|job| job.file_name.clone())
                .unwrap_or_default()
        })
    };

    view! {
        <div class="page-wrapper owner-dashboard">
            <header class="owner-header border-container">
                <div class="owner-header-left">
                    <h1>"Dashboard"</h1>
                    <button type="button" class="file-button" title="Refresh Files" on:click=on_refresh>
                        "Refresh"
                    </button>
                </div>
                <input
                    type="text"
                    class="text-input search-input"
                    placeholder="Search by username..."
                    prop:value=move || search.get()
                    on:input=move |event| set_search.set(event_target_value(&event))
                />
                <div class="owner-header-right">
                    <button
                        type="button"
                        class="file-button delete-button"
                        title="Delete All Files"
                        on:click=move |_| set_pending_delete_all.set(true)
                    >
                        "Delete All"
                    </button>
                    <button type="button" class="file-button" on:click=on_logout>
                        "Logout"
                    </button>
                </div>
            </header>

            <Show when=move || load_error().is_some() || error.get().is_some()>
                <div class="alert error-alert">
                    {move || error.get().or_else(load_error).unwrap_or_default()}
                </div>
            </Show>
            <Show when=move || notice.get().is_some()>
                <div class="alert notice-alert">{move || notice.get().unwrap_or_default()}</div>
            </Show>

            <FileList
                files=displayed
                on_preview=on_preview
                on_print=on_print
                on_download=on_download
                on_delete_user=on_delete_user
            />

            <Show when=move || preview.get().is_some()>
                {move || {
                    preview
                        .get()
                        .map(|current| {
                            let src = current.url.as_str().to_string();
                            view! {
                                <div class="popup-modal">
                                    <div class="popup-content preview-modal border-container">
                                        <h3>{format!("Preview: {}", current.file_name)}</h3>
                                        <iframe src=src title="File Preview" class="preview-frame"></iframe>
                                        <button type="button" class="submit-button" on:click=close_preview>
                                            "Close"
                                        </button>
                                    </div>
                                </div>
                            }
                        })
                }}
            </Show>

            <Show when=awaiting_confirmation>
                <div class="popup-modal">
                    <div class="popup-content border-container">
                        <h3>"Did the file print successfully?"</h3>
                        <p class="description">{confirm_file_name}</p>
                        <div class="file-actions">
                            <button
                                type="button"
                                class="submit-button"
                                on:click=move |_| on_confirm.call(true)
                            >
                                "Yes"
                            </button>
                            <button
                                type="button"
                                class="submit-button danger-button"
                                on:click=move |_| on_confirm.call(false)
                            >
                                "No"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>

            <Show when=move || pending_delete_all.get()>
                <div class="popup-modal">
                    <div class="popup-content border-container">
                        <h3>"Are you sure you want to delete all files?"</h3>
                        <div class="file-actions">
                            <button
                                type="button"
                                class="submit-button danger-button"
                                on:click=move |_| on_delete_all.call(())
                            >
                                "Delete All"
                            </button>
                            <button
                                type="button"
                                class="submit-button"
                                on:click=move |_| set_pending_delete_all.set(false)
                            >
                                "Cancel"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
    .into_view()
}

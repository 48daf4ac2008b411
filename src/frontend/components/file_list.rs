//! Stateless projection of the username -> files mapping into grouped
//! cards. All behavior lives in the callbacks the dashboard passes in.

use leptos::*;

use crate::mapping::FileMapping;
use crate::FileRecord;

/// Everything a per-file action needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAction {
    pub file_id: u64,
    pub file_name: String,
    pub username: String,
}

impl FileAction {
    fn new(username: &str, file: &FileRecord) -> Self {
        Self {
            file_id: file.id,
            file_name: file.file_name.clone(),
            username: username.to_string(),
        }
    }
}

#[component]
pub fn FileList(
    #[prop(into)] files: Signal<FileMapping>,
    #[prop(into)] on_preview: Callback<FileAction>,
    #[prop(into)] on_print: Callback<FileAction>,
    #[prop(into)] on_download: Callback<FileAction>,
    #[prop(into)] on_delete_user: Callback<String>,
) -> impl IntoView {
    view! {
        <Show
            when=move || !files.get().is_empty()
            fallback=|| view! { <p class="empty-message">"No files available."</p> }
        >
            <div class="file-list-container">
                <For
                    each=move || files.get().into_iter().collect::<Vec<_>>()
                    key=|(username, records)| {
                        (
                            username.clone(),
                            records.iter().map(|file| file.id).collect::<Vec<_>>(),
                        )
                    }
                    children=move |(username, records): (String, Vec<FileRecord>)| {
                        let delete_target = username.clone();
                        let group_username = username.clone();
                        let group_records = records.clone();
                        view! {
                            <div class="file-group border-container">
                                <div class="file-group-header">
                                    <h3 class="username-title">{username.clone()}</h3>
                                    <button
                                        type="button"
                                        class="file-button delete-button"
                                        on:click=move |_| on_delete_user.call(delete_target.clone())
                                    >
                                        "Delete Files"
                                    </button>
                                </div>
                                <Show
                                    when={
                                        let records = records.clone();
                                        move || !records.is_empty()
                                    }
                                    fallback=|| {
                                        view! {
                                            <p class="empty-message">"No files for this user."</p>
                                        }
                                    }
                                >
                                    <ul class="file-items">
                                        <For
                                            each={
                                                let records = group_records.clone();
                                                move || records.clone()
                                            }
                                            key=|file| file.id
                                            children={
                                                let username = group_username.clone();
                                                move |file: FileRecord| {
                                                    let preview = FileAction::new(&username, &file);
                                                    let print = preview.clone();
                                                    let download = preview.clone();
                                                    view! {
                                                        <li class="file-item">
                                                            <span class="file-name">{file.file_name.clone()}</span>
                                                            <div class="file-actions">
                                                                <button
                                                                    type="button"
                                                                    class="file-button preview-button"
                                                                    on:click=move |_| on_preview.call(preview.clone())
                                                                >
                                                                    "Preview"
                                                                </button>
                                                                <button
                                                                    type="button"
                                                                    class="file-button print-button"
                                                                    on:click=move |_| on_print.call(print.clone())
                                                                >
                                                                    "Print"
                                                                </button>
                                                                <button
                                                                    type="button"
                                                                    class="file-button download-button"
                                                                    on:click=move |_| on_download.call(download.clone())
                                                                >
                                                                    "Download"
                                                                </button>
                                                            </div>
                                                        </li>
                                                    }
                                                }
                                            }
                                        />
                                    </ul>
                                </Show>
                            </div>
                        }
                    }
                />
            </div>
        </Show>
    }
}

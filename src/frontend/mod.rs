use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::{Route, Router, Routes};
use wasm_bindgen::prelude::*;

pub mod api;
pub mod components;
pub mod feed;
pub mod media;
pub mod notify;
pub mod pages;
pub mod session;

use pages::{
    FileUploadPage, NameInputPage, OwnerDashboardPage, OwnerLoginPage, UserDashboardPage,
};
use session::Session;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(Session::default());

    view! {
        <Title text="printq"/>
        <StyleProvider/>
        <Router>
            <Routes>
                // User routes
                <Route path="/" view=NameInputPage/>
                <Route path="/upload" view=FileUploadPage/>
                <Route path="/dashboard" view=UserDashboardPage/>
                // Owner routes
                <Route path="/owner/login" view=OwnerLoginPage/>
                <Route path="/owner/dashboard" view=OwnerDashboardPage/>
            </Routes>
        </Router>
    }
}

#[wasm_bindgen]
pub fn run() {
    console_error_panic_hook::set_once();
    mount_to_body(|| view! { <App/> });
}

// CSS-in-Rust: one global stylesheet injected by the app shell.
const MAIN_STYLES: &str = r#"
body {
    font-family: "Segoe UI", system-ui, sans-serif;
    background-color: #f7f8fc;
    color: #333333;
    margin: 0;
    padding: 0;
}

.page-wrapper {
    max-width: 1100px;
    margin: 0 auto;
    padding: 20px;
}

.page-header {
    text-align: center;
    padding: 10px 0;
}

.page-header h1 {
    letter-spacing: 0.3ch;
    color: #2f8fd5;
}

.border-container {
    background-color: #ffffff;
    border-radius: 8px;
    box-shadow: 0px 4px 10px rgba(0, 0, 0, 0.1);
    padding: 20px;
}

.form-container {
    max-width: 420px;
    margin: 20px auto;
    text-align: center;
}

.login-container {
    margin-top: 15vh;
}

.name-form,
.file-upload-form {
    display: flex;
    flex-direction: column;
    gap: 15px;
}

.text-input {
    padding: 10px;
    border: 1px solid #ddd;
    border-radius: 4px;
    font-size: 14px;
    box-sizing: border-box;
}

.text-input:focus {
    outline: none;
    border-color: #2f8fd5;
}

.submit-button {
    padding: 10px;
    font-size: 16px;
    color: #ffffff;
    background-color: #007bff;
    border: none;
    border-radius: 4px;
    cursor: pointer;
    transition: background-color 0.3s ease;
}

.submit-button:hover:not(:disabled) {
    background-color: #0056b3;
}

.submit-button:disabled {
    background-color: #9bbcd8;
    cursor: not-allowed;
}

.danger-button {
    background-color: #ff4d4d;
}

.danger-button:hover:not(:disabled) {
    background-color: #d93636;
}

.error-message {
    color: red;
    font-size: 14px;
    margin: 0;
}

.description {
    color: #666666;
    margin: 5px 0 10px 0;
}

.selected-files {
    list-style: none;
    margin: 0;
    padding: 0;
    font-size: 13px;
    color: #666666;
    text-align: left;
}

.dashboard-container {
    display: flex;
    flex-direction: column;
    gap: 20px;
    max-width: 600px;
    margin: 0 auto;
}

.welcome-message {
    text-align: center;
}

.empty-message {
    color: #888888;
    text-align: center;
}

.file-list-container {
    display: flex;
    flex-direction: column;
    gap: 20px;
}

.file-group-header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    border-bottom: 1px solid #eeeeee;
    padding-bottom: 8px;
    margin-bottom: 10px;
}

.username-title {
    margin: 0;
    color: #2f8fd5;
}

.file-items {
    list-style: none;
    margin: 0;
    padding: 0;
}

.file-item {
    display: flex;
    justify-content: space-between;
    align-items: center;
    padding: 8px 4px;
    border-bottom: 1px solid #f2f2f2;
}

.file-name {
    word-break: break-word;
    margin-right: 10px;
}

.file-actions {
    display: flex;
    gap: 8px;
    justify-content: center;
}

.file-button {
    padding: 6px 12px;
    font-size: 13px;
    border: none;
    border-radius: 4px;
    cursor: pointer;
    color: #ffffff;
    background-color: #007bff;
}

.file-button:hover {
    background-color: #0056b3;
}

.preview-button {
    background-color: #5bc0de;
}

.print-button {
    background-color: #5cb85c;
}

.download-button {
    background-color: #f0ad4e;
}

.delete-button {
    background-color: #ff4d4d;
}

.delete-button:hover {
    background-color: #d93636;
}

.owner-header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    gap: 15px;
    margin-bottom: 20px;
    background-color: #2f8fd5;
    color: #ffffff;
}

.owner-header h1 {
    font-size: 22px;
    margin: 0;
}

.owner-header-left,
.owner-header-right {
    display: flex;
    align-items: center;
    gap: 10px;
}

.search-input {
    flex: 1;
}

.alert {
    padding: 12px;
    border-radius: 4px;
    text-align: center;
    margin-bottom: 15px;
}

.error-alert {
    background-color: #fdecea;
    color: #b71c1c;
}

.notice-alert {
    background-color: #e8f5e9;
    color: #1b5e20;
}

.popup-modal {
    position: fixed;
    inset: 0;
    background: rgba(0, 0, 0, 0.5);
    display: flex;
    justify-content: center;
    align-items: center;
    z-index: 100;
}

.popup-content {
    max-width: 420px;
    width: 90%;
    text-align: center;
}

.popup-success-text {
    color: green;
    font-weight: bold;
    font-size: 25px;
}

.preview-modal {
    max-width: 700px;
}

.preview-frame {
    width: 100%;
    height: 400px;
    border: none;
}
"#;

#[component]
fn StyleProvider() -> impl IntoView {
    view! { <style>{MAIN_STYLES}</style> }
}

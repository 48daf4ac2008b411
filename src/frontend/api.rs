//! HTTP clients for the remote file service: the anonymous user
//! endpoints and the bearer-authenticated owner endpoints.

use gloo_file::File;
use gloo_net::http::{Request, Response};
use web_sys::{FormData, UrlSearchParams};

use crate::mapping::{self, FileMapping};
use crate::{ApiError, FileRecord, LoginResponse};

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

fn status_ok(response: &Response) -> Result<(), ApiError> {
    if response.ok() {
        Ok(())
    } else if response.status() == 401 || response.status() == 403 {
        Err(ApiError::Unauthorized)
    } else {
        Err(ApiError::Status {
            code: response.status(),
        })
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

fn decode_err(err: gloo_net::Error) -> ApiError {
    ApiError::Decode(err.to_string())
}

/// `POST /api/user/checkUsername` — 200 means available, 400 means the
/// name is taken.
pub async fn check_username(username: &str) -> Result<(), ApiError> {
    let response = Request::post("/api/user/checkUsername")
        .query([("username", username)])
        .send()
        .await?;
    status_ok(&response)
}

/// One multipart POST carrying every selected file plus the username.
pub async fn upload(username: &str, files: &[File]) -> Result<(), ApiError> {
    let form = FormData::new()
        .map_err(|_| ApiError::Transport("could not build form data".into()))?;
    for file in files {
        form.append_with_blob("files", file.as_ref())
            .map_err(|_| ApiError::Transport("could not attach file".into()))?;
    }
    form.append_with_str("username", username)
        .map_err(|_| ApiError::Transport("could not attach username".into()))?;

    let response = Request::post("/api/user/upload").body(form)?.send().await?;
    status_ok(&response)
}

pub async fn user_files(username: &str) -> Result<Vec<FileRecord>, ApiError> {
    let response = Request::get(&format!("/api/user/dashboard/{username}"))
        .send()
        .await?;
    status_ok(&response)?;
    response.json::<Vec<FileRecord>>().await.map_err(decode_err)
}

pub async fn delete_by_username(username: &str) -> Result<(), ApiError> {
    let response = Request::delete("/api/auth/files/deleteByUsername")
        .query([("userName", username)])
        .send()
        .await?;
    status_ok(&response)
}

/// Form-encoded owner login; the response carries the bearer token used
/// by every owner-side call.
pub async fn login(username: &str, password: &str) -> Result<String, ApiError> {
    let params = UrlSearchParams::new()
        .map_err(|_| ApiError::Transport("could not build login form".into()))?;
    params.append("username", username);
    params.append("password", password);
    let body: String = params.to_string().into();

    let response = Request::post("/api/auth/login")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(body)?
        .send()
        .await?;
    status_ok(&response)?;
    let login: LoginResponse = response.json().await.map_err(decode_err)?;
    Ok(login.jwt_token)
}

/// Full username -> files mapping for the owner dashboard, shaped
/// tolerantly: malformed groups degrade instead of failing the load.
pub async fn owner_files(token: &str) -> Result<FileMapping, ApiError> {
    let response = Request::get("/api/auth/files")
        .header("Authorization", &bearer(token))
        .send()
        .await?;
    status_ok(&response)?;
    let value: serde_json::Value = response.json().await.map_err(decode_err)?;
    mapping::normalize(value)
        .ok_or_else(|| ApiError::Decode("file list is not a username map".into()))
}

/// Binary payload of one file.
pub async fn file_content(file_id: u64, token: &str) -> Result<Vec<u8>, ApiError> {
    let id = file_id.to_string();
    let response = Request::get("/api/auth/files")
        .query([("fetchFile", "true"), ("id", id.as_str())])
        .header("Authorization", &bearer(token))
        .send()
        .await?;
    status_ok(&response)?;
    response.binary().await.map_err(decode_err)
}

/// Marks a file printed; the server deletes it as a side effect.
pub async fn mark_printed(file_id: u64, token: &str) -> Result<(), ApiError> {
    let response = Request::post(&format!("/api/auth/print/{file_id}"))
        .header("Authorization", &bearer(token))
        .send()
        .await?;
    status_ok(&response)
}

/// Best-effort download log. Failures are ignored by design.
pub async fn log_download(file_path: &str, username: &str) {
    let timestamp: String = js_sys::Date::new_0().to_iso_string().into();
    let body = serde_json::json!({
        "filePath": file_path,
        "username": username,
        "timestamp": timestamp,
    });
    if let Ok(request) = Request::post("/api/logDownload").json(&body) {
        if let Err(err) = request.send().await {
            log::warn!("download log not recorded: {err}");
        }
    }
}

/// Best-effort cleanup of the server-side download folder after a
/// global delete-all. Failures are ignored by design.
pub async fn delete_downloaded_files(token: &str) {
    let body = serde_json::json!({ "folderPath": "downloads" });
    let request = Request::post("/api/deleteDownloadedFiles")
        .header("Authorization", &bearer(token))
        .json(&body);
    if let Ok(request) = request {
        if let Err(err) = request.send().await {
            log::warn!("download cleanup not requested: {err}");
        }
    }
}

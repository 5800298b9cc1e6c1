use std::backtrace::Backtrace;
use std::path::Path;

use once_cell::sync::Lazy;
use reqwest::multipart::{Form, Part};

use crate::config::CLOUDBOX_CONFIG;
use crate::model::resource_kind::ResourceKind;
use crate::remote::{RemoteError, RemoteObject};

static CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// sends the staging copy at `local_path` to the store under
/// `{keyprefix}/{remote_key}`, asking the store to detect the resource kind
/// itself. No retries are attempted here; a flaky store surfaces straight to
/// the caller as `UploadFailed`
pub async fn upload_object(
    local_path: &Path,
    remote_key: &str,
    original_name: &str,
) -> Result<RemoteObject, RemoteError> {
    let config = CLOUDBOX_CONFIG.clone();
    let bytes = match rocket::tokio::fs::read(local_path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!(
                "Failed to read staging file {local_path:?} for upload! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(RemoteError::UploadFailed);
        }
    };
    let form = Form::new()
        .part("file", Part::bytes(bytes).file_name(original_name.to_string()))
        .text("remoteKey", format!("{}/{remote_key}", config.remote.key_prefix))
        .text("resourceKindHint", "auto");
    let response = match CLIENT
        .post(format!("{}/objects", config.remote.base_url))
        .multipart(form)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            log::error!(
                "Failed to send upload for key {remote_key} to the blob store! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(RemoteError::UploadFailed);
        }
    };
    if !response.status().is_success() {
        log::error!(
            "Blob store rejected upload for key {remote_key} with status {}",
            response.status()
        );
        return Err(RemoteError::UploadFailed);
    }
    response.json::<RemoteObject>().await.map_err(|e| {
        log::error!("Blob store upload response could not be parsed! Error is {e:?}");
        RemoteError::UploadFailed
    })
}

/// deletes the object behind `locator`. The store namespaces objects by the
/// kind it detected at upload time, so the delete has to name the matching
/// kind or the store won't find the object
pub async fn delete_object(locator: &str, kind: ResourceKind) -> Result<(), RemoteError> {
    let config = CLOUDBOX_CONFIG.clone();
    let response = match CLIENT
        .delete(format!("{}/objects", config.remote.base_url))
        .query(&[("locator", locator), ("resourceKind", kind.as_str())])
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            log::error!(
                "Failed to send delete for locator {locator} to the blob store! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(RemoteError::DeleteFailed);
        }
    };
    if !response.status().is_success() {
        log::error!(
            "Blob store refused to delete locator {locator} ({}), status is {}",
            kind.as_str(),
            response.status()
        );
        return Err(RemoteError::DeleteFailed);
    }
    Ok(())
}

use std::backtrace::Backtrace;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::Utc;
use rocket::tokio::fs::create_dir_all;

use crate::guard::CallerIdentity;
use crate::model::error::file_errors::{
    DeleteFileError, GetFileError, ListFilesError, RenameFileError, UploadFileError,
};
use crate::model::repository::FileRecord;
use crate::model::request::file_requests::{RenameFileRequest, UploadFileRequest};
use crate::model::resource_kind::ResourceKind;
use crate::repository::{file_repository, open_connection};
use crate::{remote, temp_dir};

/// distinguishes concurrent staging copies from each other; the display name
/// alone isn't safe because two requests can upload the same name at once
static STAGING_COUNTER: AtomicU32 = AtomicU32::new(0);

/// ensures that the staging directory exists on the file system
async fn check_temp_dir(dir: &str) {
    let path = Path::new(dir);
    if !path.exists() {
        match create_dir_all(path).await {
            Ok(_) => (),
            Err(e) => panic!("Failed to create staging directory: \n {e:?}"),
        }
    }
}

/// pushes the uploaded file to the remote blob store and records it for the
/// caller.
///
/// The remote upload strictly precedes the database insert. If the insert then
/// fails, the remote object is left orphaned on purpose; undoing a remote
/// upload is not worth the extra failure modes, so the orphan is logged and
/// the caller gets [`UploadFileError::DbFailure`]
pub async fn upload_file(
    caller: &CallerIdentity,
    request: &mut UploadFileRequest<'_>,
) -> Result<FileRecord, UploadFileError> {
    let staging_dir = temp_dir();
    check_temp_dir(staging_dir.as_str()).await;
    // folder ids are taken at face value here; a dangling id just produces an
    // unfiled-looking record that never shows up in any folder listing
    let folder_id = match request.folder_id() {
        Ok(id) => id,
        Err(_) => return Err(UploadFileError::BadFolderId),
    };
    let custom_name = request.custom_name();
    let extension = request.extension();
    let file = match request.file.as_mut() {
        Some(file) => file,
        None => return Err(UploadFileError::MissingFile),
    };
    // the key the store files the object under; a caller-supplied name wins
    // over the multipart file name
    let remote_key = match (&custom_name, file.name()) {
        (Some(name), _) => name.clone(),
        (None, Some(name)) => String::from(name),
        (None, None) => return Err(UploadFileError::MissingFile),
    };
    let original_name = if extension.is_empty() {
        remote_key.clone()
    } else {
        format!("{remote_key}.{extension}")
    };
    let staging_name = format!(
        "{staging_dir}/upload_{}",
        STAGING_COUNTER.fetch_add(1, Ordering::SeqCst)
    );
    let staging_path = Path::new(staging_name.as_str());
    if let Err(e) = file.persist_to(staging_path).await {
        log::error!(
            "Failed to write staging copy for upload! Error is {e:?}\n{}",
            Backtrace::force_capture()
        );
        return Err(UploadFileError::StagingFailure);
    }
    let remote_object =
        match remote::upload_object(staging_path, remote_key.as_str(), original_name.as_str())
            .await
        {
            Ok(object) => object,
            // the staging copy is left behind; startup sweeps the whole
            // staging directory
            Err(e) => {
                log::error!(
                    "Remote store failed to take upload {remote_key}! Error is {e:?}\n{}",
                    Backtrace::force_capture()
                );
                return Err(UploadFileError::UploadFailed);
            }
        };
    // the staging copy has served its purpose. Failing to remove it only
    // leaks disk space until the next startup sweep, so it's not fatal
    if let Err(e) = fs::remove_file(staging_path) {
        log::warn!("Failed to remove staging copy {staging_name}; error is {e:?}");
    }
    // without a caller-supplied name the record is named whatever the store
    // reports the original file was called
    let display_name = custom_name.unwrap_or_else(|| remote_object.original_name.clone());
    let mut record = FileRecord {
        id: None,
        owner: caller.user_id.clone(),
        locator: remote_object.locator,
        url: remote_object.url,
        name: display_name,
        format: remote_object.format,
        size: remote_object.size,
        folder_id,
        create_date: Utc::now().naive_utc(),
    };
    let con = open_connection();
    let created = file_repository::create_file(&record, &con);
    con.close().unwrap();
    match created {
        Ok(id) => {
            record.id = Some(id);
            Ok(record)
        }
        Err(e) => {
            log::error!(
                "Failed to record uploaded file! The remote object {} is now orphaned. Error is {e:?}\n{}",
                record.locator,
                Backtrace::force_capture()
            );
            Err(UploadFileError::DbFailure)
        }
    }
}

/// every file the caller owns, newest first
pub fn get_owned_files(caller: &CallerIdentity) -> Result<Vec<FileRecord>, ListFilesError> {
    let con = open_connection();
    let files = file_repository::get_by_owner(caller.user_id.as_str(), &con);
    con.close().unwrap();
    files.map_err(|e| {
        log::error!(
            "Failed to list files for user! Error is {e:?}\n{}",
            Backtrace::force_capture()
        );
        ListFilesError::DbFailure
    })
}

/// the caller's files inside the passed folder, newest first
pub fn get_folder_files(
    caller: &CallerIdentity,
    folder_id: u32,
) -> Result<Vec<FileRecord>, ListFilesError> {
    let con = open_connection();
    let files = file_repository::get_by_owner_and_folder(caller.user_id.as_str(), folder_id, &con);
    con.close().unwrap();
    files.map_err(|e| {
        log::error!(
            "Failed to list folder files for user! Error is {e:?}\n{}",
            Backtrace::force_capture()
        );
        ListFilesError::DbFailure
    })
}

/// looks up a file by id with no ownership check; the caller only ever sees
/// the public projection of the result
pub fn get_public_file(id: u32) -> Result<FileRecord, GetFileError> {
    let con = open_connection();
    let file = file_repository::get_by_id(id, &con);
    con.close().unwrap();
    match file {
        Ok(file) => Ok(file),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(GetFileError::NotFound),
        Err(e) => {
            log::error!(
                "Failed to pull file {id} from the database! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(GetFileError::DbFailure)
        }
    }
}

pub fn rename_file(
    caller: &CallerIdentity,
    id: u32,
    request: &RenameFileRequest,
) -> Result<FileRecord, RenameFileError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(RenameFileError::InvalidName);
    }
    let con = open_connection();
    let file = match file_repository::get_by_id(id, &con) {
        Ok(file) => file,
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            con.close().unwrap();
            return Err(RenameFileError::NotFound);
        }
        Err(e) => {
            con.close().unwrap();
            log::error!(
                "Failed to pull file {id} for rename! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(RenameFileError::DbFailure);
        }
    };
    if file.owner != caller.user_id {
        con.close().unwrap();
        return Err(RenameFileError::NotOwner);
    }
    let renamed = file_repository::rename_file(id, name, &con);
    con.close().unwrap();
    match renamed {
        Ok(_) => Ok(FileRecord {
            name: String::from(name),
            ..file
        }),
        Err(e) => {
            log::error!(
                "Failed to rename file {id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(RenameFileError::DbFailure)
        }
    }
}

/// removes the caller's file, remote object first.
///
/// If the remote delete fails the record is kept untouched so the remote copy
/// can never go unaccounted for; the caller can simply retry
pub async fn delete_file(caller: &CallerIdentity, id: u32) -> Result<(), DeleteFileError> {
    let con = open_connection();
    let file = file_repository::get_by_id(id, &con);
    con.close().unwrap();
    let file = match file {
        Ok(file) => file,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Err(DeleteFileError::NotFound),
        Err(e) => {
            log::error!(
                "Failed to pull file {id} for delete! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(DeleteFileError::DbFailure);
        }
    };
    if file.owner != caller.user_id {
        return Err(DeleteFileError::NotOwner);
    }
    // records imported from older data may have no locator; nothing remote to
    // remove for those
    if !file.locator.is_empty() {
        let kind = ResourceKind::from(file.format.as_str());
        if let Err(e) = remote::delete_object(file.locator.as_str(), kind).await {
            log::error!(
                "Remote store failed to delete {}! The record is kept. Error is {e:?}\n{}",
                file.locator,
                Backtrace::force_capture()
            );
            return Err(DeleteFileError::RemoteDeleteFailed);
        }
    }
    let con = open_connection();
    let removed = file_repository::delete_by_id(id, &con);
    con.close().unwrap();
    removed.map_err(|e| {
        log::error!(
            "Failed to remove record for file {id} after the remote delete! Error is {e:?}\n{}",
            Backtrace::force_capture()
        );
        DeleteFileError::DbFailure
    })
}

use std::backtrace::Backtrace;

use chrono::Utc;

use crate::guard::CallerIdentity;
use crate::model::error::folder_errors::{
    CreateFolderError, DeleteFolderError, ListFoldersError, RenameFolderError,
};
use crate::model::repository::Folder;
use crate::model::request::folder_requests::{CreateFolderRequest, RenameFolderRequest};
use crate::repository::{file_repository, folder_repository, open_connection};

pub fn create_folder(
    caller: &CallerIdentity,
    request: &CreateFolderRequest,
) -> Result<Folder, CreateFolderError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(CreateFolderError::InvalidName);
    }
    let mut folder = Folder {
        id: None,
        owner: caller.user_id.clone(),
        name: String::from(name),
        create_date: Utc::now().naive_utc(),
    };
    let con = open_connection();
    let created = folder_repository::create_folder(&folder, &con);
    con.close().unwrap();
    match created {
        Ok(id) => {
            folder.id = Some(id);
            Ok(folder)
        }
        Err(e) => {
            log::error!(
                "Failed to create folder! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(CreateFolderError::DbFailure)
        }
    }
}

/// every folder the caller owns, newest first
pub fn get_owned_folders(caller: &CallerIdentity) -> Result<Vec<Folder>, ListFoldersError> {
    let con = open_connection();
    let folders = folder_repository::get_by_owner(caller.user_id.as_str(), &con);
    con.close().unwrap();
    folders.map_err(|e| {
        log::error!(
            "Failed to list folders for user! Error is {e:?}\n{}",
            Backtrace::force_capture()
        );
        ListFoldersError::DbFailure
    })
}

pub fn rename_folder(
    caller: &CallerIdentity,
    id: u32,
    request: &RenameFolderRequest,
) -> Result<Folder, RenameFolderError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(RenameFolderError::InvalidName);
    }
    let con = open_connection();
    let folder = match folder_repository::get_by_id(id, &con) {
        Ok(folder) => folder,
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            con.close().unwrap();
            return Err(RenameFolderError::NotFound);
        }
        Err(e) => {
            con.close().unwrap();
            log::error!(
                "Failed to pull folder {id} for rename! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(RenameFolderError::DbFailure);
        }
    };
    if folder.owner != caller.user_id {
        con.close().unwrap();
        return Err(RenameFolderError::NotOwner);
    }
    let renamed = folder_repository::rename_folder(id, name, &con);
    con.close().unwrap();
    match renamed {
        Ok(_) => Ok(Folder {
            name: String::from(name),
            ..folder
        }),
        Err(e) => {
            log::error!(
                "Failed to rename folder {id}! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            Err(RenameFolderError::DbFailure)
        }
    }
}

/// removes the caller's folder. With `delete_files` the referencing file rows
/// are bulk-deleted; without it they are detached and live on unfiled.
///
/// The bulk delete drops rows only. The remote objects behind them are not
/// contacted, so cascading a folder strands its files' blobs in the store;
/// deleting files one at a time first is the way to avoid that
pub fn delete_folder(
    caller: &CallerIdentity,
    id: u32,
    delete_files: bool,
) -> Result<(), DeleteFolderError> {
    let con = open_connection();
    let folder = match folder_repository::get_by_id(id, &con) {
        Ok(folder) => folder,
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            con.close().unwrap();
            return Err(DeleteFolderError::NotFound);
        }
        Err(e) => {
            con.close().unwrap();
            log::error!(
                "Failed to pull folder {id} for delete! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(DeleteFolderError::DbFailure);
        }
    };
    if folder.owner != caller.user_id {
        con.close().unwrap();
        return Err(DeleteFolderError::NotOwner);
    }
    let files_handled = if delete_files {
        file_repository::delete_by_folder(id, &con)
    } else {
        file_repository::detach_by_folder(id, &con)
    };
    match files_handled {
        Ok(count) if delete_files => log::info!("Deleted {count} file records in folder {id}"),
        Ok(count) => log::info!("Detached {count} file records from folder {id}"),
        Err(e) => {
            con.close().unwrap();
            log::error!(
                "Failed to handle files in folder {id} for delete! Error is {e:?}\n{}",
                Backtrace::force_capture()
            );
            return Err(DeleteFolderError::DbFailure);
        }
    };
    let removed = folder_repository::delete_folder(id, &con);
    con.close().unwrap();
    removed.map_err(|e| {
        log::error!(
            "Failed to remove folder {id}! Error is {e:?}\n{}",
            Backtrace::force_capture()
        );
        DeleteFolderError::DbFailure
    })
}

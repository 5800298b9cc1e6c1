use rocket::serde::json::Json;

use crate::guard::CallerIdentity;
use crate::model::error::folder_errors::{
    CreateFolderError, DeleteFolderError, RenameFolderError,
};
use crate::model::request::folder_requests::{CreateFolderRequest, RenameFolderRequest};
use crate::model::response::folder_responses::{
    CreateFolderResponse, DeleteFolderResponse, FolderApi, ListFoldersResponse,
    RenameFolderResponse,
};
use crate::model::response::BasicMessage;
use crate::service::folder_service;

#[post("/create", data = "<request>")]
pub fn create_folder(
    caller: CallerIdentity,
    request: Json<CreateFolderRequest>,
) -> CreateFolderResponse {
    match folder_service::create_folder(&caller, &request) {
        Ok(folder) => CreateFolderResponse::Created(Json::from(FolderApi::from(folder))),
        Err(CreateFolderError::InvalidName) => {
            CreateFolderResponse::BadRequest(BasicMessage::new("The folder name must not be empty."))
        }
        Err(CreateFolderError::DbFailure) => CreateFolderResponse::FolderDbError(
            BasicMessage::new("Failed to create the folder. Check server logs for details"),
        ),
    }
}

#[get("/my-folders")]
pub fn get_my_folders(caller: CallerIdentity) -> ListFoldersResponse {
    match folder_service::get_owned_folders(&caller) {
        Ok(folders) => ListFoldersResponse::Success(Json::from(
            folders.into_iter().map(FolderApi::from).collect::<Vec<_>>(),
        )),
        Err(_) => ListFoldersResponse::FolderDbError(BasicMessage::new(
            "Failed to pull folder info from database. Check server logs for details",
        )),
    }
}

#[put("/rename/<id>", data = "<request>")]
pub fn rename_folder(
    caller: CallerIdentity,
    id: u32,
    request: Json<RenameFolderRequest>,
) -> RenameFolderResponse {
    match folder_service::rename_folder(&caller, id, &request) {
        Ok(folder) => RenameFolderResponse::Success(Json::from(FolderApi::from(folder))),
        Err(RenameFolderError::InvalidName) => {
            RenameFolderResponse::BadRequest(BasicMessage::new("The new name must not be empty."))
        }
        Err(RenameFolderError::NotFound) => RenameFolderResponse::FolderNotFound(
            BasicMessage::new("The folder with the passed id could not be found."),
        ),
        Err(RenameFolderError::NotOwner) => RenameFolderResponse::Forbidden(BasicMessage::new(
            "That folder does not belong to you.",
        )),
        Err(RenameFolderError::DbFailure) => RenameFolderResponse::FolderDbError(
            BasicMessage::new("Failed to rename the folder. Check server logs for details"),
        ),
    }
}

#[allow(non_snake_case)] // query parameter is camel case in the api
#[delete("/<id>?<deleteFiles>")]
pub fn delete_folder(
    caller: CallerIdentity,
    id: u32,
    deleteFiles: Option<bool>,
) -> DeleteFolderResponse {
    match folder_service::delete_folder(&caller, id, deleteFiles.unwrap_or(false)) {
        Ok(_) => DeleteFolderResponse::Deleted(()),
        Err(DeleteFolderError::NotFound) => DeleteFolderResponse::FolderNotFound(
            BasicMessage::new("The folder with the passed id could not be found."),
        ),
        Err(DeleteFolderError::NotOwner) => DeleteFolderResponse::Forbidden(BasicMessage::new(
            "That folder does not belong to you.",
        )),
        Err(DeleteFolderError::DbFailure) => DeleteFolderResponse::Failure(BasicMessage::new(
            "Failed to delete the folder. Check server logs for details",
        )),
    }
}

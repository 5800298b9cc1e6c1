use rocket::form::Form;
use rocket::serde::json::Json;

use crate::guard::CallerIdentity;
use crate::model::error::file_errors::{
    DeleteFileError, GetFileError, RenameFileError, UploadFileError,
};
use crate::model::request::file_requests::{RenameFileRequest, UploadFileRequest};
use crate::model::response::file_responses::{
    DeleteFileResponse, FileApi, GetPublicFileResponse, ListFilesResponse, PublicFileApi,
    RenameFileResponse, UploadFileResponse,
};
use crate::model::response::BasicMessage;
use crate::service::file_service;

#[post("/upload", data = "<request>")]
pub async fn upload_file(
    caller: CallerIdentity,
    mut request: Form<UploadFileRequest<'_>>,
) -> UploadFileResponse {
    match file_service::upload_file(&caller, &mut request).await {
        Ok(record) => UploadFileResponse::Created(Json::from(FileApi::from(record))),
        Err(UploadFileError::MissingFile) => UploadFileResponse::BadRequest(BasicMessage::new(
            "No file was included in the request.",
        )),
        Err(UploadFileError::BadFolderId) => UploadFileResponse::BadRequest(BasicMessage::new(
            "The passed folder id is not a number.",
        )),
        Err(UploadFileError::StagingFailure) => UploadFileResponse::Failure(BasicMessage::new(
            "Failed to stage the file for upload. Check server logs for details",
        )),
        Err(UploadFileError::UploadFailed) => UploadFileResponse::Failure(BasicMessage::new(
            "The remote store failed to take the file. Check server logs for details",
        )),
        Err(UploadFileError::DbFailure) => UploadFileResponse::Failure(BasicMessage::new(
            "Failed to record the uploaded file. Check server logs for details",
        )),
    }
}

#[get("/my-files")]
pub fn get_my_files(caller: CallerIdentity) -> ListFilesResponse {
    match file_service::get_owned_files(&caller) {
        Ok(files) => ListFilesResponse::Success(Json::from(
            files.into_iter().map(FileApi::from).collect::<Vec<_>>(),
        )),
        Err(_) => ListFilesResponse::FileDbError(BasicMessage::new(
            "Failed to pull file info from database. Check server logs for details",
        )),
    }
}

#[get("/folder/<folder_id>")]
pub fn get_files_in_folder(caller: CallerIdentity, folder_id: u32) -> ListFilesResponse {
    match file_service::get_folder_files(&caller, folder_id) {
        Ok(files) => ListFilesResponse::Success(Json::from(
            files.into_iter().map(FileApi::from).collect::<Vec<_>>(),
        )),
        Err(_) => ListFilesResponse::FileDbError(BasicMessage::new(
            "Failed to pull file info from database. Check server logs for details",
        )),
    }
}

/// no identity guard here; shared links have to work for people without an
/// account
#[get("/public/<id>")]
pub fn get_public_file(id: u32) -> GetPublicFileResponse {
    match file_service::get_public_file(id) {
        Ok(record) => GetPublicFileResponse::Success(Json::from(PublicFileApi::from(record))),
        Err(GetFileError::NotFound) => GetPublicFileResponse::FileNotFound(BasicMessage::new(
            "The file with the passed id could not be found.",
        )),
        Err(GetFileError::DbFailure) => GetPublicFileResponse::FileDbError(BasicMessage::new(
            "Failed to pull file info from database. Check server logs for details",
        )),
    }
}

#[put("/rename/<id>", data = "<request>")]
pub fn rename_file(
    caller: CallerIdentity,
    id: u32,
    request: Json<RenameFileRequest>,
) -> RenameFileResponse {
    match file_service::rename_file(&caller, id, &request) {
        Ok(record) => RenameFileResponse::Success(Json::from(FileApi::from(record))),
        Err(RenameFileError::InvalidName) => {
            RenameFileResponse::BadRequest(BasicMessage::new("The new name must not be empty."))
        }
        Err(RenameFileError::NotFound) => RenameFileResponse::FileNotFound(BasicMessage::new(
            "The file with the passed id could not be found.",
        )),
        Err(RenameFileError::NotOwner) => RenameFileResponse::Forbidden(BasicMessage::new(
            "That file does not belong to you.",
        )),
        Err(RenameFileError::DbFailure) => RenameFileResponse::FileDbError(BasicMessage::new(
            "Failed to rename the file. Check server logs for details",
        )),
    }
}

#[delete("/<id>")]
pub async fn delete_file(caller: CallerIdentity, id: u32) -> DeleteFileResponse {
    match file_service::delete_file(&caller, id).await {
        Ok(_) => DeleteFileResponse::Deleted(()),
        Err(DeleteFileError::NotFound) => DeleteFileResponse::FileNotFound(BasicMessage::new(
            "The file with the passed id could not be found.",
        )),
        Err(DeleteFileError::NotOwner) => DeleteFileResponse::Forbidden(BasicMessage::new(
            "That file does not belong to you.",
        )),
        Err(DeleteFileError::RemoteDeleteFailed) => DeleteFileResponse::Failure(BasicMessage::new(
            "The remote store failed to delete the file, so it was kept. Try again later",
        )),
        Err(DeleteFileError::DbFailure) => DeleteFileResponse::Failure(BasicMessage::new(
            "Failed to remove the file record. Check server logs for details",
        )),
    }
}

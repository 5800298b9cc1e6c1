use chrono::NaiveDateTime;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::model::repository::FileRecord;
use crate::model::response::BasicMessage;

type NoContent = ();

/// the owner-facing projection of a [`FileRecord`]
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct FileApi {
    pub id: u32,
    pub name: String,
    /// the remote blob store's handle for this object
    pub locator: String,
    pub url: String,
    pub format: String,
    pub size: u64,
    #[serde(rename = "folderId")]
    pub folder_id: Option<u32>,
    #[serde(rename = "createdAt")]
    pub created_at: NaiveDateTime,
}

impl From<FileRecord> for FileApi {
    fn from(record: FileRecord) -> Self {
        FileApi {
            // always present when the record came out of the database
            id: record.id.unwrap(),
            name: record.name,
            locator: record.locator,
            url: record.url,
            format: record.format,
            size: record.size,
            folder_id: record.folder_id,
            created_at: record.create_date,
        }
    }
}

/// what anyone on the internet gets to see about a shared file: no owner, no
/// locator
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(crate = "rocket::serde")]
pub struct PublicFileApi {
    pub name: String,
    pub format: String,
    pub url: String,
    #[serde(rename = "createdAt")]
    pub created_at: NaiveDateTime,
}

impl From<FileRecord> for PublicFileApi {
    fn from(record: FileRecord) -> Self {
        PublicFileApi {
            name: record.name,
            format: record.format,
            url: record.url,
            created_at: record.create_date,
        }
    }
}

#[derive(Responder)]
pub enum UploadFileResponse {
    #[response(status = 201)]
    Created(Json<FileApi>),
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    Failure(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum ListFilesResponse {
    #[response(status = 200)]
    Success(Json<Vec<FileApi>>),
    #[response(status = 500, content_type = "json")]
    FileDbError(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum GetPublicFileResponse {
    #[response(status = 200)]
    Success(Json<PublicFileApi>),
    #[response(status = 404, content_type = "json")]
    FileNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    FileDbError(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum RenameFileResponse {
    #[response(status = 200)]
    Success(Json<FileApi>),
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 403, content_type = "json")]
    Forbidden(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    FileNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    FileDbError(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum DeleteFileResponse {
    #[response(status = 204)]
    Deleted(NoContent),
    #[response(status = 403, content_type = "json")]
    Forbidden(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    FileNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    Failure(Json<BasicMessage>),
}

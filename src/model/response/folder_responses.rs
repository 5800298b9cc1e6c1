use chrono::NaiveDateTime;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::model::repository::Folder;
use crate::model::response::BasicMessage;

type NoContent = ();

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct FolderApi {
    pub id: u32,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: NaiveDateTime,
}

impl From<Folder> for FolderApi {
    fn from(folder: Folder) -> Self {
        FolderApi {
            // always present when the record came out of the database
            id: folder.id.unwrap(),
            name: folder.name,
            created_at: folder.create_date,
        }
    }
}

#[derive(Responder)]
pub enum CreateFolderResponse {
    #[response(status = 201)]
    Created(Json<FolderApi>),
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    FolderDbError(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum ListFoldersResponse {
    #[response(status = 200)]
    Success(Json<Vec<FolderApi>>),
    #[response(status = 500, content_type = "json")]
    FolderDbError(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum RenameFolderResponse {
    #[response(status = 200)]
    Success(Json<FolderApi>),
    #[response(status = 400, content_type = "json")]
    BadRequest(Json<BasicMessage>),
    #[response(status = 403, content_type = "json")]
    Forbidden(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    FolderNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    FolderDbError(Json<BasicMessage>),
}

#[derive(Responder)]
pub enum DeleteFolderResponse {
    #[response(status = 204)]
    Deleted(NoContent),
    #[response(status = 403, content_type = "json")]
    Forbidden(Json<BasicMessage>),
    #[response(status = 404, content_type = "json")]
    FolderNotFound(Json<BasicMessage>),
    #[response(status = 500, content_type = "json")]
    Failure(Json<BasicMessage>),
}

use rocket::fs::TempFile;
use rocket::serde::Deserialize;

#[derive(FromForm)]
#[allow(non_snake_case)] // cannot serde rename form fields, and the api is camel case
pub struct UploadFileRequest<'a> {
    /// the file being uploaded. Optional at the form level so a request with
    /// no file part still reaches the service and gets a proper 400 instead
    /// of dying in form parsing
    pub file: Option<TempFile<'a>>,
    /// the original extension, passed separately because the multipart file
    /// name comes through with its extension stripped
    pub extension: Option<String>,
    /// optional display name override; also used as the remote key
    customName: Option<String>,
    /// leave blank for an unfiled upload.
    ///
    /// Rocket has trouble parsing numeric form data fields from some clients,
    /// so this is accepted as a String and parsed by [`UploadFileRequest::folder_id`]
    folderId: Option<String>,
}

impl UploadFileRequest<'_> {
    /// the caller-supplied display name, if one was sent and isn't blank
    pub fn custom_name(&self) -> Option<String> {
        match &self.customName {
            Some(name) if !name.trim().is_empty() => Some(name.trim().to_string()),
            _ => None,
        }
    }

    /// parses the folder id field. `Ok(None)` when the field was absent or
    /// blank, `Err` when it was present but not a number
    pub fn folder_id(&self) -> Result<Option<u32>, ()> {
        match &self.folderId {
            None => Ok(None),
            Some(id) if id.trim().is_empty() => Ok(None),
            Some(id) => id.trim().parse::<u32>().map(Some).map_err(|_| ()),
        }
    }

    /// the lower-cased extension without any leading dot, or an empty string
    pub fn extension(&self) -> String {
        self.extension
            .as_deref()
            .unwrap_or("")
            .trim()
            .trim_start_matches('.')
            .to_ascii_lowercase()
    }
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct RenameFileRequest {
    pub name: String,
}

#[derive(PartialEq, Debug)]
pub enum UploadFileError {
    /// no file was included in the request
    MissingFile,
    /// the folder id field could not be parsed
    BadFolderId,
    /// the staging copy could not be written to the temp directory
    StagingFailure,
    /// the remote blob store rejected or failed the upload
    UploadFailed,
    /// the record could not be written after the remote upload succeeded;
    /// the remote object is orphaned (no compensation is attempted)
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum GetFileError {
    NotFound,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum ListFilesError {
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum RenameFileError {
    /// the new name is empty after trimming
    InvalidName,
    NotFound,
    /// the caller does not own the file
    NotOwner,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum DeleteFileError {
    NotFound,
    /// the caller does not own the file
    NotOwner,
    /// the remote blob store failed to delete the object; the local record is
    /// kept so the remote copy is never orphaned by a half-finished delete
    RemoteDeleteFailed,
    DbFailure,
}

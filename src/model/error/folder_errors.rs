#[derive(PartialEq, Debug)]
pub enum CreateFolderError {
    /// the folder name is empty after trimming
    InvalidName,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum ListFoldersError {
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum RenameFolderError {
    /// the new name is empty after trimming
    InvalidName,
    NotFound,
    /// the caller does not own the folder
    NotOwner,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum DeleteFolderError {
    NotFound,
    /// the caller does not own the folder
    NotOwner,
    DbFailure,
}

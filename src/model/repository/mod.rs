use chrono::NaiveDateTime;

/// a user's file as tracked in the repository. The bytes themselves live in
/// the remote blob store; [`locator`](FileRecord::locator) is the handle the
/// store hands back and is the only way to delete the remote copy later
#[derive(Debug, PartialEq, Clone)]
pub struct FileRecord {
    /// the id, will only be populated when pulled from the database
    pub id: Option<u32>,
    /// the verified identity of the user that uploaded the file; never changes
    pub owner: String,
    /// opaque identifier assigned by the remote blob store; unique per object
    pub locator: String,
    /// canonical access url reported by the remote blob store
    pub url: String,
    /// user-facing display name; the only mutable field
    pub name: String,
    /// lower-case extension tag reported by the store at upload time
    pub format: String,
    /// size in bytes as measured by the store
    pub size: u64,
    /// will be None if the file is unfiled
    pub folder_id: Option<u32>,
    /// the date the file was uploaded
    pub create_date: NaiveDateTime,
}

/// a single-level grouping of files. Folders do not own their files; the only
/// link is `files.folder_id` pointing back at the folder, which is why folder
/// deletion has to clean up referencing files explicitly
#[derive(Debug, PartialEq, Clone)]
pub struct Folder {
    /// cannot be changed, and only retrieved from the database
    pub id: Option<u32>,
    /// the verified identity of the user that created the folder; never changes
    pub owner: String,
    pub name: String,
    pub create_date: NaiveDateTime,
}

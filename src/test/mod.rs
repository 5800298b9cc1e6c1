use std::fs::{remove_dir_all, remove_file};
use std::path::Path;

use chrono::Utc;

use crate::model::repository::{FileRecord, Folder};
use crate::repository::{file_repository, folder_repository, initialize_db, open_connection};
use crate::{remote, temp_dir};

/// the users the identity header carries in tests
#[cfg(test)]
pub static USER_1: &str = "user-one";
#[cfg(test)]
pub static USER_2: &str = "user-two";

#[cfg(test)]
pub fn current_thread_name() -> String {
    let current_thread = std::thread::current();
    current_thread.name().unwrap().to_string()
}

/// starts the current test thread from a clean slate: fresh database, empty
/// mock blob store
#[cfg(test)]
pub fn refresh_db() {
    let thread_name = current_thread_name();
    remove_file(Path::new(format!("{thread_name}.sqlite").as_str())).unwrap_or(());
    initialize_db().unwrap();
    remote::mock::reset();
}

#[cfg(test)]
pub fn create_file_db_entry(
    owner: &str,
    name: &str,
    format: &str,
    folder_id: Option<u32>,
) -> u32 {
    let connection = open_connection();
    let id = file_repository::create_file(
        &FileRecord {
            id: None,
            owner: String::from(owner),
            locator: format!("mock/{name}"),
            url: format!("https://blob.invalid/mock/{name}"),
            name: String::from(name),
            format: String::from(format),
            size: 42,
            folder_id,
            create_date: Utc::now().naive_utc(),
        },
        &connection,
    )
    .unwrap();
    connection.close().unwrap();
    id
}

#[cfg(test)]
pub fn create_folder_db_entry(owner: &str, name: &str) -> u32 {
    let connection = open_connection();
    let id = folder_repository::create_folder(
        &Folder {
            id: None,
            owner: String::from(owner),
            name: String::from(name),
            create_date: Utc::now().naive_utc(),
        },
        &connection,
    )
    .unwrap();
    connection.close().unwrap();
    id
}

#[cfg(test)]
pub fn cleanup() {
    let thread_name = current_thread_name();
    remove_file(Path::new(format!("{thread_name}.sqlite").as_str())).unwrap_or(());
    remove_dir_all(Path::new(temp_dir().as_str())).unwrap_or(());
}

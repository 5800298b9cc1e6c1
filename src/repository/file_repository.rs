use rusqlite::{params, Connection, Row};

use crate::model::repository::FileRecord;

fn map_file_row(row: &Row) -> Result<FileRecord, rusqlite::Error> {
    Ok(FileRecord {
        id: row.get(0)?,
        owner: row.get(1)?,
        locator: row.get(2)?,
        url: row.get(3)?,
        name: row.get(4)?,
        format: row.get(5)?,
        size: row.get(6)?,
        folder_id: row.get(7)?,
        create_date: row.get(8)?,
    })
}

pub fn create_file(file: &FileRecord, con: &Connection) -> Result<u32, rusqlite::Error> {
    let mut pst = con
        .prepare(include_str!("../assets/queries/file/create_file.sql"))
        .unwrap();
    let id = pst.insert(params![
        file.owner,
        file.locator,
        file.url,
        file.name,
        file.format,
        file.size,
        file.folder_id,
        file.create_date,
    ])?;
    Ok(id as u32)
}

pub fn get_by_id(id: u32, con: &Connection) -> Result<FileRecord, rusqlite::Error> {
    let mut pst = con
        .prepare(include_str!("../assets/queries/file/get_file_by_id.sql"))
        .unwrap();
    pst.query_row([id], map_file_row)
}

/// returns every file the passed user owns, newest first
pub fn get_by_owner(owner: &str, con: &Connection) -> Result<Vec<FileRecord>, rusqlite::Error> {
    let mut pst = con
        .prepare(include_str!("../assets/queries/file/get_files_by_owner.sql"))
        .unwrap();
    let rows = pst.query_map([owner], map_file_row)?;
    rows.collect()
}

/// returns every file the passed user owns that sits in the passed folder, newest first
pub fn get_by_owner_and_folder(
    owner: &str,
    folder_id: u32,
    con: &Connection,
) -> Result<Vec<FileRecord>, rusqlite::Error> {
    let mut pst = con
        .prepare(include_str!(
            "../assets/queries/file/get_files_by_owner_and_folder.sql"
        ))
        .unwrap();
    let rows = pst.query_map(params![owner, folder_id], map_file_row)?;
    rows.collect()
}

/// updates the display name of the file with the passed id. Ownership must be
/// checked ahead of time
pub fn rename_file(id: u32, name: &str, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con
        .prepare(include_str!("../assets/queries/file/rename_file.sql"))
        .unwrap();
    pst.execute(params![id, name])?;
    Ok(())
}

/// removes the file with the passed id from the database. The remote object
/// must already be gone by the time this is called
pub fn delete_by_id(id: u32, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con
        .prepare(include_str!("../assets/queries/file/delete_file_by_id.sql"))
        .unwrap();
    pst.execute([id])?;
    Ok(())
}

/// bulk-removes every file row referencing the passed folder. This touches
/// repository rows only; it does not reach out to the blob store
pub fn delete_by_folder(folder_id: u32, con: &Connection) -> Result<usize, rusqlite::Error> {
    let mut pst = con
        .prepare(include_str!(
            "../assets/queries/file/delete_files_by_folder.sql"
        ))
        .unwrap();
    pst.execute([folder_id])
}

/// clears the folder reference of every file row referencing the passed
/// folder, leaving the files themselves untouched
pub fn detach_by_folder(folder_id: u32, con: &Connection) -> Result<usize, rusqlite::Error> {
    let mut pst = con
        .prepare(include_str!(
            "../assets/queries/file/detach_files_by_folder.sql"
        ))
        .unwrap();
    pst.execute([folder_id])
}

use rusqlite::{params, Connection, Row};

use crate::model::repository::Folder;

fn map_folder_row(row: &Row) -> Result<Folder, rusqlite::Error> {
    Ok(Folder {
        id: row.get(0)?,
        owner: row.get(1)?,
        name: row.get(2)?,
        create_date: row.get(3)?,
    })
}

pub fn create_folder(folder: &Folder, con: &Connection) -> Result<u32, rusqlite::Error> {
    let mut pst = con
        .prepare(include_str!(
            "../assets/queries/folder/create_folder.sql"
        ))
        .unwrap();
    let id = pst.insert(params![folder.owner, folder.name, folder.create_date])?;
    Ok(id as u32)
}

pub fn get_by_id(id: u32, con: &Connection) -> Result<Folder, rusqlite::Error> {
    let mut pst = con
        .prepare(include_str!(
            "../assets/queries/folder/get_folder_by_id.sql"
        ))
        .unwrap();
    pst.query_row([id], map_folder_row)
}

/// returns every folder the passed user owns, newest first
pub fn get_by_owner(owner: &str, con: &Connection) -> Result<Vec<Folder>, rusqlite::Error> {
    let mut pst = con
        .prepare(include_str!(
            "../assets/queries/folder/get_folders_by_owner.sql"
        ))
        .unwrap();
    let rows = pst.query_map([owner], map_folder_row)?;
    rows.collect()
}

/// updates the display name of the folder with the passed id. Ownership must
/// be checked ahead of time
pub fn rename_folder(id: u32, name: &str, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con
        .prepare(include_str!(
            "../assets/queries/folder/rename_folder.sql"
        ))
        .unwrap();
    pst.execute(params![id, name])?;
    Ok(())
}

/// removes the folder row itself. Referencing files must already have been
/// deleted or detached by the caller
pub fn delete_folder(id: u32, con: &Connection) -> Result<(), rusqlite::Error> {
    let mut pst = con
        .prepare(include_str!(
            "../assets/queries/folder/delete_folder_by_id.sql"
        ))
        .unwrap();
    pst.execute([id])?;
    Ok(())
}

use std::path::Path;

#[cfg(not(test))]
use rusqlite::OpenFlags;
use rusqlite::{Connection, Result};

pub mod file_repository;
pub mod folder_repository;

/// creates a new connection and returns it, but panics if the connection could not be created
#[cfg(not(test))]
pub fn open_connection() -> Connection {
    use crate::config::CLOUDBOX_CONFIG;

    match Connection::open_with_flags(
        Path::new(CLOUDBOX_CONFIG.clone().database.location.as_str()),
        OpenFlags::default(),
    ) {
        Ok(con) => con,
        Err(error) => panic!("Failed to get a connection to the database!: {error}"),
    }
}

#[cfg(test)]
pub fn open_connection() -> Connection {
    let db_name = format!("{}.sqlite", crate::test::current_thread_name());
    match Connection::open_with_flags(Path::new(db_name.as_str()), rusqlite::OpenFlags::default()) {
        Ok(con) => con,
        Err(error) => panic!("Failed to get a connection to the database!: {error}"),
    }
}

/// creates the tables if they don't exist yet. init.sql only uses
/// `IF NOT EXISTS` statements, so running this against a live database is a
/// no-op
pub fn initialize_db() -> Result<()> {
    let con = open_connection();
    con.execute_batch(include_str!("../assets/init.sql"))?;
    con.close().unwrap();
    Ok(())
}

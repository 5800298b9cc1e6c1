pub mod file_handler;
pub mod folder_handler;

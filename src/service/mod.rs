pub mod file_service;
pub mod folder_service;

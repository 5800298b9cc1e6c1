pub mod file_requests;
pub mod folder_requests;

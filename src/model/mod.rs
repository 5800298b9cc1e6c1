pub mod error;
pub mod repository;
pub mod request;
pub mod resource_kind;
pub mod response;

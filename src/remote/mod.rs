//! adapter over the remote blob store that actually holds the file bytes.
//!
//! The store's contract is small: hand it a local staging file plus a remote
//! key and it returns a locator + derived metadata; hand it a locator plus
//! the resource kind it filed the object under and it deletes the object.
//! Everything past that (auth to the vendor, retries, quotas) is the store's
//! problem, not ours.

use rocket::serde::{Deserialize, Serialize};

#[cfg(not(test))]
mod http;
#[cfg(test)]
pub mod mock;

#[cfg(not(test))]
pub use http::{delete_object, upload_object};
#[cfg(test)]
pub use mock::{delete_object, upload_object};

/// what the store reports back about a successfully uploaded object
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(crate = "rocket::serde")]
pub struct RemoteObject {
    /// opaque handle; the only way to delete the object later
    pub locator: String,
    #[serde(rename = "canonicalUrl")]
    pub url: String,
    /// lower-case extension tag the store detected
    pub format: String,
    #[serde(rename = "sizeBytes")]
    pub size: u64,
    /// the original file name with the extension stripped
    #[serde(rename = "originalName")]
    pub original_name: String,
}

#[derive(PartialEq, Debug)]
pub enum RemoteError {
    UploadFailed,
    DeleteFailed,
}

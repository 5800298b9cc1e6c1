//! test stand-in for the blob store. Records every upload and delete per test
//! thread (tests each get their own database file keyed by thread name, and
//! the mock store follows the same scheme) and can be told to fail the next
//! calls so the remote-before-local ordering can be exercised.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use once_cell::sync::Lazy;

use crate::model::resource_kind::ResourceKind;
use crate::remote::{RemoteError, RemoteObject};

#[derive(Default)]
struct MockStoreState {
    uploads: Vec<RemoteObject>,
    deletes: Vec<(String, ResourceKind)>,
    fail_uploads: bool,
    fail_deletes: bool,
}

static STORES: Lazy<Mutex<HashMap<String, MockStoreState>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn with_state<T>(action: impl FnOnce(&mut MockStoreState) -> T) -> T {
    let thread_name = crate::test::current_thread_name();
    let mut stores = STORES.lock().unwrap();
    action(stores.entry(thread_name).or_default())
}

pub async fn upload_object(
    local_path: &Path,
    remote_key: &str,
    original_name: &str,
) -> Result<RemoteObject, RemoteError> {
    if with_state(|state| state.fail_uploads) {
        return Err(RemoteError::UploadFailed);
    }
    // reading the staging file keeps the mock honest: an upload attempted
    // before the staging copy exists (or after it was cleaned up) fails just
    // like the real store would
    let size = match fs::metadata(local_path) {
        Ok(meta) => meta.len(),
        Err(_) => return Err(RemoteError::UploadFailed),
    };
    let (stem, format) = match original_name.rsplit_once('.') {
        Some((stem, extension)) => (stem.to_string(), extension.to_ascii_lowercase()),
        None => (original_name.to_string(), String::new()),
    };
    let object = RemoteObject {
        locator: format!("mock/{remote_key}"),
        url: format!("https://blob.invalid/mock/{remote_key}"),
        format,
        size,
        original_name: stem,
    };
    with_state(|state| state.uploads.push(object.clone()));
    Ok(object)
}

pub async fn delete_object(locator: &str, kind: ResourceKind) -> Result<(), RemoteError> {
    if with_state(|state| state.fail_deletes) {
        return Err(RemoteError::DeleteFailed);
    }
    with_state(|state| state.deletes.push((locator.to_string(), kind)));
    Ok(())
}

/// clears all recorded calls and failure flags for the current test thread
pub fn reset() {
    with_state(|state| *state = MockStoreState::default());
}

pub fn set_fail_uploads(fail: bool) {
    with_state(|state| state.fail_uploads = fail);
}

pub fn set_fail_deletes(fail: bool) {
    with_state(|state| state.fail_deletes = fail);
}

/// every object the current test thread has uploaded, in order
pub fn uploads() -> Vec<RemoteObject> {
    with_state(|state| state.uploads.clone())
}

/// every (locator, kind) pair the current test thread has deleted, in order
pub fn deletes() -> Vec<(String, ResourceKind)> {
    with_state(|state| state.deletes.clone())
}

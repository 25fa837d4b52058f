//! Signed-in user persisted by the login page.

use engine::Identity;
use log::warn;
use web_sys::Storage;

use crate::config::SESSION_USER_KEY;

fn storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// The stored identity, or `None` when nobody is signed in or the entry is
/// unreadable.
pub fn load_identity() -> Option<Identity> {
    let raw = storage()?.get_item(SESSION_USER_KEY).ok()??;
    match serde_json::from_str::<Identity>(&raw) {
        Ok(identity) => Some(identity),
        Err(error) => {
            warn!("ignoring malformed session entry: {error}");
            None
        }
    }
}

pub fn clear_identity() {
    if let Some(storage) = storage() {
        storage.remove_item(SESSION_USER_KEY).ok();
    }
}

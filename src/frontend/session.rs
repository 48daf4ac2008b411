//! Explicit handle over the browser session state: the display name a
//! user entered at the gate and the owner's bearer token. Provided once
//! as leptos context so pages and services never reach into ambient
//! storage on their own.

use web_sys::Storage;

const USERNAME_KEY: &str = "username";
const TOKEN_KEY: &str = "jwtToken";

#[derive(Debug, Clone, Copy, Default)]
pub struct Session;

impl Session {
    fn storage() -> Option<Storage> {
        web_sys::window().and_then(|window| window.session_storage().ok().flatten())
    }

    fn read(key: &str) -> Option<String> {
        Self::storage()
            .and_then(|storage| storage.get_item(key).ok().flatten())
            .filter(|value| !value.is_empty())
    }

    pub fn username(&self) -> Option<String> {
        Self::read(USERNAME_KEY)
    }

    pub fn set_username(&self, name: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(USERNAME_KEY, name);
        }
    }

    pub fn token(&self) -> Option<String> {
        Self::read(TOKEN_KEY)
    }

    /// Called with the token returned by a successful owner login.
    pub fn login(&self, token: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(TOKEN_KEY, token);
        }
    }

    /// Drops the bearer token. The display name survives the logout,
    /// the user flow never clears it explicitly.
    pub fn logout(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}

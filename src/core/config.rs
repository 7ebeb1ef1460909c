use std::fmt;

use serde::Deserialize;

use crate::core::routes::Route;

#[derive(Debug, Deserialize)]
pub struct Config {
    // Principals allowed to login. Fixed for the process lifetime.
    #[serde(default = "Config::default_users")]
    pub users: Vec<UserEntry>,
    // Delivery routes served by the backend.
    // None means the built-in demo dataset.
    pub routes: Option<Vec<Route>>,
}

#[derive(Deserialize, Clone)]
pub struct UserEntry {
    pub username: String,
    pub password: String,
}

// Mask the password.
impl fmt::Debug for UserEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("UserEntry")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Config {
    fn default_users() -> Vec<UserEntry> {
        vec![
            UserEntry {
                username: "kurier".into(),
                password: "kurier".into(),
            },
            UserEntry {
                username: "admin".into(),
                password: "admin".into(),
            },
        ]
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            users: Config::default_users(),
            routes: None,
        }
    }
}

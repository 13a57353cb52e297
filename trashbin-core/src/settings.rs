use std::time::Duration;

use crate::model::view::SortMode;

#[derive(Debug)]
pub struct Settings {
    pub password: Option<String>,
    pub server: String,
    pub sort: SortMode,
    pub startup_path: Option<String>,
    pub timeout: Duration,
    pub user: String,
    pub web_root: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            password: None,
            server: "http://localhost".to_string(),
            sort: SortMode::default(),
            startup_path: None,
            timeout: Duration::from_secs(30),
            user: String::new(),
            web_root: String::new(),
        }
    }
}

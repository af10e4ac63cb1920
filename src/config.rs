pub const DEFAULT_KEY_PREFIX: &str = "shareToInspire";
pub const DEFAULT_DATA_DIR: &str = "./inspire-data";

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
pub const SHARE_PREVIEW_CHARS: usize = 100;

pub fn key_prefix() -> String {
    std::env::var("INSPIRE_KEY_PREFIX")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_string())
}

/// Names of the records the store keeps in the key-value surface.
#[derive(Debug, Clone)]
pub struct StorageKeys {
    pub users: String,
    pub current_user: String,
    pub posts: String,
    pub theme: String,
}

impl StorageKeys {
    pub fn with_prefix(prefix: &str) -> Self {
        StorageKeys {
            users: format!("{}_users", prefix),
            current_user: format!("{}_currentUser", prefix),
            posts: format!("{}_posts", prefix),
            theme: format!("{}_theme", prefix),
        }
    }

    pub fn all(&self) -> [&str; 4] {
        [
            self.users.as_str(),
            self.current_user.as_str(),
            self.posts.as_str(),
            self.theme.as_str(),
        ]
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        StorageKeys::with_prefix(&key_prefix())
    }
}

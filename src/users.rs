use tracing::info;

use crate::core::errors::{StoreError, StoreResult};
use crate::core::helpers::{normalize_email, validate_signup};
use crate::core::kv::KeyValue;
use crate::models::models::User;
use crate::store::PersistedStore;

impl<K: KeyValue> PersistedStore<K> {
    /// Creates an account and logs it in.
    pub fn register_user(&mut self, name: &str, email: &str, password: &str) -> StoreResult<User> {
        let errors = validate_signup(name, email, password);
        if !errors.is_empty() {
            return Err(StoreError::Validation(errors));
        }

        let email = normalize_email(email);
        if self.find_user_by_email(&email).is_some() {
            return Err(StoreError::DuplicateEmail);
        }

        let id = self.next_id();
        let user = User {
            id,
            name: name.trim().to_string(),
            email,
            password: password.to_string(),
            joined_at: self.now(),
        };

        self.users.push(user.clone());
        self.persist_users();

        self.session = Some(user.clone());
        self.persist_session();

        info!(user_id = user.id, "user registered");
        Ok(user)
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        let email = normalize_email(email);
        self.users.iter().find(|u| u.email.to_lowercase() == email)
    }
}

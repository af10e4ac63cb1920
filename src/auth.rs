use tracing::{debug, info};

use crate::core::errors::{StoreError, StoreResult};
use crate::core::kv::KeyValue;
use crate::models::models::User;
use crate::store::PersistedStore;

impl<K: KeyValue> PersistedStore<K> {
    /// Unknown email and wrong password fail the same way.
    pub fn login(&mut self, email: &str, password: &str) -> StoreResult<User> {
        let user = match self.find_user_by_email(email) {
            Some(u) if u.password == password => u.clone(),
            _ => {
                debug!("login rejected");
                return Err(StoreError::InvalidCredentials);
            }
        };

        self.session = Some(user.clone());
        self.persist_session();

        info!(user_id = user.id, "user logged in");
        Ok(user)
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.session.take() {
            info!(user_id = user.id, "user logged out");
        }
        self.persist_session();
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.as_ref()
    }
}

use crate::domain::UserIdentity;
use crate::ports::current_user::CurrentUser as CurrentUserTrait;
use async_trait::async_trait;
use std::sync::Mutex;

/// Mock implementation of CurrentUser
///
/// Holds the signed-in identity in memory.
pub struct CurrentUser {
    identity: Mutex<Option<UserIdentity>>,
}

impl CurrentUser {
    /// Nobody signed in
    pub fn new() -> Self {
        Self {
            identity: Mutex::new(None),
        }
    }

    pub fn signed_in(identity: UserIdentity) -> Self {
        Self {
            identity: Mutex::new(Some(identity)),
        }
    }

    pub fn sign_in(&self, identity: UserIdentity) {
        *self.identity.lock().unwrap() = Some(identity);
    }

    pub fn sign_out(&self) {
        *self.identity.lock().unwrap() = None;
    }
}

impl Default for CurrentUser {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CurrentUserTrait for CurrentUser {
    async fn current_user(&self) -> Option<UserIdentity> {
        *self.identity.lock().unwrap()
    }
}

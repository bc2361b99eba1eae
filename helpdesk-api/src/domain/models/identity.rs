use super::UserId;

pub const ADMIN_ROLE: &str = "admin";

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub roles: Vec<String>,
}

impl Identity {
    pub fn new(user_id: impl Into<UserId>, roles: Vec<String>) -> Self {
        Self {
            user_id: user_id.into(),
            roles,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|role| role == ADMIN_ROLE)
    }
}

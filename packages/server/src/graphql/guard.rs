use async_graphql::{Context, Guard, Result};

use super::error::access_denied;
use crate::entity::role::Role;
use crate::extractors::auth::AuthUser;

/// Field guard requiring at least `required` in the role hierarchy.
pub struct RoleGuard {
    required: Role,
}

impl RoleGuard {
    pub fn new(required: Role) -> Self {
        Self { required }
    }
}

impl Guard for RoleGuard {
    async fn check(&self, ctx: &Context<'_>) -> Result<()> {
        match ctx.data_opt::<AuthUser>() {
            Some(user) if user.role.includes(self.required) => Ok(()),
            Some(user) => {
                tracing::info!(
                    email = %user.email,
                    role = %user.role,
                    required = %self.required,
                    "Access denied"
                );
                Err(access_denied())
            }
            None => Err(access_denied()),
        }
    }
}

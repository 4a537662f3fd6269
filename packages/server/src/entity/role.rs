use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Authorization level of a member. Higher roles include every lower one:
/// `Admin > Member > User`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Role {
    #[sea_orm(string_value = "ROLE_USER")]
    #[serde(rename = "ROLE_USER")]
    User,
    #[sea_orm(string_value = "ROLE_MEMBER")]
    #[serde(rename = "ROLE_MEMBER")]
    Member,
    #[sea_orm(string_value = "ROLE_ADMIN")]
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

/// The role assigned to newly registered members.
pub const DEFAULT_ROLE: Role = Role::User;

impl Role {
    fn rank(self) -> u8 {
        match self {
            Role::User => 0,
            Role::Member => 1,
            Role::Admin => 2,
        }
    }

    /// Whether holding `self` grants everything `required` grants.
    pub fn includes(self, required: Role) -> bool {
        self.rank() >= required.rank()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "ROLE_USER",
            Role::Member => "ROLE_MEMBER",
            Role::Admin => "ROLE_ADMIN",
        }
    }

    /// Parse the wire name (`ROLE_MEMBER`), case-insensitively.
    pub fn parse(value: &str) -> Option<Role> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ROLE_USER" => Some(Role::User),
            "ROLE_MEMBER" => Some(Role::Member),
            "ROLE_ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

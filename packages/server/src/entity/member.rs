use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::role::Role;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "member")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 PHC string. NULL until the account completes registration.
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub bike: Option<String>,

    pub active: bool,
    pub verified: bool,
    pub admin: bool,
    pub role: Role,

    /// Pending one-time password, cleared once consumed.
    #[serde(skip_serializing)]
    pub otp: Option<String>,
    pub otp_date: Option<DateTime>,

    pub attachment_id: Option<i64>,
    #[sea_orm(belongs_to, from = "attachment_id", to = "id")]
    pub avatar: HasOne<super::attachment::Entity>,

    #[sea_orm(has_many)]
    pub liked_news: HasMany<super::liked_news::Entity>,

    #[sea_orm(has_many)]
    pub participations: HasMany<super::event_member::Entity>,

    #[sea_orm(has_many)]
    pub lap_records: HasMany<super::lap_record::Entity>,

    pub registration_date: Option<DateTime>,
    pub created_on: DateTime,
    pub modified_on: Option<DateTime>,
}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Participation of a member in an event.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event_member")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub member_id: i64,
    #[sea_orm(belongs_to, from = "member_id", to = "id")]
    pub member: HasOne<super::member::Entity>,

    pub event_id: i64,
    #[sea_orm(belongs_to, from = "event_id", to = "id")]
    pub event: HasOne<super::event::Entity>,

    pub created_on: DateTime,
}

impl ActiveModelBehavior for ActiveModel {}

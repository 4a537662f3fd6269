use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lap_record")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub track_id: i64,
    #[sea_orm(belongs_to, from = "track_id", to = "id")]
    pub track: HasOne<super::track::Entity>,

    pub member_id: i64,
    #[sea_orm(belongs_to, from = "member_id", to = "id")]
    pub member: HasOne<super::member::Entity>,

    pub lap_time: i32, // in milliseconds
    pub record_date: DateTime,
    pub conditions: String,
    pub comments: Option<String>,

    pub created_on: DateTime,
    pub modified_on: Option<DateTime>,
}

impl ActiveModelBehavior for ActiveModel {}

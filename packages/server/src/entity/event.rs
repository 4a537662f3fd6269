use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub title: String,
    pub description: Option<String>,
    pub start_date: DateTime,
    pub end_date: DateTime,
    pub organizer: Option<String>,
    pub price: Option<f64>,

    /// NULL once the track has been deleted.
    pub track_id: Option<i64>,
    #[sea_orm(belongs_to, from = "track_id", to = "id")]
    pub track: HasOne<super::track::Entity>,

    #[sea_orm(has_many)]
    pub participants: HasMany<super::event_member::Entity>,

    pub created_on: DateTime,
    /// Member id, kept as a plain reference so deleting the member keeps the event.
    pub created_by: Option<i64>,
    pub modified_on: Option<DateTime>,
    pub modified_by: Option<i64>,
}

impl ActiveModelBehavior for ActiveModel {}

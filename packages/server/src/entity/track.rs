use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "track")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub name: String,
    /// Length of one lap, in meters.
    pub distance: i32,
    /// Best known lap time, in milliseconds.
    pub lap_record: i32,
    pub website: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    #[sea_orm(has_many)]
    pub events: HasMany<super::event::Entity>,

    #[sea_orm(has_many)]
    pub lap_records: HasMany<super::lap_record::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}

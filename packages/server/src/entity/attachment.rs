use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Binary file owned by a member (its avatar).
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attachment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub filename: String,
    #[serde(skip_serializing)]
    pub file: Vec<u8>,

    #[sea_orm(has_one)]
    pub member: HasOne<super::member::Entity>,

    pub upload_date: DateTime,
}

impl ActiveModelBehavior for ActiveModel {}

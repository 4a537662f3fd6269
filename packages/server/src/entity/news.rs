use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "news")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub title: String,
    pub catch_line: Option<String>,
    pub content: Option<String>,
    pub news_date: DateTime,

    #[sea_orm(has_many)]
    pub likes: HasMany<super::liked_news::Entity>,

    pub created_on: DateTime,
    pub created_by: Option<i64>,
    pub modified_on: Option<DateTime>,
    pub modified_by: Option<i64>,
}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A member liking a news. The (member, news) pair is unique, see
/// `seed::ensure_indexes`.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "liked_news")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub member_id: i64,
    #[sea_orm(belongs_to, from = "member_id", to = "id")]
    pub member: HasOne<super::member::Entity>,

    pub news_id: i64,
    #[sea_orm(belongs_to, from = "news_id", to = "id")]
    pub news: HasOne<super::news::Entity>,

    pub created_on: DateTime,
}

impl ActiveModelBehavior for ActiveModel {}

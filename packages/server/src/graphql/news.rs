use async_graphql::{Context, Object, Result, ResultExt};
use sea_orm::DatabaseConnection;
use tracing::info;

use super::guard::RoleGuard;
use super::parse_date;
use super::scalars::Long;
use super::types::{News, NewsPage};
use crate::entity::role::Role;
use crate::services::news::{self as service, NewsInput};

#[derive(Default)]
pub struct NewsQuery;

#[Object]
impl NewsQuery {
    /// Every news, most recent first.
    #[graphql(guard = "RoleGuard::new(Role::Member)")]
    async fn get_all_news(&self, ctx: &Context<'_>) -> Result<Vec<News>> {
        info!("Received call to getAllNews");
        let db = ctx.data::<DatabaseConnection>()?;
        let news = service::get_all_news(db).await.extend()?;
        Ok(news.into_iter().map(News).collect())
    }

    #[graphql(guard = "RoleGuard::new(Role::Admin)")]
    async fn get_all_news_filtered_paginated(
        &self,
        ctx: &Context<'_>,
        text: Option<String>,
        #[graphql(default = 0)] page_number: i32,
        #[graphql(default = 10)] page_size: i32,
        sort_by: Option<String>,
        sort_direction: Option<String>,
    ) -> Result<NewsPage> {
        info!(?text, page_number, page_size, ?sort_by, ?sort_direction, "Received call to getAllNewsFilteredPaginated");
        let db = ctx.data::<DatabaseConnection>()?;
        let page = service::get_all_news_filtered_paginated(
            db,
            text.as_deref(),
            i64::from(page_number),
            i64::from(page_size),
            sort_by.as_deref().unwrap_or("newsDate"),
            sort_direction.as_deref().unwrap_or("desc"),
        )
        .await
        .extend()?;
        Ok(NewsPage(page))
    }

    #[graphql(guard = "RoleGuard::new(Role::Member)")]
    async fn get_news_by_id(&self, ctx: &Context<'_>, id: Long) -> Result<News> {
        info!(id = id.0, "Received call to getNewsById");
        let db = ctx.data::<DatabaseConnection>()?;
        Ok(News(service::get_news_by_id(db, id.0).await.extend()?))
    }
}

#[derive(Default)]
pub struct NewsMutation;

#[Object]
impl NewsMutation {
    #[graphql(guard = "RoleGuard::new(Role::Admin)")]
    async fn create_news(
        &self,
        ctx: &Context<'_>,
        title: String,
        catch_line: Option<String>,
        content: Option<String>,
        news_date: String,
        member_id: Long,
    ) -> Result<News> {
        info!(%title, %news_date, member_id = member_id.0, "Received call to createNews");
        let db = ctx.data::<DatabaseConnection>()?;
        let input = NewsInput {
            title,
            catch_line,
            content,
            news_date: parse_date(&news_date)?,
        };
        Ok(News(
            service::create_news(db, input, member_id.0).await.extend()?,
        ))
    }

    #[graphql(guard = "RoleGuard::new(Role::Admin)")]
    async fn update_news(
        &self,
        ctx: &Context<'_>,
        news_id: Long,
        title: String,
        catch_line: Option<String>,
        content: Option<String>,
        news_date: String,
        member_id: Long,
    ) -> Result<News> {
        info!(news_id = news_id.0, %title, member_id = member_id.0, "Received call to updateNews");
        let db = ctx.data::<DatabaseConnection>()?;
        let input = NewsInput {
            title,
            catch_line,
            content,
            news_date: parse_date(&news_date)?,
        };
        Ok(News(
            service::update_news(db, news_id.0, input, member_id.0)
                .await
                .extend()?,
        ))
    }

    #[graphql(guard = "RoleGuard::new(Role::Admin)")]
    async fn delete_news(&self, ctx: &Context<'_>, news_id: Long) -> Result<News> {
        info!(news_id = news_id.0, "Received call to deleteNews");
        let db = ctx.data::<DatabaseConnection>()?;
        Ok(News(service::delete_news(db, news_id.0).await.extend()?))
    }

    #[graphql(guard = "RoleGuard::new(Role::Member)")]
    async fn like_news(&self, ctx: &Context<'_>, news_id: Long, member_id: Long) -> Result<News> {
        info!(news_id = news_id.0, member_id = member_id.0, "Received call to likeNews");
        let db = ctx.data::<DatabaseConnection>()?;
        Ok(News(
            service::like_news(db, news_id.0, member_id.0)
                .await
                .extend()?,
        ))
    }

    #[graphql(guard = "RoleGuard::new(Role::Member)")]
    async fn unlike_news(
        &self,
        ctx: &Context<'_>,
        news_id: Long,
        member_id: Long,
    ) -> Result<News> {
        info!(news_id = news_id.0, member_id = member_id.0, "Received call to unlikeNews");
        let db = ctx.data::<DatabaseConnection>()?;
        Ok(News(
            service::unlike_news(db, news_id.0, member_id.0)
                .await
                .extend()?,
        ))
    }
}

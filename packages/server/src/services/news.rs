use chrono::NaiveDateTime;
use sea_orm::*;
use tracing::instrument;

use super::is_unique_violation;
use super::member::find_member;
use crate::entity::{liked_news, news};
use crate::error::ServiceError;
use crate::models::shared::{contains_ignore_case, non_blank};
use crate::utils::datetime;

#[derive(Debug, Clone)]
pub struct NewsInput {
    pub title: String,
    pub catch_line: Option<String>,
    pub content: Option<String>,
    pub news_date: NaiveDateTime,
}

/// One page of a filtered news listing. `page_number` is 0-based.
#[derive(Debug, Clone)]
pub struct NewsPage {
    pub content: Vec<news::Model>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub page_number: u64,
    pub page_size: u64,
}

pub async fn find_news<C: ConnectionTrait>(db: &C, id: i64) -> Result<news::Model, ServiceError> {
    news::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::NewsNotFound)
}

#[instrument(skip(db))]
pub async fn get_all_news<C: ConnectionTrait>(db: &C) -> Result<Vec<news::Model>, ServiceError> {
    Ok(news::Entity::find()
        .order_by_desc(news::Column::NewsDate)
        .all(db)
        .await?)
}

#[instrument(skip(db))]
pub async fn get_news_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<news::Model, ServiceError> {
    find_news(db, id).await
}

fn sort_column(sort_by: &str) -> Result<news::Column, ServiceError> {
    match sort_by {
        "id" => Ok(news::Column::Id),
        "title" => Ok(news::Column::Title),
        "newsDate" => Ok(news::Column::NewsDate),
        "createdOn" => Ok(news::Column::CreatedOn),
        "modifiedOn" => Ok(news::Column::ModifiedOn),
        _ => Err(ServiceError::InvalidArgument(
            "sortBy must be one of: id, title, newsDate, createdOn, modifiedOn".into(),
        )),
    }
}

fn sort_order(sort_direction: &str) -> Order {
    if sort_direction.trim().eq_ignore_ascii_case("asc") {
        Order::Asc
    } else {
        Order::Desc
    }
}

/// Case-insensitive title search, one 0-based page at a time.
#[instrument(skip(db))]
pub async fn get_all_news_filtered_paginated<C: ConnectionTrait>(
    db: &C,
    text: Option<&str>,
    page_number: i64,
    page_size: i64,
    sort_by: &str,
    sort_direction: &str,
) -> Result<NewsPage, ServiceError> {
    let page_number = u64::try_from(page_number)
        .map_err(|_| ServiceError::InvalidArgument("pageNumber must be >= 0".into()))?;
    let page_size = u64::try_from(page_size)
        .ok()
        .filter(|size| *size > 0)
        .ok_or_else(|| ServiceError::InvalidArgument("pageSize must be >= 1".into()))?;
    let column = sort_column(sort_by)?;

    let mut select = news::Entity::find();
    if let Some(text) = non_blank(text) {
        select = select.filter(contains_ignore_case(news::Column::Title, text));
    }

    let total_elements = select.clone().paginate(db, page_size).num_items().await?;

    let content = select
        .order_by(column, sort_order(sort_direction))
        .order_by_asc(news::Column::Id)
        .offset(Some(page_number * page_size))
        .limit(Some(page_size))
        .all(db)
        .await?;

    Ok(NewsPage {
        content,
        total_elements,
        total_pages: total_elements.div_ceil(page_size),
        page_number,
        page_size,
    })
}

#[instrument(skip(db, input), fields(title = %input.title))]
pub async fn create_news<C: ConnectionTrait>(
    db: &C,
    input: NewsInput,
    member_id: i64,
) -> Result<news::Model, ServiceError> {
    find_member(db, member_id).await?;

    let model = news::ActiveModel {
        title: Set(input.title),
        catch_line: Set(input.catch_line),
        content: Set(input.content),
        news_date: Set(input.news_date),
        created_on: Set(datetime::now()),
        created_by: Set(Some(member_id)),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(model)
}

#[instrument(skip(db, input), fields(title = %input.title))]
pub async fn update_news<C: ConnectionTrait>(
    db: &C,
    id: i64,
    input: NewsInput,
    member_id: i64,
) -> Result<news::Model, ServiceError> {
    let existing = find_news(db, id).await?;
    find_member(db, member_id).await?;

    let mut active: news::ActiveModel = existing.into();
    active.title = Set(input.title);
    active.catch_line = Set(input.catch_line);
    active.content = Set(input.content);
    active.news_date = Set(input.news_date);
    active.modified_on = Set(Some(datetime::now()));
    active.modified_by = Set(Some(member_id));

    Ok(active.update(db).await?)
}

/// Delete a news and every like it received.
#[instrument(skip(db))]
pub async fn delete_news(db: &DatabaseConnection, id: i64) -> Result<news::Model, ServiceError> {
    let txn = db.begin().await?;

    let model = find_news(&txn, id).await?;
    liked_news::Entity::delete_many()
        .filter(liked_news::Column::NewsId.eq(id))
        .exec(&txn)
        .await?;
    news::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(model)
}

async fn find_like<C: ConnectionTrait>(
    db: &C,
    news_id: i64,
    member_id: i64,
) -> Result<Option<liked_news::Model>, DbErr> {
    liked_news::Entity::find()
        .filter(liked_news::Column::NewsId.eq(news_id))
        .filter(liked_news::Column::MemberId.eq(member_id))
        .one(db)
        .await
}

/// Record that `member_id` likes `news_id`, then return the refreshed news.
#[instrument(skip(db))]
pub async fn like_news<C: ConnectionTrait>(
    db: &C,
    news_id: i64,
    member_id: i64,
) -> Result<news::Model, ServiceError> {
    find_news(db, news_id).await?;
    find_member(db, member_id).await?;
    if find_like(db, news_id, member_id).await?.is_some() {
        return Err(ServiceError::NewsAlreadyLikedByMember);
    }

    liked_news::ActiveModel {
        member_id: Set(member_id),
        news_id: Set(news_id),
        created_on: Set(datetime::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            tracing::debug!("Like race condition: unique constraint caught on insert");
            ServiceError::NewsAlreadyLikedByMember
        } else {
            ServiceError::from(e)
        }
    })?;

    find_news(db, news_id).await
}

#[instrument(skip(db))]
pub async fn unlike_news<C: ConnectionTrait>(
    db: &C,
    news_id: i64,
    member_id: i64,
) -> Result<news::Model, ServiceError> {
    find_news(db, news_id).await?;
    find_member(db, member_id).await?;

    let result = liked_news::Entity::delete_many()
        .filter(liked_news::Column::NewsId.eq(news_id))
        .filter(liked_news::Column::MemberId.eq(member_id))
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(ServiceError::NewsNotLikedByMember);
    }

    find_news(db, news_id).await
}

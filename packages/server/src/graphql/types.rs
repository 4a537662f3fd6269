//! Output objects.
//!
//! Each type is an explicit view over an entity model. Relations resolve
//! lazily against the database, so a query only pays for the edges it
//! selects.

use async_graphql::{Context, Error, ErrorExtensions, Object, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

use super::scalars::{LocalDateTime, Long};
use crate::entity::{attachment, event, event_member, lap_record, liked_news, member, news, track};
use crate::error::ServiceError;
use crate::services::news::NewsPage as NewsPageModel;

fn db<'a>(ctx: &Context<'a>) -> Result<&'a DatabaseConnection> {
    ctx.data::<DatabaseConnection>()
}

fn db_error(err: DbErr) -> Error {
    ServiceError::from(err).extend()
}

fn local(value: Option<chrono::NaiveDateTime>) -> Option<LocalDateTime> {
    value.map(LocalDateTime)
}

async fn member_by_id(ctx: &Context<'_>, id: Option<i64>) -> Result<Option<Member>> {
    let Some(id) = id else {
        return Ok(None);
    };
    let found = member::Entity::find_by_id(id)
        .one(db(ctx)?)
        .await
        .map_err(db_error)?;
    Ok(found.map(Member))
}

pub struct Member(pub member::Model);

#[Object]
impl Member {
    async fn id(&self) -> Long {
        Long(self.0.id)
    }

    async fn first_name(&self) -> &str {
        &self.0.first_name
    }

    async fn last_name(&self) -> &str {
        &self.0.last_name
    }

    async fn email(&self) -> &str {
        &self.0.email
    }

    async fn phone(&self) -> Option<&str> {
        self.0.phone.as_deref()
    }

    async fn avatar_url(&self) -> Option<&str> {
        self.0.avatar_url.as_deref()
    }

    async fn bike(&self) -> Option<&str> {
        self.0.bike.as_deref()
    }

    async fn active(&self) -> bool {
        self.0.active
    }

    async fn verified(&self) -> bool {
        self.0.verified
    }

    async fn admin(&self) -> bool {
        self.0.admin
    }

    /// `ROLE_USER`, `ROLE_MEMBER` or `ROLE_ADMIN`.
    async fn role(&self) -> &'static str {
        self.0.role.as_str()
    }

    async fn registration_date(&self) -> Option<LocalDateTime> {
        local(self.0.registration_date)
    }

    async fn created_on(&self) -> LocalDateTime {
        LocalDateTime(self.0.created_on)
    }

    async fn modified_on(&self) -> Option<LocalDateTime> {
        local(self.0.modified_on)
    }

    async fn avatar(&self, ctx: &Context<'_>) -> Result<Option<Attachment>> {
        let Some(id) = self.0.attachment_id else {
            return Ok(None);
        };
        let found = attachment::Entity::find_by_id(id)
            .one(db(ctx)?)
            .await
            .map_err(db_error)?;
        Ok(found.map(Attachment))
    }

    async fn liked_news(&self, ctx: &Context<'_>) -> Result<Vec<LikedNews>> {
        let rows = liked_news::Entity::find()
            .filter(liked_news::Column::MemberId.eq(self.0.id))
            .order_by_asc(liked_news::Column::Id)
            .all(db(ctx)?)
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(LikedNews).collect())
    }

    async fn event_members(&self, ctx: &Context<'_>) -> Result<Vec<EventMember>> {
        let rows = event_member::Entity::find()
            .filter(event_member::Column::MemberId.eq(self.0.id))
            .order_by_asc(event_member::Column::Id)
            .all(db(ctx)?)
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(EventMember).collect())
    }

    async fn lap_records(&self, ctx: &Context<'_>) -> Result<Vec<LapRecord>> {
        let rows = lap_record::Entity::find()
            .filter(lap_record::Column::MemberId.eq(self.0.id))
            .order_by_asc(lap_record::Column::LapTime)
            .all(db(ctx)?)
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(LapRecord).collect())
    }
}

pub struct Attachment(pub attachment::Model);

#[Object]
impl Attachment {
    async fn id(&self) -> Long {
        Long(self.0.id)
    }

    async fn filename(&self) -> &str {
        &self.0.filename
    }

    /// File content, base64-encoded.
    async fn file(&self) -> String {
        STANDARD.encode(&self.0.file)
    }

    async fn upload_date(&self) -> LocalDateTime {
        LocalDateTime(self.0.upload_date)
    }
}

pub struct Event(pub event::Model);

#[Object]
impl Event {
    async fn id(&self) -> Long {
        Long(self.0.id)
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }

    async fn start_date(&self) -> LocalDateTime {
        LocalDateTime(self.0.start_date)
    }

    async fn end_date(&self) -> LocalDateTime {
        LocalDateTime(self.0.end_date)
    }

    async fn organizer(&self) -> Option<&str> {
        self.0.organizer.as_deref()
    }

    async fn price(&self) -> Option<f64> {
        self.0.price
    }

    async fn track(&self, ctx: &Context<'_>) -> Result<Option<Track>> {
        let Some(id) = self.0.track_id else {
            return Ok(None);
        };
        let found = track::Entity::find_by_id(id)
            .one(db(ctx)?)
            .await
            .map_err(db_error)?;
        Ok(found.map(Track))
    }

    async fn participants(&self, ctx: &Context<'_>) -> Result<Vec<EventMember>> {
        let rows = event_member::Entity::find()
            .filter(event_member::Column::EventId.eq(self.0.id))
            .order_by_asc(event_member::Column::Id)
            .all(db(ctx)?)
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(EventMember).collect())
    }

    async fn created_on(&self) -> LocalDateTime {
        LocalDateTime(self.0.created_on)
    }

    async fn created_by(&self, ctx: &Context<'_>) -> Result<Option<Member>> {
        member_by_id(ctx, self.0.created_by).await
    }

    async fn modified_on(&self) -> Option<LocalDateTime> {
        local(self.0.modified_on)
    }

    async fn modified_by(&self, ctx: &Context<'_>) -> Result<Option<Member>> {
        member_by_id(ctx, self.0.modified_by).await
    }
}

pub struct EventMember(pub event_member::Model);

#[Object]
impl EventMember {
    async fn id(&self) -> Long {
        Long(self.0.id)
    }

    async fn member(&self, ctx: &Context<'_>) -> Result<Option<Member>> {
        member_by_id(ctx, Some(self.0.member_id)).await
    }

    async fn event(&self, ctx: &Context<'_>) -> Result<Option<Event>> {
        let found = event::Entity::find_by_id(self.0.event_id)
            .one(db(ctx)?)
            .await
            .map_err(db_error)?;
        Ok(found.map(Event))
    }

    async fn created_on(&self) -> LocalDateTime {
        LocalDateTime(self.0.created_on)
    }
}

pub struct Track(pub track::Model);

#[Object]
impl Track {
    async fn id(&self) -> Long {
        Long(self.0.id)
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    /// Lap length in meters.
    async fn distance(&self) -> i32 {
        self.0.distance
    }

    /// Best known lap time in milliseconds.
    async fn lap_record(&self) -> i32 {
        self.0.lap_record
    }

    async fn website(&self) -> Option<&str> {
        self.0.website.as_deref()
    }

    async fn latitude(&self) -> Option<f64> {
        self.0.latitude
    }

    async fn longitude(&self) -> Option<f64> {
        self.0.longitude
    }

    async fn events(&self, ctx: &Context<'_>) -> Result<Vec<Event>> {
        let rows = event::Entity::find()
            .filter(event::Column::TrackId.eq(self.0.id))
            .order_by_asc(event::Column::StartDate)
            .all(db(ctx)?)
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(Event).collect())
    }

    async fn lap_records(&self, ctx: &Context<'_>) -> Result<Vec<LapRecord>> {
        let rows = lap_record::Entity::find()
            .filter(lap_record::Column::TrackId.eq(self.0.id))
            .order_by_asc(lap_record::Column::LapTime)
            .all(db(ctx)?)
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(LapRecord).collect())
    }
}

pub struct LapRecord(pub lap_record::Model);

#[Object]
impl LapRecord {
    async fn id(&self) -> Long {
        Long(self.0.id)
    }

    async fn track(&self, ctx: &Context<'_>) -> Result<Option<Track>> {
        let found = track::Entity::find_by_id(self.0.track_id)
            .one(db(ctx)?)
            .await
            .map_err(db_error)?;
        Ok(found.map(Track))
    }

    async fn member(&self, ctx: &Context<'_>) -> Result<Option<Member>> {
        member_by_id(ctx, Some(self.0.member_id)).await
    }

    /// Lap time in milliseconds.
    async fn lap_time(&self) -> i32 {
        self.0.lap_time
    }

    async fn record_date(&self) -> LocalDateTime {
        LocalDateTime(self.0.record_date)
    }

    async fn conditions(&self) -> &str {
        &self.0.conditions
    }

    async fn comments(&self) -> Option<&str> {
        self.0.comments.as_deref()
    }

    async fn created_on(&self) -> LocalDateTime {
        LocalDateTime(self.0.created_on)
    }

    async fn modified_on(&self) -> Option<LocalDateTime> {
        local(self.0.modified_on)
    }
}

pub struct News(pub news::Model);

#[Object]
impl News {
    async fn id(&self) -> Long {
        Long(self.0.id)
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn catch_line(&self) -> Option<&str> {
        self.0.catch_line.as_deref()
    }

    async fn content(&self) -> Option<&str> {
        self.0.content.as_deref()
    }

    async fn news_date(&self) -> LocalDateTime {
        LocalDateTime(self.0.news_date)
    }

    async fn liked_news(&self, ctx: &Context<'_>) -> Result<Vec<LikedNews>> {
        let rows = liked_news::Entity::find()
            .filter(liked_news::Column::NewsId.eq(self.0.id))
            .order_by_asc(liked_news::Column::Id)
            .all(db(ctx)?)
            .await
            .map_err(db_error)?;
        Ok(rows.into_iter().map(LikedNews).collect())
    }

    async fn created_on(&self) -> LocalDateTime {
        LocalDateTime(self.0.created_on)
    }

    async fn created_by(&self, ctx: &Context<'_>) -> Result<Option<Member>> {
        member_by_id(ctx, self.0.created_by).await
    }

    async fn modified_on(&self) -> Option<LocalDateTime> {
        local(self.0.modified_on)
    }

    async fn modified_by(&self, ctx: &Context<'_>) -> Result<Option<Member>> {
        member_by_id(ctx, self.0.modified_by).await
    }
}

pub struct LikedNews(pub liked_news::Model);

#[Object]
impl LikedNews {
    async fn id(&self) -> Long {
        Long(self.0.id)
    }

    async fn member(&self, ctx: &Context<'_>) -> Result<Option<Member>> {
        member_by_id(ctx, Some(self.0.member_id)).await
    }

    async fn news(&self, ctx: &Context<'_>) -> Result<Option<News>> {
        let found = news::Entity::find_by_id(self.0.news_id)
            .one(db(ctx)?)
            .await
            .map_err(db_error)?;
        Ok(found.map(News))
    }

    async fn created_on(&self) -> LocalDateTime {
        LocalDateTime(self.0.created_on)
    }
}

/// One page of news. `pageNumber` is 0-based.
pub struct NewsPage(pub NewsPageModel);

#[Object]
impl NewsPage {
    async fn content(&self) -> Vec<News> {
        self.0.content.iter().cloned().map(News).collect()
    }

    async fn total_elements(&self) -> Long {
        Long(i64::try_from(self.0.total_elements).unwrap_or(i64::MAX))
    }

    async fn total_pages(&self) -> Long {
        Long(i64::try_from(self.0.total_pages).unwrap_or(i64::MAX))
    }

    async fn page_number(&self) -> Long {
        Long(i64::try_from(self.0.page_number).unwrap_or(i64::MAX))
    }

    async fn page_size(&self) -> Long {
        Long(i64::try_from(self.0.page_size).unwrap_or(i64::MAX))
    }
}

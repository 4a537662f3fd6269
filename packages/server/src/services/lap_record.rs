use chrono::NaiveDateTime;
use sea_orm::*;
use tracing::instrument;

use super::member::find_member;
use super::track::find_track;
use crate::entity::lap_record;
use crate::error::ServiceError;
use crate::utils::datetime;

#[derive(Debug, Clone)]
pub struct LapRecordInput {
    pub track_id: i64,
    pub record_date: NaiveDateTime,
    pub lap_time: i32,
    pub conditions: String,
    pub comments: Option<String>,
}

pub async fn find_lap_record<C: ConnectionTrait>(
    db: &C,
    id: i64,
) -> Result<lap_record::Model, ServiceError> {
    lap_record::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::LapRecordNotFound)
}

#[instrument(skip(db))]
pub async fn get_all_lap_records<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<lap_record::Model>, ServiceError> {
    Ok(lap_record::Entity::find()
        .order_by_asc(lap_record::Column::TrackId)
        .order_by_asc(lap_record::Column::LapTime)
        .all(db)
        .await?)
}

#[instrument(skip(db))]
pub async fn get_lap_record_by_id<C: ConnectionTrait>(
    db: &C,
    id: i64,
) -> Result<lap_record::Model, ServiceError> {
    find_lap_record(db, id).await
}

/// Fastest first.
#[instrument(skip(db))]
pub async fn get_member_lap_records<C: ConnectionTrait>(
    db: &C,
    member_id: i64,
) -> Result<Vec<lap_record::Model>, ServiceError> {
    Ok(lap_record::Entity::find()
        .filter(lap_record::Column::MemberId.eq(member_id))
        .order_by_asc(lap_record::Column::LapTime)
        .all(db)
        .await?)
}

/// Fastest first.
#[instrument(skip(db))]
pub async fn get_track_lap_records<C: ConnectionTrait>(
    db: &C,
    track_id: i64,
) -> Result<Vec<lap_record::Model>, ServiceError> {
    Ok(lap_record::Entity::find()
        .filter(lap_record::Column::TrackId.eq(track_id))
        .order_by_asc(lap_record::Column::LapTime)
        .all(db)
        .await?)
}

#[instrument(skip(db, input))]
pub async fn create_lap_record<C: ConnectionTrait>(
    db: &C,
    member_id: i64,
    input: LapRecordInput,
) -> Result<lap_record::Model, ServiceError> {
    find_member(db, member_id).await?;
    find_track(db, input.track_id).await?;

    let model = lap_record::ActiveModel {
        track_id: Set(input.track_id),
        member_id: Set(member_id),
        lap_time: Set(input.lap_time),
        record_date: Set(input.record_date),
        conditions: Set(input.conditions),
        comments: Set(input.comments),
        created_on: Set(datetime::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(model)
}

#[instrument(skip(db, input))]
pub async fn update_lap_record<C: ConnectionTrait>(
    db: &C,
    id: i64,
    input: LapRecordInput,
) -> Result<lap_record::Model, ServiceError> {
    let existing = find_lap_record(db, id).await?;
    find_track(db, input.track_id).await?;

    let mut active: lap_record::ActiveModel = existing.into();
    active.track_id = Set(input.track_id);
    active.lap_time = Set(input.lap_time);
    active.record_date = Set(input.record_date);
    active.conditions = Set(input.conditions);
    active.comments = Set(input.comments);
    active.modified_on = Set(Some(datetime::now()));

    Ok(active.update(db).await?)
}

#[instrument(skip(db))]
pub async fn delete_lap_record<C: ConnectionTrait>(
    db: &C,
    id: i64,
) -> Result<lap_record::Model, ServiceError> {
    let model = find_lap_record(db, id).await?;
    lap_record::Entity::delete_by_id(id).exec(db).await?;
    Ok(model)
}

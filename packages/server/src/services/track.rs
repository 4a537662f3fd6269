use sea_orm::prelude::Expr;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{event, lap_record, track};
use crate::error::ServiceError;

#[derive(Debug, Clone)]
pub struct TrackInput {
    pub name: String,
    pub distance: i32,
    pub lap_record: i32,
    pub website: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

pub async fn find_track<C: ConnectionTrait>(db: &C, id: i64) -> Result<track::Model, ServiceError> {
    track::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::TrackNotFound)
}

#[instrument(skip(db))]
pub async fn get_all_tracks<C: ConnectionTrait>(db: &C) -> Result<Vec<track::Model>, ServiceError> {
    Ok(track::Entity::find()
        .order_by_asc(track::Column::Name)
        .all(db)
        .await?)
}

#[instrument(skip(db))]
pub async fn get_track_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<track::Model, ServiceError> {
    find_track(db, id).await
}

#[instrument(skip(db, input), fields(name = %input.name))]
pub async fn create_track<C: ConnectionTrait>(
    db: &C,
    input: TrackInput,
) -> Result<track::Model, ServiceError> {
    let model = track::ActiveModel {
        name: Set(input.name),
        distance: Set(input.distance),
        lap_record: Set(input.lap_record),
        website: Set(input.website),
        latitude: Set(input.latitude),
        longitude: Set(input.longitude),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(model)
}

#[instrument(skip(db, input), fields(name = %input.name))]
pub async fn update_track<C: ConnectionTrait>(
    db: &C,
    id: i64,
    input: TrackInput,
) -> Result<track::Model, ServiceError> {
    let existing = find_track(db, id).await?;

    let mut active: track::ActiveModel = existing.into();
    active.name = Set(input.name);
    active.distance = Set(input.distance);
    active.lap_record = Set(input.lap_record);
    active.website = Set(input.website);
    active.latitude = Set(input.latitude);
    active.longitude = Set(input.longitude);

    Ok(active.update(db).await?)
}

/// Delete a track with its lap records. Events held there keep existing
/// without a track.
#[instrument(skip(db))]
pub async fn delete_track(db: &DatabaseConnection, id: i64) -> Result<track::Model, ServiceError> {
    let txn = db.begin().await?;

    let model = find_track(&txn, id).await?;
    lap_record::Entity::delete_many()
        .filter(lap_record::Column::TrackId.eq(id))
        .exec(&txn)
        .await?;
    event::Entity::update_many()
        .col_expr(event::Column::TrackId, Expr::value(Option::<i64>::None))
        .filter(event::Column::TrackId.eq(id))
        .exec(&txn)
        .await?;
    track::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(model)
}

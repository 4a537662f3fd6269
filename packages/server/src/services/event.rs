use chrono::NaiveDateTime;
use sea_orm::*;
use tracing::instrument;

use super::is_unique_violation;
use super::member::find_member;
use super::track::find_track;
use crate::entity::{event, event_member};
use crate::error::ServiceError;
use crate::models::shared::{contains_ignore_case, non_blank};
use crate::utils::datetime;

/// Settable event fields, overwritten as a whole on update.
#[derive(Debug, Clone)]
pub struct EventInput {
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub track_id: i64,
    pub organizer: Option<String>,
    pub price: Option<f64>,
}

pub async fn find_event<C: ConnectionTrait>(db: &C, id: i64) -> Result<event::Model, ServiceError> {
    event::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::EventNotFound)
}

async fn events_starting_between<C: ConnectionTrait>(
    db: &C,
    range: Option<(NaiveDateTime, NaiveDateTime)>,
) -> Result<Vec<event::Model>, ServiceError> {
    let Some((from, to)) = range else {
        return Ok(Vec::new());
    };
    Ok(event::Entity::find()
        .filter(event::Column::StartDate.gte(from))
        .filter(event::Column::StartDate.lt(to))
        .order_by_asc(event::Column::StartDate)
        .all(db)
        .await?)
}

#[instrument(skip(db))]
pub async fn get_all_events<C: ConnectionTrait>(db: &C) -> Result<Vec<event::Model>, ServiceError> {
    Ok(event::Entity::find()
        .order_by_asc(event::Column::StartDate)
        .all(db)
        .await?)
}

/// Events starting in `year`. A year outside the calendar yields nothing.
#[instrument(skip(db))]
pub async fn get_events_by_year<C: ConnectionTrait>(
    db: &C,
    year: i32,
) -> Result<Vec<event::Model>, ServiceError> {
    events_starting_between(db, datetime::year_range(year)).await
}

#[instrument(skip(db))]
pub async fn get_events_by_month_and_year<C: ConnectionTrait>(
    db: &C,
    month: i32,
    year: i32,
) -> Result<Vec<event::Model>, ServiceError> {
    let range = u32::try_from(month)
        .ok()
        .and_then(|month| datetime::month_range(month, year));
    events_starting_between(db, range).await
}

#[instrument(skip(db))]
pub async fn get_events_by_day_and_month_and_year<C: ConnectionTrait>(
    db: &C,
    day: i32,
    month: i32,
    year: i32,
) -> Result<Vec<event::Model>, ServiceError> {
    let range = match (u32::try_from(day), u32::try_from(month)) {
        (Ok(day), Ok(month)) => datetime::day_range(day, month, year),
        _ => None,
    };
    events_starting_between(db, range).await
}

#[instrument(skip(db))]
pub async fn get_event_by_id<C: ConnectionTrait>(db: &C, id: i64) -> Result<event::Model, ServiceError> {
    find_event(db, id).await
}

/// Substring match on the title. No title returns every event.
#[instrument(skip(db))]
pub async fn get_events_by_title<C: ConnectionTrait>(
    db: &C,
    title: Option<&str>,
) -> Result<Vec<event::Model>, ServiceError> {
    let mut select = event::Entity::find();
    if let Some(title) = non_blank(title) {
        select = select.filter(contains_ignore_case(event::Column::Title, title));
    }
    Ok(select.order_by_asc(event::Column::StartDate).all(db).await?)
}

fn check_dates(input: &EventInput) -> Result<(), ServiceError> {
    if input.end_date < input.start_date {
        return Err(ServiceError::EventEndBeforeStart);
    }
    Ok(())
}

#[instrument(skip(db, input), fields(title = %input.title))]
pub async fn create_event<C: ConnectionTrait>(
    db: &C,
    input: EventInput,
    member_id: i64,
) -> Result<event::Model, ServiceError> {
    check_dates(&input)?;
    find_track(db, input.track_id).await?;
    find_member(db, member_id).await?;

    let model = event::ActiveModel {
        title: Set(input.title),
        description: Set(input.description),
        start_date: Set(input.start_date),
        end_date: Set(input.end_date),
        track_id: Set(Some(input.track_id)),
        organizer: Set(input.organizer),
        price: Set(input.price),
        created_on: Set(datetime::now()),
        created_by: Set(Some(member_id)),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(model)
}

#[instrument(skip(db, input), fields(title = %input.title))]
pub async fn update_event<C: ConnectionTrait>(
    db: &C,
    id: i64,
    input: EventInput,
    member_id: i64,
) -> Result<event::Model, ServiceError> {
    let existing = find_event(db, id).await?;
    check_dates(&input)?;
    find_track(db, input.track_id).await?;
    find_member(db, member_id).await?;

    let mut active: event::ActiveModel = existing.into();
    active.title = Set(input.title);
    active.description = Set(input.description);
    active.start_date = Set(input.start_date);
    active.end_date = Set(input.end_date);
    active.track_id = Set(Some(input.track_id));
    active.organizer = Set(input.organizer);
    active.price = Set(input.price);
    active.modified_on = Set(Some(datetime::now()));
    active.modified_by = Set(Some(member_id));

    Ok(active.update(db).await?)
}

/// Delete an event and its participations.
#[instrument(skip(db))]
pub async fn delete_event(db: &DatabaseConnection, id: i64) -> Result<event::Model, ServiceError> {
    let txn = db.begin().await?;

    let model = find_event(&txn, id).await?;
    event_member::Entity::delete_many()
        .filter(event_member::Column::EventId.eq(id))
        .exec(&txn)
        .await?;
    event::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(model)
}

async fn find_participation<C: ConnectionTrait>(
    db: &C,
    event_id: i64,
    member_id: i64,
) -> Result<Option<event_member::Model>, DbErr> {
    event_member::Entity::find()
        .filter(event_member::Column::EventId.eq(event_id))
        .filter(event_member::Column::MemberId.eq(member_id))
        .one(db)
        .await
}

#[instrument(skip(db))]
pub async fn add_event_participant<C: ConnectionTrait>(
    db: &C,
    event_id: i64,
    member_id: i64,
) -> Result<event::Model, ServiceError> {
    find_event(db, event_id).await?;
    find_member(db, member_id).await?;
    if find_participation(db, event_id, member_id).await?.is_some() {
        return Err(ServiceError::MemberAlreadyParticipant);
    }

    event_member::ActiveModel {
        member_id: Set(member_id),
        event_id: Set(event_id),
        created_on: Set(datetime::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ServiceError::MemberAlreadyParticipant
        } else {
            ServiceError::from(e)
        }
    })?;

    find_event(db, event_id).await
}

#[instrument(skip(db))]
pub async fn remove_event_participant<C: ConnectionTrait>(
    db: &C,
    event_id: i64,
    member_id: i64,
) -> Result<event::Model, ServiceError> {
    find_event(db, event_id).await?;
    find_member(db, member_id).await?;

    let result = event_member::Entity::delete_many()
        .filter(event_member::Column::EventId.eq(event_id))
        .filter(event_member::Column::MemberId.eq(member_id))
        .exec(db)
        .await?;
    if result.rows_affected == 0 {
        return Err(ServiceError::MemberNotParticipant);
    }

    find_event(db, event_id).await
}

use async_graphql::{Context, Object, Result, ResultExt};
use sea_orm::DatabaseConnection;
use tracing::info;

use super::guard::RoleGuard;
use super::parse_date;
use super::scalars::Long;
use super::types::Event;
use crate::entity::role::Role;
use crate::services::event::{self as service, EventInput};

#[derive(Default)]
pub struct EventQuery;

#[Object]
impl EventQuery {
    #[graphql(guard = "RoleGuard::new(Role::Member)")]
    async fn get_all_events(&self, ctx: &Context<'_>) -> Result<Vec<Event>> {
        info!("Received call to getAllEvents");
        let db = ctx.data::<DatabaseConnection>()?;
        let events = service::get_all_events(db).await.extend()?;
        Ok(events.into_iter().map(Event).collect())
    }

    #[graphql(guard = "RoleGuard::new(Role::Member)")]
    async fn get_events_by_year(&self, ctx: &Context<'_>, year: i32) -> Result<Vec<Event>> {
        info!(year, "Received call to getEventsByYear");
        let db = ctx.data::<DatabaseConnection>()?;
        let events = service::get_events_by_year(db, year).await.extend()?;
        Ok(events.into_iter().map(Event).collect())
    }

    #[graphql(guard = "RoleGuard::new(Role::Member)")]
    async fn get_events_by_month_and_year(
        &self,
        ctx: &Context<'_>,
        month: i32,
        year: i32,
    ) -> Result<Vec<Event>> {
        info!(month, year, "Received call to getEventsByMonthAndYear");
        let db = ctx.data::<DatabaseConnection>()?;
        let events = service::get_events_by_month_and_year(db, month, year)
            .await
            .extend()?;
        Ok(events.into_iter().map(Event).collect())
    }

    #[graphql(guard = "RoleGuard::new(Role::Member)")]
    async fn get_events_by_day_and_month_and_year(
        &self,
        ctx: &Context<'_>,
        day: i32,
        month: i32,
        year: i32,
    ) -> Result<Vec<Event>> {
        info!(day, month, year, "Received call to getEventsByDayAndMonthAndYear");
        let db = ctx.data::<DatabaseConnection>()?;
        let events = service::get_events_by_day_and_month_and_year(db, day, month, year)
            .await
            .extend()?;
        Ok(events.into_iter().map(Event).collect())
    }

    #[graphql(guard = "RoleGuard::new(Role::Member)")]
    async fn get_event_by_id(&self, ctx: &Context<'_>, id: Long) -> Result<Event> {
        info!(id = id.0, "Received call to getEventById");
        let db = ctx.data::<DatabaseConnection>()?;
        Ok(Event(service::get_event_by_id(db, id.0).await.extend()?))
    }

    #[graphql(guard = "RoleGuard::new(Role::Member)")]
    async fn get_events_by_title(
        &self,
        ctx: &Context<'_>,
        title: Option<String>,
    ) -> Result<Vec<Event>> {
        info!(?title, "Received call to getEventsByTitle");
        let db = ctx.data::<DatabaseConnection>()?;
        let events = service::get_events_by_title(db, title.as_deref())
            .await
            .extend()?;
        Ok(events.into_iter().map(Event).collect())
    }
}

#[derive(Default)]
pub struct EventMutation;

fn event_input(
    title: String,
    description: Option<String>,
    start_date: &str,
    end_date: &str,
    track_id: Long,
    organizer: Option<String>,
    price: Option<f64>,
) -> Result<EventInput> {
    Ok(EventInput {
        title,
        description,
        start_date: parse_date(start_date)?,
        end_date: parse_date(end_date)?,
        track_id: track_id.0,
        organizer,
        price,
    })
}

#[Object]
impl EventMutation {
    #[graphql(guard = "RoleGuard::new(Role::Admin)")]
    async fn create_event(
        &self,
        ctx: &Context<'_>,
        title: String,
        description: Option<String>,
        start_date: String,
        end_date: String,
        track_id: Long,
        organizer: Option<String>,
        price: Option<f64>,
        member_id: Long,
    ) -> Result<Event> {
        info!(%title, %start_date, %end_date, track_id = track_id.0, member_id = member_id.0, "Received call to createEvent");
        let db = ctx.data::<DatabaseConnection>()?;
        let input = event_input(
            title,
            description,
            &start_date,
            &end_date,
            track_id,
            organizer,
            price,
        )?;
        Ok(Event(
            service::create_event(db, input, member_id.0).await.extend()?,
        ))
    }

    #[graphql(guard = "RoleGuard::new(Role::Admin)")]
    async fn update_event(
        &self,
        ctx: &Context<'_>,
        event_id: Long,
        title: String,
        description: Option<String>,
        start_date: String,
        end_date: String,
        track_id: Long,
        organizer: Option<String>,
        price: Option<f64>,
        member_id: Long,
    ) -> Result<Event> {
        info!(event_id = event_id.0, %title, member_id = member_id.0, "Received call to updateEvent");
        let db = ctx.data::<DatabaseConnection>()?;
        let input = event_input(
            title,
            description,
            &start_date,
            &end_date,
            track_id,
            organizer,
            price,
        )?;
        Ok(Event(
            service::update_event(db, event_id.0, input, member_id.0)
                .await
                .extend()?,
        ))
    }

    #[graphql(guard = "RoleGuard::new(Role::Admin)")]
    async fn delete_event(&self, ctx: &Context<'_>, event_id: Long) -> Result<Event> {
        info!(event_id = event_id.0, "Received call to deleteEvent");
        let db = ctx.data::<DatabaseConnection>()?;
        Ok(Event(service::delete_event(db, event_id.0).await.extend()?))
    }

    #[graphql(guard = "RoleGuard::new(Role::Member)")]
    async fn add_event_participant(
        &self,
        ctx: &Context<'_>,
        event_id: Long,
        member_id: Long,
    ) -> Result<Event> {
        info!(event_id = event_id.0, member_id = member_id.0, "Received call to addEventParticipant");
        let db = ctx.data::<DatabaseConnection>()?;
        Ok(Event(
            service::add_event_participant(db, event_id.0, member_id.0)
                .await
                .extend()?,
        ))
    }

    #[graphql(guard = "RoleGuard::new(Role::Member)")]
    async fn remove_event_participant(
        &self,
        ctx: &Context<'_>,
        event_id: Long,
        member_id: Long,
    ) -> Result<Event> {
        info!(event_id = event_id.0, member_id = member_id.0, "Received call to removeEventParticipant");
        let db = ctx.data::<DatabaseConnection>()?;
        Ok(Event(
            service::remove_event_participant(db, event_id.0, member_id.0)
                .await
                .extend()?,
        ))
    }
}

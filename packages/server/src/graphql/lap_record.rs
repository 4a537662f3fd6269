use async_graphql::{Context, Object, Result, ResultExt};
use sea_orm::DatabaseConnection;
use tracing::info;

use super::guard::RoleGuard;
use super::parse_date;
use super::scalars::Long;
use super::types::LapRecord;
use crate::entity::role::Role;
use crate::services::lap_record::{self as service, LapRecordInput};

#[derive(Default)]
pub struct LapRecordQuery;

#[Object]
impl LapRecordQuery {
    #[graphql(guard = "RoleGuard::new(Role::Member)")]
    async fn get_all_lap_records(&self, ctx: &Context<'_>) -> Result<Vec<LapRecord>> {
        info!("Received call to getAllLapRecords");
        let db = ctx.data::<DatabaseConnection>()?;
        let records = service::get_all_lap_records(db).await.extend()?;
        Ok(records.into_iter().map(LapRecord).collect())
    }

    #[graphql(guard = "RoleGuard::new(Role::Member)")]
    async fn get_lap_record_by_id(&self, ctx: &Context<'_>, id: Long) -> Result<LapRecord> {
        info!(id = id.0, "Received call to getLapRecordById");
        let db = ctx.data::<DatabaseConnection>()?;
        Ok(LapRecord(
            service::get_lap_record_by_id(db, id.0).await.extend()?,
        ))
    }

    /// Fastest first.
    #[graphql(guard = "RoleGuard::new(Role::Member)")]
    async fn get_member_lap_records(
        &self,
        ctx: &Context<'_>,
        member_id: Long,
    ) -> Result<Vec<LapRecord>> {
        info!(member_id = member_id.0, "Received call to getMemberLapRecords");
        let db = ctx.data::<DatabaseConnection>()?;
        let records = service::get_member_lap_records(db, member_id.0)
            .await
            .extend()?;
        Ok(records.into_iter().map(LapRecord).collect())
    }

    /// Fastest first.
    #[graphql(guard = "RoleGuard::new(Role::Member)")]
    async fn get_track_lap_records(
        &self,
        ctx: &Context<'_>,
        track_id: Long,
    ) -> Result<Vec<LapRecord>> {
        info!(track_id = track_id.0, "Received call to getTrackLapRecords");
        let db = ctx.data::<DatabaseConnection>()?;
        let records = service::get_track_lap_records(db, track_id.0)
            .await
            .extend()?;
        Ok(records.into_iter().map(LapRecord).collect())
    }
}

#[derive(Default)]
pub struct LapRecordMutation;

#[Object]
impl LapRecordMutation {
    #[graphql(guard = "RoleGuard::new(Role::Admin)")]
    async fn create_lap_record(
        &self,
        ctx: &Context<'_>,
        member_id: Long,
        track_id: Long,
        record_date: String,
        lap_time: i32,
        conditions: String,
        comments: Option<String>,
    ) -> Result<LapRecord> {
        info!(member_id = member_id.0, track_id = track_id.0, lap_time, "Received call to createLapRecord");
        let db = ctx.data::<DatabaseConnection>()?;
        let input = LapRecordInput {
            track_id: track_id.0,
            record_date: parse_date(&record_date)?,
            lap_time,
            conditions,
            comments,
        };
        Ok(LapRecord(
            service::create_lap_record(db, member_id.0, input)
                .await
                .extend()?,
        ))
    }

    #[graphql(guard = "RoleGuard::new(Role::Admin)")]
    async fn update_lap_record(
        &self,
        ctx: &Context<'_>,
        lap_record_id: Long,
        track_id: Long,
        record_date: String,
        lap_time: i32,
        conditions: String,
        comments: Option<String>,
    ) -> Result<LapRecord> {
        info!(lap_record_id = lap_record_id.0, track_id = track_id.0, lap_time, "Received call to updateLapRecord");
        let db = ctx.data::<DatabaseConnection>()?;
        let input = LapRecordInput {
            track_id: track_id.0,
            record_date: parse_date(&record_date)?,
            lap_time,
            conditions,
            comments,
        };
        Ok(LapRecord(
            service::update_lap_record(db, lap_record_id.0, input)
                .await
                .extend()?,
        ))
    }

    #[graphql(guard = "RoleGuard::new(Role::Admin)")]
    async fn delete_lap_record(&self, ctx: &Context<'_>, lap_record_id: Long) -> Result<LapRecord> {
        info!(lap_record_id = lap_record_id.0, "Received call to deleteLapRecord");
        let db = ctx.data::<DatabaseConnection>()?;
        Ok(LapRecord(
            service::delete_lap_record(db, lap_record_id.0)
                .await
                .extend()?,
        ))
    }
}

use async_graphql::{Context, Object, Result, ResultExt};
use sea_orm::DatabaseConnection;
use tracing::info;

use super::guard::RoleGuard;
use super::scalars::Long;
use super::types::Track;
use crate::entity::role::Role;
use crate::services::track::{self as service, TrackInput};

#[derive(Default)]
pub struct TrackQuery;

#[Object]
impl TrackQuery {
    #[graphql(guard = "RoleGuard::new(Role::Member)")]
    async fn get_all_tracks(&self, ctx: &Context<'_>) -> Result<Vec<Track>> {
        info!("Received call to getAllTracks");
        let db = ctx.data::<DatabaseConnection>()?;
        let tracks = service::get_all_tracks(db).await.extend()?;
        Ok(tracks.into_iter().map(Track).collect())
    }

    #[graphql(guard = "RoleGuard::new(Role::Member)")]
    async fn get_track_by_id(&self, ctx: &Context<'_>, id: Long) -> Result<Track> {
        info!(id = id.0, "Received call to getTrackById");
        let db = ctx.data::<DatabaseConnection>()?;
        Ok(Track(service::get_track_by_id(db, id.0).await.extend()?))
    }
}

#[derive(Default)]
pub struct TrackMutation;

#[Object]
impl TrackMutation {
    #[graphql(guard = "RoleGuard::new(Role::Admin)")]
    async fn create_track(
        &self,
        ctx: &Context<'_>,
        name: String,
        distance: i32,
        lap_record: i32,
        website: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Track> {
        info!(%name, distance, lap_record, "Received call to createTrack");
        let db = ctx.data::<DatabaseConnection>()?;
        let input = TrackInput {
            name,
            distance,
            lap_record,
            website,
            latitude,
            longitude,
        };
        Ok(Track(service::create_track(db, input).await.extend()?))
    }

    #[graphql(guard = "RoleGuard::new(Role::Admin)")]
    async fn update_track(
        &self,
        ctx: &Context<'_>,
        track_id: Long,
        name: String,
        distance: i32,
        lap_record: i32,
        website: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Track> {
        info!(track_id = track_id.0, %name, "Received call to updateTrack");
        let db = ctx.data::<DatabaseConnection>()?;
        let input = TrackInput {
            name,
            distance,
            lap_record,
            website,
            latitude,
            longitude,
        };
        Ok(Track(
            service::update_track(db, track_id.0, input)
                .await
                .extend()?,
        ))
    }

    /// Removes the track's lap records and detaches its events.
    #[graphql(guard = "RoleGuard::new(Role::Admin)")]
    async fn delete_track(&self, ctx: &Context<'_>, track_id: Long) -> Result<Track> {
        info!(track_id = track_id.0, "Received call to deleteTrack");
        let db = ctx.data::<DatabaseConnection>()?;
        Ok(Track(service::delete_track(db, track_id.0).await.extend()?))
    }
}

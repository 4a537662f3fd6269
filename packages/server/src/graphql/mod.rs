//! GraphQL schema.
//!
//! Every root field carries a [`guard::RoleGuard`] and delegates to one
//! service function. Service failures surface as errors with an
//! `errorCode` extension.

pub mod error;
pub mod event;
pub mod guard;
pub mod lap_record;
pub mod member;
pub mod news;
pub mod scalars;
pub mod track;
pub mod types;

use async_graphql::{EmptySubscription, MergedObject, Result, Schema};
use chrono::NaiveDateTime;
use sea_orm::DatabaseConnection;

use crate::utils::datetime;

#[derive(MergedObject, Default)]
pub struct QueryRoot(
    event::EventQuery,
    member::MemberQuery,
    news::NewsQuery,
    track::TrackQuery,
    lap_record::LapRecordQuery,
);

#[derive(MergedObject, Default)]
pub struct MutationRoot(
    event::EventMutation,
    member::MemberMutation,
    news::NewsMutation,
    track::TrackMutation,
    lap_record::LapRecordMutation,
);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(db: DatabaseConnection) -> AppSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(db)
    .finish()
}

/// Parse an ISO date argument, failing with `invalid_date`.
pub(crate) fn parse_date(input: &str) -> Result<NaiveDateTime> {
    datetime::parse(input).ok_or_else(|| error::invalid_date(input))
}

//! Business operations shared by the GraphQL and REST layers.
//!
//! Read helpers are generic over [`sea_orm::ConnectionTrait`] so they run
//! inside or outside a transaction; multi-row writes open their own
//! transaction on the pool.

pub mod account;
pub mod event;
pub mod lap_record;
pub mod member;
pub mod news;
pub mod track;

use sea_orm::{DbErr, SqlErr};

pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

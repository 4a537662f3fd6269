pub mod account;
pub mod auth;
pub mod graphql;
pub mod health;
pub mod upload;
pub mod web;

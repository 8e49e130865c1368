//! # stockroom-entity
//!
//! Domain entity models for Stockroom. Every struct in this crate represents
//! a database table row or the data needed to create one. Row types derive
//! `sqlx::FromRow`.

pub mod user;

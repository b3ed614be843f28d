//! # shiftdesk-entity
//!
//! Domain entity models for the ShiftDesk back office. Every struct in this
//! crate represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow`.

pub mod token;
pub mod user;

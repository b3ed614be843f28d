//! Background maintenance tasks for ShiftDesk.
//!
//! This crate provides the refresh-token sweeper: a cancellable periodic
//! task that purges expired and revoked refresh-token records.

pub mod sweeper;

pub use sweeper::TokenSweeper;

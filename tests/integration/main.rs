//! End-to-end tests against the full router, backed by the in-memory
//! directory and refresh-token store.

mod helpers;

mod admin_test;
mod auth_test;
mod session_test;

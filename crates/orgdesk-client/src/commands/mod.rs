//! Form-submission command handlers.
//!
//! Each sub-module groups the commands of one screen.  Every handler takes
//! the [`AppState`](crate::state::AppState) by `&mut` plus the host's
//! already-validated field values, returns a [`ClientResult`](crate::error::ClientResult)
//! and queues the matching notification either way.

pub mod accounts;
pub mod auth;
pub mod departments;
pub mod employees;
pub mod profile;
pub mod requests;

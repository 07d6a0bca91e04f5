//! Voidwear Admin library.
//!
//! Back-office functionality as a library so it can be tested.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod session;
pub mod state;

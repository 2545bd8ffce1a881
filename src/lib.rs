//! Headline: a news feed with category browsing, free-text search, and an
//! advanced filter/sort pipeline over a simulated news service.

pub mod app;
pub mod auth;
pub mod config;
pub mod feed;
pub mod notify;
pub mod share;
pub mod storage;
pub mod ui;
pub mod util;

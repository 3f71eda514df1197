//! Persistent cache buckets (SQLite via sqlx).
//!
//! A `CacheStorage` holds named buckets in creation order; each
//! `CacheBucket` maps request URLs to stored responses. The worker only
//! opens, matches and populates buckets. Deleting one is a host decision.

pub mod types;
pub mod db;
mod add_all;
mod entries;

pub use types::*;
pub use db::*;

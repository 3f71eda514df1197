pub mod config;
pub mod logging;

pub mod cache_storage;
pub mod checksum;
pub mod http;
pub mod manifest;
pub mod worker;

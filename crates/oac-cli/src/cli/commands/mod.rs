//! CLI command handlers, one file per command.

mod buckets;
mod delete_bucket;
mod fetch;
mod install;
mod status;

pub use buckets::run_buckets;
pub use delete_bucket::run_delete_bucket;
pub use fetch::run_fetch;
#[cfg(test)]
pub(crate) use fetch::resolve_target;
pub use install::run_install;
pub use status::run_status;

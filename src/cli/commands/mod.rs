//! CLI command implementations

pub mod add;
pub mod cache;
pub mod config;
pub mod duplicate;
pub mod edit;
pub mod export;
pub mod fetch;
pub mod link;
pub mod list;
pub mod remove;
pub mod watch;

pub use add::execute as add;
pub use cache::execute as cache;
pub use config::execute as config;
pub use duplicate::execute as duplicate;
pub use edit::execute as edit;
pub use export::execute as export;
pub use fetch::execute as fetch;
pub use link::execute as link;
pub use list::execute as list;
pub use remove::execute as remove;
pub use watch::execute as watch;

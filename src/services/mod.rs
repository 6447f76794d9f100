// Service exports
pub mod api;
pub mod notify;

pub use api::{ApiError, FeedClient};
pub use notify::{Notice, NoticeLevel, Notifier};

pub mod body;
pub mod catalog;
pub mod listing;
pub mod schema;
pub mod views;

pub use crate::domain::model::{Post, PostDate, PostSummary};
pub use crate::domain::ports::{ConfigProvider, ContentSource};
pub use crate::utils::error::Result;

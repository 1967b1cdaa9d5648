pub mod assignments;
pub mod common;
pub mod courses;
pub mod documents;
pub mod notifications;
pub mod stats;
pub mod submissions;

pub use common::pagination::{PaginationInfo, PaginationQuery};

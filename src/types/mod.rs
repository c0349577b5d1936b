//! Shared types used across handlers.

mod pagination;
mod response;

pub use pagination::PaginationParams;
pub use response::{Created, MessageResponse};

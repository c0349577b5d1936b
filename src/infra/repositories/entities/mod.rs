//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod product;
pub mod pvz;
pub mod reception;
pub mod user;

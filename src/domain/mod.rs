//! Domain layer - Core business entities and logic.
//!
//! Entities and value objects for the pickup-point domain:
//! users, pickup points (PVZ), receptions, and products.

mod password;
mod product;
mod pvz;
mod reception;
mod user;

pub use password::Password;
pub use product::{Product, ProductResponse, ProductType};
pub use pvz::{City, Pvz, PvzResponse, PvzWithReceptions};
pub use reception::{Reception, ReceptionResponse, ReceptionStatus, ReceptionWithProducts};
pub use user::{User, UserResponse, UserRole};

//! HTTP request handlers.

pub mod auth_handler;
pub mod product_handler;
pub mod pvz_handler;
pub mod reception_handler;

pub use auth_handler::auth_routes;
pub use product_handler::product_routes;
pub use pvz_handler::pvz_routes;
pub use reception_handler::reception_routes;

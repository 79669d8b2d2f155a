pub mod common;
pub mod config;
pub mod services;
pub mod store;

pub use services::Services;
pub use store::Store;

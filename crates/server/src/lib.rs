pub mod config;
pub mod error;
pub mod registry;
pub mod server;
pub mod store;

pub use error::ServerError;
pub use server::{AppState, router, run, serve};

pub mod api;
pub mod error;
pub mod transport;

pub use api::Client;
pub use error::ClientError;
pub use transport::Transport;

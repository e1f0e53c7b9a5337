pub mod server;
pub(crate) mod transport;

pub use server::{DreamshotServer, SERVER_NAME};
pub use transport::{create_http_service, serve_stdio};

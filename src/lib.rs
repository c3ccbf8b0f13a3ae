pub mod config;
pub mod error;
pub mod models;
pub mod relay;
pub mod server;
pub mod translate;

pub use config::ProxyConfig;
pub use error::{ProxyError, Result};
pub use models::ModelTable;
pub use server::{build_router, AppState};

pub mod config;
pub mod error;
pub mod host;

pub use config::PlugctlConfig;
pub use error::{PlugctlError, Result};
pub use host::MessageEvent;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlugctlError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Reply delivery failed: {0}")]
    Reply(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlugctlError {
    /// Short error code string for logs and host-facing diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            PlugctlError::Config(_) => "CONFIG_ERROR",
            PlugctlError::Reply(_) => "REPLY_ERROR",
            PlugctlError::Io(_) => "IO_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, PlugctlError>;

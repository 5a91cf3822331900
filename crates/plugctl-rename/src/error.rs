use thiserror::Error;

/// Everything that can go wrong while renaming a plugin command.
///
/// Every variant is handled inside [`crate::handler`] and turned into exactly
/// one reply to the caller; none of them propagate past it.
#[derive(Debug, Error)]
pub enum RenameError {
    /// The invocation did not split into exactly four tokens.
    #[error("expected exactly four tokens: cmd <plugin> <old-command> <new-command>")]
    InvalidArguments,

    /// The replacement token contains characters outside `[A-Za-z0-9_]`.
    #[error("new command '{token}' may only contain letters, digits and underscores")]
    InvalidNewToken { token: String },

    /// The plugin directory has no entry file at the expected path.
    #[error("no entry file found for plugin '{plugin}'")]
    PluginNotFound { plugin: String },

    /// The pre-edit backup copy could not be created. Nothing was mutated.
    #[error("backup copy failed: {0}")]
    BackupFailed(String),

    /// The registration marker for the old command is absent from the file.
    #[error("command '{command}' not found in the plugin entry file")]
    CommandNotFound { command: String },

    /// The rewritten content could not be persisted. The file may be left
    /// partially written; recovery is manual via the backup.
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// The reload endpoint answered with a non-200 HTTP status.
    #[error("reload request failed with status {status}")]
    ReloadHttpError { status: u16 },

    /// The reload endpoint answered 200 but its status field was not "ok".
    #[error("reload reported an error: {message}")]
    ReloadStatusError { message: String },

    /// The reload call failed below the HTTP layer (connect, decode).
    #[error("reload transport failed: {0}")]
    ReloadTransportError(String),

    /// The marker pattern built from the old command did not compile. The
    /// old command is interpolated unescaped, so this is reachable.
    #[error("marker pattern failed to compile: {0}")]
    Pattern(String),

    /// Any other file I/O failure (notably reading the entry file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenameError {
    /// Short error code string for logs and diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            RenameError::InvalidArguments => "INVALID_ARGUMENTS",
            RenameError::InvalidNewToken { .. } => "INVALID_NEW_TOKEN",
            RenameError::PluginNotFound { .. } => "PLUGIN_NOT_FOUND",
            RenameError::BackupFailed(_) => "BACKUP_FAILED",
            RenameError::CommandNotFound { .. } => "COMMAND_NOT_FOUND",
            RenameError::WriteFailed(_) => "WRITE_FAILED",
            RenameError::ReloadHttpError { .. } => "RELOAD_HTTP_ERROR",
            RenameError::ReloadStatusError { .. } => "RELOAD_STATUS_ERROR",
            RenameError::ReloadTransportError(_) => "RELOAD_TRANSPORT_ERROR",
            RenameError::Pattern(_) => "PATTERN_ERROR",
            RenameError::Io(_) => "IO_ERROR",
        }
    }
}

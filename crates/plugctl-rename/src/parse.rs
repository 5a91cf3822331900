//! Invocation parsing — `cmd <plugin> <old-command> <new-command>`.
//!
//! Only the replacement token is validated. The old command passes through
//! untouched because it has to match whatever the plugin author registered,
//! including names this tool would never accept as new.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::RenameError;

/// Shown to the caller whenever the invocation shape is wrong.
pub const USAGE: &str = "Usage: cmd <plugin-name> <old-command> <new-command>";

/// A fully parsed rename invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRequest {
    /// Plugin directory name under the plugins root.
    pub plugin: String,
    /// Command token to be replaced. Not validated.
    pub old: String,
    /// Replacement token. Gated to `[A-Za-z0-9_]+`.
    pub new: String,
}

fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("static pattern compiles"))
}

/// Split the raw message into its four whitespace-delimited tokens.
///
/// The first token is the command trigger itself; it is counted but otherwise
/// ignored (the host already routed the message here based on it). Fails
/// without any side effect — no file or network I/O happens on this path.
pub fn parse_invocation(text: &str) -> Result<RenameRequest, RenameError> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() != 4 {
        return Err(RenameError::InvalidArguments);
    }

    let request = RenameRequest {
        plugin: parts[1].to_string(),
        old: parts[2].to_string(),
        new: parts[3].to_string(),
    };

    if !token_pattern().is_match(&request.new) {
        return Err(RenameError::InvalidNewToken {
            token: request.new,
        });
    }

    Ok(request)
}

//! Top-level rename handler — the strictly sequential driver.
//!
//! parse → validate → backup → locate/replace → persist → notify → report.
//! Runs for every `cmd` invocation the host routes here. Every failure kind
//! becomes exactly one reply to the caller; nothing propagates past this
//! module and nothing is rolled back automatically — recovery after a bad
//! write is manual, via the timestamped backup.

use tracing::{debug, info, warn};

use plugctl_core::{MessageEvent, PlugctlConfig};

use crate::error::RenameError;
use crate::parse::{self, USAGE};
use crate::reload;
use crate::rewrite;

/// Handle one `cmd <plugin> <old-command> <new-command>` invocation.
///
/// The only errors this returns are reply-delivery failures from the host;
/// everything that can go wrong with the rename itself is reported to the
/// caller as text.
pub async fn handle_rename<E: MessageEvent>(
    config: &PlugctlConfig,
    event: &E,
) -> plugctl_core::Result<()> {
    // 1. Admin gate. The host decides who is an admin; we only honor it.
    if !event.sender_is_admin() {
        return event
            .reply("This command requires administrator privileges.")
            .await;
    }

    let text = event.text();
    debug!(%text, "rename invocation received");

    // 2. Parse + validate. No file or network I/O has happened yet.
    let request = match parse::parse_invocation(text) {
        Ok(request) => request,
        Err(RenameError::InvalidNewToken { .. }) => {
            return event
                .reply("The new command may only contain letters, digits and underscores.")
                .await;
        }
        Err(_) => return event.reply(USAGE).await,
    };

    let target = rewrite::entry_path(&config.plugins, &request.plugin);

    // 3. Backup + rewrite.
    let outcome = match rewrite::rename_command(&config.plugins, &request) {
        Ok(outcome) => outcome,
        Err(RenameError::PluginNotFound { plugin }) => {
            return event
                .reply(&format!("No entry file found for plugin {plugin}."))
                .await;
        }
        Err(RenameError::BackupFailed(reason)) => {
            warn!(%reason, "backup failed, plugin left untouched");
            return event
                .reply(&format!("Could not back up the plugin file: {reason}"))
                .await;
        }
        Err(RenameError::CommandNotFound { command }) => {
            return event.reply(&format!("Command {command} not found.")).await;
        }
        Err(e) => {
            // Everything that can fail after the backup step lands here:
            // read, pattern compilation, write.
            warn!(error = %e, code = e.code(), "rename failed after backup");
            return event
                .reply(&format!(
                    "Error while renaming the command: {e}\nIf a backup exists, check {}.*.bak",
                    target.display()
                ))
                .await;
        }
    };

    info!(
        plugin = %request.plugin,
        old = %request.old,
        new = %request.new,
        replaced = outcome.replaced,
        backup = %outcome.backup.display(),
        "command renamed"
    );

    let backup_name = outcome
        .backup
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| outcome.backup.display().to_string());

    // 4. Best-effort reload. The edit already succeeded; the reply wording
    //    changes with the reload outcome but the rename is never undone.
    match reload::notify_reload(&config.reload, &request.plugin).await {
        Ok(()) => {
            event
                .reply(&format!(
                    "Renamed command {} to {} and reloaded plugin {}.\nOriginal file backed up as: {}",
                    request.old, request.new, request.plugin, backup_name
                ))
                .await
        }
        Err(RenameError::ReloadHttpError { status }) => {
            event
                .reply(&format!(
                    "Renamed command {} to {}, but the reload request failed with status {}.",
                    request.old, request.new, status
                ))
                .await
        }
        Err(RenameError::ReloadStatusError { message }) => {
            event
                .reply(&format!(
                    "Renamed command {} to {}, but the reload reported an error: {}",
                    request.old, request.new, message
                ))
                .await
        }
        Err(e) => {
            // Transport and decode failures are not distinguished from other
            // post-backup failures — same generic arm, same backup pointer.
            warn!(error = %e, code = e.code(), "reload call failed");
            event
                .reply(&format!(
                    "Error while renaming the command: {e}\nIf a backup exists, check {}.*.bak",
                    target.display()
                ))
                .await
        }
    }
}

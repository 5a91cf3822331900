//! Entry-file rewriting — backup copy, marker replacement, full overwrite.
//!
//! Two long-standing quirks of the host's own admin tooling are kept on
//! purpose rather than fixed:
//!
//! - the old command is interpolated into the marker pattern UNESCAPED, so a
//!   token carrying pattern metacharacters matches as a pattern, not as text
//!   (and an unbalanced one fails compilation);
//! - replacement is unbounded — every occurrence of the marker is rewritten,
//!   including text in comments or strings that merely looks like a
//!   registration.
//!
//! Both are latent over-match risks; callers relying on this module should
//! know the marker is `command("<token>")` and nothing smarter.

use std::path::{Path, PathBuf};

use chrono::Local;
use regex::Regex;
use tracing::debug;

use plugctl_core::config::PluginsConfig;

use crate::error::RenameError;
use crate::parse::RenameRequest;

/// What a successful rewrite produced.
#[derive(Debug)]
pub struct RewriteOutcome {
    /// The plugin entry file that was rewritten.
    pub target: PathBuf,
    /// The pre-edit copy, kept until manually deleted.
    pub backup: PathBuf,
    /// How many marker occurrences were replaced.
    pub replaced: usize,
}

/// Target path for a plugin: `<root>/<plugin>/<entry>`.
pub fn entry_path(config: &PluginsConfig, plugin: &str) -> PathBuf {
    Path::new(&config.root).join(plugin).join(&config.entry)
}

/// The literal registration marker for a command token, quotes included.
fn marker(token: &str) -> String {
    format!("command(\"{token}\")")
}

/// `<target>.<YYYYMMDD_HHMMSS>.bak` — local time, second resolution.
fn backup_path(target: &Path) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("{}.{}.bak", target.display(), stamp))
}

/// Replace every `command("<old>")` marker in the plugin's entry file with
/// `command("<new>")`.
///
/// The backup copy is taken BEFORE the marker search, so a
/// [`RenameError::CommandNotFound`] outcome still leaves an inert backup on
/// disk — that ordering is part of the contract, not an accident. The final
/// write is a plain overwrite: if it fails partway the file may be corrupt
/// and recovery is manual via the backup. No rollback is attempted.
pub fn rename_command(
    config: &PluginsConfig,
    request: &RenameRequest,
) -> Result<RewriteOutcome, RenameError> {
    let target = entry_path(config, &request.plugin);
    if !target.exists() {
        return Err(RenameError::PluginNotFound {
            plugin: request.plugin.clone(),
        });
    }

    let backup = backup_path(&target);
    std::fs::copy(&target, &backup).map_err(|e| {
        RenameError::BackupFailed(format!("{} -> {}: {}", target.display(), backup.display(), e))
    })?;

    let content = std::fs::read_to_string(&target)?;

    // The old token goes in verbatim — metacharacters and all.
    let pattern = Regex::new(&format!(r#"command\("{}"\)"#, request.old))
        .map_err(|e| RenameError::Pattern(e.to_string()))?;

    let replaced = pattern.find_iter(&content).count();
    if replaced == 0 {
        return Err(RenameError::CommandNotFound {
            command: request.old.clone(),
        });
    }

    let replacement = marker(&request.new);
    let updated = pattern.replace_all(&content, replacement.as_str());

    std::fs::write(&target, updated.as_bytes())
        .map_err(|e| RenameError::WriteFailed(format!("{}: {}", target.display(), e)))?;

    debug!(target = %target.display(), replaced, "rewrote command marker");

    Ok(RewriteOutcome {
        target,
        backup,
        replaced,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plugins_config(root: &Path) -> PluginsConfig {
        PluginsConfig {
            root: root.display().to_string(),
            entry: "main.py".to_string(),
        }
    }

    fn write_plugin(root: &Path, plugin: &str, content: &str) -> PathBuf {
        let dir = root.join(plugin);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("main.py");
        std::fs::write(&path, content).unwrap();
        path
    }

    fn request(plugin: &str, old: &str, new: &str) -> RenameRequest {
        RenameRequest {
            plugin: plugin.to_string(),
            old: old.to_string(),
            new: new.to_string(),
        }
    }

    #[test]
    fn replaces_every_occurrence_and_keeps_the_rest() {
        let tmp = tempfile::tempdir().unwrap();
        let original = "# helper\n@command(\"sitehelp\")\ndef run():\n    log(\"command(\\\"other\\\")\")\n    register(command(\"sitehelp\"))\n";
        let target = write_plugin(tmp.path(), "site", original);

        let outcome =
            rename_command(&plugins_config(tmp.path()), &request("site", "sitehelp", "sitecmd"))
                .unwrap();

        assert_eq!(outcome.replaced, 2);
        let edited = std::fs::read_to_string(&target).unwrap();
        assert_eq!(edited.matches("command(\"sitecmd\")").count(), 2);
        assert!(!edited.contains("command(\"sitehelp\")"));
        assert!(edited.contains("# helper"));
        assert!(edited.contains("def run():"));
    }

    #[test]
    fn backup_is_byte_identical_to_pre_edit_content() {
        let tmp = tempfile::tempdir().unwrap();
        let original = "@command(\"a\")\nbody\n";
        write_plugin(tmp.path(), "p", original);

        let outcome =
            rename_command(&plugins_config(tmp.path()), &request("p", "a", "b")).unwrap();

        assert!(outcome.backup.exists());
        assert_eq!(std::fs::read(&outcome.backup).unwrap(), original.as_bytes());
        let name = outcome.backup.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("main.py."));
        assert!(name.ends_with(".bak"));
    }

    #[test]
    fn missing_plugin_creates_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let err = rename_command(&plugins_config(tmp.path()), &request("ghost", "a", "b"))
            .unwrap_err();
        assert!(matches!(err, RenameError::PluginNotFound { .. }));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn absent_marker_leaves_target_untouched_but_backup_exists() {
        let tmp = tempfile::tempdir().unwrap();
        let original = "@command(\"real\")\n";
        let target = write_plugin(tmp.path(), "p", original);

        let err = rename_command(&plugins_config(tmp.path()), &request("p", "missing", "x"))
            .unwrap_err();
        assert!(matches!(err, RenameError::CommandNotFound { .. }));
        assert_eq!(std::fs::read_to_string(&target).unwrap(), original);

        // The backup is taken before the marker search; an inert copy stays.
        let baks = std::fs::read_dir(target.parent().unwrap())
            .unwrap()
            .filter(|e| {
                e.as_ref()
                    .unwrap()
                    .file_name()
                    .to_string_lossy()
                    .ends_with(".bak")
            })
            .count();
        assert_eq!(baks, 1);
    }

    #[test]
    fn rename_round_trip_restores_the_marker() {
        let tmp = tempfile::tempdir().unwrap();
        let target = write_plugin(tmp.path(), "p", "x = command(\"first\")\n");
        let config = plugins_config(tmp.path());

        rename_command(&config, &request("p", "first", "second")).unwrap();
        rename_command(&config, &request("p", "second", "first")).unwrap();

        let content = std::fs::read_to_string(&target).unwrap();
        assert!(content.contains("command(\"first\")"));
        assert!(!content.contains("command(\"second\")"));
    }

    #[test]
    fn unescaped_old_token_matches_as_a_pattern() {
        let tmp = tempfile::tempdir().unwrap();
        let target = write_plugin(tmp.path(), "p", "@command(\"abc\")\n");

        // "a.c" is interpolated verbatim, so the dot matches any character.
        let outcome =
            rename_command(&plugins_config(tmp.path()), &request("p", "a.c", "fixed")).unwrap();
        assert_eq!(outcome.replaced, 1);
        assert!(std::fs::read_to_string(&target)
            .unwrap()
            .contains("command(\"fixed\")"));
    }

    #[test]
    fn unbalanced_old_token_fails_pattern_compilation() {
        let tmp = tempfile::tempdir().unwrap();
        write_plugin(tmp.path(), "p", "@command(\"a(b\")\n");

        let err = rename_command(&plugins_config(tmp.path()), &request("p", "a(b", "fixed"))
            .unwrap_err();
        assert!(matches!(err, RenameError::Pattern(_)));
    }

    #[test]
    fn entry_path_follows_the_fixed_template() {
        let config = PluginsConfig {
            root: "./data/plugins".to_string(),
            entry: "main.py".to_string(),
        };
        assert_eq!(
            entry_path(&config, "mccloud_site"),
            Path::new("./data/plugins/mccloud_site/main.py")
        );
    }
}

//! Writing `makefile.config`.
//!
//! The output is included by the make build, so its layout is fixed:
//!
//! ```text
//!
//! # These variables are generated by config.py
//!
//! AR := /usr/bin/ar
//! CC := /usr/bin/g++
//! ...
//!
//! export AR
//! export CC
//! ...
//!
//! ```

use std::fs;
use std::path::PathBuf;

use crate::config::BuildConfig;
use crate::error::{ConfigError, Result};
use crate::settings::SettingsTable;

/// Comment written at the top of every generated file.
pub const HEADER: &str = "# These variables are generated by config.py";

/// Render the table as make assignments followed by exports.
pub fn render(settings: &SettingsTable) -> String {
    let mut out = format!("\n{}\n\n", HEADER);

    for (name, value) in settings.iter() {
        out.push_str(&format!("{} := {}\n", name, value));
    }
    out.push('\n');

    // Exported so scripts run from the build can see them too
    for name in settings.names() {
        out.push_str(&format!("export {}\n", name));
    }
    out.push('\n');

    out
}

/// Write the config file, replacing any existing one. Returns the path written.
pub fn write_config(config: &BuildConfig) -> Result<PathBuf> {
    let path = config.output_path();
    fs::write(&path, render(&config.settings)).map_err(|source| ConfigError::Write {
        path: path.clone(),
        source,
    })?;

    tracing::info!(path = %path.display(), settings = config.settings.len(), "wrote build config");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn table(pairs: &[(&str, &str)]) -> SettingsTable {
        let mut t = SettingsTable::new();
        for (k, v) in pairs {
            t.insert(*k, *v).unwrap();
        }
        t
    }

    #[test]
    fn test_render_layout() {
        let t = table(&[("VERBOSE", "@"), ("CC", "/usr/bin/g++"), ("AR", "/usr/bin/ar")]);
        let expected = "\n\
            # These variables are generated by config.py\n\
            \n\
            AR := /usr/bin/ar\n\
            CC := /usr/bin/g++\n\
            VERBOSE := @\n\
            \n\
            export AR\n\
            export CC\n\
            export VERBOSE\n\
            \n";
        assert_eq!(render(&t), expected);
    }

    #[test]
    fn test_render_keeps_empty_and_leading_space_values() {
        let t = table(&[("VERBOSE", ""), ("LDFLAGS", " -m64 -fPIC")]);
        let out = render(&t);
        assert!(out.contains("\nLDFLAGS :=  -m64 -fPIC\n"));
        assert!(out.contains("\nVERBOSE := \n"));
    }

    #[test]
    fn test_render_empty_table() {
        let out = render(&SettingsTable::new());
        assert_eq!(out, format!("\n{}\n\n\n\n", HEADER));
    }

    #[test]
    fn test_write_config_overwrites() {
        let dir = tempdir().unwrap();
        let config = BuildConfig {
            root: dir.path().to_path_buf(),
            file_name: "makefile.config".to_string(),
            settings: table(&[("CC", "/usr/bin/g++")]),
        };

        let target = dir.path().join("makefile.config");
        fs::write(&target, "stale contents").unwrap();

        let path = write_config(&config).unwrap();
        assert_eq!(path, target);
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, render(&config.settings));
        assert!(!written.contains("stale"));
    }

    #[test]
    fn test_write_config_missing_root() {
        let dir = tempdir().unwrap();
        let config = BuildConfig {
            root: dir.path().join("does-not-exist"),
            file_name: "makefile.config".to_string(),
            settings: SettingsTable::new(),
        };
        let err = write_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::Write { .. }));
    }
}

//! Project marker (§6.2): `ideo.toml` at the project root names the project
//! and optionally the source, tests, and generated-output subdirectories.
//!
//! The marker is a flat `key = "value"` list, not a general TOML document —
//! there are only four keys and none of them nest, so a hand-rolled reader
//! is simpler than pulling in a TOML parser for this alone.

use std::fs;
use std::path::{Path, PathBuf};

const MARKER_FILENAME: &str = "ideo.toml";

/// Project configuration parsed from `ideo.toml`, or the defaults used when
/// no marker is found.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectConfig {
    pub name: String,
    pub src_dir: String,
    pub tests_dir: String,
    pub out_dir: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        ProjectConfig {
            name: String::new(),
            src_dir: "src".to_string(),
            tests_dir: "tests".to_string(),
            out_dir: ".ideo-out".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("failed to read project marker at {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
}

/// Search `start` and its ancestors for `ideo.toml`. Returns the project
/// root and parsed config, or `None` if no marker is found anywhere above
/// `start`.
pub fn locate_project(start: &Path) -> Result<Option<(PathBuf, ProjectConfig)>, ProjectError> {
    let mut dir = if start.is_dir() { Some(start) } else { start.parent() };
    while let Some(d) = dir {
        let candidate = d.join(MARKER_FILENAME);
        if candidate.is_file() {
            let text = fs::read_to_string(&candidate)
                .map_err(|source| ProjectError::Read { path: candidate, source })?;
            return Ok(Some((d.to_path_buf(), parse_marker(&text))));
        }
        dir = d.parent();
    }
    Ok(None)
}

/// Parse the flat `key = "value"` body of a project marker, falling back to
/// [`ProjectConfig::default`] for any key that is absent or malformed.
fn parse_marker(text: &str) -> ProjectConfig {
    let mut config = ProjectConfig::default();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else { continue };
        let key = key.trim();
        let Some(value) = unquote(value.trim()) else { continue };
        match key {
            "name" => config.name = value.to_string(),
            "src_dir" => config.src_dir = value.to_string(),
            "tests_dir" => config.tests_dir = value.to_string(),
            "out_dir" => config.out_dir = value.to_string(),
            _ => {}
        }
    }
    config
}

fn unquote(value: &str) -> Option<&str> {
    value.strip_prefix('"').and_then(|v| v.strip_suffix('"'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_defaults() {
        let config = ProjectConfig::default();
        assert_eq!(config.src_dir, "src");
        assert_eq!(config.tests_dir, "tests");
        assert_eq!(config.out_dir, ".ideo-out");
    }

    #[test]
    fn marker_overrides_only_the_keys_it_names() {
        let text = "name = \"demo\"\nsrc_dir = \"lib\"\n";
        let config = parse_marker(text);
        assert_eq!(config.name, "demo");
        assert_eq!(config.src_dir, "lib");
        assert_eq!(config.tests_dir, "tests");
        assert_eq!(config.out_dir, ".ideo-out");
    }

    #[test]
    fn blank_lines_and_comments_are_ignored() {
        let text = "# a comment\n\nname = \"demo\"\n";
        let config = parse_marker(text);
        assert_eq!(config.name, "demo");
    }

    #[test]
    fn locate_project_finds_marker_in_an_ancestor_directory() {
        let dir = std::env::temp_dir().join(format!(
            "ideo_module_test_{}",
            std::process::id()
        ));
        let nested = dir.join("src").join("sub");
        fs::create_dir_all(&nested).expect("create nested dir");
        fs::write(dir.join(MARKER_FILENAME), "name = \"demo\"\n").expect("write marker");

        let found = locate_project(&nested).expect("locate_project should not error");
        let (root, config) = found.expect("marker should be found in an ancestor");
        assert_eq!(root, dir);
        assert_eq!(config.name, "demo");

        fs::remove_dir_all(&dir).expect("cleanup temp dir");
    }

    #[test]
    fn locate_project_returns_none_when_no_marker_exists() {
        let dir = std::env::temp_dir().join(format!(
            "ideo_module_test_nomarker_{}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("create dir");
        let found = locate_project(&dir).expect("locate_project should not error");
        assert!(found.is_none());
        fs::remove_dir_all(&dir).expect("cleanup temp dir");
    }
}

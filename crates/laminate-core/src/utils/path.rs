//! Path utilities for turning bare locators into absolute file paths.

use crate::error::{LaminateError, LaminateResult};
use std::path::{Component, Path, PathBuf};

/// Normalize a path by resolving . and .. components lexically
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {
                // Skip current directory
            },
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                },
                // `..` directly under the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {},
                _ => components.push(component),
            },
            other => {
                components.push(other);
            },
        }
    }

    components.iter().collect()
}

/// Make `path` absolute against the process working directory
pub fn absolute_path(path: &Path) -> LaminateResult<PathBuf> {
    if path.is_absolute() {
        return Ok(normalize_path(path));
    }

    let cwd = std::env::current_dir()
        .map_err(|e| LaminateError::io("Failed to get current directory".to_string(), e))?;
    Ok(normalize_path(&cwd.join(path)))
}

/// Get the file extension as a lowercase string
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_path() {
        let path = Path::new("./src/../lib/./file.rs");
        let normalized = normalize_path(path);
        assert_eq!(normalized, Path::new("lib/file.rs"));
    }

    #[test]
    fn test_normalize_path_stops_at_root() {
        assert_eq!(normalize_path(Path::new("/../etc/app.yaml")), Path::new("/etc/app.yaml"));
        assert_eq!(normalize_path(Path::new("../conf.json")), Path::new("../conf.json"));
    }

    #[test]
    fn test_absolute_path() {
        let cwd = std::env::current_dir().unwrap();
        let abs = absolute_path(Path::new("conf/base.yaml")).unwrap();
        assert!(abs.is_absolute());
        assert_eq!(abs, cwd.join("conf/base.yaml"));

        let already = absolute_path(Path::new("/tmp/./base.yaml")).unwrap();
        assert_eq!(already, Path::new("/tmp/base.yaml"));
    }

    #[test]
    fn test_get_extension() {
        assert_eq!(get_extension(Path::new("base.yaml")), Some("yaml".to_string()));
        assert_eq!(
            get_extension(Path::new("archive.tar.toml")),
            Some("toml".to_string())
        );
        assert_eq!(get_extension(Path::new("CONFIG.JSON")), Some("json".to_string()));
        assert_eq!(get_extension(Path::new("no_extension")), None);
    }

    proptest! {
        #[test]
        fn normalized_absolute_paths_have_no_dot_components(
            segments in prop::collection::vec(prop_oneof![Just(".".to_string()), Just("..".to_string()), "[a-z]{1,6}"], 0..8)
        ) {
            let path = PathBuf::from(format!("/{}", segments.join("/")));
            let normalized = normalize_path(&path);

            prop_assert!(normalized.is_absolute());
            prop_assert!(normalized
                .components()
                .all(|c| !matches!(c, Component::CurDir | Component::ParentDir)));
        }
    }
}

use std::io;
use std::path::Path;

use revlay_core::OVERLAY_DIR;

/// Every plugin directory carrying an overlay folder, sorted by name so
/// runs process plugins in a stable order.
pub fn discover(plugins_dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(plugins_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if !entry.path().join(OVERLAY_DIR).is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::discover;
    use tempfile::tempdir;

    #[test]
    fn test_discovers_only_plugins_with_overlays() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("beta/rev")).unwrap();
        std::fs::create_dir_all(dir.path().join("alpha/rev")).unwrap();
        std::fs::create_dir_all(dir.path().join("plain")).unwrap();
        std::fs::write(dir.path().join("file"), "x").unwrap();

        let names = discover(dir.path()).unwrap();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn test_empty_dir() {
        let dir = tempdir().unwrap();
        assert!(discover(dir.path()).unwrap().is_empty());
    }
}

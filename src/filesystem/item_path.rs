// Turning host paths into the three things we actually care about.

use std::path::{Component, Path};

/// Where an item lives: `/directory/filename.extension`.
///
/// Empty strings mean "not there". So the root has an empty directory, a
/// directory has an empty filename, and so on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemPath {
    pub directory: String,
    pub filename: String,
    pub extension: String,
    /// The path went deeper than `/directory/file`. Nothing can live there.
    pub nested: bool,
}

impl ItemPath {
    /// Build one up from its parts directly.
    pub fn new(directory: &str, filename: &str, extension: &str) -> Self {
        Self {
            directory: directory.to_string(),
            filename: filename.to_string(),
            extension: extension.to_string(),
            nested: false,
        }
    }

    /// `/`
    pub fn root() -> Self {
        Self::default()
    }

    /// Split a path like `/docs/report.txt`.
    ///
    /// The extension is everything after the first `.` of the file name, so
    /// `/a/b.c.d` is file `b` with extension `c.d` (and too long to ever exist).
    pub fn parse(path: &Path) -> Self {
        let parts: Vec<String> = path
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        let mut item = ItemPath::root();
        item.nested = parts.len() > 2;
        if let Some(directory) = parts.first() {
            item.directory = directory.clone();
        }
        if let Some(file) = parts.get(1) {
            match file.split_once('.') {
                Some((name, extension)) => {
                    item.filename = name.to_string();
                    item.extension = extension.to_string();
                }
                None => item.filename = file.clone(),
            }
        }
        item
    }

    pub fn is_root(&self) -> bool {
        self.directory.is_empty() && !self.nested
    }

    /// Names a directory, and nothing inside it.
    pub fn is_directory(&self) -> bool {
        !self.directory.is_empty() && self.filename.is_empty() && self.extension.is_empty() && !self.nested
    }
}

impl std::fmt::Display for ItemPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}", self.directory)?;
        if !self.filename.is_empty() || !self.extension.is_empty() {
            write!(f, "/{}", self.filename)?;
        }
        if !self.extension.is_empty() {
            write!(f, ".{}", self.extension)?;
        }
        if self.nested {
            write!(f, "/...")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use test_log::test; // We want to see logs while testing.

    use super::ItemPath;

    #[test]
    fn root_path() {
        let item = ItemPath::parse(Path::new("/"));
        assert_eq!(item, ItemPath::root());
        assert!(item.is_root());
    }

    #[test]
    fn directory_path() {
        let item = ItemPath::parse(Path::new("/docs"));
        assert_eq!(item, ItemPath::new("docs", "", ""));
        assert!(item.is_directory());
    }

    #[test]
    fn file_paths() {
        assert_eq!(
            ItemPath::parse(Path::new("/docs/report.txt")),
            ItemPath::new("docs", "report", "txt")
        );
        assert_eq!(ItemPath::parse(Path::new("/docs/README")), ItemPath::new("docs", "README", ""));
        assert_eq!(ItemPath::parse(Path::new("/a/b.c.d")), ItemPath::new("a", "b", "c.d"));
    }

    #[test]
    fn deep_paths_are_flagged() {
        let item = ItemPath::parse(Path::new("/a/b/c.txt"));
        assert!(item.nested);
        assert!(!item.is_root());
        assert!(!item.is_directory());
    }

    #[test]
    fn display_round_trips_simple_paths() {
        for path in ["/", "/docs", "/docs/report.txt", "/docs/README"] {
            assert_eq!(ItemPath::parse(Path::new(path)).to_string(), path);
        }
    }
}

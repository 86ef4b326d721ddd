use std::fs;
use std::path::Path;

use tempfile::{tempdir, TempDir};

/// Throwaway site root, removed when dropped.
pub struct SiteDir {
    dir: TempDir,
}

impl SiteDir {
    pub fn new() -> Self {
        Self {
            dir: tempdir().expect("create site dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative: &str, contents: &[u8]) {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(path, contents).expect("write site file");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_creates_parent_dirs() {
        let site = SiteDir::new();
        site.write("downloads/nested/app.zip", b"zip");
        assert_eq!(fs::read(site.path().join("downloads/nested/app.zip")).unwrap(), b"zip");
    }

    #[test]
    fn removed_on_drop() {
        let site = SiteDir::new();
        site.write("index.html", b"<h1>home</h1>");
        let root = site.path().to_path_buf();
        assert!(root.exists());

        drop(site);
        assert!(!root.exists());
    }
}

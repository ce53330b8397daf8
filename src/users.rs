//! UID to user name resolution backed by the account database.

use crate::reader::{read_all_lines, NEWLINE};
use ahash::AHashMap as HashMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// Parses `name:password:uid:...` lines into `(uid, name)` pairs.
/// Blank lines, comments and lines with fewer than three fields are skipped.
pub fn parse_passwd<S: AsRef<str>>(lines: &[S]) -> Vec<(String, String)> {
    lines
        .iter()
        .filter_map(|line| {
            let line = line.as_ref().trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let parts: Vec<&str> = line.split(':').collect();
            if parts.len() < 3 {
                return None;
            }
            Some((parts[2].to_string(), parts[0].to_string()))
        })
        .collect()
}

/// Lazily populated UID → name cache.
///
/// The account file is scanned on the first lookup and again on every cache
/// miss. Entries are only ever added; once a UID is cached its name stays
/// fixed for the lifetime of the directory, even if the file changes or
/// disappears.
#[derive(Debug)]
pub struct UserDirectory {
    path: PathBuf,
    cache: RwLock<HashMap<String, String>>,
}

impl UserDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the user name for `uid`, or an empty string when unknown.
    pub fn resolve(&self, uid: &str) -> String {
        if uid.is_empty() {
            return String::new();
        }
        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(name) = cache.get(uid) {
                return name.clone();
            }
        }

        self.load();

        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        match cache.get(uid) {
            Some(name) => name.clone(),
            None => {
                debug!("UID {} not found in {}", uid, self.path.display());
                String::new()
            }
        }
    }

    /// Scans the account file and merges it into the cache. Returns the
    /// number of cached entries afterwards.
    ///
    /// Call once up front when lookups will run on several threads.
    pub fn load(&self) -> usize {
        let entries = parse_passwd(&read_all_lines(&self.path, NEWLINE));
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        for (uid, name) in entries {
            cache.entry(uid).or_insert(name);
        }
        cache.len()
    }

    pub fn len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const PASSWD: &str = "\
root:x:0:0:root:/root:/bin/bash
# comment line
daemon:x:1:1:daemon:/usr/sbin:/usr/sbin/nologin
alice:x:1000:1000:Alice,,,:/home/alice:/bin/bash
broken-line
";

    #[test]
    fn test_parse_passwd() {
        let lines: Vec<&str> = PASSWD.lines().collect();
        let entries = parse_passwd(&lines);
        assert_eq!(
            entries,
            vec![
                ("0".to_string(), "root".to_string()),
                ("1".to_string(), "daemon".to_string()),
                ("1000".to_string(), "alice".to_string()),
            ]
        );
    }

    #[test]
    fn test_resolve_known_and_unknown() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("passwd");
        std::fs::write(&path, PASSWD).expect("Failed to write passwd");

        let users = UserDirectory::new(&path);
        assert!(users.is_empty());
        assert_eq!(users.resolve("1000"), "alice");
        assert_eq!(users.resolve("0"), "root");
        assert_eq!(users.resolve("4242"), "");
        assert_eq!(users.len(), 3);
    }

    #[test]
    fn test_first_entry_wins_for_duplicate_uid() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("passwd");
        std::fs::write(&path, "root:x:0:0::/root:/bin/sh\ntoor:x:0:0::/root:/bin/sh\n")
            .expect("Failed to write passwd");

        let users = UserDirectory::new(&path);
        assert_eq!(users.resolve("0"), "root");
    }

    #[test]
    fn test_cache_survives_file_removal() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("passwd");
        std::fs::write(&path, PASSWD).expect("Failed to write passwd");

        let users = UserDirectory::new(&path);
        assert_eq!(users.resolve("1"), "daemon");

        std::fs::remove_file(&path).expect("Failed to remove passwd");
        assert_eq!(users.resolve("1"), "daemon");
        assert_eq!(users.resolve("1000"), "alice");
    }

    #[test]
    fn test_miss_rescans_for_new_entries() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("passwd");
        std::fs::write(&path, "root:x:0:0::/root:/bin/sh\n").expect("Failed to write passwd");

        let users = UserDirectory::new(&path);
        assert_eq!(users.resolve("1001"), "");

        std::fs::write(
            &path,
            "root:x:0:0::/root:/bin/sh\nbob:x:1001:1001::/home/bob:/bin/sh\n",
        )
        .expect("Failed to rewrite passwd");
        assert_eq!(users.resolve("1001"), "bob");
    }

    #[test]
    fn test_missing_database() {
        let dir = tempdir().expect("Failed to create temp dir");
        let users = UserDirectory::new(dir.path().join("nope"));
        assert_eq!(users.resolve("0"), "");
        assert_eq!(users.load(), 0);
    }
}

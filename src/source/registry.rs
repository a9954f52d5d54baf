use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use spdlog::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{ContentError, Result};
use crate::source::glob::GlobPattern;

/// Every module file below a source directory, scanned once at startup.
#[derive(Debug)]
pub struct ModuleRegistry {
    root: PathBuf,
    keys: BTreeSet<String>,
}

impl ModuleRegistry {
    pub fn scan(root: &Path) -> Result<Self> {
        let mut keys = BTreeSet::new();

        for entry in WalkDir::new(root).follow_links(true) {
            let entry = entry.map_err(|source| ContentError::Scan {
                path: root.to_path_buf(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            match Self::module_key(relative) {
                Some(key) => {
                    debug!("Registered module {}", key);
                    keys.insert(key);
                }
                None => warn!("Skipping module with a non UTF-8 path: {}", entry.path().display()),
            }
        }

        info!("Registered {} modules from {}", keys.len(), root.display());

        Ok(ModuleRegistry {
            root: root.to_path_buf(),
            keys,
        })
    }

    /// `routes/posts/a.mdx` -> `./routes/posts/a.mdx`
    fn module_key(relative: &Path) -> Option<String> {
        let mut key = String::from(".");
        for component in relative.components() {
            match component {
                Component::Normal(part) => {
                    key.push('/');
                    key.push_str(part.to_str()?);
                }
                _ => return None,
            }
        }
        Some(key)
    }

    pub fn glob(&self, pattern: &GlobPattern) -> Vec<String> {
        self.keys.iter()
            .filter(|key| pattern.is_match(key))
            .cloned()
            .collect()
    }

    pub fn resolve(&self, key: &str) -> Option<PathBuf> {
        if !self.keys.contains(key) {
            return None;
        }
        let relative = key.strip_prefix("./")?;
        Some(self.root.join(relative))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

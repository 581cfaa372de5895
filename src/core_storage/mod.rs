use log::warn;
use std::fs;
use std::path::PathBuf;

/// File-system operations the command handlers depend on.
///
/// Handlers only see boolean outcomes; any failure detail stays on this side
/// of the seam and maps to a uniform 550 on the wire. Paths are absolute
/// virtual paths produced by `Session::build_path`.
pub trait StorageDriver: Send + Sync {
    fn change_dir(&self, path: &str) -> bool;
    fn delete_file(&self, path: &str) -> bool;
    fn delete_dir(&self, path: &str) -> bool;
}

/// Disk-backed driver mapping virtual paths under a root directory.
pub struct DiskDriver {
    root: PathBuf,
}

impl DiskDriver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl StorageDriver for DiskDriver {
    fn change_dir(&self, path: &str) -> bool {
        self.resolve(path).is_dir()
    }

    fn delete_file(&self, path: &str) -> bool {
        let target = self.resolve(path);
        if !target.is_file() {
            return false;
        }
        match fs::remove_file(&target) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to delete file {:?}: {}", target, e);
                false
            }
        }
    }

    fn delete_dir(&self, path: &str) -> bool {
        let target = self.resolve(path);
        if !target.is_dir() {
            return false;
        }
        match fs::remove_dir(&target) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to delete directory {:?}: {}", target, e);
                false
            }
        }
    }
}

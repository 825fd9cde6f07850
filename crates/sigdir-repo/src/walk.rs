use camino::{Utf8Path, Utf8PathBuf};
use sigdir_types::BatchError;
use std::io;
use tracing::trace;
use walkdir::WalkDir;

/// Lazy depth-first enumeration of every regular file below a basis directory.
///
/// Behavior:
/// - files directly in the basis root are included, directories are never yielded
/// - entries are sorted by file name within each directory, so the order is stable
/// - symbolic links are neither followed nor yielded
/// - the first traversal error is yielded once, after which the iterator is exhausted
pub struct FileWalker {
    root: Utf8PathBuf,
    inner: walkdir::IntoIter,
    failed: bool,
}

impl FileWalker {
    pub fn new(basis_dir: &Utf8Path) -> Self {
        let inner = WalkDir::new(basis_dir)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();
        Self {
            root: basis_dir.to_path_buf(),
            inner,
            failed: false,
        }
    }

    fn fail(&mut self, err: BatchError) -> Option<Result<Utf8PathBuf, BatchError>> {
        self.failed = true;
        Some(Err(err))
    }
}

impl Iterator for FileWalker {
    type Item = Result<Utf8PathBuf, BatchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let err = walk_failure(&self.root, err);
                    return self.fail(err);
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            match Utf8PathBuf::from_path_buf(entry.into_path()) {
                Ok(path) => {
                    trace!(path = %path, "discovered file");
                    return Some(Ok(path));
                }
                Err(path) => {
                    let err = BatchError::WalkFailure {
                        path: Utf8PathBuf::from(path.to_string_lossy().into_owned()),
                        source: io::Error::new(
                            io::ErrorKind::InvalidData,
                            "file name is not valid UTF-8",
                        ),
                    };
                    return self.fail(err);
                }
            }
        }
    }
}

/// Eagerly collect every file below `basis_dir`, stopping at the first traversal error.
pub fn collect_files(basis_dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>, BatchError> {
    FileWalker::new(basis_dir).collect()
}

fn walk_failure(root: &Utf8Path, err: walkdir::Error) -> BatchError {
    let path = err
        .path()
        .map(|p| Utf8PathBuf::from(p.to_string_lossy().into_owned()))
        .unwrap_or_else(|| root.to_path_buf());
    BatchError::WalkFailure {
        path,
        source: io::Error::from(err),
    }
}

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use sigdir_types::{Invocation, RelativePath};

/// Express `file` relative to `basis`, preserving subdirectory nesting.
///
/// Matching is component-wise, so a basis of `/data/foo` never claims `/data/foobar/x`.
/// Returns `None` when `file` is not strictly below `basis`.
pub fn relative_path(file: &Utf8Path, basis: &Utf8Path) -> Option<RelativePath> {
    let rest = file.strip_prefix(basis).ok()?;
    let mut segments = Vec::new();
    for component in rest.components() {
        match component {
            Utf8Component::Normal(name) => segments.push(name),
            _ => return None,
        }
    }
    RelativePath::from_segments(segments)
}

/// Re-root a relative path under the signature directory.
pub fn destination_for(relative: &RelativePath, signature_dir: &Utf8Path) -> Utf8PathBuf {
    signature_dir.join(relative.to_host_path())
}

/// Maps discovered files to the invocation of the per-file signature operation.
#[derive(Clone, Copy, Debug)]
pub struct PathMapper<'a> {
    basis_dir: &'a Utf8Path,
    signature_dir: Option<&'a Utf8Path>,
}

impl<'a> PathMapper<'a> {
    pub fn new(basis_dir: &'a Utf8Path, signature_dir: Option<&'a Utf8Path>) -> Self {
        Self {
            basis_dir,
            signature_dir,
        }
    }

    /// Build the invocation for `file`.
    ///
    /// Without a signature directory the invocation carries no destination at all.
    pub fn map(&self, file: &Utf8Path) -> Option<Invocation> {
        let Some(signature_dir) = self.signature_dir else {
            return self
                .contains(file)
                .then(|| Invocation::new(file.to_path_buf(), None));
        };
        let relative = relative_path(file, self.basis_dir)?;
        Some(Invocation::new(
            file.to_path_buf(),
            Some(destination_for(&relative, signature_dir)),
        ))
    }

    fn contains(&self, file: &Utf8Path) -> bool {
        relative_path(file, self.basis_dir).is_some()
    }
}

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// Resolve `input` against `cwd` and normalize the result lexically.
///
/// The filesystem is never consulted: symlinks are not resolved and the path need not exist.
pub fn absolutize(input: &Utf8Path, cwd: &Utf8Path) -> Utf8PathBuf {
    if input.is_absolute() {
        normalize_lexically(input)
    } else {
        normalize_lexically(&cwd.join(input))
    }
}

/// Fold `.` and `..` components and drop redundant separators.
///
/// `..` never climbs above the root of an absolute path. Leading `..` of a relative path is kept.
pub fn normalize_lexically(path: &Utf8Path) -> Utf8PathBuf {
    let mut out = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::Prefix(_) | Utf8Component::RootDir => out.push(component.as_str()),
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                let can_pop = matches!(
                    out.components().next_back(),
                    Some(Utf8Component::Normal(_))
                );
                if can_pop {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Utf8Component::Normal(name) => out.push(name),
        }
    }
    if out.as_str().is_empty() {
        out.push(".");
    }
    out
}

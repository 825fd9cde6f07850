use camino::{Utf8Path, Utf8PathBuf};
use sigdir_domain::{absolutize, normalize_lexically};
use sigdir_types::BatchError;

pub const ARG_BASIS_DIR: &str = "basis-dir";
pub const ARG_SIGNATURE_DIR: &str = "signature-dir";

/// Arguments after validation: absolute, lexically normalized paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedInput {
    pub basis_dir: Utf8PathBuf,
    pub signature_dir: Option<Utf8PathBuf>,
}

/// Validate the raw arguments against the process working directory.
pub fn validate_input(
    basis_arg: Option<&str>,
    signature_arg: Option<&str>,
) -> Result<ValidatedInput, BatchError> {
    validate_input_with(basis_arg, signature_arg, current_dir_utf8)
}

/// Validate the raw arguments, resolving relative paths against `cwd`.
pub fn validate_input_in(
    basis_arg: Option<&str>,
    signature_arg: Option<&str>,
    cwd: &Utf8Path,
) -> Result<ValidatedInput, BatchError> {
    validate_input_with(basis_arg, signature_arg, |_| Ok(cwd.to_path_buf()))
}

fn validate_input_with<F>(
    basis_arg: Option<&str>,
    signature_arg: Option<&str>,
    cwd: F,
) -> Result<ValidatedInput, BatchError>
where
    F: Fn(&str) -> Result<Utf8PathBuf, BatchError>,
{
    let basis_arg = non_blank(basis_arg).ok_or_else(|| {
        BatchError::invalid_argument(ARG_BASIS_DIR, "no basis directory was specified")
    })?;

    let basis_dir = resolve_with(basis_arg, ARG_BASIS_DIR, &cwd)?;
    if !basis_dir.is_dir() {
        return Err(BatchError::DirectoryNotFound { path: basis_dir });
    }

    // Existence of the signature directory is left to the per-file operation.
    let signature_dir = match non_blank(signature_arg) {
        Some(arg) => Some(resolve_with(arg, ARG_SIGNATURE_DIR, &cwd)?),
        None => None,
    };

    Ok(ValidatedInput {
        basis_dir,
        signature_dir,
    })
}

fn resolve_with<F>(arg: &str, name: &str, cwd: &F) -> Result<Utf8PathBuf, BatchError>
where
    F: Fn(&str) -> Result<Utf8PathBuf, BatchError>,
{
    let path = Utf8Path::new(arg);
    if path.is_absolute() {
        return Ok(normalize_lexically(path));
    }
    let cwd = cwd(name)?;
    Ok(absolutize(path, &cwd))
}

fn non_blank(arg: Option<&str>) -> Option<&str> {
    arg.filter(|s| !s.trim().is_empty())
}

fn current_dir_utf8(name: &str) -> Result<Utf8PathBuf, BatchError> {
    let cwd = std::env::current_dir().map_err(|e| {
        BatchError::invalid_argument(name, format!("cannot resolve relative path: {e}"))
    })?;
    Utf8PathBuf::from_path_buf(cwd).map_err(|p| {
        BatchError::invalid_argument(
            name,
            format!(
                "cannot resolve relative path: working directory is not UTF-8: {}",
                p.display()
            ),
        )
    })
}

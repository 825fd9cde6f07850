use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Arguments for one call of the per-file signature operation.
///
/// The destination is present only when a signature directory was supplied. Without it the
/// operation picks its own default location next to the source file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub source: Utf8PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<Utf8PathBuf>,
}

impl Invocation {
    pub fn new(source: Utf8PathBuf, destination: Option<Utf8PathBuf>) -> Self {
        Self {
            source,
            destination,
        }
    }

    pub fn destination(&self) -> Option<&Utf8Path> {
        self.destination.as_deref()
    }

    /// Positional arguments in call order: source, then destination when present.
    pub fn args(&self) -> Vec<&str> {
        let mut args = vec![self.source.as_str()];
        if let Some(dest) = &self.destination {
            args.push(dest.as_str());
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_without_destination_is_single_source() {
        let inv = Invocation::new(Utf8PathBuf::from("/data/basis/a.txt"), None);
        assert_eq!(inv.args(), vec!["/data/basis/a.txt"]);
    }

    #[test]
    fn args_with_destination_is_source_then_destination() {
        let inv = Invocation::new(
            Utf8PathBuf::from("/data/basis/sub/b.txt"),
            Some(Utf8PathBuf::from("/data/sigs/sub/b.txt")),
        );
        assert_eq!(
            inv.args(),
            vec!["/data/basis/sub/b.txt", "/data/sigs/sub/b.txt"]
        );
    }
}

//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - completeness and purity of basis-relative path computation
//! - mirroring of the basis layout under the signature directory
//! - sibling directories that share a name prefix

use crate::mapper::{PathMapper, destination_for, relative_path};
use crate::normalize::normalize_lexically;
use camino::Utf8PathBuf;
use proptest::prelude::*;
use sigdir_types::RelativePath;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Strategy for a single file or directory name, including characters that carry
/// meaning in URIs (`%`, `#`, space) and non-ASCII letters.
fn arb_segment() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 %#._+éü-]{1,12}")
        .unwrap()
        .prop_filter("segment must be a plain name", |s| {
            s != "." && s != ".." && s.trim() == s
        })
}

fn arb_segments() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_segment(), 1..6)
}

fn root() -> Utf8PathBuf {
    Utf8PathBuf::from(std::path::MAIN_SEPARATOR_STR)
}

fn join_all(base: &Utf8PathBuf, segments: &[String]) -> Utf8PathBuf {
    let mut out = base.clone();
    for s in segments {
        out.push(s);
    }
    out
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn relative_path_recovers_the_joined_segments(
        basis_segments in arb_segments(),
        file_segments in arb_segments(),
    ) {
        let basis = join_all(&root(), &basis_segments);
        let file = join_all(&basis, &file_segments);

        let rel = relative_path(&file, &basis).expect("file is below basis");
        let got: Vec<&str> = rel.segments().collect();
        let want: Vec<&str> = file_segments.iter().map(|s| s.as_str()).collect();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn relative_path_is_pure(
        basis_segments in arb_segments(),
        file_segments in arb_segments(),
    ) {
        let basis = join_all(&root(), &basis_segments);
        let file = join_all(&basis, &file_segments);

        let first = relative_path(&file, &basis);
        let second = relative_path(&file, &basis);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn destination_mirrors_the_basis_layout(
        basis_segments in arb_segments(),
        sig_segments in arb_segments(),
        file_segments in arb_segments(),
    ) {
        let basis = join_all(&root(), &basis_segments);
        let sigs = join_all(&root(), &sig_segments);
        let file = join_all(&basis, &file_segments);

        let inv = PathMapper::new(&basis, Some(&sigs)).map(&file).expect("mapped");
        prop_assert_eq!(inv.source, file);
        prop_assert_eq!(inv.destination, Some(join_all(&sigs, &file_segments)));
    }

    #[test]
    fn sibling_sharing_a_prefix_never_aliases(
        parent in arb_segments(),
        name in arb_segment(),
        suffix in arb_segment(),
        file_segments in arb_segments(),
    ) {
        let basis = join_all(&join_all(&root(), &parent), std::slice::from_ref(&name));
        let sibling = join_all(&root(), &parent).join(format!("{name}{suffix}"));
        let file = join_all(&sibling, &file_segments);

        prop_assert!(relative_path(&file, &basis).is_none());
    }

    #[test]
    fn relative_path_round_trips_through_its_string_form(file_segments in arb_segments()) {
        let rel = RelativePath::from_segments(&file_segments).expect("plain segments");
        let reparsed = RelativePath::parse(rel.as_str()).expect("parse");
        prop_assert_eq!(&reparsed, &rel);

        let sigs = join_all(&root(), &["sigs".to_string()]);
        prop_assert_eq!(destination_for(&rel, &sigs), join_all(&sigs, &file_segments));
    }

    #[test]
    fn normalization_is_idempotent(segments in prop::collection::vec(
        prop_oneof![arb_segment(), Just(".".to_string()), Just("..".to_string())],
        0..8,
    )) {
        let path = join_all(&root(), &segments);
        let once = normalize_lexically(&path);
        prop_assert_eq!(normalize_lexically(&once), once);
    }
}

//! Property tests for schema versions and bumps.

use proptest::prelude::*;

use registry_reconcile::domain::value_objects::{ChangeKind, SchemaVersion};

fn version() -> impl Strategy<Value = SchemaVersion> {
    (0u32..50, 0u32..50, 0u32..50).prop_map(|(m, r, a)| SchemaVersion::new(m, r, a))
}

fn change_kind() -> impl Strategy<Value = ChangeKind> {
    prop_oneof![
        Just(ChangeKind::NoChange),
        Just(ChangeKind::Minor),
        Just(ChangeKind::Revision),
        Just(ChangeKind::Major),
        "[a-z]{1,8}".prop_map(|raw| ChangeKind::parse(&raw)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: printing then parsing yields the same version.
    #[test]
    fn property_version_text_round_trips(v in version()) {
        prop_assert_eq!(SchemaVersion::parse(&v.to_string()), Ok(v));
    }

    /// PROPERTY: comparison agrees with lexicographic (model, revision, addition).
    #[test]
    fn property_compare_is_lexicographic(a in version(), b in version()) {
        let expected = (a.model, a.revision, a.addition).cmp(&(b.model, b.revision, b.addition));
        prop_assert_eq!(a.cmp(&b), expected);
        prop_assert_eq!(a.compare(&b), -b.compare(&a));
    }

    /// PROPERTY: a bump never moves a version backwards, and only no-change
    /// kinds leave it where it is.
    #[test]
    fn property_bump_is_monotonic(v in version(), kind in change_kind()) {
        let bumped = v.bump(&kind);
        prop_assert!(bumped >= v);
        let moves = matches!(kind, ChangeKind::Minor | ChangeKind::Revision | ChangeKind::Major);
        prop_assert_eq!(bumped > v, moves);
    }

    /// PROPERTY: bigger changes need at least as big a version.
    #[test]
    fn property_bump_respects_change_order(v in version()) {
        let minor = v.bump(&ChangeKind::Minor);
        let revision = v.bump(&ChangeKind::Revision);
        let major = v.bump(&ChangeKind::Major);
        prop_assert!(minor < revision);
        prop_assert!(revision < major);
    }

    /// PROPERTY: arbitrary text never panics the parser, and anything that
    /// is not three numeric segments is rejected.
    #[test]
    fn property_parse_never_panics(input in "\\PC{0,16}") {
        if let Ok(v) = SchemaVersion::parse(&input) {
            prop_assert_eq!(input.split('-').count(), 3);
            prop_assert_eq!(SchemaVersion::parse(&v.to_string()), Ok(v));
        }
    }
}

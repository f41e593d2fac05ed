//! Property-based tests for the partial-update and resolution rules.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use serde_json::{json, Value};

use edgectl::core::optional::OptionalValue;
use edgectl::core::resource::{catalog, FieldKind, FieldOverrides, Resource, ResourceKind};
use edgectl::core::types::{ServiceId, ServiceVersion, VersionNumber, VersionSpecifier};
use edgectl::engine::update::overlay;
use edgectl::engine::version::{select_active, select_latest};
use edgectl::engine::{AutoCloneGuard, Decision, MutualExclusionValidator};

/// Strategy for picking a catalogued kind.
fn any_kind() -> impl Strategy<Value = &'static ResourceKind> {
    (0..catalog::ALL.len()).prop_map(|i| catalog::ALL[i])
}

/// A value of the right shape for `kind`, derived from a seed.
fn value_for(kind: FieldKind, seed: u32) -> Value {
    match kind {
        FieldKind::Text => json!(format!("value-{}", seed)),
        FieldKind::Uint => json!(seed),
        FieldKind::Int => json!(seed as i64 - 1),
        FieldKind::Bool => json!(seed % 2 == 0),
    }
}

/// A baseline holding every declared field of `kind`.
fn baseline(kind: &ResourceKind, seed: u32) -> Resource {
    Resource {
        service_id: ServiceId::new("123").unwrap(),
        version: VersionNumber::new(2).unwrap(),
        name: "logs".into(),
        fields: kind
            .fields()
            .map(|d| (d.field.to_string(), value_for(d.kind, seed)))
            .collect(),
    }
}

/// Strategy for a kind plus a mask over its fields.
fn kind_and_mask() -> impl Strategy<Value = (&'static ResourceKind, Vec<bool>)> {
    any_kind().prop_flat_map(|kind| {
        let n = kind.fields().count();
        (Just(kind), prop::collection::vec(any::<bool>(), n))
    })
}

/// Strategy for a non-empty list of distinct version records.
fn versions() -> impl Strategy<Value = Vec<ServiceVersion>> {
    prop::collection::btree_map(1u32..500, (any::<bool>(), any::<bool>()), 1..20).prop_map(|m| {
        m.into_iter()
            .map(|(n, (active, locked))| ServiceVersion {
                number: VersionNumber::new(n).unwrap(),
                active,
                locked,
                updated_at: None,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn empty_overrides_are_identity(kind in any_kind(), seed in 0u32..1000) {
        let base = baseline(kind, seed);
        let out = overlay(base.clone(), &FieldOverrides::new(), &OptionalValue::unset());
        prop_assert_eq!(out, base);
    }

    #[test]
    fn result_differs_exactly_on_set_fields((kind, mask) in kind_and_mask(), seed in 0u32..1000) {
        let base = baseline(kind, seed);
        let mut overrides = FieldOverrides::new();
        let mut expected = BTreeSet::new();

        for (descriptor, set) in kind.fields().zip(mask) {
            if set {
                // A different value of the same shape.
                let value = match descriptor.kind {
                    FieldKind::Bool => json!(seed % 2 != 0),
                    other => value_for(other, seed + 1),
                };
                overrides.insert(descriptor.field, OptionalValue::set(value));
                expected.insert(descriptor.field.to_string());
            } else {
                // Declared but unset; the placeholder must not leak.
                overrides.insert(descriptor.field, OptionalValue::from_parts(false, Value::Null));
            }
        }

        let out = overlay(base.clone(), &overrides, &OptionalValue::unset());
        prop_assert_eq!(base.diff(&out), expected);
    }

    #[test]
    fn latest_is_the_maximum(list in versions()) {
        let max = list.iter().map(|v| v.number).max().unwrap();
        prop_assert_eq!(select_latest(&list).unwrap().number, max);
    }

    #[test]
    fn active_is_found_iff_present(list in versions()) {
        let selected = select_active(&list);
        prop_assert_eq!(selected.is_some(), list.iter().any(|v| v.active));
        if let Some(version) = selected {
            prop_assert!(version.active);
        }
    }

    #[test]
    fn guard_never_proceeds_on_protected_mutation(
        active in any::<bool>(),
        locked in any::<bool>(),
        autoclone in any::<bool>(),
        mutating in any::<bool>(),
    ) {
        let version = ServiceVersion {
            number: VersionNumber::new(5).unwrap(),
            active,
            locked,
            updated_at: None,
        };
        let decision = AutoCloneGuard::new(version, autoclone, mutating).decide();
        let protected = active || locked;
        match decision {
            Decision::Proceed => prop_assert!(!mutating || !protected),
            Decision::Clone => prop_assert!(mutating && protected && autoclone),
            Decision::Block => prop_assert!(mutating && protected && !autoclone),
        }
    }

    #[test]
    fn exclusion_fails_iff_a_pair_is_fully_set((kind, mask) in kind_and_mask()) {
        let set: BTreeSet<&str> = kind
            .fields()
            .zip(mask)
            .filter(|(_, set)| *set)
            .map(|(d, _)| d.flag)
            .collect();
        let conflict = kind
            .exclusive
            .iter()
            .any(|(a, b)| set.contains(a) && set.contains(b));
        let result = MutualExclusionValidator::new(kind.exclusive).validate(&set);
        prop_assert_eq!(result.is_err(), conflict);
    }

    #[test]
    fn version_specifier_display_parses_back(n in 1u32..100_000) {
        let spec = VersionSpecifier::Number(VersionNumber::new(n).unwrap());
        prop_assert_eq!(spec.to_string().parse::<VersionSpecifier>().unwrap(), spec);
    }
}

#[test]
fn every_kind_round_trips_a_noop_update() {
    for kind in catalog::ALL {
        let base = baseline(kind, 7);
        let raw: BTreeMap<&'static str, OptionalValue<String>> = kind
            .fields()
            .map(|d| (d.field, OptionalValue::from_parts(false, String::new())))
            .collect();
        let overrides = kind.bind(&raw).unwrap();
        assert_eq!(
            overlay(base.clone(), &overrides, &OptionalValue::unset()),
            base,
            "{}",
            kind.id
        );
    }
}

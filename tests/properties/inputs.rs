//! Input overrides survive the trip through the store.

use std::collections::BTreeMap;

use proptest::prelude::*;
use serde_json::{json, Value};

use keel::domain::ports::{keys, AssumeYes, InstanceStore, NoopEventSink};
use keel::domain::value_objects::Inputs;
use keel::infrastructure::{ManifestLoader, MemoryInstanceStore};
use keel::{DeployRequest, DeployUseCase, InputOverride};

fn input_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i32>().prop_map(|n| json!(n)),
        any::<bool>().prop_map(|b| json!(b)),
        "[a-zA-Z0-9 ._-]{0,16}".prop_map(|s| json!(s)),
    ]
}

fn input_map() -> impl Strategy<Value = BTreeMap<String, Value>> {
    proptest::collection::btree_map("[a-z][a-z0-9_]{0,10}", input_value(), 0..6)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: an override is what later reads from the store return.
    #[test]
    fn property_override_round_trips(map in input_map()) {
        let uc = DeployUseCase::new(MemoryInstanceStore::new(), ManifestLoader::new());
        let text = serde_json::to_string(&map).unwrap();
        let request = DeployRequest::new()
            .with_template("app.yaml")
            .with_inputs(InputOverride::Text(text));

        let outcome = uc.bootstrap(&request, &AssumeYes, &NoopEventSink).unwrap();
        let resolved = outcome.resolved().cloned().unwrap();

        let stored = Inputs::from_stored(&uc.store().read(keys::INPUTS).unwrap()).unwrap();
        prop_assert_eq!(&stored, &resolved.inputs);
        prop_assert_eq!(stored.to_value(), json!(map));

        // A second run without an override reads back the same values.
        let again = uc
            .bootstrap(&DeployRequest::new(), &AssumeYes, &NoopEventSink)
            .unwrap();
        prop_assert_eq!(&again.resolved().unwrap().inputs, &resolved.inputs);
    }

    /// PROPERTY: repeating the same bootstrap leaves the same store behind.
    #[test]
    fn property_bootstrap_is_idempotent(map in input_map()) {
        let uc = DeployUseCase::new(MemoryInstanceStore::new(), ManifestLoader::new());
        let request = DeployRequest::new()
            .with_template("app.yaml")
            .with_inputs(InputOverride::Text(serde_json::to_string(&map).unwrap()));

        uc.bootstrap(&request, &AssumeYes, &NoopEventSink).unwrap();
        let first = uc.store().snapshot();
        uc.bootstrap(&request, &AssumeYes, &NoopEventSink).unwrap();

        prop_assert_eq!(uc.store().snapshot(), first);
    }
}

//! Bootstrap decisions over arbitrary store contents.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use proptest::prelude::*;

use keel::domain::ports::{keys, Confirmer, NoopEventSink};
use keel::infrastructure::{ManifestLoader, MemoryInstanceStore};
use keel::{
    DeployOutcome, DeployRequest, DeployUseCase, InputOverride, KeelError, KeelResult, NoOpReason,
};

/// Answers with a fixed value and counts prompts.
struct CountingConfirmer {
    answer: bool,
    prompts: AtomicUsize,
}

impl CountingConfirmer {
    fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: AtomicUsize::new(0),
        }
    }

    fn prompts(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

impl Confirmer for CountingConfirmer {
    fn confirm(&self, _prompt: &str) -> KeelResult<bool> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer)
    }
}

fn record_key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(keys::ROOT_FILE.to_string()),
        Just(keys::INPUTS.to_string()),
        "[a-z]{1,8}".prop_map(|name| format!("{}/{}.json", keys::INSTANCES, name)),
    ]
}

fn store_contents() -> impl Strategy<Value = BTreeMap<String, String>> {
    proptest::collection::btree_map(record_key(), "[ -~]{0,24}", 0..5)
}

fn use_case(
    records: &BTreeMap<String, String>,
) -> DeployUseCase<MemoryInstanceStore, ManifestLoader> {
    let store = MemoryInstanceStore::with_records(records.clone());
    DeployUseCase::new(store, ManifestLoader::new())
}

fn has_instances(records: &BTreeMap<String, String>) -> bool {
    records.keys().any(|key| key.starts_with("instances/"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: resume together with force is always rejected and the store is untouched.
    #[test]
    fn property_resume_and_force_rejected(
        records in store_contents(),
        workers in -4i64..16,
        answer in any::<bool>(),
    ) {
        let uc = use_case(&records);
        let confirmer = CountingConfirmer::new(answer);
        let request = DeployRequest::new()
            .with_template("app.yaml")
            .with_workers(workers)
            .with_resume(true)
            .with_force(true);

        let result = uc.bootstrap(&request, &confirmer, &NoopEventSink);

        prop_assert!(matches!(result, Err(KeelError::ConflictingFlags)));
        prop_assert_eq!(confirmer.prompts(), 0);
        prop_assert_eq!(uc.store().snapshot(), records);
    }

    /// PROPERTY: fewer than one worker is rejected and the store is untouched.
    #[test]
    fn property_non_positive_workers_rejected(
        records in store_contents(),
        workers in i64::MIN..1,
        resume in any::<bool>(),
    ) {
        let uc = use_case(&records);
        let request = DeployRequest::new()
            .with_template("app.yaml")
            .with_workers(workers)
            .with_resume(resume);

        let result = uc.bootstrap(&request, &CountingConfirmer::new(true), &NoopEventSink);

        prop_assert!(matches!(result, Err(KeelError::InvalidWorkers(w)) if w == workers));
        prop_assert_eq!(uc.store().snapshot(), records);
    }

    /// PROPERTY: without an instance model every valid flag combination proceeds unprompted.
    #[test]
    fn property_empty_model_never_prompts(
        resume in any::<bool>(),
        workers in 1i64..64,
    ) {
        let uc = use_case(&BTreeMap::new());
        let confirmer = CountingConfirmer::new(false);
        let request = DeployRequest::new()
            .with_template("app.yaml")
            .with_workers(workers)
            .with_resume(resume)
            .with_force(!resume);

        let outcome = uc.bootstrap(&request, &confirmer, &NoopEventSink).unwrap();

        prop_assert_eq!(confirmer.prompts(), 0);
        let resolved = outcome.resolved().cloned().unwrap();
        prop_assert_eq!(resolved.workers.get() as i64, workers);
    }

    /// PROPERTY: an existing model without resume/force is a silent no-op.
    #[test]
    fn property_existing_model_without_flags_is_noop(records in store_contents()) {
        prop_assume!(has_instances(&records));
        let uc = use_case(&records);
        let confirmer = CountingConfirmer::new(true);
        let request = DeployRequest::new().with_template("other.yaml");

        let outcome = uc.bootstrap(&request, &confirmer, &NoopEventSink).unwrap();

        prop_assert_eq!(outcome, DeployOutcome::NoOp(NoOpReason::InstanceExists));
        prop_assert_eq!(confirmer.prompts(), 0);
        prop_assert_eq!(uc.store().snapshot(), records);
    }

    /// PROPERTY: a declined force leaves the store exactly as it was.
    #[test]
    fn property_declined_force_changes_nothing(records in store_contents()) {
        prop_assume!(has_instances(&records));
        let uc = use_case(&records);
        let request = DeployRequest::new().with_template("other.yaml").with_force(true);

        let outcome = uc
            .bootstrap(&request, &CountingConfirmer::new(false), &NoopEventSink)
            .unwrap();

        prop_assert!(outcome.is_noop());
        prop_assert_eq!(uc.store().snapshot(), records);
    }

    /// PROPERTY: a confirmed force removes every instance record.
    #[test]
    fn property_confirmed_force_clears_instances(records in store_contents()) {
        prop_assume!(has_instances(&records));
        let uc = use_case(&records);
        let request = DeployRequest::new()
            .with_template("app.yaml")
            .with_inputs(InputOverride::Text("{}".to_string()))
            .with_force(true);

        let outcome = uc
            .bootstrap(&request, &CountingConfirmer::new(true), &NoopEventSink)
            .unwrap();

        prop_assert!(!outcome.is_noop());
        let snapshot = uc.store().snapshot();
        prop_assert!(!snapshot.keys().any(|key| key.starts_with("instances/")));
        prop_assert_eq!(snapshot.get(keys::ROOT_FILE).map(String::as_str), Some("app.yaml"));
    }
}

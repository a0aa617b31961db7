use std::sync::LazyLock;
use vetted::{
    core::validate::{Issue, NarrowError, ValidateError},
    prelude::*,
};
use vetted_testing_fixtures::{OSCAL_NS, RMF_NS, schema_builder};

static REGISTRY: LazyLock<ModelRegistry> =
    LazyLock::new(|| schema_builder().build().expect("fixture schema should build"));

// ============================================================================
// Helpers
// ============================================================================

const UUID: &str = "8f1e9d1c-2a4b-4c6d-9e8f-0a1b2c3d4e5f";

fn validator() -> Validator<'static> {
    Validator::new(&REGISTRY)
}

fn prop(name: &str, value: &str) -> Record {
    Record::new("oscal::Property")
        .with("name", name)
        .with("value", value)
}

fn props(items: Vec<Record>) -> FieldValue {
    FieldValue::list(items)
}

fn resource(items: Vec<Record>) -> Record {
    Record::new("oscal::Resource")
        .with("uuid", UUID)
        .with("props", props(items))
}

fn prop_paths(record: &Record) -> Vec<&'static str> {
    match record.get("props") {
        Some(FieldValue::List(items)) => items
            .iter()
            .filter_map(FieldValue::as_record)
            .map(|r| r.path)
            .collect(),
        _ => Vec::new(),
    }
}

fn narrowing_failure(err: &ValidateError, key: &str) -> NarrowError {
    match err.issues_at(key) {
        [Issue::NarrowingFailure(e)] => e.clone(),
        other => panic!("expected one narrowing failure at '{key}', got {other:?}"),
    }
}

// ============================================================================
// Resource property
// ============================================================================

#[test]
fn resource_property_rules() {
    let rp = |name: &str, value: &str| {
        prop(name, value)
            .with("ns", OSCAL_NS)
            .retag("oscal::OscalResourceProperty")
    };
    let validator = validator();

    assert!(validator.check_allowed(&rp("type", "logo")).unwrap().is_valid());
    assert!(validator.check_allowed(&rp("version", "9")).unwrap().is_valid());

    let outcome = validator.check_allowed(&rp("type", "bogus")).unwrap();
    let failures = outcome.failures();
    assert_eq!(failures.len(), 1);

    let type_rule = &failures[0].rules[1];
    let expected = type_rule.expected.get("value").unwrap();
    assert!(expected.contains(&Literal::Text("logo")));
    assert!(expected.contains(&Literal::Text("image")));
}

#[test]
fn resource_props_narrow_to_resource_property() {
    let doc = resource(vec![
        prop("type", "logo"),
        prop("version", "9"),
        prop("published", "2024-03-01T12:00:00Z"),
    ]);

    let out = validator().construct(doc).unwrap();

    assert_eq!(prop_paths(&out.record), vec!["oscal::OscalResourceProperty"; 3]);
    assert!(out.mutations.contains(&Mutation::DefaultApplied {
        path: "props[0].ns".to_string(),
        value: Literal::Text(OSCAL_NS),
    }));
}

#[test]
fn bogus_resource_type_is_rejected_with_its_attempts() {
    let err = validator()
        .construct(resource(vec![prop("type", "bogus")]))
        .unwrap_err();

    let NarrowError::NoMatchingCandidate { attempts, .. } = narrowing_failure(&err, "props[0]")
    else {
        panic!("expected a candidate mismatch");
    };
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].candidate, "oscal::OscalResourceProperty");
    assert!(attempts[0].reason.contains("value=\"bogus\""));
}

#[test]
fn published_property_needs_a_timestamp() {
    let err = validator()
        .construct(resource(vec![prop("published", "last tuesday")]))
        .unwrap_err();

    let NarrowError::NoMatchingCandidate { attempts, .. } = narrowing_failure(&err, "props[0]")
    else {
        panic!("expected a candidate mismatch");
    };
    assert!(attempts[0].reason.contains("published-timestamp"));
}

#[test]
fn one_bad_prop_fails_the_whole_list() {
    let err = validator()
        .construct(resource(vec![prop("type", "logo"), prop("type", "bogus")]))
        .unwrap_err();

    assert!(err.issues_at("props[0]").is_empty());
    assert_eq!(err.issues_at("props[1]").len(), 1);
}

#[test]
fn constructed_output_is_stable() {
    let validator = validator();
    let first = validator
        .construct(resource(vec![prop("type", "image")]))
        .unwrap();

    let second = validator.construct(first.record.clone()).unwrap();

    assert_eq!(second.record, first.record);
    assert!(
        !second
            .mutations
            .iter()
            .any(|m| matches!(m, Mutation::Narrowed { .. }))
    );
}

// ============================================================================
// Candidate order and namespaces
// ============================================================================

#[test]
fn parameter_props_pick_oscal_before_rmf() {
    let param = Record::new("oscal::Parameter").with("id", "ac-1_prm_1").with(
        "props",
        props(vec![
            prop("label", "a"),
            prop("aggregates", "ac-1_prm_2").with("ns", RMF_NS),
        ]),
    );

    let out = validator().construct(param).unwrap();

    assert_eq!(
        prop_paths(&out.record),
        vec!["oscal::OscalParameterProperty", "rmf::RmfParameterProperty"]
    );
}

#[test]
fn assessment_method_namespace_decides_the_subtype() {
    let part = Record::new("oscal::Part").with("name", "assessment-method").with(
        "props",
        props(vec![
            prop("method", "TEST"),
            prop("method", "EXAMINE").with("ns", RMF_NS),
        ]),
    );

    let out = validator().construct(part).unwrap();

    assert_eq!(
        prop_paths(&out.record),
        vec![
            "oscal::OscalAssessmentMethodProperty",
            "rmf::RmfAssessmentMethodProperty"
        ]
    );
}

#[test]
fn location_type_needs_every_rule_field() {
    let location = |items| {
        Record::new("oscal::Location")
            .with("uuid", UUID)
            .with("props", props(items))
    };
    let validator = validator();

    validator
        .construct(location(vec![
            prop("type", "data-center").with("class", "primary"),
        ]))
        .unwrap();

    let err = validator
        .construct(location(vec![prop("type", "data-center")]))
        .unwrap_err();
    assert!(matches!(
        narrowing_failure(&err, "props[0]"),
        NarrowError::NoMatchingCandidate { .. }
    ));
}

// ============================================================================
// Deprecation
// ============================================================================

fn control(items: Vec<Record>) -> Record {
    Record::new("oscal::Control")
        .with("id", "ac-1")
        .with("title", "Policy and Procedures")
        .with("props", props(items))
}

#[test]
fn capitalised_withdrawn_is_accepted_with_a_notice() {
    let out = validator()
        .construct(control(vec![prop("status", "Withdrawn")]))
        .unwrap();

    assert_eq!(prop_paths(&out.record), vec!["oscal::OscalControlProperty"]);
    assert_eq!(
        out.notices,
        vec![Notice::Deprecated {
            path: "props[0].value".to_string(),
            record: "oscal::OscalControlProperty",
            value: Literal::Text("Withdrawn"),
            replacement: "withdrawn",
        }]
    );
}

#[test]
fn reject_policy_refuses_capitalised_withdrawn() {
    let config = ValidatorConfig::from_toml_str(r#"deprecated = "reject""#).unwrap();
    let validator = Validator::with_config(&REGISTRY, config);

    validator
        .construct(control(vec![prop("status", "withdrawn")]))
        .unwrap();

    let err = validator
        .construct(control(vec![prop("status", "Withdrawn")]))
        .unwrap_err();
    narrowing_failure(&err, "props[0]");
}

// ============================================================================
// Whole documents
// ============================================================================

#[test]
fn catalog_reports_failures_from_every_branch() {
    let metadata = Record::new("oscal::Metadata")
        .with("title", "Test Catalog")
        .with("last-modified", "2024-03-01T12:00:00-05:00")
        .with("version", "1.0")
        .with("props", props(vec![prop("keywords", "access")]));

    let catalog = Record::new("oscal::Catalog")
        .with("uuid", UUID)
        .with("metadata", metadata)
        .with(
            "controls",
            FieldValue::list(vec![
                control(vec![prop("label", "AC-1")]),
                control(vec![prop("status", "gone")]),
            ]),
        )
        .with("resources", FieldValue::list(vec![resource(vec![prop("type", "nope")])]));

    let err = validator().construct(catalog).unwrap_err();
    let issues = err.issues().unwrap();

    assert_eq!(
        issues.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["controls[1].props[0]", "resources[0].props[0]"]
    );
}

#[test]
fn catalog_fills_metadata_defaults() {
    let metadata = Record::new("oscal::Metadata")
        .with("title", "Test Catalog")
        .with("last-modified", "2024-03-01T12:00:00Z")
        .with("version", "1.0");
    let catalog = Record::new("oscal::Catalog")
        .with("uuid", UUID)
        .with("metadata", metadata);

    let out = validator().construct(catalog).unwrap();

    assert!(out.mutations.contains(&Mutation::DefaultApplied {
        path: "metadata.oscal-version".to_string(),
        value: Literal::Text("1.1.2"),
    }));
}

use crate::{NODES, OSCAL_NS, schema_builder};
use vetted::{
    error::{ErrorKind, ErrorOrigin},
    prelude::*,
};

// Nodes in this crate are registered through `record!`, so the global
// registry must agree with the explicit builder.
#[test]
fn global_registry_matches_builder() {
    let global = vetted::registry().unwrap();
    let private = schema_builder().build().unwrap();

    assert_eq!(private.len(), NODES.len());
    for model in private.iter() {
        let registered = global.get(model.path).unwrap();

        assert_eq!(registered.ancestors, model.ancestors);
        assert_eq!(registered.rules, model.rules);
        assert_eq!(registered.candidates, model.candidates);
        assert_eq!(registered.groups, model.groups);
    }
}

#[test]
fn every_property_subtype_inherits_the_namespace_rule() {
    let registry = vetted::registry().unwrap();

    for model in registry.iter() {
        if model.path.starts_with("oscal::Oscal") {
            assert!(registry.is_a(model.path, "oscal::OscalProperty"));
            assert!(
                model
                    .rules
                    .iter()
                    .any(|r| r.origin == "oscal::OscalProperty"),
                "{} lost the namespace rule",
                model.path
            );
        }
    }
}

#[test]
fn construct_uses_the_global_registry() {
    let doc = Record::new("oscal::Resource")
        .with("uuid", "8f1e9d1c-2a4b-4c6d-9e8f-0a1b2c3d4e5f")
        .with(
            "props",
            FieldValue::list(vec![
                Record::new("oscal::Property")
                    .with("name", "type")
                    .with("value", "logo"),
            ]),
        );

    let out = vetted::construct(doc).unwrap();

    let Some(FieldValue::List(props)) = out.record.get("props") else {
        panic!("props should stay a list");
    };
    let prop = props[0].as_record().unwrap();
    assert_eq!(prop.path, "oscal::OscalResourceProperty");
    assert_eq!(prop.scalar("ns").map(Scalar::lexical).as_deref(), Some(OSCAL_NS));
}

#[test]
fn rejected_documents_carry_keyed_issues() {
    let doc = Record::new("oscal::Party")
        .with("uuid", "8f1e9d1c-2a4b-4c6d-9e8f-0a1b2c3d4e5f")
        .with("type", "person")
        .with(
            "props",
            FieldValue::list(vec![
                Record::new("oscal::Property")
                    .with("name", "shoe-size")
                    .with("value", "9"),
            ]),
        );

    let err = vetted::construct(doc).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Rejected);
    assert_eq!(err.origin, ErrorOrigin::Validate);
    assert_eq!(err.issues_at("props[0]").len(), 1);

    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["kind"], "Rejected");
    assert!(json["issues"]["props[0]"][0]
        .as_str()
        .unwrap()
        .contains("oscal::OscalPartyProperty"));
}

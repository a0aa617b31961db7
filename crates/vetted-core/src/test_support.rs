//! Hand-built runtime models for unit tests. Composition normally happens in
//! the schema crate; here every model is written out already composed.

use crate::{
    model::{
        AllowedValueRule, CandidateEntry, CustomCheck, FieldModel, ModelRegistry, RecordModel,
        RuleField,
    },
    record::{FieldValue, Record},
    types::ScalarKind,
    value::{AllowedValue, Literal},
};

pub(crate) const PROPERTY: &str = "test::Property";
pub(crate) const RESOURCE_PROPERTY: &str = "test::ResourceProperty";
pub(crate) const LOOSE_PROPERTY: &str = "test::LooseProperty";
pub(crate) const STATUS_PROPERTY: &str = "test::StatusProperty";
pub(crate) const RESOURCE: &str = "test::Resource";
pub(crate) const CONTROL: &str = "test::Control";
pub(crate) const CATALOG: &str = "test::Catalog";
pub(crate) const NODE: &str = "test::Node";

pub(crate) const DEFAULT_NS: &str = "http://example.org/ns";

const PROPERTY_FIELDS: [FieldModel; 3] = [
    FieldModel::scalar("name", ScalarKind::Token),
    FieldModel::scalar("ns", ScalarKind::Uri)
        .opt()
        .with_default(Literal::Text(DEFAULT_NS)),
    FieldModel::scalar("value", ScalarKind::Text),
];

// { {name:[version]}, {name:[type], value:[logo, image]} }
const RESOURCE_PROPERTY_RULES: [AllowedValueRule; 2] = [
    AllowedValueRule::new(
        RESOURCE_PROPERTY,
        &[RuleField::new("name", &[AllowedValue::text("version")])],
    ),
    AllowedValueRule::new(
        RESOURCE_PROPERTY,
        &[
            RuleField::new("name", &[AllowedValue::text("type")]),
            RuleField::new(
                "value",
                &[AllowedValue::text("logo"), AllowedValue::text("image")],
            ),
        ],
    ),
];

const STATUS_PROPERTY_RULES: [AllowedValueRule; 1] = [AllowedValueRule::new(
    STATUS_PROPERTY,
    &[
        RuleField::new("name", &[AllowedValue::text("status")]),
        RuleField::new(
            "value",
            &[
                AllowedValue::text("withdrawn"),
                Literal::Text("Withdrawn").deprecated("withdrawn"),
            ],
        ),
    ],
)];

fn title_not_blank(record: &Record) -> Result<(), String> {
    match record.scalar("title") {
        Some(title) if title.lexical().trim().is_empty() => Err("title is blank".to_string()),
        _ => Ok(()),
    }
}

fn property(path: &'static str, rules: &[AllowedValueRule]) -> RecordModel {
    let ancestors = if path == PROPERTY {
        Vec::new()
    } else {
        vec![PROPERTY]
    };

    RecordModel::new(
        path,
        PROPERTY_FIELDS.to_vec(),
        rules.to_vec(),
        Vec::new(),
        Vec::new(),
    )
    .with_ancestors(ancestors)
}

/// Registry with a property hierarchy, two containers narrowing `props`,
/// a catalog nesting resources, and a self-recursive node.
pub(crate) fn registry() -> ModelRegistry {
    registry_with_order(&[RESOURCE_PROPERTY, STATUS_PROPERTY, LOOSE_PROPERTY])
}

/// Same registry, with the resource's candidate order supplied.
pub(crate) fn registry_with_order(resource_candidates: &[&'static str]) -> ModelRegistry {
    let props = FieldModel::record("props", PROPERTY).many();

    let resource = RecordModel::new(
        RESOURCE,
        vec![
            FieldModel::record("link", PROPERTY).opt(),
            props,
            FieldModel::scalar("title", ScalarKind::Text),
        ],
        Vec::new(),
        vec![
            CandidateEntry::new("link", [LOOSE_PROPERTY]),
            CandidateEntry::new("props", resource_candidates.iter().copied()),
        ],
        vec![CustomCheck::new("title-not-blank", title_not_blank)],
    );

    let control = RecordModel::new(
        CONTROL,
        vec![props],
        Vec::new(),
        vec![CandidateEntry::new("props", [RESOURCE_PROPERTY])],
        Vec::new(),
    );

    let catalog = RecordModel::new(
        CATALOG,
        vec![FieldModel::record("resources", RESOURCE).many()],
        Vec::new(),
        Vec::new(),
        Vec::new(),
    );

    let node = RecordModel::new(
        NODE,
        vec![FieldModel::record("child", NODE).opt()],
        Vec::new(),
        Vec::new(),
        Vec::new(),
    );

    [
        property(PROPERTY, &[]),
        property(RESOURCE_PROPERTY, &RESOURCE_PROPERTY_RULES),
        property(STATUS_PROPERTY, &STATUS_PROPERTY_RULES),
        property(LOOSE_PROPERTY, &[]),
        resource,
        control,
        catalog,
        node,
    ]
    .into_iter()
    .collect()
}

/// Untyped property data, as a parser would hand it over.
pub(crate) fn prop(name: &str, value: &str) -> Record {
    Record::new(PROPERTY).with("name", name).with("value", value)
}

pub(crate) fn resource(props: Vec<Record>) -> Record {
    Record::new(RESOURCE)
        .with("title", "Logo")
        .with("props", FieldValue::list(props))
}

/// A chain of `depth` nested nodes.
pub(crate) fn chain(depth: usize) -> Record {
    (1..depth).fold(Record::new(NODE), |child, _| {
        Record::new(NODE).with("child", child)
    })
}

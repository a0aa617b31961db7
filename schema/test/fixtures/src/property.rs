use crate::{OSCAL_NS, RMF_NS};
use vetted::{core::types::DateTimeWithTimezone, design::prelude::*};

record!(
    ///
    /// Property
    /// Name/value pair qualified by a namespace. Carries no rules itself.
    ///
    pub PROPERTY = RecordNode::new("oscal::Property").fields(&[
        Field::scalar("name", ScalarKind::Token),
        Field::scalar("uuid", ScalarKind::Uuid).opt(),
        Field::scalar("ns", ScalarKind::Uri)
            .opt()
            .default(Literal::Text(OSCAL_NS)),
        Field::scalar("value", ScalarKind::Text),
        Field::scalar("class", ScalarKind::Token).opt(),
        Field::scalar("remarks", ScalarKind::MarkupMultiline).opt(),
    ])
);

// ============================================================================
// OSCAL
// ============================================================================

record!(
    pub OSCAL_PROPERTY = RecordNode::new("oscal::OscalProperty")
        .parent("oscal::Property")
        .rules(&[Rule::new(&[RuleField::new(
            "ns",
            &[AllowedValue::text(OSCAL_NS)],
        )])])
);

record!(
    pub OSCAL_MARKING_PROPERTY = RecordNode::new("oscal::OscalMarkingProperty")
        .parent("oscal::OscalProperty")
        .rules(&[Rule::new(&[RuleField::new(
            "name",
            &[AllowedValue::text("marking")],
        )])])
);

record!(
    pub OSCAL_LOCATION_PROPERTY = RecordNode::new("oscal::OscalLocationProperty")
        .parent("oscal::OscalProperty")
        .rules(&[Rule::new(&[
            RuleField::new("name", &[AllowedValue::text("type")]),
            RuleField::new("value", &[AllowedValue::text("data-center")]),
            RuleField::new(
                "class",
                &[AllowedValue::text("primary"), AllowedValue::text("alternate")],
            ),
        ])])
);

record!(
    pub OSCAL_PARTY_PROPERTY = RecordNode::new("oscal::OscalPartyProperty")
        .parent("oscal::OscalProperty")
        .rules(&[Rule::new(&[RuleField::new(
            "name",
            &[
                AllowedValue::text("mail-stop"),
                AllowedValue::text("office"),
                AllowedValue::text("job-title"),
            ],
        )])])
);

/// Resource types a `type` property may name.
pub const RESOURCE_TYPES: &[AllowedValue] = &[
    AllowedValue::text("logo"),
    AllowedValue::text("image"),
    AllowedValue::text("screen-shot"),
    AllowedValue::text("law"),
    AllowedValue::text("regulation"),
    AllowedValue::text("standard"),
    AllowedValue::text("external-guidance"),
    AllowedValue::text("acronyms"),
    AllowedValue::text("citation"),
    AllowedValue::text("policy"),
    AllowedValue::text("procedure"),
    AllowedValue::text("system-guide"),
    AllowedValue::text("users-guide"),
    AllowedValue::text("administrators-guide"),
    AllowedValue::text("rules-of-behavior"),
    AllowedValue::text("plan"),
    AllowedValue::text("artifact"),
    AllowedValue::text("evidence"),
    AllowedValue::text("tool-output"),
    AllowedValue::text("raw-data"),
    AllowedValue::text("interview-notes"),
    AllowedValue::text("questionnaire"),
    AllowedValue::text("report"),
    AllowedValue::text("agreement"),
];

// a `published` property must carry an RFC 3339 timestamp with offset
fn published_is_timestamp(record: &Record) -> Result<(), String> {
    let name = record.scalar("name").map(|s| s.lexical());
    if name.as_deref() != Some("published") {
        return Ok(());
    }

    let value = record.scalar("value").map(|s| s.lexical()).unwrap_or_default();
    DateTimeWithTimezone::try_new(value)
        .map(|_| ())
        .map_err(|e| format!("'published' must be a timestamp with timezone: {e}"))
}

record!(
    pub OSCAL_RESOURCE_PROPERTY = RecordNode::new("oscal::OscalResourceProperty")
        .parent("oscal::OscalProperty")
        .rules(&[
            Rule::new(&[RuleField::new("name", &[AllowedValue::text("version")])]),
            Rule::new(&[
                RuleField::new("name", &[AllowedValue::text("type")]),
                RuleField::new("value", RESOURCE_TYPES),
            ]),
            Rule::new(&[RuleField::new("name", &[AllowedValue::text("published")])]),
        ])
        .checks(&[CustomCheck::new("published-timestamp", published_is_timestamp)])
);

record!(
    pub OSCAL_PARAMETER_PROPERTY = RecordNode::new("oscal::OscalParameterProperty")
        .parent("oscal::OscalProperty")
        .rules(&[Rule::new(&[RuleField::new(
            "name",
            &[
                AllowedValue::text("label"),
                AllowedValue::text("sort-id"),
                AllowedValue::text("alt-identifier"),
                AllowedValue::text("alt-label"),
            ],
        )])])
);

record!(
    pub OSCAL_PART_PROPERTY = RecordNode::new("oscal::OscalPartProperty")
        .parent("oscal::OscalProperty")
        .rules(&[Rule::new(&[RuleField::new(
            "name",
            &[
                AllowedValue::text("label"),
                AllowedValue::text("sort-id"),
                AllowedValue::text("alt-identifier"),
            ],
        )])])
);

record!(
    pub OSCAL_CONTROL_PROPERTY = RecordNode::new("oscal::OscalControlProperty")
        .parent("oscal::OscalProperty")
        .rules(&[
            Rule::new(&[RuleField::new(
                "name",
                &[
                    AllowedValue::text("label"),
                    AllowedValue::text("sort-id"),
                    AllowedValue::text("alt-identifier"),
                ],
            )]),
            Rule::new(&[
                RuleField::new("name", &[AllowedValue::text("status")]),
                RuleField::new(
                    "value",
                    &[
                        AllowedValue::text("withdrawn"),
                        Literal::Text("Withdrawn").deprecated("withdrawn"),
                    ],
                ),
            ]),
        ])
);

record!(
    pub OSCAL_METADATA_PROPERTY = RecordNode::new("oscal::OscalMetadataProperty")
        .parent("oscal::OscalProperty")
        .rules(&[Rule::new(&[RuleField::new(
            "name",
            &[AllowedValue::text("keywords")],
        )])])
);

/// Assessment methods shared by the OSCAL and RMF method properties.
pub const ASSESSMENT_METHODS: &[AllowedValue] = &[
    AllowedValue::text("INTERVIEW"),
    AllowedValue::text("EXAMINE"),
    AllowedValue::text("TEST"),
];

record!(
    pub OSCAL_ASSESSMENT_METHOD_PROPERTY = RecordNode::new("oscal::OscalAssessmentMethodProperty")
        .parent("oscal::OscalProperty")
        .rules(&[Rule::new(&[
            RuleField::new("name", &[AllowedValue::text("method")]),
            RuleField::new("value", ASSESSMENT_METHODS),
        ])])
);

record!(
    pub OSCAL_GROUP_PROPERTY = RecordNode::new("oscal::OscalGroupProperty")
        .parent("oscal::OscalProperty")
        .rules(&[Rule::new(&[RuleField::new(
            "name",
            &[
                AllowedValue::text("overview"),
                AllowedValue::text("instruction"),
            ],
        )])])
);

// ============================================================================
// RMF
// ============================================================================

record!(
    pub RMF_PROPERTY = RecordNode::new("rmf::RmfProperty")
        .parent("oscal::Property")
        .rules(&[Rule::new(&[RuleField::new(
            "ns",
            &[AllowedValue::text(RMF_NS)],
        )])])
);

record!(
    pub RMF_PARAMETER_PROPERTY = RecordNode::new("rmf::RmfParameterProperty")
        .parent("rmf::RmfProperty")
        .rules(&[Rule::new(&[RuleField::new(
            "name",
            &[AllowedValue::text("aggregates")],
        )])])
);

record!(
    pub RMF_ASSESSMENT_METHOD_PROPERTY = RecordNode::new("rmf::RmfAssessmentMethodProperty")
        .parent("rmf::RmfProperty")
        .rules(&[Rule::new(&[
            RuleField::new("name", &[AllowedValue::text("method")]),
            RuleField::new("value", ASSESSMENT_METHODS),
        ])])
);

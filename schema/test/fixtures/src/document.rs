use vetted::design::prelude::*;

// Every `props` field holds base properties; the candidate lists say which
// property subtypes each place accepts, tried in order.

const fn props() -> Field {
    Field::record("props", "oscal::Property").many()
}

record!(
    pub LINK = RecordNode::new("oscal::Link").fields(&[
        Field::scalar("href", ScalarKind::UriReference),
        Field::scalar("rel", ScalarKind::Token).opt(),
        Field::scalar("media-type", ScalarKind::MediaType).opt(),
        Field::scalar("text", ScalarKind::MarkupLine).opt(),
    ])
);

record!(
    ///
    /// Part
    /// Prose within a control. Assessment method parts carry method props.
    ///
    pub PART = RecordNode::new("oscal::Part")
        .fields(&[
            Field::scalar("id", ScalarKind::Token).opt(),
            Field::scalar("name", ScalarKind::Token),
            Field::scalar("ns", ScalarKind::Uri).opt(),
            Field::scalar("title", ScalarKind::MarkupLine).opt(),
            props(),
            Field::scalar("prose", ScalarKind::MarkupMultiline).opt(),
            Field::record("parts", "oscal::Part").many(),
            Field::record("links", "oscal::Link").many(),
        ])
        .candidates(&[Candidate::new(
            "props",
            &[
                "oscal::OscalPartProperty",
                "oscal::OscalAssessmentMethodProperty",
                "rmf::RmfAssessmentMethodProperty",
            ],
        )])
);

record!(
    pub PARAMETER = RecordNode::new("oscal::Parameter")
        .fields(&[
            Field::scalar("id", ScalarKind::Token),
            Field::scalar("class", ScalarKind::Token).opt(),
            props(),
            Field::scalar("label", ScalarKind::MarkupLine).opt(),
            Field::scalar("usage", ScalarKind::MarkupMultiline).opt(),
        ])
        .candidates(&[Candidate::new(
            "props",
            &["oscal::OscalParameterProperty", "rmf::RmfParameterProperty"],
        )])
);

record!(
    pub CONTROL = RecordNode::new("oscal::Control")
        .fields(&[
            Field::scalar("id", ScalarKind::Token),
            Field::scalar("class", ScalarKind::Token).opt(),
            Field::scalar("title", ScalarKind::MarkupLine),
            Field::record("params", "oscal::Parameter").many(),
            props(),
            Field::record("links", "oscal::Link").many(),
            Field::record("parts", "oscal::Part").many(),
            Field::record("controls", "oscal::Control").many(),
        ])
        .candidates(&[Candidate::new("props", &["oscal::OscalControlProperty"])])
);

record!(
    pub GROUP = RecordNode::new("oscal::Group")
        .fields(&[
            Field::scalar("id", ScalarKind::Token).opt(),
            Field::scalar("class", ScalarKind::Token).opt(),
            Field::scalar("title", ScalarKind::MarkupLine),
            props(),
            Field::record("parts", "oscal::Part").many(),
            Field::record("groups", "oscal::Group").many(),
            Field::record("controls", "oscal::Control").many(),
        ])
        .candidates(&[Candidate::new("props", &["oscal::OscalGroupProperty"])])
);

record!(
    pub LOCATION = RecordNode::new("oscal::Location")
        .fields(&[
            Field::scalar("uuid", ScalarKind::Uuid),
            Field::scalar("title", ScalarKind::MarkupLine).opt(),
            props(),
        ])
        .candidates(&[Candidate::new("props", &["oscal::OscalLocationProperty"])])
);

record!(
    pub PARTY = RecordNode::new("oscal::Party")
        .fields(&[
            Field::scalar("uuid", ScalarKind::Uuid),
            Field::scalar("type", ScalarKind::Token),
            Field::scalar("name", ScalarKind::Text).opt(),
            props(),
        ])
        .candidates(&[Candidate::new("props", &["oscal::OscalPartyProperty"])])
);

record!(
    pub METADATA = RecordNode::new("oscal::Metadata")
        .fields(&[
            Field::scalar("title", ScalarKind::MarkupLine),
            Field::scalar("published", ScalarKind::DateTimeWithTimezone).opt(),
            Field::scalar("last-modified", ScalarKind::DateTimeWithTimezone),
            Field::scalar("version", ScalarKind::Text),
            Field::scalar("oscal-version", ScalarKind::Text).default(Literal::Text("1.1.2")),
            props(),
            Field::record("links", "oscal::Link").many(),
            Field::record("locations", "oscal::Location").many(),
            Field::record("parties", "oscal::Party").many(),
        ])
        .candidates(&[Candidate::new(
            "props",
            &[
                "oscal::OscalMetadataProperty",
                "oscal::OscalMarkingProperty",
            ],
        )])
);

record!(
    pub RESOURCE = RecordNode::new("oscal::Resource")
        .fields(&[
            Field::scalar("uuid", ScalarKind::Uuid),
            Field::scalar("title", ScalarKind::MarkupLine).opt(),
            Field::scalar("description", ScalarKind::MarkupMultiline).opt(),
            props(),
            Field::scalar("remarks", ScalarKind::MarkupMultiline).opt(),
        ])
        .candidates(&[Candidate::new("props", &["oscal::OscalResourceProperty"])])
);

record!(
    pub CATALOG = RecordNode::new("oscal::Catalog").fields(&[
        Field::scalar("uuid", ScalarKind::Uuid),
        Field::record("metadata", "oscal::Metadata"),
        Field::record("params", "oscal::Parameter").many(),
        Field::record("controls", "oscal::Control").many(),
        Field::record("groups", "oscal::Group").many(),
        Field::record("resources", "oscal::Resource").many(),
    ])
);

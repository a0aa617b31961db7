//! OSCAL and RMF record vocabulary used by the end-to-end tests.
//!
//! - `property`: the property family, one subtype per place a property can
//!   appear, each narrowing the allowed names and values.
//! - `document`: catalog records whose `props` lists narrow to those subtypes.

pub mod document;
pub mod property;

use vetted::schema::{build::SchemaBuilder, node::RecordNode};

/// OSCAL namespace; also the default for a property's `ns`.
pub const OSCAL_NS: &str = "http://csrc.nist.gov/ns/oscal";

/// RMF namespace.
pub const RMF_NS: &str = "http://csrc.nist.gov/ns/rmf";

/// Every fixture node, for callers that want a private registry.
pub const NODES: &[RecordNode] = &[
    property::PROPERTY,
    property::OSCAL_PROPERTY,
    property::OSCAL_MARKING_PROPERTY,
    property::OSCAL_LOCATION_PROPERTY,
    property::OSCAL_PARTY_PROPERTY,
    property::OSCAL_RESOURCE_PROPERTY,
    property::OSCAL_PARAMETER_PROPERTY,
    property::OSCAL_PART_PROPERTY,
    property::OSCAL_CONTROL_PROPERTY,
    property::OSCAL_METADATA_PROPERTY,
    property::OSCAL_ASSESSMENT_METHOD_PROPERTY,
    property::OSCAL_GROUP_PROPERTY,
    property::RMF_PROPERTY,
    property::RMF_PARAMETER_PROPERTY,
    property::RMF_ASSESSMENT_METHOD_PROPERTY,
    document::LINK,
    document::PART,
    document::PARAMETER,
    document::CONTROL,
    document::GROUP,
    document::LOCATION,
    document::PARTY,
    document::METADATA,
    document::RESOURCE,
    document::CATALOG,
];

/// A builder holding every fixture node.
#[must_use]
pub fn schema_builder() -> SchemaBuilder {
    SchemaBuilder::new().records(NODES.iter().copied())
}

#[cfg(test)]
mod tests;

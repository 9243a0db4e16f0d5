//! Unit tests for `fields` sideloading.

use super::{
    FieldIncludeRegistry, OrganizationSummary, SpaceDecorator, SpaceOrganizationDecorator,
    SpaceScoped, SpaceSummary,
};
use crate::message::domain::FieldsSelection;
use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::{Map, Value, json};

struct Instance {
    space: SpaceSummary,
}

impl SpaceScoped for Instance {
    fn space(&self) -> &SpaceSummary {
        &self.space
    }
}

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0)
        .single()
        .expect("valid date")
}

fn organization(guid: &str, name: &str, day: u32) -> OrganizationSummary {
    OrganizationSummary {
        guid: guid.to_owned(),
        name: name.to_owned(),
        created_at: at(day),
    }
}

fn instance_in(guid: &str, day: u32, org: OrganizationSummary) -> Instance {
    Instance {
        space: SpaceSummary {
            guid: guid.to_owned(),
            name: format!("{guid}-name"),
            created_at: at(day),
            organization: org,
        },
    }
}

/// Three instances over two spaces, listed newest space first.
#[fixture]
fn instances() -> Vec<Instance> {
    let acme = organization("org-a", "acme", 1);
    let globex = organization("org-b", "globex", 2);
    vec![
        instance_in("space-2", 5, globex),
        instance_in("space-1", 3, acme.clone()),
        instance_in("space-1", 3, acme),
    ]
}

fn decorate(fields: &FieldsSelection, resources: &[Instance]) -> Value {
    let mut hash = Map::new();
    hash.insert("resources".to_owned(), json!([]));
    FieldIncludeRegistry::for_fields(fields).decorate(&mut hash, resources);
    Value::Object(hash)
}

#[rstest]
fn spaces_are_distinct_and_ordered_by_creation(instances: Vec<Instance>) {
    let fields = FieldsSelection::new().with("space", ["guid"]);

    assert_eq!(
        decorate(&fields, &instances).pointer("/included"),
        Some(&json!({ "spaces": [{ "guid": "space-1" }, { "guid": "space-2" }] }))
    );
}

#[rstest]
fn space_relationships_only_when_requested(instances: Vec<Instance>) {
    let fields = FieldsSelection::new().with("space", ["relationship.organization"]);

    assert_eq!(
        decorate(&fields, &instances).pointer("/included/spaces"),
        Some(&json!([
            { "relationships": { "organization": { "data": { "guid": "org-a" } } } },
            { "relationships": { "organization": { "data": { "guid": "org-b" } } } }
        ]))
    );
}

#[rstest]
fn organizations_emit_the_requested_intersection(instances: Vec<Instance>) {
    let fields = FieldsSelection::new().with("space.organization", ["name", "region"]);

    assert_eq!(
        decorate(&fields, &instances).pointer("/included"),
        Some(&json!({ "organizations": [{ "name": "acme" }, { "name": "globex" }] }))
    );
}

#[rstest]
fn both_sections_share_the_included_object(instances: Vec<Instance>) {
    let fields = FieldsSelection::new()
        .with("space", ["guid"])
        .with("space.organization", ["guid"]);
    let decorated = decorate(&fields, &instances);

    assert_eq!(decorated.pointer("/resources"), Some(&json!([])));
    assert_eq!(
        decorated.pointer("/included/organizations"),
        Some(&json!([{ "guid": "org-a" }, { "guid": "org-b" }]))
    );
    assert_eq!(
        decorated.pointer("/included/spaces"),
        Some(&json!([{ "guid": "space-1" }, { "guid": "space-2" }]))
    );
}

#[rstest]
#[case(FieldsSelection::new())]
#[case(FieldsSelection::new().with("space", ["name"]))]
#[case(FieldsSelection::new().with("space.organization", ["created_at"]))]
fn unmatched_selections_add_nothing(instances: Vec<Instance>, #[case] fields: FieldsSelection) {
    let registry = FieldIncludeRegistry::<Instance>::for_fields(&fields);

    assert!(registry.is_empty());
    assert!(decorate(&fields, &instances).get("included").is_none());
}

#[rstest]
fn registry_orders_space_before_organization() {
    let fields = FieldsSelection::new()
        .with("space.organization", ["name"])
        .with("space", ["guid"]);
    let registry = FieldIncludeRegistry::<Instance>::for_fields(&fields);

    assert_eq!(
        registry.relations().collect::<Vec<_>>(),
        ["space", "space.organization"]
    );
}

#[rstest]
fn decorators_match_on_any_emitted_attribute() {
    let space = FieldsSelection::new().with("space", ["name", "guid"]);
    let organization = FieldsSelection::new().with("space.organization", ["guid"]);

    assert!(SpaceDecorator::matches(&space));
    assert!(!SpaceDecorator::matches(&organization));
    assert!(SpaceOrganizationDecorator::matches(&organization));
    assert!(SpaceOrganizationDecorator::for_fields(&space).is_none());
}

#[rstest]
fn empty_resource_lists_still_emit_sections() {
    let fields = FieldsSelection::new().with("space", ["guid"]);

    assert_eq!(
        decorate(&fields, &[]).pointer("/included"),
        Some(&json!({ "spaces": [] }))
    );
}

//! Declarative message schemas.
//!
//! A schema names every accepted key, the shape each key's value is
//! normalized into, and the constraints checked against it. Schemas are
//! built once per message type and shared read-only afterwards.

use super::{
    fields::{FieldInclusion, quote_list},
    keys::{AllowedKeySet, RegistryError},
    order_by::DEFAULT_ORDER_BY_FIELDS,
};

/// Whether a message reads a query string or a request body.
///
/// The distinction only changes the wording of the unknown-key error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Filter/sort parameters of a list endpoint.
    List,
    /// JSON body of a create or update endpoint.
    Body,
}

impl MessageKind {
    /// Formats the whole-message error for unexpected keys.
    #[must_use]
    pub fn unknown_keys_message<'a>(self, keys: impl IntoIterator<Item = &'a str>) -> String {
        let label = match self {
            Self::List => "Unknown query parameter(s)",
            Self::Body => "Unknown field(s)",
        };
        format!("{label}: {}", quote_list(keys))
    }
}

/// The canonical shape a field's raw value is normalized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Comma-delimited string or sequence of strings.
    CommaList,
    /// Sequence of strings; strings are not split.
    Array,
    /// Single string.
    Text,
    /// Resource identifier string.
    Guid,
    /// Integral number; numeric strings are accepted.
    Integer,
    /// Timestamp filter: instant, comma list, or operator map.
    Timestamps,
    /// Label selector expression.
    LabelSelector,
    /// Sort column with optional `-` prefix.
    OrderBy,
    /// `fields[relation]=…` sideload selection.
    Fields(&'static [FieldInclusion]),
    /// Free-form JSON object.
    Object,
    /// `{labels: {…}, annotations: {…}}` object.
    Metadata,
    /// Object whose value at the given path must be a GUID.
    Reference(&'static [&'static str]),
}

/// A constraint checked once a field's value has the right shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Must be present and non-blank.
    Required,
    /// Integer strictly greater than zero.
    Positive,
    /// Integer greater than or equal to the bound.
    AtLeast(i64),
    /// Integer between 1 and the configured page-size limit.
    PerPageLimit,
    /// List with exactly `count` items.
    ExactItems {
        /// Required number of items.
        count: usize,
        /// Error text when the count differs.
        message: &'static str,
    },
    /// String equal to one of the listed values.
    OneOf(&'static [&'static str]),
    /// String no longer than the bound.
    MaxLength(usize),
    /// Absolute URI.
    Uri,
    /// Absolute `https` URI.
    HttpsUri,
    /// List whose combined item length stays within the configured limit.
    CombinedLength,
}

/// One accepted key and how it is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    key: &'static str,
    kind: FieldKind,
    rules: Vec<FieldRule>,
}

impl FieldSpec {
    /// Declares a field.
    #[must_use]
    pub const fn new(key: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            kind,
            rules: Vec::new(),
        }
    }

    /// Adds a constraint.
    #[must_use]
    pub fn with_rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// The parameter key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// The value shape.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Constraints in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }
}

/// When `trigger` is present, the `excluded` keys become unknown.
///
/// Used for nested routes: `app_guid` scopes a list to one app, so the
/// broader scoping filters are rejected as if they did not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExclusionRule {
    trigger: &'static str,
    excluded: &'static [&'static str],
}

impl ExclusionRule {
    /// The key whose presence activates the rule.
    #[must_use]
    pub const fn trigger(&self) -> &'static str {
        self.trigger
    }

    /// Returns `true` when `key` is excluded by this rule.
    #[must_use]
    pub fn excludes(&self, key: &str) -> bool {
        self.excluded.contains(&key)
    }
}

/// Two keys that may not be supplied together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictRule {
    first: &'static str,
    second: &'static str,
}

impl ConflictRule {
    /// The two conflicting keys.
    #[must_use]
    pub const fn keys(&self) -> (&'static str, &'static str) {
        (self.first, self.second)
    }
}

/// A registered key that is rejected whenever it is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisallowedParam {
    key: &'static str,
    message: &'static str,
}

impl DisallowedParam {
    /// The rejected key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// The whole-message error text.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.message
    }
}

/// The registered definition of one message type.
#[derive(Debug, Clone)]
pub struct MessageSchema {
    name: &'static str,
    kind: MessageKind,
    keys: AllowedKeySet,
    fields: Vec<FieldSpec>,
    order_by_fields: &'static [&'static str],
    exclusions: Vec<ExclusionRule>,
    conflicts: Vec<ConflictRule>,
    disallowed: Vec<DisallowedParam>,
}

impl MessageSchema {
    /// Starts a schema for list-endpoint query parameters.
    #[must_use]
    pub fn list(name: &'static str) -> MessageSchemaBuilder {
        MessageSchemaBuilder::new(name, MessageKind::List)
    }

    /// Starts a schema for a request body.
    #[must_use]
    pub fn body(name: &'static str) -> MessageSchemaBuilder {
        MessageSchemaBuilder::new(name, MessageKind::Body)
    }

    /// Schema name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// List or body message.
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        self.kind
    }

    /// The closed key set.
    #[must_use]
    pub const fn keys(&self) -> &AllowedKeySet {
        &self.keys
    }

    /// Field declarations in registration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Looks up a field declaration.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.key == key)
    }

    /// Columns `order_by` may name.
    #[must_use]
    pub const fn order_by_fields(&self) -> &'static [&'static str] {
        self.order_by_fields
    }

    /// Nested-route exclusion rules.
    #[must_use]
    pub fn exclusions(&self) -> &[ExclusionRule] {
        &self.exclusions
    }

    /// Mutually exclusive key pairs.
    #[must_use]
    pub fn conflicts(&self) -> &[ConflictRule] {
        &self.conflicts
    }

    /// Keys rejected whenever supplied.
    #[must_use]
    pub fn disallowed(&self) -> &[DisallowedParam] {
        &self.disallowed
    }
}

/// Builder for [`MessageSchema`].
#[derive(Debug, Clone)]
pub struct MessageSchemaBuilder {
    name: &'static str,
    kind: MessageKind,
    fields: Vec<FieldSpec>,
    order_by_fields: &'static [&'static str],
    exclusions: Vec<ExclusionRule>,
    conflicts: Vec<ConflictRule>,
    disallowed: Vec<DisallowedParam>,
}

impl MessageSchemaBuilder {
    const fn new(name: &'static str, kind: MessageKind) -> Self {
        Self {
            name,
            kind,
            fields: Vec::new(),
            order_by_fields: DEFAULT_ORDER_BY_FIELDS,
            exclusions: Vec::new(),
            conflicts: Vec::new(),
            disallowed: Vec::new(),
        }
    }

    /// Adds a field declaration.
    #[must_use]
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Adds a comma-delimited list filter.
    #[must_use]
    pub fn comma_list(self, key: &'static str) -> Self {
        self.field(FieldSpec::new(key, FieldKind::CommaList))
    }

    /// Adds a timestamp filter.
    #[must_use]
    pub fn timestamps(self, key: &'static str) -> Self {
        self.field(FieldSpec::new(key, FieldKind::Timestamps))
    }

    /// Adds `page`, `per_page` and `order_by`.
    #[must_use]
    pub fn pagination(self) -> Self {
        self.field(FieldSpec::new("page", FieldKind::Integer).with_rule(FieldRule::Positive))
            .field(
                FieldSpec::new("per_page", FieldKind::Integer).with_rule(FieldRule::PerPageLimit),
            )
            .field(FieldSpec::new("order_by", FieldKind::OrderBy))
    }

    /// Adds the `created_ats` and `updated_ats` timestamp filters.
    #[must_use]
    pub fn audit_timestamps(self) -> Self {
        self.timestamps("created_ats").timestamps("updated_ats")
    }

    /// Adds `label_selector`.
    #[must_use]
    pub fn label_selector(self) -> Self {
        self.field(FieldSpec::new("label_selector", FieldKind::LabelSelector))
    }

    /// Adds `fields` with the given sideloadable relations.
    #[must_use]
    pub fn fields(self, inclusions: &'static [FieldInclusion]) -> Self {
        self.field(FieldSpec::new("fields", FieldKind::Fields(inclusions)))
    }

    /// Adds the `metadata` object.
    #[must_use]
    pub fn metadata(self) -> Self {
        self.field(FieldSpec::new("metadata", FieldKind::Metadata))
    }

    /// Overrides the sortable columns.
    #[must_use]
    pub const fn order_by_fields(mut self, fields: &'static [&'static str]) -> Self {
        self.order_by_fields = fields;
        self
    }

    /// Treats `excluded` keys as unknown whenever `trigger` is present.
    #[must_use]
    pub fn exclusive_when_present(
        mut self,
        trigger: &'static str,
        excluded: &'static [&'static str],
    ) -> Self {
        self.exclusions.push(ExclusionRule { trigger, excluded });
        self
    }

    /// Rejects requests that supply both keys.
    #[must_use]
    pub fn conflicting(mut self, first: &'static str, second: &'static str) -> Self {
        self.conflicts.push(ConflictRule { first, second });
        self
    }

    /// Rejects a registered key whenever it is supplied.
    #[must_use]
    pub fn disallow(mut self, key: &'static str, message: &'static str) -> Self {
        self.disallowed.push(DisallowedParam { key, message });
        self
    }

    /// Finishes the schema.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when a key is declared twice or is empty.
    pub fn build(self) -> Result<MessageSchema, RegistryError> {
        let keys = AllowedKeySet::register(self.fields.iter().map(FieldSpec::key))?;
        Ok(MessageSchema {
            name: self.name,
            kind: self.kind,
            keys,
            fields: self.fields,
            order_by_fields: self.order_by_fields,
            exclusions: self.exclusions,
            conflicts: self.conflicts,
            disallowed: self.disallowed,
        })
    }

    /// Finishes a schema declared in a static.
    ///
    /// # Panics
    ///
    /// Panics when the declaration is inconsistent. Schemas are fixed at
    /// compile time, so this fires on first use in any test that touches the
    /// message type.
    #[must_use]
    pub fn register(self) -> MessageSchema {
        let name = self.name;
        self.build()
            .unwrap_or_else(|err| panic!("invalid message schema '{name}': {err}"))
    }
}

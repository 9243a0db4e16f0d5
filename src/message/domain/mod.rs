//! Domain types for request messages.
//!
//! Pure value types with no infrastructure dependencies: raw parameters,
//! key sets, schemas, filters, and the normalized values built from them.

mod fields;
mod keys;
mod label;
mod label_selector;
mod metadata;
mod order_by;
mod params;
mod schema;
mod timestamp;
mod value;

pub(crate) use fields::quote_list;
pub use fields::{FieldInclusion, FieldsSelection};
pub use keys::{AllowedKeySet, RegistryError};
pub use label::{LabelKey, LabelKeyError, LabelLimits, LabelValueError, validate_label_value};
pub use label_selector::{LabelRequirement, LabelSelector, LabelSelectorError};
pub use metadata::MetadataRequest;
pub use order_by::{DEFAULT_ORDER_BY_FIELDS, OrderBy, OrderDirection};
pub use params::{ParamMap, ParamValue, ParamsError, RawParams, Scalar};
pub use schema::{
    ConflictRule, DisallowedParam, ExclusionRule, FieldKind, FieldRule, FieldSpec, MessageKind,
    MessageSchema, MessageSchemaBuilder,
};
pub use timestamp::{
    ParseTimestampOperatorError, TIMESTAMP_FORMAT, TimestampFilter, TimestampFilters,
    TimestampOperator, format_timestamp, parse_timestamp,
};
pub use value::{FieldInput, FieldValue, TimestampInput};

//! Selects the decorators a `fields` selection asks for.

use super::{
    decorators::{FieldIncludeDecorator, SpaceDecorator, SpaceOrganizationDecorator},
    domain::SpaceScoped,
};
use crate::message::domain::FieldsSelection;
use serde_json::{Map, Value};

/// Dispatches `fields` selections to the decorators of space-scoped resources.
pub struct FieldIncludeRegistry<R> {
    decorators: Vec<Box<dyn FieldIncludeDecorator<R>>>,
}

impl<R: SpaceScoped> FieldIncludeRegistry<R> {
    /// Builds the decorators matching `fields`, in a fixed order.
    #[must_use]
    pub fn for_fields(fields: &FieldsSelection) -> Self {
        let mut decorators: Vec<Box<dyn FieldIncludeDecorator<R>>> = Vec::new();
        if let Some(space) = SpaceDecorator::for_fields(fields) {
            decorators.push(Box::new(space));
        }
        if let Some(organization) = SpaceOrganizationDecorator::for_fields(fields) {
            decorators.push(Box::new(organization));
        }
        Self { decorators }
    }

    /// Returns `true` when no decorator matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decorators.is_empty()
    }

    /// Relations that will be emitted.
    pub fn relations(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.decorators
            .iter()
            .map(|decorator| decorator.inclusion().relation())
    }

    /// Applies every matching decorator to `hash`.
    pub fn decorate(&self, hash: &mut Map<String, Value>, resources: &[R]) {
        for decorator in &self.decorators {
            decorator.decorate(hash, resources);
        }
    }
}

impl<R> std::fmt::Debug for FieldIncludeRegistry<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldIncludeRegistry")
            .field("decorators", &self.decorators.len())
            .finish()
    }
}

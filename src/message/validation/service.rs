//! Composite validator.
//!
//! Runs every parameter validator in a fixed order, collecting errors so
//! that callers see every problem at once.

use crate::message::{
    error::ValidationErrors,
    normalization::Candidate,
    ports::validator::{MessageConfig, ParamValidator, ValidationResult},
    validation::{
        metadata::MetadataValidator,
        rules::{
            AllowedKeysValidator, ConflictValidator, ConstraintValidator, DisallowedValidator,
            FieldsValidator, LabelSelectorValidator, OrderByValidator, ReferenceValidator,
            TimestampValidator, TypeValidator,
        },
    },
};

/// The ordered validator pipeline.
///
/// Whole-message checks run first, then shape checks, then per-field
/// constraints and filter grammar.
///
/// # Examples
///
/// ```
/// use plinth::message::list::ServiceInstancesListMessage;
/// use plinth::message::normalization::normalize;
/// use plinth::message::domain::RawParams;
/// use plinth::message::validation::ValidatorSet;
/// use plinth::message::RequestMessage;
///
/// let raw = RawParams::new().with("names", "db").with("flavor", "x");
/// let candidate = normalize(ServiceInstancesListMessage::schema(), &raw);
/// let errors = ValidatorSet::new().run(&candidate);
/// assert_eq!(errors.base(), vec!["Unknown query parameter(s): 'flavor'"]);
/// ```
pub struct ValidatorSet {
    config: MessageConfig,
    validators: Vec<Box<dyn ParamValidator>>,
}

impl ValidatorSet {
    /// Creates the pipeline with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MessageConfig::default())
    }

    /// Creates the pipeline with custom limits.
    #[must_use]
    pub fn with_config(config: MessageConfig) -> Self {
        let validators: Vec<Box<dyn ParamValidator>> = vec![
            Box::new(AllowedKeysValidator),
            Box::new(DisallowedValidator),
            Box::new(ConflictValidator),
            Box::new(TypeValidator::new(&config)),
            Box::new(ConstraintValidator::new(&config)),
            Box::new(ReferenceValidator::new(&config)),
            Box::new(TimestampValidator),
            Box::new(LabelSelectorValidator::new(&config)),
            Box::new(OrderByValidator),
            Box::new(FieldsValidator),
            Box::new(MetadataValidator::new(&config)),
        ];
        Self { config, validators }
    }

    /// Returns the limits in use.
    #[must_use]
    pub const fn config(&self) -> &MessageConfig {
        &self.config
    }

    /// Names of the validators in run order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.validators.iter().map(|validator| validator.name())
    }

    /// Runs every validator and returns the collected errors.
    #[must_use]
    pub fn run(&self, candidate: &Candidate) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for validator in &self.validators {
            if let Err(found) = validator.validate(candidate) {
                errors.extend(found);
            }
        }
        errors
    }
}

impl Default for ValidatorSet {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ValidatorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorSet")
            .field("config", &self.config)
            .field("validators", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

impl ParamValidator for ValidatorSet {
    fn name(&self) -> &'static str {
        "validator_set"
    }

    fn validate(&self, candidate: &Candidate) -> ValidationResult<()> {
        self.run(candidate).into_result()
    }
}

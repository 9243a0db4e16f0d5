//! Actor details attached to audit events.

use serde::{Deserialize, Serialize};

/// Who performed an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAuditInfo {
    user_guid: String,
    user_name: Option<String>,
    user_email: Option<String>,
}

impl UserAuditInfo {
    /// Creates actor details for `user_guid`.
    #[must_use]
    pub fn new(user_guid: impl Into<String>) -> Self {
        Self {
            user_guid: user_guid.into(),
            user_name: None,
            user_email: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, user_email: impl Into<String>) -> Self {
        self.user_email = Some(user_email.into());
        self
    }

    /// The actor's GUID.
    #[must_use]
    pub fn user_guid(&self) -> &str {
        &self.user_guid
    }

    /// The actor's display name, when known.
    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    /// The actor's email address, when known.
    #[must_use]
    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref()
    }
}

/// Audited actions on service instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceInstanceEventAction {
    /// A user-provided instance was created.
    Create,
}

impl ServiceInstanceEventAction {
    /// Event type recorded in the audit trail.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "audit.user_provided_service_instance.create",
        }
    }
}

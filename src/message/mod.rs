//! Request messages: validated, typed views of untrusted parameters.
//!
//! Raw query-string or JSON parameters are normalized against a message
//! type's schema, checked by an ordered validator pipeline, and wrapped in
//! an immutable message that downstream actions read.
//!
//! # Architecture
//!
//! - **Domain**: raw parameters, schemas, filters ([`domain::RawParams`],
//!   [`domain::MessageSchema`], [`domain::LabelSelector`], etc.)
//! - **Normalization**: raw values resolved into field shapes
//! - **Ports**: the [`ports::ParamValidator`] interface and its limits
//! - **Validation**: individual validators and the [`validation::ValidatorSet`]
//! - **Messages**: concrete [`list`] and [`create`] message types
//!
//! # Example
//!
//! ```
//! use plinth::message::RequestMessage;
//! use plinth::message::domain::RawParams;
//! use plinth::message::list::{ListMessage, ProcessesListMessage};
//!
//! let raw = RawParams::from_query("types=web,%20worker&order_by=-created_at&page=2");
//! let message = ProcessesListMessage::from_params(&raw);
//!
//! assert!(message.is_valid());
//! assert_eq!(message.types(), Some(&["web".to_owned(), "worker".to_owned()][..]));
//! assert_eq!(message.pagination().page, 2);
//! ```

pub mod create;
pub mod domain;
pub mod error;
pub mod list;
pub mod normalization;
pub mod parsed;
pub mod ports;
pub mod validation;

pub use parsed::{ParsedMessage, RequestMessage};

#[cfg(test)]
mod tests;

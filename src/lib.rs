//! Budget Tracker client is the browser-side interaction layer of the Budget
//! Tracker web app, modelled as a typed library.
//!
//! A [Page] holds the tables, forms and modals the server rendered. Events
//! (clicks, submissions and field changes) are delivered to a single
//! [Controller], which validates forms, asks for confirmation before
//! destructive actions, calls the backend through a [Transport] and patches
//! the page with the result. Outcomes are reported through a
//! [NotificationSurface].

#![warn(missing_docs)]

mod config;
mod confirm;
mod controller;
mod endpoints;
mod format;
mod logging;
mod notification;
mod page;
mod registry;
mod resource;
mod timezone;
mod transport;
mod validation;

#[cfg(test)]
mod test_utils;

pub use config::{ClientConfig, DEFAULT_SERVER_URL, DEFAULT_TIMEZONE, SERVER_URL_VAR, TIMEZONE_VAR};
pub use confirm::{
    ConfirmationFlow, ConfirmationPrompt, ConfirmationState, ConfirmationSurface, Decision,
    ModalConfirmation, PendingAction, PromptConfirmation, Presentation,
};
pub use controller::{ActionOutcome, Controller, SubmitOutcome};
pub use endpoints::{format_endpoint, format_report_endpoint, resolve};
pub use format::{format_currency, format_date, format_date_str};
pub use logging::{LOG_BODY_LENGTH_LIMIT, init as init_logging};
pub use notification::{
    ConsoleSurface, Notification, NotificationSurface, Severity, Toast, ToastRegion, ToastSurface,
};
pub use page::{EditCategoryModal, Page, Row, Table};
pub use registry::{ActionRegistry, Command, Dataset, Handler};
pub use resource::{CategoryId, CategoryName, ResourceId, ResourceKind};
pub use timezone::{get_local_offset, today_in};
pub use transport::{ApiResponse, HttpTransport, PostRequest, Transport, TransportError};
pub use validation::{
    ADD_CATEGORY_FORM, BUDGET_FORM, Field, Form, InputType, TRANSACTION_FORM, ValidationError,
    refine_field, validate_form,
};

/// The errors that may occur in the client.
///
/// These are contract errors between the page markup, the caller and the
/// client. Failures that the user should see (invalid input, rejected or
/// failed requests) are reported through the notification surface instead.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// No handler is registered for the element's `data-action`.
    #[error("no handler registered for action \"{0}\"")]
    UnknownAction(String),

    /// The element that triggered an action is missing a data attribute the
    /// action needs, e.g. `data-id` on a delete button.
    #[error("the element is missing the \"data-{0}\" attribute")]
    MissingData(&'static str),

    /// A resource kind string did not name a transaction or category.
    #[error("\"{0}\" is not a resource kind")]
    UnknownResourceKind(String),

    /// A resource ID was empty.
    #[error("resource ID cannot be empty")]
    EmptyResourceId,

    /// A category ID was not exactly four characters long.
    #[error("Category ID must be exactly 4 characters.")]
    InvalidCategoryId(String),

    /// An empty string was used as a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// The configured timezone is not a canonical timezone name.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),
}

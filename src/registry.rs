//! Delegated event handling.
//!
//! Every clickable element in the page carries a `data-action` attribute. The
//! [ActionRegistry] maps that value to a [Handler], which reads the element's
//! other data attributes and decides which [Command] the controller should
//! run.

use std::collections::{BTreeMap, HashMap};

use crate::{
    Error,
    confirm::PendingAction,
    resource::{ResourceId, ResourceKind},
};

/// The data attributes of an element, without the `data-` prefix.
pub type Dataset = BTreeMap<String, String>;

/// Turns an element's dataset into a [Command].
pub type Handler = fn(&Dataset) -> Result<Command, Error>;

/// What the controller should do in response to a click.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Ask the user to confirm deleting a resource.
    RequestDelete(PendingAction),
    /// The user confirmed the pending deletion of this kind.
    ConfirmDelete(ResourceKind),
    /// The user cancelled the pending deletion of this kind.
    CancelDelete(ResourceKind),
    /// Open the edit-category modal with these values.
    OpenCategoryEditor {
        /// The category being edited.
        id: ResourceId,
        /// The current name.
        name: String,
    },
    /// Send the values in the edit-category modal.
    SaveCategoryEdit,
    /// Close the edit-category modal without saving.
    CloseCategoryEditor,
    /// Navigate to a report download.
    ExportReport {
        /// The report to export, e.g. "current".
        report_type: String,
        /// The file format, e.g. "csv".
        format: String,
    },
    /// Show or hide the characters of a password input.
    TogglePassword {
        /// The id of the input.
        input_id: String,
    },
    /// Remove a toast before its timer does.
    DismissToast(u64),
}

/// Maps `data-action` values to handlers.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    handlers: HashMap<String, Handler>,
}

impl ActionRegistry {
    /// Create a registry with no handlers.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Handle elements with `data-action="{action}"` with `handler`, replacing
    /// any existing handler.
    pub fn register(&mut self, action: &str, handler: Handler) {
        self.handlers.insert(action.to_owned(), handler);
    }

    /// Whether a handler is registered for `action`.
    pub fn contains(&self, action: &str) -> bool {
        self.handlers.contains_key(action)
    }

    /// Find the command for a click on an element with `data-action="{action}"`.
    ///
    /// # Errors
    ///
    /// Returns [Error::UnknownAction] if no handler is registered, or the
    /// handler's error if the dataset is incomplete.
    pub fn dispatch(&self, action: &str, dataset: &Dataset) -> Result<Command, Error> {
        let handler = self
            .handlers
            .get(action)
            .ok_or_else(|| Error::UnknownAction(action.to_owned()))?;

        handler(dataset)
    }
}

impl Default for ActionRegistry {
    /// A registry with the actions used by the page templates.
    fn default() -> Self {
        let mut registry = Self::empty();

        registry.register("delete-transaction", |dataset| {
            request_delete(ResourceKind::Transaction, dataset)
        });
        registry.register("delete-category", |dataset| {
            request_delete(ResourceKind::Category, dataset)
        });
        registry.register("confirm-delete", |dataset| {
            Ok(Command::ConfirmDelete(require(dataset, "kind")?.parse()?))
        });
        registry.register("cancel-delete", |dataset| {
            Ok(Command::CancelDelete(require(dataset, "kind")?.parse()?))
        });
        registry.register("edit-category", |dataset| {
            Ok(Command::OpenCategoryEditor {
                id: ResourceId::new(require(dataset, "id")?)?,
                name: dataset.get("name").cloned().unwrap_or_default(),
            })
        });
        registry.register("save-category", |_| Ok(Command::SaveCategoryEdit));
        registry.register("close-category-editor", |_| {
            Ok(Command::CloseCategoryEditor)
        });
        registry.register("export-report", |dataset| {
            Ok(Command::ExportReport {
                report_type: require(dataset, "report")?.to_owned(),
                format: require(dataset, "format")?.to_owned(),
            })
        });
        registry.register("toggle-password", |dataset| {
            Ok(Command::TogglePassword {
                input_id: require(dataset, "target")?.to_owned(),
            })
        });
        registry.register("dismiss-toast", |dataset| {
            require(dataset, "id")?
                .parse()
                .map(Command::DismissToast)
                .map_err(|_| Error::MissingData("id"))
        });

        registry
    }
}

fn require<'a>(dataset: &'a Dataset, key: &'static str) -> Result<&'a str, Error> {
    dataset
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .ok_or(Error::MissingData(key))
}

fn request_delete(kind: ResourceKind, dataset: &Dataset) -> Result<Command, Error> {
    let id = ResourceId::new(require(dataset, "id")?)?;

    Ok(Command::RequestDelete(PendingAction {
        kind,
        id,
        name: dataset.get("name").cloned(),
        date: dataset.get("date").cloned(),
        amount: dataset.get("amount").cloned(),
    }))
}

#[cfg(test)]
mod registry_tests {
    use crate::{
        Error,
        confirm::PendingAction,
        resource::{ResourceId, ResourceKind},
        test_utils::dataset,
    };

    use super::{ActionRegistry, Command, Dataset};

    #[test]
    fn delete_button_requests_confirmation() {
        let registry = ActionRegistry::default();

        let command = registry
            .dispatch(
                "delete-transaction",
                &dataset(&[("id", "42"), ("amount", "9.99"), ("date", "2025-01-02")]),
            )
            .unwrap();

        assert_eq!(
            command,
            Command::RequestDelete(PendingAction {
                amount: Some("9.99".to_owned()),
                date: Some("2025-01-02".to_owned()),
                ..PendingAction::new(ResourceKind::Transaction, ResourceId::new("42").unwrap())
            })
        );
    }

    #[test]
    fn delete_without_id_is_an_error() {
        let registry = ActionRegistry::default();

        let result = registry.dispatch("delete-category", &dataset(&[("name", "Food")]));

        assert_eq!(result, Err(Error::MissingData("id")));
    }

    #[test]
    fn unknown_action_is_an_error() {
        let registry = ActionRegistry::default();

        let result = registry.dispatch("launch-rocket", &Dataset::new());

        assert_eq!(result, Err(Error::UnknownAction("launch-rocket".to_owned())));
    }

    #[test]
    fn confirm_reads_kind() {
        let registry = ActionRegistry::default();

        assert_eq!(
            registry.dispatch("confirm-delete", &dataset(&[("kind", "category")])),
            Ok(Command::ConfirmDelete(ResourceKind::Category))
        );
        assert_eq!(
            registry.dispatch("cancel-delete", &dataset(&[("kind", "budget")])),
            Err(Error::UnknownResourceKind("budget".to_owned()))
        );
    }

    #[test]
    fn default_registry_handles_page_actions() {
        let registry = ActionRegistry::default();

        for action in [
            "delete-transaction",
            "delete-category",
            "confirm-delete",
            "cancel-delete",
            "edit-category",
            "save-category",
            "close-category-editor",
            "export-report",
            "toggle-password",
            "dismiss-toast",
        ] {
            assert!(registry.contains(action), "no handler for {action}");
        }

        assert!(!ActionRegistry::empty().contains("delete-transaction"));
    }

    #[test]
    fn registered_handler_replaces_default() {
        let mut registry = ActionRegistry::default();
        registry.register("save-category", |_| Ok(Command::CloseCategoryEditor));

        assert_eq!(
            registry.dispatch("save-category", &Dataset::new()),
            Ok(Command::CloseCategoryEditor)
        );
    }

    #[test]
    fn export_reads_report_and_format() {
        let registry = ActionRegistry::default();

        assert_eq!(
            registry.dispatch(
                "export-report",
                &dataset(&[("report", "current"), ("format", "pdf")])
            ),
            Ok(Command::ExportReport {
                report_type: "current".to_owned(),
                format: "pdf".to_owned(),
            })
        );
    }
}

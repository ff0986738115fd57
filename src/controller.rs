//! The controller that owns the page and responds to its events.

use time::OffsetDateTime;

use crate::{
    Error,
    config::ClientConfig,
    confirm::{ConfirmationSurface, Decision, PendingAction, PendingDeletions, Presentation},
    endpoints::{self, format_endpoint, format_report_endpoint, resolve},
    notification::{NotificationSurface, Severity},
    page::Page,
    registry::{ActionRegistry, Command, Dataset},
    resource::{CategoryId, CategoryName, ResourceId, ResourceKind},
    timezone::today_in,
    transport::{ApiResponse, PostRequest, Transport, TransportError},
    validation::{ADD_CATEGORY_FORM, refine_field, validate_form},
};

/// How a backend action ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The backend applied the action and the page was patched.
    Succeeded,
    /// The input was rejected before any request was sent.
    Invalid(String),
    /// The backend answered with `success: false` and this message.
    Rejected(String),
    /// The request failed or the response could not be read.
    Failed,
}

impl ActionOutcome {
    /// Whether the action took effect.
    pub fn is_success(&self) -> bool {
        matches!(self, ActionOutcome::Succeeded)
    }
}

/// What happened when a form was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The page has no form with that id.
    Ignored,
    /// Validation failed and the submission was stopped.
    Prevented,
    /// The form passed validation and the browser should submit it.
    Submitted,
    /// The form was sent asynchronously by the controller.
    Sent(ActionOutcome),
}

/// Owns the page and all page-lifetime state, and responds to the page's
/// events.
///
/// `T` sends requests to the backend, `N` shows notifications and `C` asks
/// the user to confirm deletions.
pub struct Controller<T, N, C> {
    config: ClientConfig,
    page: Page,
    transport: T,
    notifier: N,
    confirmation: C,
    registry: ActionRegistry,
    pending: PendingDeletions,
}

impl<T, N, C> Controller<T, N, C>
where
    T: Transport,
    N: NotificationSurface,
    C: ConfirmationSurface,
{
    /// Create a controller for `page` with the default action registry.
    pub fn new(config: ClientConfig, page: Page, transport: T, notifier: N, confirmation: C) -> Self {
        Self {
            config,
            page,
            transport,
            notifier,
            confirmation,
            registry: ActionRegistry::default(),
            pending: PendingDeletions::default(),
        }
    }

    /// Use `registry` to map clicks to commands.
    pub fn with_registry(mut self, registry: ActionRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The page.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// The page, for changes made outside of events, e.g. typing into the
    /// edit-category modal.
    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    /// The configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The notification surface.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// The deletion of `kind` waiting for confirmation, if any.
    pub fn pending(&self, kind: ResourceKind) -> Option<&PendingAction> {
        self.pending.flow(kind).pending()
    }

    /// Handle a click on an element with `data-action="{action}"` and the
    /// data attributes `dataset`.
    ///
    /// Returns the outcome of the backend action the click completed, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if no handler is registered for `action` or the
    /// element lacks data the action needs.
    pub async fn click(
        &mut self,
        action: &str,
        dataset: &Dataset,
    ) -> Result<Option<ActionOutcome>, Error> {
        let command = self
            .registry
            .dispatch(action, dataset)
            .inspect_err(|error| tracing::warn!("could not handle click on {action}: {error}"))?;

        self.run(command).await
    }

    /// Carry out `command`.
    ///
    /// # Errors
    ///
    /// Returns an error if the edit-category modal holds an empty ID.
    pub async fn run(&mut self, command: Command) -> Result<Option<ActionOutcome>, Error> {
        match command {
            Command::RequestDelete(action) => self.request_delete(action).await,
            Command::ConfirmDelete(kind) => Ok(self.answer(kind, true).await),
            Command::CancelDelete(kind) => Ok(self.answer(kind, false).await),
            Command::OpenCategoryEditor { id, name } => {
                if !self.page.show_category_editor(&id, &name) {
                    tracing::debug!("no edit-category modal on the page, ignoring edit of {id}");
                }
                Ok(None)
            }
            Command::SaveCategoryEdit => {
                let Some(modal) = &self.page.edit_category_modal else {
                    tracing::debug!("no edit-category modal on the page, nothing to save");
                    return Ok(None);
                };

                let id = ResourceId::new(&modal.category_id)?;
                let name = modal.category_name.clone();

                Ok(Some(self.edit_category(&id, &name).await))
            }
            Command::CloseCategoryEditor => {
                self.page.hide_category_editor();
                Ok(None)
            }
            Command::ExportReport {
                report_type,
                format,
            } => {
                self.export_report(&report_type, &format);
                Ok(None)
            }
            Command::TogglePassword { input_id } => {
                if !self.page.toggle_password_visibility(&input_id) {
                    tracing::debug!("no input {input_id} to toggle");
                }
                Ok(None)
            }
            Command::DismissToast(id) => {
                if let Some(region) = self.page.toast_region() {
                    region.dismiss(id);
                }
                Ok(None)
            }
        }
    }

    async fn request_delete(&mut self, action: PendingAction) -> Result<Option<ActionOutcome>, Error> {
        let kind = action.kind;
        let prompt = action.prompt();

        if let Some(replaced) = self.pending.flow_mut(kind).request(action) {
            tracing::debug!("replacing pending deletion of {kind} {}", replaced.id);
        }

        match self.confirmation.present(&prompt) {
            Presentation::Answered(confirmed) => Ok(self.answer(kind, confirmed).await),
            Presentation::Deferred => {
                self.page.show_delete_prompt(prompt);
                Ok(None)
            }
        }
    }

    async fn answer(&mut self, kind: ResourceKind, confirmed: bool) -> Option<ActionOutcome> {
        self.page.hide_delete_prompt(kind);

        match self.pending.flow_mut(kind).resolve(confirmed) {
            Some(Decision::Confirmed(action)) => Some(self.delete_resource(kind, &action.id).await),
            Some(Decision::Cancelled(action)) => {
                tracing::debug!("deletion of {kind} {} cancelled", action.id);
                None
            }
            None => {
                tracing::debug!("no pending deletion of {kind} to answer");
                None
            }
        }
    }

    /// Record a change to a field's value and check it.
    ///
    /// Future dates, negative amounts and invalid times are cleared and
    /// reported with a warning. Returns `false` if the value was rejected or
    /// the field does not exist.
    pub fn change(&mut self, form_id: &str, field_name: &str, value: &str) -> bool {
        let today = self.today();

        if !self.page.set_field_value(form_id, field_name, value) {
            tracing::debug!("no field {field_name} in form {form_id}");
            return false;
        }

        let Some(field) = self
            .page
            .form(form_id)
            .and_then(|form| form.field(field_name))
        else {
            return false;
        };

        match refine_field(field, today) {
            Ok(()) => true,
            Err(error) => {
                tracing::debug!("rejected {value:?} for {form_id}.{field_name}: {error}");
                self.page.set_field_value(form_id, field_name, "");
                self.notifier.notify(&error.to_string(), Severity::Warning);
                false
            }
        }
    }

    /// Handle submission of the form with element id `form_id`.
    ///
    /// Invalid forms are marked and stopped before any request is sent. The
    /// add-category form is sent by the controller; other valid forms are left
    /// for the browser to submit.
    pub async fn submit(&mut self, form_id: &str) -> SubmitOutcome {
        let Some(form) = self.page.form_mut(form_id) else {
            tracing::debug!("no form {form_id} to submit");
            return SubmitOutcome::Ignored;
        };

        form.was_validated = true;

        let valid = form.check_validity();
        if !valid {
            tracing::debug!(
                "form {form_id} has invalid fields: {:?}",
                form.invalid_fields()
            );
        }

        // Form rules explain what is wrong, so they run even when the
        // built-in checks have already failed.
        if let Err(error) = validate_form(form) {
            tracing::debug!("form {form_id} failed validation: {error}");
            self.notifier.notify(&error.to_string(), Severity::Warning);
            return SubmitOutcome::Prevented;
        }

        if !valid {
            return SubmitOutcome::Prevented;
        }

        if form_id == ADD_CATEGORY_FORM {
            let category_id = form.value("categoryId").to_owned();
            let category_name = form.value("categoryName").to_owned();

            return SubmitOutcome::Sent(self.add_category(&category_id, &category_name).await);
        }

        SubmitOutcome::Submitted
    }

    /// Delete the resource `id` of `kind` and remove its row.
    pub async fn delete_resource(&mut self, kind: ResourceKind, id: &ResourceId) -> ActionOutcome {
        let url = resolve(
            &self.config.server_url,
            &format_endpoint(kind.delete_endpoint(), id.as_ref()),
        );

        let response = self.transport.post(PostRequest { url, form: None }).await;

        match response {
            Ok(ApiResponse { success: true, .. }) => {
                if !self.page.remove_row(kind, id) {
                    tracing::debug!("row for {kind} {id} was already gone");
                }

                tracing::info!("deleted {kind} {id}");
                self.notifier.notify(
                    &format!("{} deleted successfully", kind.title()),
                    Severity::Success,
                );
                ActionOutcome::Succeeded
            }
            Ok(response) => self.rejected(&format!("deleting {kind}"), response),
            Err(error) => self.failed(&format!("deleting {kind}"), error),
        }
    }

    /// Rename the category `id` to `name` and patch its row.
    pub async fn edit_category(&mut self, id: &ResourceId, name: &str) -> ActionOutcome {
        let name = match CategoryName::new(name) {
            Ok(name) => name,
            Err(error) => return self.invalid(error),
        };

        let form = match serde_urlencoded::to_string([("categoryName", name.as_ref())]) {
            Ok(form) => form,
            Err(error) => {
                tracing::error!("could not encode category name: {error}");
                return ActionOutcome::Failed;
            }
        };

        let url = resolve(
            &self.config.server_url,
            &format_endpoint(endpoints::EDIT_CATEGORY, id.as_ref()),
        );

        let response = self
            .transport
            .post(PostRequest {
                url,
                form: Some(form),
            })
            .await;

        match response {
            Ok(ApiResponse { success: true, .. }) => {
                if !self.page.set_category_name(id, name.as_ref()) {
                    tracing::debug!("row for category {id} was already gone");
                }
                self.page.hide_category_editor();

                tracing::info!("renamed category {id} to {name}");
                self.notifier
                    .notify("Category updated successfully", Severity::Success);
                ActionOutcome::Succeeded
            }
            Ok(response) => self.rejected("updating category", response),
            Err(error) => self.failed("updating category", error),
        }
    }

    /// Create a category and add it to the page.
    ///
    /// `id` must have exactly four characters and `name` must not be empty;
    /// otherwise no request is sent.
    pub async fn add_category(&mut self, id: &str, name: &str) -> ActionOutcome {
        let category_id = match CategoryId::new(id) {
            Ok(category_id) => category_id,
            Err(error) => return self.invalid(error),
        };
        let category_name = match CategoryName::new(name) {
            Ok(category_name) => category_name,
            Err(error) => return self.invalid(error),
        };

        let form = match serde_urlencoded::to_string([
            ("categoryId", category_id.as_ref()),
            ("categoryName", category_name.as_ref()),
        ]) {
            Ok(form) => form,
            Err(error) => {
                tracing::error!("could not encode category: {error}");
                return ActionOutcome::Failed;
            }
        };

        let url = resolve(&self.config.server_url, endpoints::ADD_CATEGORY);

        let response = self
            .transport
            .post(PostRequest {
                url,
                form: Some(form),
            })
            .await;

        match response {
            Ok(response) if response.success => {
                let shown_id = response
                    .category_id
                    .as_deref()
                    .and_then(|id| ResourceId::new(id).ok())
                    .unwrap_or_else(|| ResourceId::from(category_id));
                let shown_name = response
                    .category_name
                    .as_deref()
                    .filter(|name| !name.is_empty())
                    .unwrap_or(category_name.as_ref());

                if !self.page.append_category(shown_id.clone(), shown_name) {
                    self.page.request_reload();
                }
                self.page.reset_form(ADD_CATEGORY_FORM);

                tracing::info!("added category {shown_id}");
                self.notifier.notify(
                    response
                        .message
                        .as_deref()
                        .unwrap_or("Category added successfully"),
                    Severity::Success,
                );
                ActionOutcome::Succeeded
            }
            Ok(response) => self.rejected("adding category", response),
            Err(error) => self.failed("adding category", error),
        }
    }

    /// Navigate to the download for `report_type` in `format`, returning the
    /// URL.
    pub fn export_report(&mut self, report_type: &str, format: &str) -> String {
        let url = resolve(
            &self.config.server_url,
            &format_report_endpoint(report_type, format),
        );

        tracing::info!("exporting {report_type} report as {format}");
        self.page.navigate(url.clone());

        url
    }

    fn today(&self) -> time::Date {
        today_in(&self.config.local_timezone).unwrap_or_else(|error| {
            tracing::warn!("{error}, using the UTC date");
            OffsetDateTime::now_utc().date()
        })
    }

    fn invalid(&self, error: Error) -> ActionOutcome {
        let message = error.to_string();
        self.notifier.notify(&message, Severity::Warning);

        ActionOutcome::Invalid(message)
    }

    fn rejected(&self, doing: &str, response: ApiResponse) -> ActionOutcome {
        let message = response
            .message
            .unwrap_or_else(|| "Unknown error".to_owned());

        tracing::warn!("backend rejected {doing}: {message}");
        self.notifier
            .notify(&format!("Error {doing}: {message}"), Severity::Error);

        ActionOutcome::Rejected(message)
    }

    fn failed(&self, doing: &str, error: TransportError) -> ActionOutcome {
        tracing::error!("error {doing}: {error}");
        self.notifier.notify(
            &format!("Error {doing}. Please try again."),
            Severity::Error,
        );

        ActionOutcome::Failed
    }
}

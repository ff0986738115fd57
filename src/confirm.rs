//! Confirmation before destructive actions.
//!
//! Each resource kind has one [ConfirmationFlow], a small state machine:
//!
//! ```text
//! Idle -> PendingConfirmation -> Confirmed | Cancelled -> Idle
//! ```
//!
//! A new request replaces whatever was pending for the same kind.
//! How the question is put to the user is up to the [ConfirmationSurface]:
//! it can answer straight away, like a native confirm dialog, or defer to a
//! modal whose buttons answer later.

use crate::{
    format::{format_currency, format_date_str},
    resource::{ResourceId, ResourceKind},
};

/// A deletion waiting for the user's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAction {
    /// What is being deleted.
    pub kind: ResourceKind,
    /// The backend ID of the resource.
    pub id: ResourceId,
    /// The display name, from `data-name`.
    pub name: Option<String>,
    /// The transaction date as "YYYY-MM-DD", from `data-date`.
    pub date: Option<String>,
    /// The transaction amount, from `data-amount`.
    pub amount: Option<String>,
}

impl PendingAction {
    /// A deletion of `id` with no extra details.
    pub fn new(kind: ResourceKind, id: ResourceId) -> Self {
        Self {
            kind,
            id,
            name: None,
            date: None,
            amount: None,
        }
    }

    /// The question to put to the user.
    pub fn prompt(&self) -> ConfirmationPrompt {
        let mut details = Vec::new();

        if let Some(name) = &self.name {
            let label = match self.kind {
                ResourceKind::Transaction => "Description",
                ResourceKind::Category => "Name",
            };
            details.push((label.to_owned(), name.clone()));
        }

        if let Some(date) = &self.date {
            details.push(("Date".to_owned(), format_date_str(date)));
        }

        if let Some(amount) = &self.amount {
            let amount = match amount.trim().parse::<f64>() {
                Ok(amount) => format_currency(amount),
                Err(_) => amount.clone(),
            };
            details.push(("Amount".to_owned(), amount));
        }

        ConfirmationPrompt {
            kind: self.kind,
            title: format!("Delete {}", self.kind),
            message: format!(
                "Are you sure you want to delete this {}? This action cannot be undone.",
                self.kind
            ),
            details,
        }
    }
}

/// The question shown before a deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    /// The kind of resource the answer applies to.
    pub kind: ResourceKind,
    /// The dialog heading.
    pub title: String,
    /// The question.
    pub message: String,
    /// Labelled details of the target, e.g. ("Amount", "$12.50").
    pub details: Vec<(String, String)>,
}

/// Where a [ConfirmationFlow] is up to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfirmationState {
    /// Nothing is waiting for an answer.
    #[default]
    Idle,
    /// The user has been asked and has not answered.
    PendingConfirmation(PendingAction),
}

/// The user's answer to a pending confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Go ahead with the action.
    Confirmed(PendingAction),
    /// Drop the action.
    Cancelled(PendingAction),
}

/// The confirmation state for one resource kind.
#[derive(Debug, Clone, Default)]
pub struct ConfirmationFlow {
    state: ConfirmationState,
}

impl ConfirmationFlow {
    /// Create an idle flow.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    pub fn state(&self) -> &ConfirmationState {
        &self.state
    }

    /// The action waiting for an answer, if any.
    pub fn pending(&self) -> Option<&PendingAction> {
        match &self.state {
            ConfirmationState::Idle => None,
            ConfirmationState::PendingConfirmation(action) => Some(action),
        }
    }

    /// Ask about `action`, replacing any earlier pending action.
    ///
    /// Returns the action that was replaced.
    pub fn request(&mut self, action: PendingAction) -> Option<PendingAction> {
        match std::mem::replace(&mut self.state, ConfirmationState::PendingConfirmation(action)) {
            ConfirmationState::Idle => None,
            ConfirmationState::PendingConfirmation(replaced) => Some(replaced),
        }
    }

    /// Apply the user's answer and return to idle.
    ///
    /// Returns `None` if nothing was pending.
    pub fn resolve(&mut self, confirmed: bool) -> Option<Decision> {
        match std::mem::take(&mut self.state) {
            ConfirmationState::Idle => None,
            ConfirmationState::PendingConfirmation(action) if confirmed => {
                Some(Decision::Confirmed(action))
            }
            ConfirmationState::PendingConfirmation(action) => Some(Decision::Cancelled(action)),
        }
    }
}

/// The pending deletion slots, one per resource kind.
#[derive(Debug, Clone, Default)]
pub(crate) struct PendingDeletions {
    transaction: ConfirmationFlow,
    category: ConfirmationFlow,
}

impl PendingDeletions {
    pub(crate) fn flow(&self, kind: ResourceKind) -> &ConfirmationFlow {
        match kind {
            ResourceKind::Transaction => &self.transaction,
            ResourceKind::Category => &self.category,
        }
    }

    pub(crate) fn flow_mut(&mut self, kind: ResourceKind) -> &mut ConfirmationFlow {
        match kind {
            ResourceKind::Transaction => &mut self.transaction,
            ResourceKind::Category => &mut self.category,
        }
    }
}

/// How a [ConfirmationSurface] handled a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// The user answered before `present` returned.
    Answered(bool),
    /// The prompt is on screen and the answer will arrive as a later event.
    Deferred,
}

/// Puts confirmation prompts to the user.
pub trait ConfirmationSurface {
    /// Show `prompt`.
    fn present(&mut self, prompt: &ConfirmationPrompt) -> Presentation;
}

/// Shows prompts in the page's delete modal and waits for its buttons.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModalConfirmation;

impl ConfirmationSurface for ModalConfirmation {
    fn present(&mut self, _prompt: &ConfirmationPrompt) -> Presentation {
        Presentation::Deferred
    }
}

/// Asks with a blocking callback, like the browser's `confirm()`.
pub struct PromptConfirmation<F> {
    ask: F,
}

impl<F> PromptConfirmation<F>
where
    F: FnMut(&ConfirmationPrompt) -> bool,
{
    /// Create a surface that calls `ask` for every prompt.
    pub fn new(ask: F) -> Self {
        Self { ask }
    }
}

impl<F> ConfirmationSurface for PromptConfirmation<F>
where
    F: FnMut(&ConfirmationPrompt) -> bool,
{
    fn present(&mut self, prompt: &ConfirmationPrompt) -> Presentation {
        Presentation::Answered((self.ask)(prompt))
    }
}

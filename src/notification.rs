//! Notification surfaces for telling the user how an action went.
//!
//! Two surfaces are provided: [ToastSurface] shows timed, non-blocking
//! toasts in the page's toast container, and [ConsoleSurface] writes each
//! message straight to a writer, the way a blocking dialog interrupts the
//! user.

use std::{
    io::Write,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use maud::{Markup, html};

/// How a notification should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The action completed.
    Success,
    /// The action failed.
    Error,
    /// The user's input was rejected.
    Warning,
}

impl Severity {
    /// The heading shown above the message.
    pub fn title(&self) -> &'static str {
        match self {
            Severity::Success => "Success",
            Severity::Error => "Error",
            Severity::Warning => "Warning",
        }
    }

    fn style(&self) -> &'static str {
        match self {
            Severity::Success => {
                "text-green-800 border-green-300 bg-green-50 \
                dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
            }
            Severity::Error => {
                "text-red-800 border-red-300 bg-red-50 \
                dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
            }
            Severity::Warning => {
                "text-yellow-800 border-yellow-300 bg-yellow-50 \
                dark:bg-gray-800 dark:text-yellow-300 dark:border-yellow-800"
            }
        }
    }
}

/// A message and how to style it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// The text shown to the user.
    pub message: String,
    /// The visual treatment.
    pub severity: Severity,
}

impl Notification {
    /// Create a notification.
    pub fn new(message: &str, severity: Severity) -> Self {
        Self {
            message: message.to_owned(),
            severity,
        }
    }
}

/// Somewhere to show notifications to the user.
pub trait NotificationSurface {
    /// Show `message` styled by `severity`.
    ///
    /// Surfaces must not fail: if there is nowhere to show the message it is
    /// dropped.
    fn notify(&self, message: &str, severity: Severity);
}

/// A notification on screen in a [ToastRegion].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Identifies the toast for dismissal.
    pub id: u64,
    /// What the toast shows.
    pub notification: Notification,
}

impl Toast {
    /// Render the toast.
    pub fn render(&self) -> Markup {
        html! {
            div
                role="alert"
                class={ "toast flex flex-col p-4 mb-4 text-sm border rounded-lg " (self.notification.severity.style()) }
                data-toast-id=(self.id)
                data-severity=(self.notification.severity.title().to_lowercase())
            {
                span class="font-medium" { (self.notification.severity.title()) }
                p { (self.notification.message) }
                button
                    type="button"
                    data-action="dismiss-toast"
                    data-id=(self.id)
                    aria-label="Close"
                {
                    "×"
                }
            }
        }
    }
}

/// The page's toast container.
///
/// Cloning a region gives another handle to the same toasts, so timers can
/// dismiss toasts after the surface that created them has moved on.
#[derive(Debug, Clone, Default)]
pub struct ToastRegion {
    toasts: Arc<Mutex<Vec<Toast>>>,
    next_id: Arc<AtomicU64>,
}

impl ToastRegion {
    /// Create an empty region.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `notification`, returning the new toast's id.
    pub fn push(&self, notification: Notification) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        match self.toasts.lock() {
            Ok(mut toasts) => toasts.push(Toast { id, notification }),
            Err(error) => tracing::error!("could not acquire the toast lock: {error}"),
        }

        id
    }

    /// Remove the toast with `id`.
    ///
    /// Returns `false` if it was already gone.
    pub fn dismiss(&self, id: u64) -> bool {
        let Ok(mut toasts) = self.toasts.lock() else {
            tracing::error!("could not acquire the toast lock");
            return false;
        };

        let count_before = toasts.len();
        toasts.retain(|toast| toast.id != id);

        toasts.len() != count_before
    }

    /// The toasts currently on screen, oldest first.
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .map(|toasts| toasts.clone())
            .unwrap_or_default()
    }

    /// Render the container and its toasts.
    pub fn render(&self) -> Markup {
        let toasts = self.toasts();

        html! {
            div
                id="toastContainer"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                @for toast in &toasts {
                    (toast.render())
                }
            }
        }
    }
}

/// Shows notifications as toasts that dismiss themselves after a fixed delay.
///
/// The surface can be created before the page's toast container exists; until
/// [ToastSurface::attach] is called notifications are dropped.
#[derive(Debug, Clone)]
pub struct ToastSurface {
    region: Option<ToastRegion>,
    duration: Duration,
}

impl ToastSurface {
    /// Create a surface with no region attached.
    pub fn new(duration: Duration) -> Self {
        Self {
            region: None,
            duration,
        }
    }

    /// Show future notifications in `region`.
    pub fn attach(&mut self, region: ToastRegion) {
        self.region = Some(region);
    }

    /// The attached region, if any.
    pub fn region(&self) -> Option<&ToastRegion> {
        self.region.as_ref()
    }
}

impl NotificationSurface for ToastSurface {
    fn notify(&self, message: &str, severity: Severity) {
        let Some(region) = &self.region else {
            tracing::debug!("no toast container, dropping notification: {message}");
            return;
        };

        let id = region.push(Notification::new(message, severity));

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let region = region.clone();
                let duration = self.duration;

                runtime.spawn(async move {
                    tokio::time::sleep(duration).await;
                    region.dismiss(id);
                });
            }
            Err(_) => {
                tracing::debug!("no async runtime, toast {id} stays until it is dismissed");
            }
        }
    }
}

/// Writes each notification to a writer as soon as it arrives, e.g.
/// "Error: Category not found".
#[derive(Debug)]
pub struct ConsoleSurface<W> {
    writer: Mutex<W>,
}

impl<W: Write> ConsoleSurface<W> {
    /// Create a surface that writes to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Take back the writer.
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl ConsoleSurface<std::io::Stdout> {
    /// Create a surface that writes to stdout.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> NotificationSurface for ConsoleSurface<W> {
    fn notify(&self, message: &str, severity: Severity) {
        let Ok(mut writer) = self.writer.lock() else {
            tracing::error!("could not acquire the console lock");
            return;
        };

        if let Err(error) = writeln!(writer, "{}: {message}", severity.title()) {
            tracing::error!("could not write notification: {error}");
        }
    }
}

use std::borrow::Cow;

/// A sink for the message emitted when a measurement completes.
///
/// The tracker calls [`emit()`][Self::emit] exactly once per completed measurement, with the
/// message template already rendered. What the sink does with the message (write it to a log,
/// print it, forward it, discard it) is up to the implementation.
///
/// Any `Fn(&str)` closure that is `Send + Sync` is a notifier.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
///
/// use took::Tracker;
///
/// let messages = Arc::new(Mutex::new(Vec::new()));
///
/// let tracker = Tracker::builder()
///     .template("Step took {}s")
///     .notifier({
///         let messages = Arc::clone(&messages);
///         move |message: &str| messages.lock().unwrap().push(message.to_string())
///     })
///     .build();
///
/// tracker.measure(|| {});
///
/// assert_eq!(messages.lock().unwrap().len(), 1);
/// ```
pub trait Notifier: Send + Sync {
    /// Emits one informational message.
    fn emit(&self, message: &str);
}

impl<F> Notifier for F
where
    F: Fn(&str) + Send + Sync,
{
    fn emit(&self, message: &str) {
        self(message);
    }
}

/// Emits messages as `INFO` events via the `tracing` crate.
///
/// This is the notifier used by a [`Tracker`][crate::Tracker] unless another one is configured.
/// Where the events end up is decided by the `tracing` subscriber the application installs.
///
/// A named notifier attaches its name as the `tracker` field of every event, so that the
/// output of different trackers sharing the same subscriber can be told apart and filtered.
#[derive(Clone, Debug, Default)]
pub struct TracingNotifier {
    name: Option<Cow<'static, str>>,
}

impl TracingNotifier {
    /// Creates a notifier that emits events without a `tracker` field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a notifier that attaches `name` as the `tracker` field of every event.
    ///
    /// # Examples
    ///
    /// ```
    /// use took::{TracingNotifier, Tracker};
    ///
    /// let printing = Tracker::builder()
    ///     .template("Printing took {}s")
    ///     .notifier(TracingNotifier::named("printing"))
    ///     .build();
    /// ```
    #[must_use]
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// The name attached to emitted events, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Notifier for TracingNotifier {
    fn emit(&self, message: &str) {
        match &self.name {
            Some(name) => tracing::info!(tracker = %name, "{message}"),
            None => tracing::info!("{message}"),
        }
    }
}

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::pal::PlatformFacade;
use crate::{ERR_POISONED_LOCK, Measurement, MessageTemplate, Notifier, Result, TracingNotifier};

/// Measures wall-clock time around blocks of work and records the durations.
///
/// Every completed measurement appends its duration in seconds to the tracker and emits the
/// rendered [`MessageTemplate`] to the tracker's [`Notifier`], exactly once, whether the measured
/// work succeeded or failed.
///
/// A tracker can measure in three ways:
///
/// * [`begin()`][Self::begin] returns a [`Measurement`] guard that measures until it is dropped.
/// * [`measure()`][Self::measure] measures a closure.
/// * [`wrap()`][Self::wrap] turns a function into one that measures every call.
///
/// Trackers are cheap to clone. Clones are handles to the same tracker: they share the
/// recorded durations, the template and the notifier.
///
/// # Examples
///
/// ```
/// use took::Tracker;
///
/// let tracker = Tracker::new();
///
/// for i in 0..3_u64 {
///     let _measurement = tracker.begin();
///     let _sum: u64 = (0..i * 1000).sum();
/// }
///
/// assert_eq!(tracker.len(), 3);
/// println!("{tracker}");
/// ```
#[derive(Clone)]
pub struct Tracker {
    inner: Arc<TrackerInner>,
}

struct TrackerInner {
    template: MessageTemplate,
    notifier: Arc<dyn Notifier>,
    platform: PlatformFacade,

    // Seconds, in the order the measurements completed.
    durations: Mutex<Vec<f64>>,

    open: AtomicUsize,
}

impl Tracker {
    /// Creates a tracker with the default template and a [`TracingNotifier`].
    ///
    /// The default template is [`DEFAULT_TEMPLATE`][crate::DEFAULT_TEMPLATE].
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a tracker with the given template and a [`TracingNotifier`].
    ///
    /// The template is not validated here. See [`MessageTemplate`] for the syntax.
    #[must_use]
    pub fn with_template(template: impl Into<MessageTemplate>) -> Self {
        Self::builder().template(template).build()
    }

    /// Creates a builder for a tracker with a custom template or notifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use took::{TracingNotifier, Tracker};
    ///
    /// let tracker = Tracker::builder()
    ///     .template("Query took {:.3}s")
    ///     .notifier(TracingNotifier::named("database"))
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder() -> TrackerBuilder {
        TrackerBuilder::new()
    }

    /// Starts a measurement that lasts until the returned guard is dropped or ended.
    ///
    /// # Examples
    ///
    /// ```
    /// use took::Tracker;
    ///
    /// let tracker = Tracker::new();
    /// {
    ///     let _measurement = tracker.begin();
    ///     // Work to be measured.
    /// }
    /// assert_eq!(tracker.len(), 1);
    /// ```
    pub fn begin(&self) -> Measurement<'_> {
        Measurement::new(self)
    }

    /// Measures the execution of `f`, returning its result unchanged.
    ///
    /// The duration is recorded and the message emitted even if `f` panics, after which the
    /// panic continues unchanged.
    ///
    /// # Panics
    ///
    /// Panics if the message template cannot be rendered, unless `f` itself panicked.
    ///
    /// # Examples
    ///
    /// ```
    /// use took::Tracker;
    ///
    /// let tracker = Tracker::new();
    ///
    /// let parsed: Result<u32, _> = tracker.measure(|| "not a number".parse::<u32>());
    ///
    /// assert!(parsed.is_err());
    /// assert_eq!(tracker.len(), 1);
    /// ```
    pub fn measure<R>(&self, f: impl FnOnce() -> R) -> R {
        let _measurement = self.begin();
        f()
    }

    /// Wraps `f` into a function with the same behavior that measures every call.
    ///
    /// The returned function holds a handle to this tracker, so it can outlive the borrow of
    /// `self` and be moved to other threads if `f` can. Functions of several arguments take
    /// them as a tuple.
    ///
    /// # Panics
    ///
    /// Calls to the returned function panic if the message template cannot be rendered,
    /// unless `f` itself panicked.
    ///
    /// # Examples
    ///
    /// ```
    /// use took::Tracker;
    ///
    /// let tracker = Tracker::with_template("Addition took {}s");
    /// let add = tracker.wrap(|(a, b): (i64, i64)| a + b);
    ///
    /// assert_eq!(add((2, 3)), 5);
    /// assert_eq!(add((-1, 1)), 0);
    /// assert_eq!(tracker.len(), 2);
    /// ```
    pub fn wrap<F, A, R>(&self, f: F) -> impl Fn(A) -> R + use<F, A, R>
    where
        F: Fn(A) -> R,
    {
        let tracker = self.clone();
        move |args| tracker.measure(|| f(args))
    }

    /// Like [`wrap()`][Self::wrap] but for functions that mutate their captured state.
    ///
    /// # Panics
    ///
    /// Calls to the returned function panic if the message template cannot be rendered,
    /// unless `f` itself panicked.
    ///
    /// # Examples
    ///
    /// ```
    /// use took::Tracker;
    ///
    /// let tracker = Tracker::new();
    /// let mut seen = Vec::new();
    ///
    /// let mut remember = tracker.wrap_mut(|value: u8| seen.push(value));
    /// remember(1);
    /// remember(2);
    /// drop(remember);
    ///
    /// assert_eq!(seen, [1, 2]);
    /// assert_eq!(tracker.len(), 2);
    /// ```
    pub fn wrap_mut<F, A, R>(&self, mut f: F) -> impl FnMut(A) -> R + use<F, A, R>
    where
        F: FnMut(A) -> R,
    {
        let tracker = self.clone();
        move |args| tracker.measure(|| f(args))
    }

    /// The recorded durations in seconds, oldest first.
    ///
    /// This is a snapshot; measurements completing later are not reflected in it.
    #[must_use]
    pub fn durations(&self) -> Vec<f64> {
        self.inner
            .durations
            .lock()
            .expect(ERR_POISONED_LOCK)
            .clone()
    }

    /// The number of completed measurements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.durations.lock().expect(ERR_POISONED_LOCK).len()
    }

    /// Whether no measurement has completed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The sum of all recorded durations, in seconds.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.summary().total
    }

    /// The mean of all recorded durations, in seconds.
    ///
    /// Returns zero if no measurement has completed.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.summary().mean
    }

    /// Count, total and mean taken from one consistent view of the durations.
    #[expect(
        clippy::cast_precision_loss,
        reason = "measurement counts never approach 2^52"
    )]
    fn summary(&self) -> Summary {
        let durations = self.inner.durations.lock().expect(ERR_POISONED_LOCK);

        let count = durations.len();
        let total: f64 = durations.iter().sum();
        let mean = if count == 0 {
            0.0
        } else {
            total / count as f64
        };

        Summary { count, total, mean }
    }

    /// The number of measurements that have started but not yet ended.
    ///
    /// A tracker with no open measurements is idle.
    #[must_use]
    pub fn open_measurements(&self) -> usize {
        self.inner.open.load(Ordering::Relaxed)
    }

    /// The template rendered for every completed measurement.
    #[must_use]
    pub fn template(&self) -> &MessageTemplate {
        &self.inner.template
    }

    pub(crate) fn platform(&self) -> &PlatformFacade {
        &self.inner.platform
    }

    pub(crate) fn measurement_opened(&self) {
        let previously_open = self.inner.open.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(open = previously_open.wrapping_add(1), "measurement started");
    }

    /// Records a completed measurement and notifies about it.
    ///
    /// The measurement no longer counts as open and its duration is recorded before the
    /// message is rendered, so a rendering failure leaves the tracker consistent.
    pub(crate) fn complete(&self, seconds: f64) -> Result<()> {
        self.inner.open.fetch_sub(1, Ordering::Relaxed);

        self.inner
            .durations
            .lock()
            .expect(ERR_POISONED_LOCK)
            .push(seconds);

        tracing::trace!(seconds, "measurement ended");

        let message = self.inner.template.render(seconds)?;
        self.inner.notifier.emit(&message);

        Ok(())
    }
}

struct Summary {
    count: usize,
    total: f64,
    mean: f64,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Tracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracker")
            .field("template", &self.inner.template)
            .field("durations", &self.durations())
            .field("open_measurements", &self.open_measurements())
            .field("platform", &self.inner.platform)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Tracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.summary();
        write!(
            f,
            "{} measurements, {}s total, {}s mean",
            summary.count, summary.total, summary.mean
        )
    }
}

/// Builds a [`Tracker`] with a custom template or notifier.
///
/// Created by [`Tracker::builder()`]. Anything not configured takes its default: the
/// [`DEFAULT_TEMPLATE`][crate::DEFAULT_TEMPLATE] and a fresh [`TracingNotifier`].
#[must_use]
pub struct TrackerBuilder {
    template: MessageTemplate,
    notifier: Option<Arc<dyn Notifier>>,
    platform: PlatformFacade,
}

impl TrackerBuilder {
    fn new() -> Self {
        Self {
            template: MessageTemplate::default(),
            notifier: None,
            platform: PlatformFacade::real(),
        }
    }

    /// Sets the message template. It must contain exactly one substitution slot.
    pub fn template(mut self, template: impl Into<MessageTemplate>) -> Self {
        self.template = template.into();
        self
    }

    /// Sets the notifier that receives one message per completed measurement.
    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Some(Arc::new(notifier));
        self
    }

    /// Sets a notifier that is shared with other trackers or other owners.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use took::{Notifier, TracingNotifier, Tracker};
    ///
    /// let timings: Arc<dyn Notifier> = Arc::new(TracingNotifier::named("timings"));
    ///
    /// let printing = Tracker::builder()
    ///     .template("Printing took {}s")
    ///     .shared_notifier(Arc::clone(&timings))
    ///     .build();
    /// let logic = Tracker::builder()
    ///     .template("Logical operation took {}s")
    ///     .shared_notifier(timings)
    ///     .build();
    /// ```
    pub fn shared_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    #[cfg(test)]
    pub(crate) fn platform(mut self, platform: PlatformFacade) -> Self {
        self.platform = platform;
        self
    }

    /// Creates the tracker, with no recorded durations and no open measurements.
    #[must_use]
    pub fn build(self) -> Tracker {
        let notifier = self
            .notifier
            .unwrap_or_else(|| Arc::new(TracingNotifier::new()));

        tracing::debug!(template = %self.template, "tracker created");

        Tracker {
            inner: Arc::new(TrackerInner {
                template: self.template,
                notifier,
                platform: self.platform,
                durations: Mutex::new(Vec::new()),
                open: AtomicUsize::new(0),
            }),
        }
    }
}

impl fmt::Debug for TrackerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackerBuilder")
            .field("template", &self.template)
            .field("has_notifier", &self.notifier.is_some())
            .field("platform", &self.platform)
            .finish()
    }
}

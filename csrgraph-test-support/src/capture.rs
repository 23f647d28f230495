//! Tracing capture for asserting emitted diagnostics in tests.
//!
//! [`EventCapture`] is a [`Layer`] that keeps every closed span and every
//! event, the latter tagged with the name of the span it was emitted in.
//! [`capture`] installs it for the duration of a closure only, so tests do
//! not race on a global subscriber.

use std::{
    collections::BTreeMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tracing::{
    Event, Level, Subscriber,
    field::{Field, Visit},
    span::{Attributes, Id, Record},
};
use tracing_subscriber::{
    Layer, Registry,
    layer::{Context, SubscriberExt},
    registry::LookupSpan,
};

/// Structured fields keyed by name, rendered as strings.
pub type Fields = BTreeMap<String, String>;

/// A span observed after it closed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedSpan {
    /// Span name from the callsite metadata.
    pub name: String,
    /// Fields recorded at creation or later via `Span::record`.
    pub fields: Fields,
}

/// An event observed while the capture was active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedEvent {
    /// Level of the event.
    pub level: Level,
    /// Name of the innermost span enclosing the event, if any.
    pub span: Option<String>,
    /// Event fields, including `message`.
    pub fields: Fields,
}

impl CapturedEvent {
    /// Returns the event's `message` field.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.field("message")
    }

    /// Returns the rendered value of `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Debug, Default)]
struct Store {
    spans: Vec<CapturedSpan>,
    events: Vec<CapturedEvent>,
}

/// Layer collecting spans and events into shared storage.
///
/// # Examples
/// ```
/// use csrgraph_test_support::capture::EventCapture;
///
/// let capture = EventCapture::default();
/// assert!(capture.events().is_empty());
/// assert!(capture.spans().is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventCapture {
    store: Arc<Mutex<Store>>,
}

impl EventCapture {
    /// Returns the closed spans in closing order.
    #[must_use]
    pub fn spans(&self) -> Vec<CapturedSpan> {
        self.lock().spans.clone()
    }

    /// Returns the captured events in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.lock().events.clone()
    }

    /// Returns the first closed span called `name`.
    #[must_use]
    pub fn span_named(&self, name: &str) -> Option<CapturedSpan> {
        self.lock().spans.iter().find(|span| span.name == name).cloned()
    }

    /// Returns the events at `level` whose message equals `message`.
    #[must_use]
    pub fn events_with_message(&self, level: Level, message: &str) -> Vec<CapturedEvent> {
        self.lock()
            .events
            .iter()
            .filter(|event| event.level == level && event.message() == Some(message))
            .cloned()
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        // A panicking test must not hide what it captured from other asserts.
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Runs `f` with an [`EventCapture`] installed as the thread's default
/// subscriber and returns its result with the capture.
///
/// # Examples
/// ```
/// use csrgraph_test_support::capture::capture;
///
/// let (answer, capture) = capture(|| {
///     tracing::info!(answer = 42, "computed");
///     42
/// });
/// assert_eq!(answer, 42);
/// assert_eq!(capture.events()[0].field("answer"), Some("42"));
/// ```
pub fn capture<R>(f: impl FnOnce() -> R) -> (R, EventCapture) {
    let layer = EventCapture::default();
    let subscriber = Registry::default().with(layer.clone());
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, layer)
}

impl<S> Layer<S> for EventCapture
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut fields = Fields::new();
        attrs.record(&mut FieldWriter(&mut fields));
        span.extensions_mut().insert(fields);
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        if let Some(fields) = span.extensions_mut().get_mut::<Fields>() {
            values.record(&mut FieldWriter(fields));
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        let fields = span.extensions_mut().remove::<Fields>().unwrap_or_default();
        self.lock().spans.push(CapturedSpan {
            name: span.name().to_owned(),
            fields,
        });
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let mut fields = Fields::new();
        event.record(&mut FieldWriter(&mut fields));
        let span = ctx.event_span(event).map(|span| span.name().to_owned());
        self.lock().events.push(CapturedEvent {
            level: *event.metadata().level(),
            span,
            fields,
        });
    }
}

struct FieldWriter<'a>(&'a mut Fields);

impl FieldWriter<'_> {
    fn put(&mut self, field: &Field, value: String) {
        self.0.insert(field.name().to_owned(), value);
    }
}

impl Visit for FieldWriter<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.put(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.put(field, value.to_owned());
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.put(field, value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.put(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.put(field, value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.put(field, value.to_string());
    }
}

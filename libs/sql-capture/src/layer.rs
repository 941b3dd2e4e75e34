//! `tracing` layer feeding events into the current capture context.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

use crate::context::CaptureContext;
use crate::trace_file::TraceFile;

/// Appends every event it sees to the log text of the current
/// [`CaptureContext`]. Lines are indented by the number of spans the event
/// is nested in.
///
/// Pair it with a per-layer filter to restrict what ends up in the capture:
///
/// ```ignore
/// let filter = Targets::new().with_target("sea_orm", Level::DEBUG);
/// registry().with(SqlCaptureLayer::new().with_filter(filter)).init();
/// ```
#[derive(Clone, Debug, Default)]
pub struct SqlCaptureLayer {
    trace: Option<Arc<TraceFile>>,
}

impl SqlCaptureLayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also append captured lines to `trace`.
    #[must_use]
    pub fn with_trace_file(mut self, trace: Arc<TraceFile>) -> Self {
        self.trace = Some(trace);
        self
    }
}

impl<S> Layer<S> for SqlCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let depth = ctx.event_scope(event).map_or(0, Iterator::count);

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        let line = visitor.into_line(event.metadata());

        CaptureContext::current().record_message(depth, &line, self.trace.as_deref());
    }
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: String,
}

impl EventVisitor {
    fn into_line(self, metadata: &Metadata<'_>) -> String {
        format!(
            "{} {}: {}{}",
            metadata.level(),
            metadata.target(),
            self.message,
            self.fields
        )
    }
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            value.clone_into(&mut self.message);
        } else {
            _ = write!(self.fields, " {}={value}", field.name());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            _ = write!(self.fields, " {}={value:?}", field.name());
        }
    }
}

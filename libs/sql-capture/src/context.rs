//! Context-scoped storage for captured SQL.
//!
//! A [`CaptureContext`] is installed for a future with [`CaptureContext::scope`].
//! Tokio task-locals do not flow into spawned tasks: clone the handle and scope
//! the child future to share one context across tasks.

use std::future::Future;
use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::STATEMENT_SEPARATOR;
use crate::data::{CaptureData, CommandRecord};
use crate::trace_file::TraceFile;

tokio::task_local! {
    static CURRENT: CaptureContext;
}

// Receives everything recorded outside a scope.
static ROOT: LazyLock<CaptureContext> = LazyLock::new(CaptureContext::new);

/// Handle on the data captured for one logical execution context.
#[derive(Clone, Debug, Default)]
pub struct CaptureContext {
    data: Arc<Mutex<CaptureData>>,
}

impl CaptureContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `fut` with this context as the current one.
    pub fn scope<F>(self, fut: F) -> impl Future<Output = F::Output>
    where
        F: Future,
    {
        CURRENT.scope(self, fut)
    }

    /// The context installed for the running task, or the root context.
    ///
    /// The root context is shared by the whole process and only shrinks on an
    /// explicit [`reset`] made outside any scope. Long-running callers that
    /// record outside a scope should reset it periodically.
    #[must_use]
    pub fn current() -> Self {
        CURRENT
            .try_with(Clone::clone)
            .unwrap_or_else(|_| CaptureContext::clone(&ROOT))
    }

    /// Whether both handles point at the same captured data.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Drop everything captured so far, including a pending cancellation.
    pub fn reset(&self) {
        *self.data.lock() = CaptureData::default();
    }

    /// All captured statements separated by a blank line.
    #[must_use]
    pub fn sql(&self) -> String {
        self.data.lock().statements().join(STATEMENT_SEPARATOR)
    }

    #[must_use]
    pub fn statements(&self) -> Vec<String> {
        self.data.lock().statements().to_vec()
    }

    #[must_use]
    pub fn commands(&self) -> Vec<CommandRecord> {
        self.data.lock().commands().to_vec()
    }

    /// Free-form log text captured from tracing events.
    #[must_use]
    pub fn log(&self) -> String {
        self.data.lock().log().to_owned()
    }

    /// Token cancelled as soon as the next command or log line is recorded here.
    #[must_use]
    pub fn cancel_query(&self) -> CancellationToken {
        self.data.lock().arm_cancel()
    }

    pub fn record_command(&self, record: CommandRecord, trace: Option<&TraceFile>) {
        let (text, pending) = self.data.lock().push_command(record);
        if let Some(token) = pending {
            token.cancel();
        }
        if let Some(trace) = trace {
            trace.append(&text);
        }
    }

    pub fn record_message(&self, depth: usize, message: &str, trace: Option<&TraceFile>) {
        let message = message.trim();
        if message.is_empty() {
            return;
        }

        let pending = self.data.lock().push_line(depth, message);
        if let Some(token) = pending {
            token.cancel();
        }
        if let Some(trace) = trace {
            trace.append(message);
        }
    }
}

/// Reset the current context.
pub fn reset() {
    CaptureContext::current().reset();
}

/// Captured SQL of the current context.
#[must_use]
pub fn sql() -> String {
    CaptureContext::current().sql()
}

#[must_use]
pub fn statements() -> Vec<String> {
    CaptureContext::current().statements()
}

#[must_use]
pub fn commands() -> Vec<CommandRecord> {
    CaptureContext::current().commands()
}

#[must_use]
pub fn log() -> String {
    CaptureContext::current().log()
}

#[must_use]
pub fn cancel_query() -> CancellationToken {
    CaptureContext::current().cancel_query()
}

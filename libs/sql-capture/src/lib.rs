//! SQL capture sink.
//!
//! Collects the SQL that SeaORM executes, keyed by logical execution context,
//! so callers can inspect the generated statements after running a query.
//!
//! ## Pieces
//!
//! - [`CaptureContext`] - a handle on one context's captured data. The context
//!   installed with [`CaptureContext::scope`] is task-local; code running outside
//!   any scope records into a process-wide root context.
//! - [`metric_recorder`] - the SeaORM metric callback turning every executed
//!   statement into a [`CommandRecord`] of the current context.
//! - [`SqlCaptureLayer`] - a `tracing` layer appending other events to the
//!   current context's log text, indented by span depth.
//! - [`TraceFile`] - append-only diagnostic trace of everything captured.
//!
//! ## Usage
//!
//! ```ignore
//! let mut db = sea_orm::Database::connect(url).await?;
//! db.set_metric_callback(sql_capture::metric_recorder(None));
//!
//! CaptureContext::new()
//!     .scope(async {
//!         sql_capture::reset();
//!         let rows = article::Entity::find().all(&db).await?;
//!         assert!(sql_capture::sql().contains("SELECT"));
//!         Ok(rows)
//!     })
//!     .await
//! ```

mod context;
mod data;
mod layer;
mod recorder;
mod trace_file;

pub use context::{CaptureContext, cancel_query, commands, log, reset, sql, statements};
pub use data::CommandRecord;
pub use layer::SqlCaptureLayer;
pub use recorder::{command_record, metric_recorder};
pub use trace_file::TraceFile;

/// Separator placed between statements in [`sql`].
pub const STATEMENT_SEPARATOR: &str = "\n\n";

//! Bridge from SeaORM's metric callback to the capture context.

use std::sync::Arc;

use sea_orm::metric::Info;
use sea_orm::{DatabaseBackend, Value};

use crate::context::CaptureContext;
use crate::data::CommandRecord;
use crate::trace_file::TraceFile;

/// Build a callback for `DatabaseConnection::set_metric_callback`.
///
/// SeaORM invokes it inline after each statement, on the task that awaited
/// the query, so the record lands in that task's [`CaptureContext`].
pub fn metric_recorder(
    trace: Option<Arc<TraceFile>>,
) -> impl Fn(&Info<'_>) + Send + Sync + 'static {
    move |info| {
        CaptureContext::current().record_command(command_record(info), trace.as_deref());
    }
}

/// Convert one metric report into a [`CommandRecord`].
#[must_use]
pub fn command_record(info: &Info<'_>) -> CommandRecord {
    let statement = info.statement;
    let parameters = statement.values.as_ref().map_or_else(Vec::new, |values| {
        values
            .0
            .iter()
            .enumerate()
            .map(|(index, value)| {
                (
                    placeholder_name(statement.db_backend, index),
                    render_value(value),
                )
            })
            .collect()
    });

    CommandRecord {
        sql: statement.sql.clone(),
        parameters,
        elapsed: info.elapsed,
        failed: info.failed,
    }
}

fn placeholder_name(backend: DatabaseBackend, index: usize) -> String {
    match backend {
        DatabaseBackend::Postgres => format!("${}", index + 1),
        DatabaseBackend::MySql | DatabaseBackend::Sqlite => format!("?{}", index + 1),
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(Some(s)) => String::clone(s),
        Value::Uuid(Some(id)) => id.to_string(),
        Value::String(None) | Value::Uuid(None) => "NULL".to_owned(),
        other => format!("{other:?}"),
    }
}

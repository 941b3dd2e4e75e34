use std::time::Duration;

use tokio_util::sync::CancellationToken;

const INDENT: &str = "    ";

/// One command executed by the ORM driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandRecord {
    /// SQL text with placeholders, exactly as sent to the driver.
    pub sql: String,
    /// Bound parameters as `(name, rendered value)`, in placeholder order.
    pub parameters: Vec<(String, String)>,
    pub elapsed: Duration,
    pub failed: bool,
}

impl CommandRecord {
    /// Text stored in the statement list: one `name: value` line per
    /// parameter, a blank line, then the SQL. Just the SQL when unbound.
    #[must_use]
    pub fn statement_text(&self) -> String {
        if self.parameters.is_empty() {
            return self.sql.clone();
        }

        let parameters = self
            .parameters
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("\n");

        format!("{parameters}\n\n{}", self.sql)
    }
}

/// Everything captured for one context.
#[derive(Debug, Default)]
pub struct CaptureData {
    log: String,
    statements: Vec<String>,
    commands: Vec<CommandRecord>,
    pending_cancel: Option<CancellationToken>,
}

impl CaptureData {
    /// Store a command; returns the statement text and the token to cancel, if one was pending.
    pub fn push_command(&mut self, record: CommandRecord) -> (String, Option<CancellationToken>) {
        let text = record.statement_text();
        self.statements.push(text.clone());
        self.commands.push(record);
        (text, self.pending_cancel.take())
    }

    /// Append a log line indented `depth` levels. Multi-line messages keep the indent on every line.
    pub fn push_line(&mut self, depth: usize, line: &str) -> Option<CancellationToken> {
        let indent = INDENT.repeat(depth);
        for part in line.lines() {
            self.log.push_str(&indent);
            self.log.push_str(part);
            self.log.push('\n');
        }
        self.pending_cancel.take()
    }

    pub fn arm_cancel(&mut self) -> CancellationToken {
        let token = CancellationToken::new();
        self.pending_cancel = Some(token.clone());
        token
    }

    pub fn log(&self) -> &str {
        &self.log
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn commands(&self) -> &[CommandRecord] {
        &self.commands
    }
}

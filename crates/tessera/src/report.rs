//! Migration messages and the handling of missing dependencies.
//!
//! A [`Reporter`] is the audit trail of a migration run. Messages saved to it
//! are associated with the row being migrated. A reporter may also carry a
//! [`MessageDisplay`] channel that shows messages to a human as they happen.

use log::{debug, warn};
use serde::Serialize;

use tessera_core::{identifier::SourceId, severity::Severity};

use crate::error::MissingDependencyError;

/// A human-visible message channel.
pub trait MessageDisplay {
    fn display(&mut self, message: &str);
}

/// The audit trail of a migration run.
pub trait Reporter {
    /// Saves a message against the row currently being migrated.
    fn save_message(&mut self, message: &str, severity: Severity);

    /// Returns the display channel, if one is attached.
    fn message_display(&mut self) -> Option<&mut dyn MessageDisplay> {
        None
    }
}

/// Displays messages through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDisplay;

impl MessageDisplay for LogDisplay {
    fn display(&mut self, message: &str) {
        warn!("{message}");
    }
}

/// A message saved during a migration run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    row: Option<SourceId>,
    severity: Severity,
    message: String,
}

impl MigrationMessage {
    pub fn row(&self) -> Option<SourceId> {
        self.row
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// An in-memory [`Reporter`].
#[derive(Default)]
pub struct MessageLog {
    current_row: Option<SourceId>,
    messages: Vec<MigrationMessage>,
    display: Option<Box<dyn MessageDisplay>>,
}

impl MessageLog {
    /// Creates an empty log without a display channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a display channel (builder style).
    pub fn with_display(mut self, display: impl MessageDisplay + 'static) -> Self {
        self.display = Some(Box::new(display));
        self
    }

    /// Associates subsequent messages with `row`.
    pub fn begin_row(&mut self, row: SourceId) {
        self.current_row = Some(row);
    }

    /// Stops associating messages with a row.
    pub fn end_row(&mut self) {
        self.current_row = None;
    }

    pub fn messages(&self) -> &[MigrationMessage] {
        &self.messages
    }

    /// Returns the number of messages with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.messages
            .iter()
            .filter(|message| message.severity == severity)
            .count()
    }
}

impl Reporter for MessageLog {
    fn save_message(&mut self, message: &str, severity: Severity) {
        self.messages.push(MigrationMessage {
            row: self.current_row,
            severity,
            message: message.to_string(),
        });
    }

    fn message_display(&mut self) -> Option<&mut dyn MessageDisplay> {
        match &mut self.display {
            Some(display) => Some(display.as_mut()),
            None => None,
        }
    }
}

/// Turns missing dependencies into warnings.
///
/// The caller skips the affected item and carries on with the rest of the
/// batch.
#[derive(Debug, Default, Clone, Copy)]
pub struct MissingDependencyHandler;

impl MissingDependencyHandler {
    /// Records `error` as a warning and shows it on the display channel, if any.
    pub fn handle(error: &MissingDependencyError, reporter: &mut dyn Reporter) {
        let message = error.to_string();
        debug!(source_id = error.source_id().get(); "Skipping layout item with missing dependency");

        reporter.save_message(&message, Severity::Warning);
        if let Some(display) = reporter.message_display() {
            display.display(&message);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    /// Display channel that remembers what it was shown.
    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl MessageDisplay for Recorder {
        fn display(&mut self, message: &str) {
            self.0.borrow_mut().push(message.to_string());
        }
    }

    fn missing_block() -> MissingDependencyError {
        MissingDependencyError::Block {
            source_id: SourceId::new(8),
            migration: "d7_paragraph_text".to_string(),
        }
    }

    #[test]
    fn test_handle_saves_warning_for_current_row() {
        let mut log = MessageLog::new();
        log.begin_row(SourceId::new(100));

        MissingDependencyHandler::handle(&missing_block(), &mut log);

        assert_eq!(log.messages().len(), 1);
        let message = &log.messages()[0];
        assert_eq!(message.severity(), Severity::Warning);
        assert_eq!(message.row(), Some(SourceId::new(100)));
        assert_eq!(message.message(), missing_block().to_string());
    }

    #[test]
    fn test_handle_displays_when_channel_attached() {
        let recorder = Recorder::default();
        let mut log = MessageLog::new().with_display(recorder.clone());

        MissingDependencyHandler::handle(&missing_block(), &mut log);

        assert_eq!(recorder.0.borrow().as_slice(), &[missing_block().to_string()]);
        assert_eq!(log.count(Severity::Warning), 1);
    }

    #[test]
    fn test_messages_after_end_row_have_no_row() {
        let mut log = MessageLog::new();
        log.begin_row(SourceId::new(1));
        log.end_row();
        log.save_message("done", Severity::Info);

        assert_eq!(log.messages()[0].row(), None);
        assert_eq!(log.count(Severity::Warning), 0);
    }
}

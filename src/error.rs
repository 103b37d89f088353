//! Diagnostics
//!
//! Translation is report-and-halt: the first error encountered anywhere in
//! the pipeline terminates translation. A `Diagnostic` carries enough to
//! print a located, human-readable message and, for a handful of cases
//! (duplicate bindings, a second `%entry`), a second `NOTE` line pointing at
//! the earlier definition.

use std::fmt;

/// A location within a source file, threaded through lexing, parsing,
/// evaluation and translation purely for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location<'a> {
    pub file: &'a str,
    pub line: usize,
}

impl<'a> Location<'a> {
    pub fn new(file: &'a str, line: usize) -> Self {
        Self { file, line }
    }
}

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub note: Option<Note>,
    /// `None` for the handful of errors that have no source location to
    /// report against (e.g. failing to open the top-level input file) —
    /// these print as a bare `ERROR: ...` with no location prefix.
    pub location: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Note {
    pub message: String,
    pub location: String,
}

impl Diagnostic {
    pub fn new(location: Location<'_>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            note: None,
            location: Some(location.to_string()),
        }
    }

    /// A diagnostic with no location to report — used only where the spec
    /// calls for a raw, unlocated error (e.g. the top-level input file
    /// could not be opened at all, so there is no source position yet).
    pub fn raw(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            note: None,
            location: None,
        }
    }

    /// Attach a NOTE line pointing at an earlier, related location.
    pub fn with_note(mut self, location: Location<'_>, message: impl Into<String>) -> Self {
        self.note = Some(Note {
            message: message.into(),
            location: location.to_string(),
        });
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => writeln!(f, "{location}: ERROR: {}", self.message)?,
            None => writeln!(f, "ERROR: {}", self.message)?,
        }
        if let Some(note) = &self.note {
            write!(f, "{}: NOTE: {}", note.location, note.message)?;
        }
        Ok(())
    }
}

pub type Result<T> = std::result::Result<T, Diagnostic>;

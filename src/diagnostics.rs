//! Non-fatal diagnostics
//!
//! Components that recover from bad input locally (the lenient hex path)
//! report through a [`Diagnostics`] collector instead of a global logger. The
//! collector keeps every entry for the caller and, when its
//! [`DiagnosticConfig`] asks for it, echoes each one through `log::warn!`.

use std::fmt;

/// How diagnostics are surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticConfig {
    /// Forward every diagnostic to the `log` facade as a warning
    pub echo: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig { echo: true }
    }
}

/// A recovered, non-fatal problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A hex chunk that could not be decoded and was replaced by a zero byte
    HexDigit {
        word: String,
        chunk: String,
        position: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::HexDigit {
                word,
                chunk,
                position,
            } => {
                write!(
                    f,
                    "invalid characters '{}' at position {} in word '{}' - replacing with 0",
                    chunk, position, word
                )
            }
        }
    }
}

/// Collector for diagnostics raised during one conversion
#[derive(Debug, Default)]
pub struct Diagnostics {
    config: DiagnosticConfig,
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new(config: DiagnosticConfig) -> Self {
        Diagnostics {
            config,
            entries: Vec::new(),
        }
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        if self.config.echo {
            log::warn!("{}", diagnostic);
        }
        self.entries.push(diagnostic);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

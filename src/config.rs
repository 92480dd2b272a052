//! Viewer configuration and command-line handling
//!
//! [`ViewerConfig`] is an explicit value handed to the components that need
//! it (the hex converter gets its diagnostics settings from here, the byte
//! pane its grouping width). Nothing reads process-wide settings.

use crate::diagnostics::DiagnosticConfig;
use crate::hex::Endian;
use log::LevelFilter;
use std::fmt;
use std::path::PathBuf;

/// Default machine word width in bits
pub const NATIVE_WIDTH: u32 = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    /// Word width in bits, used to group bytes for display
    pub native_width: u32,
    /// Byte order of the supplied hex words
    pub endian: Endian,
    pub log_level: LevelFilter,
    pub diagnostics: DiagnosticConfig,
    /// Print the bound layout instead of opening the TUI
    pub plain: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            native_width: NATIVE_WIDTH,
            endian: Endian::Big,
            log_level: LevelFilter::Warn,
            diagnostics: DiagnosticConfig::default(),
            plain: false,
        }
    }
}

impl ViewerConfig {
    /// Bytes shown per group in the byte pane
    pub fn group_bytes(&self) -> usize {
        (self.native_width / 8).max(1) as usize
    }
}

/// What the binary was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub declaration_path: PathBuf,
    pub hex_words: Vec<String>,
    pub config: ViewerConfig,
}

/// Bad command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageError {
    pub message: String,
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for UsageError {}

fn usage_error(message: impl Into<String>) -> UsageError {
    UsageError {
        message: message.into(),
    }
}

/// Parse command-line arguments (without the program name).
///
/// ```text
/// <declaration-file> [hex words...] [--little|--big] [--width=<bits>] [--plain] [-v|-vv|-q]
/// ```
///
/// Hex arguments are split on whitespace, so a single quoted
/// `'0011 2233'` and two separate words are equivalent.
pub fn parse_args<I>(args: I) -> Result<Invocation, UsageError>
where
    I: IntoIterator<Item = String>,
{
    let mut config = ViewerConfig::default();
    let mut declaration_path = None;
    let mut hex_words = Vec::new();

    for arg in args {
        match arg.as_str() {
            "--little" => config.endian = Endian::Little,
            "--big" => config.endian = Endian::Big,
            "--plain" => config.plain = true,
            "-v" => config.log_level = LevelFilter::Debug,
            "-vv" => config.log_level = LevelFilter::Trace,
            "-q" => {
                config.log_level = LevelFilter::Off;
                config.diagnostics.echo = false;
            }
            _ if arg.starts_with("--endian=") => {
                config.endian = arg["--endian=".len()..]
                    .parse()
                    .map_err(|e| usage_error(format!("{}", e)))?;
            }
            _ if arg.starts_with("--width=") => {
                let width: u32 = arg["--width=".len()..]
                    .parse()
                    .map_err(|_| usage_error(format!("Invalid width '{}'", arg)))?;
                if !matches!(width, 8 | 16 | 32 | 64) {
                    return Err(usage_error(format!(
                        "Unsupported width {} (expected 8, 16, 32 or 64)",
                        width
                    )));
                }
                config.native_width = width;
            }
            _ if arg.starts_with('-') && arg.len() > 1 => {
                return Err(usage_error(format!("Unknown option '{}'", arg)));
            }
            _ if declaration_path.is_none() => declaration_path = Some(PathBuf::from(&arg)),
            _ => hex_words.extend(arg.split_whitespace().map(str::to_string)),
        }
    }

    let declaration_path =
        declaration_path.ok_or_else(|| usage_error("No declaration file provided"))?;

    Ok(Invocation {
        declaration_path,
        hex_words,
        config,
    })
}

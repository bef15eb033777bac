//! Parser types: how the underlying `clap::Command` is set up and what
//! happens when parsing fails.

use std::fmt;

use clap::Command;

/// What a parse failure does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMode {
    /// Print the diagnostic and terminate the process (exit status 2, or 0
    /// for `--help`).
    Exit,
    /// Return the error to the caller.
    Raise,
}

/// Customization point for the generated parser.
///
/// `configure` runs on the bare command before any argument is registered,
/// so it can set things like `color`, `term_width` or `after_help`.
///
/// ```
/// use clap::Command;
/// use sigparse::{ErrorMode, ParserType};
///
/// #[derive(Debug)]
/// struct Plain;
///
/// impl ParserType for Plain {
///     fn configure(&self, command: Command) -> Command {
///         command.color(clap::ColorChoice::Never).after_help("See the manual.")
///     }
///
///     fn error_mode(&self) -> ErrorMode {
///         ErrorMode::Raise
///     }
/// }
/// ```
pub trait ParserType: Send + Sync + fmt::Debug {
    fn configure(&self, command: Command) -> Command {
        command
    }

    fn error_mode(&self) -> ErrorMode;
}

/// Default parser type: parse errors terminate the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExitingParser;

impl ParserType for ExitingParser {
    fn error_mode(&self) -> ErrorMode {
        ErrorMode::Exit
    }
}

/// Parse errors are returned as [`InvocationError::Parse`](crate::InvocationError::Parse).
#[derive(Debug, Clone, Copy, Default)]
pub struct RaisingParser;

impl ParserType for RaisingParser {
    fn error_mode(&self) -> ErrorMode {
        ErrorMode::Raise
    }
}

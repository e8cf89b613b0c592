//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent
//! formatting and a non-zero exit code.

use std::fmt;
use std::path::PathBuf;
use std::process;
use tilemerge::pipeline::MergeError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// A required path is not a directory
    NotADirectory { role: &'static str, path: PathBuf },
    /// The merge run failed
    Merge(MergeError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::NotADirectory { role, .. } => {
                eprintln!();
                eprintln!("The {} path must be an existing directory.", role);
            }
            CliError::Merge(MergeError::Compose { .. }) => {
                eprintln!();
                eprintln!("Every (x, 0) and (0, y) tile inside the grid extents is required:");
                eprintln!("  row heights are taken from column 0 and column widths from row 0.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::NotADirectory { role, path } => {
                write!(f, "{} path '{}' is not a directory", role, path.display())
            }
            CliError::Merge(e) => write!(f, "Merge failed: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Merge(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MergeError> for CliError {
    fn from(e: MergeError) -> Self {
        CliError::Merge(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_directory_display() {
        let err = CliError::NotADirectory {
            role: "input",
            path: PathBuf::from("/missing/tiles"),
        };
        assert_eq!(
            err.to_string(),
            "input path '/missing/tiles' is not a directory"
        );
    }

    #[test]
    fn test_merge_error_is_source() {
        use std::error::Error;

        let err = CliError::Merge(MergeError::ZoomNotFound(7));
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "Merge failed: zoom level 7 not found in tile set"
        );
    }
}

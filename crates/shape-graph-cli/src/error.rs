//! Exit codes for the shape-graph CLI.

use shape_graph_core::CoreError;

/// Process exit codes.
///
/// - 0: success
/// - 1: runtime failure (I/O, missing dataset, render failure)
/// - 2: invalid input (bad k, too few points, malformed file or config)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum CliExitCode {
    Success = 0,
    Failure = 1,
    InvalidInput = 2,
}

impl From<CliExitCode> for i32 {
    fn from(code: CliExitCode) -> Self {
        code as i32
    }
}

/// Map a core error to the exit code reported to the shell.
pub fn exit_code_for_error(err: &CoreError) -> CliExitCode {
    if err.is_input_error() {
        CliExitCode::InvalidInput
    } else {
        CliExitCode::Failure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            exit_code_for_error(&CoreError::InvalidK { k: 0 }),
            CliExitCode::InvalidInput
        );
        assert_eq!(
            exit_code_for_error(&CoreError::InsufficientPoints { count: 1 }),
            CliExitCode::InvalidInput
        );
        assert_eq!(
            exit_code_for_error(&CoreError::SourceError("no dataset".into())),
            CliExitCode::Failure
        );
        assert_eq!(i32::from(CliExitCode::InvalidInput), 2);
    }
}

use thiserror::Error;

/// Errors raised by the puzzle entrypoint.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CliError {
    /// Some of the processed input files could not be solved.
    #[error("{failed} of {total} input file(s) failed")]
    Failed { failed: usize, total: usize },
}

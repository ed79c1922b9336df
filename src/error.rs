/// Error classes raised by the analysis pipeline.
///
/// The kind carries the failure taxonomy (useful in tests and for callers that
/// want to branch); the exit code groups kinds into the ranges the binary
/// reports to the shell:
///
/// - `2`: input/configuration problems (missing file, malformed line, bad flags)
/// - `3`: a required filtered population is empty
/// - `4`: computation problems (invalid trial count, invalid top-K, failed fit)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Io,
    Parse,
    EmptyPopulation,
    InvalidTrialCount,
    InvalidTopK,
    Fit,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Config | ErrorKind::Io | ErrorKind::Parse => 2,
            ErrorKind::EmptyPopulation => 3,
            ErrorKind::InvalidTrialCount | ErrorKind::InvalidTopK | ErrorKind::Fit => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse, message)
    }

    pub fn empty_population(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EmptyPopulation, message)
    }

    pub fn invalid_trial_count(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidTrialCount, message)
    }

    pub fn invalid_top_k(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidTopK, message)
    }

    pub fn fit(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Fit, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_group_kinds() {
        assert_eq!(AppError::parse("x").exit_code(), 2);
        assert_eq!(AppError::empty_population("x").exit_code(), 3);
        assert_eq!(AppError::invalid_trial_count("x").exit_code(), 4);
        assert_eq!(AppError::invalid_top_k("x").exit_code(), 4);
        assert_eq!(AppError::fit("x").kind(), ErrorKind::Fit);
    }
}

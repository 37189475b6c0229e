/// Broad classification of an [`AppError`].
///
/// Callers match on the kind rather than the message: the pipeline, for
/// example, turns `DataUnavailable` into an empty "add data" view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A vehicle category outside the threshold table.
    InvalidCategory,
    /// The emissions table is missing, unreadable, or lacks required columns.
    DataUnavailable,
    /// Invalid user input (negative emission value, bad year range, ...).
    Usage,
    /// Export or terminal I/O failure.
    Io,
}

impl ErrorKind {
    fn exit_code(self) -> u8 {
        match self {
            ErrorKind::InvalidCategory | ErrorKind::Usage => 2,
            ErrorKind::DataUnavailable => 3,
            ErrorKind::Io => 4,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct AppError {
    kind: ErrorKind,
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            exit_code: kind.exit_code(),
            message: message.into(),
        }
    }

    pub fn invalid_category(name: &str) -> Self {
        Self::new(
            ErrorKind::InvalidCategory,
            format!("Invalid vehicle type '{name}'. Expected one of: Car, Truck, Motorcycle."),
        )
    }

    pub fn data_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DataUnavailable, message)
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Usage, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
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
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_kind() {
        assert_eq!(AppError::invalid_category("Bus").exit_code(), 2);
        assert_eq!(AppError::usage("bad").exit_code(), 2);
        assert_eq!(AppError::data_unavailable("gone").exit_code(), 3);
        assert_eq!(AppError::io("disk").exit_code(), 4);
    }

    #[test]
    fn invalid_category_names_the_input() {
        let err = AppError::invalid_category("Spaceship");
        assert_eq!(err.kind(), ErrorKind::InvalidCategory);
        assert!(err.to_string().contains("Spaceship"));
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Spreadsheet error: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),

    #[error("Input file \"{path}\" does not exist")]
    InputNotFound { path: String },

    #[error("Row {row} is too short: column {index} requested but the row has {len} fields")]
    RowTooShort { row: usize, index: usize, len: usize },

    #[error("Malformed header: {message}")]
    MalformedHeader { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Failed to write \"{path}\": {source}")]
    OutputWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Task failed: {message}")]
    TaskError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Configuration,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a run whose worst failure has this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::InputNotFound { .. } | EtlError::IoError(_) => ErrorCategory::Input,
            EtlError::CsvError(_)
            | EtlError::RowTooShort { .. }
            | EtlError::MalformedHeader { .. } => ErrorCategory::Data,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::SerializationError(_) => ErrorCategory::Configuration,
            EtlError::XlsxError(_) | EtlError::OutputWriteError { .. } => ErrorCategory::Output,
            EtlError::TaskError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration | ErrorCategory::Output => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::InputNotFound { .. } => {
                "Check the file name in the configuration or run from the directory holding the export"
            }
            EtlError::IoError(_) => "Check file permissions and available disk space",
            EtlError::CsvError(_) => "Re-export the results file from the timing software",
            EtlError::RowTooShort { .. } | EtlError::MalformedHeader { .. } => {
                "The export does not match the expected column layout; make sure the full results export was used"
            }
            EtlError::XlsxError(_) => "Close the spreadsheet if it is open elsewhere and try again",
            EtlError::OutputWriteError { .. } => {
                "Check that the output directory is writable and the spreadsheet is not open elsewhere"
            }
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::SerializationError(_) => "Fix config.json and run again",
            EtlError::TaskError { .. } => {
                "Run again with --verbose and report the log output"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::InputNotFound { path } => {
                format!("ERROR - file with name \"{}\" does not exist", path)
            }
            EtlError::RowTooShort { row, .. } => {
                format!("Row {} of the results file is missing columns", row)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

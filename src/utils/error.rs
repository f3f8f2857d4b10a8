use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatchError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Request to {url} timed out after {seconds}s")]
    TimeoutError { url: String, seconds: u64 },

    #[error("No usable document among {attempted} candidate URL(s) for source '{source_tag}'")]
    NoUsableDocument { source_tag: String, attempted: usize },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

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

    #[error("Invalid CSS selector '{selector}': {message}")]
    SelectorError { selector: String, message: String },

    #[error("Cannot parse {what} from '{value}'")]
    ParseError { what: String, value: String },

    #[error("Render error: {message}")]
    RenderError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Extraction,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CatchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CatchError::HttpError(_)
            | CatchError::TimeoutError { .. }
            | CatchError::NoUsableDocument { .. } => ErrorCategory::Network,
            CatchError::SelectorError { .. } | CatchError::ParseError { .. } => {
                ErrorCategory::Extraction
            }
            CatchError::ConfigError { .. }
            | CatchError::ConfigValidationError { .. }
            | CatchError::InvalidConfigValueError { .. }
            | CatchError::MissingConfigError { .. } => ErrorCategory::Configuration,
            CatchError::CsvError(_)
            | CatchError::IoError(_)
            | CatchError::SerializationError(_)
            | CatchError::RenderError { .. } => ErrorCategory::Output,
        }
    }

    /// Source-side failures are recoverable by skipping the source, so they
    /// never rank above `Medium`. Anything that stops the report from being
    /// written is `High` or worse.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Extraction => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CatchError::TimeoutError { .. } => {
                "The upstream site is slow; raise http.timeout_seconds or retry later"
            }
            CatchError::HttpError(_) | CatchError::NoUsableDocument { .. } => {
                "Check network connectivity and the source URLs in the config file"
            }
            CatchError::SelectorError { .. } => {
                "Fix the selectors list of this source in the config file"
            }
            CatchError::ParseError { .. } => "Check the value format in the config file",
            CatchError::ConfigError { .. }
            | CatchError::ConfigValidationError { .. }
            | CatchError::InvalidConfigValueError { .. }
            | CatchError::MissingConfigError { .. } => {
                "Review catch-report.toml; run with --dry-run to inspect the effective settings"
            }
            CatchError::IoError(_) | CatchError::CsvError(_) | CatchError::RenderError { .. } => {
                "Make sure the output directory exists and is writable"
            }
            CatchError::SerializationError(_) => "Report data could not be serialized",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("データ取得に失敗しました: {}", self),
            ErrorCategory::Extraction => format!("釣果の解析に失敗しました: {}", self),
            ErrorCategory::Configuration => format!("設定ファイルに問題があります: {}", self),
            ErrorCategory::Output => format!("レポートを書き出せませんでした: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_failures_are_not_fatal() {
        let err = CatchError::TimeoutError {
            url: "https://example.com".to_string(),
            seconds: 15,
        };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(err.severity() < ErrorSeverity::High);
    }

    #[test]
    fn test_output_failures_are_critical() {
        let err = CatchError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("denied"));
    }
}

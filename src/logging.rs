use crate::errors::{ChatError, ChatResult};
use flexi_logger::{FileSpec, Logger, LoggerHandle};

/// Starts the file logger. The TUI owns the terminal, so nothing is ever
/// logged to stderr while the alternate screen is active.
pub fn init_logging(log_level: &str) -> ChatResult<LoggerHandle> {
    Logger::try_with_env_or_str(log_level)
        .map_err(|e| ChatError::config_error(format!("invalid log level: {}", e)))?
        .log_to_file(FileSpec::default().basename("parlance").suppress_timestamp())
        .start()
        .map_err(|e| ChatError::config_error(format!("failed to start logger: {}", e)))
}

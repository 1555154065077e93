use crate::utils::output::OutputStyle;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Result type alias for consistent error handling across the application
pub type AppResult<T> = Result<T, AppError>;

pub fn report_error(err: &AppError) {
    match err {
        AppError::Backend(msg) => {
            println!("🌐 {}", OutputStyle::error(&format!("Backend: {}", msg)));
        }
        AppError::NotFound(msg) => {
            println!("⚠️  {}", OutputStyle::warning(msg));
        }
        AppError::Import(msg) => {
            println!("⚠️  {}", OutputStyle::warning(&format!("Import: {}", msg)));
        }
        AppError::Config(msg) => {
            eprintln!("❌ {}", OutputStyle::error(msg));
        }
        AppError::Io(e) => {
            eprintln!("❌ {}", OutputStyle::error(e));
        }
    }
}

pub fn handle_not_found(item_type: &str, search_term: &str) {
    let msg = format!("{} '{}' not found", item_type, search_term);
    println!("⚠️  {}", OutputStyle::warning(&msg));
}

pub fn print_empty_result(item_type: &str) {
    println!("{}", OutputStyle::muted(&format!("No {} found", item_type)));
}

pub fn print_cancelled(msg: &str) {
    println!("⏹️  {}", OutputStyle::muted(msg));
}

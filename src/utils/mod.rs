pub mod error;
pub mod format;
pub mod interactive;
pub mod output;
pub mod stats;

pub use error::{handle_not_found, print_cancelled, print_empty_result, AppError, AppResult};
pub use format::{format_date, format_datetime, progress_bar, truncate_string};
pub use interactive::{open_in_editor, prompt_input, prompt_required, prompt_yes_no, select_from_list};
pub use output::{
    apply_ui_settings, print_network_error, print_success, print_system_error, print_warning,
    OutputStyle,
};

use chrono::{DateTime, Utc};

const DATE_FORMAT: &str = "%d/%m/%Y";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format(DATE_FORMAT).to_string()
}

pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Render a 10-cell progress bar. Stored values outside 0-100 are clamped
/// for display only.
pub fn progress_bar(progreso: i32) -> String {
    let clamped = progreso.clamp(0, 100);
    let filled = (clamped as usize) / 10;
    format!(
        "[{}{}] {}%",
        "█".repeat(filled),
        "░".repeat(10 - filled),
        clamped
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_clamps_display() {
        assert_eq!(progress_bar(150), format!("[{}] 100%", "█".repeat(10)));
        assert_eq!(progress_bar(-10), format!("[{}] 0%", "░".repeat(10)));
        assert_eq!(progress_bar(50), format!("[{}{}] 50%", "█".repeat(5), "░".repeat(5)));
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("hola", 10), "hola");
        assert_eq!(truncate_string("una descripcion larga", 10), "una des...");
    }
}

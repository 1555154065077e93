use crate::models::BoardStats;
use crate::utils::output::OutputStyle;

/// Utilities for displaying board statistics
pub struct StatsCalculator;

impl StatsCalculator {
    /// Print the stat tiles shown above a project board
    pub fn print_board_stats(stats: &BoardStats) {
        OutputStyle::print_header("📊 Estadísticas");

        OutputStyle::print_field_colored("Total", &stats.total.to_string(), OutputStyle::info);
        OutputStyle::print_field_colored(
            "Completados",
            &stats.completed.to_string(),
            OutputStyle::success,
        );
        OutputStyle::print_field_colored(
            "En Proceso",
            &stats.in_process.to_string(),
            OutputStyle::info,
        );
        OutputStyle::print_field_colored(
            "Progreso",
            &format!("{}%", stats.avg_progress),
            OutputStyle::warning,
        );
    }
}

// ============================================================================
// Download Progress Bar
// ============================================================================

use std::io::{self, Write};

use colored::*;

const BAR_WIDTH: usize = 30;

/// Print a single-line progress bar: [-----     ] 40% 1.20 / 3.00 MB
pub fn print_progress_bar(current: u64, total: u64) {
    if total == 0 {
        return;
    }
    print!("\r  [{}] {}% {}",
        render_bar(current, total),
        percent(current, total).to_string().bright_green(),
        sizes(current, total)
    );
    io::stdout().flush().ok();
}

/// Clear the progress bar line
pub fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(80));
    io::stdout().flush().ok();
}

fn percent(current: u64, total: u64) -> u32 {
    ((current.min(total) as f64 / total as f64) * 100.0) as u32
}

fn render_bar(current: u64, total: u64) -> String {
    let filled = ((current.min(total) as f64 / total as f64) * BAR_WIDTH as f64) as usize;
    "-".repeat(filled) + &" ".repeat(BAR_WIDTH - filled)
}

fn sizes(current: u64, total: u64) -> String {
    format!("{:.2} / {:.2} MB", mb(current), mb(total))
}

pub fn mb(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_has_fixed_width() {
        for current in [0, 1, 50, 99, 100, 150] {
            assert_eq!(render_bar(current, 100).chars().count(), BAR_WIDTH);
        }
    }

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(render_bar(0, 100), " ".repeat(BAR_WIDTH));
        assert_eq!(render_bar(50, 100), "-".repeat(15) + &" ".repeat(15));
        assert_eq!(render_bar(100, 100), "-".repeat(BAR_WIDTH));
    }

    #[test]
    fn percent_is_capped() {
        assert_eq!(percent(40, 100), 40);
        assert_eq!(percent(200, 100), 100);
    }
}

use colored::{Color, Colorize};
use supports_color::Stream;

use crate::filesystem::FileKind;

/// Turns colour off when stdout cannot show it.
pub fn configure_colors() {
    if supports_color::on(Stream::Stdout).is_none() {
        colored::control::set_override(false);
    }
}

fn kind_color(kind: FileKind) -> Color {
    match kind {
        FileKind::Jpeg => Color::Yellow,
        FileKind::Png => Color::Cyan,
        FileKind::Other => Color::BrightBlack,
    }
}

pub(crate) fn progress_line(kind: FileKind, file_name: &str) -> String {
    format!(
        "{} {}",
        format!("[{kind}]").color(kind_color(kind)).bold(),
        file_name
    )
}

pub fn print_progress(kind: FileKind, file_name: &str) {
    println!("{}", progress_line(kind, file_name));
}

use nalgebra::Matrix4;
use std::io::{self, Write};

const HELP_LINES: [&str; 12] = [
    "Controls:",
    "Arrows - Move X/Y",
    "PgUp/PgDn - Move Z",
    "Q/E - Rotate X",
    "W/S - Rotate Y",
    "A/D - Rotate Z",
    "+/- - Scale",
    "1,2,3 - Views",
    "ESC - Main view",
    "R - Reset transform",
    "H - Show this help",
    "M - Show matrix",
];

/// Fixed help listing, framed by header and footer lines.
pub fn help_text() -> String {
    let mut text = String::from("\n=== HELP ===\n");
    for line in HELP_LINES {
        text.push_str(line);
        text.push('\n');
    }
    text.push_str("============\n");
    text
}

/// The matrix row by row, each value right-aligned in a 7-wide field with 3 decimals.
pub fn format_matrix(matrix: &Matrix4<f32>) -> String {
    let mut text = String::from("\n=== TRANSFORM MATRIX ===\n");
    for row in matrix.row_iter() {
        let cells: Vec<String> = row.iter().map(|v| format!("{:7.3}", v)).collect();
        text.push_str(&cells.join(" "));
        text.push('\n');
    }
    text.push_str("=====================\n");
    text
}

pub fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(help_text().as_bytes())?;
    out.flush()
}

pub fn print_matrix<W: Write>(out: &mut W, matrix: &Matrix4<f32>) -> io::Result<()> {
    out.write_all(format_matrix(matrix).as_bytes())?;
    out.flush()
}

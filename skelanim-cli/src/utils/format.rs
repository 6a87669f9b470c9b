//! Formatting utilities

use glam::Mat4;
use skelanim::convention::MatrixLayout;

/// Format seconds with millisecond precision
pub fn format_seconds(seconds: f32) -> String {
    format!("{seconds:.3}s")
}

/// Rows of a matrix in the requested layout
///
/// Column-major output prints the stored columns as lines, so the text matches
/// the order of the flattened buffer.
pub fn matrix_lines(m: &Mat4, layout: MatrixLayout) -> [[f32; 4]; 4] {
    match layout {
        MatrixLayout::ColumnMajor => m.to_cols_array_2d(),
        MatrixLayout::RowMajor => m.transpose().to_cols_array_2d(),
    }
}

/// Format a matrix as four bracketed lines
pub fn format_matrix(m: &Mat4, layout: MatrixLayout) -> String {
    matrix_lines(m, layout)
        .iter()
        .map(|line| {
            let cells: Vec<String> = line
                .iter()
                .map(|v| format!("{:>8.4}", clean_zero(*v)))
                .collect();
            format!("[{}]", cells.join(" "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapse `-0.0` so identity matrices print cleanly
fn clean_zero(v: f32) -> f32 {
    if v == 0.0 { 0.0 } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(1.5), "1.500s");
        assert_eq!(format_seconds(0.0), "0.000s");
    }

    #[test]
    fn test_format_matrix_layouts() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));

        let column = format_matrix(&m, MatrixLayout::ColumnMajor);
        let last = column.lines().last().unwrap();
        assert_eq!(last, "[  1.0000   2.0000   3.0000   1.0000]");

        let row = format_matrix(&m, MatrixLayout::RowMajor);
        let first = row.lines().next().unwrap();
        assert_eq!(first, "[  1.0000   0.0000   0.0000   1.0000]");
    }

    #[test]
    fn test_negative_zero_is_clean() {
        let text = format_matrix(&(Mat4::IDENTITY * -0.0), MatrixLayout::ColumnMajor);
        assert!(!text.contains("-0.0000"));
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN_WIDTH: usize = 4;

/// Render an aligned, space-separated table with a dashed divider under the header.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain([header.chars().count(), MIN_COLUMN_WIDTH])
                .max()
                .unwrap_or(MIN_COLUMN_WIDTH)
        })
        .collect();
    shrink_to_fit(&mut widths, headers, options.max_width);

    let header_line = join_cells(headers.iter().zip(&widths).map(|(header, width)| {
        pad(&truncate(header, *width), *width, false)
    }));
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        lines.push(join_cells(widths.iter().enumerate().map(|(index, width)| {
            let cell = truncate(row.get(index).map_or("-", String::as_str), *width);
            let padded = pad(&cell, *width, is_count(&cell));
            if options.color {
                highlight(&cell, padded)
            } else {
                padded
            }
        })));
    }
    lines.join("\n")
}

fn join_cells(cells: impl Iterator<Item = String>) -> String {
    cells.collect::<Vec<_>>().join("  ").trim_end().to_string()
}

/// Narrow the widest columns one char at a time until the table fits.
fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let separators = widths.len().saturating_sub(1) * 2;

    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > headers[*idx].chars().count().max(MIN_COLUMN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);
        let Some(idx) = widest else {
            break;
        };
        widths[idx] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn is_count(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|ch| ch.is_ascii_digit())
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(value.chars().count()));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

fn highlight(cell: &str, padded: String) -> String {
    let code = match cell {
        "success" | "true" => "32",
        "false" => "33",
        "error" => "31",
        _ => return padded,
    };
    format!("\u{1b}[{code}m{padded}\u{1b}[0m")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn columns_align_and_counts_right_align() {
        let rows = vec![
            vec!["remaining_filleuls".to_string(), "7".to_string()],
            vec!["available_parrains".to_string(), "120".to_string()],
        ];
        let table = render_table(&["key", "value"], &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].ends_with("    7"));
        assert!(lines[3].ends_with("  120"));
    }

    #[test]
    fn wide_columns_are_truncated_to_fit() {
        let rows = vec![vec!["Nom".to_string(), "x".repeat(80)]];
        let table = render_table(
            &["key", "value"],
            &rows,
            TableOptions {
                max_width: Some(40),
                color: false,
            },
        );
        assert!(table.lines().all(|line| line.chars().count() <= 40));
        assert!(table.contains('…'));
    }

    #[test]
    fn accented_names_keep_alignment() {
        let rows = vec![
            vec!["Léa".to_string(), "B1".to_string()],
            vec!["Hugo".to_string(), "B2".to_string()],
        ];
        let table = render_table(&["prenom", "promotion"], &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[2].find("B1").map(|i| lines[2][..i].chars().count()), Some(8));
        assert_eq!(lines[3].find("B2").map(|i| lines[3][..i].chars().count()), Some(8));
    }
}

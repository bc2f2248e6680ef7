use std::sync::LazyLock;

use regex::Regex;

use super::MIN_LIST_RUN;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,3}) (.+)$").expect("heading pattern"));
static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- ([^-].*)$").expect("list item pattern"));

/// Classification of a single input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// A surviving row of a table run, cells already trimmed.
    TableRow(Vec<&'a str>),
    /// A line inside a table run that contributes no row: divider lines and
    /// rows with fewer than two non-empty cells.
    Separator,
    Heading { level: u8, text: &'a str },
    ListItem(&'a str),
    Prose(&'a str),
}

/// Classifies every line. The result has the same length as `lines`.
pub fn classify<'a>(lines: &[&'a str]) -> Vec<LineKind<'a>> {
    let mut kinds = Vec::with_capacity(lines.len());
    let mut idx = 0;
    while idx < lines.len() {
        if is_pipe_line(lines[idx]) {
            let end = lines[idx..]
                .iter()
                .position(|line| !is_pipe_line(line))
                .map_or(lines.len(), |offset| idx + offset);
            classify_table_run(&lines[idx..end], &mut kinds);
            idx = end;
        } else {
            kinds.push(classify_line(lines[idx]));
            idx += 1;
        }
    }
    demote_short_list_runs(&mut kinds, lines);
    kinds
}

fn is_pipe_line(line: &str) -> bool {
    line.matches('|').count() >= 2
}

fn is_separator(line: &str) -> bool {
    line.chars().all(|c| matches!(c, '-' | '=' | ':' | '|' | ' ' | '\t'))
}

fn classify_table_run<'a>(run: &[&'a str], kinds: &mut Vec<LineKind<'a>>) {
    let rows: Vec<Option<Vec<&'a str>>> = run
        .iter()
        .map(|&line| {
            if is_separator(line) {
                None
            } else {
                split_cells(line)
            }
        })
        .collect();

    if rows.iter().all(Option::is_none) {
        // Nothing table-like survived: leave these lines to the ordinary rules.
        kinds.extend(run.iter().map(|&line| classify_line(line)));
        return;
    }

    kinds.extend(rows.into_iter().map(|row| match row {
        Some(cells) => LineKind::TableRow(cells),
        None => LineKind::Separator,
    }));
}

/// Splits a pipe line into trimmed cells, dropping the empty cells produced
/// by leading and trailing delimiters. Returns `None` for lines with fewer
/// than two non-empty cells.
fn split_cells(line: &str) -> Option<Vec<&str>> {
    let mut cells: Vec<&str> = line.split('|').map(str::trim).collect();
    if cells.first().is_some_and(|cell| cell.is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|cell| cell.is_empty()) {
        cells.pop();
    }
    let non_empty = cells.iter().filter(|cell| !cell.is_empty()).count();
    (non_empty >= 2).then_some(cells)
}

fn classify_line(line: &str) -> LineKind<'_> {
    if let Some(caps) = HEADING.captures(line) {
        let text = caps.get(2).map_or("", |m| m.as_str()).trim();
        if !text.is_empty() {
            let level = caps.get(1).map_or(1, |m| m.as_str().len()) as u8;
            return LineKind::Heading { level, text };
        }
    }
    if let Some(caps) = LIST_ITEM.captures(line) {
        let text = caps.get(1).map_or("", |m| m.as_str()).trim();
        if !text.is_empty() {
            return LineKind::ListItem(text);
        }
    }
    LineKind::Prose(line)
}

fn demote_short_list_runs<'a>(kinds: &mut [LineKind<'a>], lines: &[&'a str]) {
    let mut idx = 0;
    while idx < kinds.len() {
        if !matches!(kinds[idx], LineKind::ListItem(_)) {
            idx += 1;
            continue;
        }
        let end = kinds[idx..]
            .iter()
            .position(|kind| !matches!(kind, LineKind::ListItem(_)))
            .map_or(kinds.len(), |offset| idx + offset);
        if end - idx < MIN_LIST_RUN {
            for pos in idx..end {
                kinds[pos] = LineKind::Prose(lines[pos]);
            }
        }
        idx = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_levels_one_to_three() {
        let kinds = classify(&["# One", "## Two", "### Three", "#### Four"]);
        assert_eq!(kinds[0], LineKind::Heading { level: 1, text: "One" });
        assert_eq!(kinds[1], LineKind::Heading { level: 2, text: "Two" });
        assert_eq!(kinds[2], LineKind::Heading { level: 3, text: "Three" });
        assert_eq!(kinds[3], LineKind::Prose("#### Four"));
    }

    #[test]
    fn heading_needs_space_and_text() {
        let kinds = classify(&["#Title", "# ", "#   "]);
        assert!(kinds.iter().all(|k| matches!(k, LineKind::Prose(_))));
    }

    #[test]
    fn separator_lines_inside_run_are_marked() {
        let kinds = classify(&["| A | B |", "|---|:---:|", "| 1 | 2 |"]);
        assert_eq!(kinds[0], LineKind::TableRow(vec!["A", "B"]));
        assert_eq!(kinds[1], LineKind::Separator);
        assert_eq!(kinds[2], LineKind::TableRow(vec!["1", "2"]));
    }

    #[test]
    fn interior_empty_cells_are_kept() {
        assert_eq!(split_cells("| a | | b |"), Some(vec!["a", "", "b"]));
    }

    #[test]
    fn single_cell_rows_are_dropped() {
        assert_eq!(split_cells("| only |"), None);
        assert_eq!(split_cells("|  |  |"), None);
    }

    #[test]
    fn run_without_rows_falls_back_to_line_rules() {
        let kinds = classify(&["| note |", "|---|"]);
        assert_eq!(kinds, vec![LineKind::Prose("| note |"), LineKind::Prose("|---|")]);
    }

    #[test]
    fn list_runs_need_two_lines() {
        let kinds = classify(&["- alone", "", "- one", "- two"]);
        assert_eq!(kinds[0], LineKind::Prose("- alone"));
        assert_eq!(kinds[2], LineKind::ListItem("one"));
        assert_eq!(kinds[3], LineKind::ListItem("two"));
    }

    #[test]
    fn double_dash_is_not_a_list_item() {
        let kinds = classify(&["- --flag", "- --other"]);
        assert!(kinds.iter().all(|k| matches!(k, LineKind::Prose(_))));
    }
}

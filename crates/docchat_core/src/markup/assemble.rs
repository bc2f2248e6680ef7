use super::classify::LineKind;
use super::inline::emphasize;

const LINE_BREAK: &str = "<br>";

/// Groups classified lines into blocks and emits markup.
pub(super) fn assemble(kinds: &[LineKind<'_>]) -> String {
    let mut out = String::new();
    let mut idx = 0;
    while idx < kinds.len() {
        match &kinds[idx] {
            LineKind::Heading { level, text } => {
                out.push_str(&format!("<h{level}>{}</h{level}>", emphasize(text)));
                idx += 1;
            }
            LineKind::TableRow(_) | LineKind::Separator => {
                let end = run_end(kinds, idx, |kind| {
                    matches!(kind, LineKind::TableRow(_) | LineKind::Separator)
                });
                push_table(&mut out, &kinds[idx..end]);
                idx = end;
            }
            LineKind::ListItem(_) => {
                let end = run_end(kinds, idx, |kind| matches!(kind, LineKind::ListItem(_)));
                push_list(&mut out, &kinds[idx..end]);
                idx = end;
            }
            LineKind::Prose(_) => {
                let end = run_end(kinds, idx, |kind| matches!(kind, LineKind::Prose(_)));
                push_paragraph(&mut out, &kinds[idx..end]);
                idx = end;
            }
        }
    }
    out
}

fn run_end(kinds: &[LineKind<'_>], start: usize, same: impl Fn(&LineKind<'_>) -> bool) -> usize {
    kinds[start..]
        .iter()
        .position(|kind| !same(kind))
        .map_or(kinds.len(), |offset| start + offset)
}

fn push_table(out: &mut String, run: &[LineKind<'_>]) {
    out.push_str("<table>");
    let rows = run.iter().filter_map(|kind| match kind {
        LineKind::TableRow(cells) => Some(cells),
        _ => None,
    });
    for (row_idx, cells) in rows.enumerate() {
        let tag = if row_idx == 0 { "th" } else { "td" };
        out.push_str("<tr>");
        for cell in cells {
            out.push_str(&format!("<{tag}>{}</{tag}>", emphasize(cell)));
        }
        out.push_str("</tr>");
    }
    out.push_str("</table>");
}

fn push_list(out: &mut String, run: &[LineKind<'_>]) {
    out.push_str("<ul>");
    for kind in run {
        if let LineKind::ListItem(text) = kind {
            out.push_str(&format!("<li>{}</li>", emphasize(text)));
        }
    }
    out.push_str("</ul>");
}

/// Prose lines are joined with line breaks. Blank lines at the edges of a
/// paragraph border a block element or the document and are dropped.
fn push_paragraph(out: &mut String, run: &[LineKind<'_>]) {
    let lines: Vec<&str> = run
        .iter()
        .filter_map(|kind| match kind {
            LineKind::Prose(line) => Some(*line),
            _ => None,
        })
        .collect();
    let Some(first) = lines.iter().position(|line| !line.trim().is_empty()) else {
        return;
    };
    let last = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .unwrap_or(first);
    let rendered: Vec<_> = lines[first..=last]
        .iter()
        .map(|line| emphasize(line))
        .collect();
    out.push_str(&rendered.join(LINE_BREAK));
}

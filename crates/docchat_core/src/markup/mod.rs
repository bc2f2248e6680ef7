//! Heuristic plain-text to display-markup renderer.
//!
//! Model output is loosely structured: headings, emphasis, bullet lists and
//! pipe-delimited tables, with no guarantee of well-formedness. Rendering runs
//! in two stages:
//!
//! 1. [`classify`](classify::classify) assigns every line one [`LineKind`]
//!    (table row, separator, heading, list item, prose). Table runs and list
//!    runs are decided here, including both fallbacks.
//! 2. [`assemble`](assemble::assemble) groups adjacent lines of the same kind
//!    into blocks and emits markup, applying inline emphasis to every text
//!    fragment.
//!
//! Fixed policies:
//! - The first surviving row of a table is its header row. Cell contents never
//!   promote a row to header status.
//! - A list needs at least [`MIN_LIST_RUN`] consecutive `- ` lines; a lone
//!   hyphenated line stays prose.
//! - Only the empty cells made by a leading or trailing `|` are dropped. An
//!   empty cell between two delimiters is kept, so `a || b` is a three-cell
//!   row with a blank middle.
//!
//! Input is trusted backend text and is **not** escaped. Any `<` in the input
//! reaches the output unchanged.
//!
//! Rendering is not idempotent: feeding markup back in may convert it again.

mod assemble;
mod classify;
mod inline;

pub use classify::LineKind;

/// Minimum number of consecutive `- ` lines that form a list.
pub const MIN_LIST_RUN: usize = 2;

/// Renders raw reply text into display markup. Never fails; text that matches
/// no rule passes through unchanged.
pub fn render(text: &str) -> String {
    let normalized = normalize_line_breaks(text);
    let lines: Vec<&str> = normalized.split('\n').collect();
    let kinds = classify::classify(&lines);
    assemble::assemble(&kinds)
}

fn normalize_line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

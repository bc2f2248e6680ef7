use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

// Lazy match keeps `**` out of the inner text.
static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern"));
// Inner text starts and ends with a non-space and holds no `*`.
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^\s*](?:[^*]*[^\s*])?)\*").expect("italic pattern"));

/// Applies emphasis to a single text fragment. Bold runs first so a `**x**`
/// span is never picked apart by the italic rule.
pub(super) fn emphasize(text: &str) -> Cow<'_, str> {
    if !text.contains('*') {
        return Cow::Borrowed(text);
    }
    let bold = BOLD.replace_all(text, "<strong>$1</strong>");
    let italic = ITALIC.replace_all(&bold, "<em>$1</em>").into_owned();
    Cow::Owned(italic)
}

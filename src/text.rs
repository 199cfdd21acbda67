//! Text helpers shared by the renderers.

const ELLIPSIS: &str = "...";

/// Shortens `text` to at most `limit` characters, appending an ellipsis when
/// the text had to be cut.
///
/// The result never exceeds `limit` characters, including when `limit` is
/// smaller than the ellipsis itself.  Counting is per `char`, so multi-byte
/// labels are never split inside a code point.  Reapplying the same limit to
/// an already shortened string is a no-op.
pub fn shorten(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }

    if limit <= ELLIPSIS.len() {
        return ELLIPSIS.chars().take(limit).collect();
    }

    let keep = limit - ELLIPSIS.len();
    let mut shortened: String = text.chars().take(keep).collect();
    shortened.push_str(ELLIPSIS);
    shortened
}

//! Shared rendering utilities.
//!
//! Ranges are char indices, never byte indices, so multi-byte titles highlight
//! correctly.

const BOLD: &str = "\u{1b}[1m";
const UNDERLINE: &str = "\u{1b}[4m";
const RESET: &str = "\u{1b}[0m";

/// Wraps the highlighted char ranges of `text` for display.
///
/// With `ansi` the ranges are rendered bold and underlined; without it they
/// are wrapped in square brackets. Ranges must be sorted and non-overlapping.
///
/// # Example
///
/// ```rust
/// use bookshelf::ui::helpers::highlight;
///
/// assert_eq!(highlight("Rust in Action", &[(0, 4)], false), "[Rust] in Action");
/// ```
#[must_use]
pub fn highlight(text: &str, ranges: &[(usize, usize)], ansi: bool) -> String {
    if ranges.is_empty() {
        return text.to_string();
    }

    let (open, close) = if ansi {
        (format!("{BOLD}{UNDERLINE}"), RESET.to_string())
    } else {
        ("[".to_string(), "]".to_string())
    };

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + ranges.len() * (open.len() + close.len()));
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        out.extend(&chars[current_pos..start]);
        out.push_str(&open);
        out.extend(&chars[start..end]);
        out.push_str(&close);
        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
    out
}

/// Renders `text` bold when `ansi` is set.
#[must_use]
pub fn bold(text: &str, ansi: bool) -> String {
    if ansi {
        format!("{BOLD}{text}{RESET}")
    } else {
        text.to_string()
    }
}

//! Plain-text renderer for the search view model.
//!
//! Writes a complete frame to any [`Write`] sink. The layout is:
//!
//! ```text
//! search: <raw query>  (loading...)
//! results for "<results query>": <total> items, page <n> of <m>
//!
//!  1. * Title                       [id]
//!     by Author One, Author Two
//!     Description excerpt...
//!
//! error: <last error>
//! ```

use crate::domain::error::Result;
use crate::ui::helpers::{bold, highlight};
use crate::ui::viewmodel::{BookCard, SearchViewModel};
use std::io::Write;

/// Rendering switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Emit ANSI styling for highlights and headings.
    pub ansi: bool,
}

/// Renders `vm` to `out`.
///
/// # Errors
///
/// Returns [`BookshelfError::Io`](crate::BookshelfError::Io) if writing fails.
pub fn render<W: Write>(vm: &SearchViewModel, options: RenderOptions, out: &mut W) -> Result<()> {
    let loading = if vm.is_loading { "  (loading...)" } else { "" };
    writeln!(out, "search: {}{loading}", vm.query)?;
    writeln!(
        out,
        "results for \"{}\": {} items, page {} of {}",
        vm.results_query, vm.pagination.total_items, vm.pagination.current_page, vm.pagination.total_pages
    )?;
    writeln!(out)?;

    if let Some(empty) = &vm.empty_state {
        writeln!(out, "  {}", bold(&empty.message, options.ansi))?;
        writeln!(out, "  {}", empty.subtitle)?;
    }

    for (idx, card) in vm.cards.iter().enumerate() {
        render_card(idx + 1, card, options, out)?;
    }

    if let Some(error) = &vm.error {
        writeln!(out, "error: {error}")?;
    }

    out.flush()?;
    Ok(())
}

fn render_card<W: Write>(position: usize, card: &BookCard, options: RenderOptions, out: &mut W) -> Result<()> {
    let star = if card.is_favorite { '*' } else { ' ' };
    let title = highlight(&card.title, &card.highlight_ranges, options.ansi);

    writeln!(out, "{position:>2}. {star} {title}  [{}]", card.id)?;
    writeln!(out, "      by {}", card.authors)?;
    writeln!(out, "      {}", card.excerpt)?;
    if let Some(link) = &card.preview_link {
        writeln!(out, "      {link}")?;
    }
    writeln!(out)?;
    Ok(())
}

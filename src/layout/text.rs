//! Fixed-width text primitives.
//!
//! All widths are terminal display columns: CJK ideographs count 2,
//! combining marks count 0. Splits and truncation happen on grapheme
//! cluster boundaries so a base character never loses its accents.
//!
//! - [`wrap`]: greedy word wrap with hard split of over-long words
//! - [`pad`]: pad or truncate to an exact width per alignment

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::document::Align;

/// Display width of `text` in columns.
#[inline]
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Wrap `text` into lines no wider than `width`.
///
/// Words are the whitespace-delimited runs of `text`; they are joined by a
/// single space. A word wider than `width` is hard-split into `width`-sized
/// fragments, and the last fragment may take following words. Empty (or
/// all-whitespace) text yields a single empty line.
///
/// A single grapheme wider than `width` (a wide character in a 1-column
/// cell) becomes its own line; [`pad`] then truncates it away.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = display_width(word);

        if word_width > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut fragments = hard_split(word, width);
            // hard_split never returns an empty vec for a non-empty word
            let last = fragments.pop().unwrap_or_default();
            lines.extend(fragments);
            current_width = display_width(&last);
            current = last;
        } else if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            current_width = word_width;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Split `word` into consecutive fragments of at most `width` columns.
fn hard_split(word: &str, width: usize) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for grapheme in word.graphemes(true) {
        let gw = display_width(grapheme);
        if current_width + gw > width && !current.is_empty() {
            fragments.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push_str(grapheme);
        current_width += gw;
    }

    if !current.is_empty() {
        fragments.push(current);
    }
    fragments
}

/// Longest prefix of `text` (whole graphemes) that fits in `width` columns.
fn truncate(text: &str, width: usize) -> (&str, usize) {
    let mut end = 0;
    let mut used = 0;
    for (offset, grapheme) in text.grapheme_indices(true) {
        let gw = display_width(grapheme);
        if used + gw > width {
            break;
        }
        used += gw;
        end = offset + grapheme.len();
    }
    (&text[..end], used)
}

/// Fit `text` into exactly `width` columns.
///
/// Text wider than `width` is truncated. Otherwise the remaining columns are
/// filled with spaces: after the text for [`Align::Left`], before it for
/// [`Align::Right`], and split `floor/ceil` around it for [`Align::Center`]
/// (the odd space goes on the right). Padding an already exact-width string
/// returns it unchanged.
pub fn pad(text: &str, width: usize, align: Align) -> String {
    let (fitted, used) = truncate(text, width);
    let padding = width - used;

    let (left, right) = match align {
        Align::Left => (0, padding),
        Align::Right => (padding, 0),
        Align::Center => (padding / 2, padding - padding / 2),
    };

    let mut out = String::with_capacity(fitted.len() + padding);
    out.extend(std::iter::repeat_n(' ', left));
    out.push_str(fitted);
    out.extend(std::iter::repeat_n(' ', right));
    out
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wrap_fits_on_one_line() {
        assert_eq!(wrap("Hi", 5), vec!["Hi"]);
        assert_eq!(wrap("ab cd", 5), vec!["ab cd"]);
    }

    #[test]
    fn test_wrap_breaks_at_words() {
        assert_eq!(
            wrap("the quick brown fox", 10),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn test_wrap_collapses_whitespace() {
        assert_eq!(wrap("  a   b\n c  ", 10), vec!["a b c"]);
    }

    #[test]
    fn test_wrap_empty_yields_one_empty_line() {
        assert_eq!(wrap("", 4), vec![""]);
        assert_eq!(wrap("   ", 4), vec![""]);
    }

    #[test]
    fn test_wrap_hard_splits_long_word() {
        let lines = wrap("Supercalifragilistic", 5);
        assert_eq!(lines, vec!["Super", "calif", "ragil", "istic"]);
        assert!(lines.iter().all(|l| display_width(l) <= 5));
    }

    #[test]
    fn test_wrap_long_word_tail_takes_next_word() {
        assert_eq!(wrap("abcdefg hi", 5), vec!["abcde", "fg hi"]);
    }

    #[test]
    fn test_wrap_long_word_after_short_word() {
        assert_eq!(wrap("a bcdefgh", 4), vec!["a", "bcde", "fgh"]);
    }

    #[test]
    fn test_wrap_wide_characters() {
        // Each ideograph is two columns wide.
        let lines = wrap("漢字漢字漢", 4);
        assert_eq!(lines, vec!["漢字", "漢字", "漢"]);
        assert!(lines.iter().all(|l| display_width(l) <= 4));
    }

    #[test]
    fn test_wrap_keeps_combining_marks_attached() {
        // "e" + COMBINING ACUTE ACCENT stays one grapheme across the split.
        let lines = wrap("cafe\u{301}s", 4);
        assert_eq!(lines, vec!["cafe\u{301}", "s"]);
    }

    #[test]
    fn test_wrap_never_exceeds_width() {
        let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit sed do";
        for width in 1..=12 {
            for line in wrap(text, width) {
                assert!(
                    display_width(&line) <= width,
                    "{:?} wider than {}",
                    line,
                    width
                );
            }
        }
    }

    #[test]
    fn test_pad_left() {
        assert_eq!(pad("Hi", 5, Align::Left), "Hi   ");
    }

    #[test]
    fn test_pad_right() {
        assert_eq!(pad("Hi", 5, Align::Right), "   Hi");
    }

    #[test]
    fn test_pad_center_puts_extra_space_right() {
        assert_eq!(pad("Hi", 5, Align::Center), " Hi  ");
        assert_eq!(pad("Hi", 6, Align::Center), "  Hi  ");
    }

    #[test]
    fn test_pad_truncates() {
        assert_eq!(pad("Hello", 3, Align::Left), "Hel");
        assert_eq!(pad("Hello", 3, Align::Right), "Hel");
        assert_eq!(pad("Hello", 3, Align::Center), "Hel");
    }

    #[test]
    fn test_pad_empty() {
        assert_eq!(pad("", 3, Align::Center), "   ");
    }

    #[test]
    fn test_pad_is_idempotent() {
        for align in [Align::Left, Align::Center, Align::Right] {
            let once = pad("abc", 7, align);
            assert_eq!(pad(&once, 7, align), once);
        }
    }

    #[test]
    fn test_pad_wide_character_truncation_keeps_width() {
        // A 2-column ideograph cannot be half-printed: it is dropped and
        // the cell is filled with spaces.
        assert_eq!(pad("漢", 1, Align::Left), " ");
        assert_eq!(pad("a漢", 2, Align::Left), "a ");
        assert_eq!(display_width(&pad("漢字", 3, Align::Right)), 3);
    }
}

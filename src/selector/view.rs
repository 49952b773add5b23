//! Pure frame composition: selector state in, styled segments out.
//!
//! The surface draws segments in order, one styled write each. Rows are
//! separated by plain line-break segments. The cursor glyph always starts
//! at column `longest + 2`, whichever row is highlighted.

use ratatui::text::Span;

use crate::types::{Choice, ColorPair, Cursor, Title};

use super::theme;

/// Text drawn with a single color pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub colors: ColorPair,
}

impl Segment {
    pub fn new(text: impl Into<String>, colors: ColorPair) -> Self {
        Segment {
            text: text.into(),
            colors,
        }
    }

    fn line_break() -> Self {
        Segment::new("\n", theme::PLAIN)
    }
}

/// Width of a label in terminal cells.
pub fn label_width(label: &str) -> usize {
    Span::raw(label).width()
}

/// Compose one full frame.
///
/// `longest` is the widest label in cells, as computed at render start.
pub fn compose(
    title: Option<&Title>,
    options: &[Choice],
    index: usize,
    cursor: &Cursor,
    longest: usize,
) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(options.len() * 2 + 2);

    if let Some(title) = title {
        segments.push(Segment::new(title.text(), title.colors));
    }

    for (i, option) in options.iter().enumerate() {
        if i == index {
            let padding = longest.saturating_sub(label_width(&option.label)) + 2;
            let padded = format!("{}{}", option.label, " ".repeat(padding));
            segments.push(Segment::new(padded, option.colors));
            segments.push(Segment::new(cursor.glyph().unwrap_or_default(), cursor.colors));
        } else {
            segments.push(Segment::new(option.label.as_str(), option.colors));
        }
        segments.push(Segment::line_break());
    }

    segments
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn options() -> Vec<Choice> {
        vec![
            Choice::new("First Choice", 1),
            Choice::new("2nd Choice", 2),
            Choice::new("Third Choice", 3),
        ]
    }

    /// Rows as (text, colors) lists, split at line breaks, title excluded.
    fn rows(segments: &[Segment]) -> Vec<Vec<&Segment>> {
        let mut rows = vec![Vec::new()];
        for segment in segments {
            if segment.text == "\n" {
                rows.push(Vec::new());
            } else {
                rows.last_mut().unwrap().push(segment);
            }
        }
        rows.pop();
        rows
    }

    #[test]
    fn glyph_column_is_constant_for_every_highlight() {
        let options = options();
        let cursor = Cursor::spinner();
        for index in 0..options.len() {
            let segments = compose(None, &options, index, &cursor, 12);
            let row = &rows(&segments)[index];
            assert_eq!(row.len(), 2, "active row has label and glyph");
            assert_eq!(label_width(&row[0].text), 12 + 2);
            assert_eq!(row[1].text, "<--[|]");
        }
    }

    #[test]
    fn inactive_rows_carry_only_the_label() {
        let options = options();
        let segments = compose(None, &options, 0, &Cursor::spinner(), 12);
        let rows = rows(&segments);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].len(), 1);
        assert_eq!(rows[1][0].text, "2nd Choice");
        assert_eq!(rows[2][0].text, "Third Choice");
    }

    #[test]
    fn title_is_the_first_segment() {
        let title = Title::new("Pick").with_colors(ColorPair::new(Color::White, Color::Black));
        let segments = compose(Some(&title), &options(), 1, &Cursor::spinner(), 12);
        assert_eq!(segments[0], Segment::new("Pick\n", ColorPair::new(Color::White, Color::Black)));
    }

    #[test]
    fn each_segment_keeps_its_own_colors() {
        let red = ColorPair::new(Color::Red, Color::Black);
        let magenta = ColorPair::new(Color::Magenta, Color::Black);
        let options = vec![Choice::new("I don't know", -1).with_colors(red), Choice::new("Yes", 1)];
        let cursor = Cursor::from_glyphs(["<[|]"]).with_colors(magenta);
        let segments = compose(None, &options, 0, &cursor, 12);
        assert_eq!(segments[0].colors, red);
        assert_eq!(segments[1], Segment::new("<[|]", magenta));
        assert_eq!(segments[2].colors, theme::PLAIN);
        assert_eq!(segments[3].colors, theme::OPTION);
    }

    #[test]
    fn glyph_follows_cursor_step() {
        let mut cursor = Cursor::spinner();
        cursor.advance();
        cursor.advance();
        let segments = compose(None, &options(), 0, &cursor, 12);
        assert_eq!(segments[1].text, "<--[-]");
    }

    #[test]
    fn wide_labels_are_padded_by_cell_width() {
        let options = vec![Choice::new("日本", 1), Choice::new("abcd", 2)];
        let segments = compose(None, &options, 0, &Cursor::spinner(), 4);
        assert_eq!(segments[0].text, "日本  ");
        assert_eq!(label_width(&segments[0].text), 6);
    }
}

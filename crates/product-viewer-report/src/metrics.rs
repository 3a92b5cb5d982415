//! Standard-14 Helvetica font metrics
//!
//! Advance widths in 1/1000 em for the printable ASCII range, taken from the
//! Adobe AFM files. Characters outside that range use an average width.

/// The two faces used by the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    /// PostScript name of the base font
    pub fn base_font(&self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }

    /// Name of the font in the page resource dictionary
    pub fn resource_name(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    fn widths(&self) -> &'static [u16; 95] {
        match self {
            Font::Regular => &HELVETICA,
            Font::Bold => &HELVETICA_BOLD,
        }
    }

    /// Advance width of one character in 1/1000 em
    pub fn char_width(&self, c: char) -> u16 {
        match c as u32 {
            code @ 32..=126 => self.widths()[(code - 32) as usize],
            _ => FALLBACK_WIDTH,
        }
    }

    /// Width of `text` in points at `size`
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| self.char_width(c) as u32).sum();
        units as f32 * size / 1000.0
    }
}

const FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Shorten `text` with a trailing "..." until it fits in `max_width` points
///
/// Returns the text unchanged when it already fits, and an empty string
/// when not even the ellipsis fits.
pub fn fit_text(text: &str, font: Font, size: f32, max_width: f32) -> String {
    if font.text_width(text, size) <= max_width {
        return text.to_string();
    }

    let ellipsis = "...";
    let budget = max_width - font.text_width(ellipsis, size);
    if budget < 0.0 {
        return String::new();
    }

    let mut width = 0.0;
    let mut kept = String::new();
    for c in text.chars() {
        width += font.char_width(c) as f32 * size / 1000.0;
        if width > budget {
            break;
        }
        kept.push(c);
    }
    format!("{}{}", kept.trim_end(), ellipsis)
}

/// Wrap text into lines no wider than `max_width`
///
/// Breaks at whitespace; a single word wider than the line is split between
/// characters. Empty text yields no lines.
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if font.text_width(&candidate, size) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        for c in word.chars() {
            current.push(c);
            if font.text_width(&current, size) > max_width && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::replace(&mut current, c.to_string()));
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_widths() {
        assert_eq!(Font::Regular.char_width(' '), 278);
        assert_eq!(Font::Regular.char_width('@'), 1015);
        assert_eq!(Font::Regular.char_width('i'), 222);
        assert_eq!(Font::Regular.char_width('~'), 584);
        assert_eq!(Font::Bold.char_width('@'), 975);
        assert_eq!(Font::Bold.char_width('i'), 278);
        assert_eq!(Font::Bold.char_width('~'), 584);
        assert_eq!(Font::Regular.char_width('é'), FALLBACK_WIDTH);
    }

    #[test]
    fn test_text_width() {
        // "Rate" = 722 + 556 + 278 + 556
        let width = Font::Regular.text_width("Rate", 10.0);
        assert!((width - 21.12).abs() < 0.001);
        assert!(Font::Bold.text_width("Rate", 10.0) > width);
    }

    #[test]
    fn test_fit_text_keeps_short_text() {
        assert_eq!(fit_text("Blue Curtain", Font::Regular, 10.0, 200.0), "Blue Curtain");
    }

    #[test]
    fn test_fit_text_truncates() {
        let long = "Extra Long Premium Blackout Velvet Curtain With Tiebacks";
        let fitted = fit_text(long, Font::Regular, 10.0, 100.0);
        assert!(fitted.ends_with("..."));
        assert!(fitted.len() < long.len());
        assert!(Font::Regular.text_width(&fitted, 10.0) <= 100.0);
    }

    #[test]
    fn test_fit_text_too_narrow() {
        assert_eq!(fit_text("Blue", Font::Regular, 10.0, 5.0), "");
    }

    #[test]
    fn test_wrap_text_breaks_at_words() {
        let name = "Premium Blackout Velvet Curtain With Tiebacks And Thermal Lining 7ft";
        let lines = wrap_text(name, Font::Regular, 10.0, 100.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.join(" "), name);
        for line in &lines {
            assert!(Font::Regular.text_width(line, 10.0) <= 100.0);
        }
    }

    #[test]
    fn test_wrap_text_short_and_empty() {
        assert_eq!(wrap_text("Blue Curtain", Font::Regular, 10.0, 200.0), vec!["Blue Curtain"]);
        assert!(wrap_text("   ", Font::Regular, 10.0, 200.0).is_empty());
    }

    #[test]
    fn test_wrap_text_splits_long_word() {
        let word = "W".repeat(30);
        let lines = wrap_text(&word, Font::Regular, 10.0, 50.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(Font::Regular.text_width(line, 10.0) <= 50.0);
        }
    }
}

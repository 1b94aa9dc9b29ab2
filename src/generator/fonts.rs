// file: src/generator/fonts.rs
// description: standard-14 Helvetica faces, glyph widths and WinAnsi encoding
// reference: Adobe Core14 AFM metrics (Helvetica, Helvetica-Bold)

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

impl FontStyle {
    pub const ALL: [FontStyle; 3] = [FontStyle::Regular, FontStyle::Bold, FontStyle::Italic];

    /// Resource name used in page content streams.
    pub fn resource_name(&self) -> &'static str {
        match self {
            FontStyle::Regular => "F1",
            FontStyle::Bold => "F2",
            FontStyle::Italic => "F3",
        }
    }

    pub fn base_font(&self) -> &'static str {
        match self {
            FontStyle::Regular => "Helvetica",
            FontStyle::Bold => "Helvetica-Bold",
            FontStyle::Italic => "Helvetica-Oblique",
        }
    }

    fn widths(&self) -> &'static [u16; 95] {
        match self {
            FontStyle::Bold => &HELVETICA_BOLD,
            FontStyle::Regular | FontStyle::Italic => &HELVETICA,
        }
    }
}

// Glyph widths in 1/1000 em for ASCII 32..=126.
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

/// Width used for non-ASCII Latin-1 glyphs; close to the lowercase average.
const FALLBACK_WIDTH: u16 = 556;

/// Encode text as WinAnsi bytes. Characters outside Latin-1 become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let code = c as u32;
            if (0x20..=0x7E).contains(&code) || (0xA0..=0xFF).contains(&code) {
                code as u8
            } else {
                b'?'
            }
        })
        .collect()
}

/// Width of `text` in points at `size_pt`.
pub fn text_width_pt(text: &str, style: FontStyle, size_pt: f32) -> f32 {
    let table = style.widths();
    let units: u32 = encode_win_ansi(text)
        .iter()
        .map(|&b| {
            if (32..=126).contains(&b) {
                table[(b - 32) as usize] as u32
            } else {
                FALLBACK_WIDTH as u32
            }
        })
        .sum();
    units as f32 * size_pt / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_replaces_unsupported() {
        assert_eq!(encode_win_ansi("Total"), b"Total".to_vec());
        assert_eq!(encode_win_ansi("Итого"), b"?????".to_vec());
        assert_eq!(encode_win_ansi("é"), vec![0xE9]);
    }

    #[test]
    fn test_text_width() {
        // "A" is 667 units in regular, 722 in bold
        assert!((text_width_pt("A", FontStyle::Regular, 10.0) - 6.67).abs() < 1e-4);
        assert!((text_width_pt("A", FontStyle::Bold, 10.0) - 7.22).abs() < 1e-4);
        assert_eq!(
            text_width_pt("abc", FontStyle::Italic, 12.0),
            text_width_pt("abc", FontStyle::Regular, 12.0)
        );
    }
}

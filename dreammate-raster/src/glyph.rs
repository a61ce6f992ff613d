//! Glyph lookup over the `font8x8` tables.

use font8x8::{BASIC_FONTS, BLOCK_FONTS, BOX_FONTS, GREEK_FONTS, LATIN_FONTS, UnicodeFonts};

/// Drawn for anything the font tables do not cover, emoji included.
const FALLBACK: char = '*';

/// Bitmap for the first character of a cell symbol.
pub(crate) fn bitmap(symbol: &str) -> [u8; 8] {
    let ch = symbol.chars().next().unwrap_or(' ');
    lookup(ch)
        .or_else(|| substitute(ch).and_then(lookup))
        .or_else(|| lookup(FALLBACK))
        .unwrap_or([0; 8])
}

fn lookup(ch: char) -> Option<[u8; 8]> {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| BOX_FONTS.get(ch))
        .or_else(|| BLOCK_FONTS.get(ch))
        .or_else(|| GREEK_FONTS.get(ch))
}

/// Typographic punctuation mapped onto ASCII.
fn substitute(ch: char) -> Option<char> {
    match ch {
        '\u{2010}'..='\u{2015}' => Some('-'),
        '\u{2018}' | '\u{2019}' | '\u{201A}' => Some('\''),
        '\u{201C}' | '\u{201D}' | '\u{201E}' => Some('"'),
        '\u{2026}' => Some('.'),
        '\u{2022}' | '\u{25CF}' => Some('o'),
        _ => None,
    }
}

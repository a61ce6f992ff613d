use std::fmt;
use std::str::FromStr;

use crate::{CaptureError, ParseColorError};

/// An opaque 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);

    pub const fn channels(self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| err())
        };
        Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// One character cell of a captured region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    /// The grapheme drawn in this cell. Empty or " " for blank cells.
    pub symbol: String,
    pub fg: Rgb,
    /// `None` lets the capture background show through.
    pub bg: Option<Rgb>,
    pub bold: bool,
}

impl GridCell {
    pub fn blank() -> Self {
        Self {
            symbol: " ".to_string(),
            fg: Rgb::BLACK,
            bg: None,
            bold: false,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.symbol.trim().is_empty()
    }
}

/// A rectangular grid of styled cells to be rasterized.
///
/// This is the terminal counterpart of "the visible region to capture":
/// frontends render the summary card into a region and hand it to a
/// `RasterCapture` implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRegion {
    width: u16,
    height: u16,
    cells: Vec<GridCell>,
}

impl CaptureRegion {
    /// Create a region of blank cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![GridCell::blank(); width as usize * height as usize],
        }
    }

    /// Build a region from plain text lines, one cell per character.
    pub fn from_lines<S: AsRef<str>>(lines: &[S], fg: Rgb) -> Self {
        let width = lines
            .iter()
            .map(|l| l.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        let width = u16::try_from(width).unwrap_or(u16::MAX);
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        let mut region = Self::new(width, height);
        for (y, line) in lines.iter().take(height as usize).enumerate() {
            for (x, ch) in line.as_ref().chars().take(width as usize).enumerate() {
                region.set(
                    x as u16,
                    y as u16,
                    GridCell {
                        symbol: ch.to_string(),
                        fg,
                        bg: None,
                        bold: false,
                    },
                );
            }
        }
        region
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&GridCell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y as usize * self.width as usize + x as usize)
    }

    /// Replace a cell. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u16, y: u16, cell: GridCell) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.cells[idx] = cell;
    }

    /// Iterate rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// The region's text content, one line per row with trailing blanks trimmed.
    pub fn text(&self) -> String {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|c| c.symbol.as_str())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Encoded image format of a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg { quality: u8 },
    Png,
}

impl ImageFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg { .. } => "jpg",
            ImageFormat::Png => "png",
        }
    }
}

impl Default for ImageFormat {
    fn default() -> Self {
        ImageFormat::Jpeg { quality: 90 }
    }
}

/// Options passed to a `RasterCapture`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureOptions {
    /// Pixel multiplier applied to every cell.
    pub scale: u32,
    /// Fill for cells without their own background.
    pub background: Rgb,
    pub format: ImageFormat,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            scale: 2,
            background: Rgb(0xfd, 0xf6, 0xff),
            format: ImageFormat::default(),
        }
    }
}

impl CaptureOptions {
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }

    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }
}

/// Capability that turns a captured region into encoded image bytes.
///
/// Implementations may fail; callers catch the error and report it
/// instead of propagating it.
pub trait RasterCapture {
    fn capture(
        &self,
        region: &CaptureRegion,
        options: &CaptureOptions,
    ) -> Result<Vec<u8>, CaptureError>;
}

//! A `printpdf`-backed implementation of the page surface.
//!
//! [`PdfSurface`] drives a single-page document through the builtin Helvetica
//! faces, so no font files need to be shipped or discovered.  The surface
//! speaks top-left-origin point coordinates and converts them to printpdf's
//! bottom-left-origin millimetres at the write boundary.
//!
//! Builtin fonts expose no glyph metrics, so horizontal advancement and
//! right-alignment work from an average advance width.  That keeps column
//! math deterministic at the cost of exact visual alignment for unusually
//! wide or narrow labels.

use std::io::{BufWriter, Write};

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use crate::surface::{Cursor, Direction, PageSurface, SurfaceError, TextStyle, WriteRequest};

const MM_PER_PT: f64 = 25.4 / 72.0;

// Rough average advance width for the builtin Helvetica faces, as a fraction
// of the font size.
const GLYPH_WIDTH_FACTOR: f64 = 0.5;

const BODY_SIZE_PT: f64 = 12.0;
const SUB_HEADER_SIZE_PT: f64 = 14.0;
const HEADER_SIZE_PT: f64 = 18.0;
const LINE_SPACING: f64 = 1.4;

/// A4 portrait, in points.
const A4_WIDTH_PT: f64 = 595.0;
const A4_HEIGHT_PT: f64 = 842.0;

fn font_size(style: TextStyle) -> f64 {
    match style {
        TextStyle::Body => BODY_SIZE_PT,
        TextStyle::SubHeader => SUB_HEADER_SIZE_PT,
        TextStyle::Header => HEADER_SIZE_PT,
    }
}

fn estimate_text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * GLYPH_WIDTH_FACTOR
}

/// A rectangular hyperlink region recorded during rendering.
///
/// Coordinates are in PDF space (points, bottom-left origin), ready to be
/// turned into a `/Link` annotation by [`crate::links`].
#[derive(Clone, Debug, PartialEq)]
pub struct LinkRegion {
    /// `[x1, y1, x2, y2]` bounds of the clickable area.
    pub rect: [f64; 4],
    /// The link target.
    pub url: String,
}

/// The rendered document together with the link regions collected on the way.
pub struct RenderedDocument {
    /// Serialized PDF bytes.
    pub bytes: Vec<u8>,
    /// Hyperlink regions recorded during rendering.
    pub links: Vec<LinkRegion>,
}

/// A single-page [`PageSurface`] over a `printpdf` document.
pub struct PdfSurface {
    document: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    width: f64,
    height: f64,
    cursor: Cursor,
    right_aligned: bool,
    links: Vec<LinkRegion>,
}

impl PdfSurface {
    /// Creates a surface with the given document title and page size in points.
    pub fn new(title: &str, width_pt: f64, height_pt: f64) -> Result<Self, SurfaceError> {
        let (document, page, layer) = PdfDocument::new(
            title,
            Mm(width_pt * MM_PER_PT),
            Mm(height_pt * MM_PER_PT),
            "invoice",
        );

        let regular = document
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|err| SurfaceError::Backend(err.to_string()))?;
        let bold = document
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|err| SurfaceError::Backend(err.to_string()))?;
        let layer = document.get_page(page).get_layer(layer);

        Ok(Self {
            document,
            layer,
            regular,
            bold,
            width: width_pt,
            height: height_pt,
            cursor: Cursor::default(),
            right_aligned: false,
            links: Vec::new(),
        })
    }

    /// Creates an A4 portrait surface.
    pub fn a4(title: &str) -> Result<Self, SurfaceError> {
        Self::new(title, A4_WIDTH_PT, A4_HEIGHT_PT)
    }

    /// Returns the hyperlink regions recorded so far.
    pub fn link_regions(&self) -> &[LinkRegion] {
        &self.links
    }

    /// Serializes the document and returns the bytes plus the recorded links.
    pub fn finish(self) -> Result<RenderedDocument, SurfaceError> {
        let Self {
            document, links, ..
        } = self;

        let mut bytes = Vec::new();
        let mut writer = BufWriter::new(&mut bytes);
        document
            .save(&mut writer)
            .map_err(|err| SurfaceError::Backend(err.to_string()))?;
        writer
            .flush()
            .map_err(|err| SurfaceError::Backend(err.to_string()))?;
        drop(writer);

        Ok(RenderedDocument { bytes, links })
    }
}

impl PageSurface for PdfSurface {
    fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn move_to(&mut self, x: f64, y: f64, right_aligned: bool) -> Result<(), SurfaceError> {
        let in_page = x.is_finite()
            && y.is_finite()
            && (0.0..=self.width).contains(&x)
            && (0.0..=self.height).contains(&y);
        if !in_page {
            return Err(SurfaceError::CursorOutOfBounds { x, y });
        }

        self.cursor = Cursor::new(x, y);
        self.right_aligned = right_aligned;
        Ok(())
    }

    fn new_line(&mut self, count: u32) -> Result<(), SurfaceError> {
        self.cursor.y += f64::from(count) * BODY_SIZE_PT * LINE_SPACING;
        Ok(())
    }

    fn write(&mut self, direction: Direction, request: &WriteRequest) -> Result<(), SurfaceError> {
        let size = font_size(request.style());
        let text_width = estimate_text_width(request.text(), size);
        let left = if self.right_aligned {
            self.cursor.x - text_width
        } else {
            self.cursor.x
        };
        // Top-left-origin cursor to bottom-left-origin baseline.
        let baseline = self.height - self.cursor.y - size;

        let font = match request.style() {
            TextStyle::Body => &self.regular,
            TextStyle::Header | TextStyle::SubHeader => &self.bold,
        };
        self.layer.use_text(
            request.text(),
            size,
            Mm(left * MM_PER_PT),
            Mm(baseline * MM_PER_PT),
            font,
        );

        if let Some(url) = request.url() {
            self.links.push(LinkRegion {
                rect: [left, baseline, left + text_width, baseline + size],
                url: url.to_string(),
            });
        }

        match direction {
            Direction::Vertical => self.cursor.y += size * LINE_SPACING,
            Direction::Horizontal => self.cursor.x += text_width,
        }
        Ok(())
    }
}

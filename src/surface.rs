//! The cursor-based page surface the renderers draw onto.
//!
//! The types in this module describe the contract between the invoice
//! renderers in [`crate::render`] and whatever actually produces the document.
//! Renderers only ever read the cursor, relocate it, and issue write requests;
//! the surface owns page geometry, line advancement and text placement.  The
//! crate ships a `printpdf`-backed implementation in [`crate::backend`], and
//! the integration tests use a recording fake.

use std::fmt;

/// A position on the page, in points, with the origin at the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cursor {
    /// Horizontal offset from the left page edge.
    pub x: f64,
    /// Vertical offset from the top page edge.
    pub y: f64,
}

impl Cursor {
    /// Creates a cursor at the given coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Style tag applied to a written line.
///
/// The surface decides what each tag means concretely (font, size, weight);
/// the renderers only distinguish emphasis levels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextStyle {
    /// Regular body text.
    #[default]
    Body,
    /// Top-level emphasis, used for party names.
    Header,
    /// Secondary emphasis, used for addresses and the total line.
    SubHeader,
}

/// Flow direction of a write: where the cursor moves after the text is placed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// The cursor advances past the written text on the same line.
    #[default]
    Horizontal,
    /// The cursor advances to the next line, keeping its horizontal position.
    Vertical,
}

/// A single text write: the text itself plus optional style and link target.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteRequest {
    text: String,
    style: TextStyle,
    url: Option<String>,
}

impl WriteRequest {
    /// Creates a body-styled write request with no link target.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Returns the text to be written.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the style tag.
    pub fn style(&self) -> TextStyle {
        self.style
    }

    /// Returns the hyperlink target, if any.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Sets the style tag and returns the updated request.
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the hyperlink target and returns the updated request.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Errors signalled by a surface implementation.
#[derive(Debug)]
pub enum SurfaceError {
    /// A cursor relocation targeted a non-finite or out-of-page position.
    CursorOutOfBounds {
        /// Requested horizontal coordinate.
        x: f64,
        /// Requested vertical coordinate.
        y: f64,
    },
    /// The underlying document backend failed.
    Backend(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CursorOutOfBounds { x, y } => {
                write!(f, "Cursor position ({x}, {y}) is outside the page")
            }
            Self::Backend(message) => write!(f, "Document backend failed: {message}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// A mutable page surface the invoice renderers draw onto.
///
/// Exactly one logical writer drives a surface at a time; every operation runs
/// to completion before the next one starts.  Implementations decide how line
/// advancement, styling and alignment translate into actual output.
pub trait PageSurface {
    /// Returns the current cursor position.
    fn cursor(&self) -> Cursor;

    /// Returns the page width in points.
    fn width(&self) -> f64;

    /// Returns the page height in points.
    fn height(&self) -> f64;

    /// Relocates the cursor.
    ///
    /// With `right_aligned` set, subsequent writes end at the cursor's
    /// horizontal position instead of starting there.  The flag stays in
    /// effect until the next relocation.
    fn move_to(&mut self, x: f64, y: f64, right_aligned: bool) -> Result<(), SurfaceError>;

    /// Restores a previously captured cursor, clearing any alignment flag.
    fn restore_cursor(&mut self, cursor: Cursor) -> Result<(), SurfaceError> {
        self.move_to(cursor.x, cursor.y, false)
    }

    /// Advances the cursor by `count` blank lines.
    fn new_line(&mut self, count: u32) -> Result<(), SurfaceError>;

    /// Writes one request, advancing the cursor in the given flow direction.
    fn write(&mut self, direction: Direction, request: &WriteRequest) -> Result<(), SurfaceError>;

    /// Writes an ordered batch of requests with a single flow direction.
    fn bulk_write(
        &mut self,
        direction: Direction,
        requests: &[WriteRequest],
    ) -> Result<(), SurfaceError> {
        for request in requests {
            self.write(direction, request)?;
        }
        Ok(())
    }
}

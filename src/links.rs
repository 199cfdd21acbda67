//! Hyperlink annotation injection built on top of `lopdf`.
//!
//! `printpdf` has no link annotation support, so clickable task rows are
//! added in a post-pass: the rendered bytes are reparsed and one `/Link`
//! annotation with a `/URI` action is attached to the page for every region
//! recorded by the surface.

use lopdf::{Dictionary, Document, Object};

use crate::backend::LinkRegion;

/// Errors that can occur while embedding link annotations into a rendered PDF.
#[derive(Debug)]
pub enum LinkError {
    /// The PDF bytes could not be parsed by `lopdf`.
    Parse(lopdf::Error),
    /// The rendered document does not contain the expected page.
    MissingPage {
        /// The requested (1-indexed) page number that could not be resolved.
        page_number: u32,
    },
}

impl From<lopdf::Error> for LinkError {
    fn from(err: lopdf::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<std::io::Error> for LinkError {
    fn from(err: std::io::Error) -> Self {
        Self::Parse(err.into())
    }
}

impl std::fmt::Display for LinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "Failed to parse PDF bytes: {err}"),
            Self::MissingPage { page_number } => {
                write!(f, "Rendered document has no page {page_number}")
            }
        }
    }
}

impl std::error::Error for LinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::MissingPage { .. } => None,
        }
    }
}

/// Attaches one URI link annotation per region to the document's first page.
///
/// Regions are expected in PDF coordinates, as recorded by
/// [`crate::backend::PdfSurface`].  An empty region list returns the input
/// bytes unchanged.
pub fn apply_link_annotations(
    pdf_bytes: &[u8],
    regions: &[LinkRegion],
) -> Result<Vec<u8>, LinkError> {
    if regions.is_empty() {
        return Ok(pdf_bytes.to_vec());
    }

    let mut document = Document::load_mem(pdf_bytes)?;

    let pages = document.get_pages();
    let page_id = pages
        .get(&1)
        .copied()
        .ok_or(LinkError::MissingPage { page_number: 1 })?;

    let mut annotation_refs = Vec::with_capacity(regions.len());
    for region in regions {
        let annotation_id = document.new_object_id();
        document
            .objects
            .insert(annotation_id, build_annotation(region));
        annotation_refs.push(Object::Reference(annotation_id));
    }

    let page = match document.get_object_mut(page_id)? {
        Object::Dictionary(dictionary) => dictionary,
        _ => return Err(LinkError::MissingPage { page_number: 1 }),
    };
    let has_annots = matches!(page.get(b"Annots"), Ok(Object::Array(_)));
    if has_annots {
        if let Ok(Object::Array(existing)) = page.get_mut(b"Annots") {
            existing.extend(annotation_refs);
        }
    } else {
        page.set("Annots", Object::Array(annotation_refs));
    }

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}

fn build_annotation(region: &LinkRegion) -> Object {
    let mut action = Dictionary::new();
    action.set("Type", Object::Name("Action".into()));
    action.set("S", Object::Name("URI".into()));
    action.set("URI", Object::string_literal(region.url.as_str()));

    let mut annotation = Dictionary::new();
    annotation.set("Type", Object::Name("Annot".into()));
    annotation.set("Subtype", Object::Name("Link".into()));
    annotation.set(
        "Rect",
        Object::Array(
            region
                .rect
                .iter()
                .map(|&edge| Object::Integer(edge.round() as i64))
                .collect(),
        ),
    );
    annotation.set(
        "Border",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(0),
        ]),
    );
    annotation.set("A", Object::Dictionary(action));

    Object::Dictionary(annotation)
}

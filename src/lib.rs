//! Core entry point for the invoice_render crate.

pub mod backend;
pub mod model;
pub mod render;
pub mod surface;
pub mod text;

#[cfg(feature = "links")]
pub mod links;

//! ringmark-export: Pure scene serializers (sans-IO)
//!
//! Renders the drawing surface (grid, guide, stroke, result overlay)
//! into output formats. Currently supports SVG.

pub mod svg;

pub use svg::{Scene, SvgMetadata, build_path_data, render_scene};

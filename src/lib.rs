//! stackcomp composites many independently rendered image sources into one raster.
//!
//! Sources are grouped into ordered layers. Sources sharing a layer are summed channel-wise, with
//! an optional per-source transparency taken from a companion raster; layers are then blended
//! bottom to top with alpha-over compositing, starting from opaque white.
//!
//! The work splits in two phases:
//!
//! - Build an [`AccumIndex`] once per source list, from a [`SourceClassifier`] and a
//!   [`LayerAssigner`] (or let a [`RenderSession`] do it).
//! - Call [`AccumIndex::accumulate`] once per output pixel. It only reads the index, so any
//!   number of pixels can be computed concurrently; [`RenderSession::render_into`] does this
//!   over row bands on a rayon pool.
//!
//! Transparency companions are ordinary packed-sample rasters whose samples carry an `f32` bit
//! pattern; see [`float_to_channel_bits`] and [`channel_bits_to_float`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod accum;
mod foundation;
mod layer;
mod render;
mod source;

pub use accum::index::AccumIndex;
pub use foundation::core::Argb;
pub use foundation::error::{StackcompError, StackcompResult};
pub use layer::assign::{GroupedLayers, LayerAssigner, SingleLayer};
pub use layer::model::{BlendMode, Layer, LayerKey};
pub use render::raster::{ArgbBuffer, PixelSource};
pub use render::session::{RenderOpts, RenderSession, RenderStats};
pub use source::classify::{NoTransparency, SourceClassifier, SourceLinks, classify};
pub use source::transparency::{CompanionRegistry, channel_bits_to_float, float_to_channel_bits};

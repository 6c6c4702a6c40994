//! Rendering placement plans onto an output canvas.
//!
//! `render_pixelated` paints flat tile colors for inspection. With the
//! `image-io` feature, `compose` draws the donor images themselves: each
//! donor is loaded and resized once, then overlaid at every anchor.

mod pixelated;

#[cfg(feature = "image-io")]
mod donor;

pub use pixelated::render_pixelated;

#[cfg(feature = "image-io")]
pub use donor::{compose, load_from_disk, resize_donor, ResizeMode};

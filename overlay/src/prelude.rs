pub use super::error::{Error, Result};
pub use super::pipeline::{generate, AssetConfig, AssetReport, MaskColors, MaskVariant};
pub use super::pipeline::{DEFAULT_ITERATIONS, DEFAULT_SLICE_INDEX};
pub use super::prep::{
    axial_slice, dilate, erode, label_profile, load_volume, render_grayscale, render_mask,
    save_png, BinaryMask, DEFAULT_ALPHA,
};

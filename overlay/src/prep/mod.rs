pub mod mask;
pub mod morph;
pub mod raster;
pub mod volume;

pub use mask::BinaryMask;
pub use morph::{dilate, erode};
pub use raster::{render_grayscale, render_mask, save_png, DEFAULT_ALPHA};
pub use volume::{axial_slice, label_profile, load_volume, rot90};

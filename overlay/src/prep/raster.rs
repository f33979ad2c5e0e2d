//! 掩膜与强度切片的栅格化，以及PNG写出。

use super::mask::BinaryMask;
use crate::error::{Error, Result};
use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, Rgba, RgbaImage};
use ndarray::ArrayView2;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// 掩膜前景像素默认的不透明度（0为全透明，255为不透明）。
pub const DEFAULT_ALPHA: u8 = 180;

/// 将掩膜转为RGBA图像：前景像素为`(R, G, B, alpha)`，其余为全透明的`(0, 0, 0, 0)`。
///
/// 图像宽为掩膜列数、高为行数；像素`(x, y)`对应掩膜的`(y, x)`。
pub fn render_mask(mask: &BinaryMask, color: Rgb<u8>, alpha: u8) -> RgbaImage {
    let (h_len, w_len) = mask.dim();
    let [r, g, b] = color.0;
    RgbaImage::from_fn(w_len as u32, h_len as u32, |x, y| {
        if mask.data[(y as usize, x as usize)] {
            Rgba([r, g, b, alpha])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// 灰度映射窗口，取切片中有限值的最小值与最大值。
struct GrayWindow {
    lower_bound: f64,
    upper_bound: f64,
    scale: f64,
}

impl GrayWindow {
    /// 切片中没有有限值，或最小值等于最大值时返回`None`。
    fn fit(slice: ArrayView2<f32>) -> Option<Self> {
        let (lower_bound, upper_bound) = slice
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f32, f32)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;
        if lower_bound >= upper_bound {
            return None;
        }
        let (lower_bound, upper_bound) = (lower_bound as f64, upper_bound as f64);
        Some(Self {
            lower_bound,
            upper_bound,
            scale: 256.0 / (upper_bound - lower_bound),
        })
    }

    #[inline]
    fn normalize(&self, v: f32) -> u8 {
        if !v.is_finite() {
            return 0_u8;
        }
        let v = v as f64;
        if v >= self.upper_bound {
            255_u8
        } else if v <= self.lower_bound {
            0_u8
        } else {
            ((v - self.lower_bound) * self.scale).floor() as u8
        }
    }
}

/// 将强度切片按最小/最大值自动缩放为8位灰度图。
///
/// 映射为`floor((v - min) / (max - min) * 256)`并截断到`0..=255`；常数切片整体为黑色，非有限值为黑色。
pub fn render_grayscale(slice: ArrayView2<f32>) -> GrayImage {
    let (h_len, w_len) = slice.dim();
    let window = GrayWindow::fit(slice);
    GrayImage::from_fn(w_len as u32, h_len as u32, |x, y| {
        let v = slice[(y as usize, x as usize)];
        Luma([window.as_ref().map_or(0, |win| win.normalize(v))])
    })
}

/// 将图像以PNG格式保存为`dir/file_name`（必要时先创建`dir`），返回写出的路径。
pub fn save_png<I, P>(image: I, dir: P, file_name: &str) -> Result<PathBuf>
where
    I: Into<DynamicImage>,
    P: AsRef<Path>,
{
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    image
        .into()
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|source| Error::Image {
            path: path.clone(),
            source,
        })?;
    info!("已保存: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, Array2};

    #[test]
    fn test_render_empty_mask_is_transparent() {
        let img = render_mask(&BinaryMask::empty(6, 4), Rgb([59, 130, 246]), DEFAULT_ALPHA);
        assert_eq!(img.dimensions(), (4, 6));
        assert!(img.as_raw().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_render_full_mask_is_solid() {
        let img = render_mask(&BinaryMask::full(3, 5), Rgb([239, 68, 68]), 77);
        assert_eq!(img.dimensions(), (5, 3));
        assert!(img.pixels().all(|p| *p == Rgba([239, 68, 68, 77])));
    }

    #[test]
    fn test_render_mask_orientation() {
        let mut data = Array2::from_elem((2, 3), false);
        data[(0, 2)] = true;
        let img = render_mask(&BinaryMask::from(data), Rgb([16, 185, 129]), DEFAULT_ALPHA);
        assert_eq!(*img.get_pixel(2, 0), Rgba([16, 185, 129, 180]));
        assert_eq!(*img.get_pixel(0, 0), Rgba([0, 0, 0, 0]));
        assert_eq!(*img.get_pixel(2, 1), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_grayscale_min_max_scaling() {
        let slice = arr2(&[[0.0_f32, 1.0], [2.0, 3.0]]);
        let img = render_grayscale(slice.view());
        assert_eq!(img.as_raw(), &vec![0, 85, 170, 255]);
    }

    #[test]
    fn test_grayscale_constant_slice_is_black() {
        let slice = Array2::from_elem((3, 2), 42.0_f32);
        let img = render_grayscale(slice.view());
        assert_eq!(img.dimensions(), (2, 3));
        assert!(img.as_raw().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_grayscale_ignores_non_finite() {
        let slice = arr2(&[[f32::NAN, 1.0], [3.0, 5.0]]);
        let img = render_grayscale(slice.view());
        assert_eq!(img.as_raw(), &vec![0, 0, 128, 255]);
    }

    #[test]
    fn test_save_png_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("assets");
        let img = render_mask(&BinaryMask::full(2, 2), Rgb([1, 2, 3]), 4);
        let path = save_png(img.clone(), &dir, "mask.png").unwrap();
        assert_eq!(path, dir.join("mask.png"));
        let back = image::open(&path).unwrap().into_rgba8();
        assert_eq!(back, img);
    }
}

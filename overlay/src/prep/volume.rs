//! 体数据读取与轴向切片。

use crate::error::{Error, Result};
use ndarray::{Array2, Array3, ArrayView2, Axis, Ix3};
use nifti::{IntoNdArray, NiftiObject, ReaderOptions};
use std::fs::File;
use std::path::Path;
use tracing::info;

/// 读取一个`.nii`（或`.nii.gz`）文件，得到形状为`[x, y, z]`的三维数组。
///
/// 文件不存在或无法打开时返回`Error::InputNotFound`；内容损坏等其余情况返回对应的错误变体。
pub fn load_volume<P: AsRef<Path>>(path: P) -> Result<Array3<f32>> {
    let path = path.as_ref();
    File::open(path).map_err(|source| Error::InputNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let nifti_err = |source| Error::Nifti {
        path: path.to_path_buf(),
        source,
    };
    let obj = ReaderOptions::new().read_file(path).map_err(nifti_err)?;
    let volume = obj.into_volume().into_ndarray::<f32>().map_err(nifti_err)?;

    let ndim = volume.ndim();
    let volume = volume
        .into_dimensionality::<Ix3>()
        .map_err(|_| Error::NotVolumetric {
            path: path.to_path_buf(),
            ndim,
        })?;
    info!(path = %path.display(), shape = ?volume.dim(), "已读取体数据");
    Ok(volume)
}

/// 将二维平面逆时针旋转90°（与`numpy.rot90`一致）。
///
/// 输入形状为`[h, w]`时输出形状为`[w, h]`，且`out[i][j] = plane[j][w - 1 - i]`。
pub fn rot90<T: Clone>(plane: ArrayView2<T>) -> Array2<T> {
    let mut view = plane;
    view.invert_axis(Axis(1));
    view.reversed_axes().as_standard_layout().into_owned()
}

/// 取第三轴上第`index`张平面并旋转90°，使解剖学的“上”方向朝上。
pub fn axial_slice(volume: &Array3<f32>, index: usize) -> Result<Array2<f32>> {
    let depth = volume.len_of(Axis(2));
    if index >= depth {
        return Err(Error::SliceOutOfRange { index, depth });
    }
    Ok(rot90(volume.index_axis(Axis(2), index)))
}

/// 统计第三轴上每张平面中取值大于0的体素个数。
pub fn label_profile(volume: &Array3<f32>) -> Vec<usize> {
    volume
        .axis_iter(Axis(2))
        .map(|plane| plane.iter().filter(|&&v| v > 0.0).count())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, Array3};

    fn coded_volume(x: usize, y: usize, z: usize) -> Array3<f32> {
        Array3::from_shape_fn((x, y, z), |(i, j, k)| (i * 100 + j * 10 + k) as f32)
    }

    #[test]
    fn test_rot90_square() {
        let plane = arr2(&[[1, 2], [3, 4]]);
        assert_eq!(rot90(plane.view()), arr2(&[[2, 4], [1, 3]]));
    }

    #[test]
    fn test_rot90_non_square() {
        let plane = arr2(&[[1, 2, 3], [4, 5, 6]]);
        assert_eq!(rot90(plane.view()), arr2(&[[3, 6], [2, 5], [1, 4]]));
    }

    #[test]
    fn test_axial_slice_rotates_indexed_plane() {
        let volume = coded_volume(10, 10, 5);
        let slice = axial_slice(&volume, 2).unwrap();
        assert_eq!(slice.dim(), (10, 10));
        for i in 0..10 {
            for j in 0..10 {
                assert_eq!(slice[(i, j)], volume[(j, 9 - i, 2)]);
            }
        }
        // 旋转后左上角是原平面的右上角
        assert_eq!(slice[(0, 0)], 92.0);
    }

    #[test]
    fn test_axial_slice_shape_swaps() {
        let volume = coded_volume(4, 7, 3);
        assert_eq!(axial_slice(&volume, 0).unwrap().dim(), (7, 4));
    }

    #[test]
    fn test_axial_slice_out_of_range() {
        let volume = coded_volume(10, 10, 5);
        match axial_slice(&volume, 5) {
            Err(Error::SliceOutOfRange { index, depth }) => {
                assert_eq!((index, depth), (5, 5));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_label_profile() {
        let mut volume = Array3::<f32>::zeros((3, 3, 4));
        volume[(0, 0, 1)] = 1.0;
        volume[(1, 2, 1)] = 4.0;
        volume[(2, 2, 3)] = 2.0;
        assert_eq!(label_profile(&volume), vec![0, 2, 0, 1]);
    }

    #[test]
    fn test_load_volume_missing() {
        let err = load_volume("definitely/not/here.nii").unwrap_err();
        assert!(err.is_input_not_found());
    }
}

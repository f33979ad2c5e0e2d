//! 二值形态学：腐蚀与膨胀。
//!
//! 结构元为3×3十字（4-邻域）。图像范围以外的像素一律视为`false`，因此腐蚀会从图像边缘向内剥离。
//! 每次迭代对整张图做一遍，采用“平移整图再按位与/或”的方式。

use super::mask::BinaryMask;
use ndarray::{s, Array2, Zip};

/// 十字结构元中除中心以外的4个偏移`(dh, dw)`。
const CROSS_NEIGHBOURS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// 计算平移`offset`后（源起点, 目标起点, 重叠长度）。`out[i] = src[i + offset]`。
#[inline]
fn shift_range(offset: isize, size: usize) -> (usize, usize, usize) {
    let n = offset.unsigned_abs();
    if n >= size {
        (0, 0, 0)
    } else if offset >= 0 {
        (n, 0, size - n)
    } else {
        (0, n, size - n)
    }
}

/// 返回`out[h][w] = src[h + dh][w + dw]`，越界处为`false`。
fn shifted(src: &Array2<bool>, dh: isize, dw: isize) -> Array2<bool> {
    let (h_len, w_len) = src.dim();
    let mut out = Array2::from_elem((h_len, w_len), false);
    let (src_h, dst_h, h) = shift_range(dh, h_len);
    let (src_w, dst_w, w) = shift_range(dw, w_len);
    if h != 0 && w != 0 {
        out.slice_mut(s![dst_h..dst_h + h, dst_w..dst_w + w])
            .assign(&src.slice(s![src_h..src_h + h, src_w..src_w + w]));
    }
    out
}

fn erode_once(current: &Array2<bool>) -> Array2<bool> {
    let mut next = current.clone();
    for (dh, dw) in CROSS_NEIGHBOURS {
        let neighbour = shifted(current, dh, dw);
        Zip::from(&mut next)
            .and(&neighbour)
            .for_each(|dst, &src| *dst &= src);
    }
    next
}

fn dilate_once(current: &Array2<bool>) -> Array2<bool> {
    let mut next = current.clone();
    for (dh, dw) in CROSS_NEIGHBOURS {
        let neighbour = shifted(current, dh, dw);
        Zip::from(&mut next)
            .and(&neighbour)
            .for_each(|dst, &src| *dst |= src);
    }
    next
}

fn iterate(
    mask: &BinaryMask,
    iterations: usize,
    pass: fn(&Array2<bool>) -> Array2<bool>,
) -> BinaryMask {
    let mut current = mask.data.clone();
    for _ in 0..iterations {
        let next = pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    BinaryMask::from(current)
}

/// 腐蚀`iterations`次。`iterations == 0`时原样返回。结果总是`mask`的子集。
pub fn erode(mask: &BinaryMask, iterations: usize) -> BinaryMask {
    iterate(mask, iterations, erode_once)
}

/// 膨胀`iterations`次。`iterations == 0`时原样返回。结果总是`mask`的超集。
pub fn dilate(mask: &BinaryMask, iterations: usize) -> BinaryMask {
    iterate(mask, iterations, dilate_once)
}

impl BinaryMask {
    /// 见[`erode`]。
    #[inline]
    pub fn eroded(&self, iterations: usize) -> BinaryMask {
        erode(self, iterations)
    }

    /// 见[`dilate`]。
    #[inline]
    pub fn dilated(&self, iterations: usize) -> BinaryMask {
        dilate(self, iterations)
    }
}

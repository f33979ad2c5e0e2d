use ndarray::{Array2, ArrayView2};

/// 二值掩膜。`true`代表该位置存在标签（肿瘤）。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    pub(crate) data: Array2<bool>,
}

impl BinaryMask {
    /// 由标签切片生成掩膜：取值严格大于0的像素为`true`。
    ///
    /// BraTS的1、2、4等多类别标签在此合并为“有/无”，这是有意的简化。
    pub fn from_labels(labels: ArrayView2<f32>) -> Self {
        Self {
            data: labels.map(|&v| v > 0.0),
        }
    }

    /// 全为`false`的掩膜，形状为`(h_len, w_len)`。
    #[inline]
    pub fn empty(h_len: usize, w_len: usize) -> Self {
        Self {
            data: Array2::from_elem((h_len, w_len), false),
        }
    }

    /// 全为`true`的掩膜，形状为`(h_len, w_len)`。
    #[inline]
    pub fn full(h_len: usize, w_len: usize) -> Self {
        Self {
            data: Array2::from_elem((h_len, w_len), true),
        }
    }

    #[inline]
    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// `true`像素的个数。
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.data.iter().any(|&v| v)
    }

    /// 获得`(h, w)`位置的值。如果越界则返回`None`。
    #[inline]
    pub fn get(&self, h: usize, w: usize) -> Option<bool> {
        self.data.get((h, w)).copied()
    }

    /// 判断`self`的每个`true`像素在`other`中是否也为`true`。形状不同时返回`false`。
    pub fn is_subset_of(&self, other: &BinaryMask) -> bool {
        self.dim() == other.dim()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(&a, &b)| !a || b)
    }

    #[inline]
    pub fn as_array(&self) -> &Array2<bool> {
        &self.data
    }

    /// 转为0/1字节数组，便于写出npy。
    pub fn to_u8(&self) -> Array2<u8> {
        self.data.map(|&v| u8::from(v))
    }
}

impl From<Array2<bool>> for BinaryMask {
    #[inline]
    fn from(data: Array2<bool>) -> Self {
        Self { data }
    }
}

#[cfg(test)]
mod tests {
    use super::BinaryMask;
    use ndarray::arr2;

    #[test]
    fn test_from_labels_collapses_classes() {
        let labels = arr2(&[[0.0, 1.0, 2.0], [4.0, 0.0, 0.0], [0.0, 2.0, 4.0]]);
        let mask = BinaryMask::from_labels(labels.view());
        assert_eq!(mask.as_array(), &labels.map(|&v| v > 0.0));
        assert_eq!(mask.count(), 5);
        assert_eq!(mask.get(0, 0), Some(false));
        assert_eq!(mask.get(1, 0), Some(true));
        assert_eq!(mask.get(3, 0), None);
    }

    #[test]
    fn test_negative_and_zero_are_background() {
        let labels = arr2(&[[-1.0, 0.0], [-0.0, 0.5]]);
        let mask = BinaryMask::from_labels(labels.view());
        assert_eq!(mask.to_u8(), arr2(&[[0, 0], [0, 1]]));
    }

    #[test]
    fn test_subset() {
        let small = BinaryMask::from(arr2(&[[false, true], [false, false]]));
        let big = BinaryMask::from(arr2(&[[true, true], [false, true]]));
        assert!(small.is_subset_of(&big));
        assert!(!big.is_subset_of(&small));
        assert!(BinaryMask::empty(2, 2).is_subset_of(&small));
        assert!(!small.is_subset_of(&BinaryMask::full(3, 3)));
    }

    #[test]
    fn test_empty_full() {
        assert!(BinaryMask::empty(4, 5).is_empty());
        assert_eq!(BinaryMask::full(4, 5).count(), 20);
        assert_eq!(BinaryMask::full(4, 5).dim(), (4, 5));
    }
}

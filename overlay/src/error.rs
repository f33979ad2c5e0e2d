//! 库级错误类型与`Result`别名。
//!
//! 只有`InputNotFound`是调用方预期会处理的错误；其余变体一律向上传播。

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("找不到输入体数据文件`{}`（或无法打开）", .path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("解析NIfTI文件`{}`失败", .path.display())]
    Nifti {
        path: PathBuf,
        #[source]
        source: nifti::NiftiError,
    },

    #[error("`{}`不是三维体数据（维数为{ndim}）", .path.display())]
    NotVolumetric { path: PathBuf, ndim: usize },

    #[error("切片索引{index}越界（第三轴长度为{depth}）")]
    SliceOutOfRange { index: usize, depth: usize },

    #[error("写入图像`{}`失败", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("写入npy文件`{}`失败", .path.display())]
    Npy {
        path: PathBuf,
        #[source]
        source: ndarray_npy::WriteNpyError,
    },

    #[error("I/O错误: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// 是否为“输入文件缺失或不可读”。
    #[inline]
    pub fn is_input_not_found(&self) -> bool {
        matches!(self, Error::InputNotFound { .. })
    }
}

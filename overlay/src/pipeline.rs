//! 完整流水线：读取体数据、切片、生成掩膜、形态学处理、写出PNG素材。

use crate::error::{Error, Result};
use crate::prep::{
    axial_slice, load_volume, render_grayscale, render_mask, save_png, BinaryMask, DEFAULT_ALPHA,
};
use image::Rgb;
use ndarray::ArrayView2;
use ndarray_npy::WriteNpyExt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 默认的轴向切片索引。
pub const DEFAULT_SLICE_INDEX: usize = 97;

/// 默认的腐蚀/膨胀迭代次数。
pub const DEFAULT_ITERATIONS: usize = 4;

/// 灰度底图的文件名（不含扩展名）。
pub const BASE_FILE_STEM: &str = "mri_base";

/// 三种掩膜形态，分别模拟欠分割、过分割与金标准。
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MaskVariant {
    /// 腐蚀后的掩膜。
    Conservative,
    /// 膨胀后的掩膜。
    Aggressive,
    /// 原始二值掩膜。
    Gold,
}

impl MaskVariant {
    /// 写出顺序。
    pub const ALL: [MaskVariant; 3] = [
        MaskVariant::Conservative,
        MaskVariant::Aggressive,
        MaskVariant::Gold,
    ];

    #[inline]
    pub fn file_stem(self) -> &'static str {
        match self {
            MaskVariant::Conservative => "mask_conservative",
            MaskVariant::Aggressive => "mask_aggressive",
            MaskVariant::Gold => "mask_gold",
        }
    }
}

/// 每种掩膜的颜色。
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MaskColors {
    pub conservative: Rgb<u8>,
    pub aggressive: Rgb<u8>,
    pub gold: Rgb<u8>,
}

impl MaskColors {
    #[inline]
    pub fn get(&self, variant: MaskVariant) -> Rgb<u8> {
        match variant {
            MaskVariant::Conservative => self.conservative,
            MaskVariant::Aggressive => self.aggressive,
            MaskVariant::Gold => self.gold,
        }
    }
}

impl Default for MaskColors {
    fn default() -> Self {
        Self {
            conservative: Rgb([59, 130, 246]),
            aggressive: Rgb([239, 68, 68]),
            gold: Rgb([16, 185, 129]),
        }
    }
}

/// 一次运行的全部参数。
#[derive(Clone, Debug)]
pub struct AssetConfig {
    /// 强度体数据（如FLAIR序列）。
    pub intensity_path: PathBuf,
    /// 与强度体形状相同的标签体数据。
    pub label_path: PathBuf,
    /// 第三轴上的切片索引。
    pub slice_index: usize,
    /// PNG输出目录，不存在时自动创建。
    pub output_dir: PathBuf,
    pub iterations: usize,
    pub colors: MaskColors,
    pub alpha: u8,
    /// 是否同时写出切片与掩膜的`.npy`文件。
    pub export_npy: bool,
}

impl AssetConfig {
    /// 其余参数取默认值：切片97、迭代4次、蓝/红/翠绿三色、不透明度180、不写npy。
    pub fn new<P, Q, R>(intensity_path: P, label_path: Q, output_dir: R) -> Self
    where
        P: Into<PathBuf>,
        Q: Into<PathBuf>,
        R: Into<PathBuf>,
    {
        Self {
            intensity_path: intensity_path.into(),
            label_path: label_path.into(),
            slice_index: DEFAULT_SLICE_INDEX,
            output_dir: output_dir.into(),
            iterations: DEFAULT_ITERATIONS,
            colors: MaskColors::default(),
            alpha: DEFAULT_ALPHA,
            export_npy: false,
        }
    }
}

/// 已写出的一张掩膜图。
#[derive(Clone, Debug)]
pub struct WrittenMask {
    pub variant: MaskVariant,
    pub path: PathBuf,
    /// 前景像素个数。
    pub pixels: usize,
}

/// 一次运行写出的全部文件。
#[derive(Clone, Debug)]
pub struct AssetReport {
    pub base_image: PathBuf,
    pub masks: Vec<WrittenMask>,
    /// `export_npy`开启时写出的npy文件。
    pub arrays: Vec<PathBuf>,
}

impl AssetReport {
    /// 按写出顺序枚举所有文件路径。
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.base_image.as_path())
            .chain(self.masks.iter().map(|m| m.path.as_path()))
            .chain(self.arrays.iter().map(PathBuf::as_path))
    }

    pub fn mask(&self, variant: MaskVariant) -> Option<&WrittenMask> {
        self.masks.iter().find(|m| m.variant == variant)
    }
}

/// 运行完整流水线。
///
/// 两个输入文件都读取成功之后才会触碰输出目录，因此输入缺失时不会写出任何文件。
pub fn generate(config: &AssetConfig) -> Result<AssetReport> {
    let intensity = load_volume(&config.intensity_path)?;
    let labels = load_volume(&config.label_path)?;
    if intensity.dim() != labels.dim() {
        warn!(
            intensity = ?intensity.dim(),
            labels = ?labels.dim(),
            "强度体与标签体形状不一致"
        );
    }

    let img_slice = axial_slice(&intensity, config.slice_index)?;
    let seg_slice = axial_slice(&labels, config.slice_index)?;
    drop(intensity);
    drop(labels);

    render_assets(img_slice.view(), seg_slice.view(), config)
}

/// 从已取出的强度切片与标签切片生成并写出全部素材。
pub fn render_assets(
    img_slice: ArrayView2<f32>,
    seg_slice: ArrayView2<f32>,
    config: &AssetConfig,
) -> Result<AssetReport> {
    let gold = BinaryMask::from_labels(seg_slice);
    let masks = [
        (MaskVariant::Conservative, gold.eroded(config.iterations)),
        (MaskVariant::Aggressive, gold.dilated(config.iterations)),
        (MaskVariant::Gold, gold),
    ];

    let dir = config.output_dir.as_path();
    fs::create_dir_all(dir)?;

    let base_image = save_png(
        render_grayscale(img_slice),
        dir,
        &format!("{BASE_FILE_STEM}.png"),
    )?;

    let mut written = Vec::with_capacity(masks.len());
    for (variant, mask) in masks.iter() {
        let pixels = mask.count();
        debug!(mask = variant.file_stem(), pixels, "掩膜前景像素");
        let png = render_mask(mask, config.colors.get(*variant), config.alpha);
        let path = save_png(png, dir, &format!("{}.png", variant.file_stem()))?;
        written.push(WrittenMask {
            variant: *variant,
            path,
            pixels,
        });
    }

    let mut arrays = Vec::new();
    if config.export_npy {
        arrays.push(write_npy(dir, &format!("{BASE_FILE_STEM}.npy"), &img_slice)?);
        for (variant, mask) in masks.iter() {
            let name = format!("{}.npy", variant.file_stem());
            arrays.push(write_npy(dir, &name, &mask.to_u8())?);
        }
    }

    Ok(AssetReport {
        base_image,
        masks: written,
        arrays,
    })
}

fn write_npy<T: WriteNpyExt>(dir: &Path, file_name: &str, array: &T) -> Result<PathBuf> {
    let path = dir.join(file_name);
    ndarray_npy::write_npy(&path, array).map_err(|source| Error::Npy {
        path: path.clone(),
        source,
    })?;
    info!("已保存: {}", path.display());
    Ok(path)
}

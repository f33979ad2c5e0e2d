use clap::Args;
use image::Rgb;
use overlay::prelude::{
    AssetConfig, MaskColors, DEFAULT_ALPHA, DEFAULT_ITERATIONS, DEFAULT_SLICE_INDEX,
};
use std::path::PathBuf;
use tracing::error;

#[derive(Args, Debug)]
pub struct Generate {
    /// 强度体数据（如FLAIR）文件路径。
    #[arg(long = "intensity", short, default_value = "BraTS20_Training_001_flair.nii")]
    intensity_path: PathBuf,
    /// 与强度体配准的标签体数据文件路径。
    #[arg(long = "label", short, default_value = "BraTS20_Training_001_seg.nii")]
    label_path: PathBuf,
    /// 输出目录，不存在时自动创建。
    #[arg(long = "output-dir", short, default_value = "public/assets")]
    output_dir: PathBuf,
    /// 第三轴上的切片索引。
    #[arg(long = "slice", short, default_value_t = DEFAULT_SLICE_INDEX)]
    slice_index: usize,
    /// 腐蚀与膨胀的迭代次数。
    #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,
    /// 掩膜前景像素的不透明度（0~255）。
    #[arg(long, default_value_t = DEFAULT_ALPHA)]
    alpha: u8,
    /// 腐蚀掩膜（欠分割）的颜色，默认蓝色3b82f6。
    #[arg(long, value_parser = super::utils::color_valid_rgb_hex)]
    conservative_color: Option<Rgb<u8>>,
    /// 膨胀掩膜（过分割）的颜色，默认红色ef4444。
    #[arg(long, value_parser = super::utils::color_valid_rgb_hex)]
    aggressive_color: Option<Rgb<u8>>,
    /// 原始掩膜（金标准）的颜色，默认翠绿色10b981。
    #[arg(long, value_parser = super::utils::color_valid_rgb_hex)]
    gold_color: Option<Rgb<u8>>,
    /// 同时写出切片与掩膜的npy文件。
    #[arg(long)]
    npy: bool,
}

impl Generate {
    pub fn run(&mut self) -> anyhow::Result<()> {
        let config = self.config();
        println!("读取医学体数据`{}`...", config.intensity_path.display());

        match overlay::generate(&config) {
            Ok(report) => {
                println!();
                println!(
                    "完成！共写出{}个文件到`{}`，将其复制到前端项目的`public/assets/`目录即可。",
                    report.files().count(),
                    config.output_dir.display()
                );
                Ok(())
            }
            Err(e) if e.is_input_not_found() => {
                error!("{e}");
                println!();
                println!("错误：找不到.nii文件。");
                println!(
                    "请确认`{}`与`{}`存在且可读。",
                    config.intensity_path.display(),
                    config.label_path.display()
                );
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn config(&self) -> AssetConfig {
        let defaults = MaskColors::default();
        let mut config = AssetConfig::new(
            self.intensity_path.as_path(),
            self.label_path.as_path(),
            self.output_dir.as_path(),
        );
        config.slice_index = self.slice_index;
        config.iterations = self.iterations;
        config.alpha = self.alpha;
        config.colors = MaskColors {
            conservative: self.conservative_color.unwrap_or(defaults.conservative),
            aggressive: self.aggressive_color.unwrap_or(defaults.aggressive),
            gold: self.gold_color.unwrap_or(defaults.gold),
        };
        config.export_npy = self.npy;
        config
    }
}

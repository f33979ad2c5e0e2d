use clap::Args;
use overlay::prelude::{label_profile, load_volume};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct Inspect {
    /// 强度体数据文件路径。
    #[arg(long = "intensity", short, default_value = "BraTS20_Training_001_flair.nii")]
    intensity_path: PathBuf,
    /// 标签体数据文件路径（可选）。
    #[arg(long = "label", short)]
    label_path: Option<PathBuf>,
}

impl Inspect {
    pub fn run(&mut self) -> anyhow::Result<()> {
        let intensity = load_volume(self.intensity_path.as_path())?;
        println!("强度体`{}`:", self.intensity_path.display());
        println!("\t形状: {:?}", intensity.dim());
        match finite_range(intensity.iter().copied()) {
            Some((lo, hi)) => println!("\t强度范围: [{lo:.2}, {hi:.2}]"),
            None => println!("\t强度范围: 无有限值"),
        }

        let Some(ref label_path) = self.label_path else {
            return Ok(());
        };
        let labels = load_volume(label_path.as_path())?;
        println!("标签体`{}`:", label_path.display());
        println!("\t形状: {:?}", labels.dim());
        if labels.dim() != intensity.dim() {
            println!("\t注意：与强度体形状不一致");
        }

        let profile = label_profile(&labels);
        let labelled: Vec<usize> = profile
            .iter()
            .enumerate()
            .filter(|&(_, &cnt)| cnt != 0)
            .map(|(idx, _)| idx)
            .collect();
        let (Some(first), Some(last)) = (labelled.first(), labelled.last()) else {
            println!("\t标签体中没有前景体素");
            return Ok(());
        };
        println!("\t含标签的切片: {first}..={last}（共{}张）", labelled.len());
        if let Some((idx, cnt)) = peak_slice(&profile) {
            println!("\t标签面积最大的切片: {idx}（{cnt}个体素）");
        }
        Ok(())
    }
}

fn finite_range<I: Iterator<Item = f32>>(values: I) -> Option<(f32, f32)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f32::min(lo, v), f32::max(hi, v))),
        })
}

/// 第一个标签体素最多的切片。
fn peak_slice(profile: &[usize]) -> Option<(usize, usize)> {
    profile
        .iter()
        .copied()
        .enumerate()
        .filter(|&(_, cnt)| cnt != 0)
        .fold(None, |best, (idx, cnt)| match best {
            Some((_, best_cnt)) if best_cnt >= cnt => best,
            _ => Some((idx, cnt)),
        })
}

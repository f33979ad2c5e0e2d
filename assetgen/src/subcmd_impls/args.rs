use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "assetgen")]
#[command(about = "将一对医学体数据（强度体与标签体）转换为网页用的PNG叠加素材。")]
#[command(version, long_about = None)]
pub struct Cli {
    /// 子命令。
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run_program(&mut self) -> anyhow::Result<()> {
        super::utils::init_tracing();
        match self.command {
            Commands::Generate(ref mut v) => v.run(),
            Commands::Inspect(ref mut v) => v.run(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 取一张轴向切片，生成灰度底图与三种掩膜叠加图。
    Generate(crate::subcmd_impls::generate::Generate),
    /// 查看体数据的形状、强度范围以及含标签的切片，便于选择切片索引。
    Inspect(crate::subcmd_impls::inspect::Inspect),
}

use assetgen::Cli;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let mut cmd: Cli = Cli::parse();
    cmd.run_program()
}

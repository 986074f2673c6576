use anyhow::Result;
use clap::Parser;

use clawbuild::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}

//! cascadoc binary entry point.

use anyhow::Result;
use cascadoc_cli::run_cli;

fn main() -> Result<()> {
    pretty_env_logger::init();
    run_cli()
}

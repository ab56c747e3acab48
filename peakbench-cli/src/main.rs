use anyhow::Result;
use simple_logger::init_with_level;

use peakbench_cli::{build_parser, log_level, run};

fn main() -> Result<()> {
    let matches = build_parser().get_matches();
    init_with_level(log_level(&matches))?;

    run(&matches)
}

//! Batch verification of hardware capture files
//!
//! Loads each corner's capture from a directory and replays every
//! recorded edge through the slope interpolator. Span mismatches are
//! reported but never fatal; the exit code is 0 either way.

use std::path::PathBuf;

use clap::Parser;

use nds_interp::capture::{Capture, CaptureError, Corner};
use nds_interp::dump;
use nds_interp::tester::test_capture;

#[derive(Parser, Debug)]
#[command(name = "linetest", version)]
struct Cli {
    /// Directory holding the capture files (TL.bin, TR.bin, BL.bin, BR.bin)
    #[arg(default_value = "data")]
    dir: PathBuf,

    /// Also write one greyscale frame per captured sweep position here
    #[arg(long, value_name = "DIR")]
    images: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    for corner in Corner::ALL {
        let path = cli.dir.join(corner.file_name());
        let cap = match Capture::load(&path) {
            Ok(cap) => cap,
            Err(e @ CaptureError::Missing(_)) => {
                log::warn!("{}", e);
                continue;
            }
            Err(e) => {
                println!("Loading {}... {}", path.display(), e);
                continue;
            }
        };
        println!(
            "Loading {}... {}, {}x{} to {}x{} -- OK",
            path.display(),
            cap.corner,
            cap.min_x,
            cap.min_y,
            cap.max_x,
            cap.max_y,
        );

        println!("{}", test_capture(&cap));

        if let Some(dir) = &cli.images {
            dump::write_span_images(&cap, dir)?;
        }
    }
    Ok(())
}

//! Shared glue for the driver binaries: logging setup and CSV output.

use std::{ fs, path::{ Path, PathBuf } };
use serde::Serialize;

/// Install `env_logger`, defaulting to the `info` level when `RUST_LOG` is
/// unset.
pub fn init_logging() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
    .format_timestamp(None)
    .init();
}

/// Create (if needed) and return the output directory.
pub fn outdir() -> anyhow::Result<PathBuf> {
    let outdir = PathBuf::from("output");
    fs::create_dir_all(&outdir)?;
    Ok(outdir)
}

/// Write a sequence of records to a CSV file with a header row.
pub fn write_csv<P, I, T>(path: P, records: I) -> anyhow::Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = T>,
    T: Serialize,
{
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    log::info!("wrote {}", path.as_ref().display());
    Ok(())
}

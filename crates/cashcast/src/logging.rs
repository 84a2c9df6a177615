//! File logging for the CLI
//!
//! Everything goes to `{data_dir}/cashcast.log`; stdout is reserved for
//! reports. The file is truncated to its most recent lines at startup once it
//! grows past [`MAX_LOG_SIZE`].

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::util::io::atomic_write;

pub const LOG_FILE: &str = "cashcast.log";

/// Size at which the log is truncated (5 MB)
pub const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;
/// Tail kept after truncation (1 MB)
const KEEP_SIZE: u64 = 1024 * 1024;

const TRUNCATED_MARKER: &str = "--- cashcast log truncated ---\n";

/// Cut an oversized log down to its last whole lines within `KEEP_SIZE`
fn truncate_log(log_path: &Path) -> io::Result<()> {
    let len = match fs::metadata(log_path) {
        Ok(metadata) => metadata.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };
    if len <= MAX_LOG_SIZE {
        return Ok(());
    }

    let mut tail = Vec::with_capacity(KEEP_SIZE as usize);
    let mut file = File::open(log_path)?;
    file.seek(SeekFrom::Start(len - KEEP_SIZE))?;
    file.read_to_end(&mut tail)?;

    let first_whole_line = tail.iter().position(|&b| b == b'\n').map_or(0, |i| i + 1);
    let kept = String::from_utf8_lossy(&tail[first_whole_line..]);
    atomic_write(log_path, &format!("{TRUNCATED_MARKER}{kept}"))
}

/// Install the global subscriber writing to the data directory's log file.
///
/// `RUST_LOG` takes precedence over `level`, which otherwise applies to this
/// crate while the engine stays at `warn`.
pub fn init_logging(data_dir: &Path, level: &str) -> color_eyre::Result<()> {
    fs::create_dir_all(data_dir)?;
    let log_path = data_dir.join(LOG_FILE);

    if let Err(e) = truncate_log(&log_path) {
        eprintln!("Warning: could not truncate {}: {e}", log_path.display());
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cashcast={level},cashcast_core=warn")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();

    tracing::info!(log_path = %log_path.display(), "logging initialized");
    Ok(())
}

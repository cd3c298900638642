use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{LevelFilter, Metadata, Record};

use crate::error::Result;

/// Appends log records to a file, leaving the terminal to the host.
struct FileLogger {
    path: PathBuf,
    level: LevelFilter,
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
            {
                let _ = writeln!(
                    file,
                    "[{}] {}: {}",
                    record.level(),
                    record.target(),
                    record.args()
                );
            }
        }
    }

    fn flush(&self) {}
}

/// Install a logger writing records up to `level` to `path`.
///
/// Fails if the file cannot be opened or a logger is already installed.
pub fn init_logger(path: impl AsRef<Path>, level: LevelFilter) -> Result<()> {
    let path = path.as_ref().to_path_buf();
    // Surface a bad path now rather than dropping every record later
    OpenOptions::new().create(true).append(true).open(&path)?;

    log::set_boxed_logger(Box::new(FileLogger { path, level }))?;
    log::set_max_level(level);
    Ok(())
}

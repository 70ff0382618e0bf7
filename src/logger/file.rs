/// Daily log file sink
///
/// Lines are appended to `<logs_dir>/creatorscan_YYYY-MM-DD.log`. The file is
/// opened once at startup; a run crossing midnight keeps writing the same file.
/// Each line is flushed as it is written, so an abrupt exit loses nothing.
use std::fs::{self, File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use once_cell::sync::Lazy;

static LOG_FILE: Lazy<Mutex<Option<LineWriter<File>>>> = Lazy::new(|| Mutex::new(None));

pub fn init_file_logging(logs_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(logs_dir)?;

    let file_name = format!("creatorscan_{}.log", Local::now().format("%Y-%m-%d"));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(logs_dir.join(file_name))?;

    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = Some(LineWriter::new(file));
    }
    Ok(())
}

pub fn write_to_file(line: &str) {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(writer) = guard.as_mut() {
            // A failing log file must never take the run down with it
            let _ = writeln!(writer, "{}", line);
        }
    }
}

pub fn flush_file_logging() {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(writer) = guard.as_mut() {
            let _ = writer.flush();
        }
    }
}

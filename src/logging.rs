use std::ffi::OsStr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log file path prefix.
pub const LOG_ENV: &str = "AUTORESPOND_LOG";

/// Initialize tracing when `AUTORESPOND_LOG` is set, returning the log file.
///
/// stdout carries the child's terminal output, so nothing is logged there;
/// without the variable no subscriber is installed at all.
pub fn init_tracing() -> Option<PathBuf> {
    let prefix = std::env::var_os(LOG_ENV)?;

    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let path = log_file_path(&prefix, timestamp, std::process::id());

    let file = match std::fs::File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: Failed to create log file {}: {}", path.display(), e);
            return None;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
    Some(path)
}

/// `{prefix}.{timestamp}.{pid}`, so concurrent runs never share a file.
fn log_file_path(prefix: &OsStr, timestamp: u64, pid: u32) -> PathBuf {
    let mut name = prefix.to_os_string();
    name.push(format!(".{timestamp}.{pid}"));
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::log_file_path;
    use std::ffi::OsStr;
    use std::path::PathBuf;

    #[test]
    fn log_path_appends_timestamp_and_pid() {
        let path = log_file_path(OsStr::new("/tmp/autorespond.log"), 1700000000, 4242);
        assert_eq!(path, PathBuf::from("/tmp/autorespond.log.1700000000.4242"));
    }

    #[test]
    fn distinct_pids_get_distinct_files() {
        let prefix = OsStr::new("run.log");
        assert_ne!(log_file_path(prefix, 1, 10), log_file_path(prefix, 1, 11));
    }
}

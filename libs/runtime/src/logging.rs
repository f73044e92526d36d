//! Subscriber setup.
//!
//! Every key of the `logging` map except `default` names a subsystem: a crate
//! or module path prefix such as `sqlx` or `appointments::domain`. Records are
//! filtered by the most specific matching key, printed to stdout and, when a
//! file is configured, appended as JSON lines to a size-rotated file.

use std::collections::BTreeMap;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use file_rotate::compression::Compression;
use file_rotate::suffix::{AppendTimestamp, FileLimit};
use file_rotate::{ContentLimit, FileRotate};
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Layer;

/// Key of the catch-all section.
pub const DEFAULT_SECTION: &str = "default";

/// Subsystem name → settings.
pub type LoggingConfig = BTreeMap<String, LogSection>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSection {
    /// `trace`, `debug`, `info`, `warn`, `error` or `off`.
    pub console_level: String,
    /// Relative paths are resolved against `server.home_dir`. Empty means the
    /// subsystem shares the default file.
    pub file: String,
    pub file_level: String,
    pub max_size_mb: u64,
    /// Rotated files to keep; when unset, files older than `max_age_days` go.
    pub max_backups: Option<usize>,
    pub max_age_days: u32,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            console_level: "info".into(),
            file: String::new(),
            file_level: "debug".into(),
            max_size_mb: 100,
            max_backups: None,
            max_age_days: 7,
        }
    }
}

impl LogSection {
    fn console(&self) -> LevelFilter {
        parse_level(&self.console_level)
    }

    fn file_filter(&self) -> LevelFilter {
        parse_level(&self.file_level)
    }

    fn file_limit(&self) -> FileLimit {
        match self.max_backups {
            Some(n) => FileLimit::MaxFiles(n.max(1)),
            None => FileLimit::Age(chrono::Duration::days(i64::from(self.max_age_days))),
        }
    }

    fn file_path(&self, home: &Path) -> Option<PathBuf> {
        let file = self.file.trim();
        (!file.is_empty()).then(|| home.join(file))
    }
}

/// Unknown names log at `info` rather than failing startup.
fn parse_level(raw: &str) -> LevelFilter {
    raw.trim().parse().unwrap_or(LevelFilter::INFO)
}

type SharedFile = Arc<Mutex<FileRotate<AppendTimestamp>>>;

fn open_rotating(path: &Path, section: &LogSection) -> io::Result<SharedFile> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let max_bytes = usize::try_from(section.max_size_mb.max(1).saturating_mul(1024 * 1024))
        .unwrap_or(usize::MAX);
    let file = FileRotate::new(
        path,
        AppendTimestamp::default(section.file_limit()),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None,
    );
    Ok(Arc::new(Mutex::new(file)))
}

/// Picks the log file for a record by longest matching target prefix.
#[derive(Clone, Default)]
struct FileRoutes {
    fallback: Option<SharedFile>,
    by_target: Vec<(String, SharedFile)>,
}

impl FileRoutes {
    fn build(cfg: &LoggingConfig, home: &Path) -> Self {
        let mut routes = Self::default();
        for (name, section) in cfg {
            let Some(path) = section.file_path(home) else {
                continue;
            };
            let file = match open_rotating(&path, section) {
                Ok(file) => file,
                Err(e) => {
                    // No subscriber yet, so stderr is the only place to say it.
                    eprintln!("log file for '{name}' at {} unavailable: {e}", path.display());
                    continue;
                }
            };
            if name == DEFAULT_SECTION {
                routes.fallback = Some(file);
            } else {
                routes.by_target.push((name.clone(), file));
            }
        }
        routes.by_target.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        routes
    }

    fn is_empty(&self) -> bool {
        self.fallback.is_none() && self.by_target.is_empty()
    }

    fn has_own_file(&self, name: &str) -> bool {
        self.by_target.iter().any(|(n, _)| n == name)
    }

    fn route(&self, target: &str) -> Option<&SharedFile> {
        self.by_target
            .iter()
            .find(|(prefix, _)| under_prefix(target, prefix))
            .map(|(_, file)| file)
            .or(self.fallback.as_ref())
    }
}

/// `appointments` covers `appointments` and `appointments::*`, not `appointments_x`.
fn under_prefix(target: &str, prefix: &str) -> bool {
    target
        .strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

/// Writer handed out per record; records with no file are dropped.
struct RoutedFile(Option<SharedFile>);

impl Write for RoutedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &self.0 {
            Some(file) => lock(file)?.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &self.0 {
            Some(file) => lock(file)?.flush(),
            None => Ok(()),
        }
    }
}

fn lock(file: &SharedFile) -> io::Result<std::sync::MutexGuard<'_, FileRotate<AppendTimestamp>>> {
    file.lock()
        .map_err(|_| io::Error::other("log file lock poisoned"))
}

impl<'a> MakeWriter<'a> for FileRoutes {
    type Writer = RoutedFile;

    fn make_writer(&'a self) -> Self::Writer {
        RoutedFile(self.fallback.clone())
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        RoutedFile(self.route(meta.target()).cloned())
    }
}

fn console_targets(cfg: &LoggingConfig) -> Targets {
    cfg.iter().fold(Targets::new(), |targets, (name, section)| {
        if name == DEFAULT_SECTION {
            targets.with_default(section.console())
        } else {
            targets.with_target(name.clone(), section.console())
        }
    })
}

/// A subsystem without its own file writes to the default file, at its own level.
fn file_targets(cfg: &LoggingConfig, routes: &FileRoutes) -> Targets {
    let shared = routes.fallback.is_some();
    cfg.iter().fold(Targets::new(), |targets, (name, section)| {
        if name == DEFAULT_SECTION {
            let level = if shared { section.file_filter() } else { LevelFilter::OFF };
            targets.with_default(level)
        } else if shared || routes.has_own_file(name) {
            targets.with_target(name.clone(), section.file_filter())
        } else {
            targets.with_target(name.clone(), LevelFilter::OFF)
        }
    })
}

/// Install the global subscriber; relative log files land under `home`.
///
/// Only the first call in a process takes effect.
pub fn init_logging_from_config(cfg: &LoggingConfig, home: &Path) {
    // sqlx and sea-orm emit through `log`.
    let _ = tracing_log::LogTracer::init();

    let cfg = if cfg.is_empty() {
        LoggingConfig::from([(DEFAULT_SECTION.to_owned(), LogSection::default())])
    } else {
        cfg.clone()
    };

    let console = fmt::layer()
        .with_ansi(io::stdout().is_terminal())
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(console_targets(&cfg));

    let routes = FileRoutes::build(&cfg, home);
    let files = (!routes.is_empty()).then(|| {
        let targets = file_targets(&cfg, &routes);
        fmt::layer()
            .json()
            .with_ansi(false)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_writer(routes)
            .with_filter(targets)
    });

    let subscriber = tracing_subscriber::registry().with(console).with(files);
    let _ = tracing::subscriber::set_global_default(subscriber);
}

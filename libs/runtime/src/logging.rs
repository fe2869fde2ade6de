use crate::config::{LoggingConfig, Section};
use std::{
    collections::HashMap,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_subscriber::{
    filter::{FilterFn, Targets},
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    Layer, Registry,
};

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};

const DEFAULT_SECTION: &str = "default";
const DEFAULT_MAX_SIZE_MB: u64 = 100;
const DEFAULT_MAX_BACKUPS: usize = 3;

// -------- levels --------

/// `None` means the sink is switched off. Unknown strings fall back to INFO.
fn parse_tracing_level(s: &str) -> Option<Level> {
    match s.trim().to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        "off" | "none" => None,
        _ => Some(Level::INFO),
    }
}

/// Returns true if target == subsystem or target starts with "subsystem::"
fn matches_subsystem(target: &str, subsystem: &str) -> bool {
    target
        .strip_prefix(subsystem)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

type DefaultFilter = FilterFn<Box<dyn Fn(&tracing::Metadata<'_>) -> bool + Send + Sync + 'static>>;

/// Catch-all filter: passes records up to `max_level` unless an explicit subsystem owns them.
fn default_filter(subsystems: &[String], max_level: Level) -> DefaultFilter {
    let subsystems = subsystems.to_vec();
    FilterFn::new(Box::new(move |meta: &tracing::Metadata<'_>| {
        let target = meta.target();
        !subsystems.iter().any(|s| matches_subsystem(target, s)) && *meta.level() <= max_level
    }))
}

// -------- rotating file sinks --------

#[derive(Clone)]
struct RotatingFile(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl RotatingFile {
    /// `path` must already be resolved; parent directories are created.
    fn open(path: &Path, max_bytes: usize, max_files: usize) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let rot = FileRotate::new(
            path,
            AppendTimestamp::default(FileLimit::MaxFiles(max_files)),
            ContentLimit::BytesSurpassed(max_bytes),
            Compression::None,
            #[cfg(unix)]
            None,
        );

        Ok(Self(Arc::new(Mutex::new(rot))))
    }

    fn from_section(section: &Section, base_dir: &Path) -> Option<Self> {
        if section.file.trim().is_empty() {
            return None;
        }

        let max_bytes = section.max_size_mb.unwrap_or(DEFAULT_MAX_SIZE_MB) * 1024 * 1024;
        let max_files = section.max_backups.unwrap_or(DEFAULT_MAX_BACKUPS).max(1);
        let path = resolve_log_path(&section.file, base_dir);

        match Self::open(&path, max_bytes as usize, max_files) {
            Ok(file) => Some(file),
            Err(e) => {
                // The subscriber is not installed yet, so stderr is the only channel.
                eprintln!("Failed to open log file '{}': {}", path.display(), e);
                None
            }
        }
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?
            .write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?
            .flush()
    }
}

/// Writer that may be detached (writes are dropped).
struct MaybeFile(Option<RotatingFile>);

impl Write for MaybeFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.0 {
            Some(w) => w.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.0 {
            Some(w) => w.flush(),
            None => Ok(()),
        }
    }
}

/// Routes records to a file by target prefix, falling back to the default file.
#[derive(Clone, Default)]
struct FileRouter {
    default: Option<RotatingFile>,
    by_subsystem: HashMap<String, RotatingFile>,
}

impl FileRouter {
    fn build(plan: &LoggingPlan<'_>, base_dir: &Path) -> Self {
        let default = plan
            .default_section
            .and_then(|s| RotatingFile::from_section(s, base_dir));

        let by_subsystem = plan
            .subsystems
            .iter()
            .filter_map(|(name, section)| {
                RotatingFile::from_section(section, base_dir).map(|f| (name.clone(), f))
            })
            .collect();

        Self {
            default,
            by_subsystem,
        }
    }

    fn resolve(&self, target: &str) -> Option<RotatingFile> {
        self.by_subsystem
            .iter()
            .find(|(name, _)| matches_subsystem(target, name))
            .map(|(_, f)| f.clone())
            .or_else(|| self.default.clone())
    }

    fn is_empty(&self) -> bool {
        self.default.is_none() && self.by_subsystem.is_empty()
    }
}

impl<'a> fmt::MakeWriter<'a> for FileRouter {
    type Writer = MaybeFile;

    fn make_writer(&'a self) -> Self::Writer {
        MaybeFile(self.default.clone())
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        MaybeFile(self.resolve(meta.target()))
    }
}

// -------- config → plan --------

struct LoggingPlan<'a> {
    default_section: Option<&'a Section>,
    subsystems: Vec<(String, &'a Section)>,
}

impl<'a> LoggingPlan<'a> {
    fn from_config(cfg: &'a LoggingConfig) -> Self {
        let subsystems = cfg
            .iter()
            .filter(|(k, _)| k.as_str() != DEFAULT_SECTION)
            .map(|(k, v)| (k.clone(), v))
            .collect();

        Self {
            default_section: cfg.get(DEFAULT_SECTION),
            subsystems,
        }
    }

    fn subsystem_names(&self) -> Vec<String> {
        self.subsystems.iter().map(|(n, _)| n.clone()).collect()
    }

    fn console_targets(&self) -> Targets {
        self.subsystems
            .iter()
            .filter_map(|(name, s)| parse_tracing_level(&s.console_level).map(|l| (name, l)))
            .fold(
                Targets::new().with_default(LevelFilter::OFF),
                |t, (name, level)| t.with_target(name.clone(), LevelFilter::from_level(level)),
            )
    }

    fn file_targets(&self) -> Targets {
        self.subsystems
            .iter()
            .filter(|(_, s)| !s.file.trim().is_empty())
            .filter_map(|(name, s)| parse_tracing_level(&s.file_level).map(|l| (name, l)))
            .fold(
                Targets::new().with_default(LevelFilter::OFF),
                |t, (name, level)| t.with_target(name.clone(), LevelFilter::from_level(level)),
            )
    }
}

/// Resolve a log file path against `base_dir` (home_dir).
/// Absolute paths are kept as-is; relative paths are joined with `base_dir`.
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

// -------- public init --------

/// Initialize logging from a configuration.
/// - `cfg`: subsystem → section map; "default" catches everything else
/// - `base_dir`: base directory used to resolve relative log file paths (usually server.home_dir)
///
/// Installing twice is a no-op.
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    // Bridge `log` → `tracing` *before* installing the subscriber
    let _ = tracing_log::LogTracer::init();

    if cfg.is_empty() {
        let _ = tracing_subscriber::fmt()
            .with_target(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .try_init();
        return;
    }

    let plan = LoggingPlan::from_config(cfg);
    let router = FileRouter::build(&plan, base_dir);
    let names = plan.subsystem_names();
    let ansi = atty::is(atty::Stream::Stdout);

    let console_explicit = fmt::layer()
        .with_ansi(ansi)
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(plan.console_targets());

    let console_default = plan
        .default_section
        .and_then(|s| parse_tracing_level(&s.console_level))
        .map(|level| {
            fmt::layer()
                .with_ansi(ansi)
                .with_target(true)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_filter(default_filter(&names, level))
        });

    let file_explicit = (!router.is_empty()).then(|| {
        fmt::layer()
            .json()
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_writer(router.clone())
            .with_filter(plan.file_targets())
    });

    let file_default = router
        .default
        .as_ref()
        .and(plan.default_section)
        .and_then(|s| parse_tracing_level(&s.file_level))
        .map(|level| {
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_target(true)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_writer(router.clone())
                .with_filter(default_filter(&names, level))
        });

    let _ = Registry::default()
        .with(console_explicit)
        .with(console_default)
        .with(file_explicit)
        .with(file_default)
        .try_init();
}

// =================== tests ===================

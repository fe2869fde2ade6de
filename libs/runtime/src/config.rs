use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::paths::home_dir::resolve_home_dir;

/// Home directory used when `server.home_dir` is empty, under the user's home.
const DEFAULT_HOME_SUBDIR: &str = ".helpdesk";

/// Environment overrides, e.g. `APP__SERVER__PORT=8080` or
/// `APP__MODULES__TICKETS__SEED_DEMO_DATA=false`.
const ENV_PREFIX: &str = "APP__";

/// Process configuration: the server section, logging sinks and one free-form
/// section per module (`api_ingress`, `tickets`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    /// `None` until a file or the CLI provides logging settings.
    pub logging: Option<LoggingConfig>,
    /// Extra `<module>.yaml` files merged into `modules`.
    #[serde(default)]
    pub modules_dir: Option<String>,
    #[serde(default)]
    pub modules: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Absolute after loading; logs and other relative paths hang off it.
    pub home_dir: String,
    pub host: String,
    pub port: u16,
    /// Request timeout in seconds; 0 leaves it to the HTTP module.
    #[serde(default)]
    pub timeout_sec: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            home_dir: String::new(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            timeout_sec: 0,
        }
    }
}

impl ServerConfig {
    /// `host:port` as a bindable address string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Replace `home_dir` with its absolute form and make sure it exists.
    fn resolve_home_dir(&mut self) -> Result<()> {
        let configured = Some(self.home_dir.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        let resolved = resolve_home_dir(configured, DEFAULT_HOME_SUBDIR, true)
            .context("Failed to resolve server.home_dir")?;
        self.home_dir = resolved.to_string_lossy().into_owned();
        Ok(())
    }
}

/// Subsystem (crate target prefix) → sink settings. `default` catches the rest.
pub type LoggingConfig = HashMap<String, Section>;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Section {
    /// `trace` .. `error`, or `off`.
    pub console_level: String,
    /// Relative to `server.home_dir`; empty disables the file sink.
    pub file: String,
    #[serde(default)]
    pub file_level: String,
    #[serde(default)]
    pub max_backups: Option<usize>,
    #[serde(default)]
    pub max_size_mb: Option<u64>,
}

/// Console at info, everything at debug into `logs/helpdesk.log`.
pub fn default_logging_config() -> LoggingConfig {
    HashMap::from([(
        "default".to_string(),
        Section {
            console_level: "info".to_string(),
            file: "logs/helpdesk.log".to_string(),
            file_level: "debug".to_string(),
            max_backups: Some(3),
            max_size_mb: Some(100),
        },
    )])
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: Some(default_logging_config()),
            modules_dir: None,
            modules: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Defaults, then the YAML file, then `APP__*` environment variables.
    /// The file must exist; `server.home_dir` comes back absolute.
    pub fn load_layered<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Yaml},
            Figment,
        };

        let path = config_path.as_ref();
        // Figment silently skips missing files.
        if !path.is_file() {
            anyhow::bail!("config file not found: {}", path.display());
        }

        let base = AppConfig {
            logging: None,
            ..AppConfig::default()
        };
        let mut config: AppConfig = Figment::new()
            .merge(Serialized::defaults(base))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("Failed to parse yaml config {}", path.display()))?;

        config.server.resolve_home_dir()?;
        if let Some(dir) = config.modules_dir.as_deref() {
            let from_files = read_module_dir(Path::new(dir))?;
            config.modules.extend(from_files);
        }
        Ok(config)
    }

    /// `load_layered` when a path is given, built-in defaults otherwise.
    pub fn load_or_default<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_layered(path);
        }
        let mut config = Self::default();
        config.server.resolve_home_dir()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config to YAML")
    }

    /// `--port` replaces the server port; `-v` / `-vv` raise the default
    /// console level to debug / trace.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(port) = args.port {
            self.server.port = port;
        }

        let level = match args.verbose {
            0 => return,
            1 => "debug",
            _ => "trace",
        };
        let logging = self.logging.get_or_insert_with(default_logging_config);
        if let Some(section) = logging.get_mut("default") {
            section.console_level = level.to_string();
        }
    }

    /// Module section as `T`; a missing or malformed section yields `T::default()`
    /// (malformed ones are logged).
    pub fn module_config<T: DeserializeOwned + Default>(&self, module_name: &str) -> T {
        let Some(raw) = self.modules.get(module_name) else {
            return T::default();
        };
        serde_json::from_value(raw.clone()).unwrap_or_else(|e| {
            tracing::warn!(module = module_name, error = %e, "Invalid module config; using defaults");
            T::default()
        })
    }

    /// Module section as `T`; missing or malformed sections are errors naming the module.
    pub fn module_config_required<T: DeserializeOwned>(&self, module_name: &str) -> Result<T> {
        let raw = self
            .modules
            .get(module_name)
            .with_context(|| format!("missing module config: {module_name}"))?;
        serde_json::from_value(raw.clone())
            .map_err(|e| anyhow::anyhow!("invalid {module_name} config: {e}"))
    }
}

/// Flags from the command line that feed into the configuration.
#[derive(Debug, Clone)]
pub struct CliArgs {
    pub config: Option<String>,
    pub port: Option<u16>,
    pub print_config: bool,
    pub verbose: u8,
}

/// `<name>.yaml` / `<name>.yml` files of `dir`, keyed by file stem.
/// A missing directory contributes nothing.
fn read_module_dir(dir: &Path) -> Result<HashMap<String, serde_json::Value>> {
    let mut sections = HashMap::new();
    if !dir.is_dir() {
        return Ok(sections);
    }
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to list modules_dir {}", dir.display()))?
    {
        let path = entry?.path();
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if !path.is_file() || !is_yaml {
            continue;
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read module config {}", path.display()))?;
        let value: serde_json::Value = serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse yaml module config {}", path.display()))?;
        sections.insert(name.to_owned(), value);
    }
    Ok(sections)
}

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HomeDirError {
    #[error("cannot determine the user home directory")]
    NoHomeDir,

    #[error("cannot resolve relative home_dir '{path}': {source}")]
    CurrentDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create home_dir '{path}': {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Resolve the server home directory into an absolute path.
///
/// - `None` => `<platform base>/<default_subdir>` (home dir on Unix/macOS, roaming data dir on Windows)
/// - `~` and `~/...` are expanded against the user home dir
/// - relative paths are joined onto the current working directory
///
/// When `create` is set the directory (and its parents) is created.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf, HomeDirError> {
    let path = match configured {
        None => platform_base()?.join(default_subdir),
        Some(raw) => expand_tilde(raw.trim())?,
    };

    let path = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .map_err(|source| HomeDirError::CurrentDir {
                path: path.clone(),
                source,
            })?
            .join(path)
    };

    if create {
        std::fs::create_dir_all(&path).map_err(|source| HomeDirError::Create {
            path: path.clone(),
            source,
        })?;
    }

    Ok(path)
}

fn platform_base() -> Result<PathBuf, HomeDirError> {
    #[cfg(target_os = "windows")]
    let base = dirs::data_dir();
    #[cfg(not(target_os = "windows"))]
    let base = dirs::home_dir();

    base.ok_or(HomeDirError::NoHomeDir)
}

fn user_home() -> Result<PathBuf, HomeDirError> {
    dirs::home_dir().ok_or(HomeDirError::NoHomeDir)
}

fn expand_tilde(raw: &str) -> Result<PathBuf, HomeDirError> {
    if raw == "~" {
        return user_home();
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        return Ok(user_home()?.join(rest));
    }
    Ok(Path::new(raw).to_path_buf())
}

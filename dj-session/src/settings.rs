//! Session settings loading.
//!
//! [`load`] layers an optional TOML file under environment overrides (prefix
//! `DJ_SESSION__`, `__` between nesting levels) and falls back to the
//! [`SessionConfig`] defaults for anything left unset.

use deck_cache::config::SessionConfig;
use deck_cache::service::DjLibrary;
use deck_cache::ConfigError;
use std::env;
use std::path::{Path, PathBuf};

/// Prefix of environment overrides, e.g. `DJ_SESSION__CONTROLLER__CACHE_SIZE=8`.
pub const ENV_PREFIX: &str = "DJ_SESSION";

/// Environment variable naming the session file when `--config` is not given.
pub const CONFIG_PATH_VAR: &str = "DJ_SESSION_CONFIG_PATH";

/// Load settings from an optional session file and the environment.
///
/// An explicit `path` must exist. Without one, the file from
/// [`resolve_config_path`] is used if it is present.
pub fn load(path: Option<&Path>) -> Result<SessionConfig, ::config::ConfigError> {
    let mut builder = ::config::Config::builder();

    match path {
        Some(path) => {
            builder = builder.add_source(
                ::config::File::from(path)
                    .format(::config::FileFormat::Toml)
                    .required(true),
            );
        }
        None => {
            if let Some(path) = resolve_config_path() {
                builder = builder.add_source(::config::File::from(path.as_path()).required(false));
            }
        }
    }

    builder = builder.add_source(
        ::config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    builder.build()?.try_deserialize()
}

/// Resolve the session file from `DJ_SESSION_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_PATH_VAR) {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// `$XDG_CONFIG_HOME/dj-session/session.toml`, or `~/.config/dj-session/session.toml`
/// when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("dj-session").join("session.toml"))
}

/// Checks that a session can be built from `settings`.
///
/// Hard errors (zero cache size, invalid or duplicate tracks) are returned as
/// `Err`. Problems a session tolerates, such as playlist indices outside the
/// library, are returned as warnings.
pub fn validate(settings: &SessionConfig) -> Result<Vec<String>, ConfigError> {
    settings.cache_capacity()?;

    let mut library = DjLibrary::new();
    let tracks = library.build_library(&settings.library)?;

    let mut warnings = Vec::new();
    for playlist in &settings.playlists {
        for &index in &playlist.tracks {
            let in_range = usize::try_from(index).is_ok_and(|i| (1..=tracks).contains(&i));
            if !in_range {
                warnings.push(format!(
                    "playlist '{}': track index {} is outside 1..={}",
                    playlist.name, index, tracks
                ));
            }
        }
    }
    if settings.playlists.is_empty() {
        warnings.push("no playlists configured; `run` plays the whole library".to_string());
    }
    Ok(warnings)
}

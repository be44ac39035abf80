use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Admin API used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Environment variable consulted for the API token.
pub const TOKEN_ENV: &str = "POSTDESK_TOKEN";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub draft_dir: Option<PathBuf>,
    pub debug_log: Option<PathBuf>,
    pub help_on_start: bool,
}

impl ConfigFlags {
    /// Merge `other` over `self`: booleans are or-ed, options from `other`
    /// win when set.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            api_url: other.api_url.clone().or_else(|| self.api_url.clone()),
            token: other.token.clone().or_else(|| self.token.clone()),
            draft_dir: other.draft_dir.clone().or_else(|| self.draft_dir.clone()),
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
            help_on_start: self.help_on_start || other.help_on_start,
        }
    }

    /// Fill in defaults. `env_token` is used only when no token flag is set.
    pub fn resolve(&self, env_token: Option<String>) -> Settings {
        Settings {
            api_url: self
                .api_url
                .clone()
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token: self
                .token
                .clone()
                .or(env_token)
                .filter(|token| !token.trim().is_empty()),
            draft_dir: self.draft_dir.clone().unwrap_or_else(default_draft_dir),
            debug_log: self.debug_log.clone(),
            help_on_start: self.help_on_start,
        }
    }
}

/// Effective configuration after merging files, command line and defaults.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub token: Option<String>,
    pub draft_dir: PathBuf,
    pub debug_log: Option<PathBuf>,
    pub help_on_start: bool,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("draft_dir", &self.draft_dir)
            .field("debug_log", &self.debug_log)
            .field("help_on_start", &self.help_on_start)
            .finish()
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("postdesk").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("postdesk")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("postdesk").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("postdesk")
                .join("config");
        }
    }

    PathBuf::from(".postdeskrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".postdeskrc")
}

/// Directory holding the draft slot when `--draft-dir` is not given.
pub fn default_draft_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("LOCALAPPDATA") {
            return PathBuf::from(appdata).join("postdesk").join("drafts");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("postdesk")
                .join("drafts");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("postdesk");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("postdesk");
        }
    }

    PathBuf::from(".postdesk")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# postdesk defaults (saved with --save)".to_string());
    if let Some(url) = &flags.api_url {
        lines.push(format!("--api-url {url}"));
    }
    if let Some(token) = &flags.token {
        lines.push(format!("--token {token}"));
    }
    if let Some(dir) = &flags.draft_dir {
        lines.push(format!("--draft-dir {}", dir.display()));
    }
    if let Some(path) = &flags.debug_log {
        lines.push(format!("--debug-log {}", path.display()));
    }
    if flags.help_on_start {
        lines.push("--help-on-start".to_string());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the recognised flags out of raw tokens, ignoring everything else.
///
/// Values can follow as the next token (`--api-url URL`) or be attached
/// with `=` (`--api-url=URL`).
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        if token == "--help-on-start" {
            flags.help_on_start = true;
        } else if let Some((name, value)) = token.split_once('=') {
            apply_value(&mut flags, name, value);
        } else if is_value_flag(token) {
            if let Some(next) = tokens.get(i + 1) {
                apply_value(&mut flags, token, next);
                i += 1;
            }
        }
        i += 1;
    }
    flags
}

fn is_value_flag(name: &str) -> bool {
    matches!(name, "--api-url" | "--token" | "--draft-dir" | "--debug-log")
}

fn apply_value(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "--api-url" => flags.api_url = Some(value.trim_end_matches('/').to_string()),
        "--token" => flags.token = Some(value.to_string()),
        "--draft-dir" => flags.draft_dir = Some(PathBuf::from(value)),
        "--debug-log" => flags.debug_log = Some(PathBuf::from(value)),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = tokens(&[
            "postdesk",
            "--api-url",
            "https://blog.example.com/api/",
            "--token=abc123",
            "--draft-dir",
            "/tmp/drafts",
            "--help-on-start",
            "edit",
            "42",
        ]);
        let flags = parse_flag_tokens(&args);
        assert_eq!(flags.api_url.as_deref(), Some("https://blog.example.com/api"));
        assert_eq!(flags.token.as_deref(), Some("abc123"));
        assert_eq!(flags.draft_dir, Some(PathBuf::from("/tmp/drafts")));
        assert!(flags.help_on_start);
        assert_eq!(flags.debug_log, None);
    }

    #[test]
    fn test_value_flag_at_end_is_ignored() {
        let flags = parse_flag_tokens(&tokens(&["postdesk", "--token"]));
        assert_eq!(flags.token, None);
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            api_url: Some("http://file".to_string()),
            token: Some("file-token".to_string()),
            help_on_start: true,
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            api_url: Some("http://cli".to_string()),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert_eq!(merged.api_url.as_deref(), Some("http://cli"));
        assert_eq!(merged.token.as_deref(), Some("file-token"));
        assert!(merged.help_on_start);
    }

    #[test]
    fn test_resolve_fills_defaults_and_env_token() {
        let settings = ConfigFlags::default().resolve(Some("env-token".to_string()));
        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert_eq!(settings.token.as_deref(), Some("env-token"));
        assert!(!settings.help_on_start);

        let flags = ConfigFlags {
            token: Some("flag-token".to_string()),
            ..ConfigFlags::default()
        };
        let settings = flags.resolve(Some("env-token".to_string()));
        assert_eq!(settings.token.as_deref(), Some("flag-token"));
    }

    #[test]
    fn test_resolve_drops_blank_token() {
        let settings = ConfigFlags::default().resolve(Some("  ".to_string()));
        assert_eq!(settings.token, None);
    }

    #[test]
    fn test_settings_debug_redacts_token() {
        let flags = ConfigFlags {
            token: Some("secret".to_string()),
            ..ConfigFlags::default()
        };
        let debug = format!("{:?}", flags.resolve(None));
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(".postdeskrc");
        let flags = ConfigFlags {
            api_url: Some("https://blog.example.com/api".to_string()),
            token: Some("abc".to_string()),
            draft_dir: Some(PathBuf::from("drafts")),
            debug_log: Some(PathBuf::from("debug.log")),
            help_on_start: true,
        };

        save_config_flags(&path, &flags).unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded, flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
        clear_config_flags(&path).unwrap();
    }

    #[test]
    fn test_missing_config_is_default() {
        let dir = tempdir().unwrap();
        let loaded = load_config_flags(&dir.path().join("absent")).unwrap();
        assert_eq!(loaded, ConfigFlags::default());
    }
}

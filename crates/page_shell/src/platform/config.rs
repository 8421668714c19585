use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use page_core::{ChatConfig, SidebarConfig, DEFAULT_BREAKPOINT_PX};
use page_engine::{ChatEndpoint, DeliverySettings};
use serde::{Deserialize, Serialize};
use url::Url;

const DEFAULT_CONFIG_FILENAME: &str = "page_shell.ron";

/// Contents of `page_shell.ron`. Only `endpoint` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ShellConfig {
    pub endpoint: String,
    #[serde(default)]
    pub user_initials: Option<String>,
    #[serde(default)]
    pub anti_forgery_token: Option<String>,
    #[serde(default = "default_breakpoint_px")]
    pub breakpoint_px: u32,
    #[serde(default = "default_resize_quiet_ms")]
    pub resize_quiet_ms: u64,
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
    #[serde(default)]
    pub log_to_terminal: bool,
}

fn default_breakpoint_px() -> u32 {
    DEFAULT_BREAKPOINT_PX
}

fn default_resize_quiet_ms() -> u64 {
    SidebarConfig::default().resize_quiet_period.as_millis() as u64
}

fn default_viewport_width() -> u32 {
    1280
}

impl ShellConfig {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub(crate) fn parse(text: &str) -> Result<Self> {
        let config: Self = ron::from_str(text)?;
        config.endpoint_url()?;
        Ok(config)
    }

    pub(crate) fn endpoint_url(&self) -> Result<Url> {
        Url::parse(&self.endpoint).with_context(|| format!("invalid endpoint {:?}", self.endpoint))
    }

    pub(crate) fn chat_config(&self) -> Result<ChatConfig> {
        let mut config = ChatConfig::new(self.endpoint_url()?)
            .with_anti_forgery_token(self.anti_forgery_token.clone());
        if let Some(initials) = &self.user_initials {
            config = config.with_user_initials(initials.clone());
        }
        Ok(config)
    }

    pub(crate) fn sidebar_config(&self) -> SidebarConfig {
        SidebarConfig {
            breakpoint_px: self.breakpoint_px,
            resize_quiet_period: Duration::from_millis(self.resize_quiet_ms),
        }
    }

    pub(crate) fn delivery_settings(&self) -> DeliverySettings {
        DeliverySettings {
            request_timeout: self.request_timeout_ms.map(Duration::from_millis),
        }
    }
}

pub(crate) fn endpoint_for(config: &ChatConfig) -> ChatEndpoint {
    ChatEndpoint::new(config.endpoint.clone(), config.anti_forgery_token.clone())
}

/// First CLI argument, else `page_shell.ron` in the working directory.
pub(crate) fn config_path_from_args(mut args: impl Iterator<Item = String>) -> PathBuf {
    args.next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn minimal_config_gets_defaults() {
        let config = ShellConfig::parse(r#"(endpoint: "https://example.com/chat/")"#).unwrap();

        assert_eq!(config.sidebar_config(), SidebarConfig::default());
        assert_eq!(config.viewport_width, 1280);
        assert_eq!(config.delivery_settings().request_timeout, None);
        let chat = config.chat_config().unwrap();
        assert_eq!(chat.initials(), "YOU");
        assert_eq!(chat.anti_forgery_token, None);
    }

    #[test]
    fn full_config_round_trips_into_component_configs() {
        let text = r#"(
            endpoint: "https://example.com/documents/3/chat/",
            user_initials: Some("JD"),
            anti_forgery_token: Some("abc"),
            breakpoint_px: 800,
            resize_quiet_ms: 200,
            viewport_width: 640,
            request_timeout_ms: Some(30000),
        )"#;
        let config = ShellConfig::parse(text).unwrap();

        let chat = config.chat_config().unwrap();
        assert_eq!(chat.initials(), "JD");
        assert_eq!(chat.anti_forgery_token.as_deref(), Some("abc"));
        let endpoint = endpoint_for(&chat);
        assert_eq!(endpoint.url.path(), "/documents/3/chat/");
        assert_eq!(
            config.sidebar_config(),
            SidebarConfig {
                breakpoint_px: 800,
                resize_quiet_period: Duration::from_millis(200),
            }
        );
        assert_eq!(
            config.delivery_settings().request_timeout,
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let err = ShellConfig::parse(r#"(endpoint: "not a url")"#).unwrap_err();
        assert!(format!("{err:#}").contains("invalid endpoint"));
    }

    #[test]
    fn load_reports_missing_file_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.ron");
        let err = ShellConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("absent.ron"));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"(endpoint: "http://127.0.0.1:8000/chat/", viewport_width: 900)"#)
            .unwrap();
        let config = ShellConfig::load(file.path()).unwrap();
        assert_eq!(config.viewport_width, 900);
    }

    #[test]
    fn config_path_defaults_when_no_args() {
        assert_eq!(
            config_path_from_args(std::iter::empty()),
            PathBuf::from("page_shell.ron")
        );
        assert_eq!(
            config_path_from_args(vec!["custom.ron".to_string()].into_iter()),
            PathBuf::from("custom.ron")
        );
    }
}

use std::time::Duration;

use url::Url;

/// Label shown in the user avatar when no initials are configured.
pub const DEFAULT_USER_INITIALS: &str = "YOU";

/// Viewport width (in CSS pixels) at and above which the sidebar is docked open.
pub const DEFAULT_BREAKPOINT_PX: u32 = 1024;

const DEFAULT_RESIZE_QUIET_PERIOD: Duration = Duration::from_millis(150);

/// Construction-time configuration of the chat submitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    pub endpoint: Url,
    pub user_initials: String,
    pub anti_forgery_token: Option<String>,
}

impl ChatConfig {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            user_initials: DEFAULT_USER_INITIALS.to_string(),
            anti_forgery_token: None,
        }
    }

    pub fn with_user_initials(mut self, initials: impl Into<String>) -> Self {
        self.user_initials = initials.into();
        self
    }

    /// Empty tokens are dropped; the page treats them as absent.
    pub fn with_anti_forgery_token(mut self, token: Option<String>) -> Self {
        self.anti_forgery_token = token.filter(|token| !token.is_empty());
        self
    }

    pub fn initials(&self) -> &str {
        let trimmed = self.user_initials.trim();
        if trimmed.is_empty() {
            DEFAULT_USER_INITIALS
        } else {
            trimmed
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarConfig {
    pub breakpoint_px: u32,
    pub resize_quiet_period: Duration,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: DEFAULT_BREAKPOINT_PX,
            resize_quiet_period: DEFAULT_RESIZE_QUIET_PERIOD,
        }
    }
}

impl SidebarConfig {
    pub fn is_wide(&self, viewport_width: u32) -> bool {
        viewport_width >= self.breakpoint_px
    }
}

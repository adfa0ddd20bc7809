use std::path::{Path, PathBuf};

use crate::dns::DnsTargets;

pub const DEFAULT_CONFIG_DIR: &str = "/etc/nginx/sites-enabled";
pub const DEFAULT_WEBROOT_BASE: &str = "/var/www";
pub const DEFAULT_SKELETON: &str = "default";
pub const DEFAULT_RELOAD_COMMAND: &str = "nginx -s reload";

/// Process-wide settings, fixed before the first question is
/// asked.
///
/// # Example
///
/// ```
/// use addsite::Settings;
///
/// let settings = Settings::new().config_dir("/tmp/sites");
///
/// assert_eq!(
///     settings.config_path("example.com").to_str(),
///     Some("/tmp/sites/example.com")
/// );
/// assert_eq!(settings.soa_email_for("example.com"), "hostmaster@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub config_dir: PathBuf,
    pub webroot_base: PathBuf,
    pub skeleton: PathBuf,
    pub reload_command: String,
    /// `None` disables the DNS phase.
    pub dns_targets: Option<DnsTargets>,
    pub soa_email: Option<String>,
    pub dry_run: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            webroot_base: PathBuf::from(DEFAULT_WEBROOT_BASE),
            skeleton: PathBuf::from(DEFAULT_SKELETON),
            reload_command: DEFAULT_RELOAD_COMMAND.to_string(),
            dns_targets: None,
            soa_email: None,
            dry_run: false,
        }
    }
}

impl Settings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config_dir = dir.as_ref().to_path_buf();
        self
    }

    #[must_use]
    pub fn webroot_base(mut self, dir: impl AsRef<Path>) -> Self {
        self.webroot_base = dir.as_ref().to_path_buf();
        self
    }

    #[must_use]
    pub fn skeleton(mut self, dir: impl AsRef<Path>) -> Self {
        self.skeleton = dir.as_ref().to_path_buf();
        self
    }

    #[must_use]
    pub fn reload_command(mut self, command: &str) -> Self {
        self.reload_command = command.to_string();
        self
    }

    #[must_use]
    pub const fn dns_targets(mut self, targets: DnsTargets) -> Self {
        self.dns_targets = Some(targets);
        self
    }

    #[must_use]
    pub fn soa_email(mut self, email: &str) -> Self {
        self.soa_email = Some(email.to_string());
        self
    }

    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Where the server block for `domain` is written.
    #[must_use]
    pub fn config_path(&self, domain: &str) -> PathBuf {
        self.config_dir.join(domain)
    }

    /// Where the skeleton for `domain` is copied to.
    #[must_use]
    pub fn webroot(&self, domain: &str) -> PathBuf {
        self.webroot_base.join(domain)
    }

    #[must_use]
    pub fn soa_email_for(&self, domain: &str) -> String {
        self.soa_email
            .clone()
            .unwrap_or_else(|| format!("hostmaster@{domain}"))
    }
}

use crate::domain;
use crate::error::{ProvisionError, ProvisionResult};
use crate::options::{OptionKey, OptionValue};

/// Answers collected so far for a new site.
///
/// Filled in by the wizard (or directly, when used as a
/// library) and turned into a [`SiteConfig`] by
/// [`SiteBuilder::build`].
///
/// # Example
///
/// ```
/// use addsite::SiteBuilder;
///
/// let site = SiteBuilder::new()
///     .domain("example.com")
///     .allow_www(false)
///     .build()
///     .unwrap();
///
/// assert_eq!(site.domain(), "example.com");
/// assert!(!site.allow_www());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteBuilder {
    pub domain: Option<String>,
    pub allow_www: bool,
    pub wordpress: bool,
    pub force_www: bool,
}

impl Default for SiteBuilder {
    fn default() -> Self {
        Self {
            domain: None,
            allow_www: true,
            wordpress: false,
            force_www: false,
        }
    }
}

impl SiteBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn domain(mut self, domain: &str) -> Self {
        self.domain = Some(domain.to_string());
        self
    }

    #[must_use]
    pub const fn allow_www(mut self, allow: bool) -> Self {
        self.allow_www = allow;
        self
    }

    #[must_use]
    pub const fn wordpress(mut self, wordpress: bool) -> Self {
        self.wordpress = wordpress;
        self
    }

    /// Redirect the bare domain to `www.` instead of serving it.
    /// Not asked by the wizard.
    #[must_use]
    pub const fn force_www(mut self, force: bool) -> Self {
        self.force_www = force;
        self
    }

    /// Record one wizard answer.
    ///
    /// A value of the wrong kind for `key` is ignored.
    pub fn set(&mut self, key: OptionKey, value: OptionValue) {
        match (key, value) {
            (OptionKey::Domain, OptionValue::Text(d)) => self.domain = Some(d),
            (OptionKey::AllowWww, OptionValue::Flag(b)) => self.allow_www = b,
            (OptionKey::Wordpress, OptionValue::Flag(b)) => self.wordpress = b,
            (key, value) => {
                tracing::warn!(key = key.name(), ?value, "ignoring answer of the wrong kind");
            }
        }
    }

    /// Validate the answers and freeze them.
    pub fn build(self) -> ProvisionResult<SiteConfig> {
        validate(&self)?;
        let domain = self.domain.ok_or(ProvisionError::BlankDomain)?;
        let subdomain = domain::is_subdomain(&domain);

        Ok(SiteConfig {
            domain,
            allow_www: self.allow_www,
            wordpress: self.wordpress,
            force_www: self.force_www,
            subdomain,
        })
    }
}

/// Check collected answers before anything is rendered.
///
/// Rejects a missing domain, any domain starting with `www`,
/// and anything that is not a single path component (the domain
/// names both the config file and the webroot). Whether
/// `allow_www` makes sense for a subdomain is left to the
/// renderer.
pub fn validate(builder: &SiteBuilder) -> ProvisionResult<()> {
    match builder.domain.as_deref() {
        None | Some("") => Err(ProvisionError::BlankDomain),
        Some(d) if d.starts_with("www") => Err(ProvisionError::WwwPrefix),
        Some(d) if !is_single_component(d) => {
            Err(ProvisionError::DomainNotAName(d.to_string()))
        }
        Some(_) => Ok(()),
    }
}

fn is_single_component(name: &str) -> bool {
    name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

/// A validated site. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    domain: String,
    allow_www: bool,
    wordpress: bool,
    force_www: bool,
    subdomain: bool,
}

impl SiteConfig {
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    #[must_use]
    pub const fn allow_www(&self) -> bool {
        self.allow_www
    }

    #[must_use]
    pub const fn wordpress(&self) -> bool {
        self.wordpress
    }

    #[must_use]
    pub const fn force_www(&self) -> bool {
        self.force_www
    }

    /// Whether the domain was classified as a subdomain at build
    /// time. Subdomains get no www handling and no DNS zone.
    #[must_use]
    pub const fn is_subdomain(&self) -> bool {
        self.subdomain
    }
}

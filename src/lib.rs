//! Interactive nginx virtual host provisioning.
//!
//! `addsite` asks a few questions about a new site, renders an
//! nginx server block for it, and after confirmation writes the
//! block, copies a default site into the new webroot, reloads
//! nginx and creates the DNS zone and records on Linode.
//!
//! # Overview
//!
//! A run is a [`Pipeline`] that wires together:
//!
//! - The [`Wizard`](prompt::Wizard) walking the operator through
//!   the [option schema](options::schema)
//! - A [`SiteBuilder`] that validates the answers into an
//!   immutable [`SiteConfig`]
//! - The [block renderer](nginx::render) producing the server
//!   block text
//! - A [`Provisioner`] that writes, copies, reloads and then
//!   hands over to a [`DnsProvider`](dns::DnsProvider) (e.g.
//!   [`Linode`])
//!
//! # Rendering rules
//!
//! - Bare domains that do not allow `www.` get an extra server
//!   block redirecting `www.<domain>` to `<domain>`.
//! - Subdomains (`blog.example.com`) never get `www.` handling
//!   and never get a DNS zone.
//! - WordPress sites include `snippets/wordpress.conf`; every
//!   site includes the generic and PHP snippets.
//!
//! ```
//! use addsite::{SiteBuilder, nginx};
//!
//! let site = SiteBuilder::new()
//!     .domain("example.com")
//!     .allow_www(false)
//!     .build()
//!     .unwrap();
//!
//! let conf = nginx::render(&site);
//! assert!(conf.starts_with("server {\n  listen 80;"));
//! assert!(conf.contains("return 301 $scheme://example.com$request_uri;"));
//! ```
//!
//! # Library use
//!
//! ```rust,no_run
//! use addsite::{Linode, Provisioner, Settings, SiteBuilder, nginx};
//! use addsite::dns::DnsTargets;
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = Settings::new()
//!         .skeleton("/srv/addsite/default")
//!         .dns_targets(DnsTargets {
//!             ipv4: "203.0.113.10".parse()?,
//!             ipv6: Some("2001:db8::10".parse()?),
//!         });
//!
//!     let site = SiteBuilder::new().domain("example.com").build()?;
//!     let document = nginx::render(&site);
//!
//!     Provisioner::new(settings)
//!         .dns(Linode::from_env()?)
//!         .run(&site, &document)?;
//!     Ok(())
//! }
//! ```

// Allow noisy pedantic lints that don't add value for a
// provisioning tool crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod cmd;
pub mod config;
pub mod dns;
pub mod domain;
pub mod error;
pub mod logging;
pub mod nginx;
pub mod options;
pub mod pipeline;
pub mod prompt;
pub mod provision;
pub mod settings;

pub use config::{SiteBuilder, SiteConfig};
pub use dns::linode::Linode;
pub use dns::linode::conf_value;
pub use pipeline::Pipeline;
pub use provision::Provisioner;
pub use settings::Settings;

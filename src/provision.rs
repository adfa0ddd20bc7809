use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cmd;
use crate::config::SiteConfig;
use crate::dns::{self, DnsProvider, DnsReport};
use crate::error::{ProvisionError, ProvisionResult};
use crate::settings::Settings;

/// What happened in the DNS phase of a run.
#[derive(Debug)]
pub enum DnsPhase {
    /// The phase did not run.
    Skipped(&'static str),
    /// The zone could not be created. Nothing else was tried.
    Failed(ProvisionError),
    Done(DnsReport),
}

/// Summary of a completed provisioning run.
#[derive(Debug)]
pub struct ProvisionReport {
    pub config_path: PathBuf,
    pub webroot: PathBuf,
    pub reload_output: String,
    pub dns: DnsPhase,
}

/// Persists a rendered site: config file, webroot, reload, DNS.
///
/// Steps run strictly in order and nothing is rolled back. A
/// failure to write, copy or reload ends the run; a DNS failure
/// is reported but does not.
pub struct Provisioner {
    settings: Settings,
    dns: Option<Arc<dyn DnsProvider>>,
}

impl Provisioner {
    #[must_use]
    pub const fn new(settings: Settings) -> Self {
        Self {
            settings,
            dns: None,
        }
    }

    #[must_use]
    pub fn dns(mut self, provider: impl DnsProvider + 'static) -> Self {
        self.dns = Some(Arc::new(provider));
        self
    }

    #[must_use]
    pub fn dns_shared(mut self, provider: Arc<dyn DnsProvider>) -> Self {
        self.dns = Some(provider);
        self
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Write the rendered document to `<config_dir>/<domain>`.
    pub fn write_config(&self, site: &SiteConfig, document: &str) -> ProvisionResult<PathBuf> {
        let path = self.settings.config_path(site.domain());
        eprintln!("Writing configuration to: {}", path.display());

        fs::write(&path, document).map_err(|source| ProvisionError::WriteConfig {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Copy the default site skeleton into the site's webroot.
    pub fn create_webroot(&self, site: &SiteConfig) -> ProvisionResult<PathBuf> {
        let dest = self.settings.webroot(site.domain());
        eprintln!("Creating webroot at: {}", dest.display());

        copy_dir_all(&self.settings.skeleton, &dest).map_err(|source| {
            ProvisionError::CopySkeleton {
                skeleton: self.settings.skeleton.clone(),
                source,
            }
        })?;
        Ok(dest)
    }

    /// Run the reload command and return what it printed.
    pub fn reload(&self) -> ProvisionResult<String> {
        eprintln!("Reloading nginx...");
        let out = cmd::run_shell(&self.settings.reload_command)?;
        if !out.is_empty() {
            println!("{out}");
        }
        Ok(out)
    }

    /// Create the zone and records for `site`, unless it is a
    /// subdomain or DNS is not configured.
    #[must_use]
    pub fn register_dns(&self, site: &SiteConfig) -> DnsPhase {
        if site.is_subdomain() {
            eprintln!("Skipping DNS record creation (this is a subdomain)");
            return DnsPhase::Skipped("subdomain");
        }
        let (Some(provider), Some(targets)) = (&self.dns, &self.settings.dns_targets) else {
            eprintln!("Skipping DNS record creation (DNS is not configured)");
            return DnsPhase::Skipped("not configured");
        };

        eprintln!("Creating DNS records...");
        let soa_email = self.settings.soa_email_for(site.domain());
        match dns::register(Arc::clone(provider), site.domain(), &soa_email, targets) {
            Ok(report) => DnsPhase::Done(report),
            Err(e) => {
                tracing::error!(domain = site.domain(), error = %e, "zone creation failed");
                eprintln!("Error creating new domain: {e}");
                DnsPhase::Failed(e)
            }
        }
    }

    /// Run every step for an already confirmed site.
    pub fn run(&self, site: &SiteConfig, document: &str) -> ProvisionResult<ProvisionReport> {
        let config_path = self.write_config(site, document)?;
        let webroot = self.create_webroot(site)?;
        // A failed reload stops here: no records for a site the
        // server is not serving.
        let reload_output = self.reload()?;
        let dns = self.register_dns(site);

        Ok(ProvisionReport {
            config_path,
            webroot,
            reload_output,
            dns,
        })
    }

    /// The steps [`Provisioner::run`] would take, one line each.
    #[must_use]
    pub fn describe(&self, site: &SiteConfig) -> Vec<String> {
        let domain = site.domain();
        let mut steps = vec![
            format!(
                "Write configuration to {}",
                self.settings.config_path(domain).display()
            ),
            format!(
                "Copy {} to {}",
                self.settings.skeleton.display(),
                self.settings.webroot(domain).display()
            ),
            format!("Run `{}`", self.settings.reload_command),
        ];

        if site.is_subdomain() {
            steps.push("Skip DNS (subdomain)".to_string());
        } else if let Some(targets) = &self.settings.dns_targets {
            steps.push(format!("Create DNS zone {domain}"));
            for record in dns::plan_records(0, targets) {
                steps.push(format!(
                    "Create {} record {} -> {}",
                    record.record_type,
                    dns::display_name(&record.name),
                    record.target
                ));
            }
        } else {
            steps.push("Skip DNS (not configured)".to_string());
        }

        steps
    }
}

/// Recursively copy `src` into `dst`, creating directories as
/// needed and overwriting existing files.
pub fn copy_dir_all(src: &Path, dst: &Path) -> io::Result<()> {
    let entries = fs::read_dir(src)?;
    fs::create_dir_all(dst)?;

    for entry in entries {
        let entry = entry?;
        let target = dst.join(entry.file_name());

        if entry.file_type()?.is_dir() {
            copy_dir_all(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

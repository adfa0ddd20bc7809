use std::io::{BufRead, Write};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::path::PathBuf;

use clap::Parser;

use crate::dns::DnsTargets;
use crate::dns::linode::Linode;
use crate::error::{ProvisionError, ProvisionResult};
use crate::nginx;
use crate::prompt;
use crate::provision::{ProvisionReport, Provisioner};
use crate::settings::{
    DEFAULT_CONFIG_DIR, DEFAULT_RELOAD_COMMAND, DEFAULT_SKELETON, DEFAULT_WEBROOT_BASE, Settings,
};

/// Interview, render, confirm, provision.
pub struct Pipeline {
    provisioner: Provisioner,
}

impl Pipeline {
    #[must_use]
    pub const fn new(provisioner: Provisioner) -> Self {
        Self { provisioner }
    }

    /// Build the pipeline described by the command line,
    /// including the Linode client when DNS is enabled.
    pub fn from_cli(cli: &Cli) -> ProvisionResult<Self> {
        let settings = cli.settings()?;
        let mut provisioner = Provisioner::new(settings);

        if !cli.skip_dns && !cli.dry_run {
            provisioner = provisioner.dns(Linode::from_env()?);
        }

        Ok(Self::new(provisioner))
    }

    /// Run against the terminal.
    pub fn run(&self) -> ProvisionResult<Option<ProvisionReport>> {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut output = std::io::stdout();
        self.run_with(&mut input, &mut output)
    }

    /// Run the whole interview against `input`/`output`.
    ///
    /// Returns `None` for a dry run. Declining the final
    /// confirmation is an error, so nothing is written unless
    /// the operator answered `y`.
    pub fn run_with<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> ProvisionResult<Option<ProvisionReport>> {
        let site = prompt::run_wizard(input, output)?;
        let document = nginx::render(&site);

        writeln!(output, "\n\n{document}")?;

        if self.provisioner.settings().dry_run {
            writeln!(output, "=== Dry run: no changes will be made ===")?;
            for (i, step) in self.provisioner.describe(&site).iter().enumerate() {
                writeln!(output, "{}. {step}", i + 1)?;
            }
            return Ok(None);
        }

        if !prompt::confirm(input, output, "Does this configuration look correct? [Y/N]")? {
            return Err(ProvisionError::Discarded);
        }

        self.provisioner.run(&site, &document).map(Some)
    }
}

#[derive(Debug, Parser)]
#[command(name = "addsite")]
#[command(about = "Add an nginx virtual host, its webroot and DNS records")]
pub struct Cli {
    /// Directory the server block is written to
    #[arg(long, env = "ADDSITE_CONFIG_DIR", default_value = DEFAULT_CONFIG_DIR)]
    pub config_dir: PathBuf,

    /// Directory the webroot is created in
    #[arg(long, env = "ADDSITE_WEBROOT", default_value = DEFAULT_WEBROOT_BASE)]
    pub webroot_base: PathBuf,

    /// Default site copied into every new webroot
    #[arg(long, env = "ADDSITE_SKELETON", default_value = DEFAULT_SKELETON)]
    pub skeleton: PathBuf,

    /// Shell command that reloads the web server
    #[arg(long, env = "ADDSITE_RELOAD", default_value = DEFAULT_RELOAD_COMMAND)]
    pub reload_command: String,

    /// IPv4 address the A records point at
    #[arg(long, env = "ADDSITE_IPV4")]
    pub ipv4: Option<Ipv4Addr>,

    /// IPv6 address the AAAA records point at
    #[arg(long, env = "ADDSITE_IPV6")]
    pub ipv6: Option<Ipv6Addr>,

    /// SOA contact for new zones (default: hostmaster@<domain>)
    #[arg(long, env = "ADDSITE_SOA_EMAIL")]
    pub soa_email: Option<String>,

    /// Do not create DNS records
    #[arg(long)]
    pub skip_dns: bool,

    /// Print the configuration and planned actions only
    #[arg(long)]
    pub dry_run: bool,

    /// Log debug details
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the settings for this run.
    pub fn settings(&self) -> ProvisionResult<Settings> {
        let mut settings = Settings::new()
            .config_dir(&self.config_dir)
            .webroot_base(&self.webroot_base)
            .skeleton(&self.skeleton)
            .reload_command(&self.reload_command)
            .dry_run(self.dry_run);

        if let Some(email) = &self.soa_email {
            settings = settings.soa_email(email);
        }

        if !self.skip_dns {
            let ipv4 = self.ipv4.ok_or_else(|| {
                ProvisionError::EnvMissing(
                    "ADDSITE_IPV4 not set. Pass --ipv4 or --skip-dns".into(),
                )
            })?;
            settings = settings.dns_targets(DnsTargets {
                ipv4,
                ipv6: self.ipv6,
            });
        }

        Ok(settings)
    }
}

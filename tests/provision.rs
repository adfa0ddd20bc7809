mod common;

use std::fs;
use std::sync::Arc;

use addsite::dns::DnsTargets;
use addsite::error::ProvisionError;
use addsite::provision::{DnsPhase, copy_dir_all};
use addsite::{Provisioner, Settings, SiteBuilder, SiteConfig, nginx};
use common::FakeDns;
use tempfile::TempDir;

struct Sandbox {
    _dir: TempDir,
    settings: Settings,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        let config_dir = root.join("sites-enabled");
        let webroot = root.join("www");
        let skeleton = root.join("default");
        fs::create_dir_all(&config_dir).unwrap();
        fs::create_dir_all(skeleton.join("dist/css")).unwrap();
        fs::write(skeleton.join("dist/index.html"), "<h1>hello</h1>").unwrap();
        fs::write(skeleton.join("dist/css/site.css"), "body{}").unwrap();

        let settings = Settings::new()
            .config_dir(&config_dir)
            .webroot_base(&webroot)
            .skeleton(&skeleton)
            .reload_command("echo reloaded")
            .dns_targets(DnsTargets {
                ipv4: "203.0.113.10".parse().unwrap(),
                ipv6: None,
            });

        Self {
            _dir: dir,
            settings,
        }
    }
}

fn site(domain: &str) -> SiteConfig {
    SiteBuilder::new().domain(domain).build().unwrap()
}

#[test]
fn full_run() {
    let sandbox = Sandbox::new();
    let fake = Arc::new(FakeDns::default());
    let provisioner = Provisioner::new(sandbox.settings.clone()).dns_shared(fake.clone());

    let site = site("example.com");
    let document = nginx::render(&site);
    let report = provisioner.run(&site, &document).unwrap();

    assert_eq!(fs::read_to_string(&report.config_path).unwrap(), document);
    assert_eq!(report.config_path, sandbox.settings.config_dir.join("example.com"));
    assert_eq!(
        fs::read_to_string(report.webroot.join("dist/index.html")).unwrap(),
        "<h1>hello</h1>"
    );
    assert!(report.webroot.join("dist/css/site.css").exists());
    assert_eq!(report.reload_output, "reloaded");

    match report.dns {
        DnsPhase::Done(dns) => assert_eq!(dns.records.len(), 2),
        other => panic!("unexpected DNS phase: {other:?}"),
    }
    assert_eq!(
        fake.zone_calls(),
        vec![("example.com".to_string(), "hostmaster@example.com".to_string())]
    );
}

#[test]
fn subdomain_skips_dns() {
    let sandbox = Sandbox::new();
    let fake = Arc::new(FakeDns::default());
    let provisioner = Provisioner::new(sandbox.settings.clone()).dns_shared(fake.clone());

    let site = site("blog.example.com");
    let report = provisioner.run(&site, &nginx::render(&site)).unwrap();

    assert!(matches!(report.dns, DnsPhase::Skipped("subdomain")));
    assert!(fake.zone_calls().is_empty());
    assert!(fake.record_calls().is_empty());
}

#[test]
fn missing_provider_skips_dns() {
    let sandbox = Sandbox::new();
    let provisioner = Provisioner::new(sandbox.settings.clone());

    let site = site("example.com");
    let report = provisioner.run(&site, &nginx::render(&site)).unwrap();

    assert!(matches!(report.dns, DnsPhase::Skipped("not configured")));
}

#[test]
fn zone_failure_is_not_fatal() {
    let sandbox = Sandbox::new();
    let fake = Arc::new(FakeDns::failing_zone());
    let provisioner = Provisioner::new(sandbox.settings.clone()).dns_shared(fake.clone());

    let site = site("example.com");
    let report = provisioner.run(&site, &nginx::render(&site)).unwrap();

    assert!(matches!(report.dns, DnsPhase::Failed(ProvisionError::DnsError(_))));
    assert!(fake.record_calls().is_empty());
}

#[test]
fn write_failure_stops_everything() {
    let sandbox = Sandbox::new();
    let settings = sandbox
        .settings
        .clone()
        .config_dir(sandbox.settings.config_dir.join("missing"));
    let fake = Arc::new(FakeDns::default());
    let provisioner = Provisioner::new(settings.clone()).dns_shared(fake.clone());

    let site = site("example.com");
    let err = provisioner.run(&site, &nginx::render(&site)).unwrap_err();

    assert!(matches!(err, ProvisionError::WriteConfig { .. }));
    assert!(!settings.webroot("example.com").exists());
    assert!(fake.zone_calls().is_empty());
}

#[test]
fn missing_skeleton_stops_before_reload() {
    let sandbox = Sandbox::new();
    let marker = sandbox.settings.config_dir.join("reloaded");
    let settings = sandbox
        .settings
        .clone()
        .skeleton(sandbox.settings.config_dir.join("no-skeleton"))
        .reload_command(&format!("touch {}", marker.display()));
    let fake = Arc::new(FakeDns::default());
    let provisioner = Provisioner::new(settings.clone()).dns_shared(fake.clone());

    let site = site("example.com");
    let err = provisioner.run(&site, &nginx::render(&site)).unwrap_err();

    assert!(matches!(err, ProvisionError::CopySkeleton { .. }));
    assert!(err.to_string().contains("no-skeleton"));
    assert!(!marker.exists());
    assert!(!settings.webroot("example.com").exists());
    assert!(fake.zone_calls().is_empty());
}

#[test]
fn reload_failure_blocks_dns() {
    let sandbox = Sandbox::new();
    let settings = sandbox.settings.clone().reload_command("exit 1");
    let fake = Arc::new(FakeDns::default());
    let provisioner = Provisioner::new(settings.clone()).dns_shared(fake.clone());

    let site = site("example.com");
    let err = provisioner.run(&site, &nginx::render(&site)).unwrap_err();

    assert!(matches!(err, ProvisionError::CommandFailed { .. }));
    // Earlier steps are not rolled back.
    assert!(settings.config_path("example.com").exists());
    assert!(settings.webroot("example.com").join("dist/index.html").exists());
    assert!(fake.zone_calls().is_empty());
}

#[test]
fn copy_overwrites_existing_files() {
    let sandbox = Sandbox::new();
    let dest = sandbox.settings.webroot("example.com");
    fs::create_dir_all(dest.join("dist")).unwrap();
    fs::write(dest.join("dist/index.html"), "old").unwrap();
    fs::write(dest.join("keep.txt"), "mine").unwrap();

    copy_dir_all(&sandbox.settings.skeleton, &dest).unwrap();

    assert_eq!(
        fs::read_to_string(dest.join("dist/index.html")).unwrap(),
        "<h1>hello</h1>"
    );
    assert_eq!(fs::read_to_string(dest.join("keep.txt")).unwrap(), "mine");
}

#[test]
fn describe_lists_steps() {
    let sandbox = Sandbox::new();
    let provisioner = Provisioner::new(
        sandbox.settings.clone().dns_targets(DnsTargets {
            ipv4: "203.0.113.10".parse().unwrap(),
            ipv6: Some("2001:db8::10".parse().unwrap()),
        }),
    )
    .dns(FakeDns::default());

    let steps = provisioner.describe(&site("example.com"));
    assert_eq!(steps.len(), 8);
    assert!(steps[0].starts_with("Write configuration to "));
    assert_eq!(steps[2], "Run `echo reloaded`");
    assert_eq!(steps[3], "Create DNS zone example.com");
    assert!(steps.contains(&"Create AAAA record * -> 2001:db8::10".to_string()));

    let steps = provisioner.describe(&site("blog.example.com"));
    assert_eq!(steps.last().map(String::as_str), Some("Skip DNS (subdomain)"));
}

#[test]
fn path_domain_is_rejected_before_any_write() {
    let sandbox = Sandbox::new();
    let victim = sandbox.settings.config_dir.parent().unwrap().join("victim.conf");
    fs::write(&victim, "untouched").unwrap();

    let result = SiteBuilder::new().domain(victim.to_str().unwrap()).build();

    assert!(matches!(result, Err(ProvisionError::DomainNotAName(_))));
    assert_eq!(fs::read_to_string(&victim).unwrap(), "untouched");
}

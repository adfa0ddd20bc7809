//! nginx server block rendering.
//!
//! Include paths and directive text are consumed verbatim by
//! the server's `snippets/` layout and must not drift.

use std::fmt::Write;

use crate::config::SiteConfig;

const GENERIC_SNIPPET: &str = "snippets/generic_server_block.conf";
const WORDPRESS_SNIPPET: &str = "snippets/wordpress.conf";
const PHP_SNIPPET: &str = "snippets/php-block.conf";

/// Plain HTTP listen directives for IPv4 and IPv6. The second
/// line is indented to sit inside a server block.
#[must_use]
pub const fn listen() -> &'static str {
    "listen 80;\n  listen [::]:80;"
}

/// Server block that redirects `www.<domain>` to the bare
/// domain.
#[must_use]
pub fn strip_www_block(domain: &str) -> String {
    redirect_block(&format!("www.{domain}"), domain)
}

/// Server block that redirects the bare domain to
/// `www.<domain>`.
#[must_use]
pub fn force_www_block(domain: &str) -> String {
    redirect_block(domain, &format!("www.{domain}"))
}

fn redirect_block(from: &str, to: &str) -> String {
    format!(
        "server {{\n  {}\n  server_name {from};\n  return 301 $scheme://{to}$request_uri;\n}}\n",
        listen()
    )
}

/// Document root directive. Always under `/var/www`, whatever
/// base the webroot was copied to.
#[must_use]
pub fn root(domain: &str) -> String {
    format!("root /var/www/{domain}/dist;")
}

/// `server_name` directive for the primary block.
///
/// The bare domain is left out when `force_www` is set; the
/// `www.` alias is only added for non-subdomains that allow it.
#[must_use]
pub fn server_name(site: &SiteConfig) -> String {
    let mut directive = String::from("server_name");
    if !site.force_www() {
        directive.push(' ');
        directive.push_str(site.domain());
    }
    if site.allow_www() && !site.is_subdomain() {
        directive.push_str(" www.");
        directive.push_str(site.domain());
    }
    directive.push(';');
    directive
}

/// Render the complete configuration document for `site`.
#[must_use]
pub fn render(site: &SiteConfig) -> String {
    let domain = site.domain();
    let mut out = String::new();

    if !site.allow_www() && !site.is_subdomain() {
        out.push_str(&strip_www_block(domain));
    }
    if site.force_www() && !site.is_subdomain() {
        out.push_str(&force_www_block(domain));
    }

    out.push_str("server {\n");
    let _ = writeln!(out, "  {}\n", listen());
    let _ = writeln!(out, "  {}\n", server_name(site));
    let _ = writeln!(out, "  {}\n", root(domain));

    let _ = writeln!(out, "  include {GENERIC_SNIPPET};");
    if site.wordpress() {
        let _ = writeln!(out, "  include {WORDPRESS_SNIPPET};");
    }
    let _ = writeln!(out, "  include {PHP_SNIPPET};");

    out.push_str("}\n");
    out
}

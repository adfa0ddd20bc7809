use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cmd;
use crate::dns::{DnsProvider, RecordRequest};
use crate::error::{ProvisionError, ProvisionResult};

const LINODE_API: &str = "https://api.linode.com/v4";

/// Linode DNS manager using the v4 REST API via curl.
///
/// The token is read from `LINODE_API_TOKEN`, or from the
/// `token` key of the `[default]` section of `~/.linode.conf`.
/// It needs the `domains:read_write` scope.
pub struct Linode {
    token: String,
    api_base: String,
}

#[derive(Debug, Serialize)]
pub struct ZoneBody<'a> {
    pub domain: &'a str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub soa_email: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RecordBody<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: &'a str,
    pub target: &'a str,
}

#[derive(Debug, Deserialize)]
struct Created {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct ApiErrors {
    errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    field: Option<String>,
    reason: String,
}

impl Linode {
    #[must_use]
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
            api_base: LINODE_API.to_string(),
        }
    }

    /// Build a client from the environment or `~/.linode.conf`.
    pub fn from_env() -> ProvisionResult<Self> {
        Ok(Self::new(&Self::read_token()?))
    }

    /// Point the client at a different API root.
    #[must_use]
    pub fn api_base(mut self, base: &str) -> Self {
        self.api_base = base.trim_end_matches('/').to_string();
        self
    }

    fn read_token() -> ProvisionResult<String> {
        if let Ok(token) = std::env::var("LINODE_API_TOKEN") {
            if !token.trim().is_empty() {
                return Ok(token.trim().to_string());
            }
        }

        let home = std::env::var("HOME").map_err(|_| {
            ProvisionError::EnvMissing(
                "LINODE_API_TOKEN not set. Create a token at: \
                 https://cloud.linode.com/profile/tokens"
                    .into(),
            )
        })?;
        let conf_path = PathBuf::from(home).join(".linode.conf");

        if !conf_path.exists() {
            return Err(ProvisionError::EnvMissing(
                "LINODE_API_TOKEN not set and ~/.linode.conf not found".into(),
            ));
        }

        let content = fs::read_to_string(&conf_path)?;
        conf_value(&content, "default", "token")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ProvisionError::Other("missing token in ~/.linode.conf".into()))
    }

    fn post(&self, path: &str, body: &str) -> ProvisionResult<u64> {
        let url = format!("{}{path}", self.api_base);
        tracing::debug!(%url, body, "linode request");

        let auth = format!("Authorization: Bearer {}", self.token);
        let response = cmd::run_with_stdin(
            "curl",
            &[
                "-s",
                "-X",
                "POST",
                "-H",
                &auth,
                "-H",
                "Content-Type: application/json",
                "--data-binary",
                "@-",
                &url,
            ],
            body.as_bytes(),
        )?;
        tracing::debug!(%url, response, "linode response");

        parse_created(&response)
    }
}

impl DnsProvider for Linode {
    fn create_zone(&self, domain: &str, soa_email: &str) -> ProvisionResult<u64> {
        eprintln!("Linode DNS: creating master zone {domain}");
        let body = serde_json::to_string(&ZoneBody {
            domain,
            kind: "master",
            soa_email,
        })?;
        self.post("/domains", &body)
    }

    fn create_record(&self, record: &RecordRequest) -> ProvisionResult<u64> {
        let body = serde_json::to_string(&RecordBody {
            kind: record.record_type.as_str(),
            name: &record.name,
            target: &record.target,
        })?;
        self.post(&format!("/domains/{}/records", record.domain_id), &body)
    }
}

/// Extract the created object's id from an API response, or
/// turn the API's error list into a [`ProvisionError::DnsError`].
pub fn parse_created(response: &str) -> ProvisionResult<u64> {
    if let Ok(failed) = serde_json::from_str::<ApiErrors>(response) {
        let reasons: Vec<String> = failed
            .errors
            .into_iter()
            .map(|e| match e.field {
                Some(field) => format!("{field}: {}", e.reason),
                None => e.reason,
            })
            .collect();
        return Err(ProvisionError::DnsError(reasons.join("; ")));
    }

    let created: Created = serde_json::from_str(response)?;
    Ok(created.id)
}

/// Look up `key` in `[section]` of a linode-cli style config.
///
/// Blank lines and `#` or `;` comments are skipped, and one pair
/// of matching quotes around the value is removed.
#[must_use]
pub fn conf_value(content: &str, section: &str, key: &str) -> Option<String> {
    let mut current = None;

    for line in content.lines().map(str::trim) {
        if line.is_empty() || line.starts_with(['#', ';']) {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            current = Some(name.trim());
            continue;
        }
        if current != Some(section) {
            continue;
        }
        if let Some((k, v)) = line.split_once('=')
            && k.trim() == key
        {
            return Some(unquote(v.trim()).to_string());
        }
    }
    None
}

fn unquote(value: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|q| value.strip_prefix(q)?.strip_suffix(q))
        .unwrap_or(value)
}

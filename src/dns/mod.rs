pub mod linode;

use std::collections::HashMap;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::error::{ProvisionError, ProvisionResult};

/// A registrar that can create a zone and records inside it.
///
/// Calls block; [`register`] runs record creation for one
/// zone on the blocking pool.
pub trait DnsProvider: Send + Sync {
    /// Create a master zone for `domain` and return its id.
    fn create_zone(&self, domain: &str, soa_email: &str) -> ProvisionResult<u64>;

    /// Create one resource record and return its id.
    fn create_record(&self, record: &RecordRequest) -> ProvisionResult<u64>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    A,
    Aaaa,
}

impl RecordType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single record to create. `name` is empty for the apex and
/// `*` for the wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRequest {
    pub domain_id: u64,
    pub record_type: RecordType,
    pub name: String,
    pub target: String,
}

/// Addresses every new zone points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DnsTargets {
    pub ipv4: Ipv4Addr,
    pub ipv6: Option<Ipv6Addr>,
}

/// Records for a fresh zone: apex and wildcard `A`, plus apex
/// and wildcard `AAAA` when an IPv6 target is set.
#[must_use]
pub fn plan_records(domain_id: u64, targets: &DnsTargets) -> Vec<RecordRequest> {
    let mut addrs = vec![(RecordType::A, targets.ipv4.to_string())];
    if let Some(v6) = targets.ipv6 {
        addrs.push((RecordType::Aaaa, v6.to_string()));
    }

    addrs
        .into_iter()
        .flat_map(|(record_type, target)| {
            ["", "*"].map(|name| RecordRequest {
                domain_id,
                record_type,
                name: name.to_string(),
                target: target.clone(),
            })
        })
        .collect()
}

/// Outcome of one record creation.
#[derive(Debug)]
pub struct RecordOutcome {
    pub request: RecordRequest,
    pub result: ProvisionResult<u64>,
}

/// Everything the DNS phase did.
#[derive(Debug)]
pub struct DnsReport {
    pub domain_id: u64,
    pub records: Vec<RecordOutcome>,
}

impl DnsReport {
    #[must_use]
    pub fn failures(&self) -> usize {
        self.records.iter().filter(|r| r.result.is_err()).count()
    }
}

/// Create the zone for `domain`, then every planned record.
///
/// Fails only when the zone cannot be created. Records are
/// created concurrently and independently: each outcome is
/// captured in the report and logged, and a failed record does
/// not stop its siblings. A task that panics is reported as a
/// failed record.
pub fn register(
    provider: Arc<dyn DnsProvider>,
    domain: &str,
    soa_email: &str,
    targets: &DnsTargets,
) -> ProvisionResult<DnsReport> {
    let domain_id = provider.create_zone(domain, soa_email)?;
    tracing::info!(domain, domain_id, "zone created");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .map_err(|e| ProvisionError::Other(format!("failed to start DNS runtime: {e}")))?;

    let requests = plan_records(domain_id, targets);
    let records = runtime.block_on(async move {
        let mut set = JoinSet::new();
        let mut in_flight = HashMap::new();
        for request in requests {
            let provider = Arc::clone(&provider);
            let task_request = request.clone();
            let handle = set.spawn_blocking(move || {
                let result = provider.create_record(&task_request);
                RecordOutcome {
                    request: task_request,
                    result,
                }
            });
            in_flight.insert(handle.id(), request);
        }

        let mut outcomes = Vec::new();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    let Some(request) = in_flight.remove(&e.id()) else {
                        tracing::error!(error = %e, "unknown record task did not complete");
                        continue;
                    };
                    outcomes.push(RecordOutcome {
                        request,
                        result: Err(ProvisionError::DnsError(format!(
                            "record task did not complete: {e}"
                        ))),
                    });
                }
            }
        }
        outcomes
    });

    for outcome in &records {
        let name = display_name(&outcome.request.name);
        match &outcome.result {
            Ok(id) => tracing::info!(
                record_type = %outcome.request.record_type,
                record = name,
                id,
                "record created"
            ),
            Err(e) => {
                tracing::error!(
                    record_type = %outcome.request.record_type,
                    record = name,
                    error = %e,
                    "record creation failed"
                );
                eprintln!("Error creating new record: {e}");
            }
        }
    }

    Ok(DnsReport { domain_id, records })
}

/// Record name as shown to the operator, `@` for the apex.
pub(crate) fn display_name(name: &str) -> &str {
    if name.is_empty() { "@" } else { name }
}

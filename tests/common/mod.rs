#![allow(dead_code)]

use std::sync::Mutex;

use addsite::dns::{DnsProvider, RecordRequest, RecordType};
use addsite::error::{ProvisionError, ProvisionResult};

/// In-memory registrar that records every call.
#[derive(Default)]
pub struct FakeDns {
    pub fail_zone: bool,
    pub fail_type: Option<RecordType>,
    pub panic_type: Option<RecordType>,
    pub zones: Mutex<Vec<(String, String)>>,
    pub records: Mutex<Vec<RecordRequest>>,
}

impl FakeDns {
    pub fn failing_zone() -> Self {
        Self {
            fail_zone: true,
            ..Self::default()
        }
    }

    pub fn failing_records(record_type: RecordType) -> Self {
        Self {
            fail_type: Some(record_type),
            ..Self::default()
        }
    }

    pub fn panicking_records(record_type: RecordType) -> Self {
        Self {
            panic_type: Some(record_type),
            ..Self::default()
        }
    }

    pub fn zone_calls(&self) -> Vec<(String, String)> {
        self.zones.lock().unwrap().clone()
    }

    pub fn record_calls(&self) -> Vec<RecordRequest> {
        let mut calls = self.records.lock().unwrap().clone();
        calls.sort_by(|a, b| {
            (a.record_type.as_str(), &a.name).cmp(&(b.record_type.as_str(), &b.name))
        });
        calls
    }
}

impl DnsProvider for FakeDns {
    fn create_zone(&self, domain: &str, soa_email: &str) -> ProvisionResult<u64> {
        self.zones
            .lock()
            .unwrap()
            .push((domain.to_string(), soa_email.to_string()));
        if self.fail_zone {
            return Err(ProvisionError::DnsError("zone refused".into()));
        }
        Ok(42)
    }

    fn create_record(&self, record: &RecordRequest) -> ProvisionResult<u64> {
        self.records.lock().unwrap().push(record.clone());
        if self.panic_type == Some(record.record_type) {
            panic!("registrar client crashed");
        }
        if self.fail_type == Some(record.record_type) {
            return Err(ProvisionError::DnsError("record refused".into()));
        }
        Ok(100)
    }
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod samples;

use anyhow::{Context, Result, bail};
use autoshop_app::{
    DashboardCounts, DashboardTab, IntakeSubmission, ServiceRecord, ServiceStatus, SubmissionId,
};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const APP_NAME: &str = "autoshop";

/// Where the loaded records came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOrigin {
    Samples,
    File(PathBuf),
    Demo,
}

impl fmt::Display for RecordOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Samples => f.write_str("bundled samples"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Demo => f.write_str("demo data"),
        }
    }
}

/// Read-only supply of service records, split the way the dashboard tabs
/// show them. Loaded once; never written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSource {
    origin: RecordOrigin,
    all: Vec<ServiceRecord>,
    upcoming: Vec<ServiceRecord>,
    recent: Vec<ServiceRecord>,
}

impl RecordSource {
    pub fn samples() -> Self {
        Self {
            origin: RecordOrigin::Samples,
            all: samples::service_records(),
            upcoming: samples::upcoming_records(),
            recent: samples::recent_records(),
        }
    }

    /// Upcoming gets scheduled and in-progress work. Everything else lands
    /// in recent, including statuses we do not recognize.
    pub fn from_records(origin: RecordOrigin, records: Vec<ServiceRecord>) -> Self {
        let (upcoming, recent): (Vec<_>, Vec<_>) = records
            .iter()
            .cloned()
            .partition(|record| is_upcoming(&record.status));
        Self {
            origin,
            all: records,
            upcoming,
            recent,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let records = load_records_file(path)?;
        Ok(Self::from_records(
            RecordOrigin::File(path.to_path_buf()),
            records,
        ))
    }

    pub fn origin(&self) -> &RecordOrigin {
        &self.origin
    }

    pub fn all_records(&self) -> &[ServiceRecord] {
        &self.all
    }

    pub fn records_for(&self, tab: DashboardTab) -> Vec<ServiceRecord> {
        match tab {
            DashboardTab::Upcoming => self.upcoming.clone(),
            DashboardTab::Recent => self.recent.clone(),
            DashboardTab::Analytics => self.all.clone(),
        }
    }

    pub fn counts(&self) -> DashboardCounts {
        dashboard_counts(&self.all)
    }
}

fn is_upcoming(status: &ServiceStatus) -> bool {
    matches!(status, ServiceStatus::Scheduled | ServiceStatus::InProgress)
}

/// Plain tallies for the summary cards. Blank names and plates are not
/// counted as customers or vehicles.
pub fn dashboard_counts(records: &[ServiceRecord]) -> DashboardCounts {
    let customers = records
        .iter()
        .map(|record| record.customer_name.trim())
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>();
    let vehicles = records
        .iter()
        .map(|record| record.vehicle_info.license_plate.trim())
        .filter(|plate| !plate.is_empty())
        .collect::<BTreeSet<_>>();

    DashboardCounts {
        customers: customers.len(),
        vehicles: vehicles.len(),
        upcoming: records
            .iter()
            .filter(|record| is_upcoming(&record.status))
            .count(),
        completed: records
            .iter()
            .filter(|record| record.status == ServiceStatus::Completed)
            .count(),
        reminders: records
            .iter()
            .filter(|record| {
                record
                    .next_service_date
                    .as_deref()
                    .is_some_and(|date| !date.trim().is_empty())
            })
            .count(),
    }
}

/// Parses a JSON array of service records. Fields that are missing, null or
/// of the wrong type fall back to empty values. Only malformed JSON or a
/// missing or invalid `id` is an error.
pub fn parse_records(json: &str) -> Result<Vec<ServiceRecord>> {
    serde_json::from_str(json)
        .context("parse service records -- expected a JSON array of record objects")
}

pub fn load_records_file(path: &Path) -> Result<Vec<ServiceRecord>> {
    let printable = path.to_string_lossy();
    validate_records_path(&printable)?;
    let body = fs::read_to_string(path).with_context(|| {
        format!(
            "read records file {} -- check [data].records_path in your config",
            path.display()
        )
    })?;
    let records = parse_records(&body)
        .with_context(|| format!("load records from {}", path.display()))?;
    info!(path = %path.display(), count = records.len(), "service records loaded");
    Ok(records)
}

pub fn validate_records_path(path: &str) -> Result<()> {
    if path.is_empty() {
        bail!("records path must not be empty");
    }

    if let Some(index) = path.find("://")
        && index > 0
    {
        let scheme = &path[..index];
        if scheme.chars().all(char::is_alphabetic) {
            bail!(
                "records path {path:?} looks like a URI ({scheme}://); pass a filesystem path instead"
            );
        }
    }

    if path.starts_with("file:") {
        bail!("records path {path:?} uses file: URI syntax; pass a plain filesystem path");
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedSubmission {
    pub id: SubmissionId,
    pub submission: IntakeSubmission,
}

/// Accepted intake submissions for the lifetime of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionLog {
    entries: Vec<LoggedSubmission>,
}

impl SubmissionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, submission: IntakeSubmission) -> SubmissionId {
        let id = SubmissionId::new(self.entries.len() as i64 + 1);
        debug!(id = id.get(), "submission recorded");
        self.entries.push(LoggedSubmission { id, submission });
        id
    }

    pub fn entries(&self) -> &[LoggedSubmission] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pretty JSON array of `{id, customer, vehicle}` objects.
    pub fn to_json(&self) -> Result<String> {
        let values = self
            .entries
            .iter()
            .map(|entry| {
                serde_json::json!({
                    "id": entry.id.get(),
                    "customer": entry.submission.customer,
                    "vehicle": entry.submission.vehicle,
                })
            })
            .collect::<Vec<_>>();
        serde_json::to_string_pretty(&values).context("encode submissions")
    }
}

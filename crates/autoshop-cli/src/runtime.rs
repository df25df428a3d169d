// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use autoshop_app::{DashboardCounts, DashboardTab, IntakeSubmission, ServiceRecord};
use autoshop_data::{RecordSource, SubmissionLog};
use tracing::{debug, info};

/// Serves records from a loaded source and keeps accepted submissions in
/// memory. Nothing is written back to the records file.
pub struct ShopRuntime {
    source: RecordSource,
    submissions: SubmissionLog,
}

impl ShopRuntime {
    pub fn new(source: RecordSource) -> Self {
        Self {
            source,
            submissions: SubmissionLog::new(),
        }
    }

    pub fn submissions(&self) -> &SubmissionLog {
        &self.submissions
    }
}

impl autoshop_tui::AppRuntime for ShopRuntime {
    fn load_dashboard_counts(&mut self) -> Result<DashboardCounts> {
        Ok(self.source.counts())
    }

    fn load_service_records(&mut self, tab: DashboardTab) -> Result<Vec<ServiceRecord>> {
        let records = self.source.records_for(tab);
        debug!(tab = tab.label(), count = records.len(), "records served");
        Ok(records)
    }

    fn submit_intake(&mut self, submission: &IntakeSubmission) -> Result<()> {
        let id = self.submissions.record(submission.clone());
        info!(
            id = id.get(),
            customer = %submission.customer.name,
            plate = %submission.vehicle.license_plate,
            "intake accepted"
        );
        Ok(())
    }
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::debug;

use crate::{PartUsed, ServiceRecord, ServiceRecordId, StatusFilter, StatusTone};

pub const EMPTY_MESSAGE: &str = "No services found.";
pub const SEARCH_PLACEHOLDER: &str = "Search customer, plate, service...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    pub title: String,
    pub show_filters: bool,
    /// Adds the "Due Date" column (next service date).
    pub show_due_date: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            title: "Service Records".to_owned(),
            show_filters: true,
            show_due_date: false,
        }
    }
}

/// Read-only detail panel contents for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDetail {
    pub customer: String,
    pub service_date: String,
    /// "Toyota Camry (2020)"
    pub vehicle: String,
    /// "License: ABC123"
    pub license: String,
    pub service_type: String,
    pub status_label: String,
    pub status_tone: StatusTone,
    pub next_service_date: Option<String>,
    pub notes: String,
    pub parts: Vec<PartUsed>,
    /// "$48.94"; `None` when there are no parts or a price does not parse.
    pub parts_total: Option<String>,
}

impl ServiceDetail {
    pub fn from_record(record: &ServiceRecord) -> Self {
        let title = record.vehicle_title();
        let vehicle = match record.vehicle_info.year {
            Some(year) if title.is_empty() => format!("({year})"),
            Some(year) => format!("{title} ({year})"),
            None => title,
        };
        Self {
            customer: record.customer_name.clone(),
            service_date: record.date.clone(),
            vehicle,
            license: format!("License: {}", record.vehicle_info.license_plate),
            service_type: record.service_type.clone(),
            status_label: record.status.label().to_owned(),
            status_tone: record.status.tone(),
            next_service_date: record
                .next_service_date
                .clone()
                .filter(|date| !date.is_empty()),
            notes: record.notes.trim().to_owned(),
            parts: record.parts.clone(),
            parts_total: parts_total(&record.parts),
        }
    }
}

fn parts_total(parts: &[PartUsed]) -> Option<String> {
    if parts.is_empty() {
        return None;
    }
    let cents = parts
        .iter()
        .map(|part| price_cents(&part.price))
        .sum::<Option<u64>>()?;
    Some(format!("${}.{:02}", cents / 100, cents % 100))
}

/// "$1,234.5" -> 123450. At most two decimal places.
fn price_cents(price: &str) -> Option<u64> {
    let digits = price.trim().trim_start_matches('$').replace(',', "");
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
    if whole.is_empty() || fraction.len() > 2 {
        return None;
    }
    let whole = whole.parse::<u64>().ok()?;
    let fraction = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<u64>().ok()? * 10,
        _ => fraction.parse::<u64>().ok()?,
    };
    whole.checked_mul(100)?.checked_add(fraction)
}

/// Searchable, filterable list of service records with a single selected
/// record backing the detail panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServiceTable {
    records: Vec<ServiceRecord>,
    options: TableOptions,
    search_term: String,
    status_filter: StatusFilter,
    selected: Option<ServiceRecordId>,
}

impl ServiceTable {
    pub fn new(records: Vec<ServiceRecord>) -> Self {
        Self::with_options(records, TableOptions::default())
    }

    pub fn with_options(records: Vec<ServiceRecord>, options: TableOptions) -> Self {
        Self {
            records,
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: TableOptions) {
        self.options = options;
    }

    pub fn records(&self) -> &[ServiceRecord] {
        &self.records
    }

    /// Swaps the underlying list. The detail view is closed since the
    /// selected record may no longer exist.
    pub fn replace_records(&mut self, records: Vec<ServiceRecord>) {
        debug!(count = records.len(), "service records replaced");
        self.records = records;
        self.selected = None;
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn status_filter(&self) -> &StatusFilter {
        &self.status_filter
    }

    /// Any string is accepted. Unknown statuses simply match nothing
    /// unless a record carries that exact raw status.
    pub fn set_status_filter(&mut self, value: &str) {
        self.status_filter = StatusFilter::parse(value);
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
    }

    /// Records passing the status filter and the search term, in input order.
    pub fn filtered(&self) -> Vec<&ServiceRecord> {
        let needle = self.search_term.to_lowercase();
        self.records
            .iter()
            .filter(|record| self.status_filter.matches(&record.status))
            .filter(|record| matches_search(record, &needle))
            .collect()
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        if self.filtered().is_empty() {
            return Some(EMPTY_MESSAGE);
        }
        None
    }

    /// Opens the detail view for `id`. Unknown ids leave the selection alone.
    pub fn select_record(&mut self, id: &ServiceRecordId) -> bool {
        if !self.records.iter().any(|record| &record.id == id) {
            return false;
        }
        self.selected = Some(id.clone());
        true
    }

    /// Selects the record at `row` of the current filtered view.
    pub fn select_filtered(&mut self, row: usize) -> bool {
        let Some(id) = self.filtered().get(row).map(|record| record.id.clone()) else {
            return false;
        };
        self.selected = Some(id);
        true
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    pub fn is_detail_open(&self) -> bool {
        self.selected.is_some()
    }

    /// The selected record, whether or not current filters still show it.
    pub fn selected(&self) -> Option<&ServiceRecord> {
        let id = self.selected.as_ref()?;
        self.records.iter().find(|record| &record.id == id)
    }

    pub fn detail(&self) -> Option<ServiceDetail> {
        self.selected().map(ServiceDetail::from_record)
    }
}

fn matches_search(record: &ServiceRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    [
        record.customer_name.as_str(),
        record.vehicle_info.license_plate.as_str(),
        record.service_type.as_str(),
    ]
    .iter()
    .any(|haystack| haystack.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::{EMPTY_MESSAGE, ServiceDetail, ServiceTable, TableOptions, parts_total};
    use crate::{
        PartUsed, ServiceRecord, ServiceRecordId, ServiceStatus, StatusTone, VehicleSummary,
    };

    fn record(id: &str, customer: &str, plate: &str, service: &str, status: &str) -> ServiceRecord {
        ServiceRecord {
            id: ServiceRecordId::new(id),
            date: "2023-06-15".to_owned(),
            vehicle_info: VehicleSummary {
                make: "Toyota".to_owned(),
                model: "Camry".to_owned(),
                year: Some(2020),
                license_plate: plate.to_owned(),
            },
            customer_name: customer.to_owned(),
            service_type: service.to_owned(),
            status: ServiceStatus::parse(status),
            next_service_date: None,
            notes: String::new(),
            parts: Vec::new(),
        }
    }

    fn two_records() -> Vec<ServiceRecord> {
        vec![
            record("1", "John Smith", "ABC123", "Oil Change", "completed"),
            record("2", "Jane Doe", "XYZ789", "Brake Inspection", "scheduled"),
        ]
    }

    fn ids(table: &ServiceTable) -> Vec<&str> {
        table
            .filtered()
            .into_iter()
            .map(|record| record.id.as_str())
            .collect()
    }

    #[test]
    fn default_options() {
        let options = TableOptions::default();
        assert_eq!(options.title, "Service Records");
        assert!(options.show_filters);
        assert!(!options.show_due_date);
    }

    #[test]
    fn status_filter_selects_matching_records() {
        let mut table = ServiceTable::new(two_records());
        table.set_status_filter("scheduled");
        assert_eq!(ids(&table), vec!["2"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let mut table = ServiceTable::new(two_records());
        table.set_status_filter("all");
        table.set_search_term("john");
        assert_eq!(ids(&table), vec!["1"]);

        table.set_search_term("xyz");
        assert_eq!(ids(&table), vec!["2"]);

        table.set_search_term("BRAKE");
        assert_eq!(ids(&table), vec!["2"]);
    }

    #[test]
    fn search_and_status_combine() {
        let mut table = ServiceTable::new(two_records());
        table.set_search_term("john");
        table.set_status_filter("scheduled");
        assert!(table.filtered().is_empty());
        assert_eq!(table.empty_message(), Some(EMPTY_MESSAGE));
    }

    #[test]
    fn empty_criteria_keep_everything_in_order() {
        let table = ServiceTable::new(two_records());
        assert_eq!(ids(&table), vec!["1", "2"]);
        assert_eq!(table.empty_message(), None);
    }

    #[test]
    fn filtering_is_idempotent() {
        let mut table = ServiceTable::new(two_records());
        table.set_search_term("e");
        let first = ids(&table).into_iter().map(str::to_owned).collect::<Vec<_>>();
        table.set_search_term("e");
        let second = ids(&table).into_iter().map(str::to_owned).collect::<Vec<_>>();
        assert_eq!(first, second);
        assert_eq!(first, vec!["1", "2"]);
    }

    #[test]
    fn missing_fields_match_as_empty_strings() {
        let mut sparse = record("3", "", "", "", "completed");
        sparse.vehicle_info = VehicleSummary::default();
        let mut table = ServiceTable::new(vec![sparse]);
        table.set_search_term("smith");
        assert!(table.filtered().is_empty());
        table.set_search_term("");
        assert_eq!(ids(&table), vec!["3"]);
    }

    #[test]
    fn unknown_filter_value_matches_only_that_raw_status() {
        let mut records = two_records();
        records.push(record("3", "Bob", "DEF456", "Tires", "on-hold"));
        let mut table = ServiceTable::new(records);
        table.set_status_filter("on-hold");
        assert_eq!(ids(&table), vec!["3"]);
        table.set_status_filter("waiting");
        assert!(table.filtered().is_empty());
    }

    #[test]
    fn selection_survives_filter_changes() {
        let mut table = ServiceTable::new(two_records());
        assert!(table.select_record(&ServiceRecordId::new("1")));
        table.set_status_filter("scheduled");
        table.set_search_term("jane");

        let selected = table.selected().expect("selection kept");
        assert_eq!(selected.id.as_str(), "1");

        table.close_detail();
        assert!(table.selected().is_none());
    }

    #[test]
    fn select_filtered_uses_current_view_rows() {
        let mut table = ServiceTable::new(two_records());
        table.set_status_filter("scheduled");
        assert!(table.select_filtered(0));
        assert_eq!(table.selected().map(|record| record.id.as_str()), Some("2"));
        assert!(!table.select_filtered(5));
        assert_eq!(table.selected().map(|record| record.id.as_str()), Some("2"));
    }

    #[test]
    fn unknown_id_does_not_change_selection() {
        let mut table = ServiceTable::new(two_records());
        assert!(!table.select_record(&ServiceRecordId::new("missing")));
        assert!(!table.is_detail_open());
    }

    #[test]
    fn replacing_records_closes_detail() {
        let mut table = ServiceTable::new(two_records());
        table.select_record(&ServiceRecordId::new("2"));
        table.replace_records(two_records());
        assert!(table.selected().is_none());
    }

    #[test]
    fn status_labels_are_total() {
        assert_eq!(ServiceStatus::InProgress.label(), "In Progress");
        assert_eq!(ServiceStatus::parse("on-hold").label(), "on-hold");
    }

    #[test]
    fn detail_view_formats_vehicle_and_license() {
        let mut source = record("1", "John Smith", "ABC123", "Oil Change", "in-progress");
        source.next_service_date = Some("2023-09-15".to_owned());
        let detail = ServiceDetail::from_record(&source);
        assert_eq!(detail.customer, "John Smith");
        assert_eq!(detail.vehicle, "Toyota Camry (2020)");
        assert_eq!(detail.license, "License: ABC123");
        assert_eq!(detail.status_label, "In Progress");
        assert_eq!(detail.status_tone, StatusTone::Warning);
        assert_eq!(detail.next_service_date.as_deref(), Some("2023-09-15"));
    }

    #[test]
    fn detail_carries_notes_parts_and_total() {
        let mut source = record("1", "John Smith", "ABC123", "Oil Change", "completed");
        source.notes = " Replaced oil filter. ".to_owned();
        source.parts = vec![
            PartUsed {
                name: "Oil Filter".to_owned(),
                quantity: "1".to_owned(),
                price: "$12.99".to_owned(),
            },
            PartUsed {
                name: "Synthetic Oil (5W-30)".to_owned(),
                quantity: "5 qts".to_owned(),
                price: "$35.95".to_owned(),
            },
        ];
        let detail = ServiceDetail::from_record(&source);
        assert_eq!(detail.notes, "Replaced oil filter.");
        assert_eq!(detail.parts.len(), 2);
        assert_eq!(detail.parts_total.as_deref(), Some("$48.94"));
    }

    #[test]
    fn parts_total_needs_every_price_to_parse() {
        let part = |price: &str| PartUsed {
            name: "Wiper".to_owned(),
            quantity: "2".to_owned(),
            price: price.to_owned(),
        };
        assert_eq!(parts_total(&[]), None);
        assert_eq!(
            parts_total(&[part("$1,200.5"), part("3")]).as_deref(),
            Some("$1203.50")
        );
        assert_eq!(parts_total(&[part("$12.99"), part("call")]), None);
        assert_eq!(parts_total(&[part("1.999")]), None);
    }

    #[test]
    fn detail_omits_blank_next_service_date() {
        let mut source = record("1", "John Smith", "ABC123", "Oil Change", "completed");
        source.next_service_date = Some(String::new());
        assert_eq!(ServiceDetail::from_record(&source).next_service_date, None);
    }
}

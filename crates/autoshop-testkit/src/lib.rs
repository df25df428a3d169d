// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use autoshop_app::{
    CustomerRecord, ServiceRecord, ServiceRecordId, ServiceStatus, VehicleRecord, VehicleSummary,
};
use std::path::PathBuf;
use time::macros::format_description;
use time::{Date, Duration, Month};

const FIRST_NAMES: [&str; 16] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Elliot", "Robin", "Cameron", "Hayden", "Rowan",
];
const LAST_NAMES: [&str; 18] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young", "Diaz", "Reed",
    "Campbell", "Turner", "Flores", "Bennett", "Price", "Morris", "Foster", "Brooks",
];
const STREET_NAMES: [&str; 12] = [
    "Cedar", "Maple", "Oak", "Pine", "Willow", "Elm", "Birch", "Juniper", "Sunset", "Ridge",
    "Valley", "Lakeview",
];
const EMAIL_DOMAINS: [&str; 4] = ["example.com", "mail.test", "garage.dev", "drivers.org"];

const MAKES_AND_MODELS: [(&str, &[&str]); 8] = [
    ("Toyota", &["Camry", "Corolla", "RAV4", "Tacoma"]),
    ("Honda", &["Civic", "Accord", "CR-V"]),
    ("Ford", &["F-150", "Escape", "Mustang"]),
    ("Chevrolet", &["Malibu", "Silverado", "Equinox"]),
    ("Nissan", &["Altima", "Rogue", "Sentra"]),
    ("BMW", &["X5", "330i"]),
    ("Audi", &["A4", "Q5"]),
    ("Subaru", &["Outback", "Forester", "Impreza"]),
];
const COLORS: [&str; 8] = [
    "Black", "White", "Silver", "Gray", "Blue", "Red", "Green", "Beige",
];
const SERVICE_TYPES: [&str; 10] = [
    "Oil Change",
    "Brake Replacement",
    "Brake Inspection",
    "Tire Rotation",
    "Full Inspection",
    "Full Service",
    "A/C Repair",
    "Diagnostic",
    "Battery Replacement",
    "Transmission Flush",
];
// VINs never use I, O or Q.
const VIN_CHARS: &[u8] = b"ABCDEFGHJKLMNPRSTUVWXYZ0123456789";
const PLATE_LETTERS: &[u8] = b"ABCDEFGHJKLMNPRSTUVWXYZ";

const REFERENCE_YEAR: i32 = 2026;

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded generator of plausible shop data. The same seed always yields the
/// same sequence.
#[derive(Debug, Clone)]
pub struct ShopFaker {
    rng: DeterministicRng,
}

impl ShopFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn full_name(&mut self) -> String {
        format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES))
    }

    /// A customer that passes every intake rule.
    pub fn customer(&mut self) -> CustomerRecord {
        let first = self.pick(&FIRST_NAMES);
        let last = self.pick(&LAST_NAMES);
        let domain = self.pick(&EMAIL_DOMAINS);
        CustomerRecord {
            name: format!("{first} {last}"),
            email: format!(
                "{}.{}@{domain}",
                first.to_ascii_lowercase(),
                last.to_ascii_lowercase()
            ),
            phone: format!(
                "({:03}) {:03}-{:04}",
                self.int_range(200, 999),
                self.int_range(200, 999),
                self.int_range(0, 9_999),
            ),
            address: format!(
                "{} {} St",
                self.int_range(100, 9_999),
                self.pick(&STREET_NAMES)
            ),
        }
    }

    /// A vehicle that passes every intake rule.
    pub fn vehicle(&mut self) -> VehicleRecord {
        let (make, model) = self.make_and_model();
        let last_service = self.date_in_year(REFERENCE_YEAR - 1);
        VehicleRecord {
            make: make.to_owned(),
            model: model.to_owned(),
            year: self.int_range(2005, REFERENCE_YEAR as i64).to_string(),
            license_plate: self.license_plate(),
            vin: self.chars_from(VIN_CHARS, 17),
            color: self.pick(&COLORS).to_owned(),
            last_service_date: format_date(last_service),
            last_service_mileage: self.int_range(5_000, 150_000).to_string(),
        }
    }

    pub fn license_plate(&mut self) -> String {
        format!(
            "{}{:03}",
            self.chars_from(PLATE_LETTERS, 3),
            self.int_range(0, 999)
        )
    }

    pub fn service_record(&mut self, id: impl Into<String>) -> ServiceRecord {
        let (make, model) = self.make_and_model();
        let status = ServiceStatus::KNOWN[self.rng.int_n(ServiceStatus::KNOWN.len())].clone();
        let date = self.date_in_year(REFERENCE_YEAR);
        let next_service_date = match status {
            ServiceStatus::Completed | ServiceStatus::Scheduled => {
                Some(format_date(date + Duration::days(180)))
            }
            _ => None,
        };
        ServiceRecord {
            id: ServiceRecordId::new(id),
            date: format_date(date),
            vehicle_info: VehicleSummary {
                make: make.to_owned(),
                model: model.to_owned(),
                year: Some(self.int_range(2005, REFERENCE_YEAR as i64) as i32),
                license_plate: self.license_plate(),
            },
            customer_name: self.full_name(),
            service_type: self.pick(&SERVICE_TYPES).to_owned(),
            status,
            next_service_date,
            notes: String::new(),
            parts: Vec::new(),
        }
    }

    /// `count` records with ids "1".."count".
    pub fn service_records(&mut self, count: usize) -> Vec<ServiceRecord> {
        (1..=count)
            .map(|index| self.service_record(index.to_string()))
            .collect()
    }

    pub fn date_in_year(&mut self, year: i32) -> Date {
        let start = calendar_date(year, Month::January, 1);
        let days = if time::util::is_leap_year(year) { 366 } else { 365 };
        start + Duration::days(self.int_range(0, days - 1))
    }

    fn make_and_model(&mut self) -> (&'static str, &'static str) {
        let (make, models) = MAKES_AND_MODELS[self.rng.int_n(MAKES_AND_MODELS.len())];
        (make, models[self.rng.int_n(models.len())])
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn chars_from(&mut self, alphabet: &[u8], len: usize) -> String {
        (0..len)
            .map(|_| char::from(alphabet[self.rng.int_n(alphabet.len())]))
            .collect()
    }

    fn int_range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }
}

pub fn valid_customer() -> CustomerRecord {
    CustomerRecord {
        name: "John Smith".to_owned(),
        email: "john.smith@example.com".to_owned(),
        phone: "5551234567".to_owned(),
        address: "123 Main St".to_owned(),
    }
}

pub fn valid_vehicle() -> VehicleRecord {
    VehicleRecord {
        make: "Toyota".to_owned(),
        model: "Camry".to_owned(),
        year: "2020".to_owned(),
        license_plate: "ABC123".to_owned(),
        vin: "1HGBH41JXMN109186".to_owned(),
        color: "Silver".to_owned(),
        last_service_date: "2023-06-15".to_owned(),
        last_service_mileage: "45000".to_owned(),
    }
}

/// Minimal record for table tests; vehicle is a 2020 Toyota Camry.
pub fn service_record(
    id: &str,
    customer_name: &str,
    license_plate: &str,
    service_type: &str,
    status: &str,
) -> ServiceRecord {
    ServiceRecord {
        id: ServiceRecordId::new(id),
        date: "2023-06-15".to_owned(),
        vehicle_info: VehicleSummary {
            make: "Toyota".to_owned(),
            model: "Camry".to_owned(),
            year: Some(2020),
            license_plate: license_plate.to_owned(),
        },
        customer_name: customer_name.to_owned(),
        service_type: service_type.to_owned(),
        status: ServiceStatus::parse(status),
        next_service_date: None,
        notes: String::new(),
        parts: Vec::new(),
    }
}

pub fn temp_records_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("records.json");
    Ok((dir, path))
}

/// Writes `records` as a JSON array into a fresh temp dir.
pub fn temp_records_file(records: &[ServiceRecord]) -> Result<(tempfile::TempDir, PathBuf)> {
    let (dir, path) = temp_records_path()?;
    let body = serde_json::to_string_pretty(records).context("encode records")?;
    std::fs::write(&path, body).with_context(|| format!("write {}", path.display()))?;
    Ok((dir, path))
}

pub fn service_types() -> &'static [&'static str] {
    &SERVICE_TYPES
}

fn calendar_date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("valid calendar date")
}

fn format_date(date: Date) -> String {
    date.format(&format_description!("[year]-[month]-[day]"))
        .expect("date format is valid")
}

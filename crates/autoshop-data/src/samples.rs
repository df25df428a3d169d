// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Bundled records shown when no records file is configured.

use autoshop_app::{PartUsed, ServiceRecord, ServiceRecordId, ServiceStatus, VehicleSummary};

struct Sample {
    id: &'static str,
    date: &'static str,
    make: &'static str,
    model: &'static str,
    year: Option<i32>,
    plate: &'static str,
    customer: &'static str,
    service: &'static str,
    status: ServiceStatus,
    next_service: Option<&'static str>,
}

impl Sample {
    fn into_record(self) -> ServiceRecord {
        ServiceRecord {
            id: ServiceRecordId::new(self.id),
            date: self.date.to_owned(),
            vehicle_info: VehicleSummary {
                make: self.make.to_owned(),
                model: self.model.to_owned(),
                year: self.year,
                license_plate: self.plate.to_owned(),
            },
            customer_name: self.customer.to_owned(),
            service_type: self.service.to_owned(),
            status: self.status,
            next_service_date: self.next_service.map(str::to_owned),
            notes: String::new(),
            parts: Vec::new(),
        }
    }
}

const OIL_CHANGE_NOTES: &str = "Oil change performed with synthetic oil. Replaced oil filter \
and performed multi-point inspection. All fluids topped off and tire pressure adjusted.";

const OIL_CHANGE_PARTS: [(&str, &str, &str); 2] = [
    ("Oil Filter", "1", "$12.99"),
    ("Synthetic Oil (5W-30)", "5 qts", "$35.95"),
];

/// Attaches shop notes and the parts list to the oil change.
fn with_work_details(mut record: ServiceRecord) -> ServiceRecord {
    if record.service_type == "Oil Change" && record.status == ServiceStatus::Completed {
        record.notes = OIL_CHANGE_NOTES.to_owned();
        record.parts = OIL_CHANGE_PARTS
            .iter()
            .map(|(name, quantity, price)| PartUsed {
                name: (*name).to_owned(),
                quantity: (*quantity).to_owned(),
                price: (*price).to_owned(),
            })
            .collect();
    }
    record
}

/// The general service history list.
pub fn service_records() -> Vec<ServiceRecord> {
    [
        Sample {
            id: "1",
            date: "2023-06-15",
            make: "Toyota",
            model: "Camry",
            year: Some(2020),
            plate: "ABC123",
            customer: "John Smith",
            service: "Oil Change",
            status: ServiceStatus::Completed,
            next_service: Some("2023-12-15"),
        },
        Sample {
            id: "2",
            date: "2023-07-02",
            make: "Honda",
            model: "Civic",
            year: Some(2019),
            plate: "XYZ789",
            customer: "Sarah Johnson",
            service: "Brake Replacement",
            status: ServiceStatus::Completed,
            next_service: Some("2024-01-02"),
        },
        Sample {
            id: "3",
            date: "2023-07-10",
            make: "Ford",
            model: "F-150",
            year: Some(2021),
            plate: "DEF456",
            customer: "Michael Brown",
            service: "Tire Rotation",
            status: ServiceStatus::Scheduled,
            next_service: Some("2023-10-10"),
        },
        Sample {
            id: "4",
            date: "2023-07-15",
            make: "Chevrolet",
            model: "Malibu",
            year: Some(2018),
            plate: "GHI789",
            customer: "Emily Davis",
            service: "Full Inspection",
            status: ServiceStatus::InProgress,
            next_service: None,
        },
        Sample {
            id: "5",
            date: "2023-07-20",
            make: "Nissan",
            model: "Altima",
            year: Some(2022),
            plate: "JKL012",
            customer: "David Wilson",
            service: "A/C Repair",
            status: ServiceStatus::Cancelled,
            next_service: None,
        },
    ]
    .into_iter()
    .map(Sample::into_record)
    .map(with_work_details)
    .collect()
}

/// Scheduled work for the "Upcoming Services" tab. Model years are unknown.
pub fn upcoming_records() -> Vec<ServiceRecord> {
    [
        ("1", "2023-06-15", "Toyota", "Camry", "ABC123", "John Doe", "Oil Change"),
        ("2", "2023-06-16", "Honda", "Civic", "XYZ789", "Jane Smith", "Brake Inspection"),
        ("3", "2023-06-17", "Ford", "F-150", "DEF456", "Mike Johnson", "Full Service"),
        ("4", "2023-06-18", "Nissan", "Altima", "GHI789", "Sarah Williams", "Tire Rotation"),
    ]
    .into_iter()
    .map(|(id, date, make, model, plate, customer, service)| {
        Sample {
            id,
            date,
            make,
            model,
            year: None,
            plate,
            customer,
            service,
            status: ServiceStatus::Scheduled,
            next_service: Some(date),
        }
        .into_record()
    })
    .collect()
}

/// Finished work for the "Recent Activities" tab.
pub fn recent_records() -> Vec<ServiceRecord> {
    [
        ("1", "2023-06-10", "BMW", "X5", "JKL012", "Robert Brown", "Oil Change"),
        ("2", "2023-06-09", "Audi", "A4", "MNO345", "Emily Davis", "Brake Replacement"),
        ("3", "2023-06-08", "Mercedes", "C300", "PQR678", "David Wilson", "Diagnostic"),
    ]
    .into_iter()
    .map(|(id, date, make, model, plate, customer, service)| {
        Sample {
            id,
            date,
            make,
            model,
            year: None,
            plate,
            customer,
            service,
            status: ServiceStatus::Completed,
            next_service: None,
        }
        .into_record()
    })
    .map(with_work_details)
    .collect()
}

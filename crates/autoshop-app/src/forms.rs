// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::validation::{
    parse_optional_date, require_email, require_min_chars, require_non_empty, require_year,
};
use crate::{CustomerRecord, Stage, VehicleRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CustomerField {
    Name,
    Email,
    Phone,
    Address,
}

impl CustomerField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Phone, Self::Address];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Email => "Email",
            Self::Phone => "Phone Number",
            Self::Address => "Address",
        }
    }

    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "John Doe",
            Self::Email => "john.doe@example.com",
            Self::Phone => "(123) 456-7890",
            Self::Address => "123 Main St, City, State",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VehicleField {
    Make,
    Model,
    Year,
    LicensePlate,
    Vin,
    Color,
    LastServiceDate,
    LastServiceMileage,
}

impl VehicleField {
    pub const ALL: [Self; 8] = [
        Self::Make,
        Self::Model,
        Self::Year,
        Self::LicensePlate,
        Self::Vin,
        Self::Color,
        Self::LastServiceDate,
        Self::LastServiceMileage,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Make => "make",
            Self::Model => "model",
            Self::Year => "year",
            Self::LicensePlate => "licensePlate",
            Self::Vin => "vin",
            Self::Color => "color",
            Self::LastServiceDate => "lastServiceDate",
            Self::LastServiceMileage => "lastServiceMileage",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Make => "Make",
            Self::Model => "Model",
            Self::Year => "Year",
            Self::LicensePlate => "License Plate",
            Self::Vin => "VIN (Optional)",
            Self::Color => "Color (Optional)",
            Self::LastServiceDate => "Last Service Date (Optional)",
            Self::LastServiceMileage => "Last Service Mileage (Optional)",
        }
    }

    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Make => "Toyota",
            Self::Model => "Camry",
            Self::Year => "2023",
            Self::LicensePlate => "ABC-1234",
            Self::Vin => "1HGBH41JXMN109186",
            Self::Color => "Silver",
            Self::LastServiceDate => "YYYY-MM-DD",
            Self::LastServiceMileage => "50000",
        }
    }
}

/// A field of either intake stage. Ordering follows the on-screen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IntakeField {
    Customer(CustomerField),
    Vehicle(VehicleField),
}

impl IntakeField {
    pub fn for_stage(stage: Stage) -> Vec<Self> {
        match stage {
            Stage::Customer => CustomerField::ALL.into_iter().map(Self::Customer).collect(),
            Stage::Vehicle => VehicleField::ALL.into_iter().map(Self::Vehicle).collect(),
        }
    }

    pub const fn stage(self) -> Stage {
        match self {
            Self::Customer(_) => Stage::Customer,
            Self::Vehicle(_) => Stage::Vehicle,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer(field) => field.as_str(),
            Self::Vehicle(field) => field.as_str(),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Customer(field) => field.label(),
            Self::Vehicle(field) => field.label(),
        }
    }

    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Customer(field) => field.placeholder(),
            Self::Vehicle(field) => field.placeholder(),
        }
    }
}

impl From<CustomerField> for IntakeField {
    fn from(value: CustomerField) -> Self {
        Self::Customer(value)
    }
}

impl From<VehicleField> for IntakeField {
    fn from(value: VehicleField) -> Self {
        Self::Vehicle(value)
    }
}

/// Field name to user-facing message, iterated in on-screen field order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors {
    errors: BTreeMap<IntakeField, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<IntakeField>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    pub fn remove(&mut self, field: impl Into<IntakeField>) -> Option<String> {
        self.errors.remove(&field.into())
    }

    pub fn get(&self, field: impl Into<IntakeField>) -> Option<&str> {
        self.errors.get(&field.into()).map(String::as_str)
    }

    pub fn contains(&self, field: impl Into<IntakeField>) -> bool {
        self.errors.contains_key(&field.into())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (IntakeField, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    pub fn fields(&self) -> Vec<IntakeField> {
        self.errors.keys().copied().collect()
    }

    pub fn clear_stage(&mut self, stage: Stage) {
        self.errors.retain(|field, _| field.stage() != stage);
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {message}", field.as_str())?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// A stage's field-set that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageRecord {
    Customer(CustomerRecord),
    Vehicle(VehicleRecord),
}

impl CustomerRecord {
    pub fn get(&self, field: CustomerField) -> &str {
        match field {
            CustomerField::Name => &self.name,
            CustomerField::Email => &self.email,
            CustomerField::Phone => &self.phone,
            CustomerField::Address => &self.address,
        }
    }

    pub fn set(&mut self, field: CustomerField, value: String) {
        let slot = match field {
            CustomerField::Name => &mut self.name,
            CustomerField::Email => &mut self.email,
            CustomerField::Phone => &mut self.phone,
            CustomerField::Address => &mut self.address,
        };
        *slot = value;
    }

    pub fn check_field(&self, field: CustomerField) -> Option<&'static str> {
        let value = self.get(field);
        match field {
            CustomerField::Name => require_min_chars(value, 2)
                .err()
                .map(|_| "Name must be at least 2 characters"),
            CustomerField::Email => require_email(value)
                .err()
                .map(|_| "Please enter a valid email address"),
            CustomerField::Phone => require_min_chars(value, 10)
                .err()
                .map(|_| "Phone number must be at least 10 digits"),
            CustomerField::Address => None,
        }
    }

    /// Checks every field; reports all failures at once.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        for field in CustomerField::ALL {
            if let Some(message) = self.check_field(field) {
                errors.insert(field, message);
            }
        }
        errors.into_result()
    }
}

impl VehicleRecord {
    pub fn get(&self, field: VehicleField) -> &str {
        match field {
            VehicleField::Make => &self.make,
            VehicleField::Model => &self.model,
            VehicleField::Year => &self.year,
            VehicleField::LicensePlate => &self.license_plate,
            VehicleField::Vin => &self.vin,
            VehicleField::Color => &self.color,
            VehicleField::LastServiceDate => &self.last_service_date,
            VehicleField::LastServiceMileage => &self.last_service_mileage,
        }
    }

    pub fn set(&mut self, field: VehicleField, value: String) {
        let slot = match field {
            VehicleField::Make => &mut self.make,
            VehicleField::Model => &mut self.model,
            VehicleField::Year => &mut self.year,
            VehicleField::LicensePlate => &mut self.license_plate,
            VehicleField::Vin => &mut self.vin,
            VehicleField::Color => &mut self.color,
            VehicleField::LastServiceDate => &mut self.last_service_date,
            VehicleField::LastServiceMileage => &mut self.last_service_mileage,
        };
        *slot = value;
    }

    pub fn check_field(&self, field: VehicleField) -> Option<&'static str> {
        let value = self.get(field);
        match field {
            VehicleField::Make => require_non_empty(value).err().map(|_| "Make is required"),
            VehicleField::Model => require_non_empty(value)
                .err()
                .map(|_| "Model is required"),
            VehicleField::Year => require_year(value)
                .err()
                .map(|_| "Year must be a 4-digit number"),
            VehicleField::LicensePlate => require_non_empty(value)
                .err()
                .map(|_| "License plate is required"),
            VehicleField::LastServiceDate => parse_optional_date(value)
                .err()
                .map(|_| "Last service date must be a valid YYYY-MM-DD date"),
            VehicleField::Vin | VehicleField::Color | VehicleField::LastServiceMileage => None,
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        for field in VehicleField::ALL {
            if let Some(message) = self.check_field(field) {
                errors.insert(field, message);
            }
        }
        errors.into_result()
    }
}

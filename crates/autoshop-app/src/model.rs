// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::*;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceStatus {
    Completed,
    Scheduled,
    InProgress,
    Cancelled,
    /// Anything the data source sent that we do not recognize. Kept verbatim
    /// so it can still be shown and filtered on.
    Other(String),
}

impl ServiceStatus {
    pub const KNOWN: [Self; 4] = [
        Self::Completed,
        Self::Scheduled,
        Self::InProgress,
        Self::Cancelled,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Completed => "completed",
            Self::Scheduled => "scheduled",
            Self::InProgress => "in-progress",
            Self::Cancelled => "cancelled",
            Self::Other(raw) => raw,
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "completed" => Self::Completed,
            "scheduled" => Self::Scheduled,
            "in-progress" => Self::InProgress,
            "cancelled" => Self::Cancelled,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Display label. Total over every value, unknown statuses render raw.
    pub fn label(&self) -> &str {
        match self {
            Self::Completed => "Completed",
            Self::Scheduled => "Scheduled",
            Self::InProgress => "In Progress",
            Self::Cancelled => "Cancelled",
            Self::Other(raw) => raw,
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            Self::Completed => StatusTone::Success,
            Self::Scheduled => StatusTone::Info,
            Self::InProgress => StatusTone::Warning,
            Self::Cancelled => StatusTone::Danger,
            Self::Other(_) => StatusTone::Neutral,
        }
    }
}

impl Default for ServiceStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for ServiceStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ServiceStatus> for String {
    fn from(value: ServiceStatus) -> Self {
        match value {
            ServiceStatus::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusTone {
    Success,
    Info,
    Warning,
    Danger,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ServiceStatus),
}

impl StatusFilter {
    /// Every filter the status picker offers, in display order.
    pub fn choices() -> Vec<Self> {
        let mut choices = vec![Self::All];
        choices.extend(ServiceStatus::KNOWN.into_iter().map(Self::Only));
        choices
    }

    /// Accepts any string; `"all"` clears the filter.
    pub fn parse(value: &str) -> Self {
        match value {
            "all" => Self::All,
            other => Self::Only(ServiceStatus::parse(other)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => "All Statuses",
            Self::Only(status) => status.label(),
        }
    }

    pub fn matches(&self, status: &ServiceStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleSummary {
    #[serde(deserialize_with = "crate::lenient::string")]
    pub make: String,
    #[serde(deserialize_with = "crate::lenient::string")]
    pub model: String,
    #[serde(deserialize_with = "crate::lenient::year")]
    pub year: Option<i32>,
    #[serde(deserialize_with = "crate::lenient::string")]
    pub license_plate: String,
}

/// One line of the parts table in the service detail panel. Quantity and
/// price are display strings ("5 qts", "$35.95").
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartUsed {
    #[serde(deserialize_with = "crate::lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "crate::lenient::string")]
    pub quantity: String,
    #[serde(deserialize_with = "crate::lenient::string")]
    pub price: String,
}

/// A service record as it arrives from the data source. Only `id` is
/// required; every other field that is missing, null or of the wrong
/// type falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub id: ServiceRecordId,
    #[serde(default, deserialize_with = "crate::lenient::string")]
    pub date: String,
    #[serde(default, deserialize_with = "crate::lenient::or_default")]
    pub vehicle_info: VehicleSummary,
    #[serde(default, deserialize_with = "crate::lenient::string")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "crate::lenient::string")]
    pub service_type: String,
    #[serde(default, deserialize_with = "crate::lenient::status")]
    pub status: ServiceStatus,
    #[serde(
        default,
        deserialize_with = "crate::lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_service_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::lenient::string",
        skip_serializing_if = "String::is_empty"
    )]
    pub notes: String,
    #[serde(
        default,
        deserialize_with = "crate::lenient::or_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub parts: Vec<PartUsed>,
}

impl ServiceRecord {
    /// "Toyota Camry"; blank parts are skipped.
    pub fn vehicle_title(&self) -> String {
        join_non_empty(
            &[
                self.vehicle_info.make.as_str(),
                self.vehicle_info.model.as_str(),
            ],
            " ",
        )
    }

    /// "2020 • ABC123"
    pub fn vehicle_subtitle(&self) -> String {
        let year = self
            .vehicle_info
            .year
            .map(|year| year.to_string())
            .unwrap_or_default();
        join_non_empty(
            &[year.as_str(), self.vehicle_info.license_plate.as_str()],
            " • ",
        )
    }
}

fn join_non_empty(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(separator)
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleRecord {
    pub make: String,
    pub model: String,
    pub year: String,
    pub license_plate: String,
    pub vin: String,
    pub color: String,
    pub last_service_date: String,
    pub last_service_mileage: String,
}

/// What the intake form hands to the submission sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeSubmission {
    pub customer: CustomerRecord,
    pub vehicle: VehicleRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    Customer,
    Vehicle,
}

impl Stage {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Customer => "Customer Information",
            Self::Vehicle => "Vehicle Details",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntakeStage {
    Customer,
    Vehicle,
    Submitted,
}

impl IntakeStage {
    pub const fn stage(self) -> Option<Stage> {
        match self {
            Self::Customer => Some(Stage::Customer),
            Self::Vehicle => Some(Stage::Vehicle),
            Self::Submitted => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Vehicle => "vehicle",
            Self::Submitted => "submitted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IntakeMode {
    #[default]
    Add,
    Edit,
}

impl IntakeMode {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Add => "Add Customer & Vehicle",
            Self::Edit => "Edit Customer & Vehicle",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Add => "Enter customer information and vehicle details to add to the system",
            Self::Edit => "Update customer information and vehicle details",
        }
    }

    pub const fn submit_label(self) -> &'static str {
        match self {
            Self::Add => "Save",
            Self::Edit => "Update",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Admin,
    Staff,
}

impl UserRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            "staff" => Some(Self::Staff),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DashboardTab {
    Upcoming,
    Recent,
    Analytics,
}

impl DashboardTab {
    pub const ALL: [Self; 3] = [Self::Upcoming, Self::Recent, Self::Analytics];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Upcoming => "Upcoming Services",
            Self::Recent => "Recent Activities",
            Self::Analytics => "Analytics",
        }
    }

    pub const fn visible_to(self, role: UserRole) -> bool {
        match self {
            Self::Analytics => matches!(role, UserRole::Admin),
            Self::Upcoming | Self::Recent => true,
        }
    }

    pub fn visible_tabs(role: UserRole) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|tab| tab.visible_to(role))
            .collect()
    }

    /// Whether the table on this tab shows the due-date column.
    pub const fn shows_due_date(self) -> bool {
        matches!(self, Self::Upcoming)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
    pub admin_only: bool,
}

pub const NAV_ITEMS: [NavItem; 9] = [
    NavItem {
        label: "Dashboard",
        href: "/dashboard",
        admin_only: false,
    },
    NavItem {
        label: "Customers",
        href: "/customers",
        admin_only: false,
    },
    NavItem {
        label: "Vehicles",
        href: "/vehicles",
        admin_only: false,
    },
    NavItem {
        label: "Services",
        href: "/services",
        admin_only: false,
    },
    NavItem {
        label: "Schedule",
        href: "/schedule",
        admin_only: false,
    },
    NavItem {
        label: "Notifications",
        href: "/notifications",
        admin_only: false,
    },
    NavItem {
        label: "Reports",
        href: "/reports",
        admin_only: true,
    },
    NavItem {
        label: "Staff Management",
        href: "/staff",
        admin_only: true,
    },
    NavItem {
        label: "System Settings",
        href: "/settings",
        admin_only: true,
    },
];

pub const ACTIVE_NAV_HREF: &str = "/dashboard";

pub fn nav_items_for(role: UserRole) -> Vec<NavItem> {
    NAV_ITEMS
        .into_iter()
        .filter(|item| !item.admin_only || role == UserRole::Admin)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DashboardCounts {
    pub customers: usize,
    pub vehicles: usize,
    pub upcoming: usize,
    pub completed: usize,
    pub reminders: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: String,
    pub caption: &'static str,
}

impl DashboardCounts {
    pub fn cards(&self, role: UserRole) -> [SummaryCard; 4] {
        let role_card = match role {
            UserRole::Admin => SummaryCard {
                title: "Completed Services",
                value: self.completed.to_string(),
                caption: "in loaded records",
            },
            UserRole::Staff => SummaryCard {
                title: "Notifications",
                value: self.reminders.to_string(),
                caption: "Pending reminders",
            },
        };
        [
            SummaryCard {
                title: "Total Customers",
                value: self.customers.to_string(),
                caption: "with service history",
            },
            SummaryCard {
                title: "Total Vehicles",
                value: self.vehicles.to_string(),
                caption: "by license plate",
            },
            SummaryCard {
                title: "Upcoming Services",
                value: self.upcoming.to_string(),
                caption: "scheduled or in progress",
            },
            role_card,
        ]
    }
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Two-stage customer/vehicle intake.
//!
//! ```text
//! [customer] --advance ok--> [vehicle]
//! [vehicle]  --retreat-----> [customer]
//! [vehicle]  --finalize ok-> [submitted]
//! ```
//!
//! A failed step never moves the stage. The customer record that goes out
//! with the submission is the one validated by the last successful
//! `advance`, so edits made to customer fields from the vehicle stage only
//! count after the user goes back and advances again.

use anyhow::Result;
use std::fmt;
use tracing::{debug, info};

use crate::forms::{FieldErrors, IntakeField, StageRecord};
use crate::{CustomerRecord, IntakeMode, IntakeStage, IntakeSubmission, Stage, VehicleRecord};

/// Receives the merged payload once both stages validate.
pub trait SubmissionSink {
    fn submit(&mut self, submission: &IntakeSubmission) -> Result<()>;
}

impl<F> SubmissionSink for F
where
    F: FnMut(&IntakeSubmission) -> Result<()>,
{
    fn submit(&mut self, submission: &IntakeSubmission) -> Result<()> {
        self(submission)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    Advance,
    Retreat,
    Finalize,
}

impl StepAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Advance => "advance",
            Self::Retreat => "go back",
            Self::Finalize => "submit",
        }
    }
}

#[derive(Debug)]
pub enum StepError {
    Invalid(FieldErrors),
    WrongStage {
        action: StepAction,
        stage: IntakeStage,
    },
    Submit(anyhow::Error),
}

impl StepError {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            Self::WrongStage { .. } | Self::Submit(_) => None,
        }
    }
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(errors) => write!(f, "fix the highlighted fields: {errors}"),
            Self::WrongStage { action, stage } => write!(
                f,
                "cannot {} from the {} stage",
                action.as_str(),
                stage.as_str()
            ),
            Self::Submit(error) => write!(f, "submission failed: {error:#}"),
        }
    }
}

impl std::error::Error for StepError {}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Customer,
    Vehicle { confirmed: CustomerRecord },
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeForm {
    mode: IntakeMode,
    phase: Phase,
    customer: CustomerRecord,
    vehicle: VehicleRecord,
    errors: FieldErrors,
    customer_attempted: bool,
    vehicle_attempted: bool,
}

impl Default for IntakeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeForm {
    pub fn new() -> Self {
        Self::with_initial(CustomerRecord::default(), VehicleRecord::default())
    }

    /// Pre-filled values are not validated until the user tries to move on.
    pub fn with_initial(customer: CustomerRecord, vehicle: VehicleRecord) -> Self {
        Self {
            mode: IntakeMode::Add,
            phase: Phase::Customer,
            customer,
            vehicle,
            errors: FieldErrors::new(),
            customer_attempted: false,
            vehicle_attempted: false,
        }
    }

    pub fn edit(customer: CustomerRecord, vehicle: VehicleRecord) -> Self {
        Self {
            mode: IntakeMode::Edit,
            ..Self::with_initial(customer, vehicle)
        }
    }

    pub fn mode(&self) -> IntakeMode {
        self.mode
    }

    pub fn stage(&self) -> IntakeStage {
        match self.phase {
            Phase::Customer => IntakeStage::Customer,
            Phase::Vehicle { .. } => IntakeStage::Vehicle,
            Phase::Submitted => IntakeStage::Submitted,
        }
    }

    pub fn is_submitted(&self) -> bool {
        self.phase == Phase::Submitted
    }

    pub fn customer(&self) -> &CustomerRecord {
        &self.customer
    }

    pub fn vehicle(&self) -> &VehicleRecord {
        &self.vehicle
    }

    /// Customer record captured by the last successful `advance`.
    pub fn confirmed_customer(&self) -> Option<&CustomerRecord> {
        match &self.phase {
            Phase::Vehicle { confirmed } => Some(confirmed),
            Phase::Customer | Phase::Submitted => None,
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: impl Into<IntakeField>) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn value(&self, field: impl Into<IntakeField>) -> &str {
        match field.into() {
            IntakeField::Customer(field) => self.customer.get(field),
            IntakeField::Vehicle(field) => self.vehicle.get(field),
        }
    }

    /// Stores raw input. After a stage's first failed submit attempt the
    /// edited field is re-checked so its message tracks the input.
    pub fn update_field(&mut self, field: impl Into<IntakeField>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match field {
            IntakeField::Customer(field) => self.customer.set(field, value),
            IntakeField::Vehicle(field) => self.vehicle.set(field, value),
        }
        if self.attempted(field.stage()) {
            self.validate_field(field);
        }
    }

    /// Re-checks a single field, e.g. when focus leaves it.
    pub fn validate_field(&mut self, field: impl Into<IntakeField>) -> Option<&str> {
        let field = field.into();
        let message = match field {
            IntakeField::Customer(field) => self.customer.check_field(field),
            IntakeField::Vehicle(field) => self.vehicle.check_field(field),
        };
        match message {
            Some(message) => self.errors.insert(field, message),
            None => {
                self.errors.remove(field);
            }
        }
        self.errors.get(field)
    }

    pub fn validate_stage(&self, stage: Stage) -> Result<StageRecord, FieldErrors> {
        match stage {
            Stage::Customer => self
                .customer
                .validate()
                .map(|()| StageRecord::Customer(self.customer.clone())),
            Stage::Vehicle => self
                .vehicle
                .validate()
                .map(|()| StageRecord::Vehicle(self.vehicle.clone())),
        }
    }

    pub fn advance(&mut self) -> Result<(), StepError> {
        self.require_stage(StepAction::Advance, IntakeStage::Customer)?;
        self.customer_attempted = true;

        match self.customer.validate() {
            Ok(()) => {
                self.errors.clear_stage(Stage::Customer);
                self.phase = Phase::Vehicle {
                    confirmed: self.customer.clone(),
                };
                debug!(stage = "vehicle", "intake advanced");
                Ok(())
            }
            Err(errors) => {
                self.replace_stage_errors(Stage::Customer, &errors);
                debug!(failed = errors.len(), "customer stage rejected");
                Err(StepError::Invalid(errors))
            }
        }
    }

    pub fn retreat(&mut self) -> Result<(), StepError> {
        self.require_stage(StepAction::Retreat, IntakeStage::Vehicle)?;
        self.phase = Phase::Customer;
        debug!(stage = "customer", "intake went back");
        Ok(())
    }

    pub fn finalize<S>(&mut self, sink: &mut S) -> Result<IntakeSubmission, StepError>
    where
        S: SubmissionSink + ?Sized,
    {
        let Phase::Vehicle { confirmed } = &self.phase else {
            return Err(StepError::WrongStage {
                action: StepAction::Finalize,
                stage: self.stage(),
            });
        };
        let customer = confirmed.clone();
        self.vehicle_attempted = true;

        if let Err(errors) = self.vehicle.validate() {
            self.replace_stage_errors(Stage::Vehicle, &errors);
            debug!(failed = errors.len(), "vehicle stage rejected");
            return Err(StepError::Invalid(errors));
        }

        let submission = IntakeSubmission {
            customer,
            vehicle: self.vehicle.clone(),
        };
        sink.submit(&submission).map_err(StepError::Submit)?;

        self.errors.clear_stage(Stage::Vehicle);
        self.phase = Phase::Submitted;
        info!(
            customer = %submission.customer.name,
            plate = %submission.vehicle.license_plate,
            "intake submitted"
        );
        Ok(submission)
    }

    fn attempted(&self, stage: Stage) -> bool {
        match stage {
            Stage::Customer => self.customer_attempted,
            Stage::Vehicle => self.vehicle_attempted,
        }
    }

    fn require_stage(&self, action: StepAction, expected: IntakeStage) -> Result<(), StepError> {
        let stage = self.stage();
        if stage != expected {
            return Err(StepError::WrongStage { action, stage });
        }
        Ok(())
    }

    fn replace_stage_errors(&mut self, stage: Stage, errors: &FieldErrors) {
        self.errors.clear_stage(stage);
        for (field, message) in errors.iter() {
            self.errors.insert(field, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{IntakeForm, StepAction, StepError};
    use crate::forms::{CustomerField, StageRecord, VehicleField};
    use crate::{CustomerRecord, IntakeMode, IntakeStage, IntakeSubmission, Stage, VehicleRecord};
    use anyhow::{Result, anyhow};

    fn fill_valid_customer(form: &mut IntakeForm) {
        form.update_field(CustomerField::Name, "John Smith");
        form.update_field(CustomerField::Email, "john@example.com");
        form.update_field(CustomerField::Phone, "5551234567");
    }

    fn fill_valid_vehicle(form: &mut IntakeForm) {
        form.update_field(VehicleField::Make, "Toyota");
        form.update_field(VehicleField::Model, "Camry");
        form.update_field(VehicleField::Year, "2020");
        form.update_field(VehicleField::LicensePlate, "ABC123");
    }

    fn collecting_sink(seen: &mut Vec<IntakeSubmission>) -> impl FnMut(&IntakeSubmission) -> Result<()> + '_ {
        move |submission| {
            seen.push(submission.clone());
            Ok(())
        }
    }

    #[test]
    fn starts_on_customer_stage_with_empty_fields() {
        let form = IntakeForm::new();
        assert_eq!(form.stage(), IntakeStage::Customer);
        assert_eq!(form.mode(), IntakeMode::Add);
        assert_eq!(form.customer(), &CustomerRecord::default());
        assert_eq!(form.vehicle(), &VehicleRecord::default());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn update_field_does_not_validate_before_first_attempt() {
        let mut form = IntakeForm::new();
        form.update_field(CustomerField::Name, "J");
        assert_eq!(form.value(CustomerField::Name), "J");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn advance_with_short_name_stays_on_customer() {
        let mut form = IntakeForm::new();
        fill_valid_customer(&mut form);
        form.update_field(CustomerField::Name, "J");

        let error = form.advance().expect_err("short name should block advance");
        let errors = error.field_errors().expect("validation error");
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(CustomerField::Name));
        assert_eq!(form.stage(), IntakeStage::Customer);
        assert_eq!(
            form.error(CustomerField::Name),
            Some("Name must be at least 2 characters")
        );
    }

    #[test]
    fn failed_advance_reports_all_errors_at_once() {
        let mut form = IntakeForm::new();
        let error = form.advance().expect_err("blank customer should fail");
        assert_eq!(error.field_errors().map(|errors| errors.len()), Some(3));
        assert_eq!(form.errors().len(), 3);
    }

    #[test]
    fn fixing_a_field_after_failed_attempt_clears_its_error() {
        let mut form = IntakeForm::new();
        fill_valid_customer(&mut form);
        form.update_field(CustomerField::Email, "not-an-email");
        assert!(form.advance().is_err());
        assert!(form.error(CustomerField::Email).is_some());

        form.update_field(CustomerField::Email, "john@exam");
        assert!(form.error(CustomerField::Email).is_some());

        form.update_field(CustomerField::Email, "john@example.com");
        assert!(form.error(CustomerField::Email).is_none());
        assert_eq!(form.stage(), IntakeStage::Customer);
    }

    #[test]
    fn advance_keeps_previously_entered_vehicle_values() -> Result<()> {
        let mut form = IntakeForm::new();
        form.update_field(VehicleField::Make, "Honda");
        form.update_field(VehicleField::Color, "Blue");
        fill_valid_customer(&mut form);

        form.advance()?;
        assert_eq!(form.stage(), IntakeStage::Vehicle);
        assert_eq!(form.value(VehicleField::Make), "Honda");
        assert_eq!(form.value(VehicleField::Color), "Blue");
        assert!(form.errors().is_empty());
        Ok(())
    }

    #[test]
    fn retreat_ignores_vehicle_validity_and_keeps_values() -> Result<()> {
        let mut form = IntakeForm::new();
        fill_valid_customer(&mut form);
        form.advance()?;
        form.update_field(VehicleField::Year, "20");

        form.retreat()?;
        assert_eq!(form.stage(), IntakeStage::Customer);
        assert_eq!(form.value(VehicleField::Year), "20");
        assert_eq!(form.value(CustomerField::Name), "John Smith");
        Ok(())
    }

    #[test]
    fn finalize_submits_merged_records_exactly_once() -> Result<()> {
        let mut form = IntakeForm::new();
        fill_valid_customer(&mut form);
        form.advance()?;
        fill_valid_vehicle(&mut form);

        let mut seen = Vec::new();
        let submission = form.finalize(&mut collecting_sink(&mut seen))?;

        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], submission);
        assert_eq!(submission.customer.name, "John Smith");
        assert_eq!(submission.vehicle.license_plate, "ABC123");
        assert_eq!(form.stage(), IntakeStage::Submitted);
        Ok(())
    }

    #[test]
    fn finalize_with_invalid_vehicle_does_not_call_sink() -> Result<()> {
        let mut form = IntakeForm::new();
        fill_valid_customer(&mut form);
        form.advance()?;
        fill_valid_vehicle(&mut form);
        form.update_field(VehicleField::Year, "20233");

        let mut seen = Vec::new();
        let error = form
            .finalize(&mut collecting_sink(&mut seen))
            .expect_err("bad year should fail");
        assert!(seen.is_empty());
        assert_eq!(form.stage(), IntakeStage::Vehicle);
        assert_eq!(
            error.field_errors().and_then(|errors| errors.get(VehicleField::Year)),
            Some("Year must be a 4-digit number")
        );
        Ok(())
    }

    #[test]
    fn finalize_uses_customer_snapshot_from_advance() -> Result<()> {
        let mut form = IntakeForm::new();
        fill_valid_customer(&mut form);
        form.advance()?;
        form.update_field(CustomerField::Name, "X");
        fill_valid_vehicle(&mut form);

        let mut seen = Vec::new();
        let submission = form.finalize(&mut collecting_sink(&mut seen))?;
        assert_eq!(submission.customer.name, "John Smith");
        Ok(())
    }

    #[test]
    fn re_advancing_refreshes_the_snapshot() -> Result<()> {
        let mut form = IntakeForm::new();
        fill_valid_customer(&mut form);
        form.advance()?;
        form.retreat()?;
        form.update_field(CustomerField::Name, "Jane Doe");
        form.advance()?;
        assert_eq!(
            form.confirmed_customer().map(|customer| customer.name.as_str()),
            Some("Jane Doe")
        );
        Ok(())
    }

    #[test]
    fn sink_failure_keeps_vehicle_stage() -> Result<()> {
        let mut form = IntakeForm::new();
        fill_valid_customer(&mut form);
        form.advance()?;
        fill_valid_vehicle(&mut form);

        let mut failing = |_: &IntakeSubmission| -> Result<()> { Err(anyhow!("backend down")) };
        let error = form.finalize(&mut failing).expect_err("sink error propagates");
        assert!(matches!(error, StepError::Submit(_)));
        assert!(error.to_string().contains("backend down"));
        assert_eq!(form.stage(), IntakeStage::Vehicle);
        Ok(())
    }

    #[test]
    fn wrong_stage_calls_change_nothing() {
        let mut form = IntakeForm::new();
        let before = form.clone();

        let retreat = form.retreat().expect_err("retreat from customer");
        assert!(matches!(
            retreat,
            StepError::WrongStage {
                action: StepAction::Retreat,
                stage: IntakeStage::Customer
            }
        ));

        let mut seen = Vec::new();
        let finalize = form
            .finalize(&mut collecting_sink(&mut seen))
            .expect_err("finalize from customer");
        assert!(matches!(finalize, StepError::WrongStage { .. }));
        assert!(seen.is_empty());
        assert_eq!(form, before);
    }

    #[test]
    fn submitted_form_rejects_further_steps() -> Result<()> {
        let mut form = IntakeForm::new();
        fill_valid_customer(&mut form);
        form.advance()?;
        fill_valid_vehicle(&mut form);
        let mut seen = Vec::new();
        form.finalize(&mut collecting_sink(&mut seen))?;

        assert!(form.advance().is_err());
        assert!(form.retreat().is_err());
        assert!(form.finalize(&mut collecting_sink(&mut seen)).is_err());
        assert_eq!(seen.len(), 1);
        Ok(())
    }

    #[test]
    fn initial_values_are_not_validated_up_front() {
        let form = IntakeForm::edit(
            CustomerRecord {
                name: "J".to_owned(),
                ..CustomerRecord::default()
            },
            VehicleRecord::default(),
        );
        assert_eq!(form.mode(), IntakeMode::Edit);
        assert_eq!(form.value(CustomerField::Name), "J");
        assert!(form.errors().is_empty());
        assert!(form.validate_stage(Stage::Customer).is_err());
    }

    #[test]
    fn validate_stage_returns_the_validated_record() {
        let mut form = IntakeForm::new();
        fill_valid_customer(&mut form);
        match form.validate_stage(Stage::Customer) {
            Ok(StageRecord::Customer(customer)) => assert_eq!(customer.phone, "5551234567"),
            other => panic!("unexpected validation result: {other:?}"),
        }
    }

    #[test]
    fn validate_field_gives_blur_feedback() {
        let mut form = IntakeForm::new();
        form.update_field(VehicleField::LicensePlate, "");
        assert_eq!(
            form.validate_field(VehicleField::LicensePlate),
            Some("License plate is required")
        );
        form.update_field(VehicleField::LicensePlate, "ABC");
        assert_eq!(form.validate_field(VehicleField::LicensePlate), None);
    }
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{DashboardTab, NavItem, UserRole, nav_items_for};

/// Which action opened the intake form. All of them open the same
/// two-stage form; editing pre-fills it from a service record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeEntry {
    AddCustomer,
    AddVehicle,
    EditRecord,
}

impl IntakeEntry {
    pub const fn label(self) -> &'static str {
        match self {
            Self::AddCustomer => "Add Customer",
            Self::AddVehicle => "Add Vehicle",
            Self::EditRecord => "Edit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Intake(IntakeEntry),
    Detail,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub role: UserRole,
    pub active_tab: DashboardTab,
    pub overlay: Overlay,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(UserRole::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    NextTab,
    PrevTab,
    SelectTab(DashboardTab),
    OpenIntake(IntakeEntry),
    OpenDetail,
    OpenHelp,
    CloseOverlay,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    TabChanged(DashboardTab),
    OverlayChanged(Overlay),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn new(role: UserRole) -> Self {
        Self {
            role,
            active_tab: DashboardTab::Upcoming,
            overlay: Overlay::None,
            status_line: None,
        }
    }

    pub fn visible_tabs(&self) -> Vec<DashboardTab> {
        DashboardTab::visible_tabs(self.role)
    }

    pub fn nav_items(&self) -> Vec<NavItem> {
        nav_items_for(self.role)
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextTab => self.rotate_tab(1),
            AppCommand::PrevTab => self.rotate_tab(-1),
            AppCommand::SelectTab(tab) => {
                if !tab.visible_to(self.role) {
                    return vec![self.set_status(&format!("{} is for admins", tab.label()))];
                }
                if tab == self.active_tab {
                    return Vec::new();
                }
                self.active_tab = tab;
                vec![AppEvent::TabChanged(tab)]
            }
            AppCommand::OpenIntake(entry) => self.set_overlay(Overlay::Intake(entry)),
            AppCommand::OpenDetail => self.set_overlay(Overlay::Detail),
            AppCommand::OpenHelp => self.set_overlay(Overlay::Help),
            AppCommand::CloseOverlay => self.set_overlay(Overlay::None),
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn rotate_tab(&mut self, delta: isize) -> Vec<AppEvent> {
        let tabs = self.visible_tabs();
        let current = tabs
            .iter()
            .position(|tab| *tab == self.active_tab)
            .unwrap_or(0) as isize;
        let len = tabs.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.active_tab = tabs[next];
        vec![AppEvent::TabChanged(self.active_tab)]
    }

    fn set_overlay(&mut self, overlay: Overlay) -> Vec<AppEvent> {
        if self.overlay == overlay {
            return Vec::new();
        }
        self.overlay = overlay;
        vec![AppEvent::OverlayChanged(overlay)]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppState, IntakeEntry, Overlay};
    use crate::{DashboardTab, UserRole};

    #[test]
    fn admin_tab_rotation_wraps_through_analytics() {
        let mut state = AppState::new(UserRole::Admin);

        state.dispatch(AppCommand::NextTab);
        assert_eq!(state.active_tab, DashboardTab::Recent);
        state.dispatch(AppCommand::NextTab);
        assert_eq!(state.active_tab, DashboardTab::Analytics);
        let events = state.dispatch(AppCommand::NextTab);
        assert_eq!(state.active_tab, DashboardTab::Upcoming);
        assert_eq!(events, vec![AppEvent::TabChanged(DashboardTab::Upcoming)]);
    }

    #[test]
    fn staff_rotation_skips_analytics() {
        let mut state = AppState::new(UserRole::Staff);

        state.dispatch(AppCommand::NextTab);
        assert_eq!(state.active_tab, DashboardTab::Recent);
        state.dispatch(AppCommand::NextTab);
        assert_eq!(state.active_tab, DashboardTab::Upcoming);
        state.dispatch(AppCommand::PrevTab);
        assert_eq!(state.active_tab, DashboardTab::Recent);
    }

    #[test]
    fn staff_cannot_select_analytics() {
        let mut state = AppState::new(UserRole::Staff);

        let events = state.dispatch(AppCommand::SelectTab(DashboardTab::Analytics));
        assert_eq!(state.active_tab, DashboardTab::Upcoming);
        assert_eq!(
            events,
            vec![AppEvent::StatusUpdated("Analytics is for admins".to_owned())]
        );
    }

    #[test]
    fn selecting_the_active_tab_is_quiet() {
        let mut state = AppState::default();
        assert!(state.dispatch(AppCommand::SelectTab(DashboardTab::Upcoming)).is_empty());
    }

    #[test]
    fn overlays_open_and_close() {
        let mut state = AppState::default();

        let opened = state.dispatch(AppCommand::OpenIntake(IntakeEntry::AddVehicle));
        assert_eq!(state.overlay, Overlay::Intake(IntakeEntry::AddVehicle));
        assert_eq!(
            opened,
            vec![AppEvent::OverlayChanged(Overlay::Intake(IntakeEntry::AddVehicle))]
        );

        state.dispatch(AppCommand::CloseOverlay);
        assert_eq!(state.overlay, Overlay::None);
        assert!(state.dispatch(AppCommand::CloseOverlay).is_empty());
    }

    #[test]
    fn status_set_and_clear() {
        let mut state = AppState::default();

        state.dispatch(AppCommand::SetStatus("saved".to_owned()));
        assert_eq!(state.status_line.as_deref(), Some("saved"));

        let events = state.dispatch(AppCommand::ClearStatus);
        assert!(state.status_line.is_none());
        assert_eq!(events, vec![AppEvent::StatusCleared]);
    }

    #[test]
    fn nav_items_depend_on_role() {
        assert_eq!(AppState::new(UserRole::Admin).nav_items().len(), 9);
        let staff = AppState::new(UserRole::Staff).nav_items();
        assert_eq!(staff.len(), 6);
        assert!(staff.iter().all(|item| !item.admin_only));
    }
}

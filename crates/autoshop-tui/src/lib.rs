// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use autoshop_app::{
    ACTIVE_NAV_HREF, AppCommand, AppEvent, AppState, CustomerRecord, DashboardCounts,
    DashboardTab, EMPTY_MESSAGE, IntakeEntry, IntakeField, IntakeForm, IntakeStage,
    IntakeSubmission, Overlay, SEARCH_PLACEHOLDER, ServiceDetail, ServiceRecord, ServiceTable,
    Stage, StatusFilter, StatusTone, StepError, TableOptions, VehicleRecord,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

const BRAND: &str = "AutoService";
const SIDEBAR_WIDTH: u16 = 34;
const ANALYTICS_PLACEHOLDER: &str = "Analytics charts would be displayed here";
const ACTIVE_MARK: &str = "▸";
const CURSOR_MARK: &str = "█";

pub trait AppRuntime {
    fn load_dashboard_counts(&mut self) -> Result<DashboardCounts>;
    fn load_service_records(&mut self, tab: DashboardTab) -> Result<Vec<ServiceRecord>>;
    fn submit_intake(&mut self, submission: &IntakeSubmission) -> Result<()>;
}

/// Display settings that do not change while the app runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    pub user_name: String,
    pub user_email: String,
    pub show_filters: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            user_name: "John Doe".to_owned(),
            user_email: "john@example.com".to_owned(),
            show_filters: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum TableFocus {
    #[default]
    Rows,
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct IntakeUiState {
    entry: IntakeEntry,
    form: IntakeForm,
    field_index: usize,
}

impl IntakeUiState {
    fn new(entry: IntakeEntry, form: IntakeForm) -> Self {
        Self {
            entry,
            form,
            field_index: 0,
        }
    }

    fn fields(&self) -> Vec<IntakeField> {
        self.form
            .stage()
            .stage()
            .map(IntakeField::for_stage)
            .unwrap_or_default()
    }

    fn focused(&self) -> Option<IntakeField> {
        self.fields().get(self.field_index).copied()
    }

    fn focus_first_error(&mut self) {
        let fields = self.fields();
        if let Some(index) = fields
            .iter()
            .position(|field| self.form.errors().contains(*field))
        {
            self.field_index = index;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    options: ViewOptions,
    counts: DashboardCounts,
    table: ServiceTable,
    cursor: usize,
    focus: TableFocus,
    intake: Option<IntakeUiState>,
    status_token: u64,
}

impl ViewData {
    fn new(options: ViewOptions) -> Self {
        Self {
            table: ServiceTable::with_options(
                Vec::new(),
                TableOptions {
                    show_filters: options.show_filters,
                    ..TableOptions::default()
                },
            ),
            options,
            ..Self::default()
        }
    }
}

pub fn run_app<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    options: ViewOptions,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::new(options);
    let (internal_tx, internal_rx) = mpsc::channel();

    if let Err(error) = refresh_view_data(state, runtime, &mut view_data) {
        warn!(error = %format!("{error:#}"), "initial load failed");
        state.dispatch(AppCommand::SetStatus(format!("load failed: {error}")));
    }

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match state.overlay {
        Overlay::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                state.dispatch(AppCommand::CloseOverlay);
            }
            return false;
        }
        Overlay::Detail => {
            handle_detail_key(state, view_data, internal_tx, key);
            return false;
        }
        Overlay::Intake(_) => {
            handle_intake_key(state, runtime, view_data, internal_tx, key);
            return false;
        }
        Overlay::None => {}
    }

    if view_data.focus == TableFocus::Search {
        handle_search_key(view_data, key);
        return false;
    }

    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return false;
    }

    match key.code {
        KeyCode::Char('f') | KeyCode::Tab => {
            dispatch_and_refresh(state, runtime, view_data, AppCommand::NextTab, internal_tx);
        }
        KeyCode::Char('b') | KeyCode::BackTab => {
            dispatch_and_refresh(state, runtime, view_data, AppCommand::PrevTab, internal_tx);
        }
        KeyCode::Char(digit @ '1'..='3') => {
            let index = (digit as usize) - ('1' as usize);
            let tab = DashboardTab::ALL[index];
            dispatch_and_refresh(
                state,
                runtime,
                view_data,
                AppCommand::SelectTab(tab),
                internal_tx,
            );
        }
        KeyCode::Char('c') => open_intake(state, view_data, IntakeEntry::AddCustomer, None),
        KeyCode::Char('v') => open_intake(state, view_data, IntakeEntry::AddVehicle, None),
        KeyCode::Char('?') => {
            state.dispatch(AppCommand::OpenHelp);
        }
        _ => handle_table_key(state, view_data, internal_tx, key),
    }
    false
}

fn handle_table_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let is_table_key = matches!(
        key.code,
        KeyCode::Char('j' | 'k' | 'g' | 'G' | '/' | 's' | 'S' | 'x' | 'e')
            | KeyCode::Down
            | KeyCode::Up
            | KeyCode::Enter
    );
    if !is_table_key {
        return;
    }
    if !tab_has_table(state.active_tab) {
        emit_status(state, view_data, internal_tx, "no records on this tab");
        return;
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => move_cursor(view_data, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(view_data, -1),
        KeyCode::Char('g') => view_data.cursor = 0,
        KeyCode::Char('G') => {
            view_data.cursor = view_data.table.filtered().len().saturating_sub(1);
        }
        KeyCode::Enter => {
            if view_data.table.select_filtered(view_data.cursor) {
                state.dispatch(AppCommand::OpenDetail);
            } else {
                emit_status(state, view_data, internal_tx, EMPTY_MESSAGE);
            }
        }
        KeyCode::Char('e') => edit_row(state, view_data, internal_tx),
        KeyCode::Char('/' | 's' | 'S' | 'x') if !view_data.table.options().show_filters => {
            emit_status(state, view_data, internal_tx, "filters are hidden");
        }
        KeyCode::Char('/') => view_data.focus = TableFocus::Search,
        KeyCode::Char('s') => cycle_status_filter(state, view_data, internal_tx, 1),
        KeyCode::Char('S') => cycle_status_filter(state, view_data, internal_tx, -1),
        KeyCode::Char('x') => {
            view_data.table.set_search_term("");
            view_data.table.set_filter(StatusFilter::All);
            clamp_cursor(view_data);
            emit_status(state, view_data, internal_tx, "filters cleared");
        }
        _ => {}
    }
}

fn handle_search_key(view_data: &mut ViewData, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => view_data.focus = TableFocus::Rows,
        KeyCode::Esc => {
            view_data.table.set_search_term("");
            view_data.focus = TableFocus::Rows;
        }
        KeyCode::Backspace => {
            let mut term = view_data.table.search_term().to_owned();
            term.pop();
            view_data.table.set_search_term(term);
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let term = format!("{}{ch}", view_data.table.search_term());
            view_data.table.set_search_term(term);
        }
        _ => {}
    }
    clamp_cursor(view_data);
}

fn handle_detail_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            view_data.table.close_detail();
            state.dispatch(AppCommand::CloseOverlay);
        }
        KeyCode::Char('e') => {
            view_data.table.close_detail();
            state.dispatch(AppCommand::CloseOverlay);
            edit_row(state, view_data, internal_tx);
        }
        _ => {}
    }
}

fn open_intake(
    state: &mut AppState,
    view_data: &mut ViewData,
    entry: IntakeEntry,
    form: Option<IntakeForm>,
) {
    view_data.intake = Some(IntakeUiState::new(entry, form.unwrap_or_default()));
    state.dispatch(AppCommand::OpenIntake(entry));
    debug!(entry = entry.label(), "intake opened");
}

fn edit_row(state: &mut AppState, view_data: &mut ViewData, internal_tx: &Sender<InternalEvent>) {
    let record = view_data
        .table
        .filtered()
        .get(view_data.cursor)
        .map(|record| (*record).clone());
    let Some(record) = record else {
        emit_status(state, view_data, internal_tx, EMPTY_MESSAGE);
        return;
    };
    let (customer, vehicle) = intake_values_for(&record);
    open_intake(
        state,
        view_data,
        IntakeEntry::EditRecord,
        Some(IntakeForm::edit(customer, vehicle)),
    );
}

/// Pre-fill values for editing the customer and vehicle behind a record.
fn intake_values_for(record: &ServiceRecord) -> (CustomerRecord, VehicleRecord) {
    let customer = CustomerRecord {
        name: record.customer_name.clone(),
        ..CustomerRecord::default()
    };
    let vehicle = VehicleRecord {
        make: record.vehicle_info.make.clone(),
        model: record.vehicle_info.model.clone(),
        year: record
            .vehicle_info
            .year
            .map(|year| year.to_string())
            .unwrap_or_default(),
        license_plate: record.vehicle_info.license_plate.clone(),
        last_service_date: record.date.clone(),
        ..VehicleRecord::default()
    };
    (customer, vehicle)
}

enum IntakeOutcome {
    Nothing,
    Status(String),
    Canceled,
    Saved(IntakeSubmission, IntakeEntry),
}

fn handle_intake_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let Some(intake) = view_data.intake.as_mut() else {
        state.dispatch(AppCommand::CloseOverlay);
        return;
    };
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    let outcome = match key.code {
        KeyCode::Esc => IntakeOutcome::Canceled,
        KeyCode::Enter => submit_intake_step(intake, runtime),
        KeyCode::Char('s') if ctrl => submit_intake_step(intake, runtime),
        KeyCode::Char('b') if ctrl => match intake.form.retreat() {
            Ok(()) => {
                intake.field_index = 0;
                IntakeOutcome::Nothing
            }
            Err(error) => IntakeOutcome::Status(error.to_string()),
        },
        KeyCode::Tab | KeyCode::Down => {
            move_intake_field(intake, 1);
            IntakeOutcome::Nothing
        }
        KeyCode::BackTab | KeyCode::Up => {
            move_intake_field(intake, -1);
            IntakeOutcome::Nothing
        }
        KeyCode::Backspace => {
            if let Some(field) = intake.focused() {
                let mut value = intake.form.value(field).to_owned();
                value.pop();
                intake.form.update_field(field, value);
            }
            IntakeOutcome::Nothing
        }
        KeyCode::Char(ch) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            if let Some(field) = intake.focused() {
                let value = format!("{}{ch}", intake.form.value(field));
                intake.form.update_field(field, value);
            }
            IntakeOutcome::Nothing
        }
        _ => IntakeOutcome::Nothing,
    };

    match outcome {
        IntakeOutcome::Nothing => {}
        IntakeOutcome::Status(message) => emit_status(state, view_data, internal_tx, message),
        IntakeOutcome::Canceled => {
            view_data.intake = None;
            state.dispatch(AppCommand::CloseOverlay);
            emit_status(state, view_data, internal_tx, "intake canceled");
        }
        IntakeOutcome::Saved(submission, entry) => {
            view_data.intake = None;
            state.dispatch(AppCommand::CloseOverlay);
            if let Err(error) = refresh_view_data(state, runtime, view_data) {
                emit_status(
                    state,
                    view_data,
                    internal_tx,
                    format!("load failed: {error}"),
                );
                return;
            }
            let verb = if entry == IntakeEntry::EditRecord {
                "updated"
            } else {
                "saved"
            };
            emit_status(
                state,
                view_data,
                internal_tx,
                format!(
                    "{verb} {} with vehicle {}",
                    submission.customer.name, submission.vehicle.license_plate
                ),
            );
        }
    }
}

fn submit_intake_step<R: AppRuntime>(intake: &mut IntakeUiState, runtime: &mut R) -> IntakeOutcome {
    match intake.form.stage() {
        IntakeStage::Customer => match intake.form.advance() {
            Ok(()) => {
                intake.field_index = 0;
                IntakeOutcome::Nothing
            }
            Err(error) => {
                intake.focus_first_error();
                IntakeOutcome::Status(error.to_string())
            }
        },
        IntakeStage::Vehicle => {
            let mut sink = |submission: &IntakeSubmission| runtime.submit_intake(submission);
            match intake.form.finalize(&mut sink) {
                Ok(submission) => IntakeOutcome::Saved(submission, intake.entry),
                Err(error @ StepError::Invalid(_)) => {
                    intake.focus_first_error();
                    IntakeOutcome::Status(error.to_string())
                }
                Err(error) => {
                    warn!(error = %error, "intake submission failed");
                    IntakeOutcome::Status(error.to_string())
                }
            }
        }
        IntakeStage::Submitted => IntakeOutcome::Nothing,
    }
}

/// Moving off a field the user typed into gives immediate feedback on it.
fn move_intake_field(intake: &mut IntakeUiState, delta: isize) {
    let fields = intake.fields();
    if fields.is_empty() {
        return;
    }
    if let Some(field) = intake.focused()
        && !intake.form.value(field).is_empty()
    {
        intake.form.validate_field(field);
    }
    let len = fields.len() as isize;
    intake.field_index = (intake.field_index as isize + delta).rem_euclid(len) as usize;
}

fn cycle_status_filter(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    delta: isize,
) {
    let choices = StatusFilter::choices();
    let current = choices
        .iter()
        .position(|choice| choice == view_data.table.status_filter())
        .unwrap_or(0) as isize;
    let next = (current + delta).rem_euclid(choices.len() as isize) as usize;
    let filter = choices[next].clone();
    let label = format!("status: {}", filter.label());
    view_data.table.set_filter(filter);
    clamp_cursor(view_data);
    emit_status(state, view_data, internal_tx, label);
}

fn move_cursor(view_data: &mut ViewData, delta: isize) {
    let len = view_data.table.filtered().len();
    if len == 0 {
        view_data.cursor = 0;
        return;
    }
    let next = (view_data.cursor as isize + delta).clamp(0, len as isize - 1);
    view_data.cursor = next as usize;
}

fn clamp_cursor(view_data: &mut ViewData) {
    let len = view_data.table.filtered().len();
    view_data.cursor = view_data.cursor.min(len.saturating_sub(1));
}

fn tab_has_table(tab: DashboardTab) -> bool {
    tab != DashboardTab::Analytics
}

fn table_options_for(tab: DashboardTab, show_filters: bool) -> TableOptions {
    TableOptions {
        title: tab.label().to_owned(),
        show_filters,
        show_due_date: tab.shows_due_date(),
    }
}

fn dispatch_and_refresh<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    command: AppCommand,
    internal_tx: &Sender<InternalEvent>,
) {
    let events = state.dispatch(command);
    if should_refresh_view(&events)
        && let Err(error) = refresh_view_data(state, runtime, view_data)
    {
        emit_status(
            state,
            view_data,
            internal_tx,
            format!("load failed: {error}"),
        );
    }
    if events
        .iter()
        .any(|event| matches!(event, AppEvent::StatusUpdated(_)))
    {
        view_data.status_token = view_data.status_token.saturating_add(1);
        schedule_status_clear(internal_tx, view_data.status_token);
    }
}

fn should_refresh_view(events: &[AppEvent]) -> bool {
    events
        .iter()
        .any(|event| matches!(event, AppEvent::TabChanged(_)))
}

fn refresh_view_data<R: AppRuntime>(
    state: &AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
) -> Result<()> {
    view_data.counts = runtime.load_dashboard_counts()?;
    let tab = state.active_tab;
    let records = if tab_has_table(tab) {
        runtime.load_service_records(tab)?
    } else {
        Vec::new()
    };
    view_data
        .table
        .set_options(table_options_for(tab, view_data.options.show_filters));
    view_data.table.replace_records(records);
    view_data.focus = TableFocus::Rows;
    clamp_cursor(view_data);
    Ok(())
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(40)])
        .split(frame.area());

    let sidebar = Paragraph::new(render_sidebar_text(state, &view_data.options)).block(
        Block::default()
            .title(BRAND)
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::White)),
    );
    frame.render_widget(sidebar, columns[0]);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(columns[1]);

    let header = Paragraph::new(Line::from(vec![
        Span::styled("Dashboard", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("   c Add Customer | v Add Vehicle"),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, main[0]);

    render_cards(frame, main[1], state, view_data);

    let tabs = state.visible_tabs();
    let selected = tabs
        .iter()
        .position(|tab| *tab == state.active_tab)
        .unwrap_or(0);
    let tab_widget = Tabs::new(tabs.iter().map(|tab| tab.label()).collect::<Vec<_>>())
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tab_widget, main[2]);

    if tab_has_table(state.active_tab) {
        render_table(frame, main[3], view_data);
    } else {
        let analytics = Paragraph::new(render_analytics_text(&view_data.counts)).block(
            Block::default()
                .title("Service Analytics")
                .borders(Borders::ALL),
        );
        frame.render_widget(analytics, main[3]);
    }

    let status = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, main[4]);

    match state.overlay {
        Overlay::None => {}
        Overlay::Intake(_) => {
            if let Some(intake) = &view_data.intake {
                let area = centered_rect(70, 80, frame.area());
                frame.render_widget(Clear, area);
                let form = Paragraph::new(render_intake_text(intake))
                    .wrap(Wrap { trim: false })
                    .block(
                        Block::default()
                            .title(intake.form.mode().title())
                            .borders(Borders::ALL)
                            .style(Style::default().fg(Color::Cyan)),
                    );
                frame.render_widget(form, area);
            }
        }
        Overlay::Detail => {
            if let Some(detail) = view_data.table.detail() {
                let area = centered_rect(70, 80, frame.area());
                frame.render_widget(Clear, area);
                let panel = Paragraph::new(render_detail_text(&detail))
                    .wrap(Wrap { trim: false })
                    .block(
                        Block::default()
                            .title("Service Details")
                            .borders(Borders::ALL),
                    );
                frame.render_widget(panel, area);
            }
        }
        Overlay::Help => {
            let area = centered_rect(70, 60, frame.area());
            frame.render_widget(Clear, area);
            let help = Paragraph::new(help_overlay_text())
                .block(Block::default().title("help").borders(Borders::ALL));
            frame.render_widget(help, area);
        }
    }
}

fn render_cards(frame: &mut ratatui::Frame<'_>, area: Rect, state: &AppState, view_data: &ViewData) {
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25); 4])
        .split(area);
    for (slot, card) in slots.iter().zip(view_data.counts.cards(state.role)) {
        let body = Paragraph::new(vec![
            Line::from(Span::styled(
                card.value,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                card.caption,
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(Block::default().title(card.title).borders(Borders::ALL));
        frame.render_widget(body, *slot);
    }
}

fn render_table(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    let table = &view_data.table;
    let options = table.options();
    let block = Block::default()
        .title(options.title.as_str())
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (filter_area, rows_area) = if options.show_filters {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(inner);
        (Some(split[0]), split[1])
    } else {
        (None, inner)
    };

    if let Some(filter_area) = filter_area {
        let bar = Paragraph::new(render_filter_bar(view_data))
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(bar, filter_area);
    }

    let header = Row::new(table_headers(options).into_iter().map(|label| {
        Cell::from(label).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let records = table.filtered();
    let rows = if records.is_empty() {
        vec![Row::new([Cell::from(EMPTY_MESSAGE)])]
    } else {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let tone = record.status.tone();
                let status_column = 4;
                let cells = table_cells(record, options.show_due_date)
                    .into_iter()
                    .enumerate()
                    .map(|(column, text)| {
                        let style = if column == status_column {
                            Style::default().fg(tone_color(tone))
                        } else {
                            Style::default()
                        };
                        Cell::from(text).style(style)
                    })
                    .collect::<Vec<_>>();
                let mut row = Row::new(cells).height(2);
                if index == view_data.cursor {
                    row = row.style(Style::default().bg(Color::DarkGray));
                }
                row
            })
            .collect()
    };

    let widths = column_widths(options.show_due_date);
    let widget = Table::new(rows, widths).header(header).column_spacing(1);
    frame.render_widget(widget, rows_area);
}

fn table_headers(options: &TableOptions) -> Vec<&'static str> {
    let mut headers = vec!["Date", "Vehicle", "Customer", "Service Type", "Status"];
    if options.show_due_date {
        headers.push("Due Date");
    }
    headers
}

fn column_widths(show_due_date: bool) -> Vec<Constraint> {
    let mut widths = vec![
        Constraint::Length(11),
        Constraint::Min(18),
        Constraint::Min(14),
        Constraint::Min(14),
        Constraint::Length(12),
    ];
    if show_due_date {
        widths.push(Constraint::Length(11));
    }
    widths
}

fn table_cells(record: &ServiceRecord, show_due_date: bool) -> Vec<String> {
    let mut cells = vec![
        record.date.clone(),
        format!("{}\n{}", record.vehicle_title(), record.vehicle_subtitle()),
        record.customer_name.clone(),
        record.service_type.clone(),
        record.status.label().to_owned(),
    ];
    if show_due_date {
        cells.push(record.next_service_date.clone().unwrap_or_default());
    }
    cells
}

fn tone_color(tone: StatusTone) -> Color {
    match tone {
        StatusTone::Success => Color::Green,
        StatusTone::Info => Color::Blue,
        StatusTone::Warning => Color::Yellow,
        StatusTone::Danger => Color::Red,
        StatusTone::Neutral => Color::Gray,
    }
}

fn render_filter_bar(view_data: &ViewData) -> String {
    let table = &view_data.table;
    let search = match (view_data.focus, table.search_term()) {
        (TableFocus::Search, term) => format!("{term}{CURSOR_MARK}"),
        (TableFocus::Rows, "") => SEARCH_PLACEHOLDER.to_owned(),
        (TableFocus::Rows, term) => term.to_owned(),
    };
    format!(
        "/ {search}   s {}   {} shown",
        table.status_filter().label(),
        table.filtered().len()
    )
}

fn render_sidebar_text(state: &AppState, options: &ViewOptions) -> String {
    let mut lines = Vec::new();
    let mut admin_header_shown = false;
    for item in state.nav_items() {
        if item.admin_only && !admin_header_shown {
            lines.push(String::new());
            lines.push("ADMIN".to_owned());
            admin_header_shown = true;
        }
        let marker = if item.href == ACTIVE_NAV_HREF {
            ACTIVE_MARK
        } else {
            " "
        };
        lines.push(format!("{marker} {:<18}{}", item.label, item.href));
    }
    lines.push(String::new());
    lines.push(options.user_name.clone());
    lines.push(options.user_email.clone());
    lines.push(state.role.as_str().to_owned());
    lines.join("\n")
}

fn render_analytics_text(counts: &DashboardCounts) -> String {
    [
        ANALYTICS_PLACEHOLDER.to_owned(),
        String::new(),
        format!("customers: {}", counts.customers),
        format!("vehicles: {}", counts.vehicles),
        format!("upcoming: {}", counts.upcoming),
        format!("completed: {}", counts.completed),
        format!("reminders: {}", counts.reminders),
    ]
    .join("\n")
}

fn render_intake_text(intake: &IntakeUiState) -> String {
    let form = &intake.form;
    let mut lines = vec![form.mode().description().to_owned(), String::new()];

    let active = form.stage().stage();
    let steps = [Stage::Customer, Stage::Vehicle]
        .into_iter()
        .enumerate()
        .map(|(index, stage)| {
            let mark = if Some(stage) == active { "●" } else { "○" };
            format!("{mark} {}. {}", index + 1, stage.label())
        })
        .collect::<Vec<_>>();
    lines.push(steps.join("   "));
    lines.push(String::new());

    let focused = intake.focused();
    for field in intake.fields() {
        let value = form.value(field);
        let is_focused = Some(field) == focused;
        let shown = match (value.is_empty(), is_focused) {
            (true, true) => format!("{CURSOR_MARK} e.g. {}", field.placeholder()),
            (true, false) => format!("e.g. {}", field.placeholder()),
            (false, true) => format!("{value}{CURSOR_MARK}"),
            (false, false) => value.to_owned(),
        };
        let marker = if is_focused { ACTIVE_MARK } else { " " };
        lines.push(format!("{marker} {}: {shown}", field.label()));
        if let Some(message) = form.error(field) {
            lines.push(format!("    ! {message}"));
        }
    }

    lines.push(String::new());
    let primary = match form.stage() {
        IntakeStage::Customer => "Next",
        IntakeStage::Vehicle | IntakeStage::Submitted => form.mode().submit_label(),
    };
    let back = if form.stage() == IntakeStage::Vehicle {
        " | ctrl+b Back"
    } else {
        ""
    };
    lines.push(format!(
        "enter {primary}{back} | tab/shift+tab field | esc cancel"
    ));
    lines.join("\n")
}

fn render_detail_text(detail: &ServiceDetail) -> String {
    let mut lines = vec![
        format!("Customer: {}", detail.customer),
        format!("Service Date: {}", detail.service_date),
        format!("Vehicle: {}", detail.vehicle),
        detail.license.clone(),
        format!("Service Type: {}", detail.service_type),
        format!("Status: {}", detail.status_label),
    ];
    if let Some(next) = &detail.next_service_date {
        lines.push(format!("Next Service Due: {next}"));
    }

    lines.push(String::new());
    lines.push("Service Details".to_owned());
    if detail.notes.is_empty() {
        lines.push("No service notes recorded.".to_owned());
    } else {
        lines.push(detail.notes.clone());
    }

    lines.push(String::new());
    lines.push("Parts Used".to_owned());
    if detail.parts.is_empty() {
        lines.push("No parts recorded.".to_owned());
    } else {
        lines.push(format!("{:<28} {:>8} {:>10}", "Part", "Qty", "Price"));
        for part in &detail.parts {
            lines.push(format!(
                "{:<28} {:>8} {:>10}",
                part.name, part.quantity, part.price
            ));
        }
        if let Some(total) = &detail.parts_total {
            lines.push(format!("{:<28} {:>8} {:>10}", "Total", "", total));
        }
    }

    lines.push(String::new());
    lines.push("esc close | e edit".to_owned());
    lines.join("\n")
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | ? help\n\
tabs: f/b or tab/shift+tab next/prev | 1-3 jump\n\
table: j/k move | g/G first/last | enter details | e edit\n\
filters: / search | s/S status | x clear\n\
intake: c add customer | v add vehicle\n\
form: type to edit | tab/shift+tab field | enter next/save | ctrl+b back | esc cancel"
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    let default = match state.overlay {
        Overlay::Intake(_) => "type to edit | enter next/save | esc cancel",
        Overlay::Detail => "esc close | e edit",
        Overlay::Help => "esc close help",
        Overlay::None if view_data.focus == TableFocus::Search => "type to search | enter done | esc clear",
        Overlay::None => "j/k move | enter details | / search | s status | c/v add | f/b tabs | ? help | ctrl+q quit",
    };
    match &state.status_line {
        Some(status) => format!("{status} | {default}"),
        None => default.to_owned(),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Exlibris-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Exlibris and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! The interactive cataloging shell (ratatui + crossterm): the book form on
//! the left, the shelving tree and submission preview on the right. ISBN
//! lookups run on the tokio runtime and land in the shared [`UiState`],
//! which the draw loop drains every tick.

use std::{
    error::Error,
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tokio::runtime::Handle;
use tokio::sync::Mutex;

use crate::model::{DraftField, EntityKind, Resolution, UnresolvedItem};
use crate::reconcile::{
    apply_autofill, lookup_for_autofill, ApplyFailure, ApplyReport, AutofillReport, CancelToken,
    DisambiguationSession, PendingAutofill,
};
use crate::services::{Catalog, CatalogService};
use crate::ui::{LookupOutcome, UiState};
use crate::widget::{BookForm, FormSubmission, TaggedMultiSelect, TreeMarker, TreeRow};

mod theme;

use theme::TuiTheme;

const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_TOAST_COLOR: Color = Color::LightYellow;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "🅴 🆇 🅻 🅸 🅱 🆁 🅸 🆂 ";

/// Width of the label column in the form panel.
const FORM_LABEL_WIDTH: usize = 13;

const TOAST_TTL: Duration = Duration::from_secs(4);

/// Runs the interactive cataloging form over `catalog` until the user quits.
///
/// The caller owns the runtime: lookups are spawned onto `runtime` and
/// publish their outcome through `ui_state`. The loop polls input with a
/// 250ms timeout so in-flight lookups surface without a keypress.
pub fn run(
    catalog: Catalog,
    ui_state: Arc<Mutex<UiState>>,
    runtime: Handle,
) -> Result<(), Box<dyn Error>> {
    let theme = TuiTheme::from_env()?;
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(catalog, theme, ui_state, runtime);

    while !app.should_quit {
        app.sync_from_ui_state();
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

/// Modal state for the name-linking overlay.
///
/// While `session` is present the user is deciding; after an apply pass a
/// non-empty `failures` list keeps the overlay up one more round so the
/// refusals are visible.
struct DisambiguationOverlay {
    session: Option<DisambiguationSession>,
    cursor: usize,
    failures: Vec<ApplyFailure>,
}

impl DisambiguationOverlay {
    fn deciding(session: DisambiguationSession) -> Self {
        Self { session: Some(session), cursor: 0, failures: Vec::new() }
    }

    fn failed(failures: Vec<ApplyFailure>) -> Self {
        Self { session: None, cursor: 0, failures }
    }

    fn decision_count(&self) -> usize {
        self.session.as_ref().map(DisambiguationSession::total_len).unwrap_or(0)
    }

    /// The apply row sits below the last item.
    fn last_row(&self) -> usize {
        self.decision_count()
    }

    fn on_apply_row(&self) -> bool {
        self.cursor == self.last_row()
    }

    /// Maps a cursor row to the item it addresses; `None` for the apply row.
    fn row_target(&self, row: usize) -> Option<(EntityKind, usize)> {
        let session = self.session.as_ref()?;
        let authors = session.len(EntityKind::Author);
        if row < authors {
            Some((EntityKind::Author, row))
        } else if row < session.total_len() {
            Some((EntityKind::Tag, row - authors))
        } else {
            None
        }
    }

    fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn cursor_down(&mut self) {
        self.cursor = (self.cursor + 1).min(self.last_row());
    }

    fn cycle_resolution(&mut self, forward: bool) {
        let Some((kind, index)) = self.row_target(self.cursor) else {
            return;
        };
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(item) = session.item(kind, index) else {
            return;
        };
        let Some(current) = session.resolution(kind, index) else {
            return;
        };
        let next = cycled_resolution(item, current, forward);
        session.set_resolution(kind, index, next);
    }
}

/// The next (or previous) stop on an item's resolution wheel: each
/// candidate in score order, then creation, then ignore, wrapping around.
fn cycled_resolution(item: &UnresolvedItem, current: &Resolution, forward: bool) -> Resolution {
    let candidates = item.candidates().len();
    let stops = candidates + 2;
    let position = match current {
        Resolution::UseExisting(value) => item
            .candidates()
            .iter()
            .position(|scored| scored.choice().value() == value)
            .unwrap_or(0),
        Resolution::CreateNew(_) => candidates,
        Resolution::Ignore => candidates + 1,
    };
    let position = if forward {
        (position + 1) % stops
    } else {
        (position + stops - 1) % stops
    };
    match item.candidates().get(position) {
        Some(scored) => Resolution::UseExisting(scored.choice().value().clone()),
        None if position == candidates => Resolution::CreateNew(item.source_text().to_owned()),
        None => Resolution::Ignore,
    }
}

struct App {
    form: BookForm,
    service: Arc<CatalogService>,
    runtime: Handle,
    ui_state: Arc<Mutex<UiState>>,
    ui_state_rev: u64,
    theme: TuiTheme,
    focus: Focus,
    location_state: ListState,
    location_query: String,
    disambiguation: Option<DisambiguationOverlay>,
    lookup_in_flight: bool,
    show_help: bool,
    help_scroll: u16,
    help_viewport_height: u16,
    toast: Option<Toast>,
    should_quit: bool,
}

impl App {
    fn new(
        catalog: Catalog,
        theme: TuiTheme,
        ui_state: Arc<Mutex<UiState>>,
        runtime: Handle,
    ) -> Self {
        let form = BookForm::new(
            catalog.choices(EntityKind::Author),
            catalog.choices(EntityKind::Tag),
            catalog.locations().to_vec(),
        );
        let service = Arc::new(CatalogService::new(catalog));

        let mut location_state = ListState::default();
        if !form.location().visible_rows().is_empty() {
            location_state.select(Some(0));
        }

        Self {
            form,
            service,
            runtime,
            ui_state,
            ui_state_rev: 0,
            theme,
            focus: Focus::Title,
            location_state,
            location_query: String::new(),
            disambiguation: None,
            lookup_in_flight: false,
            show_help: false,
            help_scroll: 0,
            help_viewport_height: 0,
            toast: None,
            should_quit: false,
        }
    }

    /// Drains whatever the runtime published since the last tick.
    fn sync_from_ui_state(&mut self) {
        let outcome = {
            let mut ui_state = self.ui_state.blocking_lock();
            self.lookup_in_flight = ui_state.lookup_in_flight();
            if ui_state.rev() == self.ui_state_rev {
                return;
            }
            let outcome = ui_state.take_lookup_outcome();
            self.ui_state_rev = ui_state.rev();
            outcome
        };

        match outcome {
            Some(LookupOutcome::Fetched(pending)) => self.finish_autofill(*pending),
            Some(LookupOutcome::NoRecord) => self.set_toast("No record for that ISBN"),
            Some(LookupOutcome::Failed(message)) => self.set_toast(message),
            None => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_key_code(key.code) {
            self.should_quit = true;
        }
    }

    /// Returns `true` when the key asks to leave the program.
    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        if self.show_help {
            match code {
                KeyCode::Esc | KeyCode::F(1) => self.show_help = false,
                KeyCode::Down | KeyCode::Char('j') => self.help_scroll_by(1),
                KeyCode::Up | KeyCode::Char('k') => self.help_scroll_by(-1),
                KeyCode::PageDown => self.help_scroll_page(1),
                KeyCode::PageUp => self.help_scroll_page(-1),
                KeyCode::Home => self.help_scroll = 0,
                KeyCode::End => self.help_scroll = u16::MAX,
                _ => {}
            }
            return false;
        }

        if self.disambiguation.is_some() {
            self.handle_overlay_key(code);
            return false;
        }

        match code {
            KeyCode::F(1) => self.toggle_help(),
            KeyCode::Tab => self.focus = self.focus.cycle(),
            KeyCode::BackTab => self.focus = self.focus.cycle_back(),
            _ => return self.handle_field_key(code),
        }
        false
    }

    fn handle_field_key(&mut self, code: KeyCode) -> bool {
        match self.focus {
            Focus::Title => self.handle_text_key(DraftField::Title, code),
            Focus::Isbn => self.handle_isbn_key(code),
            Focus::Authors | Focus::Tags => self.handle_multi_select_key(code),
            Focus::Description => self.handle_text_key(DraftField::Description, code),
            Focus::CoverUrl => self.handle_text_key(DraftField::CoverUrl, code),
            Focus::Location => self.handle_location_key(code),
        }
    }

    fn handle_text_key(&mut self, field: DraftField, code: KeyCode) -> bool {
        match code {
            KeyCode::Char(ch) => {
                self.form.draft_mut().field_mut(field).push(ch);
            }
            KeyCode::Backspace => {
                self.form.draft_mut().field_mut(field).pop();
            }
            KeyCode::Esc => return true,
            _ => {}
        }
        false
    }

    fn handle_isbn_key(&mut self, code: KeyCode) -> bool {
        if code == KeyCode::Enter {
            self.start_isbn_lookup();
            return false;
        }
        self.handle_text_key(DraftField::Isbn, code)
    }

    /// The widget eats most keys; Esc falls through as quit once the
    /// dropdown is closed.
    fn handle_multi_select_key(&mut self, code: KeyCode) -> bool {
        let widget = match self.focus {
            Focus::Tags => self.form.tags_mut(),
            _ => self.form.authors_mut(),
        };
        if widget.handle_key(code) {
            return false;
        }
        matches!(code, KeyCode::Esc)
    }

    fn handle_location_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Up => self.move_location_cursor(-1),
            KeyCode::Down => self.move_location_cursor(1),
            KeyCode::Home => self.move_location_cursor(i32::MIN),
            KeyCode::End => self.move_location_cursor(i32::MAX),
            KeyCode::Enter => self.activate_location_row(),
            KeyCode::Char(' ') => self.toggle_location_row(),
            KeyCode::Char(ch) => {
                self.location_query.push(ch);
                self.apply_location_filter();
            }
            KeyCode::Backspace => {
                if self.location_query.pop().is_some() {
                    self.apply_location_filter();
                }
            }
            KeyCode::Esc => {
                if self.location_query.is_empty() {
                    return true;
                }
                self.location_query.clear();
                self.apply_location_filter();
            }
            _ => {}
        }
        false
    }

    fn apply_location_filter(&mut self) {
        self.form.location_mut().set_filter(&self.location_query);
        self.clamp_location_cursor();
    }

    fn clamp_location_cursor(&mut self) {
        let len = self.form.location().visible_rows().len();
        if len == 0 {
            self.location_state.select(None);
            return;
        }
        let cursor = self.location_state.selected().unwrap_or(0).min(len - 1);
        self.location_state.select(Some(cursor));
    }

    fn move_location_cursor(&mut self, delta: i32) {
        let len = self.form.location().visible_rows().len();
        if len == 0 {
            return;
        }
        let current = self.location_state.selected().unwrap_or(0);
        let next = (current as i64 + i64::from(delta)).clamp(0, len as i64 - 1) as usize;
        self.location_state.select(Some(next));
    }

    fn cursor_location_row(&self) -> Option<TreeRow> {
        let index = self.location_state.selected()?;
        self.form.location().visible_rows().get(index).cloned()
    }

    /// Enter on a folded branch opens it; Enter anywhere else picks the row.
    fn activate_location_row(&mut self) {
        let Some(row) = self.cursor_location_row() else {
            return;
        };
        if row.marker == TreeMarker::Collapsed {
            self.form.location_mut().toggle(&row.value);
            self.clamp_location_cursor();
        } else {
            self.form.location_mut().select(&row.value);
        }
    }

    fn toggle_location_row(&mut self) {
        let Some(row) = self.cursor_location_row() else {
            return;
        };
        self.form.location_mut().toggle(&row.value);
        self.clamp_location_cursor();
    }

    fn start_isbn_lookup(&mut self) {
        let raw_isbn = self.form.draft().isbn().trim().to_owned();
        if raw_isbn.is_empty() {
            self.set_toast("Type an ISBN first");
            return;
        }
        if !self.ui_state.blocking_lock().begin_lookup() {
            self.set_toast("A lookup is already running");
            return;
        }
        self.lookup_in_flight = true;
        self.set_toast(format!("Looking up {raw_isbn}…"));

        let authors = self.form.authors().known_choices().clone();
        let tags = self.form.tags().known_choices().clone();
        let service = Arc::clone(&self.service);
        let ui_state = Arc::clone(&self.ui_state);
        self.runtime.spawn(async move {
            let outcome = match lookup_for_autofill(
                &raw_isbn,
                &authors,
                &tags,
                service.as_ref(),
                service.as_ref(),
            )
            .await
            {
                Ok(Some(pending)) => LookupOutcome::Fetched(Box::new(pending)),
                Ok(None) => LookupOutcome::NoRecord,
                Err(err) => LookupOutcome::Failed(err.to_string()),
            };
            ui_state.lock().await.finish_lookup(outcome);
        });
    }

    fn finish_autofill(&mut self, pending: PendingAutofill) {
        let (draft, authors, tags) = self.form.reconcile_targets_mut();
        let report = apply_autofill(pending, draft, authors, tags);
        let toast = autofill_toast(&report);
        if let Some(session) = report.session {
            self.disambiguation = Some(DisambiguationOverlay::deciding(session));
        }
        self.set_toast(toast);
    }

    fn handle_overlay_key(&mut self, code: KeyCode) {
        enum OverlayAction {
            None,
            Apply,
            Cancel,
            Dismiss,
        }

        let mut action = OverlayAction::None;
        if let Some(overlay) = self.disambiguation.as_mut() {
            if overlay.session.is_none() {
                // Failure list; either commit key closes it.
                if matches!(code, KeyCode::Esc | KeyCode::Enter) {
                    action = OverlayAction::Dismiss;
                }
            } else {
                match code {
                    KeyCode::Up | KeyCode::Char('k') => overlay.cursor_up(),
                    KeyCode::Down | KeyCode::Char('j') => overlay.cursor_down(),
                    KeyCode::Left | KeyCode::Char('h') => overlay.cycle_resolution(false),
                    KeyCode::Right | KeyCode::Char('l') => overlay.cycle_resolution(true),
                    KeyCode::Enter if overlay.on_apply_row() => action = OverlayAction::Apply,
                    KeyCode::Enter => overlay.cursor_down(),
                    KeyCode::Esc => action = OverlayAction::Cancel,
                    _ => {}
                }
            }
        }

        match action {
            OverlayAction::None => {}
            OverlayAction::Apply => self.apply_disambiguation(),
            OverlayAction::Cancel => self.cancel_disambiguation(),
            OverlayAction::Dismiss => self.disambiguation = None,
        }
    }

    fn cancel_disambiguation(&mut self) {
        if let Some(overlay) = self.disambiguation.take() {
            if let Some(session) = overlay.session {
                session.cancel();
            }
        }
        self.set_toast("Linking cancelled; the form is unchanged");
    }

    fn apply_disambiguation(&mut self) {
        let Some(overlay) = self.disambiguation.take() else {
            return;
        };
        let Some(session) = overlay.session else {
            return;
        };

        let cancel = CancelToken::new();
        let service = Arc::clone(&self.service);
        let (_, authors, tags) = self.form.reconcile_targets_mut();
        // The overlay is modal, so blocking this thread on the apply pass
        // is fine; the runtime stays driven from the main thread.
        let report = self
            .runtime
            .block_on(session.apply(authors, tags, service.as_ref(), &cancel));

        self.set_toast(apply_toast(&report));
        if !report.failed.is_empty() {
            self.disambiguation = Some(DisambiguationOverlay::failed(report.failed));
        }
    }

    fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.help_scroll = 0;
        }
    }

    fn help_scroll_by(&mut self, delta: i32) {
        let next = i32::from(self.help_scroll) + delta;
        self.help_scroll = clamp_positive_i32_to_u16(next);
    }

    fn help_scroll_page(&mut self, direction: i32) {
        let page = i32::from(self.help_viewport_height.max(1));
        self.help_scroll_by(direction * page);
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + TOAST_TTL,
        });
    }
}

fn autofill_toast(report: &AutofillReport) -> String {
    let mut parts = Vec::new();
    if !report.fields_filled.is_empty() {
        parts.push(format!("{} field(s) filled", report.fields_filled.len()));
    }
    if report.auto_selected > 0 {
        parts.push(format!("{} linked", report.auto_selected));
    }
    if let Some(session) = &report.session {
        parts.push(format!("{} to review", session.total_len()));
    }
    if !report.warnings.is_empty() {
        parts.push(format!("{} lookup warning(s)", report.warnings.len()));
    }
    if parts.is_empty() {
        return "Nothing new to fill".to_owned();
    }
    format!("Autofill: {}", parts.join(", "))
}

fn apply_toast(report: &ApplyReport) -> String {
    if report.cancelled {
        return format!(
            "Linking cancelled: {} done, {} skipped",
            report.succeeded, report.skipped
        );
    }
    if report.failed.is_empty() {
        return format!("{} name(s) linked", report.succeeded);
    }
    format!("{} linked, {} failed", report.succeeded, report.failed.len())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let main_area = layout[0];
    let status_area = layout[1];

    let compact_footer = footer_uses_compact_mode(main_area);
    let pane_direction = if stack_main_panes_vertically(main_area) {
        Direction::Vertical
    } else {
        Direction::Horizontal
    };
    let panes = Layout::default()
        .direction(pane_direction)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(main_area);
    let form_area = panes[0];
    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(9)])
        .split(panes[1]);
    let location_area = sidebar[0];
    let card_area = sidebar[1];

    let overlay_open = app.show_help || app.disambiguation.is_some();

    let lookup_tail = app.lookup_in_flight.then_some("(looking up…)");
    let (lines, cursor) = form_lines(app);
    let form_panel = Paragraph::new(lines)
        .style(app.theme.base_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(view_title("New book", lookup_tail))
                .border_style(app.theme.panel_border_style(app.focus != Focus::Location)),
        );
    frame.render_widget(form_panel, form_area);
    if !overlay_open {
        if let Some((column, line)) = cursor {
            let max_x = form_area.x.saturating_add(form_area.width.saturating_sub(2));
            let max_y = form_area.y.saturating_add(form_area.height.saturating_sub(2));
            let x = form_area
                .x
                .saturating_add(1)
                .saturating_add(column.min(u16::MAX as usize) as u16)
                .min(max_x);
            let y = form_area
                .y
                .saturating_add(1)
                .saturating_add(line.min(u16::MAX as usize) as u16)
                .min(max_y);
            frame.set_cursor_position((x, y));
        }
    }

    let filter_tail = (!app.location_query.is_empty())
        .then(|| format!("(filter: {})", app.location_query));
    let location_focused = app.focus == Focus::Location;
    let items: Vec<ListItem<'static>> = app
        .form
        .location()
        .visible_rows()
        .iter()
        .map(|row| ListItem::new(tree_row_line(row, &app.theme)))
        .collect();
    let location_panel = List::new(items)
        .style(app.theme.base_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(view_title("Shelving", filter_tail.as_deref()))
                .border_style(app.theme.panel_border_style(location_focused)),
        )
        .highlight_style(if location_focused {
            app.theme.selection_style()
        } else {
            app.theme.base_style()
        });
    frame.render_stateful_widget(location_panel, location_area, &mut app.location_state);

    let submission = app.form.submission();
    let card_panel = Paragraph::new(card_lines(&submission, &app.theme))
        .style(app.theme.base_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(view_title("Submission", None))
                .border_style(app.theme.dim_style()),
        );
    frame.render_widget(card_panel, card_area);

    let toast_snapshot = app
        .toast
        .as_ref()
        .map(|toast| (toast.message.clone(), toast.expires_at));
    let toast_suffix = match toast_snapshot {
        Some((message, expires_at)) if expires_at > Instant::now() => message,
        Some(_) => {
            app.toast = None;
            String::new()
        }
        None => String::new(),
    };

    let footer = if app.disambiguation.is_some() {
        overlay_footer_line(app, &toast_suffix)
    } else {
        footer_help_line(app, &toast_suffix, compact_footer)
    };
    frame.render_widget(Paragraph::new(footer), status_area);
    frame.render_widget(
        Paragraph::new(footer_brand_line()).alignment(Alignment::Right),
        status_area,
    );

    if app.disambiguation.is_some() {
        render_disambiguation(frame, app, main_area);
    }
    if app.show_help {
        render_help(frame, app, main_area);
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(err) => {
                teardown_terminal();
                return Err(err.into());
            }
        };
        if let Err(err) = terminal.clear() {
            teardown_terminal();
            return Err(err.into());
        }

        Ok(Self { terminal })
    }

    fn draw(&mut self, render: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

include!("chrome.rs");

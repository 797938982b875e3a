use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;
use tracing::debug;

use crate::db::Store;
use crate::error::StoreError;
use crate::models::Plan;

use super::forms::{ConfirmPlanDelete, DetailForm, PlanForm};
use super::helpers::{centered_rect, step_selection};
use super::screens::DetailScreen;

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// Which list is on screen.
enum Screen {
    Plans,
    Details(DetailScreen),
}

/// Popups and prompts layered over the current screen.
enum Mode {
    Normal,
    AddingPlan(PlanForm),
    AddingDetail { plan_id: i64, form: DetailForm },
    ConfirmPlanDelete(ConfirmPlanDelete),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Front-end state. Owns the [`Store`] and re-queries it after every change,
/// so what is drawn is always what is persisted.
pub struct App {
    store: Store,
    plans: Vec<Plan>,
    selected: usize,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    /// Start on the plan list, showing `plans` as already loaded from `store`.
    pub fn new(store: Store, plans: Vec<Plan>) -> Self {
        Self {
            store,
            plans,
            selected: 0,
            screen: Screen::Plans,
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Apply one key press. Returns `true` when the user asked to quit.
    /// Validation problems are shown in the UI; storage failures are returned.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingPlan(form) => self.handle_add_plan(code, form)?,
            Mode::AddingDetail { plan_id, form } => self.handle_add_detail(code, plan_id, form)?,
            Mode::ConfirmPlanDelete(confirm) => self.handle_confirm_plan_delete(code, confirm)?,
        };

        self.mode = mode;
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.screen {
            Screen::Plans => self.handle_plans_key(code, exit),
            Screen::Details(_) => self.handle_details_key(code),
        }
    }

    fn handle_plans_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => *exit = true,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Enter | KeyCode::Right => {
                if let Some(plan) = self.current_plan().cloned() {
                    self.clear_status();
                    self.open_details(plan)?;
                } else {
                    self.set_status("No plan selected.", StatusKind::Error);
                }
            }
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('+') => {
                self.clear_status();
                return Ok(Mode::AddingPlan(PlanForm::default()));
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('-') | KeyCode::Delete => {
                if let Some(plan) = self.current_plan() {
                    let confirm = ConfirmPlanDelete::from(plan);
                    self.clear_status();
                    return Ok(Mode::ConfirmPlanDelete(confirm));
                }
                self.set_status("No plan selected to delete.", StatusKind::Error);
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_details_key(&mut self, code: KeyCode) -> Result<Mode> {
        let Screen::Details(details) = &mut self.screen else {
            return Ok(Mode::Normal);
        };

        match code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Left => {
                self.screen = Screen::Plans;
                self.clear_status();
            }
            KeyCode::Up | KeyCode::Char('k') => details.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => details.move_selection(1),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('+') => {
                let plan_id = details.plan.id;
                self.clear_status();
                return Ok(Mode::AddingDetail {
                    plan_id,
                    form: DetailForm::default(),
                });
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('-') | KeyCode::Delete => {
                let target = details
                    .current_detail()
                    .map(|detail| (detail.id, detail.destination.clone()));
                match target {
                    Some((id, destination)) => {
                        self.store.delete_detail(id)?;
                        self.reload_details(None)?;
                        self.set_status(format!("Deleted '{destination}'."), StatusKind::Info);
                    }
                    None => self.set_status("No detail selected to delete.", StatusKind::Error),
                }
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_add_plan(&mut self, code: KeyCode, mut form: PlanForm) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Cancelled adding plan.", StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                let (name, date) = form.inputs();
                match self.store.add_plan(name, date) {
                    Ok(id) => {
                        let message = format!("Added plan '{name}'.");
                        self.reload_plans(Some(id))?;
                        self.set_status(message, StatusKind::Info);
                        return Ok(Mode::Normal);
                    }
                    Err(StoreError::Validation(err)) => form.error = Some(err.to_string()),
                    Err(err) => return Err(err.into()),
                }
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Ok(Mode::AddingPlan(form))
    }

    fn handle_add_detail(
        &mut self,
        code: KeyCode,
        plan_id: i64,
        mut form: DetailForm,
    ) -> Result<Mode> {
        match code {
            KeyCode::Esc => {
                self.set_status("Cancelled adding detail.", StatusKind::Info);
                return Ok(Mode::Normal);
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                let result = self.store.add_detail(
                    plan_id,
                    &form.detail_date,
                    &form.destination,
                    &form.address,
                    &form.notes,
                );
                match result {
                    Ok(id) => {
                        let message = format!("Added '{}'.", form.destination);
                        self.reload_details(Some(id))?;
                        self.set_status(message, StatusKind::Info);
                        return Ok(Mode::Normal);
                    }
                    Err(StoreError::Validation(err)) => form.error = Some(err.to_string()),
                    Err(err) => return Err(err.into()),
                }
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Ok(Mode::AddingDetail { plan_id, form })
    }

    fn handle_confirm_plan_delete(
        &mut self,
        code: KeyCode,
        confirm: ConfirmPlanDelete,
    ) -> Result<Mode> {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.store.delete_plan(confirm.id)?;
                self.reload_plans(None)?;
                self.set_status(format!("Deleted plan '{}'.", confirm.name), StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.set_status("Kept plan.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::ConfirmPlanDelete(confirm)),
        }
    }

    /// The plan under the cursor, if the list is not empty.
    fn current_plan(&self) -> Option<&Plan> {
        self.plans.get(self.selected)
    }

    fn move_selection(&mut self, offset: isize) {
        self.selected = step_selection(self.selected, self.plans.len(), offset);
    }

    fn open_details(&mut self, plan: Plan) -> Result<()> {
        debug!(plan_id = plan.id, "opening plan details");
        let details = self.store.list_details(plan.id)?;
        self.screen = Screen::Details(DetailScreen::new(plan, details));
        Ok(())
    }

    /// Re-query the plan list, keeping the cursor on `focus` when given.
    fn reload_plans(&mut self, focus: Option<i64>) -> Result<()> {
        self.plans = self.store.list_plans()?;
        if let Some(index) = focus.and_then(|id| self.plans.iter().position(|p| p.id == id)) {
            self.selected = index;
        }
        if self.selected >= self.plans.len() {
            self.selected = self.plans.len().saturating_sub(1);
        }
        Ok(())
    }

    /// Re-query the open plan's itinerary. Does nothing on the plan list.
    fn reload_details(&mut self, focus: Option<i64>) -> Result<()> {
        if let Screen::Details(screen) = &mut self.screen {
            let details = self.store.list_details(screen.plan.id)?;
            screen.set_details(details, focus);
        }
        Ok(())
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    /// Render the current screen, the footer, and any popup on top.
    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Plans => self.draw_plans(frame, content_area),
            Screen::Details(details) => self.draw_details(frame, content_area, details),
        }

        self.draw_footer(frame, footer_area);

        match &self.mode {
            Mode::AddingPlan(form) => self.draw_form(
                frame,
                area,
                "Add Travel Plan",
                form.lines(),
                form.error.as_deref(),
                form.cursor_offset(),
            ),
            Mode::AddingDetail { form, .. } => self.draw_form(
                frame,
                area,
                "Add Plan Detail",
                form.lines(),
                form.error.as_deref(),
                form.cursor_offset(),
            ),
            Mode::ConfirmPlanDelete(confirm) => self.draw_confirm_plan(frame, area, confirm),
            Mode::Normal => {}
        }
    }

    fn draw_plans(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title("Travel Plans").borders(Borders::ALL);

        if self.plans.is_empty() {
            let message = Paragraph::new("No travel plans yet. Press 'a' to add one.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let rows = self.plans.iter().map(|plan| {
            Row::new(vec![
                Cell::from(plan.name.clone()),
                Cell::from(plan.date.clone()),
            ])
        });
        let table = Table::new(rows, [Constraint::Percentage(70), Constraint::Percentage(30)])
            .header(header_row(&["Travel plan", "Date"]))
            .block(block)
            .row_highlight_style(highlight_style())
            .highlight_symbol("> ");

        let mut state = TableState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_details(&self, frame: &mut Frame, area: Rect, details: &DetailScreen) {
        let block = Block::default().title(details.title()).borders(Borders::ALL);

        if details.details.is_empty() {
            let message = Paragraph::new("No details for this plan yet. Press 'a' to add one.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let rows = details.details.iter().map(|detail| {
            Row::new(vec![
                Cell::from(detail.detail_date.clone()),
                Cell::from(detail.destination.clone()),
                Cell::from(detail.address_or_blank().to_string()),
                Cell::from(detail.notes_or_blank().to_string()),
            ])
        });
        let widths = [
            Constraint::Length(14),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Fill(1),
        ];
        let table = Table::new(rows, widths)
            .header(header_row(&["Date/time", "Destination", "Address", "Notes"]))
            .block(block)
            .row_highlight_style(highlight_style())
            .highlight_symbol("> ");

        let mut state = TableState::default().with_selected(Some(details.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph =
            Paragraph::new(vec![status_line, self.footer_instructions()]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    /// Key hints for whatever the user is looking at right now.
    fn footer_instructions(&self) -> Line<'static> {
        let text = match (&self.mode, &self.screen) {
            (Mode::AddingPlan(_), _) | (Mode::AddingDetail { .. }, _) => {
                "Enter save | Tab next field | Esc cancel"
            }
            (Mode::ConfirmPlanDelete(_), _) => "y delete | n keep",
            (Mode::Normal, Screen::Plans) => {
                "a add | Enter details | d delete | j/k move | q quit"
            }
            (Mode::Normal, Screen::Details(_)) => "a add | d delete | j/k move | Esc back",
        };
        Line::from(Span::styled(text, Style::default().fg(Color::Gray)))
    }

    fn draw_form(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        mut lines: Vec<Line<'static>>,
        error: Option<&str>,
        cursor: (u16, u16),
    ) {
        let popup_area = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        lines.push(Line::from(""));
        match error {
            Some(error) => lines.push(Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Red),
            ))),
            None => lines.push(Line::from(Span::styled(
                "Enter to save, Tab to switch, Esc to cancel",
                Style::default().fg(Color::Gray),
            ))),
        }

        frame.render_widget(Paragraph::new(lines), inner);

        let (column, row) = cursor;
        let max_x = inner.x + inner.width.saturating_sub(1);
        frame.set_cursor_position(((inner.x + column).min(max_x), inner.y + row));
    }

    fn draw_confirm_plan(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmPlanDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Confirm Delete").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let lines = vec![
            Line::from(format!("Delete '{}' ({})?", confirm.name, confirm.date)),
            Line::from("All of its details will be deleted too."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}

/// Bold column titles for the plan and detail tables.
fn header_row(titles: &[&'static str]) -> Row<'static> {
    Row::new(titles.iter().map(|title| Cell::from(*title)))
        .style(Style::default().add_modifier(Modifier::BOLD))
}

fn highlight_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

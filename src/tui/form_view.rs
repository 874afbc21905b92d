//! Form panel - the ten transaction fields
//!
//! Categorical and time fields behave like dropdowns (cycled with Left/Right);
//! amount fields take typed input.

use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::*;
use tracing::debug;

use crate::form::FormField;
use crate::tui::theme::{Panel, PanelStyle, Theme};
use crate::types::{Choice, FormState};

const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Continue,
    Submit,
    Quit,
}

pub struct FormView {
    form: FormState,
    selected: usize,
    /// Raw text of the amount field being typed into.
    buffer: Option<String>,
}

impl FormView {
    pub fn new(form: FormState) -> Self {
        Self {
            form,
            selected: 0,
            buffer: None,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn selected_field(&self) -> FormField {
        FormField::ALL[self.selected]
    }

    pub fn reset(&mut self) {
        self.form = FormState::default();
        self.buffer = None;
    }

    fn select(&mut self, index: usize) {
        self.buffer = None;
        self.selected = index;
    }

    fn apply(&mut self, field: FormField, raw: &str) {
        // Every value offered by the widgets is in-domain.
        if let Err(e) = self.form.update_field(field, raw) {
            debug!("rejected input for {}: {}", field, e);
        }
    }

    fn cycle(&mut self, forward: bool) {
        let field = self.selected_field();
        let raw = match field {
            FormField::VehicleType => step(self.form.vehicle_type, forward).as_str().to_string(),
            FormField::LaneType => step(self.form.lane_type, forward).as_str().to_string(),
            FormField::VehicleDimensions => {
                step(self.form.vehicle_dimensions, forward).as_str().to_string()
            }
            FormField::StateCode => step(self.form.state_code, forward).as_str().to_string(),
            FormField::Hour => step_time(self.form.hour.value(), field, forward),
            FormField::DayOfWeek => step_time(self.form.day_of_week.value(), field, forward),
            FormField::Month => step_time(self.form.month.value(), field, forward),
            FormField::TransactionAmount | FormField::AmountPaid | FormField::VehicleSpeed => {
                return
            }
        };
        self.apply(field, &raw);
    }

    fn edit_amount(&mut self, edit: impl FnOnce(&mut String)) {
        let field = self.selected_field();
        let mut text = self
            .buffer
            .take()
            .unwrap_or_else(|| self.form.display_value(field));
        edit(&mut text);
        self.apply(field, &text);
        self.buffer = Some(text);
    }

    /// Text shown for a field, including a partially typed amount.
    pub fn shown_value(&self, field: FormField) -> String {
        if field == self.selected_field() {
            if let Some(text) = &self.buffer {
                return text.clone();
            }
        }
        let value = self.form.display_value(field);
        if field == FormField::DayOfWeek {
            if let Some(day) = usize::try_from(self.form.day_of_week.value())
                .ok()
                .and_then(|d| DAY_NAMES.get(d))
            {
                if !self.form.day_of_week.is_empty() {
                    return format!("{} ({})", value, day);
                }
            }
        }
        value
    }

    /// Handle key input. `locked` is set while a submission is in flight.
    pub fn handle_key(&mut self, key: KeyCode, locked: bool) -> FormAction {
        let field = self.selected_field();
        match key {
            KeyCode::Esc | KeyCode::Char('q') => return FormAction::Quit,
            KeyCode::Enter => {
                self.buffer = None;
                return if locked {
                    FormAction::Continue
                } else {
                    FormAction::Submit
                };
            }
            KeyCode::Up | KeyCode::BackTab => {
                let n = FormField::ALL.len();
                self.select((self.selected + n - 1) % n);
            }
            KeyCode::Down | KeyCode::Tab => {
                self.select((self.selected + 1) % FormField::ALL.len());
            }
            KeyCode::Left => self.cycle(false),
            KeyCode::Right => self.cycle(true),
            KeyCode::Char('r') if !locked => self.reset(),
            KeyCode::Char(c) if field.is_amount() && (c.is_ascii_digit() || c == '.' || c == '-') => {
                self.edit_amount(|t| t.push(c));
            }
            KeyCode::Backspace if field.is_amount() => {
                self.edit_amount(|t| {
                    t.pop();
                });
            }
            _ => {}
        }
        FormAction::Continue
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, invalid: &[FormField]) {
        let block = Panel::new(theme)
            .title(" Toll Transaction ")
            .style(PanelStyle::Focused)
            .block();
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let items: Vec<ListItem> = FormField::ALL
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let is_selected = i == self.selected;
                let is_invalid = invalid.contains(field);
                let value = self.shown_value(*field);

                let value_display = if field.is_amount() {
                    if is_selected {
                        format!("{}_", value)
                    } else {
                        value
                    }
                } else if is_selected {
                    format!("< {} >", value)
                } else {
                    value
                };

                let label_color = if is_invalid {
                    theme.error
                } else if is_selected {
                    theme.accent
                } else {
                    theme.text_primary
                };

                let content = Line::from(vec![
                    Span::styled(
                        if is_selected { "> " } else { "  " },
                        Style::default().fg(theme.accent),
                    ),
                    Span::styled(format!("{:24}", field.label()), Style::default().fg(label_color)),
                    Span::styled(
                        value_display,
                        Style::default().fg(if is_selected {
                            theme.warning
                        } else {
                            theme.text_secondary
                        }),
                    ),
                ]);

                let style = if is_selected {
                    Style::default().bg(theme.surface)
                } else {
                    Style::default()
                };
                ListItem::new(content).style(style)
            })
            .collect();

        frame.render_widget(List::new(items), inner);
    }
}

impl Default for FormView {
    fn default() -> Self {
        Self::new(FormState::default())
    }
}

fn step<C: Choice>(c: C, forward: bool) -> C {
    if forward {
        c.next()
    } else {
        c.prev()
    }
}

/// Move a time value one step inside its dropdown range, wrapping. Values set
/// outside the range jump back to an end.
fn step_time(current: i64, field: FormField, forward: bool) -> String {
    let (min, max) = field.time_range().unwrap_or((0, 0));
    let next = if forward {
        if current < min || current >= max {
            min
        } else {
            current + 1
        }
    } else if current <= min || current > max {
        max
    } else {
        current - 1
    };
    next.to_string()
}

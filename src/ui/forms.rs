use ratatui::text::Line;

use crate::models::Plan;

use super::helpers::field_line;

/// Input state for the "add plan" popup.
#[derive(Default, Clone)]
pub(crate) struct PlanForm {
    /// Travel name as typed.
    pub(crate) name: String,
    /// Free-form date as typed, usually `YYYY-MM-DD`.
    pub(crate) date: String,
    /// Field receiving keystrokes.
    pub(crate) active: PlanField,
    /// Validation message from the last save attempt.
    pub(crate) error: Option<String>,
}

/// Fields available within the plan form.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub(crate) enum PlanField {
    #[default]
    Name,
    Date,
}

impl PlanForm {
    /// Field, label, and empty-field hint, in display order.
    pub(crate) const FIELDS: [(PlanField, &'static str, &'static str); 2] = [
        (PlanField::Name, "Travel name", "enter a travel plan"),
        (PlanField::Date, "Date", "YYYY-MM-DD"),
    ];

    /// Swap focus between the two fields. Works the same in both directions.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            PlanField::Name => PlanField::Date,
            PlanField::Date => PlanField::Name,
        };
    }

    /// Append a character to the active field. Control characters are
    /// ignored and reported with `false`.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.value_mut(self.active).push(ch);
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        self.value_mut(self.active).pop();
    }

    /// Current text of `field`.
    pub(crate) fn value(&self, field: PlanField) -> &str {
        match field {
            PlanField::Name => &self.name,
            PlanField::Date => &self.date,
        }
    }

    fn value_mut(&mut self, field: PlanField) -> &mut String {
        match field {
            PlanField::Name => &mut self.name,
            PlanField::Date => &mut self.date,
        }
    }

    /// Values exactly as typed, ready to hand to the store.
    pub(crate) fn inputs(&self) -> (&str, &str) {
        (&self.name, &self.date)
    }

    /// One rendered line per field for the popup body.
    pub(crate) fn lines(&self) -> Vec<Line<'static>> {
        Self::FIELDS
            .iter()
            .map(|(field, label, hint)| {
                field_line(label, self.value(*field), hint, self.active == *field)
            })
            .collect()
    }

    /// Row of the active field and the column right after its text, relative
    /// to the popup's inner area.
    pub(crate) fn cursor_offset(&self) -> (u16, u16) {
        let row = Self::FIELDS
            .iter()
            .position(|(field, _, _)| *field == self.active)
            .unwrap_or(0);
        let (_, label, _) = Self::FIELDS[row];
        let column = label.chars().count() + 2 + self.value(self.active).chars().count();
        (column as u16, row as u16)
    }
}

/// Input state for the "add detail" popup, scoped to one plan.
#[derive(Default, Clone)]
pub(crate) struct DetailForm {
    /// Free-form date and time, usually `MM-DD hh-mm`.
    pub(crate) detail_date: String,
    /// What is planned; required.
    pub(crate) destination: String,
    /// Optional location.
    pub(crate) address: String,
    /// Optional free text.
    pub(crate) notes: String,
    pub(crate) active: DetailField,
    pub(crate) error: Option<String>,
}

/// Enumerates the fields within the detail form to drive focus management.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub(crate) enum DetailField {
    #[default]
    DetailDate,
    Destination,
    Address,
    Notes,
}

impl DetailForm {
    /// Field, label, and empty-field hint, in display order.
    pub(crate) const FIELDS: [(DetailField, &'static str, &'static str); 4] = [
        (DetailField::DetailDate, "Date/time", "MM-DD hh-mm"),
        (DetailField::Destination, "Destination", "what are you doing"),
        (DetailField::Address, "Address", "optional"),
        (DetailField::Notes, "Notes", "optional"),
    ];

    /// Move focus down, wrapping from notes back to the date.
    pub(crate) fn next_field(&mut self) {
        self.active = match self.active {
            DetailField::DetailDate => DetailField::Destination,
            DetailField::Destination => DetailField::Address,
            DetailField::Address => DetailField::Notes,
            DetailField::Notes => DetailField::DetailDate,
        };
    }

    /// Move focus up, wrapping from the date to notes.
    pub(crate) fn previous_field(&mut self) {
        self.active = match self.active {
            DetailField::DetailDate => DetailField::Notes,
            DetailField::Destination => DetailField::DetailDate,
            DetailField::Address => DetailField::Destination,
            DetailField::Notes => DetailField::Address,
        };
    }

    /// Append a character to the active field, refusing control characters.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.value_mut(self.active).push(ch);
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        self.value_mut(self.active).pop();
    }

    /// Current text of `field`.
    pub(crate) fn value(&self, field: DetailField) -> &str {
        match field {
            DetailField::DetailDate => &self.detail_date,
            DetailField::Destination => &self.destination,
            DetailField::Address => &self.address,
            DetailField::Notes => &self.notes,
        }
    }

    fn value_mut(&mut self, field: DetailField) -> &mut String {
        match field {
            DetailField::DetailDate => &mut self.detail_date,
            DetailField::Destination => &mut self.destination,
            DetailField::Address => &mut self.address,
            DetailField::Notes => &mut self.notes,
        }
    }

    /// One rendered line per field for the popup body.
    pub(crate) fn lines(&self) -> Vec<Line<'static>> {
        Self::FIELDS
            .iter()
            .map(|(field, label, hint)| {
                field_line(label, self.value(*field), hint, self.active == *field)
            })
            .collect()
    }

    /// Cursor position after the active field's text, relative to the
    /// popup's inner area.
    pub(crate) fn cursor_offset(&self) -> (u16, u16) {
        let row = Self::FIELDS
            .iter()
            .position(|(field, _, _)| *field == self.active)
            .unwrap_or(0);
        let (_, label, _) = Self::FIELDS[row];
        let column = label.chars().count() + 2 + self.value(self.active).chars().count();
        (column as u16, row as u16)
    }
}

/// Pending plan deletion. Plans take their whole itinerary with them, so the
/// user confirms first.
#[derive(Clone)]
pub(crate) struct ConfirmPlanDelete {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) date: String,
}

impl From<&Plan> for ConfirmPlanDelete {
    fn from(plan: &Plan) -> Self {
        Self {
            id: plan.id,
            name: plan.name.clone(),
            date: plan.date.clone(),
        }
    }
}

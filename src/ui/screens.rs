use crate::models::{Plan, PlanDetail};

use super::helpers::step_selection;

/// The itinerary view for one plan. Rows are the `PlanDetail` values
/// themselves, so the selection always resolves to a real detail id.
pub(crate) struct DetailScreen {
    pub(crate) plan: Plan,
    pub(crate) details: Vec<PlanDetail>,
    pub(crate) selected: usize,
}

impl DetailScreen {
    pub(crate) fn new(plan: Plan, details: Vec<PlanDetail>) -> Self {
        Self {
            plan,
            details,
            selected: 0,
        }
    }

    pub(crate) fn title(&self) -> String {
        format!("{} details", self.plan.name)
    }

    pub(crate) fn current_detail(&self) -> Option<&PlanDetail> {
        self.details.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = step_selection(self.selected, self.details.len(), offset);
    }

    /// Swap in a freshly loaded list, keeping the cursor on `focus` if it is
    /// still present.
    pub(crate) fn set_details(&mut self, details: Vec<PlanDetail>, focus: Option<i64>) {
        self.details = details;
        if let Some(index) = focus.and_then(|id| self.details.iter().position(|d| d.id == id)) {
            self.selected = index;
        }
        self.ensure_in_bounds();
    }

    fn ensure_in_bounds(&mut self) {
        if self.details.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.details.len() {
            self.selected = self.details.len() - 1;
        }
    }
}

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Render `Label: value` for a form, showing the hint in gray while the field
/// is empty and highlighting the focused field.
pub(crate) fn field_line(label: &str, value: &str, hint: &str, active: bool) -> Line<'static> {
    let (display, style) = if value.is_empty() {
        let style = if active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        (format!("<{hint}>"), style)
    } else if active {
        (value.to_string(), Style::default().fg(Color::Yellow))
    } else {
        (value.to_string(), Style::default())
    };

    Line::from(vec![
        Span::raw(format!("{label}: ")),
        Span::styled(display, style),
    ])
}

/// Move a list cursor by `offset`, clamped to `0..len`.
pub(crate) fn step_selection(selected: usize, len: usize, offset: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let last = len as isize - 1;
    (selected as isize + offset).clamp(0, last) as usize
}

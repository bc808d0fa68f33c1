// Screen layout for the Note Summary TUI
// Single column: title, file zone, optional error banner, controls, result panels

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
};

/// Warp Terminal color scheme
pub struct WarpColors;

impl WarpColors {
    pub const BORDER: Color = Color::Rgb(64, 64, 64);
    pub const BORDER_FOCUSED: Color = Color::Rgb(58, 128, 200);
    pub const TEXT_PRIMARY: Color = Color::Rgb(240, 240, 240);
    pub const TEXT_SECONDARY: Color = Color::Rgb(180, 180, 180);
    pub const TEXT_MUTED: Color = Color::Rgb(120, 120, 120);
    pub const ACCENT_BLUE: Color = Color::Rgb(58, 128, 200);
    pub const ACCENT_GREEN: Color = Color::Rgb(120, 180, 120);
    pub const ACCENT_YELLOW: Color = Color::Rgb(200, 160, 58);
    pub const STATUS_ERROR: Color = Color::Rgb(200, 100, 100);
}

/// Areas for one frame
#[derive(Debug)]
pub struct ScreenLayout {
    pub title: Rect,
    pub file_zone: Rect,
    pub error_banner: Option<Rect>,
    pub controls: Rect,
    pub results: Vec<Rect>,
    pub status_bar: Rect,
    pub help_bar: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect, show_error: bool, result_panels: usize) -> Self {
        let mut constraints = vec![
            Constraint::Length(2), // Title
            Constraint::Length(4), // File zone
        ];
        if show_error {
            constraints.push(Constraint::Length(4));
        }
        constraints.extend([
            Constraint::Length(3), // Controls
            Constraint::Min(0),    // Results
            Constraint::Length(1), // Status
            Constraint::Length(1), // Help
        ]);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(constraints)
            .split(area);

        let mut index = 0;
        let mut next = || {
            let rect = chunks[index];
            index += 1;
            rect
        };

        let title = next();
        let file_zone = next();
        let error_banner = if show_error { Some(next()) } else { None };
        let controls = next();
        let results_area = next();
        let status_bar = next();
        let help_bar = next();

        let results = if result_panels == 0 {
            Vec::new()
        } else {
            let share = 100 / result_panels as u16;
            Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Percentage(share); result_panels])
                .split(results_area)
                .to_vec()
        };

        Self {
            title,
            file_zone,
            error_banner,
            controls,
            results,
            status_bar,
            help_bar,
        }
    }

    /// Four equal cells for the trigger row
    pub fn control_cells(&self) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(self.controls)
            .to_vec()
    }
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(WarpColors::BORDER_FOCUSED)
    } else {
        Style::default().fg(WarpColors::BORDER)
    }
}

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::layout::{border_style, ScreenLayout, WarpColors};
use crate::extraction::CapabilityReport;
use crate::render::{emphasis_segments, suggestion_items, visible_panels, Controls, Segment, Trigger};
use crate::state::{Panel, SessionState, UiState};
use crate::summarizer::SummaryLength;

/// Draw one frame. Reads `state` and `ui`, never modifies them.
pub fn draw(frame: &mut Frame, state: &SessionState, ui: &UiState) {
    let panels = visible_panels(state);
    let layout = ScreenLayout::new(frame.size(), state.error.is_some(), panels.len());
    let controls = Controls::from_state(state);

    draw_title(frame, layout.title);
    draw_file_zone(frame, layout.file_zone, state, ui);
    if let (Some(area), Some(error)) = (layout.error_banner, state.error.as_deref()) {
        draw_error_banner(frame, area, error);
    }
    draw_controls(frame, &layout, state, &controls);

    for (panel, area) in panels.iter().zip(layout.results.iter()) {
        draw_result_panel(frame, *area, *panel, state, ui);
    }

    let status = Paragraph::new(state.status_message.as_str())
        .style(Style::default().fg(WarpColors::TEXT_SECONDARY));
    frame.render_widget(status, layout.status_bar);

    let help = if ui.path_input.is_some() {
        "Enter: open  Esc: cancel"
    } else {
        "o: open file  e: extract  1/2/3/l: length  s: summary  g: suggestions  Tab: focus  Up/Down: scroll  Esc: clear error  q: quit"
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(WarpColors::TEXT_MUTED)),
        layout.help_bar,
    );

    if ui.show_help {
        draw_help_overlay(frame, &state.capabilities);
    }
}

fn draw_help_overlay(frame: &mut Frame, capabilities: &CapabilityReport) {
    let area = centered_rect(60, 50, frame.size());
    let backend = |name: &Option<String>| name.clone().unwrap_or_else(|| "not loaded".to_string());
    let lines = vec![
        Line::from(Span::styled("Keys", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("o          open a file by path (or drop/paste one)"),
        Line::from("e          extract text from the selected file"),
        Line::from("1 / 2 / 3  summary length short / medium / long"),
        Line::from("l          cycle summary length"),
        Line::from("s          generate summary"),
        Line::from("g          get improvement suggestions"),
        Line::from("Tab        focus next panel, Up/Down to scroll"),
        Line::from("Esc        dismiss the error banner"),
        Line::from("q          quit"),
        Line::from(""),
        Line::from(Span::styled("Backends", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(if capabilities.probed {
            format!("PDF: {}   OCR: {}", backend(&capabilities.pdf), backend(&capabilities.ocr))
        } else {
            "Loading...".to_string()
        }),
    ];
    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help (?) ")
            .border_style(border_style(true)),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
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
        .split(vertical[1])[1]
}

fn draw_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "Note Summary",
            Style::default()
                .fg(WarpColors::TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  upload a PDF or image to get a summary and improvement suggestions",
            Style::default().fg(WarpColors::TEXT_MUTED),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(title, area);
}

fn draw_file_zone(frame: &mut Frame, area: Rect, state: &SessionState, ui: &UiState) {
    let has_file = state.document.is_some();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" File ")
        .border_style(if has_file || ui.path_input.is_some() {
            Style::default().fg(WarpColors::ACCENT_GREEN)
        } else {
            border_style(false)
        });

    let lines = if let Some(input) = &ui.path_input {
        vec![
            Line::from(Span::styled(
                "Path to a PDF or image:",
                Style::default().fg(WarpColors::TEXT_SECONDARY),
            )),
            Line::from(vec![
                Span::raw("> "),
                Span::styled(input.clone(), Style::default().fg(WarpColors::TEXT_PRIMARY)),
                Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            ]),
        ]
    } else {
        let mut lines = vec![Line::from(vec![
            Span::raw("Drop a file here, or press "),
            Span::styled("o", Style::default().fg(WarpColors::ACCENT_BLUE)),
            Span::raw(" to browse.  Supported: PDF, JPG, PNG, GIF"),
        ])];
        if let Some(document) = &state.document {
            lines.push(Line::from(Span::styled(
                format!("Selected: {} ({})", document.name, document.size_label()),
                Style::default().fg(WarpColors::ACCENT_GREEN),
            )));
        }
        lines
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_error_banner(frame: &mut Frame, area: Rect, error: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(WarpColors::STATUS_ERROR))
        .title(Span::styled(
            " Oops! ",
            Style::default()
                .fg(WarpColors::STATUS_ERROR)
                .add_modifier(Modifier::BOLD),
        ));
    let banner = Paragraph::new(error)
        .style(Style::default().fg(WarpColors::STATUS_ERROR))
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(banner, area);
}

fn trigger_widget(key: &str, trigger: Trigger) -> Paragraph<'static> {
    let style = if trigger.enabled {
        Style::default().fg(WarpColors::TEXT_PRIMARY)
    } else {
        Style::default().fg(WarpColors::TEXT_MUTED)
    };
    Paragraph::new(format!("[{}] {}", key, trigger.label))
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border_style(trigger.enabled)))
}

fn draw_controls(frame: &mut Frame, layout: &ScreenLayout, state: &SessionState, controls: &Controls) {
    let cells = layout.control_cells();

    frame.render_widget(trigger_widget("e", controls.extract), cells[0]);

    let length_spans: Vec<Span> = SummaryLength::ALL
        .iter()
        .enumerate()
        .flat_map(|(i, length)| {
            let selected = *length == state.summary_length;
            let style = match (selected, controls.length_selector) {
                (true, true) => Style::default()
                    .fg(WarpColors::ACCENT_YELLOW)
                    .add_modifier(Modifier::BOLD),
                (true, false) => Style::default().fg(WarpColors::TEXT_SECONDARY),
                (false, _) => Style::default().fg(WarpColors::TEXT_MUTED),
            };
            [
                Span::styled(format!("{}:{}", i + 1, length.as_str()), style),
                Span::raw(" "),
            ]
        })
        .collect();
    let selector = Paragraph::new(Line::from(length_spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Length ")
                .border_style(border_style(controls.length_selector)),
        );
    frame.render_widget(selector, cells[1]);

    frame.render_widget(trigger_widget("s", controls.summary), cells[2]);
    frame.render_widget(trigger_widget("g", controls.suggestions), cells[3]);
}

fn draw_result_panel(frame: &mut Frame, area: Rect, panel: Panel, state: &SessionState, ui: &UiState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", panel.title()))
        .border_style(border_style(ui.focused_panel == panel));
    let scroll = (ui.scroll(panel), 0);

    match panel {
        Panel::Extracted => {
            let text = Paragraph::new(state.extracted_text.as_str())
                .wrap(Wrap { trim: false })
                .scroll(scroll)
                .block(block);
            frame.render_widget(text, area);
        }
        Panel::Summary => {
            let spans: Vec<Span> = emphasis_segments(&state.summary)
                .into_iter()
                .map(|segment| match segment {
                    Segment::Plain(text) => Span::raw(text),
                    Segment::Emphasis(text) => Span::styled(
                        text,
                        Style::default()
                            .fg(WarpColors::ACCENT_YELLOW)
                            .add_modifier(Modifier::BOLD),
                    ),
                })
                .collect();
            let summary = Paragraph::new(Text::from(Line::from(spans)))
                .wrap(Wrap { trim: true })
                .scroll(scroll)
                .block(block);
            frame.render_widget(summary, area);
        }
        Panel::Suggestions => {
            let items: Vec<ListItem> = suggestion_items(&state.suggestions)
                .into_iter()
                .skip(scroll.0 as usize)
                .map(|item| ListItem::new(format!("• {}", item)))
                .collect();
            frame.render_widget(List::new(items).block(block), area);
        }
    }
}

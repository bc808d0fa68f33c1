/// Result panels, in the order they are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Extracted,
    Summary,
    Suggestions,
}

impl Panel {
    pub const ALL: [Panel; 3] = [Panel::Extracted, Panel::Summary, Panel::Suggestions];

    pub fn title(self) -> &'static str {
        match self {
            Panel::Extracted => "Extracted Text",
            Panel::Summary => "Summary",
            Panel::Suggestions => "Improvement Suggestions",
        }
    }

    fn index(self) -> usize {
        match self {
            Panel::Extracted => 0,
            Panel::Summary => 1,
            Panel::Suggestions => 2,
        }
    }
}

/// View-local state: never read by the reducer, never written by it
#[derive(Debug, Clone)]
pub struct UiState {
    pub focused_panel: Panel,
    pub scroll_offsets: [u16; 3],
    /// Path being typed into the open-file prompt, when it is open
    pub path_input: Option<String>,
    pub show_help: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            focused_panel: Panel::Extracted,
            scroll_offsets: [0; 3],
            path_input: None,
            show_help: false,
        }
    }
}

impl UiState {
    pub fn scroll(&self, panel: Panel) -> u16 {
        self.scroll_offsets[panel.index()]
    }

    pub fn scroll_up(&mut self) {
        let offset = &mut self.scroll_offsets[self.focused_panel.index()];
        *offset = offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let offset = &mut self.scroll_offsets[self.focused_panel.index()];
        *offset = offset.saturating_add(1);
    }

    pub fn reset_scroll(&mut self) {
        self.scroll_offsets = [0; 3];
    }

    /// Move focus to the next panel that is actually on screen
    pub fn cycle_focus(&mut self, visible: &[Panel]) {
        if visible.is_empty() {
            return;
        }
        let next = visible
            .iter()
            .position(|p| *p == self.focused_panel)
            .map(|i| (i + 1) % visible.len())
            .unwrap_or(0);
        self.focused_panel = visible[next];
    }

    pub fn open_prompt(&mut self) {
        self.path_input = Some(String::new());
    }

    pub fn close_prompt(&mut self) -> Option<String> {
        self.path_input.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_focus_skips_hidden_panels() {
        let mut ui = UiState::default();
        ui.cycle_focus(&[Panel::Extracted, Panel::Suggestions]);
        assert_eq!(ui.focused_panel, Panel::Suggestions);
        ui.cycle_focus(&[Panel::Extracted, Panel::Suggestions]);
        assert_eq!(ui.focused_panel, Panel::Extracted);

        ui.focused_panel = Panel::Summary;
        ui.cycle_focus(&[Panel::Extracted]);
        assert_eq!(ui.focused_panel, Panel::Extracted);
    }

    #[test]
    fn test_scroll_is_per_panel() {
        let mut ui = UiState::default();
        ui.scroll_down();
        ui.scroll_down();
        ui.focused_panel = Panel::Summary;
        ui.scroll_up();
        assert_eq!(ui.scroll(Panel::Extracted), 2);
        assert_eq!(ui.scroll(Panel::Summary), 0);
    }
}

//! TUI rendering and mouse hit testing
//!
//! ```text
//! ┌ memocalc ───────────────────┐
//! │┌───┐┌──────────────────────┐│
//! ││ ≡ ││                  12x3││
//! │└───┘└──────────────────────┘│
//! │  keypad, or the sidebar     │
//! │  help / status line         │
//! └─────────────────────────────┘
//! ```
//!
//! Rendering and hit testing share [`regions`] and [`sidebar_regions`], so a
//! click always lands on what was drawn there.

use memocalc::{format_number, Action, CalculatorState, Panel, Storage, ViewState};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::{Keypad, KeypadWidget};

/// Application title
pub const TITLE: &str = " memocalc ";

/// Key help shown when there is no status message
pub const HELP_LINE: &str = "Tab: history  Esc: clear  ^Q: quit";

const HISTORY_TAB: &str = " History ";
const MEMORY_TAB: &str = " Memory ";
const CLOSE_TAB: &str = " X ";
const CLEAR_HISTORY: &str = "[Clear history]";
const CLEAR_MEMORY: &str = "[Clear memory]";

/// Top-level screen areas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    /// Sidebar toggle button
    pub menu: Rect,
    pub display: Rect,
    /// Keypad, or the sidebar when open
    pub body: Rect,
    pub help: Rect,
}

/// Areas inside the open sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarRegions {
    pub history_tab: Rect,
    pub memory_tab: Rect,
    pub close_tab: Rect,
    pub list: Rect,
    pub clear_button: Rect,
}

/// Splits the frame area
#[must_use]
pub fn regions(area: Rect) -> Regions {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Display
            Constraint::Min(0),    // Keypad or sidebar
            Constraint::Length(1), // Help
        ])
        .split(inner);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(rows[0]);

    Regions {
        menu: top[0],
        display: top[1],
        body: rows[1],
        help: rows[2],
    }
}

/// Splits the body area when the sidebar is open
#[must_use]
pub fn sidebar_regions(body: Rect) -> SidebarRegions {
    let inner = Block::default().borders(Borders::ALL).inner(body);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tabs
            Constraint::Min(0),    // Entries
            Constraint::Length(1), // Clear button
        ])
        .split(inner);
    let tabs = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(text_width(HISTORY_TAB)),
            Constraint::Length(1),
            Constraint::Length(text_width(MEMORY_TAB)),
            Constraint::Min(0),
            Constraint::Length(text_width(CLOSE_TAB)),
        ])
        .split(rows[0]);

    let footer = rows[2];
    SidebarRegions {
        history_tab: tabs[0],
        memory_tab: tabs[2],
        close_tab: tabs[4],
        list: rows[1],
        clear_button: Rect {
            width: footer.width.min(text_width(CLEAR_HISTORY)),
            ..footer
        },
    }
}

/// Action for a click at (`x`, `y`) on a frame of size `area`
#[must_use]
pub fn hit_test(view: ViewState, keypad: &Keypad, area: Rect, x: u16, y: u16) -> Option<Action> {
    let regions = regions(area);
    if contains(regions.menu, x, y) {
        return Some(Action::ToggleSidebar);
    }
    if !contains(regions.body, x, y) {
        return None;
    }

    if !view.sidebar_open {
        return keypad
            .hit_test(regions.body, x, y)
            .map(|btn| btn.action.clone());
    }

    let sidebar = sidebar_regions(regions.body);
    if contains(sidebar.history_tab, x, y) {
        Some(Action::ShowHistory)
    } else if contains(sidebar.memory_tab, x, y) {
        Some(Action::ShowMemory)
    } else if contains(sidebar.close_tab, x, y) {
        Some(Action::CloseSidebar)
    } else if contains(sidebar.clear_button, x, y) {
        Some(match view.panel {
            Panel::History => Action::ClearHistory,
            Panel::Memory => Action::ClearMemory,
        })
    } else {
        None
    }
}

fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.right() && y >= rect.y && y < rect.bottom()
}

fn text_width(text: &str) -> u16 {
    text.chars().count() as u16
}

/// Renders the app into the frame
pub fn render<S: Storage>(app: &CalculatorApp<S>, frame: &mut Frame) {
    let ui = CalculatorUi::new(app.state(), app.keypad()).with_status(app.status());
    frame.render_widget(ui, frame.area());
}

/// Whole-screen calculator widget
#[derive(Debug)]
pub struct CalculatorUi<'a> {
    state: &'a CalculatorState,
    keypad: &'a Keypad,
    status: Option<&'a str>,
}

impl<'a> CalculatorUi<'a> {
    #[must_use]
    pub const fn new(state: &'a CalculatorState, keypad: &'a Keypad) -> Self {
        Self {
            state,
            keypad,
            status: None,
        }
    }

    #[must_use]
    pub const fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status = status;
        self
    }

    fn render_menu(&self, area: Rect, buf: &mut Buffer) {
        let style = if self.state.view().sidebar_open {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Cyan)
        };
        Paragraph::new(Span::styled("≡", style))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let style = if self.state.is_error() {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        // Memory indicator, as on a desk calculator
        if self.state.memory() != 0.0 {
            block = block.title(Span::styled(" M ", Style::default().fg(Color::Magenta)));
        }

        Paragraph::new(Span::styled(self.state.input(), style))
            .alignment(Alignment::Right)
            .block(block)
            .render(area, buf);
    }

    fn render_sidebar(&self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .render(area, buf);

        let regions = sidebar_regions(area);
        let panel = self.state.view().panel;
        let tab_style = |selected: bool| {
            if selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            }
        };

        Paragraph::new(Span::styled(HISTORY_TAB, tab_style(panel == Panel::History)))
            .render(regions.history_tab, buf);
        Paragraph::new(Span::styled(MEMORY_TAB, tab_style(panel == Panel::Memory)))
            .render(regions.memory_tab, buf);
        Paragraph::new(Span::styled(CLOSE_TAB, Style::default().fg(Color::Red)))
            .render(regions.close_tab, buf);

        let (items, clear_label) = match panel {
            Panel::History => (self.history_items(), CLEAR_HISTORY),
            Panel::Memory => (self.memory_items(), CLEAR_MEMORY),
        };
        List::new(items).render(regions.list, buf);
        Paragraph::new(Span::styled(clear_label, Style::default().fg(Color::Yellow)))
            .render(regions.clear_button, buf);
    }

    fn history_items(&self) -> Vec<ListItem<'a>> {
        let state: &'a CalculatorState = self.state;
        let history = state.history();
        if history.is_empty() {
            return vec![ListItem::new(Span::styled(
                "No history yet",
                Style::default().fg(Color::DarkGray),
            ))];
        }
        history
            .iter()
            .rev()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(entry.query(), Style::default().fg(Color::Gray)),
                    Span::raw(" = "),
                    Span::styled(
                        format_number(entry.result()),
                        Style::default().fg(Color::Cyan),
                    ),
                ]))
            })
            .collect()
    }

    fn memory_items(&self) -> Vec<ListItem<'a>> {
        vec![ListItem::new(Line::from(vec![
            Span::styled("M = ", Style::default().fg(Color::Gray)),
            Span::styled(
                format_number(self.state.memory()),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
        ]))]
    }

    fn render_help(&self, area: Rect, buf: &mut Buffer) {
        let line = match self.status {
            Some(status) => Span::styled(status, Style::default().fg(Color::Red)),
            None => Span::styled(HELP_LINE, Style::default().fg(Color::DarkGray)),
        };
        Paragraph::new(line).render(area, buf);
    }
}

impl Widget for CalculatorUi<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let regions = regions(area);
        self.render_menu(regions.menu, buf);
        self.render_display(regions.display, buf);
        if self.state.view().sidebar_open {
            self.render_sidebar(regions.body, buf);
        } else {
            KeypadWidget::new(self.keypad).render(regions.body, buf);
        }
        self.render_help(regions.help, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memocalc::core::history::{History, HistoryEntry};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 40,
        height: 20,
    };

    fn draw(state: &CalculatorState, status: Option<&str>) -> String {
        let keypad = Keypad::new();
        let mut terminal = Terminal::new(TestBackend::new(AREA.width, AREA.height)).unwrap();
        terminal
            .draw(|frame| {
                let ui = CalculatorUi::new(state, &keypad).with_status(status);
                frame.render_widget(ui, frame.area());
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    fn with_history() -> CalculatorState {
        let history = History::from(vec![
            HistoryEntry::new("2+3", 5.0),
            HistoryEntry::new("9/4", 2.25),
        ]);
        CalculatorState::new(history, 7.0)
    }

    #[test]
    fn test_regions_cover_frame() {
        let r = regions(AREA);
        assert_eq!(r.menu, Rect::new(1, 1, 5, 3));
        assert_eq!(r.display, Rect::new(6, 1, 33, 3));
        assert_eq!(r.body, Rect::new(1, 4, 38, 14));
        assert_eq!(r.help, Rect::new(1, 18, 38, 1));
    }

    #[test]
    fn test_sidebar_regions() {
        let s = sidebar_regions(regions(AREA).body);
        assert_eq!(s.history_tab, Rect::new(2, 5, 9, 1));
        assert_eq!(s.memory_tab, Rect::new(12, 5, 8, 1));
        assert_eq!(s.close_tab.right(), 38);
        assert_eq!(s.clear_button.y, 16);
        assert_eq!(s.list.height, 10);
    }

    #[test]
    fn test_render_initial_screen() {
        let content = draw(&CalculatorState::default(), None);
        assert!(content.contains("memocalc"));
        assert!(content.contains('≡'));
        assert!(content.contains("[MR]"));
        assert!(content.contains("[ =]"));
        assert!(content.contains("^Q: quit"));
        assert!(!content.contains(" M "));
    }

    #[test]
    fn test_render_input_and_error() {
        let state = CalculatorState::default().apply(&Action::append("12x3"));
        assert!(draw(&state, None).contains("12x3"));

        let state = CalculatorState::default()
            .apply(&Action::append("1/0"))
            .apply(&Action::Evaluate);
        assert!(draw(&state, None).contains("Error"));
    }

    #[test]
    fn test_render_memory_indicator() {
        let content = draw(&with_history(), None);
        assert!(content.contains(" M "));
    }

    #[test]
    fn test_render_history_panel_newest_first() {
        let state = with_history().apply(&Action::ShowHistory);
        let content = draw(&state, None);
        assert!(content.contains("History"));
        assert!(content.contains(CLEAR_HISTORY));
        assert!(!content.contains("[MR]"));

        let newest = content.find("9/4 = 2.25").unwrap();
        let oldest = content.find("2+3 = 5").unwrap();
        assert!(newest < oldest);
    }

    #[test]
    fn test_render_empty_history_panel() {
        let state = CalculatorState::default().apply(&Action::ToggleSidebar);
        assert!(draw(&state, None).contains("No history yet"));
    }

    #[test]
    fn test_render_memory_panel() {
        let state = with_history().apply(&Action::ShowMemory);
        let content = draw(&state, None);
        assert!(content.contains("M = 7"));
        assert!(content.contains(CLEAR_MEMORY));
    }

    #[test]
    fn test_render_status_replaces_help() {
        let content = draw(&CalculatorState::default(), Some("Not saved: disk full"));
        assert!(content.contains("Not saved: disk full"));
        assert!(!content.contains("^Q: quit"));
    }

    #[test]
    fn test_hit_test_menu() {
        let keypad = Keypad::new();
        let view = ViewState::default();
        assert_eq!(
            hit_test(view, &keypad, AREA, 3, 2),
            Some(Action::ToggleSidebar)
        );
    }

    #[test]
    fn test_hit_test_display_and_help_inert() {
        let keypad = Keypad::new();
        let view = ViewState::default();
        assert_eq!(hit_test(view, &keypad, AREA, 20, 2), None);
        assert_eq!(hit_test(view, &keypad, AREA, 20, 18), None);
    }

    #[test]
    fn test_hit_test_keypad() {
        let keypad = Keypad::new();
        let view = ViewState::default();
        // Keypad inner area starts at (2, 5), buttons are 9x2
        assert_eq!(
            hit_test(view, &keypad, AREA, 2, 5),
            Some(Action::RecallMemory)
        );
        assert_eq!(
            hit_test(view, &keypad, AREA, 30, 15),
            Some(Action::append("+"))
        );
    }

    #[test]
    fn test_hit_test_sidebar() {
        let keypad = Keypad::new();
        let open = ViewState {
            sidebar_open: true,
            panel: Panel::Memory,
        };
        let s = sidebar_regions(regions(AREA).body);

        assert_eq!(
            hit_test(open, &keypad, AREA, s.history_tab.x, s.history_tab.y),
            Some(Action::ShowHistory)
        );
        assert_eq!(
            hit_test(open, &keypad, AREA, s.memory_tab.x, s.memory_tab.y),
            Some(Action::ShowMemory)
        );
        assert_eq!(
            hit_test(open, &keypad, AREA, s.close_tab.x, s.close_tab.y),
            Some(Action::CloseSidebar)
        );
        assert_eq!(
            hit_test(open, &keypad, AREA, s.clear_button.x, s.clear_button.y),
            Some(Action::ClearMemory)
        );
        assert_eq!(hit_test(open, &keypad, AREA, s.list.x, s.list.y), None);

        let history = ViewState {
            panel: Panel::History,
            ..open
        };
        assert_eq!(
            hit_test(history, &keypad, AREA, s.clear_button.x, s.clear_button.y),
            Some(Action::ClearHistory)
        );
    }
}

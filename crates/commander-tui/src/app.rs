use commander_core::{
    Config, ConversationController, InFlightReply, Planet, PlanetCatalog, Rejection,
};
use ratatui::widgets::ListState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Planets,
    Chat,
}

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub struct App {
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub focus: FocusPane,

    // Planet navigation
    pub catalog: PlanetCatalog,
    pub planet_state: ListState,

    // Chat
    pub controller: ConversationController,
    pub in_flight: Option<InFlightReply>,
    pub input_cursor: usize, // cursor position in the controller's input value
    pub chat_scroll: u16,
    pub chat_height: u16, // inner height of the chat panel, set during render
    pub chat_width: u16,  // inner width of the chat panel, set during render

    /// One-line notice shown in the footer, cleared on the next key
    pub status: Option<String>,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self::with_controller(ConversationController::from_config(config))
    }

    pub fn with_controller(controller: ConversationController) -> Self {
        let catalog = PlanetCatalog::solar_system();
        let mut planet_state = ListState::default();
        if !catalog.is_empty() {
            planet_state.select(Some(0));
        }

        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            focus: FocusPane::Planets,
            catalog,
            planet_state,
            controller,
            in_flight: None,
            input_cursor: 0,
            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,
            status: None,
            animation_frame: 0,
        }
    }

    /// Planet under the list cursor (not necessarily the one in focus for chat)
    pub fn highlighted_planet(&self) -> Option<&Planet> {
        self.planet_state.selected().and_then(|i| self.catalog.get(i))
    }

    /// Planet the commander is currently reporting from
    pub fn current_planet(&self) -> Option<&Planet> {
        self.controller
            .state()
            .current_planet_context
            .as_deref()
            .and_then(|name| self.catalog.by_name(name))
    }

    pub fn input(&self) -> &str {
        &self.controller.state().input_value
    }

    // Planet navigation

    pub fn planet_down(&mut self) {
        let len = self.catalog.len();
        if len == 0 {
            return;
        }
        let next = self.planet_state.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.planet_state.select(Some(next));
    }

    pub fn planet_up(&mut self) {
        let prev = self.planet_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.planet_state.select(Some(prev));
    }

    pub fn planet_first(&mut self) {
        if !self.catalog.is_empty() {
            self.planet_state.select(Some(0));
        }
    }

    pub fn planet_last(&mut self) {
        if let Some(last) = self.catalog.len().checked_sub(1) {
            self.planet_state.select(Some(last));
        }
    }

    /// Put the highlighted planet in focus for chat
    pub fn travel_to_highlighted(&mut self) {
        let Some(index) = self.planet_state.selected() else {
            return;
        };
        let planet = self.catalog.get(index).cloned();
        self.controller.select_planet(planet.as_ref());
        self.scroll_chat_to_bottom();
    }

    pub fn leave_planet(&mut self) {
        self.controller.select_planet(None);
    }

    // Chat panel

    pub fn toggle_chat(&mut self) {
        self.controller.toggle_visibility();
        if !self.controller.state().is_visible {
            self.input_mode = InputMode::Normal;
            self.focus = FocusPane::Planets;
        }
    }

    pub fn clear_chat(&mut self) {
        self.controller.clear_chat();
        self.chat_scroll = 0;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPane::Planets if self.controller.state().is_visible => FocusPane::Chat,
            _ => FocusPane::Planets,
        };
    }

    pub fn start_editing(&mut self) {
        if !self.controller.state().is_visible {
            self.controller.toggle_visibility();
        }
        self.focus = FocusPane::Chat;
        self.input_mode = InputMode::Editing;
        self.input_cursor = self.input().chars().count();
    }

    pub fn scroll_chat_down(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_add(1);
    }

    pub fn scroll_chat_up(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    pub fn scroll_chat_page_down(&mut self) {
        let page = (self.chat_height / 2).max(1);
        self.chat_scroll = self.chat_scroll.saturating_add(page);
    }

    pub fn scroll_chat_page_up(&mut self) {
        let page = (self.chat_height / 2).max(1);
        self.chat_scroll = self.chat_scroll.saturating_sub(page);
    }

    /// Scroll chat to bottom so the newest message (or typing indicator) is visible
    pub fn scroll_chat_to_bottom(&mut self) {
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };

        let mut total_lines: usize = 0;
        for msg in &self.controller.state().messages {
            total_lines += 1; // "[HH:MM] You:" header
            for line in msg.content.lines() {
                let char_count = line.chars().count();
                total_lines += (char_count / wrap_width) + 1;
            }
            total_lines += 1; // blank line after message
        }
        if self.controller.is_typing() {
            total_lines += 2;
        }

        let visible_height = if self.chat_height > 0 {
            self.chat_height
        } else {
            20
        };

        let total_lines = u16::try_from(total_lines).unwrap_or(u16::MAX);
        self.chat_scroll = total_lines.saturating_sub(visible_height);
    }

    // Input editing; every change is mirrored into the controller

    fn edit_input(&mut self, edit: impl FnOnce(&mut String, &mut usize)) {
        let mut value = self.input().to_string();
        let mut cursor = self.input_cursor.min(value.chars().count());
        edit(&mut value, &mut cursor);
        self.input_cursor = cursor;
        self.controller.set_input_value(value);
    }

    pub fn insert_char(&mut self, c: char) {
        self.edit_input(|value, cursor| {
            let byte_pos = char_to_byte_index(value, *cursor);
            value.insert(byte_pos, c);
            *cursor += 1;
        });
    }

    pub fn backspace(&mut self) {
        self.edit_input(|value, cursor| {
            if *cursor > 0 {
                *cursor -= 1;
                let byte_pos = char_to_byte_index(value, *cursor);
                value.remove(byte_pos);
            }
        });
    }

    pub fn delete(&mut self) {
        self.edit_input(|value, cursor| {
            if *cursor < value.chars().count() {
                let byte_pos = char_to_byte_index(value, *cursor);
                value.remove(byte_pos);
            }
        });
    }

    pub fn cursor_left(&mut self) {
        self.input_cursor = self.input_cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let char_count = self.input().chars().count();
        self.input_cursor = (self.input_cursor + 1).min(char_count);
    }

    pub fn cursor_home(&mut self) {
        self.input_cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.input_cursor = self.input().chars().count();
    }

    /// Send the current input; the reply is picked up by `poll_reply`
    pub fn submit(&mut self) {
        let content = self.input().to_string();
        match self.controller.begin_send(&content) {
            Ok(in_flight) => {
                self.in_flight = Some(in_flight);
                self.input_cursor = 0;
                self.animation_frame = 0;
                self.scroll_chat_to_bottom();
            }
            Err(Rejection::Empty) => {}
            Err(Rejection::NoPlanetContext) => {
                self.status = Some("Select a planet first (Enter on the planet list)".to_string());
            }
            Err(Rejection::Busy) => {
                self.status = Some("The commander is still transmitting".to_string());
            }
        }
    }

    /// Record the reply once the background generation has finished
    pub async fn poll_reply(&mut self) {
        if !self.in_flight.as_ref().is_some_and(|f| f.is_finished()) {
            return;
        }
        if let Some(in_flight) = self.in_flight.take() {
            let settled = in_flight.settle().await;
            self.controller.complete_send(settled);
            self.scroll_chat_to_bottom();
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.controller.is_typing() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commander_core::{FallbackResponder, PersonaRegistry, ResponseGenerator, Sender};
    use std::sync::Arc;
    use std::time::Duration;

    fn app() -> App {
        App::with_controller(ConversationController::new(
            Arc::new(PersonaRegistry::new()),
            Arc::new(ResponseGenerator::new(FallbackResponder::seeded(4))),
        ))
    }

    async fn wait_for_reply(app: &mut App) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while app.in_flight.is_some() {
                tokio::task::yield_now().await;
                app.poll_reply().await;
            }
        })
        .await
        .expect("reply did not arrive");
    }

    #[test]
    fn test_editing_mirrors_into_controller() {
        let mut app = app();
        app.start_editing();
        for c in "héllo".chars() {
            app.insert_char(c);
        }
        app.cursor_left();
        app.backspace();
        assert_eq!(app.input(), "hélo");
        assert_eq!(app.controller.state().input_value, "hélo");

        app.cursor_home();
        app.delete();
        assert_eq!(app.input(), "élo");
        assert_eq!(app.input_cursor, 0);
    }

    #[test]
    fn test_travel_and_leave() {
        let mut app = app();
        app.planet_down();
        app.planet_down();
        app.travel_to_highlighted();
        assert_eq!(app.current_planet().map(|p| p.name), Some("Earth"));
        assert_eq!(app.controller.state().messages.len(), 1);

        app.leave_planet();
        assert!(app.current_planet().is_none());
        assert_eq!(app.controller.state().location_label(), "DEEP SPACE");
    }

    #[test]
    fn test_planet_cursor_stays_in_range() {
        let mut app = app();
        app.planet_up();
        assert_eq!(app.planet_state.selected(), Some(0));
        app.planet_last();
        app.planet_down();
        assert_eq!(app.planet_state.selected(), Some(app.catalog.len() - 1));
    }

    #[tokio::test]
    async fn test_submit_without_planet_sets_status() {
        let mut app = app();
        app.start_editing();
        app.insert_char('x');
        app.submit();

        assert!(app.in_flight.is_none());
        assert!(app.status.is_some());
        assert_eq!(app.input(), "x");
    }

    #[tokio::test]
    async fn test_submit_then_poll_appends_reply() {
        let mut app = app();
        app.planet_last();
        app.travel_to_highlighted();
        app.start_editing();
        for c in "hello".chars() {
            app.insert_char(c);
        }

        app.submit();
        assert!(app.controller.is_typing());
        assert_eq!(app.input(), "");

        wait_for_reply(&mut app).await;

        let messages = &app.controller.state().messages;
        assert!(!app.controller.is_typing());
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].content, "hello");
        assert_eq!(messages[2].sender, Sender::Commander);
    }

    #[tokio::test]
    async fn test_scroll_to_bottom_counts_long_messages() {
        let mut app = app();
        app.travel_to_highlighted();
        app.clear_chat();
        app.chat_width = 1_000;
        app.chat_height = 10;

        app.controller.set_input_value("x".repeat(70_000));
        app.submit();

        // header + 71 wrapped lines + blank + typing indicator (2)
        app.scroll_chat_to_bottom();
        assert_eq!(app.chat_scroll, 1 + 71 + 1 + 2 - 10);

        // More lines than a u16 holds: pinned, not wrapped around
        app.chat_width = 1;
        app.scroll_chat_to_bottom();
        assert_eq!(app.chat_scroll, u16::MAX - 10);

        wait_for_reply(&mut app).await;
    }

    #[test]
    fn test_hiding_chat_drops_editing() {
        let mut app = app();
        app.start_editing();
        app.toggle_chat();
        assert!(!app.controller.state().is_visible);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.focus, FocusPane::Planets);
    }
}

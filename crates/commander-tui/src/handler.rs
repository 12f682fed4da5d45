use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, FocusPane, InputMode};
use crate::tui::AppEvent;

pub async fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => {
            app.poll_reply().await;
            app.tick_animation();
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    app.status = None;

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        KeyCode::Char('j') | KeyCode::Down => match app.focus {
            FocusPane::Planets => app.planet_down(),
            FocusPane::Chat => app.scroll_chat_down(),
        },
        KeyCode::Char('k') | KeyCode::Up => match app.focus {
            FocusPane::Planets => app.planet_up(),
            FocusPane::Chat => app.scroll_chat_up(),
        },
        KeyCode::Char('g') if app.focus == FocusPane::Planets => app.planet_first(),
        KeyCode::Char('G') if app.focus == FocusPane::Planets => app.planet_last(),
        KeyCode::PageDown => app.scroll_chat_page_down(),
        KeyCode::PageUp => app.scroll_chat_page_up(),

        // Planet focus
        KeyCode::Enter | KeyCode::Char('l') if app.focus == FocusPane::Planets => {
            app.travel_to_highlighted();
        }
        KeyCode::Esc | KeyCode::Char('h') => app.leave_planet(),

        // Chat panel
        KeyCode::Tab => app.toggle_focus(),
        KeyCode::Char('i') | KeyCode::Char('/') => app.start_editing(),
        KeyCode::Enter if app.focus == FocusPane::Chat => app.start_editing(),
        KeyCode::Char('c') => app.toggle_chat(),
        KeyCode::Char('x') => app.clear_chat(),

        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => app.submit(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Home => app.cursor_home(),
        KeyCode::End => app.cursor_end(),
        KeyCode::Char(c) => app.insert_char(c),
        _ => {}
    }
}

use commander_core::{Sender, COMMANDER_NAME};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, FocusPane, InputMode};

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    let [planets_area, side_area] = Layout::horizontal([
        Constraint::Length(24),
        Constraint::Min(0),
    ])
    .areas(body_area);

    render_planets(app, frame, planets_area);

    if app.controller.state().is_visible {
        let [detail_area, chat_area, input_area] = Layout::vertical([
            Constraint::Length(7),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .areas(side_area);

        render_planet_detail(app, frame, detail_area);
        render_chat(app, frame, chat_area);
        render_input(app, frame, input_area);
    } else {
        render_planet_detail(app, frame, side_area);
    }

    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let location = app.controller.state().location_label().to_uppercase();

    let comms = if app.controller.has_provider() {
        Span::raw("")
    } else {
        Span::styled(" [canned replies]", Style::default().fg(Color::Red))
    };

    let title = Line::from(vec![
        Span::styled(" Solar Commander ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(format!("LOC: {}", location), Style::default().fg(Color::Yellow)),
        comms,
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let (mode_style, mode_text) = match app.input_mode {
        InputMode::Normal => (Style::default().bg(Color::Blue).fg(Color::White), " NORMAL "),
        InputMode::Editing => (Style::default().bg(Color::Yellow).fg(Color::Black), " INSERT "),
    };

    let help = if let Some(status) = &app.status {
        Span::styled(format!(" {} ", status), Style::default().fg(Color::Red))
    } else {
        let keys = match app.input_mode {
            InputMode::Normal => " j/k:move  Enter:travel  Esc:leave  i:type  c:chat  x:clear  Tab:focus  q:quit ",
            InputMode::Editing => " Enter:send  Esc:stop typing  Ctrl-C:quit ",
        };
        Span::styled(keys, Style::default().fg(Color::DarkGray))
    };

    let footer = Paragraph::new(Line::from(vec![Span::styled(mode_text, mode_style), help]));
    frame.render_widget(footer, area);
}

fn render_planets(app: &mut App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == FocusPane::Planets;
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Planets ");

    let current = app.controller.state().current_planet_context.as_deref();
    let items: Vec<ListItem> = app
        .catalog
        .all()
        .iter()
        .map(|planet| {
            // Mark the planet the commander is reporting from
            if Some(planet.name) == current {
                ListItem::new(format!(" {} *", planet.name)).style(Style::default().fg(Color::Yellow))
            } else {
                ListItem::new(format!(" {} ", planet.name))
            }
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.planet_state);
}

fn render_planet_detail(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(planet) = app.highlighted_planet() else {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };

    let mut lines = vec![Line::from(Span::styled(
        planet.classification,
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    ))];
    lines.push(Line::from(planet.description));

    if !app.controller.state().is_visible {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Comms channel closed. Press c to open it.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let detail = Paragraph::new(Text::from(lines))
        .block(block.title(format!(" {} ", planet.name)))
        .wrap(Wrap { trim: true });

    frame.render_widget(detail, area);
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    // Inner size minus borders, used for scroll calculations
    app.chat_height = area.height.saturating_sub(2);
    app.chat_width = area.width.saturating_sub(2);

    let focused = app.focus == FocusPane::Chat;
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };

    let state = app.controller.state();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", COMMANDER_NAME));

    let chat_text = if state.messages.is_empty() && !state.is_typing {
        let hint = if state.current_planet_context.is_some() {
            "Channel open. Say hello to the commander..."
        } else {
            "Travel to a planet to open a channel..."
        };
        Text::from(Span::styled(hint, Style::default().fg(Color::DarkGray)))
    } else {
        let mut lines: Vec<Line> = Vec::new();

        for msg in &state.messages {
            let (name, color) = match msg.sender {
                Sender::User => ("You", Color::Cyan),
                Sender::Commander => (COMMANDER_NAME, Color::Yellow),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("[{}] ", msg.display_time()), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{}:", name),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]));
            for line in msg.content.lines() {
                lines.push(Line::from(line.to_string()));
            }
            lines.push(Line::default());
        }

        if state.is_typing {
            lines.push(Line::from(Span::styled(
                format!("{}:", COMMANDER_NAME),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
            // Animated ellipsis: cycles through ".", "..", "..."
            let dots = ".".repeat((app.animation_frame as usize) + 1);
            lines.push(Line::from(Span::styled(
                format!("Transmitting{}", dots),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )));
        }

        Text::from(lines)
    };

    let chat = Paragraph::new(chat_text)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.chat_scroll, 0));

    frame.render_widget(chat, area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let border_color = if editing { Color::Yellow } else { Color::DarkGray };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Message (i to type) ");

    // Horizontal scrolling keeps the cursor visible
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.input_cursor;
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let visible_text: String = app
        .input()
        .chars()
        .skip(scroll_offset)
        .take(inner_width)
        .collect();

    let input = Paragraph::new(visible_text)
        .style(Style::default().fg(Color::Cyan))
        .block(block);

    frame.render_widget(input, area);

    if editing {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

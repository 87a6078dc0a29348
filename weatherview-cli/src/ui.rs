//! Drawing a [`Screen`] with ratatui. Stateless apart from the spinner frame.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use weatherview_core::view::{Card, ConditionsCard, MainScreen, Screen};

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];
const CARD_WIDTH: u16 = 48;
const BANNER_COLOR: Color = Color::Rgb(0xff, 0x20, 0x8c);
const ACCENT: Color = Color::Rgb(0x1a, 0xb8, 0xed);

pub fn draw(frame: &mut Frame, screen: &Screen, tick: usize) {
    let area = frame.area();
    match screen {
        Screen::Splash => draw_spinner(frame, area, tick),
        Screen::Main(main) => draw_main(frame, area, main, tick),
    }
}

fn spinner_frame(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}

fn draw_spinner(frame: &mut Frame, area: Rect, tick: usize) {
    let [row] = Layout::vertical([Constraint::Length(1)]).flex(Flex::Center).areas(area);
    frame.render_widget(
        Paragraph::new(spinner_frame(tick)).alignment(Alignment::Center).fg(Color::White),
        row,
    );
}

fn draw_main(frame: &mut Frame, area: Rect, main: &MainScreen, tick: usize) {
    let [column] =
        Layout::horizontal([Constraint::Length(CARD_WIDTH)]).flex(Flex::Center).areas(area);

    let banner_height = if main.banner.is_some() { 3 } else { 0 };
    let [banner_area, search_area, card_area] = Layout::vertical([
        Constraint::Length(banner_height),
        Constraint::Length(3),
        Constraint::Min(12),
    ])
    .areas(column);

    if let Some(message) = &main.banner {
        frame.render_widget(
            Paragraph::new(message.as_str())
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
                .style(Style::default().bg(BANNER_COLOR).fg(Color::White)),
            banner_area,
        );
    }

    draw_search(frame, search_area, main, tick);

    let card_block = Block::default().borders(Borders::ALL).border_type(BorderType::Rounded);
    let inner = card_block.inner(card_area);
    frame.render_widget(card_block, card_area);

    match &main.card {
        Card::Spinner => draw_spinner(frame, inner, tick),
        Card::Unavailable => {
            let [row] = Layout::vertical([Constraint::Length(1)]).flex(Flex::Center).areas(inner);
            frame.render_widget(
                Paragraph::new("No weather yet. Search for a place.")
                    .alignment(Alignment::Center)
                    .dim(),
                row,
            );
        }
        Card::Conditions(card) => draw_conditions(frame, inner, card),
    }
}

fn draw_search(frame: &mut Frame, area: Rect, main: &MainScreen, tick: usize) {
    // Shake: nudge the box sideways on alternate frames.
    let area = if main.shaking && tick % 2 == 1 && area.width > 2 {
        Rect { x: area.x + 1, width: area.width - 1, ..area }
    } else {
        area
    };

    let border = if main.shaking { Color::Red } else { ACCENT };
    let text = if main.input.is_empty() {
        Line::from(Span::styled("Search by city or country", Style::default().dim()))
    } else {
        Line::from(main.input.as_str())
    };

    frame.render_widget(
        Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border))
                .title(" Enter to search · Esc to quit "),
        ),
        area,
    );
}

fn draw_conditions(frame: &mut Frame, area: Rect, card: &ConditionsCard) {
    let icon = match card.icon {
        Some(icon) => {
            let style = match icon.accent() {
                Some((r, g, b)) => Style::default().fg(Color::Rgb(r, g, b)),
                None => Style::default(),
            };
            Span::styled(icon.glyph(), style)
        }
        None => Span::raw(" "),
    };

    let mut header =
        vec![icon, Span::raw("  "), Span::styled(card.location.clone(), Style::default().bold())];
    if card.stale {
        header.push(Span::styled("  (stale)", Style::default().dim()));
    }

    let lines = vec![
        Line::from(header),
        Line::from(format!("   {}", card.date)).dim(),
        Line::default(),
        Line::from(Span::styled(format!("{}°C", card.temperature), Style::default().bold()))
            .centered(),
        Line::from(card.description.clone()).centered(),
        Line::default(),
        Line::from(format!("Humidity  {:<10}Wind  {}", card.humidity, card.wind)),
        Line::from(format!("Visibility  {:<8}Feels like  {}°C", card.visibility, card.feels_like)),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

// File: src/tui/view.rs
use crate::marker::{self, MarkerColor, Theme};
use crate::projection;
use crate::tui::state::AppState;

use chrono::{DateTime, Local, Utc};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, List, ListItem, Paragraph, Wrap,
        canvas::{Canvas, Circle, Map, MapResolution, Points},
    },
};

const DRAWER_WIDTH: u16 = 44;

/// Degrees of longitude covered by one marker "pixel" at full world zoom.
const DEG_PER_PX: f64 = 0.12;

struct Palette {
    background: Color,
    coastline: Color,
    accent: Color,
    muted: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            background: Color::Reset,
            coastline: Color::Gray,
            accent: Color::Blue,
            muted: Color::DarkGray,
        },
        Theme::Dark => Palette {
            background: Color::Black,
            coastline: Color::DarkGray,
            accent: Color::LightCyan,
            muted: Color::Gray,
        },
    }
}

fn marker_color(color: MarkerColor, theme: Theme) -> Color {
    let (r, g, b) = marker::palette(color, theme);
    Color::Rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

fn local_time(t: DateTime<Utc>) -> String {
    t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let theme = state.viewer.theme();
    let pal = palette(theme);

    let full_help_text = vec![
        Line::from(vec![
            Span::styled(
                " GLOBAL ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" t:Toggle Theme  r:Refresh  ?:Toggle Help  q:Quit"),
        ]),
        Line::from(vec![
            Span::styled(
                " MAP ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Arrows/hjkl:Pan  +/-:Zoom  0:Reset View"),
        ]),
        Line::from(vec![
            Span::styled(
                " LIST ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Tab/m:Open/Close  j/k:Up/Down  Enter:Details  Esc:Close Details"),
        ]),
    ];

    let footer_height = if state.show_full_help {
        Constraint::Length(full_help_text.len() as u16 + 2)
    } else {
        Constraint::Length(3)
    };

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), footer_height])
        .split(f.area());

    // --- Title bar ---
    let mut title_spans = vec![Span::styled(
        " SeismoMap ",
        Style::default().fg(pal.accent).add_modifier(Modifier::BOLD),
    )];
    if let Some(snapshot) = state.viewer.snapshot() {
        title_spans.push(Span::raw(format!(" {} events ", snapshot.len())));
    }
    let title = Paragraph::new(Line::from(title_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(pal.background)),
    );
    f.render_widget(title, v_chunks[0]);

    let mut right_spans = Vec::new();
    if let Some(updated) = state.viewer.last_updated() {
        right_spans.push(Span::raw(format!(
            "Last Updated: {} ",
            updated.with_timezone(&Local).format("%H:%M:%S")
        )));
    }
    right_spans.push(Span::styled(
        format!("[t] {} ", theme.label()),
        Style::default().fg(pal.muted),
    ));
    let inner_title = Rect {
        x: v_chunks[0].x + 1,
        y: v_chunks[0].y + 1,
        width: v_chunks[0].width.saturating_sub(2),
        height: 1,
    };
    f.render_widget(
        Paragraph::new(Line::from(right_spans)).alignment(Alignment::Right),
        inner_title,
    );

    // --- Drawer + Map ---
    let body = v_chunks[1];
    let map_area = if state.viewer.drawer().is_open() {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(DRAWER_WIDTH), Constraint::Min(0)])
            .split(body);
        draw_drawer(f, state, h_chunks[0], &pal);
        h_chunks[1]
    } else {
        body
    };
    draw_map(f, state, map_area, &pal);

    // --- Footer ---
    let footer_area = v_chunks[2];
    f.render_widget(Clear, footer_area);
    let status_text = if state.viewer.is_loading() {
        format!("{} {}", state.spinner(), state.message)
    } else {
        state.message.clone()
    };

    if state.show_full_help {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(footer_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Keyboard Shortcuts (Press ? to minimize) ")
            .border_style(Style::default().fg(Color::Cyan));
        let p = Paragraph::new(full_help_text)
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(p, h_chunks[0]);
        let status = Paragraph::new(status_text)
            .style(Style::default().fg(Color::Cyan))
            .block(Block::default().borders(Borders::ALL).title(" Status "));
        f.render_widget(status, h_chunks[1]);
    } else {
        let f_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(footer_area);
        let status = Paragraph::new(status_text)
            .style(Style::default().fg(Color::Cyan))
            .block(
                Block::default()
                    .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                    .title(" Status "),
            );
        let help_str = if state.viewer.drawer().is_open() {
            "j/k:Select Ret:Details Tab:Close t:Theme r:Refresh ?:Help"
        } else {
            "Arrows:Pan +/-:Zoom Tab:List t:Theme r:Refresh ?:Help"
        };
        let help = Paragraph::new(help_str)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                    .title(" Actions "),
            );
        f.render_widget(status, f_chunks[0]);
        f.render_widget(help, f_chunks[1]);
    }

    // --- Popup ---
    if state.show_popup
        && let Some(event) = state.selected_event()
    {
        let p = projection::popup(event);
        let area = centered_rect(60, 40, f.area());
        let severity = marker::MarkerStyle::for_magnitude(event.magnitude).color;
        let (r, g, b) = marker::palette(severity, theme);
        let text_color = if marker::is_dark(r, g, b) {
            Color::White
        } else {
            Color::Black
        };
        let lines = vec![
            Line::from(Span::styled(
                format!(" {} ", p.title),
                Style::default()
                    .bg(marker_color(severity, theme))
                    .fg(text_color)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(p.depth),
            Line::from(local_time(p.time)),
            Line::from(""),
            Line::from(vec![
                Span::raw("More Info: "),
                Span::styled(
                    p.detail_url,
                    Style::default()
                        .fg(pal.accent)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]),
        ];
        let popup = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(" Event (Esc to close) ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        f.render_widget(Clear, area);
        f.render_widget(popup, area);
    }
}

fn draw_drawer(f: &mut Frame, state: &mut AppState, area: Rect, pal: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Earthquake List ")
        .border_style(Style::default().fg(Color::Yellow));

    if state.viewer.is_loading() {
        let p = Paragraph::new(format!("{} Loading...", state.spinner()))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let theme = state.viewer.theme();
    let items: Vec<ListItem> = state
        .viewer
        .list_entries()
        .into_iter()
        .zip(state.viewer.markers())
        .map(|(entry, m)| {
            let color = marker_color(m.style.color, theme);
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled("● ", Style::default().fg(color)),
                    Span::raw(entry.title),
                ]),
                Line::from(Span::styled(
                    format!("  {}", local_time(entry.time)),
                    Style::default().fg(pal.muted),
                )),
            ])
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .add_modifier(Modifier::BOLD)
            .bg(Color::Blue),
    );
    f.render_stateful_widget(list, area, &mut state.list_state);
}

fn draw_map(f: &mut Frame, state: &AppState, area: Rect, pal: &Palette) {
    let theme = state.viewer.theme();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Map (zoom {}) ", state.viewport.zoom()))
        .title_bottom(Line::from(Span::styled(
            format!(" {} | {} ", state.viewer.tile_url(), state.viewer.attribution()),
            Style::default().fg(pal.muted),
        )))
        .style(Style::default().bg(pal.background));

    if state.viewer.is_loading() {
        let inner = block.inner(area);
        f.render_widget(block, area);
        let v = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(50),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);
        f.render_widget(
            Paragraph::new(format!("{} Loading earthquakes...", state.spinner()))
                .alignment(Alignment::Center),
            v[1],
        );
        return;
    }

    let markers = state.viewer.markers();
    let selected = state.selected_event().map(|e| e.id.clone());
    // Radius shrinks with zoom so markers keep a constant on-screen size
    let deg_per_px = DEG_PER_PX * state.viewport.lon_span() / 360.0;
    let coastline = pal.coastline;
    let accent = pal.accent;

    let canvas = Canvas::default()
        .block(block)
        .background_color(pal.background)
        .marker(symbols::Marker::Braille)
        .x_bounds(state.viewport.x_bounds())
        .y_bounds(state.viewport.y_bounds())
        .paint(move |ctx| {
            ctx.draw(&Map {
                color: coastline,
                resolution: MapResolution::High,
            });
            ctx.layer();
            for m in &markers {
                ctx.draw(&Circle {
                    x: m.longitude,
                    y: m.latitude,
                    radius: (m.style.diameter_px / 2.0).max(0.0) * deg_per_px,
                    color: marker_color(m.style.color, theme),
                });
            }
            if let Some(id) = &selected
                && let Some(m) = markers.iter().find(|m| &m.id == id)
            {
                ctx.layer();
                ctx.draw(&Points {
                    coords: &[(m.longitude, m.latitude)],
                    color: accent,
                });
                ctx.draw(&Circle {
                    x: m.longitude,
                    y: m.latitude,
                    radius: (m.style.diameter_px / 2.0).max(1.0) * deg_per_px * 1.6,
                    color: accent,
                });
            }
        });
    f.render_widget(canvas, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

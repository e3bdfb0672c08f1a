pub mod settings;

use std::time::SystemTime;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::{
    app::App,
    config::WORD_COUNT_PRESETS,
    session::{Session, WordStatus},
    theme::Palette,
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
const MAX_CARD_WIDTH: u16 = 100;

const CORRECT: Color = Color::Rgb(74, 222, 128);
const INCORRECT: Color = Color::Rgb(248, 113, 113);

/// Placeholder shown instead of a zero statistic
fn stat_or_blank(value: u32) -> String {
    if value == 0 {
        "__".to_owned()
    } else {
        value.to_string()
    }
}

pub fn stats_line(session: &Session) -> String {
    let result = session.result();
    format!(
        "WPM: {} / ACC: {}%",
        stat_or_blank(result.wpm),
        stat_or_blank(result.accuracy)
    )
}

fn header_line(app: &App, palette: Palette) -> Line<'static> {
    let bold = Style::default().fg(palette.header).add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled("HighKey", bold),
        Span::raw("    "),
    ];
    for (i, count) in WORD_COUNT_PRESETS.iter().enumerate() {
        let style = if *count == app.word_count() {
            bold.add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(palette.header)
        };
        spans.push(Span::styled(count.to_string(), style));
        if i + 1 < WORD_COUNT_PRESETS.len() {
            spans.push(Span::styled(" / ", Style::default().fg(palette.text)));
        }
    }
    spans.push(Span::raw("    "));
    spans.push(Span::styled("Themes (ctrl+t)", Style::default().fg(palette.header)));

    Line::from(spans)
}

fn word_spans(session: &Session, palette: Palette) -> Vec<Span<'static>> {
    session
        .words()
        .iter()
        .enumerate()
        .flat_map(|(idx, word)| {
            let style = match session.word_status(idx) {
                WordStatus::Correct => Style::default().fg(CORRECT),
                WordStatus::Incorrect => Style::default().fg(INCORRECT),
                WordStatus::Pending if idx == session.current_index() => Style::default()
                    .fg(palette.header)
                    .add_modifier(Modifier::UNDERLINED),
                WordStatus::Pending => Style::default().fg(palette.text),
            };
            [Span::styled(word.clone(), style), Span::raw(" ")]
        })
        .collect()
}

fn input_block(session: &Session, palette: Palette) -> Paragraph<'static> {
    let border = if session.input_on_track() {
        Style::default().fg(palette.button)
    } else {
        Style::default().fg(INCORRECT)
    };

    let content = if session.is_finished() {
        Line::from(Span::styled(
            "test complete, press tab to go again",
            Style::default().fg(palette.text).add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(vec![
            Span::styled(
                session.current_input().to_owned(),
                Style::default().fg(palette.header),
            ),
            Span::styled("▏", Style::default().fg(palette.header)),
        ])
    };

    Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .style(Style::default().bg(palette.background)),
    )
}

/// Centre a rectangle of at most `width` x `height` inside `area`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;
        let palette = self.theme().palette();
        let font = self.font().style();

        buf.set_style(
            area,
            Style::default().bg(palette.background).fg(palette.text).patch(font),
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Min(6),    // test
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(header_line(self, palette))
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let card_width = chunks[1].width.min(MAX_CARD_WIDTH);
        let words_width = card_width.saturating_sub(4).max(1);
        let text_width: usize = session.words().iter().map(|w| w.chars().count() + 1).sum();
        let text_width = u16::try_from(text_width).unwrap_or(u16::MAX);
        let word_lines = (text_width / words_width).saturating_add(1).min(chunks[1].height);

        // stats, gap, words card (with borders), input box
        let body_height = 1 + 1 + (word_lines + 2) + 3;
        let body = centered(chunks[1], card_width, body_height);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(body);

        let mut stats = vec![Span::styled(
            stats_line(session),
            Style::default().fg(palette.header).add_modifier(Modifier::BOLD),
        )];
        if session.has_started() && !session.is_finished() {
            let elapsed = session.elapsed(SystemTime::now());
            stats.push(Span::styled(
                format!("   {:.1}s", elapsed.as_secs_f64()),
                Style::default().fg(palette.text).add_modifier(Modifier::DIM),
            ));
        }
        Paragraph::new(Line::from(stats))
            .alignment(Alignment::Center)
            .render(rows[0], buf);

        Paragraph::new(Line::from(word_spans(session, palette)))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.card))
                    .style(Style::default().bg(palette.card)),
            )
            .render(rows[2], buf);

        input_block(session, palette).render(rows[3], buf);

        Paragraph::new(Span::styled(
            "(tab) reset / (←/→) words / (ctrl+t) themes / (esc) quit",
            Style::default().fg(palette.text).add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

        if self.dialog.is_open() {
            settings::render_dialog(self, area, buf);
        }
    }
}

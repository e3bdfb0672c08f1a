use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    dialog::{DialogButton, SettingsDialog},
    theme::{Font, Theme},
};

use super::centered;

const BUTTONS_PER_ROW: usize = 3;
const BUTTON_PADDING: usize = 2;

fn label(button: DialogButton) -> String {
    match button {
        DialogButton::Theme(theme) => {
            let name = theme.to_string();
            let mut chars = name.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => name,
            }
        }
        DialogButton::Font(font) => font.to_string(),
        DialogButton::Close => "Close".to_owned(),
    }
}

fn button_style(button: DialogButton, focused: bool, theme: Theme, font: Font) -> Style {
    // preview the palette or typeface the button would apply
    let mut style = match button {
        DialogButton::Theme(t) => {
            let palette = t.palette();
            Style::default().bg(palette.background).fg(palette.header)
        }
        DialogButton::Font(f) => {
            let palette = theme.palette();
            f.style().bg(palette.card).fg(palette.text)
        }
        DialogButton::Close => Style::default().fg(theme.palette().text),
    };

    if SettingsDialog::is_disabled(button, theme, font) {
        style = style.add_modifier(Modifier::DIM | Modifier::CROSSED_OUT);
    }
    if focused {
        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
    }
    style
}

fn button_rows(
    buttons: &[(usize, DialogButton)],
    cell_width: usize,
    dialog: &SettingsDialog,
    theme: Theme,
    font: Font,
) -> Vec<Line<'static>> {
    buttons
        .chunks(BUTTONS_PER_ROW)
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .flat_map(|&(idx, button)| {
                    let text = format!("{:^cell_width$}", label(button));
                    [
                        Span::styled(text, button_style(button, dialog.focus() == idx, theme, font)),
                        Span::raw(" "),
                    ]
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

pub fn render_dialog(app: &App, area: Rect, buf: &mut Buffer) {
    let theme = app.theme();
    let font = app.font();
    let palette = theme.palette();

    let buttons: Vec<(usize, DialogButton)> =
        SettingsDialog::buttons().into_iter().enumerate().collect();
    let cell_width = buttons
        .iter()
        .map(|&(_, b)| label(b).width())
        .max()
        .unwrap_or(0)
        + BUTTON_PADDING * 2;

    let themes: Vec<_> = buttons
        .iter()
        .copied()
        .filter(|(_, b)| matches!(b, DialogButton::Theme(_)))
        .collect();
    let fonts: Vec<_> = buttons
        .iter()
        .copied()
        .filter(|(_, b)| matches!(b, DialogButton::Font(_)))
        .collect();
    let close = buttons
        .iter()
        .copied()
        .find(|(_, b)| *b == DialogButton::Close);

    let heading = Style::default().fg(palette.header).add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::from(Span::styled("Select a Theme", heading)), Line::raw("")];
    lines.extend(button_rows(&themes, cell_width, &app.dialog, theme, font));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Select a Font", heading)));
    lines.push(Line::raw(""));
    lines.extend(button_rows(&fonts, cell_width, &app.dialog, theme, font));
    lines.push(Line::raw(""));
    if let Some((idx, button)) = close {
        lines.push(Line::from(Span::styled(
            label(button),
            button_style(button, app.dialog.focus() == idx, theme, font),
        )));
    }

    let width = ((cell_width + 1) * BUTTONS_PER_ROW + 4) as u16;
    let height = lines.len() as u16 + 2;
    let popup = centered(area, width, height);

    Clear.render(popup, buf);
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" settings (tab/shift+tab, enter, esc) ")
                .border_style(Style::default().fg(palette.header))
                .style(Style::default().bg(palette.card)),
        )
        .render(popup, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(label(DialogButton::Theme(Theme::Dracula)), "Dracula");
        assert_eq!(label(DialogButton::Font(Font::FiraCode)), "Fira Code");
        assert_eq!(label(DialogButton::Close), "Close");
    }

    #[test]
    fn test_focused_button_is_reversed() {
        let style = button_style(DialogButton::Close, true, Theme::Dark, Font::Ubuntu);
        assert!(style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_active_theme_button_is_dimmed() {
        let style = button_style(DialogButton::Theme(Theme::Dark), false, Theme::Dark, Font::Ubuntu);
        assert!(style.add_modifier.contains(Modifier::DIM));

        let style = button_style(DialogButton::Theme(Theme::Nord), false, Theme::Dark, Font::Ubuntu);
        assert!(!style.add_modifier.contains(Modifier::DIM));
    }
}

pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{session::Phase, view_model::ViewModel, vocab::category_label, App};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;
const LEGEND: &str = "(space) pause / (enter) next / (r)estart / (esc)ape";

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let vm = self.view_model();
        screen::current_screen(&vm).render(self, &vm, area, buf);
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn italic() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

// Width of a box wide enough for both words, capped to the available area
fn word_box_width(vm: &ViewModel<'_>, available: u16) -> u16 {
    let widest = vm
        .current
        .map(|pair| pair.source.text.width().max(pair.target.text.width()))
        .unwrap_or(0);
    u16::try_from((widest + 8).max(24))
        .unwrap_or(u16::MAX)
        .min(available)
}

pub(crate) fn render_playing(app: &App, vm: &ViewModel<'_>, area: Rect, buf: &mut Buffer) {
    let Some(pair) = vm.current else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // progress
            Constraint::Min(0),    // padding
            Constraint::Length(3), // source word
            Constraint::Length(3), // translation
            Constraint::Length(1), // countdown
            Constraint::Length(1), // hint
            Constraint::Min(0),    // padding
            Constraint::Length(1), // legend
        ])
        .split(area);

    let progress = Gauge::default()
        .ratio(vm.progress.clamp(0.0, 1.0))
        .label(format!("word {} of {}", vm.index + 1, vm.total))
        .gauge_style(Style::default().fg(Color::Cyan));
    progress.render(chunks[0], buf);

    let box_width = word_box_width(vm, chunks[2].width);
    let centered = |r: Rect| Rect {
        x: r.x + (r.width.saturating_sub(box_width)) / 2,
        width: box_width,
        ..r
    };

    let source_title = app.vocabulary.language_label(vm.source_language);
    Paragraph::new(Span::styled(pair.source.text.clone(), bold()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(source_title))
        .render(centered(chunks[2]), buf);

    let target_title = app.vocabulary.language_label(vm.target_language);
    let translation = if vm.revealed {
        let style = if pair.target.is_placeholder() {
            italic().fg(Color::DarkGray)
        } else {
            bold().fg(Color::Green)
        };
        Span::styled(pair.target.text.clone(), style)
    } else {
        Span::styled("?", bold().add_modifier(Modifier::DIM))
    };
    Paragraph::new(translation)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(target_title))
        .render(centered(chunks[3]), buf);

    let countdown_color = match vm.phase {
        Phase::Memorize => Color::Yellow,
        Phase::Reveal => Color::Magenta,
    };
    Gauge::default()
        .ratio(vm.time_remaining.clamp(0.0, 1.0))
        .label(format!("{}s", vm.countdown))
        .gauge_style(Style::default().fg(countdown_color))
        .render(centered(chunks[4]), buf);

    let hint = if vm.paused {
        Span::styled(
            "PAUSED - press space to resume",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        )
    } else {
        match vm.phase {
            Phase::Memorize => Span::styled(
                format!("Memorize the word, the translation shows in {}s", vm.countdown),
                italic(),
            ),
            Phase::Reveal => Span::styled(
                format!("Next word in {}s", vm.countdown),
                italic(),
            ),
        }
    };
    Paragraph::new(hint)
        .alignment(Alignment::Center)
        .render(chunks[5], buf);

    Paragraph::new(Span::styled(LEGEND, italic())).render(chunks[7], buf);
}

pub(crate) fn render_recap(app: &App, vm: &ViewModel<'_>, area: Rect, buf: &mut Buffer) {
    let pairs = vm.recap.unwrap_or_default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // title
            Constraint::Length(1), // padding
            Constraint::Min(3),    // table
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled(
        format!("Session complete - {} words", pairs.len()),
        bold().fg(Color::Cyan),
    ))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    let header = Row::new(vec![
        Cell::from(app.vocabulary.language_label(vm.source_language)),
        Cell::from(app.vocabulary.language_label(vm.target_language)),
        Cell::from("Category"),
    ])
    .style(bold().fg(Color::Yellow));

    let rows: Vec<Row> = pairs
        .iter()
        .map(|pair| {
            let target_style = if pair.target.is_placeholder() {
                italic().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Green)
            };
            Row::new(vec![
                Cell::from(pair.source.text.clone()),
                Cell::from(pair.target.text.clone()).style(target_style),
                Cell::from(category_label(&pair.source.category)),
            ])
        })
        .collect();

    Table::new(
        rows,
        [
            Constraint::Percentage(35),
            Constraint::Percentage(35),
            Constraint::Percentage(30),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Recap"))
    .render(chunks[2], buf);

    Paragraph::new(Span::styled("(r)estart / (esc)ape", italic())).render(chunks[3], buf);
}

pub(crate) fn render_empty(app: &App, vm: &ViewModel<'_>, area: Rect, buf: &mut Buffer) {
    let text = vec![
        Line::from(Span::styled(
            "Nothing to play",
            bold().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(format!(
            "No {} words match the selected categories.",
            app.vocabulary.language_label(vm.source_language)
        )),
        Line::from(""),
        Line::from(Span::styled("(esc)ape", italic())),
    ];

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);
}

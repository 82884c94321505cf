//! Soundscape list

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

pub fn render_sounds(
    frame: &mut Frame,
    area: Rect,
    sounds: &[String],
    selected: usize,
    active: Option<&str>,
) {
    let items: Vec<ListItem> = sounds
        .iter()
        .map(|name| {
            let marker = if active == Some(name.as_str()) { "▶ " } else { "  " };
            ListItem::new(format!("{marker}{name}"))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title(" Sounds ").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut state);
}

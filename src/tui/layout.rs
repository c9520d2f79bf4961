use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::domain::LoadingState;
use crate::locale::{Locale, MessageKey};
use crate::tui::app::{ActivePane, TuiApp};
use crate::view::Regions;

pub fn render(
    frame: &mut Frame,
    app: &mut TuiApp,
    regions: &Regions,
    locale: Locale,
    colors: &ColorConfig,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),      // Input + feedback
            Constraint::Percentage(30), // Feeds pane
            Constraint::Min(6),         // Posts pane
            Constraint::Length(1),      // Status bar
        ])
        .split(frame.area());

    render_input(frame, app, regions, chunks[0], colors);
    render_feeds_pane(frame, app, regions, locale, chunks[1], colors);
    render_posts_pane(frame, app, regions, locale, chunks[2], colors);
    render_status_bar(frame, app, regions, chunks[3], colors);

    if regions.modal.is_some() {
        render_modal(frame, regions, locale, colors);
    }
}

fn border_style(active: bool, colors: &ColorConfig) -> Style {
    if active {
        Style::default().fg(colors.active_border)
    } else {
        Style::default().fg(colors.inactive_border)
    }
}

fn highlight_style(active: bool, colors: &ColorConfig) -> Style {
    if active {
        Style::default()
            .bg(colors.selection_bg_active)
            .fg(colors.selection_fg_active)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .bg(colors.selection_bg_inactive)
            .fg(colors.selection_fg_inactive)
    }
}

fn render_input(frame: &mut Frame, app: &TuiApp, regions: &Regions, area: Rect, colors: &ColorConfig) {
    let form = &regions.form;

    let input_style = if form.locked {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };
    let cursor = if app.editing && !form.locked { "_" } else { "" };
    let mut lines = vec![Line::from(Span::styled(
        format!("{}{}", app.input, cursor),
        input_style,
    ))];

    if let Some(feedback) = &form.feedback {
        let color = if feedback.is_error {
            colors.feedback_error
        } else {
            colors.feedback_success
        };
        lines.push(Line::from(Span::styled(
            feedback.text.clone(),
            Style::default().fg(color),
        )));
    }

    let block = Block::default()
        .title(" RSS URL ")
        .borders(Borders::ALL)
        .border_style(border_style(app.editing, colors));

    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

fn render_feeds_pane(
    frame: &mut Frame,
    app: &mut TuiApp,
    regions: &Regions,
    locale: Locale,
    area: Rect,
    colors: &ColorConfig,
) {
    let is_active = !app.editing && app.active_pane == ActivePane::Feeds;

    let items: Vec<ListItem> = regions
        .feeds
        .iter()
        .map(|feed| {
            let mut lines = vec![Line::from(Span::styled(
                feed.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ))];
            if !feed.description.is_empty() {
                lines.push(Line::from(format!("  {}", feed.description)));
            }
            ListItem::new(Text::from(lines))
        })
        .collect();

    let block = Block::default()
        .title(format!(" {} ({}) ", locale.text(MessageKey::Feeds), regions.feeds.len()))
        .borders(Borders::ALL)
        .border_style(border_style(is_active, colors));

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style(is_active, colors))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.feed_list_state);
}

fn render_posts_pane(
    frame: &mut Frame,
    app: &mut TuiApp,
    regions: &Regions,
    locale: Locale,
    area: Rect,
    colors: &ColorConfig,
) {
    let is_active = !app.editing && app.active_pane == ActivePane::Posts;

    let items: Vec<ListItem> = regions
        .posts
        .iter()
        .map(|post| {
            let date = post
                .published_at
                .map(|d| d.format("%m/%d").to_string())
                .unwrap_or_else(|| "     ".to_string());
            let marker = if post.unread { "●" } else { " " };

            let style = if post.unread {
                Style::default()
                    .fg(colors.unviewed_post)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.viewed_post)
            };

            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", marker)),
                Span::styled(format!("{} ", date), Style::default().fg(colors.metadata_date)),
                Span::raw(post.title.clone()),
            ]))
            .style(style)
        })
        .collect();

    let position = app.post_list_state.selected().map_or(0, |i| i + 1);
    let block = Block::default()
        .title(format!(
            " {} [{}/{}] ",
            locale.text(MessageKey::Posts),
            position,
            regions.posts.len()
        ))
        .borders(Borders::ALL)
        .border_style(border_style(is_active, colors));

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style(is_active, colors))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.post_list_state);
}

fn render_modal(frame: &mut Frame, regions: &Regions, locale: Locale, colors: &ColorConfig) {
    let Some(modal) = &regions.modal else {
        return;
    };
    let area = centered_rect(70, 60, frame.area());

    let mut lines = vec![
        Line::from(Span::styled(
            modal.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for line in modal.description.lines() {
        lines.push(Line::from(line.to_string()));
    }
    if let Some(link) = &modal.link {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            link.clone(),
            Style::default().fg(colors.metadata_link),
        )));
    }

    let block = Block::default()
        .title(format!(" {} ", locale.text(MessageKey::View)))
        .title_bottom(" o:Open  Esc:Close ")
        .borders(Borders::ALL)
        .border_style(border_style(true, colors));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn render_status_bar(
    frame: &mut Frame,
    app: &TuiApp,
    regions: &Regions,
    area: Rect,
    colors: &ColorConfig,
) {
    let status = if regions.loading == LoadingState::Loading {
        "Loading feed...".to_string()
    } else if let Some(msg) = &app.status_message {
        msg.clone()
    } else if app.editing {
        "Enter:Add  Esc:Back".to_string()
    } else {
        "a:Add  j/k:Nav  Tab:Pane  Enter:View  o:Open  q:Quit".to_string()
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

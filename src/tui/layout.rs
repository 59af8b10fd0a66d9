use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::tui::app::{ActivePane, TuiApp};

pub fn render(frame: &mut Frame, app: &TuiApp, colors: &ColorConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),      // Live counts
            Constraint::Percentage(50), // Feed
            Constraint::Min(6),         // Comments
            Constraint::Length(1),      // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, colors, chunks[0]);
    render_feed_pane(frame, app, colors, chunks[1]);
    render_comments_pane(frame, app, colors, chunks[2]);
    render_status_bar(frame, app, colors, chunks[3]);
}

fn border_style(app: &TuiApp, pane: ActivePane, colors: &ColorConfig) -> Style {
    if app.active_pane == pane {
        Style::default().fg(colors.active_border)
    } else {
        Style::default().fg(colors.inactive_border)
    }
}

fn render_header(frame: &mut Frame, app: &TuiApp, colors: &ColorConfig, area: Rect) {
    let live = match app.live {
        Some(counts) => format!(
            "Items updated: {}  Profiles updated: {}",
            counts.items, counts.profiles
        ),
        None => "Waiting for live updates...".to_string(),
    };

    let line = Line::from(vec![
        Span::styled(
            " Ripple ",
            Style::default()
                .fg(colors.selection_fg)
                .bg(colors.selection_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(live, Style::default().fg(colors.live)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_feed_pane(frame: &mut Frame, app: &TuiApp, colors: &ColorConfig, area: Rect) {
    let now = Utc::now();

    let items: Vec<ListItem> = app
        .posts
        .iter()
        .enumerate()
        .map(|(i, post)| {
            let mut spans = vec![
                Span::raw(format!("{:>3}. ", i + 1)),
                Span::styled(
                    post.display_title().to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ];
            if let Some(domain) = post.domain() {
                spans.push(Span::styled(
                    format!(" ({})", domain),
                    Style::default().fg(colors.domain),
                ));
            }
            spans.push(Span::styled(
                format!("  {} pts", post.score.unwrap_or(0)),
                Style::default().fg(colors.score),
            ));
            spans.push(Span::styled(
                format!(" by {}", post.display_author()),
                Style::default().fg(colors.author),
            ));
            if let Some(age) = post.age(now) {
                spans.push(Span::raw(format!(" {}", age)));
            }
            if let Some(count) = post.descendants {
                spans.push(Span::raw(format!(" | {} comments", count)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = format!(" Top stories ({}) ", app.posts.len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(app, ActivePane::Feed, colors));

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(colors.selection_bg)
            .fg(colors.selection_fg)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = ListState::default();
    if !app.posts.is_empty() {
        state.select(Some(app.post_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_comments_pane(frame: &mut Frame, app: &TuiApp, colors: &ColorConfig, area: Rect) {
    let now = Utc::now();

    let (title, content) = match app.shown_post() {
        Some(post) => {
            let mut lines = Vec::new();
            let comments = app.shown_comments();

            if let Some(url) = &post.url {
                lines.push(Line::from(Span::styled(
                    url.clone(),
                    Style::default().fg(colors.domain),
                )));
            }
            let body = post.display_text();
            if !body.is_empty() {
                lines.extend(body.lines().map(|l| Line::from(l.to_string())));
            }
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }

            if comments.is_empty() {
                lines.push(Line::from("No comments"));
            }

            for comment in comments {
                let indent = "  ".repeat(comment.depth);
                let mut header = vec![
                    Span::raw(indent.clone()),
                    Span::styled(
                        comment.item.display_author().to_string(),
                        Style::default()
                            .fg(colors.author)
                            .add_modifier(Modifier::BOLD),
                    ),
                ];
                if let Some(age) = comment.item.age(now) {
                    header.push(Span::raw(format!(" {}", age)));
                }
                lines.push(Line::from(header));

                for text_line in comment.item.display_text().lines() {
                    lines.push(Line::from(format!("{}  {}", indent, text_line)));
                }
                lines.push(Line::from(""));
            }

            (
                format!(" {} ({}) ", post.display_title(), comments.len()),
                Text::from(lines),
            )
        }
        None => (
            " Comments ".to_string(),
            Text::from("Press Enter on a story to load its comments"),
        ),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(app, ActivePane::Comments, colors));

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.comment_scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, colors: &ColorConfig, area: Rect) {
    let base = Style::default().fg(colors.status_fg).bg(colors.status_bg);

    let (status, style) = if app.is_loading {
        ("Loading...".to_string(), base)
    } else if let Some(ref err) = app.error_message {
        (err.clone(), base.fg(colors.error))
    } else if let Some(ref msg) = app.status_message {
        (msg.clone(), base)
    } else {
        (
            "j/k:Navigate  Enter:Comments  n:More  o:Open  Tab:Pane  q:Quit".to_string(),
            base,
        )
    };

    frame.render_widget(Paragraph::new(status).style(style), area);
}

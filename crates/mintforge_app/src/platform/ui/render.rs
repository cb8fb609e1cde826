use mintforge_core::{Phase, RarityRowView, SessionViewModel, ToastKind};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, Paragraph};
use ratatui::Frame;

const BAR_WIDTH: usize = 24;

pub fn draw(frame: &mut Frame<'_>, view: &SessionViewModel) {
    let [input_area, card_area, status_area, stats_area, gallery_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(8),
        Constraint::Length(1),
        Constraint::Length(view.rarity_rows.len() as u16 + 3),
        Constraint::Min(4),
    ])
    .areas(frame.area());

    draw_input(frame, input_area, view);
    draw_card(frame, card_area, view);
    draw_status(frame, status_area, view);
    draw_stats(frame, stats_area, view);
    draw_gallery(frame, gallery_area, view);
}

fn draw_input(frame: &mut Frame<'_>, area: Rect, view: &SessionViewModel) {
    let mut block = Block::bordered().title_top("Webhook URL");
    if view.url_looks_valid {
        block = block.title_top(
            Line::from(Span::styled("connected", Style::new().fg(Color::Green))).right_aligned(),
        );
    }

    let text = if view.webhook_url.is_empty() {
        Span::styled(
            "https://your-workflow.example/webhook/...",
            Style::new().fg(Color::DarkGray),
        )
    } else {
        Span::raw(view.webhook_url.as_str())
    };

    frame.render_widget(Paragraph::new(Line::from(text)).block(block), area);
}

fn draw_card(frame: &mut Frame<'_>, area: Rect, view: &SessionViewModel) {
    let block = Block::bordered().title_top("Current mint");

    let lines: Vec<Line> = if view.phase == Phase::Pending {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "GENERATING",
                Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))
            .centered(),
            Line::from(Span::styled(
                "Rolling for rarity...",
                Style::new().fg(Color::DarkGray),
            ))
            .centered(),
        ]
    } else if let Some(card) = &view.current {
        let style = rarity_style(&card.rarity);
        vec![
            Line::from(""),
            Line::from(vec![
                Span::raw("Edition  #"),
                Span::styled(card.edition_short.clone(), Style::new().add_modifier(Modifier::BOLD)),
            ]),
            Line::from(vec![
                Span::raw("Rarity   "),
                Span::styled(card.rarity.to_uppercase(), style.add_modifier(Modifier::BOLD)),
            ]),
            Line::from(format!("Payload  {} bytes", card.payload_bytes)),
            Line::from(""),
            Line::from(Span::styled(
                "Ctrl+S writes the image to disk",
                Style::new().fg(Color::DarkGray),
            )),
        ]
    } else {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "Your mint awaits",
                Style::new().fg(Color::DarkGray),
            ))
            .centered(),
        ]
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_status(frame: &mut Frame<'_>, area: Rect, view: &SessionViewModel) {
    let mut spans = vec![Span::styled(
        "Enter: mint | Ctrl+S: save | Esc: quit  ",
        Style::new().fg(Color::DarkGray),
    )];

    if let Some(toast) = &view.toast {
        let color = match toast.kind {
            ToastKind::Success => Color::Green,
            ToastKind::Failure => Color::Red,
        };
        spans.push(Span::styled(toast.text.clone(), Style::new().fg(color)));
    } else if let Some(error) = &view.error {
        spans.push(Span::styled(error.clone(), Style::new().fg(Color::Red)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_stats(frame: &mut Frame<'_>, area: Rect, view: &SessionViewModel) {
    let block = Block::bordered().title_top("Rarity distribution");

    let mut lines: Vec<Line> = view.rarity_rows.iter().map(stat_row).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("Total minted: "),
        Span::styled(
            view.total_minted.to_string(),
            Style::new().add_modifier(Modifier::BOLD),
        ),
    ]));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn stat_row(row: &RarityRowView) -> Line<'static> {
    let style = rarity_style(&row.rarity);
    Line::from(vec![
        Span::styled(format!("{:<10}", row.rarity.to_uppercase()), style),
        Span::styled(bar(row.percent, BAR_WIDTH), style),
        Span::raw(format!("  {:>3}  {:>5.1}%", row.count, row.percent)),
    ])
}

fn draw_gallery(frame: &mut Frame<'_>, area: Rect, view: &SessionViewModel) {
    let block = Block::bordered().title_top("Collection");

    if view.gallery.is_empty() {
        let placeholder = Paragraph::new(Line::from(Span::styled(
            "mint something to start your collection",
            Style::new().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    // Newest first, straight from the view model.
    let items: Vec<Line> = view
        .gallery
        .iter()
        .map(|item| {
            Line::from(vec![
                Span::raw(format!("#{:<10}", item.edition_short)),
                Span::styled(item.rarity.to_uppercase(), rarity_style(&item.rarity)),
            ])
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn rarity_style(rarity: &str) -> Style {
    let color = match rarity {
        "Rare" => Color::Blue,
        "Epic" => Color::Magenta,
        "Legendary" => Color::Yellow,
        "Unique" => Color::LightMagenta,
        // Common and unrecognized buckets share the default look.
        _ => Color::Gray,
    };
    Style::new().fg(color)
}

fn bar(percent: f64, width: usize) -> String {
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    let mut bar = "█".repeat(filled);
    bar.push_str(&" ".repeat(width - filled));
    bar
}

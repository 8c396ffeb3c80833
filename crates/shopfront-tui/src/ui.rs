// UI rendering logic
use crate::{App, InputMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use shopfront_core::{models::WILDCARD_CATEGORY, CatalogState};

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(if app.show_filters {
            vec![
                Constraint::Length(3), // Header
                Constraint::Length(3), // Search input
                Constraint::Length(7), // Filters panel
                Constraint::Min(5),    // Product list
                Constraint::Length(1), // Status bar
            ]
        } else {
            vec![
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
            ]
        })
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_search_input(frame, app, chunks[1]);

    let (content_area, status_area) = if app.show_filters {
        render_filters_panel(frame, app, chunks[2]);
        (chunks[3], chunks[4])
    } else {
        (chunks[2], chunks[3])
    };

    render_content(frame, app, content_area);
    render_status_bar(frame, app, status_area);

    // The detail view floats above everything else
    if app.detail_open() {
        render_detail_overlay(frame, app, frame.area());
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let logo = Paragraph::new(Line::from(Span::styled(
        "🛍 Shopfront",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(logo, header_chunks[0]);

    // "Showing N of M products", echoing whatever narrowed it down
    let total = app.catalog.products().len();
    let shown = app.visible().len();
    let mut summary_spans = vec![
        Span::raw("Showing "),
        Span::styled(
            shown.to_string(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" of "),
        Span::styled(
            total.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" products"),
    ];
    if !app.criteria.search_query.is_empty() {
        summary_spans.push(Span::styled(
            format!(" matching \"{}\"", app.criteria.search_query),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if app.criteria.category != WILDCARD_CATEGORY {
        summary_spans.push(Span::styled(
            format!(" in {}", app.criteria.category),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let summary = Paragraph::new(Line::from(summary_spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(ratatui::layout::Alignment::Right);
    frame.render_widget(summary, header_chunks[1]);
}

fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let input_style = match app.input_mode {
        InputMode::Searching => Style::default().fg(Color::Yellow),
        _ => Style::default(),
    };

    let shown: &str = if app.criteria.search_query.is_empty() && app.input_mode != InputMode::Searching
    {
        "search by name, description, or category"
    } else {
        app.criteria.search_query.as_str()
    };
    let text_style = if app.criteria.search_query.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        input_style
    };

    let input = Paragraph::new(Span::styled(shown, text_style)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Search (ESC to browse, / to type)")
            .border_style(input_style),
    );
    frame.render_widget(input, area);

    // Show cursor while typing
    if app.input_mode == InputMode::Searching {
        frame.set_cursor_position((
            area.x + app.criteria.search_query.chars().count() as u16 + 1,
            area.y + 1,
        ));
    }
}

fn render_filters_panel(frame: &mut Frame, app: &App, area: Rect) {
    let is_active =
        app.input_mode == InputMode::Filtering || app.input_mode == InputMode::EditingFilter;
    let is_editing = app.input_mode == InputMode::EditingFilter;

    let border_style = if is_active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let cursor = app.filter_cursor;

    // Edit buffer (with a block cursor) for the field being typed into,
    // stored value otherwise
    let display_value = |field: usize, current: String| -> String {
        if is_editing && cursor == field {
            format!("{}█", app.filter_edit_buffer)
        } else {
            current
        }
    };

    let label_style = |field: usize| {
        if cursor == field && is_active {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    };
    let value_style = |field: usize| {
        if cursor == field && is_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        }
    };

    let category_value = if app.criteria.category == WILDCARD_CATEGORY {
        "all categories".to_string()
    } else {
        app.criteria.category.clone()
    };
    let min_price_value = app
        .criteria
        .min_price
        .map(format_price)
        .unwrap_or_else(|| "<none>".to_string());
    let max_price_value = app
        .criteria
        .max_price
        .map(format_price)
        .unwrap_or_else(|| "<none>".to_string());
    let rating_value = app
        .criteria
        .min_rating
        .map(|r| format!("{}+ stars", r))
        .unwrap_or_else(|| "any rating".to_string());

    let lines = vec![
        Line::from(vec![
            Span::styled("Category:   ", label_style(0)),
            Span::styled(category_value, value_style(0)),
        ]),
        Line::from(vec![
            Span::styled("Min Price:  ", label_style(1)),
            Span::styled(display_value(1, min_price_value), value_style(1)),
        ]),
        Line::from(vec![
            Span::styled("Max Price:  ", label_style(2)),
            Span::styled(display_value(2, max_price_value), value_style(2)),
        ]),
        Line::from(vec![
            Span::styled("Min Rating: ", label_style(3)),
            Span::styled(rating_value, value_style(3)),
        ]),
        Line::from(Span::styled(
            "TAB/j/k: navigate | ENTER: edit or cycle | d: clear | R: reset all | ESC: close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let title = if app.criteria.is_active() {
        "Filters [active] (f to toggle)"
    } else {
        "Filters (f to toggle)"
    };

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_content(frame: &mut Frame, app: &mut App, area: Rect) {
    match app.catalog.state().clone() {
        CatalogState::Loading => render_message(
            frame,
            area,
            "Products (Loading...)",
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  ⏳ Loading products...",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "  Fetching the catalog from the store",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
        ),
        CatalogState::Failed(message) => render_message(
            frame,
            area,
            "Products",
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  ⚠ Unable to load products",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    format!("  {}", message),
                    Style::default().fg(Color::Red),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    "  Press r to try again",
                    Style::default().fg(Color::DarkGray),
                )),
            ],
        ),
        CatalogState::Ready => {
            if app.catalog.products().is_empty() {
                render_message(
                    frame,
                    area,
                    "Products (0)",
                    vec![
                        Line::from(""),
                        Line::from(Span::styled(
                            "  No products available",
                            Style::default().add_modifier(Modifier::BOLD),
                        )),
                        Line::from(""),
                        Line::from(Span::styled(
                            "  There are no products in the catalog right now",
                            Style::default().fg(Color::DarkGray),
                        )),
                    ],
                );
            } else if app.visible().is_empty() {
                render_message(
                    frame,
                    area,
                    "Products (0)",
                    vec![
                        Line::from(""),
                        Line::from(Span::styled(
                            "  No products match your filters",
                            Style::default().add_modifier(Modifier::BOLD),
                        )),
                        Line::from(""),
                        Line::from(Span::styled(
                            "  Try adjusting your search or press R to reset all filters",
                            Style::default().fg(Color::DarkGray),
                        )),
                    ],
                );
            } else {
                render_product_list(frame, app, area);
            }
        }
    }
}

fn render_message(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(paragraph, area);
}

fn render_product_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let visible = app.visible();

    // Truncate descriptions to the row, at character boundaries
    let desc_width = area.width.saturating_sub(8) as usize;

    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(i, product)| {
            let is_highlighted = i == app.selected_index;

            let title_style = if is_highlighted {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            };

            let line1 = Line::from(Span::styled(product.title.clone(), title_style));

            let line2 = Line::from(vec![
                Span::raw("   "),
                Span::styled(
                    format_price(product.price),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    stars(product.rating.rate),
                    Style::default().fg(Color::Rgb(255, 215, 0)),
                ),
                Span::styled(
                    format!(" {} ({})", product.rating.rate, product.rating.count),
                    Style::default().fg(Color::Gray),
                ),
                Span::raw("  "),
                Span::styled(
                    format!(" {} ", product.category),
                    Style::default().fg(Color::Black).bg(Color::Blue),
                ),
            ]);

            let line3 = Line::from(Span::styled(
                format!("   {}", truncate(&product.description, desc_width)),
                Style::default().fg(Color::DarkGray),
            ));

            ListItem::new(vec![line1, line2, line3])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Products ({})", visible.len())),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    // Stateful rendering for proper scrolling
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_detail_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let Some(product) = app.catalog.selected() else {
        return;
    };

    let popup_area = centered_rect(area, 70, 70);
    frame.render_widget(Clear, popup_area);

    let mut lines = vec![
        Line::from(Span::styled(
            product.title.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!(" {} ", product.category),
                Style::default().fg(Color::Black).bg(Color::Blue),
            ),
            Span::styled(
                format!("  #{}", product.id),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format_price(product.price),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                stars(product.rating.rate),
                Style::default().fg(Color::Rgb(255, 215, 0)),
            ),
            Span::styled(
                format!(
                    " {} ({} reviews)",
                    product.rating.rate, product.rating.count
                ),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Description",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    for text_line in product.description.lines() {
        lines.push(Line::from(text_line.to_string()));
    }
    if !product.image.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Image: {}", product.image),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "j/k: scroll | ESC: close",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Product Details ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));

    frame.render_widget(paragraph, popup_area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = match app.input_mode {
        InputMode::Searching => Span::styled(
            "SEARCH | Type to filter | ENTER/ESC: back to browsing",
            Style::default().fg(Color::Yellow),
        ),
        InputMode::Filtering => Span::styled(
            "FILTERS | TAB/j/k: navigate | ENTER: edit or cycle | d: clear | R: reset | ESC: close",
            Style::default().fg(Color::Yellow),
        ),
        InputMode::EditingFilter => Span::styled(
            "EDITING | Type a number | ENTER: save | ESC: cancel",
            Style::default().fg(Color::Green),
        ),
        InputMode::Normal => {
            if app.detail_open() {
                Span::styled(
                    "DETAILS | j/k: scroll | ESC: close | q: quit",
                    Style::default().fg(Color::Cyan),
                )
            } else {
                Span::raw(
                    "j/k: navigate | ENTER: details | /: search | f: filters | r: reload | R: reset filters | q: quit",
                )
            }
        }
    };

    frame.render_widget(Paragraph::new(Line::from(status)), area);
}

/// Center a percentage-sized popup inside `area`
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

/// Five star slots: full, a half when the fraction earns one, empty the rest
fn stars(rate: f64) -> String {
    let full = rate.floor() as usize;
    let full = full.min(5);
    let half = rate - rate.floor() >= 0.5 && full < 5;

    let mut out = "★".repeat(full);
    if half {
        out.push('⯨');
    }
    while out.chars().count() < 5 {
        out.push('☆');
    }
    out
}

fn format_price(price: f64) -> String {
    format!("Rs.{:.2}", price)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

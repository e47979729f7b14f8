use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, BarChart, Block, Borders, Cell, Chart, Dataset, Gauge, GraphType, List, ListItem,
        ListState, Paragraph, Row, Table, Tabs, Wrap,
    },
    Frame,
};
use crate::app::{App, InputMode, StockView, Tab, ViewState};
use crate::catalog::SelectedStock;
use crate::config::{IMAGE_PREVIEW_COUNT, MAX_TRAINING_IMAGES, PREDICTION_TABLE_ROWS};
use crate::forecast::{self, Trend};
use crate::market::{DailyBar, MacdSignal, RsiSignal};
use crate::query::MarketMovers;
use crate::training::Algorithm;

pub fn render(f: &mut Frame, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, layout[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(layout[1]);

    render_selector(f, app, body[0]);

    match (app.view_state(), app.selected.as_ref(), app.view.as_ref()) {
        (ViewState::StockSelected, Some(stock), Some(view)) => match app.tab {
            Tab::Dashboard => render_dashboard(f, stock, view, body[1]),
            Tab::Training => render_training(f, app, stock, body[1]),
            Tab::Predictions => render_predictions(f, app, stock, view, body[1]),
        },
        _ => render_empty(f, app.tab, body[1]),
    }

    render_footer(f, app, layout[2]);
}

fn change_color(change: f64) -> Color {
    if change >= 0.0 { Color::Green } else { Color::Red }
}

fn title_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

fn value_style() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

fn bar_series(bars: &[DailyBar], field: fn(&DailyBar) -> f64) -> Vec<(f64, f64)> {
    bars.iter()
        .enumerate()
        .map(|(i, b)| (i as f64, field(b)))
        .collect()
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let selected = Tab::ALL.iter().position(|t| *t == app.tab).unwrap_or(0);
    let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.title()).collect::<Vec<_>>())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" SynthStock TUI ", title_style())),
        )
        .select(selected)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, chunks[0]);

    let mut spans = Vec::new();
    if let Some(stock) = &app.selected {
        spans.push(Span::styled(
            format!("{} ${:.2}", stock.symbol, stock.price),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("({:+.2}, {:+.2}%)", stock.change, stock.change_percent),
            Style::default().fg(change_color(stock.change)),
        ));
        if let Some(quote) = &app.live_quote {
            spans.push(Span::raw(" | live "));
            spans.push(Span::styled(
                format!("${:.2} ({:+.2}%)", quote.price, quote.change_percent),
                Style::default().fg(change_color(quote.change)),
            ));
        }
    } else {
        spans.push(Span::styled("No stock selected", Style::default().fg(Color::Gray)));
    }

    let quote = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Right)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(quote, chunks[1]);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let hint = match (app.input_mode, app.tab) {
        (InputMode::Search, _) => "type to search | Enter/Esc: done",
        (InputMode::ImagePath, _) => "type image path | Enter: add | Esc: cancel",
        (InputMode::Browse, Tab::Training) => {
            "t/space: start/pause | r: reset | a: algorithm | i: add image | x: clear images | Tab: next tab | q: quit"
        }
        (InputMode::Browse, _) => {
            "j/k: move | Enter: select | /: search | e/s: exchange/sector | o: sort | c: clear | l: quote | g: regenerate | Tab/1-3: tabs | q: quit"
        }
    };

    let mut spans = vec![
        Span::styled(" Controls: ", Style::default().fg(Color::Gray)),
        Span::styled(hint, Style::default().fg(Color::White)),
    ];
    if let Some(msg) = &app.status_msg {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(msg.as_str(), Style::default().fg(Color::Red)));
    }

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}

fn render_selector(f: &mut Frame, app: &App, area: Rect) {
    let visible = app.selector.visible();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .split(area);

    let search_style = if app.input_mode == InputMode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let search = Paragraph::new(app.selector.query.as_str())
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title(" Search (/) "));
    f.render_widget(search, chunks[0]);

    let or_all = |v: &'static str, all: &'static str| if v.is_empty() { all } else { v };
    let filters = Paragraph::new(vec![
        Line::from(format!(
            "Exchange: {}",
            or_all(app.selector.exchange_filter(), "All Exchanges")
        )),
        Line::from(format!(
            "Sector:   {}",
            or_all(app.selector.sector_filter(), "All Sectors")
        )),
        Line::from(format!("Sort:     {}", app.selector.sort.label())),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Filters "));
    f.render_widget(filters, chunks[1]);

    let movers = MarketMovers::from_catalog(crate::catalog::all());
    let mover_line = |label: &str, text: String, color: Color| {
        Line::from(vec![
            Span::styled(format!("{:<12}", label), Style::default().fg(Color::Gray)),
            Span::styled(text, Style::default().fg(color)),
        ])
    };
    let movers_text = vec![
        mover_line(
            "Top Gainer",
            movers
                .top_gainer
                .map(|s| format!("{} +{:.1}%", s.symbol, s.change_percent))
                .unwrap_or_else(|| "-".to_string()),
            Color::Green,
        ),
        mover_line(
            "Top Loser",
            movers
                .top_loser
                .map(|s| format!("{} {:.1}%", s.symbol, s.change_percent))
                .unwrap_or_else(|| "-".to_string()),
            Color::Red,
        ),
        mover_line(
            "Most Active",
            movers
                .most_active
                .map(|s| format!("{} {:.0}M", s.symbol, s.volume as f64 / 1_000_000.0))
                .unwrap_or_else(|| "-".to_string()),
            Color::Blue,
        ),
    ];
    let movers_block = Paragraph::new(movers_text)
        .block(Block::default().borders(Borders::ALL).title(" Movers "));
    f.render_widget(movers_block, chunks[2]);

    let selected_symbol = app.selected.as_ref().map(|s| s.symbol.as_str());
    let items: Vec<ListItem> = visible
        .iter()
        .map(|s| {
            let marker = if Some(s.symbol) == selected_symbol { "*" } else { " " };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", marker)),
                Span::styled(format!("{:<6}", s.symbol), value_style()),
                Span::styled(format!(" {:<6} ", s.exchange), Style::default().fg(Color::DarkGray)),
                Span::raw(format!("${:>9.2} ", s.price)),
                Span::styled(
                    format!("{:+.2}%", s.change_percent),
                    Style::default().fg(change_color(s.change)),
                ),
            ]))
        })
        .collect();

    let title = if visible.is_empty() {
        " No stocks found ".to_string()
    } else {
        format!(" Stocks ({}) ", visible.len())
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray));
    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(app.selector.cursor.min(visible.len() - 1)));
    }
    f.render_stateful_widget(list, chunks[3], &mut state);
}

fn render_empty(f: &mut Frame, tab: Tab, area: Rect) {
    let msg = match tab {
        Tab::Dashboard => "Select a stock from the list to view its dashboard",
        Tab::Training => "Select a stock to start training a prediction model",
        Tab::Predictions => "Select a stock to view its price predictions",
    };
    let text = Paragraph::new(msg)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", tab.title())));
    f.render_widget(text, area);
}

fn stat_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    detail: Option<(String, Color)>,
) {
    let mut lines = vec![Line::from(Span::styled(value, value_style()))];
    if let Some((text, color)) = detail {
        lines.push(Line::from(Span::styled(text, Style::default().fg(color))));
    }
    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", title)),
    );
    f.render_widget(card, area);
}

fn four_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25); 4])
        .split(area)
}

fn render_dashboard(f: &mut Frame, stock: &SelectedStock, view: &StockView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(8),
        ])
        .split(area);

    let stats = four_columns(chunks[0]);
    stat_card(
        f,
        stats[0],
        "Current Price",
        format!("${:.2}", stock.price),
        Some((format!("{:+.2}%", stock.change_percent), change_color(stock.change))),
    );
    stat_card(f, stats[1], "Market Cap", stock.market_cap.clone(), None);
    stat_card(f, stats[2], "Volume", format!("{:.1}M", stock.volume as f64 / 1_000_000.0), None);
    stat_card(f, stats[3], "Sector", stock.sector.clone(), None);

    let ind = &view.indicators;
    let rsi_color = match ind.rsi_signal() {
        RsiSignal::Overbought => Color::Red,
        RsiSignal::Oversold => Color::Green,
        RsiSignal::Neutral => Color::Yellow,
    };
    let macd_color = match ind.macd_signal() {
        MacdSignal::Bullish => Color::Green,
        MacdSignal::Bearish => Color::Red,
    };
    let tech = four_columns(chunks[1]);
    stat_card(
        f,
        tech[0],
        "RSI (14)",
        format!("{:.1}", ind.rsi),
        Some((ind.rsi_signal().label().to_string(), rsi_color)),
    );
    stat_card(
        f,
        tech[1],
        "MACD",
        format!("{:.3}", ind.macd),
        Some((ind.macd_signal().label().to_string(), macd_color)),
    );
    stat_card(
        f,
        tech[2],
        "Bollinger Upper",
        format!("${:.2}", ind.bollinger.upper),
        Some(("Resistance".to_string(), Color::Red)),
    );
    stat_card(
        f,
        tech[3],
        "Bollinger Lower",
        format!("${:.2}", ind.bollinger.lower),
        Some(("Support".to_string(), Color::Green)),
    );

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[2]);

    let close_points = bar_series(&view.history, |b| b.close);
    let high_points = bar_series(&view.history, |b| b.high);
    let low_points = bar_series(&view.history, |b| b.low);
    let open_points = bar_series(&view.history, |b| b.open);

    let min_price = view.history.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
    let max_price = view.history.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
    let x_max = view.history.len().saturating_sub(1) as f64;

    let datasets = vec![
        Dataset::default()
            .name("Close")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&close_points),
        Dataset::default()
            .name("Open")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&open_points),
        Dataset::default()
            .name("High")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Red))
            .data(&high_points),
        Dataset::default()
            .name("Low")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(&low_points),
    ];

    let short_date = |bar: Option<&DailyBar>| {
        bar.map(|b| b.date.format("%m-%d").to_string())
            .unwrap_or_default()
    };
    let first_date = short_date(view.history.first());
    let last_date = short_date(view.history.last());
    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(Span::styled(
                    format!(" {} - 30 Day Price History ", stock.symbol),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(vec![Span::raw(first_date), Span::raw(last_date)]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([min_price * 0.99, max_price * 1.01])
                .labels(vec![
                    Span::styled(format!("{:.1}", min_price), Style::default().fg(Color::Gray)),
                    Span::styled(format!("{:.1}", max_price), Style::default().fg(Color::Gray)),
                ]),
        );
    f.render_widget(chart, charts[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(6)])
        .split(charts[1]);

    let labels: Vec<String> = view
        .history
        .iter()
        .map(|b| b.date.format("%d").to_string())
        .collect();
    let bars: Vec<(&str, u64)> = labels
        .iter()
        .zip(view.history.iter())
        .map(|(label, b)| (label.as_str(), b.volume / 1_000_000))
        .collect();
    let volume = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(" Volume (M) "))
        .data(bars.as_slice())
        .bar_width(2)
        .bar_gap(0)
        .bar_style(Style::default().fg(Color::Green));
    f.render_widget(volume, right[0]);

    if let Some(summary) = &view.summary {
        let text = vec![
            Line::from(format!("Last close: ${:.2}", summary.latest_close)),
            Line::from(Span::styled(
                format!("Period high: ${:.2}", summary.period_high),
                Style::default().fg(Color::Red),
            )),
            Line::from(Span::styled(
                format!("Period low:  ${:.2}", summary.period_low),
                Style::default().fg(Color::Green),
            )),
            Line::from(format!("Avg volume: {:.1}M", summary.average_volume / 1_000_000.0)),
        ];
        let details =
            Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(" Period "));
        f.render_widget(details, right[1]);
    }
}

fn render_training(f: &mut Frame, app: &App, stock: &SelectedStock, area: Rect) {
    let show_progress = app.training.progress() > 0.0 || app.training.is_running();
    let constraints = if show_progress {
        vec![
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(4),
        ]
    } else {
        vec![Constraint::Length(3), Constraint::Min(8)]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let (state_text, state_color) = if app.training.is_running() && app.is_ticker_active() {
        ("Training", Color::Yellow)
    } else if app.training.is_complete() {
        ("Complete", Color::Green)
    } else if app.training.progress() > 0.0 {
        ("Paused", Color::LightRed)
    } else if app.can_start_training() {
        ("Ready", Color::Cyan)
    } else {
        ("Add training images to start", Color::Gray)
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(format!("AI Model Training - {} ", stock.symbol), title_style()),
        Span::raw("| "),
        Span::styled(state_text, Style::default().fg(state_color)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    let algo_items: Vec<ListItem> = Algorithm::ALL
        .iter()
        .map(|algo| {
            let style = if *algo == app.algorithm {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(vec![
                Line::from(Span::styled(algo.name(), style)),
                Line::from(Span::styled(
                    format!(
                        "  {} | acc {} | {}",
                        algo.description(),
                        algo.nominal_accuracy(),
                        algo.train_time()
                    ),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();
    let algos = List::new(algo_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Algorithm Selection (a) "),
    );
    f.render_widget(algos, middle[0]);

    let (names, hidden) = app.images.preview(IMAGE_PREVIEW_COUNT);
    let mut image_lines: Vec<Line> = names
        .into_iter()
        .map(|n| Line::from(format!("- {}", n)))
        .collect();
    if hidden > 0 {
        image_lines.push(Line::from(Span::styled(
            format!("+{} more", hidden),
            Style::default().fg(Color::Gray),
        )));
    }
    if app.input_mode == InputMode::ImagePath {
        image_lines.push(Line::from(Span::styled(
            format!("> {}", app.image_input),
            Style::default().fg(Color::Yellow),
        )));
    } else if app.images.is_empty() {
        image_lines.push(Line::from(Span::styled(
            "Press i to add chart images",
            Style::default().fg(Color::Gray),
        )));
    }
    let images = Paragraph::new(image_lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Training Data ({}/{}) ",
            app.images.len(),
            MAX_TRAINING_IMAGES
        )));
    f.render_widget(images, middle[1]);

    if show_progress {
        let progress = app.training.progress();
        let gauge = Gauge::default()
            .block(Block::default().title(" Training Progress ").borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio((progress / 100.0).clamp(0.0, 1.0))
            .label(format!("{:.1}%", progress));
        f.render_widget(gauge, chunks[2]);

        let m = app.training.metrics();
        let cols = four_columns(chunks[3]);
        stat_card(f, cols[0], "Accuracy", format!("{:.1}%", m.accuracy), None);
        stat_card(f, cols[1], "Loss", format!("{:.3}", m.loss), None);
        stat_card(f, cols[2], "Epoch", m.epoch.to_string(), None);
        stat_card(f, cols[3], "Val Accuracy", format!("{:.1}%", m.validation_accuracy), None);
    }
}

fn render_predictions(
    f: &mut Frame,
    app: &App,
    stock: &SelectedStock,
    view: &StockView,
    area: Rect,
) {
    if !app.training.is_complete() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(35),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(area);
        let msg = Paragraph::new("Complete model training to see predictions")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL).title(" Training Required "));
        f.render_widget(msg, chunks[1]);
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio((app.training.progress() / 100.0).clamp(0.0, 1.0))
            .label(format!("{:.1}%", app.training.progress()));
        f.render_widget(gauge, chunks[2]);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(PREDICTION_TABLE_ROWS as u16 + 3),
        ])
        .split(area);

    if let Some(summary) = &view.forecast_summary {
        let cards = four_columns(chunks[0]);
        stat_card(
            f,
            cards[0],
            "30-Day Target",
            format!("${:.2}", summary.final_price),
            Some((
                format!("{:+.2}%", summary.price_change_percent),
                change_color(summary.price_change),
            )),
        );
        stat_card(
            f,
            cards[1],
            "Avg Confidence",
            format!("{:.1}%", summary.average_confidence),
            None,
        );
        stat_card(
            f,
            cards[2],
            "Bullish Days",
            summary.bullish.to_string(),
            Some((format!("{} neutral", summary.neutral), Color::Gray)),
        );
        stat_card(f, cards[3], "Bearish Days", summary.bearish.to_string(), None);
    }

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[1]);

    let mut points = vec![(0.0, stock.price)];
    points.extend(
        view.forecast
            .iter()
            .enumerate()
            .map(|(i, p)| ((i + 1) as f64, p.predicted_price)),
    );
    let min_price = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max_price = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    let current_line = vec![(0.0, stock.price), (view.forecast.len() as f64, stock.price)];

    let datasets = vec![
        Dataset::default()
            .name("Predicted")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&points),
        Dataset::default()
            .name("Current")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::White))
            .data(&current_line),
    ];
    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(Span::styled(
                    format!(" {} - Price Prediction ", stock.symbol),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("Days")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, view.forecast.len() as f64]),
        )
        .y_axis(
            Axis::default()
                .title("Price")
                .style(Style::default().fg(Color::Gray))
                .bounds([min_price * 0.98, max_price * 1.02])
                .labels(vec![
                    Span::styled(format!("{:.1}", min_price), Style::default().fg(Color::Gray)),
                    Span::styled(format!("{:.1}", max_price), Style::default().fg(Color::Gray)),
                ]),
        );
    f.render_widget(chart, charts[0]);

    let buckets = forecast::confidence_distribution(&view.forecast);
    let bars: Vec<(&str, u64)> = buckets.iter().map(|b| (b.range, b.count as u64)).collect();
    let distribution = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title(" Confidence Distribution "))
        .data(bars.as_slice())
        .bar_width(7)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Blue));
    f.render_widget(distribution, charts[1]);

    let changes = forecast::step_changes(&view.forecast, stock.price);
    let rows: Vec<Row> = view
        .forecast
        .iter()
        .zip(changes)
        .take(PREDICTION_TABLE_ROWS)
        .map(|(p, change)| {
            let trend_color = match p.trend {
                Trend::Bullish => Color::Green,
                Trend::Bearish => Color::Red,
                Trend::Neutral => Color::Gray,
            };
            Row::new(vec![
                Cell::from(p.date.format("%Y-%m-%d").to_string()),
                Cell::from(format!("${:.2}", p.predicted_price)),
                Cell::from(format!("{:+.2}%", change))
                    .style(Style::default().fg(change_color(change))),
                Cell::from(format!("{:.1}%", p.confidence)),
                Cell::from(p.trend.label()).style(Style::default().fg(trend_color)),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(vec!["Date", "Price", "Change", "Confidence", "Trend"])
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title(" Detailed Predictions "));
    f.render_widget(table, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::config::AppConfig;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 48)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    fn seeded_app() -> App {
        App::new(AppConfig {
            seed: Some(3),
            ..AppConfig::default()
        })
    }

    #[test]
    fn test_empty_state_renders_prompt() {
        let app = seeded_app();
        let screen = draw(&app);
        assert!(screen.contains("Select a stock from the list"));
        assert!(screen.contains("No stock selected"));
    }

    #[test]
    fn test_dashboard_renders_selected_stock() {
        let mut app = seeded_app();
        app.select_symbol("AAPL");
        let screen = draw(&app);
        assert!(screen.contains("AAPL $178.85"));
        assert!(screen.contains("RSI (14)"));
        assert!(screen.contains("2.8T"));
    }

    #[test]
    fn test_predictions_gated_on_training() {
        let mut app = seeded_app();
        app.select_symbol("AAPL");
        app.tab = Tab::Predictions;
        let screen = draw(&app);
        assert!(screen.contains("Training Required"));
    }

    #[test]
    fn test_training_tab_lists_algorithms() {
        let mut app = seeded_app();
        app.select_symbol("MSFT");
        app.tab = Tab::Training;
        let screen = draw(&app);
        assert!(screen.contains("LSTM Neural Network"));
        assert!(screen.contains("Training Data (0/20)"));
    }

    #[test]
    fn test_predictions_render_after_training() {
        let mut app = seeded_app();
        app.today = chrono::NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        app.select_symbol("AAPL");
        app.add_images(["aapl.png"]);
        let mut rng = crate::rng::ScriptedSource::constant(0.9);
        app.training.start();
        while !app.training.tick(&mut rng) {}
        app.training.stop();
        app.tab = Tab::Predictions;

        let screen = draw(&app);
        assert!(!screen.contains("Training Required"));
        assert!(screen.contains("30-Day Target"));
        assert!(screen.contains("Confidence Distribution"));
        assert!(screen.contains("Detailed Predictions"));
        assert!(screen.contains("2024-06-04"));
    }
}

use crate::catalog::{self, SelectedStock, StockRecord};
use crate::config::AppConfig;
use crate::forecast::{self, ForecastSummary, PredictionPoint};
use crate::market::{self, DailyBar, HistorySummary, PriceMovement, TechnicalIndicators};
use crate::query::{self, SortKey};
use crate::rng::RandSource;
use crate::training::{Algorithm, Tick, Ticker, TickerHandle, TrainingImages, TrainingSimulator};
use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use rand::rngs::StdRng;
use serde::Serialize;
use std::io;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Dashboard,
    Training,
    Predictions,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Dashboard, Tab::Training, Tab::Predictions];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Training => "Model Training",
            Tab::Predictions => "Predictions",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::Dashboard => Tab::Training,
            Tab::Training => Tab::Predictions,
            Tab::Predictions => Tab::Dashboard,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewState {
    NoStockSelected,
    StockSelected,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Browse,
    Search,
    ImagePath,
}

/// Search box, filter and sort choices of the stock list.
pub struct SelectorState {
    pub query: String,
    pub exchanges: Vec<&'static str>,
    pub sectors: Vec<&'static str>,
    pub exchange: Option<usize>,
    pub sector: Option<usize>,
    pub sort: SortKey,
    pub cursor: usize,
}

impl SelectorState {
    pub fn new(stocks: &[StockRecord]) -> Self {
        Self {
            query: String::new(),
            exchanges: query::distinct_exchanges(stocks),
            sectors: query::distinct_sectors(stocks),
            exchange: None,
            sector: None,
            sort: SortKey::default(),
            cursor: 0,
        }
    }

    pub fn exchange_filter(&self) -> &'static str {
        self.exchange.and_then(|i| self.exchanges.get(i).copied()).unwrap_or("")
    }

    pub fn sector_filter(&self) -> &'static str {
        self.sector.and_then(|i| self.sectors.get(i).copied()).unwrap_or("")
    }

    pub fn visible(&self) -> Vec<&'static StockRecord> {
        query::search_and_sort(
            catalog::all(),
            &self.query,
            self.exchange_filter(),
            self.sector_filter(),
            self.sort,
        )
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.exchange = None;
        self.sector = None;
        self.cursor = 0;
    }

    fn cycle(current: Option<usize>, len: usize) -> Option<usize> {
        match current {
            None if len > 0 => Some(0),
            Some(i) if i + 1 < len => Some(i + 1),
            _ => None,
        }
    }

    pub fn cycle_exchange(&mut self) {
        self.exchange = Self::cycle(self.exchange, self.exchanges.len());
        self.cursor = 0;
    }

    pub fn cycle_sector(&mut self) {
        self.sector = Self::cycle(self.sector, self.sectors.len());
        self.cursor = 0;
    }
}

/// Everything generated for the selected stock. Rebuilt on each selection.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockView {
    pub history: Vec<DailyBar>,
    pub summary: Option<HistorySummary>,
    pub indicators: TechnicalIndicators,
    pub forecast: Vec<PredictionPoint>,
    pub forecast_summary: Option<ForecastSummary>,
}

impl StockView {
    pub fn generate(stock: &SelectedStock, today: NaiveDate, rng: &mut RandSource<StdRng>) -> Self {
        let history = market::generate_history(Some(stock.price), today, rng);
        let summary = HistorySummary::from_bars(&history);
        let indicators = market::generate_indicators(stock.price, rng);
        let forecast = forecast::generate_forecast(stock.price, today, rng);
        let forecast_summary = ForecastSummary::from_points(&forecast, stock.price);
        Self {
            history,
            summary,
            indicators,
            forecast,
            forecast_summary,
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub tab: Tab,
    pub input_mode: InputMode,
    pub selector: SelectorState,
    pub selected: Option<SelectedStock>,
    pub view: Option<StockView>,
    pub live_quote: Option<PriceMovement>,
    pub training: TrainingSimulator,
    pub algorithm: Algorithm,
    pub images: TrainingImages,
    pub image_input: String,
    pub status_msg: Option<String>,
    pub today: NaiveDate,
    config: AppConfig,
    rng: RandSource<StdRng>,
    ticker: Option<TickerHandle>,
    tick_tx: UnboundedSender<Tick>,
    tick_rx: UnboundedReceiver<Tick>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        Self {
            should_quit: false,
            tab: Tab::default(),
            input_mode: InputMode::default(),
            selector: SelectorState::new(catalog::all()),
            selected: None,
            view: None,
            live_quote: None,
            training: TrainingSimulator::new(),
            algorithm: Algorithm::default(),
            images: TrainingImages::default(),
            image_input: String::new(),
            status_msg: None,
            today: Local::now().date_naive(),
            rng: RandSource::from_seed_option(config.seed),
            config,
            ticker: None,
            tick_tx,
            tick_rx,
        }
    }

    pub fn view_state(&self) -> ViewState {
        if self.selected.is_some() {
            ViewState::StockSelected
        } else {
            ViewState::NoStockSelected
        }
    }

    pub fn select(&mut self, record: &StockRecord) {
        let stock = SelectedStock::from(record);
        info!("Selected {} ({}) at ${:.2}", stock.symbol, stock.name, stock.price);
        self.view = Some(StockView::generate(&stock, self.today, &mut self.rng));
        self.selected = Some(stock);
        self.live_quote = None;
    }

    pub fn select_symbol(&mut self, symbol: &str) -> bool {
        match catalog::find_by_symbol(symbol) {
            Some(record) => {
                self.select(record);
                true
            }
            None => {
                warn!("Symbol {} is not in the catalog", symbol);
                self.status_msg = Some(format!("Unknown symbol: {}", symbol));
                false
            }
        }
    }

    pub fn regenerate(&mut self) {
        if let Some(stock) = &self.selected {
            self.view = Some(StockView::generate(stock, self.today, &mut self.rng));
        }
    }

    pub fn refresh_quote(&mut self) {
        if let Some(stock) = &self.selected {
            self.live_quote = Some(market::simulate_price_movement(stock.price, &mut self.rng));
        }
    }

    pub fn add_images<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: AsRef<std::path::Path>,
    {
        let accepted = self.images.add(paths);
        info!("Added {} training image(s), {} total", accepted, self.images.len());
        accepted
    }

    pub fn can_start_training(&self) -> bool {
        self.selected.is_some() && !self.images.is_empty()
    }

    pub fn start_training(&mut self) {
        if !self.can_start_training() {
            self.status_msg = Some("Select a stock and add at least one image first".to_string());
            return;
        }
        self.training.start();
        if let Some(old) = self.ticker.take() {
            old.stop();
        }
        self.ticker = Some(Ticker::start(self.config.tick_interval, self.tick_tx.clone()));
        self.status_msg = None;
        info!(
            "Training {} with {} from {:.1}% (ticker {})",
            self.selected.as_ref().map(|s| s.symbol.as_str()).unwrap_or("-"),
            self.algorithm.name(),
            self.training.progress(),
            self.ticker.as_ref().map(|h| h.id()).unwrap_or_default()
        );
    }

    pub fn pause_training(&mut self) {
        self.training.stop();
        if let Some(handle) = self.ticker.take() {
            handle.stop();
        }
        info!("Training paused at {:.1}%", self.training.progress());
    }

    pub fn reset_training(&mut self) {
        if self.training.is_running() {
            return;
        }
        self.training.reset();
        info!("Training reset");
    }

    pub fn is_ticker_active(&self) -> bool {
        self.ticker.is_some()
    }

    /// Applies one tick if it belongs to the live ticker; stale ticks are dropped.
    pub fn handle_tick(&mut self, tick: Tick) {
        let owned = self.ticker.as_ref().is_some_and(|h| h.owns(&tick));
        if !owned || !self.training.is_running() {
            return;
        }
        if self.training.tick(&mut self.rng) {
            self.training.stop();
            if let Some(handle) = self.ticker.take() {
                handle.stop();
            }
            let m = self.training.metrics();
            info!(
                "Training complete: accuracy {:.1}%, loss {:.3}, epoch {}",
                m.accuracy, m.loss, m.epoch
            );
        }
    }

    pub fn drain_ticks(&mut self) {
        while let Ok(tick) = self.tick_rx.try_recv() {
            self.handle_tick(tick);
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match self.input_mode {
            InputMode::Search => self.handle_search_key(code),
            InputMode::ImagePath => self.handle_image_key(code),
            InputMode::Browse => self.handle_browse_key(code),
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => {
                self.selector.query.push(c);
                self.selector.cursor = 0;
            }
            KeyCode::Backspace => {
                self.selector.query.pop();
                self.selector.cursor = 0;
            }
            KeyCode::Enter | KeyCode::Esc => self.input_mode = InputMode::Browse,
            _ => {}
        }
    }

    fn handle_image_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.image_input.push(c),
            KeyCode::Backspace => {
                self.image_input.pop();
            }
            KeyCode::Enter => {
                let path = self.image_input.trim().to_string();
                if !path.is_empty() && self.add_images([path]) == 0 {
                    self.status_msg = Some("Image limit reached".to_string());
                }
                self.image_input.clear();
                self.input_mode = InputMode::Browse;
            }
            KeyCode::Esc => {
                self.image_input.clear();
                self.input_mode = InputMode::Browse;
            }
            _ => {}
        }
    }

    fn handle_browse_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.tab = self.tab.next(),
            KeyCode::Char('1') => self.tab = Tab::Dashboard,
            KeyCode::Char('2') => self.tab = Tab::Training,
            KeyCode::Char('3') => self.tab = Tab::Predictions,
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Char('e') => self.selector.cycle_exchange(),
            KeyCode::Char('s') => self.selector.cycle_sector(),
            KeyCode::Char('o') => {
                self.selector.sort = self.selector.sort.next();
                self.selector.cursor = 0;
            }
            KeyCode::Char('c') => self.selector.clear(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selector.cursor = self.selector.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.selector.visible().len();
                if self.selector.cursor + 1 < len {
                    self.selector.cursor += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(record) = self.selector.visible().get(self.selector.cursor).copied() {
                    self.select(record);
                }
            }
            KeyCode::Char('l') => self.refresh_quote(),
            KeyCode::Char('g') => self.regenerate(),
            _ if self.tab == Tab::Training => self.handle_training_key(code),
            _ => {}
        }
    }

    fn handle_training_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(' ') | KeyCode::Char('t') => {
                if self.training.is_running() {
                    self.pause_training();
                } else {
                    self.start_training();
                }
            }
            KeyCode::Char('r') => self.reset_training(),
            KeyCode::Char('a') if !self.training.is_running() => {
                self.algorithm = self.algorithm.next();
            }
            KeyCode::Char('i') if !self.training.is_running() => {
                self.input_mode = InputMode::ImagePath;
            }
            KeyCode::Char('x') if !self.training.is_running() => self.images.clear(),
            _ => {}
        }
    }

    pub async fn run(&mut self, terminal: &mut crate::tui::Tui) -> io::Result<()> {
        while !self.should_quit {
            self.drain_ticks();
            terminal.draw(|f| crate::ui::render(f, self))?;

            if event::poll(std::time::Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        if let Some(handle) = self.ticker.take() {
            handle.stop();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_app() -> App {
        let mut app = App::new(AppConfig {
            tick_interval: Duration::from_millis(200),
            seed: Some(7),
        });
        app.today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        app
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn test_starts_without_selection() {
        let app = test_app();
        assert_eq!(app.view_state(), ViewState::NoStockSelected);
        assert_eq!(app.tab, Tab::Dashboard);
        assert!(app.view.is_none());
    }

    #[test]
    fn test_search_and_select_flow() {
        let mut app = test_app();
        app.handle_key(KeyCode::Char('/'));
        type_text(&mut app, "nvda");
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Browse);
        assert_eq!(app.selector.visible().len(), 1);

        app.handle_key(KeyCode::Enter);
        assert_eq!(app.view_state(), ViewState::StockSelected);
        let selected = app.selected.as_ref().unwrap();
        assert_eq!(selected.symbol, "NVDA");

        let view = app.view.as_ref().unwrap();
        assert_eq!(view.history.len(), 31);
        assert_eq!(view.forecast.len(), 30);
        assert_eq!(view.indicators.bollinger.middle, 452.67);
        assert_eq!(view.history.last().unwrap().date, app.today);
    }

    #[test]
    fn test_tab_navigation() {
        let mut app = test_app();
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.tab, Tab::Training);
        app.handle_key(KeyCode::Char('3'));
        assert_eq!(app.tab, Tab::Predictions);
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.tab, Tab::Dashboard);
    }

    #[test]
    fn test_filters_and_cursor() {
        let mut app = test_app();
        app.handle_key(KeyCode::Char('e'));
        let exchange = app.selector.exchange_filter();
        assert!(!exchange.is_empty());
        assert!(app.selector.visible().iter().all(|s| s.exchange == exchange));

        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Down);
        assert_eq!(app.selector.cursor, 2);
        app.handle_key(KeyCode::Char('o'));
        assert_eq!(app.selector.sort, SortKey::Price);
        assert_eq!(app.selector.cursor, 0);

        app.handle_key(KeyCode::Char('c'));
        assert_eq!(app.selector.exchange_filter(), "");
        assert_eq!(app.selector.visible().len(), catalog::all().len());
    }

    #[test]
    fn test_exchange_cycle_wraps_to_all() {
        let mut app = test_app();
        let n = app.selector.exchanges.len();
        for _ in 0..=n {
            app.handle_key(KeyCode::Char('e'));
        }
        assert_eq!(app.selector.exchange, None);
    }

    #[test]
    fn test_unknown_symbol_sets_status() {
        let mut app = test_app();
        assert!(!app.select_symbol("NOPE"));
        assert!(app.status_msg.is_some());
        assert!(app.select_symbol("msft"));
        assert_eq!(app.selected.as_ref().unwrap().symbol, "MSFT");
    }

    #[test]
    fn test_training_requires_stock_and_images() {
        let mut app = test_app();
        app.tab = Tab::Training;
        app.handle_key(KeyCode::Char('t'));
        assert!(!app.training.is_running());
        assert!(app.status_msg.is_some());

        app.select_symbol("AAPL");
        app.handle_key(KeyCode::Char('t'));
        assert!(!app.training.is_running());
    }

    #[test]
    fn test_image_path_entry() {
        let mut app = test_app();
        app.tab = Tab::Training;
        app.handle_key(KeyCode::Char('i'));
        assert_eq!(app.input_mode, InputMode::ImagePath);
        type_text(&mut app, "charts/aapl.png");
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.images.len(), 1);
        assert_eq!(app.input_mode, InputMode::Browse);

        app.handle_key(KeyCode::Char('i'));
        type_text(&mut app, "ignored.png");
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.images.len(), 1);
    }

    #[test]
    fn test_algorithm_cycles_while_idle() {
        let mut app = test_app();
        app.tab = Tab::Training;
        app.handle_key(KeyCode::Char('a'));
        assert_eq!(app.algorithm, Algorithm::RandomForest);
    }

    #[tokio::test]
    async fn test_training_setup_locked_while_running() {
        let mut app = test_app();
        app.select_symbol("AAPL");
        app.add_images(["a.png", "b.png"]);
        app.tab = Tab::Training;
        app.handle_key(KeyCode::Char('t'));
        assert!(app.training.is_running());

        app.handle_key(KeyCode::Char('a'));
        app.handle_key(KeyCode::Char('i'));
        app.handle_key(KeyCode::Char('x'));
        assert_eq!(app.algorithm, Algorithm::Lstm);
        assert_eq!(app.input_mode, InputMode::Browse);
        assert_eq!(app.images.len(), 2);

        app.handle_key(KeyCode::Char('t'));
        assert!(!app.training.is_running());
        app.handle_key(KeyCode::Char('a'));
        assert_eq!(app.algorithm, Algorithm::RandomForest);
    }

    #[tokio::test]
    async fn test_training_runs_to_completion_via_ticks() {
        let mut app = test_app();
        app.select_symbol("AAPL");
        app.add_images(["a.png"]);
        app.tab = Tab::Training;
        app.handle_key(KeyCode::Char('t'));
        assert!(app.training.is_running());
        assert!(app.is_ticker_active());

        let live_id = app.ticker.as_ref().unwrap().id();
        let mut guard = 0;
        while app.training.is_running() {
            app.handle_tick(Tick { ticker_id: live_id });
            guard += 1;
            assert!(guard < 100_000);
        }
        assert!(app.training.is_complete());
        assert!(!app.is_ticker_active());
        assert_eq!(app.training.metrics().epoch, 50);
    }

    #[tokio::test]
    async fn test_stale_ticks_are_ignored_after_pause() {
        let mut app = test_app();
        app.select_symbol("AAPL");
        app.add_images(["a.png"]);
        app.start_training();
        let old_id = app.ticker.as_ref().unwrap().id();
        app.handle_tick(Tick { ticker_id: old_id });
        let progress = app.training.progress();

        app.pause_training();
        app.handle_tick(Tick { ticker_id: old_id });
        assert_eq!(app.training.progress(), progress);

        // Restart keeps progress and ignores ticks from the previous ticker.
        app.start_training();
        assert_eq!(app.training.progress(), progress);
        app.handle_tick(Tick { ticker_id: old_id });
        assert_eq!(app.training.progress(), progress);
        app.pause_training();
    }

    #[tokio::test]
    async fn test_reset_is_blocked_while_running() {
        let mut app = test_app();
        app.select_symbol("AAPL");
        app.add_images(["a.png"]);
        app.tab = Tab::Training;
        app.handle_key(KeyCode::Char('t'));
        let id = app.ticker.as_ref().unwrap().id();
        app.handle_tick(Tick { ticker_id: id });
        let progress = app.training.progress();
        app.handle_key(KeyCode::Char('r'));
        assert!(app.training.is_running());
        assert_eq!(app.training.progress(), progress);

        app.handle_key(KeyCode::Char('t'));
        app.handle_key(KeyCode::Char('r'));
        assert_eq!(app.training.progress(), 0.0);
        assert_eq!(app.training.metrics().accuracy, 0.0);
    }

    #[test]
    fn test_refresh_quote_needs_selection() {
        let mut app = test_app();
        app.handle_key(KeyCode::Char('l'));
        assert!(app.live_quote.is_none());
        app.select_symbol("KO");
        app.handle_key(KeyCode::Char('l'));
        assert!(app.live_quote.is_some());
    }
}

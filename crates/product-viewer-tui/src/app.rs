//! Application state and main loop

use crate::action::Action;
use crate::components::{Component, DashboardComponent};
use crate::export_log::ExportLogger;
use crate::tui::{self, Tui};
use catalog_rs::{CatalogPayload, Product, ProductClient};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use product_viewer_core::constants::EXPORT_FLASH_SECS;
use product_viewer_core::{
    DashboardError, DashboardState, ErrorCategory, LoadTicket, ReportConfig, ViewerConfig,
    categorize_error, format_catalog_error,
};
use product_viewer_report::export_report;
use ratatui::layout::Rect;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Results from async operations
#[derive(Debug)]
enum AsyncResult {
    CatalogLoaded {
        ticket: LoadTicket,
        result: Result<CatalogPayload, (ErrorCategory, String)>,
    },
}

/// Main application state
pub struct App {
    should_quit: bool,
    state: DashboardState,
    dashboard: DashboardComponent,
    /// Catalog client, or the reason it could not be built
    client: std::result::Result<ProductClient, (ErrorCategory, String)>,
    report_config: ReportConfig,
    /// Directory the PDF report is written to
    output_dir: PathBuf,
    export_log: ExportLogger,
    /// Products waiting to be exported after the next frame
    pending_export: Option<Vec<Product>>,
    /// When the last successful export finished
    exported_at: Option<Instant>,
    tick_rate: Duration,
    /// Channel for async action results
    action_rx: mpsc::UnboundedReceiver<AsyncResult>,
    action_tx: mpsc::UnboundedSender<AsyncResult>,
}

impl App {
    pub fn new(config: ViewerConfig, output_dir: PathBuf, export_log: ExportLogger) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let endpoint = config.api.list_url();
        let client = ProductClient::new(config.api).map_err(|e| {
            tracing::error!("Cannot create catalog client: {}", e);
            (categorize_error(&e), format_catalog_error(&e))
        });

        Self {
            should_quit: false,
            state: DashboardState::new(config.display.category_filters()),
            dashboard: DashboardComponent::new(endpoint, config.display.currency_symbol),
            client,
            report_config: config.report,
            output_dir,
            export_log,
            pending_export: None,
            exported_at: None,
            tick_rate: Duration::from_millis(100),
            action_rx,
            action_tx,
        }
    }

    /// Run the application
    pub async fn run(&mut self) -> Result<()> {
        tui::install_panic_hook();
        let mut terminal = tui::init()?;

        let result = self.main_loop(&mut terminal).await;

        tui::restore()?;
        result
    }

    /// Main event loop
    async fn main_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let size = terminal.size()?;
        self.dashboard.init(Rect::new(0, 0, size.width, size.height))?;

        // Fetch on startup
        self.start_load();
        self.sync();

        loop {
            terminal.draw(|frame| {
                let area = frame.area();
                if let Err(e) = self.dashboard.draw(frame, area) {
                    tracing::error!("Draw error: {}", e);
                }
            })?;

            // The frame above showed "Generating PDF..."
            if let Some(products) = self.pending_export.take() {
                self.run_export(products);
                self.sync();
                continue;
            }

            if event::poll(self.tick_rate)? {
                let action = match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.dashboard.handle_key_event(key)?
                    }
                    Event::Mouse(mouse) => self.dashboard.handle_mouse_event(mouse)?,
                    Event::Resize(w, h) => Some(Action::Resize(w, h)),
                    _ => None,
                };
                if let Some(action) = action {
                    self.handle_action(action)?;
                }
            } else {
                self.handle_action(Action::Tick)?;
            }

            // Check async results (non-blocking)
            while let Ok(result) = self.action_rx.try_recv() {
                self.handle_async_result(result);
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Push the current state to the UI
    fn sync(&mut self) {
        self.dashboard.set_snapshot(self.state.snapshot());
    }

    /// Start a catalog fetch unless one is already running
    fn start_load(&mut self) {
        let ticket = match self.state.begin_load() {
            Ok(ticket) => ticket,
            Err(e) => {
                tracing::debug!("Reload ignored: {}", e);
                return;
            }
        };

        let client = match &self.client {
            Ok(client) => client.clone(),
            Err(error) => {
                let error = error.clone();
                self.handle_async_result(AsyncResult::CatalogLoaded {
                    ticket,
                    result: Err(error),
                });
                return;
            }
        };

        tracing::info!("Fetching products from {}", client.list_url());
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = client
                .fetch_products()
                .await
                .map_err(|e| (categorize_error(&e), format_catalog_error(&e)));
            // The receiver is gone once the app has quit
            if tx.send(AsyncResult::CatalogLoaded { ticket, result }).is_err() {
                tracing::debug!("Dropping catalog result after shutdown");
            }
        });
    }

    fn handle_async_result(&mut self, result: AsyncResult) {
        match result {
            AsyncResult::CatalogLoaded { ticket, result } => {
                let (category, result) = match result {
                    Ok(payload) => (None, Ok(payload)),
                    Err((category, message)) => (Some(category), Err(message)),
                };
                if self.state.finish_load(ticket, result) {
                    self.dashboard.set_error_category(category);
                    self.dashboard.reset_cursor();
                }
                self.sync();
            }
        }
    }

    /// Generate and write the report, recording the outcome
    fn run_export(&mut self, products: Vec<Product>) {
        let count = products.len();
        let result = match export_report(&products, &self.report_config, &self.output_dir) {
            Ok(Some(path)) => {
                self.export_log.log_success(count, &path);
                self.exported_at = Some(Instant::now());
                Ok(path)
            }
            Ok(None) => Err("nothing to export".to_string()),
            Err(e) => {
                self.export_log.log_failure(count, &e.to_string());
                Err(e.to_string())
            }
        };
        self.state.finish_export(result);
    }

    /// Log transitions the current state does not allow
    fn apply<T>(&self, result: std::result::Result<T, DashboardError>) {
        if let Err(e) = result {
            tracing::debug!("Action ignored: {}", e);
        }
    }

    /// Handle an action
    fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Reload => {
                self.start_load();
            }
            Action::SearchChanged(query) => {
                let result = self.state.set_query(query);
                self.apply(result);
            }
            Action::CycleCategory { forward } => {
                let result = self.state.cycle_category(forward).map(|c| c.label().to_string());
                self.apply(result);
            }
            Action::ToggleProduct(id) => {
                let result = self.state.toggle(&id);
                self.apply(result);
            }
            Action::ToggleSelectAll => {
                let result = self.state.press_select_all();
                self.apply(result);
            }
            Action::ClearSelection => {
                let result = self.state.clear_selection();
                self.apply(result);
            }
            Action::Export => match self.state.begin_export() {
                Ok(products) => {
                    tracing::info!("Generating PDF for {} products", products.len());
                    self.pending_export = Some(products);
                }
                Err(e) => tracing::debug!("Export ignored: {}", e),
            },
            Action::Tick => {
                let flash = Duration::from_secs(EXPORT_FLASH_SECS);
                if self.exported_at.is_some_and(|at| at.elapsed() >= flash) {
                    self.exported_at = None;
                    self.state.clear_export_flash();
                }
                if let Some(next_action) = self.dashboard.update(Action::Tick)? {
                    self.handle_action(next_action)?;
                }
            }
            Action::Resize(_w, _h) => {
                // Terminal will automatically resize on next draw
            }
        }
        self.sync();
        Ok(())
    }
}

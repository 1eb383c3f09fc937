/**
 * MarketSquare Desktop Client - Main Entry Point
 *
 * Loads configuration, opens the persisted session store and runs the egui
 * storefront. The session restore starts in the background; the window shows
 * a loading state until it resolves.
 */
use std::sync::Arc;

use eframe::egui;
use marketsquare::egui_app::storage::{KeyValueStore, MemoryStore, SqliteStore};
use marketsquare::egui_app::theme::styles;
use marketsquare::egui_app::{views, AppState, Config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match Config::load() {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("[STARTUP] Invalid configuration, using defaults: {}", e);
            None
        }
    };
    let config = config.unwrap_or_default();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_filter().to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    tracing::info!(
        server = config.server_url(),
        store = %config.storage_path().display(),
        "starting MarketSquare"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("marketsquare-io")
        .build()?;

    let store: Arc<dyn KeyValueStore> =
        match runtime.block_on(SqliteStore::open(config.storage_path())) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::warn!(error = %e, "session store unavailable, sessions will not persist");
                Arc::new(MemoryStore::new())
            }
        };

    let state = AppState::new(config, store, runtime);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([720.0, 540.0]),
        ..Default::default()
    };
    eframe::run_native(
        "MarketSquare",
        options,
        Box::new(|cc| {
            styles::apply_global_theme(&cc.egui_ctx);
            Ok(Box::new(MarketSquareApp { state }))
        }),
    )?;

    Ok(())
}

struct MarketSquareApp {
    state: AppState,
}

impl eframe::App for MarketSquareApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.tick();

        views::render_top_bar(ctx, &mut self.state);
        views::render_tab_bar(ctx, &mut self.state);
        views::render_main_panel(ctx, &mut self.state);

        // Requests finish off the UI thread; keep polling while any is pending
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

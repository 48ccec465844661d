/**
 * Vote Client - Main Entry Point
 *
 * Loads the configuration, resumes the saved session (or fetches from the
 * server), and runs the egui board. Pending edits are published and the
 * session saved when the window closes.
 */
use eframe::egui;
use topicvote::egui_app::{theme, views, ApiClient, AppState, Config, SyncWorker};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;
    tracing::info!("Using vote server at {}", config.server_url());

    let worker = SyncWorker::new(ApiClient::new(config))?;
    let state = AppState::new(worker);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Topic Vote",
        options,
        Box::new(|cc| {
            theme::apply_global_theme(&cc.egui_ctx);
            Ok(Box::new(VoteApp { state, closed: false }))
        }),
    )?;
    Ok(())
}

/// Main application
struct VoteApp {
    state: AppState,
    closed: bool,
}

impl eframe::App for VoteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.check_sync_results();

        views::render_top_bar(ctx, &mut self.state);
        views::render_status_bar(ctx, &self.state);
        views::render_main_panel(ctx, &mut self.state);

        if ctx.input(|i| i.viewport().close_requested()) && !self.closed {
            self.closed = true;
            self.state.on_exit();
        }

        if self.state.is_busy() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

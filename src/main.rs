use caged_trainer::config::{DEFAULT_CONFIG_PATH, load_or_default};
use caged_trainer::session::PracticeSession;
use caged_trainer::ui::app::TrainerApp;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("caged_trainer=info,eframe=warn")),
        )
        .init();

    // 第一个参数可以指定配置文件路径
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = load_or_default(&config_path);
    info!(path = %config_path.display(), "starting CAGED Trainer");

    let session = match PracticeSession::new_or_default(config.session_defaults()) {
        Ok(session) => session,
        Err(e) => {
            error!(error = %e, "cannot start a practice session");
            std::process::exit(1);
        }
    };

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([960.0, 600.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "CAGED Trainer",
        native_options,
        Box::new(move |cc| Ok(Box::new(TrainerApp::new(cc, session, &config, config_path)))),
    )
}

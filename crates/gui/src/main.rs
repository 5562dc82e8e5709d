mod app;
mod ui;
mod viewport;

// Re-export library modules so that `crate::editor`, `crate::state`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use footprint_lib::command;
pub use footprint_lib::controller;
pub use footprint_lib::editor;
pub use footprint_lib::geometry;
pub use footprint_lib::harness;
pub use footprint_lib::input;
pub use footprint_lib::scene;
pub use footprint_lib::state;
pub use footprint_lib::sync;

use app::FootprintApp;
use editor::Editor;
use harness::EditorHarness;
use state::EditorSettings;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "footprint_gui=info,footprint_lib=info".into()),
        )
        .init();

    let settings = EditorSettings::load();

    // Parse --script <path> argument
    let editor = match parse_script_arg() {
        Some(script) => run_script(&script, settings),
        None => Editor::new(settings),
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Footprint Editor")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "footprint-gui",
        native_options,
        Box::new(move |cc| Ok(Box::new(FootprintApp::new(cc, editor)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_script_arg() -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--script" && i + 1 < args.len() {
            let path = &args[i + 1];
            match std::fs::read_to_string(path) {
                Ok(json) => {
                    tracing::info!("Loaded script from {path}");
                    return Some(json);
                }
                Err(e) => {
                    tracing::error!("Failed to read script file {path}: {e}");
                }
            }
            break;
        }
        i += 1;
    }
    None
}

/// Replay a JSON command batch and start the window on its result
fn run_script(script: &str, settings: EditorSettings) -> Editor {
    let mut harness = EditorHarness::with_settings(settings);
    match command::execute_json_batch(&mut harness, script) {
        Ok(responses) => {
            for (i, response) in responses.iter().enumerate() {
                if let Some(error) = &response.error {
                    tracing::warn!("Script command {i} failed: {error}");
                }
            }
            tracing::info!("Replayed {} script commands", responses.len());
        }
        Err(e) => tracing::error!("{e}"),
    }
    harness.editor
}

use clap::Parser;
use eframe::egui;

use papertable::app::PaperTableApp;
use papertable::config::Args;

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Paper Table",
        options,
        Box::new(move |_cc| Ok(Box::new(PaperTableApp::new(&args)))),
    )
}

use batch_uploader::app::{BatchUploaderApp, APP_TITLE};
use batch_uploader::config::Cli;
use batch_uploader::upload::BatchUploader;
use batch_uploader::utils::logging::initialize_logging;
use clap::Parser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    initialize_logging(&cli.log_level)?;

    let uploader = BatchUploader::new(cli.endpoints()?)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([600.0, 600.0])
            .with_min_inner_size([400.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| Box::new(BatchUploaderApp::new(cc, uploader, runtime))),
    )?;
    Ok(())
}

use eframe::egui;
use site_contact_form::{app, logging, settings};

fn main() -> eframe::Result<()> {
    let settings = settings::load();
    logging::init(settings.debug_logging);
    tracing::info!(
        backend = settings.backend.is_some(),
        "starting site contact form"
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1000.0, 860.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Midterm Clinical Site Contact Form",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::FormApp::new(cc, settings)))),
    )
}

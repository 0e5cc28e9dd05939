#[cfg(feature = "gui")]
use dioxus::prelude::*;
#[cfg(feature = "gui")]
use gridsheet::ui::app::App;

#[cfg(feature = "gui")]
fn main() {
    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new().with_window(
                dioxus::desktop::WindowBuilder::new()
                    .with_title("GridSheet")
                    .with_inner_size(dioxus::desktop::LogicalSize::new(1200.0, 800.0)),
            ),
        )
        .launch(App);
}

// Fallback entry point when the GUI feature is disabled (e.g. headless
// builds without the GTK/WebKit system libraries). The real application
// lives behind the `gui` feature above.
#[cfg(not(feature = "gui"))]
fn main() {}

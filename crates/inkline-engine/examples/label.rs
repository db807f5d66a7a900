//! Example: render a two-colour label to SVG and PNG
//!
//! Usage: `cargo run --example label -- [FONT] [OUT_DIR]`

use inkline_engine::{
    Anchor, BackgroundOptions, ColorSpec, Config, Engine, ExtraText, SaveOptions, TextOptions,
};
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize logging, RUST_LOG=debug shows resolved geometry
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let font = args.next().unwrap_or_else(|| "sans-serif".to_string());
    let out_dir = args.next().unwrap_or_else(|| "target/labels".to_string());

    let engine = Engine::new(Config::default());
    println!("inkline Engine v{} initialized", inkline_engine::VERSION);

    let mut options = TextOptions::new("Inkline", font, 48.0);
    options.colors = ColorSpec::Palette(vec!["#e63946".into(), "#1d3557".into()]);
    options.padding = vec![12.0, 24.0];
    options.background = Some(BackgroundOptions {
        color: "#f1faee".into(),
        stroke_color: "#457b9d".into(),
        stroke_width: 2.0,
        radius: 10.0,
    });
    let mut badge = ExtraText::new("v1", 0.0, 0.0);
    badge.anchor = Some(Anchor::BottomRight);
    badge.margin = 4.0;
    badge.font_size = 10.0;
    badge.color = "#457b9d".into();
    options.extra_texts.push(badge);

    for (name, dpi) in [("label.svg", 0.0), ("label.png", 300.0)] {
        options.save = Some(SaveOptions::new(format!("{out_dir}/{name}")).with_dpi(dpi));
        match engine.render_to_file(&options) {
            Ok(rendered) => println!(
                "Wrote {}/{} ({}x{} pt)",
                out_dir, name, rendered.width, rendered.height
            ),
            Err(e) => {
                eprintln!("Failed to render {name}: {e}");
                std::process::exit(1);
            }
        }
    }
}

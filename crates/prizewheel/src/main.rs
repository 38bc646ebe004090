use arcpaint::{Pixmap, Point};
use clap::{Parser, Subcommand};
use prizewheel::config;
use prizewheel::events::PointerEvent;
use prizewheel::widget::WheelWidget;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "prizewheel", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Composite the configured wheel once and write a PPM preview.
    Render {
        /// Output file
        #[arg(short, long, default_value = "wheel.ppm")]
        out: PathBuf,
        /// Square preview size in pixels
        #[arg(short, long, default_value_t = 512)]
        size: u32,
    },
    /// Spin the configured wheel and report the winning section.
    Spin {
        /// Horizontal release velocity in px/s
        #[arg(long, default_value_t = 1500.0)]
        velocity_x: f64,
        /// Vertical release velocity in px/s
        #[arg(long, default_value_t = 0.0)]
        velocity_y: f64,
    },
    /// Write the default config file if none exists.
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render { out, size }) => render(&out, size),
        Some(Commands::Spin {
            velocity_x,
            velocity_y,
        }) => spin(velocity_x, velocity_y),
        Some(Commands::InitConfig) => init_config(),
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

fn build_widget(size: u32) -> anyhow::Result<WheelWidget> {
    let config = config::load_or_default();
    let mut widget = WheelWidget::new();
    widget.set_marker_position(config.marker);
    widget.set_style(config.style());
    widget.set_sections(config.sections()?)?;
    widget.layout_ready(size, size)?;
    widget.request_generation()?;
    Ok(widget)
}

fn render(out: &Path, size: u32) -> anyhow::Result<()> {
    let widget = build_widget(size)?;
    let wheel = widget
        .composited()
        .ok_or_else(|| anyhow::anyhow!("No wheel image was generated"))?;

    write_ppm(out, wheel)?;
    println!(
        "wrote {}x{} wheel preview to {}",
        wheel.width(),
        wheel.height(),
        out.display()
    );
    Ok(())
}

fn spin(velocity_x: f64, velocity_y: f64) -> anyhow::Result<()> {
    let size = 512;
    let mut widget = build_widget(size)?;

    let winner: Rc<RefCell<Option<(usize, f64)>>> = Rc::default();
    let sink = Rc::clone(&winner);
    widget.set_settle_listener(move |index, degrees| {
        *sink.borrow_mut() = Some((index, degrees));
    });

    // a short drag along the lower rim, then the release fling
    let t = Duration::from_millis;
    let y = size as f64 * 0.75;
    widget.pointer_event(&PointerEvent::down(Point::new(180.0, y), t(0)));
    widget.pointer_event(&PointerEvent::moved(Point::new(220.0, y), t(16)));
    widget.pointer_event(&PointerEvent::up(Point::new(220.0, y), t(250)));
    widget.fling(
        Point::new(180.0, y),
        Point::new(260.0, y),
        velocity_x,
        velocity_y,
    );

    let mut frames = 0;
    while widget.advance().spinning {
        frames += 1;
        if frames > 100_000 {
            anyhow::bail!("The wheel never settled");
        }
    }

    match *winner.borrow() {
        Some((index, degrees)) => {
            println!(
                "section {} wins at {} degrees after {} frames",
                index, degrees, frames
            );
            Ok(())
        }
        None => anyhow::bail!("The fling was interrupted before settling"),
    }
}

fn init_config() -> anyhow::Result<()> {
    let path = config::write_default_config()?;
    println!("config at {}", path.display());
    Ok(())
}

/// Flattens the RGBA wheel over a white page and writes binary PPM.
fn write_ppm(path: &Path, pixmap: &Pixmap) -> std::io::Result<()> {
    let mut out = Vec::with_capacity(pixmap.data().len() / 4 * 3 + 32);
    out.extend_from_slice(format!("P6\n{} {}\n255\n", pixmap.width(), pixmap.height()).as_bytes());
    for px in pixmap.data().chunks_exact(4) {
        let a = px[3] as u32;
        for c in &px[..3] {
            out.push(((*c as u32 * a + 255 * (255 - a) + 127) / 255) as u8);
        }
    }
    fs_err::write(path, out)
}

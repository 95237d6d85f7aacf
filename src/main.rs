mod demos;
mod display;
mod frame_clock;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use demos::{Demo, HsvSpotlight, ShadingPanels, Spotlight2d, SpotlightSphere};
use display::{Display, InputEvent, RenderTarget};
use frame_clock::FrameClock;
use sdl2::keyboard::Keycode;
use shadelab::config::{LabConfig, DEFAULT_CONFIG_PATH};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "shadelab")]
#[command(about = "Spotlight, hue-field and interpolation demos")]
struct Args {
    /// Window width (overrides the config file)
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Window height (overrides the config file)
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Disable VSync for uncapped framerate
    #[arg(long)]
    no_vsync: bool,

    /// Path to JSON config; missing file means defaults
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Demo shown at startup
    #[arg(short, long, value_enum, default_value_t = DemoKind::Spotlight2d)]
    demo: DemoKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DemoKind {
    Spotlight2d,
    Sphere,
    Hsv,
    Panels,
}

impl DemoKind {
    /// Slot in the demo list, matching the number keys
    fn index(self) -> usize {
        match self {
            DemoKind::Spotlight2d => 0,
            DemoKind::Sphere => 1,
            DemoKind::Hsv => 2,
            DemoKind::Panels => 3,
        }
    }
}

fn build_demos(config: &LabConfig) -> Result<Vec<Box<dyn Demo>>, String> {
    let demos: Vec<Box<dyn Demo>> = vec![
        Box::new(Spotlight2d::new(&config.spotlight)?),     // 1
        Box::new(SpotlightSphere::new(&config.spotlight)?), // 2
        Box::new(HsvSpotlight::new(config)?),               // 3
        Box::new(ShadingPanels::new()),                     // 4
    ];
    Ok(demos)
}

fn select(display: &mut Display, demo: &dyn Demo) {
    info!(demo = demo.name(), controls = demo.controls(), "selected");
    if let Err(e) = display.set_demo_title(demo.name()) {
        warn!(error = %e, "cannot set window title");
    }
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = LabConfig::load_or_default(&args.config).map_err(|e| {
        error!(path = %args.config.display(), error = %e, "bad config");
        e.to_string()
    })?;
    if let Some(w) = args.width {
        config.display.width = w;
    }
    if let Some(h) = args.height {
        config.display.height = h;
    }
    if args.no_vsync {
        config.display.vsync = false;
    }

    let (mut display, texture_creator) = Display::open(&config.display)?;
    let mut target = RenderTarget::for_display(&texture_creator, &display)?;
    let mut buffer = display.pixel_buffer();

    // 60 sample rolling average
    let mut clock = FrameClock::new(60);
    let mut log_fps = false;

    let mut demos = build_demos(&config)?;
    let mut current = args.demo.index();

    let (width, height) = (display.width(), display.height());
    info!(
        width = width,
        height = height,
        vsync = config.display.vsync,
        "shadelab"
    );
    info!("1-4: select demo, Left/Right: cycle, F: log FPS, Escape: quit");
    select(&mut display, demos[current].as_ref());

    'main: loop {
        let dt = clock.tick();

        for event in display.poll_events() {
            if let InputEvent::KeyDown(key) = &event {
                let selected = match *key {
                    Keycode::Escape => break 'main,
                    Keycode::F => {
                        log_fps = !log_fps;
                        continue;
                    },
                    Keycode::Num1 => Some(0),
                    Keycode::Num2 => Some(1),
                    Keycode::Num3 => Some(2),
                    Keycode::Num4 => Some(3),
                    Keycode::Left => Some((current + demos.len() - 1) % demos.len()),
                    Keycode::Right => Some((current + 1) % demos.len()),
                    _ => None,
                };
                if let Some(idx) = selected {
                    if idx != current {
                        current = idx;
                        select(&mut display, demos[current].as_ref());
                    }
                    continue;
                }
            }

            if matches!(&event, InputEvent::Quit) {
                break 'main;
            }

            demos[current].handle_event(&event);
        }

        let demo = &mut demos[current];
        demo.update(dt, display.width(), display.height());
        demo.render(&mut buffer);

        if log_fps && clock.window_elapsed() {
            info!(fps = clock.average_fps() as u32, demo = demo.name(), "frame rate");
        }

        display.present(&mut target, &buffer)?;
    }

    Ok(())
}

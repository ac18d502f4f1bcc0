use clap::Parser;
use client::app::{activate, NameEntry, Phase};
use client::config::{ClientConfig, DEFAULT_TICK_MS};
use client::input::{backspace_pressed, typed_chars, InputEvent, InputManager};
use client::rendering::Renderer;
use client::sync::Session;
use log::{error, info};
use macroquad::prelude::*;
use shared::DEFAULT_SERVER_URL;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the game server
    #[arg(short = 's', long, default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Join right away under this name instead of prompting for one
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// Resync period in milliseconds
    #[arg(short = 't', long, default_value_t = DEFAULT_TICK_MS)]
    tick_ms: u64,

    /// Ignore renders from cycles overtaken by a newer cycle
    #[arg(long)]
    discard_stale: bool,

    /// Window width
    #[arg(short = 'w', long, default_value = "800")]
    width: usize,

    /// Window height (no short flag to avoid conflict with --help)
    #[arg(long, default_value = "860")]
    height: usize,
}

impl Args {
    fn config(&self) -> ClientConfig {
        ClientConfig {
            server_url: self.server.clone(),
            tick_interval: Duration::from_millis(self.tick_ms.max(1)),
            discard_stale_renders: self.discard_stale,
        }
    }
}

fn window_conf() -> Conf {
    let args = Args::parse();
    Conf {
        window_title: "Grid Arena".to_owned(),
        window_width: args.width as i32,
        window_height: args.height as i32,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    if let Err(e) = run(Args::parse()).await {
        error!("Client error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting client...");

    let config = args.config();
    let mut renderer = Renderer::new(args.width, args.height);
    let mut input = InputManager::new();

    let mut phase = match args.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => Phase::Active(activate(Session::new(name), &config)?),
        _ => Phase::WaitingForName(NameEntry::default()),
    };

    loop {
        let events = input.update();
        let mut joined = None;

        match &mut phase {
            Phase::WaitingForName(entry) => {
                for c in typed_chars() {
                    entry.push(c);
                }
                if backspace_pressed() {
                    entry.backspace();
                }
                if events.contains(&InputEvent::Confirm) {
                    joined = entry.submit();
                }
                renderer.draw_name_prompt(entry);
            }

            Phase::Active(active) => {
                active.poll_notices();
                for event in events {
                    active.handle(event);
                }
                renderer.render(active);
            }
        }

        if let Some(session) = joined {
            info!("Controls: Arrows/WASD to walk, Space to attack");
            phase = Phase::Active(activate(session, &config)?);
        }

        next_frame().await;
    }
}

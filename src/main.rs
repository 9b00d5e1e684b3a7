use anyhow::Context;
use clap::Parser;
use crossterm::{cursor, event, execute, terminal};
use ferris_wheel::config::{Args, Config};
use ferris_wheel::state::{AppState, Response};
use ferris_wheel::widget::WheelWidget;
use std::fs::File;
use std::io::{self, Stdout};
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Terminal size used when it cannot be queried
const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Puts the terminal into raw, alternate-screen mode and restores it on drop
struct TerminalGuard {
    stdout: Stdout,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(TerminalGuard { stdout })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<()> {
    // stdout is the render target, so logs only go to a file
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn terminal_size() -> (u16, u16) {
    match termsize::get() {
        Some(size) => (size.cols, size.rows),
        None => {
            warn!(fallback = ?FALLBACK_SIZE, "terminal size unavailable, using fallback");
            FALLBACK_SIZE
        }
    }
}

/// Frame loop: input is handled as it arrives, and every tick advances the
/// wheel and presents at most one frame
fn run(config: &Config) -> anyhow::Result<()> {
    let mut data = AppState::default();
    let mut widget = WheelWidget::new(config.wheel, config.tessellation);
    let mut guard = TerminalGuard::enter().context("failed to prepare the terminal")?;

    let (columns, rows) = terminal_size();
    widget.layout(columns, rows, &mut data);

    let interval = config.frame_interval();
    let mut next_tick = Instant::now();
    loop {
        let timeout = next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout).context("failed to poll terminal events")? {
            let event = event::read().context("failed to read terminal event")?;
            if widget.event(&event, &mut data) == Some(Response::Quit) {
                info!("quit requested");
                return Ok(());
            }
            continue;
        }

        widget.tick(&mut data);
        widget
            .paint(&mut guard.stdout, &data)
            .context("failed to draw frame")?;
        next_tick += interval;
        let now = Instant::now();
        if next_tick < now {
            next_tick = now;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::from_args(args)?;
    init_tracing(config.log_file.as_deref())?;
    info!(
        radius = config.wheel.radius(),
        chairs = config.wheel.chair_count(),
        ring_separation = config.wheel.ring_separation(),
        frame_rate = config.frame_rate,
        "starting ferris wheel"
    );
    run(&config)
}

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{debug, info};
use rand::Rng;

use dial::{Dial, Gauge, GaugeOptions, Timer, TimerOptions, Viewer, WidgetCommand};

/// Every this many time units the timer demo leaves a trace and relabels.
const FREEZE_EVERY: f64 = 50.0;
const TOGGLE_FACTOR: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Variant {
    Gauge,
    Timer,
}

#[derive(Parser, Debug)]
#[command(version, about = "Animated SVG gauge and timer dials", long_about = None)]
struct Args {
    /// Which dial to show
    #[arg(value_enum)]
    variant: Variant,

    /// JSON options for the chosen dial
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the initial SVG to this file and exit
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Frame rate cap of the preview window
    #[arg(long, default_value_t = 60.0, value_parser = parse_fps)]
    fps: f64,

    /// Period of the value feed (gauge) or of the clock ticks (timer)
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    interval_ms: u64,
}

fn parse_fps(text: &str) -> Result<f64, String> {
    let fps: f64 = text.parse().map_err(|e| format!("{e}"))?;
    if fps.is_finite() && fps > 0.0 {
        Ok(fps)
    } else {
        Err(format!("frame rate must be a positive number, got {fps}"))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = args
        .config
        .as_ref()
        .map(|path| {
            fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
        })
        .transpose()?;

    match args.variant {
        Variant::Gauge => {
            let options = match &config {
                Some(text) => GaugeOptions::from_json(text).context("invalid gauge options")?,
                None => GaugeOptions::builder().min(0.0).max(100.0).build(),
            };
            let mut gauge = Gauge::new(options).context("cannot build gauge")?;
            run_gauge(&mut gauge, &args)
        }
        Variant::Timer => {
            let options = match &config {
                Some(text) => TimerOptions::from_json(text).context("invalid timer options")?,
                None => TimerOptions::builder().build(),
            };
            let mut timer = Timer::new(options).context("cannot build timer")?;
            run_timer(&mut timer, &args)
        }
    }
}

fn run_gauge(gauge: &mut Gauge, args: &Args) -> anyhow::Result<()> {
    if let Some(path) = &args.svg {
        return write_svg(&*gauge, path);
    }

    let (min, max) = (gauge.config().min, gauge.config().max);
    let interval = Duration::from_millis(args.interval_ms);
    let (sender, receiver) = mpsc::channel();
    spawn_feed(sender, interval, move |rng| {
        // Occasionally overshoot so the clamp shows.
        let spread = (max - min) * 0.1;
        vec![WidgetCommand::Redraw(
            rng.random_range(min - spread..max + spread),
            None,
        )]
    });

    let viewer = Viewer::builder()
        .title("dial - gauge")
        .max_framerate(args.fps)
        .build();
    viewer
        .show_with_commands(gauge, receiver)
        .map_err(|e| anyhow!("preview window failed: {e}"))
}

fn run_timer(timer: &mut Timer, args: &Args) -> anyhow::Result<()> {
    if let Some(path) = &args.svg {
        return write_svg(&*timer, path);
    }

    let step = timer.tick_step();
    let mut time = timer.time();
    let interval = Duration::from_millis(args.interval_ms);
    let (sender, receiver) = mpsc::channel();
    spawn_feed(sender, interval, move |_| {
        time += step;
        let mut commands = vec![WidgetCommand::Tick];
        if time > 0.0 && (time % FREEZE_EVERY).abs() < step / 2.0 {
            commands.push(WidgetCommand::Freeze(None));
            commands.push(WidgetCommand::SetLabel("ACU".to_string()));
        }
        commands
    });

    let viewer = Viewer::builder()
        .title("dial - timer")
        .max_framerate(args.fps)
        .click(WidgetCommand::ToggleScale(TOGGLE_FACTOR))
        .build();
    viewer
        .show_with_commands(timer, receiver)
        .map_err(|e| anyhow!("preview window failed: {e}"))
}

fn write_svg(dial: &impl Dial, path: &Path) -> anyhow::Result<()> {
    fs::write(path, dial.scene().to_svg())
        .with_context(|| format!("cannot write {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

/// Runs `next` every `interval` on its own thread and forwards what it
/// yields until the window side hangs up.
fn spawn_feed<F>(sender: Sender<WidgetCommand>, interval: Duration, mut next: F)
where
    F: FnMut(&mut rand::rngs::ThreadRng) -> Vec<WidgetCommand> + Send + 'static,
{
    thread::spawn(move || {
        let mut rng = rand::rng();
        loop {
            thread::sleep(interval);
            for command in next(&mut rng) {
                if sender.send(command).is_err() {
                    debug!("feed stopped: window closed");
                    return;
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse() {
        let args = Args::try_parse_from(["dial", "timer"]).unwrap();
        assert_eq!(args.variant, Variant::Timer);
        assert_eq!(args.fps, 60.0);
        assert_eq!(args.interval_ms, 1000);
    }

    #[test]
    fn rejects_non_positive_fps() {
        for fps in ["0", "-30", "inf", "NaN", "fast"] {
            assert!(
                Args::try_parse_from(["dial", "gauge", "--fps", fps]).is_err(),
                "--fps {fps}"
            );
        }
        let args = Args::try_parse_from(["dial", "gauge", "--fps", "24.5"]).unwrap();
        assert_eq!(args.fps, 24.5);
    }

    #[test]
    fn rejects_zero_interval() {
        assert!(Args::try_parse_from(["dial", "timer", "--interval-ms", "0"]).is_err());
        let args = Args::try_parse_from(["dial", "timer", "--interval-ms", "1"]).unwrap();
        assert_eq!(args.interval_ms, 1);
    }
}

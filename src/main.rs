// NES Emulator - Headless runner
//
// Loads a ROM, runs a fixed number of frames with optional scripted button
// presses, optionally saves the last frame as a PNG and prints a summary.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;

use nes_core::cartridge::Cartridge;
use nes_core::emulator::{save_screenshot, EmulatorConfig, Nes, CONFIG_FILE};
use nes_core::input::Button;
use nes_core::logger::{LogLevel, Logger};

#[derive(Parser)]
#[command(name = "nes-core")]
#[command(version, about = "Run an NES ROM headless for a number of frames")]
struct Args {
    /// Path to the iNES ROM
    rom: PathBuf,

    /// Number of frames to run
    #[arg(short = 'n', long, default_value_t = 60)]
    frames: u64,

    /// Save the last frame as PNG, optionally into DIR instead of the configured directory
    #[arg(long, value_name = "DIR", num_args = 0..=1)]
    screenshot: Option<Option<PathBuf>>,

    /// Configuration file
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Override the configured log level (none, error, warning, info, debug, trace)
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Hold BUTTON starting at FRAME for LEN frames (default 1), e.g. start@30+5
    #[arg(long = "press", value_name = "BUTTON@FRAME[+LEN]")]
    presses: Vec<Press>,
}

/// A scripted button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Press {
    button: Button,
    frame: u64,
    len: u64,
}

impl Press {
    fn is_held(&self, frame: u64) -> bool {
        frame >= self.frame && frame < self.frame.saturating_add(self.len)
    }
}

impl FromStr for Press {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, timing) = s
            .split_once('@')
            .ok_or_else(|| format!("expected BUTTON@FRAME, got {:?}", s))?;
        let button =
            Button::from_name(name).ok_or_else(|| format!("unknown button {:?}", name))?;

        let (frame, len) = match timing.split_once('+') {
            Some((frame, len)) => (frame, len),
            None => (timing, "1"),
        };
        let frame = frame
            .parse()
            .map_err(|_| format!("invalid frame number {:?}", frame))?;
        let len = len
            .parse()
            .map_err(|_| format!("invalid press length {:?}", len))?;

        Ok(Press { button, frame, len })
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = EmulatorConfig::load_or_default(&args.config);
    if let Some(level) = args.log_level {
        config.log.level = level;
    }
    Logger::install(config.log.level, config.log.file.as_deref())
        .context("failed to install logger")?;

    let cartridge = Cartridge::from_file(&args.rom)
        .with_context(|| format!("failed to load {}", args.rom.display()))?;
    let header = cartridge.header;
    let board = cartridge.board().name();

    let mut nes = Nes::from_config(cartridge, &config)?;

    let started = Instant::now();
    let mut last_frame = None;
    for frame in 0..args.frames {
        for button in Button::ALL {
            let held = args
                .presses
                .iter()
                .any(|press| press.button == button && press.is_held(frame));
            nes.set_button(button, held);
        }

        let output = nes
            .advance_one_frame()
            .with_context(|| format!("emulation failed in frame {}", frame))?;
        last_frame = Some(output);
    }
    let elapsed = started.elapsed();

    let screenshot = match (&args.screenshot, &last_frame) {
        (Some(directory), Some(frame)) => {
            let mut shot_config = config.screenshot.clone();
            if let Some(directory) = directory {
                shot_config.directory = directory.clone();
            }
            Some(save_screenshot(frame, &shot_config).context("failed to save screenshot")?)
        }
        (Some(_), None) => bail!("no frame to capture (--frames 0)"),
        (None, _) => None,
    };

    println!("ROM:        {}", args.rom.display());
    println!(
        "Cartridge:  mapper {} ({}), PRG {}KB, CHR {}KB, {:?} mirroring",
        header.mapper,
        board,
        header.prg_rom_size() / 1024,
        header.chr_rom_size() / 1024,
        header.mirroring
    );
    println!("Frames:     {}", nes.frame_count());
    println!("CPU cycles: {}", nes.cpu().cycles);
    println!(
        "Elapsed:    {:.3}s ({:.1} fps)",
        elapsed.as_secs_f64(),
        nes.frame_count() as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
    );
    println!("Next:       {}", nes.trace());
    if let Some(path) = screenshot {
        println!("Screenshot: {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_parsing() {
        assert_eq!(
            "start@30+5".parse::<Press>(),
            Ok(Press {
                button: Button::Start,
                frame: 30,
                len: 5
            })
        );
        assert_eq!("A@2".parse::<Press>().map(|p| p.len), Ok(1), "Default length");
        assert!("jump@1".parse::<Press>().is_err());
        assert!("a".parse::<Press>().is_err());
        assert!("a@x".parse::<Press>().is_err());
    }

    #[test]
    fn test_press_window() {
        let press = Press {
            button: Button::A,
            frame: 10,
            len: 2,
        };
        assert!(!press.is_held(9));
        assert!(press.is_held(10));
        assert!(press.is_held(11));
        assert!(!press.is_held(12));
    }

    #[test]
    fn test_press_window_saturates() {
        let press: Press = "a@1+18446744073709551615".parse().unwrap();
        assert!(!press.is_held(0));
        assert!(press.is_held(1));
        assert!(press.is_held(u64::MAX - 1), "Held until the end of the run");
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "nes-core",
            "game.nes",
            "--frames",
            "10",
            "--press",
            "b@3",
            "--log-level",
            "debug",
            "--screenshot",
        ])
        .unwrap();
        assert_eq!(args.frames, 10);
        assert_eq!(args.presses.len(), 1);
        assert_eq!(args.log_level, Some(LogLevel::Debug));
        assert_eq!(args.screenshot, Some(None));
        assert_eq!(args.config, PathBuf::from(CONFIG_FILE));
    }
}

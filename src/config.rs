//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

use crate::{indicator::PinMap, transport::CommandSource};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "breakfast-signal")]
#[command(about = "A command-driven breakfast timer that drives three indicator LEDs")]
#[command(version = "1.0.0")]
pub struct Config {
    /// BCM pin of the "pending" LED
    #[arg(long, default_value = "23")]
    pub pending_pin: u8,

    /// BCM pin of the "cooking" LED
    #[arg(long, default_value = "24")]
    pub cooking_pin: u8,

    /// BCM pin of the "ready" LED
    #[arg(long, default_value = "25")]
    pub ready_pin: u8,

    /// Character device delivering command lines (e.g. /dev/rfcomm0)
    #[arg(short, long, conflicts_with = "listen")]
    pub device: Option<PathBuf>,

    /// TCP address to accept a controller connection on
    #[arg(short, long)]
    pub listen: Option<String>,

    /// Do not touch GPIO, only log the intended LED changes
    #[arg(long)]
    pub simulate: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Pin assignment of the three indicator outputs
    pub fn pin_map(&self) -> PinMap {
        PinMap {
            pending: self.pending_pin,
            cooking: self.cooking_pin,
            ready: self.ready_pin,
        }
    }

    /// Where commands are read from; stdin when neither a device nor a listen address is set
    pub fn command_source(&self) -> CommandSource {
        match (&self.device, &self.listen) {
            (Some(path), _) => CommandSource::Device(path.clone()),
            (None, Some(addr)) => CommandSource::Tcp(addr.clone()),
            (None, None) => CommandSource::Stdin,
        }
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_wiring() {
        let config = Config::try_parse_from(["breakfast-signal"]).unwrap();
        assert_eq!(config.pin_map(), PinMap::default());
        assert_eq!(config.command_source(), CommandSource::Stdin);
        assert_eq!(config.log_level(), "info");
        assert!(!config.simulate);
    }

    #[test]
    fn device_source() {
        let config =
            Config::try_parse_from(["breakfast-signal", "--device", "/dev/rfcomm0", "-v"]).unwrap();
        assert_eq!(
            config.command_source(),
            CommandSource::Device(PathBuf::from("/dev/rfcomm0"))
        );
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn tcp_source_and_custom_pins() {
        let config = Config::try_parse_from([
            "breakfast-signal",
            "--listen",
            "0.0.0.0:7000",
            "--pending-pin",
            "5",
            "--ready-pin",
            "6",
        ])
        .unwrap();
        assert_eq!(
            config.command_source(),
            CommandSource::Tcp("0.0.0.0:7000".to_string())
        );
        assert_eq!(
            config.pin_map(),
            PinMap {
                pending: 5,
                cooking: 24,
                ready: 6,
            }
        );
    }

    #[test]
    fn device_and_listen_conflict() {
        let result = Config::try_parse_from([
            "breakfast-signal",
            "--device",
            "/dev/rfcomm0",
            "--listen",
            "0.0.0.0:7000",
        ]);
        assert!(result.is_err());
    }
}

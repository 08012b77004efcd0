use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use mcpsim_core::{FaultConfig, Simulator};
use tokio::io::BufReader;

#[derive(Parser)]
#[command(
    name = "mcpsim",
    version,
    about = "Simulated MCP stdio endpoint with latency and fault injection"
)]
pub struct Cli {
    /// Minimum response delay in seconds.
    #[arg(long, default_value_t = 0.5, allow_hyphen_values = true)]
    pub delay_min: f64,
    /// Maximum response delay in seconds.
    #[arg(long, default_value_t = 3.0, allow_hyphen_values = true)]
    pub delay_max: f64,
    /// Probability of injecting an error response (0.0-1.0).
    #[arg(long, default_value_t = 0.1, allow_hyphen_values = true)]
    pub error_rate: f64,
    /// Fast preset: 0.1-0.5s delays, no errors. Overrides the delay and
    /// error-rate flags.
    #[arg(long, conflicts_with = "slow")]
    pub fast: bool,
    /// Slow preset: 2-8s delays, 20% errors. Overrides the delay and
    /// error-rate flags.
    #[arg(long)]
    pub slow: bool,
}

/// Builds the fault configuration from flags, applying presets last.
pub fn build_config(cli: &Cli) -> Result<FaultConfig, String> {
    if cli.fast {
        return Ok(FaultConfig::fast());
    }
    if cli.slow {
        return Ok(FaultConfig::slow());
    }
    let config = FaultConfig {
        delay_min: parse_delay("delay-min", cli.delay_min)?,
        delay_max: parse_delay("delay-max", cli.delay_max)?,
        error_rate: cli.error_rate,
    };
    config.validate()?;
    Ok(config)
}

fn parse_delay(flag: &str, seconds: f64) -> Result<Duration, String> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(format!(
            "invalid --{flag} ({seconds}): must be a non-negative number of seconds"
        ));
    }
    Ok(Duration::from_secs_f64(seconds))
}

pub async fn run(cli: Cli) -> ExitCode {
    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(message) => return error_exit(&message),
    };
    let mut simulator = Simulator::new(config);
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    let served = tokio::select! {
        result = simulator.serve(stdin, stdout) => result,
        _ = tokio::signal::ctrl_c() => {
            log::info!("interrupt received, shutting down");
            Ok(())
        }
    };
    match served {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{error}");
            ExitCode::from(1)
        }
    }
}

fn error_exit(message: &str) -> ExitCode {
    eprintln!("{message}");
    ExitCode::from(2)
}

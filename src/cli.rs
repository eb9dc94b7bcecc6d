use clap::Parser;

use crate::{constants::game::LOGICAL_FRAME_RATE, utils::version};

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    #[arg(
        short,
        long,
        value_name = "FLOAT",
        help = "Tick rate, i.e. number of game updates per second",
        default_value_t = LOGICAL_FRAME_RATE,
        value_parser = parse_rate
    )]
    pub tick_rate: f64,

    #[arg(
        short,
        long,
        value_name = "FLOAT",
        help = "Frame rate, i.e. number of frames per second",
        default_value_t = 60.0,
        value_parser = parse_rate
    )]
    pub frame_rate: f64,

    #[arg(short, long, value_name = "SEED", help = "Seed for the pipe layout, random when omitted")]
    pub seed: Option<u64>,
}

fn parse_rate(raw: &str) -> Result<f64, String> {
    let rate: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if !rate.is_finite() || rate <= 0.0 {
        return Err(format!("{raw} is not a positive rate"));
    }
    Ok(rate)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["flappy-rs"]);
        assert_eq!(cli.tick_rate, 60.0);
        assert_eq!(cli.frame_rate, 60.0);
        assert_eq!(cli.seed, None);
    }

    #[test]
    fn test_seed() {
        let cli = Cli::parse_from(["flappy-rs", "--seed", "7", "-t", "30"]);
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.tick_rate, 30.0);
    }

    #[test]
    fn test_rates_must_be_positive() {
        assert!(Cli::try_parse_from(["flappy-rs", "-t", "0"]).is_err());
        assert!(Cli::try_parse_from(["flappy-rs", "--tick-rate", "-5"]).is_err());
        assert!(Cli::try_parse_from(["flappy-rs", "-t", "NaN"]).is_err());
        assert!(Cli::try_parse_from(["flappy-rs", "-f", "inf"]).is_err());
        assert!(Cli::try_parse_from(["flappy-rs", "-f", "fast"]).is_err());
        assert_eq!(Cli::try_parse_from(["flappy-rs", "-t", "0.5"]).map(|cli| cli.tick_rate).ok(), Some(0.5));
    }
}

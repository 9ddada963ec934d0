//! Command line for the `barrage` binary.

use std::time::Duration;

/// Stage file used when none is given.
pub const DEFAULT_STAGE: &str = "crates/barrage/data/stage.toml";

/// Tick length used when none is given.
pub const DEFAULT_TICK: Duration = Duration::from_millis(16);

/// Parsed command line.
#[derive(Clone, Debug, PartialEq)]
pub struct RunArgs {
    /// Stage file path.
    pub stage: String,
    /// Time limit; `None` runs until every spawner ends.
    pub limit: Option<Duration>,
    /// Tick length, never zero.
    pub tick: Duration,
    /// `--help` was given.
    pub help: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            stage: DEFAULT_STAGE.to_string(),
            limit: None,
            tick: DEFAULT_TICK,
            help: false,
        }
    }
}

impl RunArgs {
    /// Parses arguments, program name excluded.
    ///
    /// # Errors
    ///
    /// A usage message for unknown options, missing values, and values that
    /// are not a positive, representable duration.
    pub fn parse<I>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Self::default();
        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--seconds" | "-s" => {
                    let value = iter.next().ok_or("--seconds needs a value")?;
                    parsed.limit = Some(parse_seconds(&value)?);
                }
                "--tick-ms" | "-t" => {
                    let value = iter.next().ok_or("--tick-ms needs a value")?;
                    let ms = value
                        .parse::<u64>()
                        .ok()
                        .filter(|&ms| ms > 0)
                        .ok_or_else(|| format!("invalid --tick-ms {value:?}"))?;
                    parsed.tick = Duration::from_millis(ms);
                }
                "--help" | "-h" => parsed.help = true,
                other if other.starts_with('-') => return Err(format!("unknown option {other}")),
                path => parsed.stage = path.to_string(),
            }
        }
        Ok(parsed)
    }
}

fn parse_seconds(value: &str) -> Result<Duration, String> {
    let seconds: f64 = value
        .parse()
        .map_err(|_| format!("invalid --seconds {value:?}"))?;
    match Duration::try_from_secs_f64(seconds) {
        Ok(limit) if !limit.is_zero() => Ok(limit),
        _ => Err(format!("invalid --seconds {value:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<RunArgs, String> {
        RunArgs::parse(args.iter().map(|a| (*a).to_string()))
    }

    #[test]
    fn test_defaults() {
        assert_eq!(parse(&[]).unwrap(), RunArgs::default());
    }

    #[test]
    fn test_all_options() {
        let args = parse(&["stage.toml", "-s", "2.5", "--tick-ms", "10"]).unwrap();
        assert_eq!(args.stage, "stage.toml");
        assert_eq!(args.limit, Some(Duration::from_millis(2500)));
        assert_eq!(args.tick, Duration::from_millis(10));
        assert!(!args.help);
        assert!(parse(&["-h"]).unwrap().help);
    }

    #[test]
    fn test_bad_seconds_are_usage_errors() {
        for bad in ["0", "-1", "nan", "inf", "1e300", "soon"] {
            assert!(parse(&["--seconds", bad]).is_err(), "{bad} accepted");
        }
        assert!(parse(&["--seconds"]).is_err());
    }

    #[test]
    fn test_bad_tick_and_unknown_option() {
        assert!(parse(&["--tick-ms", "0"]).is_err());
        assert!(parse(&["--tick-ms", "-5"]).is_err());
        assert!(parse(&["--fast"]).is_err());
    }
}

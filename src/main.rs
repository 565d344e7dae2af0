//! IRR CLI
//!
//! Prints the internal rate of return of the cashflows given on the
//! command line (or in a CSV file) to four decimal places.

use std::env;
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use irr_calc::cashflow::{load_cashflows, parse_cashflow};
use irr_calc::{calculate_irr, CashflowSeries, IrrResult, TimingOffset};
use serde::Serialize;

/// Environment override for the default timing offset
const TIMING_OFFSET_ENV: &str = "IRR_TIMING_OFFSET";

const AFTER_HELP: &str = "\
CF0 is the base investment in period 0, CF1..CFn the flows of periods 1..n.
Both inflows and outflows must be present for an IRR to exist; otherwise
0.0000 is printed.

-d selects when the flows of periods 1..n are discounted:
  0    start of period (advance)
  1    end of period (arrears)
  The default discounts at mid-period (0.5). Other values are ignored.
  The flag is only recognised as the first argument; options such as
  --json and --input must come before it.

The default offset can also be set with IRR_TIMING_OFFSET (0, 0.5 or 1).";

#[derive(Parser, Debug)]
#[command(
    name = "irr",
    about = "Calculate the internal rate of return (IRR) of periodic cashflows",
    override_usage = "irr -? | [--input FILE] [--json] [-d<0|1>] CF0 CF1 ... CFn",
    after_help = AFTER_HELP,
    disable_help_flag = true
)]
struct Cli {
    /// Print this help
    #[arg(short = '?', long = "help", action = ArgAction::Help)]
    help: Option<bool>,

    /// Read cashflows from a headerless CSV file, ahead of any listed cashflows
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,

    /// Optional -d<0|1> timing flag followed by cashflows CF0 CF1 ... CFn
    #[arg(
        value_name = "ARGS",
        allow_hyphen_values = true,
        trailing_var_arg = true
    )]
    args: Vec<String>,
}

#[derive(Serialize)]
struct IrrResponse<'a> {
    cashflows: &'a [f64],
    timing_offset: TimingOffset,
    tolerance: f64,
    #[serde(flatten)]
    result: IrrResult,
}

/// Split off the timing flag, which can only be the first argument
///
/// Any first argument containing `-d` is taken as the flag; every other
/// argument is a cashflow, whatever it looks like.
fn split_timing_flag(args: &[String]) -> (Option<&str>, &[String]) {
    match args.split_first() {
        Some((first, rest)) if first.contains("-d") => (Some(first.as_str()), rest),
        _ => (None, args),
    }
}

/// `-d0`/`-d1` flag first, then the environment, then mid-period
fn resolve_timing_offset(flag: Option<&str>, env_value: Option<String>) -> TimingOffset {
    if let Some(flag) = flag {
        match flag.strip_prefix("-d").and_then(TimingOffset::from_flag) {
            Some(offset) => return offset,
            None => log::debug!("Ignoring timing offset flag {}", flag),
        }
    }

    match env_value {
        Some(raw) => raw.parse().unwrap_or_else(|err| {
            log::warn!("{} in {}, using default", err, TIMING_OFFSET_ENV);
            TimingOffset::default()
        }),
        None => TimingOffset::default(),
    }
}

/// Resolve the timing offset and collect the cashflows of one invocation
fn prepare(
    cli: &Cli,
    env_value: Option<String>,
) -> irr_calc::error::Result<(TimingOffset, CashflowSeries)> {
    let (flag, cashflow_args) = split_timing_flag(&cli.args);
    let timing_offset = resolve_timing_offset(flag, env_value);

    let mut values = Vec::new();
    if let Some(path) = &cli.input {
        values.extend_from_slice(load_cashflows(path)?.values());
    }
    values.extend(cashflow_args.iter().map(|arg| parse_cashflow(arg)));

    Ok((timing_offset, CashflowSeries::new(values)))
}

fn format_rate(rate: f64) -> String {
    format!("{:.4}", rate)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let (timing_offset, series) = prepare(&cli, env::var(TIMING_OFFSET_ENV).ok())?;
    log::debug!(
        "Solving {} cashflows with timing offset {}",
        series.len(),
        timing_offset
    );

    let result = calculate_irr(&series, timing_offset);

    if cli.json {
        let response = IrrResponse {
            cashflows: series.values(),
            timing_offset,
            tolerance: series.tolerance(),
            result,
        };
        println!("{}", serde_json::to_string(&response)?);
    } else {
        println!("{}", format_rate(result.rate));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    fn run(argv: &[&str]) -> (TimingOffset, Vec<f64>, String) {
        let cli = Cli::try_parse_from(argv.iter().copied()).unwrap();
        let (offset, series) = prepare(&cli, None).unwrap();
        let rate = format_rate(calculate_irr(&series, offset).rate);
        (offset, series.values().to_vec(), rate)
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_cashflows() {
        let (offset, values, _) = run(&["irr", "-100", "50", "-2.5", "60"]);
        assert_eq!(offset, TimingOffset::MidPeriod);
        assert_eq!(values, vec![-100.0, 50.0, -2.5, 60.0]);
    }

    #[test]
    fn test_timing_flags() {
        let (offset, values, rate) = run(&["irr", "-d0", "-100", "50", "60"]);
        assert_eq!(offset, TimingOffset::Advance);
        assert_eq!(values, vec![-100.0, 50.0, 60.0]);
        assert_eq!(rate, "0.2000");

        let (offset, values, rate) = run(&["irr", "-d1", "-100", "110"]);
        assert_eq!(offset, TimingOffset::Arrears);
        assert_eq!(values, vec![-100.0, 110.0]);
        assert_eq!(rate, "0.1000");
    }

    #[test]
    fn test_unrecognized_timing_flags_are_consumed() {
        for flag in ["-d", "-dx", "-d=1", "-d0.5", "x-d1"] {
            let (offset, values, rate) = run(&["irr", flag, "-100", "110"]);
            assert_eq!(offset, TimingOffset::MidPeriod, "flag {}", flag);
            assert_eq!(values, vec![-100.0, 110.0], "flag {}", flag);
            assert_eq!(rate, "0.2100", "flag {}", flag);
        }
    }

    #[test]
    fn test_bare_delay_flag_takes_no_value() {
        let (offset, values, rate) = run(&["irr", "-d", "0", "-100", "110"]);
        assert_eq!(offset, TimingOffset::MidPeriod);
        assert_eq!(values, vec![0.0, -100.0, 110.0]);
        assert_eq!(rate, "0.1000");
    }

    #[test]
    fn test_timing_flag_only_in_first_position() {
        let (offset, values, rate) = run(&["irr", "-100", "-d1", "110"]);
        assert_eq!(offset, TimingOffset::MidPeriod);
        assert_eq!(values, vec![-100.0, 0.0, 110.0]);
        assert_eq!(rate, "0.0656");
    }

    #[test]
    fn test_hyphenated_cashflows_parse_permissively() {
        let (_, values, rate) = run(&["irr", "-.5", "1"]);
        assert_eq!(values, vec![-0.5, 1.0]);
        assert_eq!(rate, "3.0000");

        let (_, values, rate) = run(&["irr", "-100abc", "110"]);
        assert_eq!(values, vec![-100.0, 110.0]);
        assert_eq!(rate, "0.2100");

        let (_, values, rate) = run(&["irr", "-100", "-x", "110"]);
        assert_eq!(values, vec![-100.0, 0.0, 110.0]);
        assert_eq!(rate, "0.0656");

        // No outflow left once "-abc" reads as zero
        let (_, values, rate) = run(&["irr", "-abc", "110"]);
        assert_eq!(values, vec![0.0, 110.0]);
        assert_eq!(rate, "0.0000");

        let (_, values, _) = run(&["irr", "-100", "-inf", "110"]);
        assert_eq!(values[1], f64::NEG_INFINITY);
    }

    #[test]
    fn test_question_mark_shows_help() {
        let err = Cli::try_parse_from(["irr", "-?"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        // Later on it is just another cashflow
        let (_, values, rate) = run(&["irr", "-100", "-?"]);
        assert_eq!(values, vec![-100.0, 0.0]);
        assert_eq!(rate, "0.0000");
    }

    #[test]
    fn test_options_before_cashflows() {
        let cli = Cli::try_parse_from(["irr", "--json", "-d1", "-100", "110"]).unwrap();
        assert!(cli.json);
        let (offset, series) = prepare(&cli, None).unwrap();
        assert_eq!(offset, TimingOffset::Arrears);
        assert_eq!(series.values(), &[-100.0, 110.0]);
    }

    #[test]
    fn test_resolve_timing_offset() {
        assert_eq!(resolve_timing_offset(None, None), TimingOffset::MidPeriod);
        assert_eq!(resolve_timing_offset(Some("-d0"), None), TimingOffset::Advance);
        assert_eq!(resolve_timing_offset(Some("-d1"), Some("0".into())), TimingOffset::Arrears);
        assert_eq!(resolve_timing_offset(Some("-d0.5"), Some("1".into())), TimingOffset::Arrears);
        assert_eq!(resolve_timing_offset(None, Some("0".into())), TimingOffset::Advance);
        assert_eq!(resolve_timing_offset(None, Some("7".into())), TimingOffset::MidPeriod);
    }

    #[test]
    fn test_output_format() {
        assert_eq!(format_rate(0.1), "0.1000");
        assert_eq!(format_rate(0.0), "0.0000");
        assert_eq!(format_rate(-0.39186), "-0.3919");
    }

    #[test]
    fn test_json_response_fields() {
        let series = CashflowSeries::new(vec![-100.0, 110.0]);
        let result = calculate_irr(&series, TimingOffset::Arrears);
        let response = IrrResponse {
            cashflows: series.values(),
            timing_offset: TimingOffset::Arrears,
            tolerance: series.tolerance(),
            result,
        };

        let json: serde_json::Value = serde_json::to_value(&response).unwrap();
        assert_eq!(json["timing_offset"], "arrears");
        assert_eq!(json["status"], "converged");
        assert_eq!(json["cashflows"].as_array().unwrap().len(), 2);
        assert!(json["rate"].as_f64().unwrap() > 0.09);
    }
}

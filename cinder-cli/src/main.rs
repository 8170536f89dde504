use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDateTime};
use cinder_activity::{
    ActivitySample, analyze_window, burnout_series, compare_day, daily_summaries, forecast_risk,
    metric_trends, parse_activity_csv, recent_window, trend_alerts,
};
use cinder_activity::risk::MIN_RISK_DAYS;
use cinder_core::anomaly::DEFAULT_Z_THRESHOLD;
use cinder_core::{
    BurnoutStatus, EmployeeReport, IndexWeights, RiskWeights, Roster, RosterFilter, ScoreSeries,
    detect_anomalies, detect_trend, forecast, parse_timezone,
};
use cinder_ingest::load_roster;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod config;
mod state;
mod views;

use config::Config;
use views::RosterRow;

#[derive(Parser, Debug)]
#[command(
    name = "cinder",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CINDER_BUILD_SHA"), ")"),
    about = "Burnout forecasting for team dashboards"
)]
struct Cli {
    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Forecast days until a score series crosses the threshold
    Forecast {
        /// Comma-separated scores, oldest first
        #[arg(long, value_delimiter = ',', num_args = 1.., required = true)]
        scores: Vec<f64>,

        #[arg(long)]
        threshold: Option<f64>,

        /// Trailing samples used for the rate
        #[arg(long)]
        window: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    /// List employees with live forecasts and status
    Roster {
        /// Roster JSON (defaults to ./data/employees.json)
        #[arg(long)]
        file: Option<PathBuf>,

        #[arg(long)]
        department: Option<String>,

        /// critical | warning | healthy
        #[arg(long)]
        status: Option<BurnoutStatus>,

        /// Case-insensitive match on name
        #[arg(long)]
        search: Option<String>,

        /// Rewrite cached daysToBurnout values in the file
        #[arg(long)]
        refresh: bool,

        #[arg(long)]
        json: bool,
    },

    /// Detail view for one employee
    Show {
        id: String,

        #[arg(long)]
        file: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Write a markdown report for one employee
    Export {
        id: String,

        #[arg(long)]
        file: Option<PathBuf>,

        /// Output directory (defaults to report.export_dir, then .)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Analyze the trailing window of an activity log
    Activity {
        /// Activity CSV (defaults to ./data/activity_log.csv)
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Window length in hours (defaults to activity.window_hours)
        #[arg(long)]
        hours: Option<i64>,

        /// Window end, "YYYY-MM-DD HH:MM" (defaults to now)
        #[arg(long)]
        at: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Daily burnout series, weekly trends, shifts, anomalies and forecasts
    ActivityDaily {
        #[arg(long)]
        csv: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Manage ~/.cinder/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        // init must work even when the existing file is invalid
        Command::Config { command } => run_config(command),
        command => run(command, &config::load_config()?),
    }
}

fn run_config(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Init => config::init_config()?,
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            println!("# {}", config::config_path()?.display());
            print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Command, cfg: &Config) -> Result<()> {
    match command {
        Command::Forecast {
            scores,
            threshold,
            window,
            json,
        } => {
            let mut fc = cfg.forecast;
            if let Some(t) = threshold {
                fc = fc.with_threshold(t);
            }
            if let Some(w) = window {
                fc = fc.with_window_size(w);
            }
            fc.validate()?;

            let series = ScoreSeries::new(scores);
            let result = forecast(&series, &fc);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                let status = BurnoutStatus::from_forecast(result, &cfg.status);
                println!(
                    "{} samples, threshold {:.1}, window {}",
                    series.len(),
                    fc.threshold,
                    fc.window_size
                );
                println!("Burnout in: {} ({status})", result.label());
            }
        }

        Command::Roster {
            file,
            department,
            status,
            search,
            refresh,
            json,
        } => {
            let path = file.unwrap_or_else(state::default_roster_path);
            let mut roster = open_roster(&path, cfg)?;

            if refresh {
                let changed = roster.refresh_forecasts();
                save_roster(&roster, &path)?;
                tracing::info!(changed, path = %path.display(), "refreshed cached forecasts");
            }

            let mut filter = RosterFilter::default();
            if let Some(d) = department {
                filter = filter.with_department(d);
            }
            if let Some(s) = status {
                filter = filter.with_status(s);
            }
            if let Some(q) = search {
                filter = filter.with_search(q);
            }

            let rows: Vec<RosterRow> = roster
                .filter(&filter)
                .into_iter()
                .map(|r| RosterRow::new(&roster, r))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print!("{}", views::roster_table(&rows));
                println!(
                    "\n{} of {} employees | departments: {}",
                    rows.len(),
                    roster.len(),
                    roster.departments().join(", ")
                );
            }
        }

        Command::Show { id, file, json } => {
            let path = file.unwrap_or_else(state::default_roster_path);
            let roster = open_roster(&path, cfg)?;
            let report = build_report(&roster, &id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let tz = parse_timezone(&cfg.report.timezone)?;
                print!("{}", report.render_markdown(tz));
            }
        }

        Command::Export { id, file, out } => {
            let path = file.unwrap_or_else(state::default_roster_path);
            let roster = open_roster(&path, cfg)?;
            let report = build_report(&roster, &id)?;
            let tz = parse_timezone(&cfg.report.timezone)?;

            let dir = out
                .or_else(|| cfg.report.export_dir.clone())
                .unwrap_or_else(|| PathBuf::from("."));
            fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
            let dest = dir.join(report.file_name());
            fs::write(&dest, report.render_markdown(tz))
                .with_context(|| format!("write {}", dest.display()))?;
            println!("Wrote {}", dest.display());
        }

        Command::Activity {
            csv,
            hours,
            at,
            json,
        } => {
            let path = csv.unwrap_or_else(state::default_activity_log_path);
            let samples = open_activity_log(&path)?;
            let hours = hours.unwrap_or(cfg.activity.window_hours);
            if hours <= 0 {
                bail!("--hours must be positive");
            }
            let now = match at {
                Some(s) => NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M")
                    .with_context(|| format!("--at {s:?} is not YYYY-MM-DD HH:MM"))?,
                None => Local::now().naive_local(),
            };

            let recent = recent_window(&samples, now, hours);
            let Some(report) =
                analyze_window(recent, &IndexWeights::default(), &cfg.activity.alerts)
            else {
                println!("No activity in the last {hours}h before {now}.");
                return Ok(());
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Window: {hours}h ending {now}");
                print!("{}", views::window_summary(&report));
            }
        }

        Command::ActivityDaily { csv, json } => {
            let path = csv.unwrap_or_else(state::default_activity_log_path);
            let samples = open_activity_log(&path)?;
            let risk_weights = RiskWeights::default();
            let days = daily_summaries(&samples, &IndexWeights::default(), &risk_weights);
            let Some(last_day) = days.last().map(|d| d.date) else {
                println!("No dated activity in {}.", path.display());
                return Ok(());
            };

            let series = burnout_series(&days);
            let result = forecast(&series, &cfg.forecast);
            let trend = detect_trend(series.as_slice());
            let trends = metric_trends(&days);
            let alerts = trend_alerts(&trends);
            let shifts = compare_day(&samples, last_day, &cfg.activity.shifts);
            let risk = forecast_risk(&days, &risk_weights);
            let indices: Vec<f64> = days.iter().map(|d| d.index.value).collect();
            let scan = detect_anomalies(&indices, DEFAULT_Z_THRESHOLD);

            if json {
                let doc = serde_json::json!({
                    "days": days,
                    "burnout_series": series,
                    "trend": trend,
                    "metric_trends": trends,
                    "trend_alerts": alerts,
                    "shifts": shifts,
                    "risk": risk,
                    "anomalies": scan.as_ref().ok(),
                    "forecast": result,
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
                return Ok(());
            }

            print!("{}", views::daily_table(&days));
            print!("{}", views::trend_summary(&trends, &alerts));
            if let Some(report) = &shifts {
                print!("{}", views::shift_summary(report));
            }
            match &scan {
                Ok(scan) if scan.anomalies.is_empty() => println!("\nAnomalies: none"),
                Ok(scan) => {
                    println!("\nAnomalies (mean {:.1}, sd {:.2}):", scan.mean, scan.std_dev);
                    for a in &scan.anomalies {
                        let date = days[a.index].date;
                        println!("  {date} index={:.1} z={:.2}", a.value, a.z_score);
                    }
                }
                Err(e) => println!("\nAnomalies: skipped ({e})"),
            }

            println!("\nBurnout series trend: {trend}");
            let status = BurnoutStatus::from_forecast(result, &cfg.status);
            println!(
                "Burnout in: {} ({status}, threshold {:.1})",
                result.label(),
                cfg.forecast.threshold
            );
            match risk {
                Some(r) => println!(
                    "Risk outlook: ~{} days ({}, risk {:.2}). {}",
                    r.days_until_burnout,
                    r.tier,
                    r.risk,
                    r.tier.message()
                ),
                None => println!(
                    "Risk outlook: not enough data ({} of {MIN_RISK_DAYS} days)",
                    days.len()
                ),
            }
        }

        Command::Config { command } => run_config(command)?,
    }

    Ok(())
}

fn open_roster(path: &Path, cfg: &Config) -> Result<Roster> {
    if !path.exists() {
        bail!("Roster not found: {} (pass --file <path>)", path.display());
    }
    let roster = load_roster(path).with_context(|| format!("loading {}", path.display()))?;
    Ok(roster
        .with_forecast_config(cfg.forecast)
        .with_thresholds(cfg.status))
}

fn save_roster(roster: &Roster, path: &Path) -> Result<()> {
    let records: Vec<_> = roster.iter().collect();
    let s = serde_json::to_string_pretty(&records).context("serialize roster")?;
    fs::write(path, s + "\n").with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn build_report(roster: &Roster, id: &str) -> Result<EmployeeReport> {
    let record = roster
        .find(id)
        .with_context(|| "run `cinder roster` to list employee IDs")?;
    Ok(EmployeeReport::build(
        record,
        roster.forecast_config(),
        roster.thresholds(),
    ))
}

fn open_activity_log(path: &Path) -> Result<Vec<ActivitySample>> {
    if !path.exists() {
        bail!("Activity log not found: {} (pass --csv <path>)", path.display());
    }
    parse_activity_csv(path).with_context(|| format!("parsing {}", path.display()))
}

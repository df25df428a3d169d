// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result};
use autoshop_app::{AppState, DashboardTab};
use autoshop_data::{RecordOrigin, RecordSource};
use autoshop_testkit::ShopFaker;
use config::Config;
use runtime::ShopRuntime;
use std::env;
use std::path::{Path, PathBuf};
use tracing::info;

const DEMO_SEED: u64 = 42;
const DEMO_RECORD_COUNT: usize = 24;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `autoshop --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let source = load_source(&config, options.demo)?;

    if options.dump_records {
        println!(
            "{}",
            serde_json::to_string_pretty(source.all_records()).context("encode records")?
        );
        return Ok(());
    }

    if options.check_only {
        println!("{}", check_summary(&options.config_path, &config, &source));
        return Ok(());
    }

    logging::init(&config.log_file()?, config.log_level())?;
    info!(
        config = %options.config_path.display(),
        origin = %source.origin(),
        records = source.all_records().len(),
        "starting dashboard"
    );

    let mut state = AppState::new(config.role());
    let mut runtime = ShopRuntime::new(source);
    autoshop_tui::run_app(&mut state, &mut runtime, config.view_options())?;

    let submissions = runtime.submissions();
    info!(count = submissions.len(), "dashboard closed");
    if !submissions.is_empty() {
        println!("{}", submissions.to_json()?);
    }
    Ok(())
}

fn load_source(config: &Config, demo: bool) -> Result<RecordSource> {
    if demo {
        let records = ShopFaker::new(DEMO_SEED).service_records(DEMO_RECORD_COUNT);
        return Ok(RecordSource::from_records(RecordOrigin::Demo, records));
    }
    match config.records_path() {
        Some(path) => RecordSource::from_file(&path).with_context(|| {
            format!(
                "load records file {} -- fix or remove [data].records_path",
                path.display()
            )
        }),
        None => Ok(RecordSource::samples()),
    }
}

fn check_summary(config_path: &Path, config: &Config, source: &RecordSource) -> String {
    let counts = source.counts();
    [
        format!("config: {}", config_path.display()),
        format!("records: {} ({})", source.all_records().len(), source.origin()),
        format!(
            "upcoming: {} | recent: {}",
            source.records_for(DashboardTab::Upcoming).len(),
            source.records_for(DashboardTab::Recent).len()
        ),
        format!(
            "customers: {} | vehicles: {}",
            counts.customers, counts.vehicles
        ),
        format!("role: {}", config.role().as_str()),
        format!("log level: {}", config.log_level()),
    ]
    .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    demo: bool,
    check_only: bool,
    dump_records: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_example: false,
        demo: false,
        check_only: false,
        dump_records: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--dump-records" => {
                options.dump_records = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("autoshop: service shop dashboard");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --demo                   Launch with generated demo records");
    println!("  --check                  Validate config + records and print a summary");
    println!("  --dump-records           Print the loaded records as JSON");
    println!("  --help                   Show this help");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, Config, check_summary, load_source, parse_cli_args};
    use anyhow::Result;
    use autoshop_data::RecordOrigin;
    use autoshop_testkit::{ShopFaker, temp_records_file};
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/autoshop-config.toml")
    }

    fn config_with(records_path: &str) -> Result<(tempfile::TempDir, Config)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            format!("version = 1\n[data]\nrecords_path = {records_path:?}\n"),
        )?;
        let config = Config::load(&path)?;
        Ok((temp, config))
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                print_config_path: false,
                print_example: false,
                demo: false,
                check_only: false,
                dump_records: false,
                show_help: false,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_path_override() -> Result<()> {
        let options = parse_cli_args(
            vec!["--config", "/custom/config.toml"],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_config_value() {
        let error = parse_cli_args(vec!["--config"], default_options_path())
            .expect_err("missing config value should fail");
        assert!(error.to_string().contains("--config requires a file path"));
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn parse_cli_args_sets_print_check_and_dump_flags() -> Result<()> {
        let options = parse_cli_args(
            vec![
                "--print-config-path",
                "--print-example-config",
                "--check",
                "--dump-records",
            ],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(options.print_example);
        assert!(options.check_only);
        assert!(options.dump_records);
        assert!(!options.demo);
        assert!(!options.show_help);
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_help_flag_for_long_and_short_variants() -> Result<()> {
        let long = parse_cli_args(vec!["--help"], default_options_path())?;
        assert!(long.show_help);

        let short = parse_cli_args(vec!["-h"], default_options_path())?;
        assert!(short.show_help);
        Ok(())
    }

    #[test]
    fn load_source_defaults_to_samples() -> Result<()> {
        let source = load_source(&Config::default(), false)?;
        assert_eq!(source.origin(), &RecordOrigin::Samples);
        assert_eq!(source.all_records().len(), 5);
        Ok(())
    }

    #[test]
    fn load_source_demo_ignores_records_path() -> Result<()> {
        let (_temp, config) = config_with("/does/not/exist.json")?;
        let source = load_source(&config, true)?;
        assert_eq!(source.origin(), &RecordOrigin::Demo);
        assert_eq!(source.all_records().len(), 24);
        Ok(())
    }

    #[test]
    fn load_source_reads_configured_file() -> Result<()> {
        let records = ShopFaker::new(3).service_records(4);
        let (_dir, records_path) = temp_records_file(&records)?;
        let (_temp, config) = config_with(&records_path.to_string_lossy())?;

        let source = load_source(&config, false)?;
        assert_eq!(source.all_records(), records.as_slice());
        Ok(())
    }

    #[test]
    fn load_source_reports_missing_file_with_config_hint() -> Result<()> {
        let (_temp, config) = config_with("/does/not/exist.json")?;
        let error = load_source(&config, false).expect_err("missing records file should fail");
        assert!(format!("{error:#}").contains("[data].records_path"));
        Ok(())
    }

    #[test]
    fn check_summary_lists_source_and_counts() -> Result<()> {
        let config = Config::default();
        let source = load_source(&config, false)?;
        let summary = check_summary(&default_options_path(), &config, &source);
        assert!(summary.contains("config: /tmp/autoshop-config.toml"));
        assert!(summary.contains("records: 5 (bundled samples)"));
        assert!(summary.contains("upcoming: 4 | recent: 3"));
        assert!(summary.contains("role: admin"));
        Ok(())
    }
}

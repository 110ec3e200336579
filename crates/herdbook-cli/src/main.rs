// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod dataset;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow, bail};
use config::Config;
use herdbook_app::{ViewKind, animal_columns, dose_columns, feeding_columns, package_columns};
use herdbook_grid::SelectionMode;
use std::env;
use std::path::{Path, PathBuf};

const DEFAULT_SEED: u64 = 42;

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
            "load config {}; run `herdbook --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;
    logging::init(&config)?;

    if options.demo && options.data.is_some() {
        bail!("--demo and --data cannot be combined; pick one dataset");
    }

    if let Some(path) = &options.data {
        return open_data_file(path, &config, &options);
    }

    if options.demo {
        return open_demo_view(&config, &options);
    }

    if options.check_only {
        return Ok(());
    }
    bail!("nothing to show; pass --demo for the seeded herd or --data <file.json> for your own records")
}

fn open_data_file(path: &Path, config: &Config, options: &CliOptions) -> Result<()> {
    let records = dataset::load_records(path)?;
    let columns = dataset::columns_for(config.column_specs(), &records)
        .with_context(|| format!("configure columns from {}", options.config_path.display()))?;
    let selection = options
        .pick
        .map(|pick| pick.mode(SelectionMode::Multiple));
    let title = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    runtime::open(
        &title,
        columns,
        records,
        config.grid_options(selection),
        options.check_only,
    )
}

fn open_demo_view(config: &Config, options: &CliOptions) -> Result<()> {
    let herd = herdbook_testkit::demo_herd(options.seed);
    let view = options.view;
    let selection = options.pick.map(|pick| pick.mode(view.picker_mode()));
    let grid_options = config.grid_options(selection);
    let title = view.label();
    let check_only = options.check_only;

    match view {
        ViewKind::Animals => {
            runtime::open(title, animal_columns()?, herd.animals, grid_options, check_only)
        }
        ViewKind::Packages => {
            runtime::open(title, package_columns()?, herd.packages, grid_options, check_only)
        }
        ViewKind::Doses => {
            runtime::open(title, dose_columns()?, herd.doses, grid_options, check_only)
        }
        ViewKind::Feedings => {
            runtime::open(title, feeding_columns()?, herd.feedings, grid_options, check_only)
        }
    }
}

/// `--pick` value. `view` defers to the view's own picker mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pick {
    Mode(SelectionMode),
    ViewDefault,
}

impl Pick {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "view" => Some(Self::ViewDefault),
            other => SelectionMode::parse(other).map(Self::Mode),
        }
    }

    fn mode(self, view_default: SelectionMode) -> SelectionMode {
        match self {
            Self::Mode(mode) => mode,
            Self::ViewDefault => view_default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
    demo: bool,
    seed: u64,
    view: ViewKind,
    data: Option<PathBuf>,
    pick: Option<Pick>,
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
        check_only: false,
        show_help: false,
        demo: false,
        seed: DEFAULT_SEED,
        view: ViewKind::Animals,
        data: None,
        pick: None,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--seed" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--seed requires a number"))?;
                let value = value.as_ref();
                options.seed = value.parse().with_context(|| {
                    format!("--seed expects a non-negative integer, got {value:?}")
                })?;
                options.demo = true;
            }
            "--view" => {
                let value = iter.next().ok_or_else(|| {
                    anyhow!("--view requires a view name ({})", view_names())
                })?;
                let value = value.as_ref();
                options.view = ViewKind::parse(value).ok_or_else(|| {
                    anyhow!("unknown view {value:?}; use one of: {}", view_names())
                })?;
                options.demo = true;
            }
            "--data" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--data requires a JSON file path"))?;
                options.data = Some(PathBuf::from(value.as_ref()));
            }
            "--pick" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--pick requires a mode (single, multiple, or view)"))?;
                let value = value.as_ref();
                options.pick = Some(Pick::parse(value).ok_or_else(|| {
                    anyhow!("--pick expects single, multiple, or view; got {value:?}")
                })?);
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn view_names() -> String {
    ViewKind::ALL
        .iter()
        .map(|view| view.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_help() {
    println!("herdbook");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --check                  Validate config, logging, and dataset, then exit");
    println!("  --demo                   Browse a seeded demo herd");
    println!("  --seed <n>               Seed for the demo herd (implies --demo)");
    println!("  --view <name>            Demo view: {} (implies --demo)", view_names());
    println!("  --data <file.json>       Browse a JSON array of records with an `id` field");
    println!("  --pick <mode>            Open as a picker: single, multiple, or view");
    println!("                           Selected rows print as JSON on exit");
    println!("  --help                   Show this help");
}

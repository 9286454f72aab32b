use std::io::{self, IsTerminal};

use anyhow::{Context, Result};

use scrub_cli::batch::{BatchOptions, run_batch};
use scrub_cli::config::{ConfigFile, Overrides, load_config};
use scrub_cli::prompt::ask_yes_no;
use scrub_cli::types::BatchResult;

use crate::cli::{CleanArgs, DaysBetweenArg, RolesArgs};
use crate::summary::print_roles;

pub fn run_clean(args: &CleanArgs) -> Result<BatchResult> {
    let config = load_optional_config(args.config.as_deref())?;
    let rules = config.rule_table()?;
    let overrides = Overrides {
        reference_year: args.reference_year,
        min_age: args.min_age,
        max_age: args.max_age,
    };
    let cleaning = config
        .cleaning_options(overrides)?
        .with_days_between(days_between_enabled(args.days_between)?);

    let options = BatchOptions {
        inputs: args.inputs.clone(),
        output_dir: args.output_dir.clone(),
        rules,
        cleaning,
        sqlite: args.sqlite.clone(),
        dry_run: args.dry_run,
    };
    run_batch(&options)
}

pub fn run_roles(args: &RolesArgs) -> Result<()> {
    let config = load_optional_config(args.config.as_deref())?;
    let rules = config.rule_table()?;
    print_roles(&rules);
    Ok(())
}

fn load_optional_config(path: Option<&std::path::Path>) -> Result<ConfigFile> {
    match path {
        Some(path) => load_config(path),
        None => Ok(ConfigFile::default()),
    }
}

/// Resolve the batch-wide toggle, prompting once when asked to.
fn days_between_enabled(choice: DaysBetweenArg) -> Result<bool> {
    match choice {
        DaysBetweenArg::Yes => Ok(true),
        DaysBetweenArg::No => Ok(false),
        DaysBetweenArg::Ask if io::stdin().is_terminal() => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut output = io::stderr();
            ask_yes_no(
                &mut input,
                &mut output,
                "Compute days between checkout and return dates?",
            )
            .context("read days_between answer")
        }
        DaysBetweenArg::Ask => Ok(false),
    }
}

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, error::ErrorKind};

use crate::config::{CounselingPrepareConfig, DialoguePrepareConfig};
use crate::constants::prepare;
use crate::prepare::{PrepareReport, prepare_counseling, prepare_dialogue};

#[derive(Debug, Parser)]
#[command(
    name = "prepare_dailydialog",
    disable_help_subcommand = true,
    about = "Prepare DailyDialog examples for conversational calibration",
    long_about = "Pair adjacent DailyDialog turns into user/assistant examples with intent and emotion labels, then save them as a JSON array.",
    after_help = "File paths are tried in order (DailyDialog.csv, dailydialog.csv, data.csv, auto-detect) unless --file-path is given."
)]
struct PrepareDailyDialogCli {
    #[arg(
        long = "dataset-root",
        value_name = "DIR",
        default_value = prepare::DAILYDIALOG_DATASET_ROOT,
        help = "Directory holding the downloaded DailyDialog files"
    )]
    dataset_root: PathBuf,
    #[arg(
        long = "file-path",
        value_name = "PATH",
        default_value = "",
        help = "Optional dataset file path within the dataset root (leave empty for auto-detect)"
    )]
    file_path: String,
    #[arg(
        long = "max-examples",
        default_value_t = prepare::DAILYDIALOG_MAX_EXAMPLES,
        allow_hyphen_values = true,
        help = "Maximum number of user-assistant examples to export (0 or negative exports all)"
    )]
    max_examples: i64,
    #[arg(
        long,
        value_name = "PATH",
        default_value = prepare::DAILYDIALOG_OUTPUT,
        help = "Output JSON path"
    )]
    output: PathBuf,
}

#[derive(Debug, Parser)]
#[command(
    name = "prepare_counseling",
    disable_help_subcommand = true,
    about = "Prepare mental health counseling examples for calibration",
    long_about = "Convert single-turn counseling Q/A rows into user/assistant examples, then save them as a JSON array.",
    after_help = "Without --dataset-root the dataset is fetched from the Hugging Face Hub (requires the `huggingface` feature; HF_TOKEN is honored)."
)]
struct PrepareCounselingCli {
    #[arg(
        long = "dataset-id",
        value_name = "ID",
        default_value = prepare::COUNSELING_DATASET_ID,
        help = "Hugging Face dataset id"
    )]
    dataset_id: String,
    #[arg(
        long = "dataset-root",
        value_name = "DIR",
        help = "Optional directory with already-downloaded dataset files"
    )]
    dataset_root: Option<PathBuf>,
    #[arg(
        long,
        default_value = prepare::COUNSELING_SPLIT,
        help = "Dataset split to use"
    )]
    split: String,
    #[arg(
        long = "max-examples",
        default_value_t = prepare::COUNSELING_MAX_EXAMPLES,
        allow_hyphen_values = true,
        help = "Maximum number of user-assistant examples to export (0 or negative exports all)"
    )]
    max_examples: i64,
    #[arg(
        long,
        value_name = "PATH",
        default_value = prepare::COUNSELING_OUTPUT,
        help = "Output JSON path"
    )]
    output: PathBuf,
}

/// Run the DailyDialog preparation CLI with `args_iter` (program name excluded).
pub fn run_prepare_dailydialog<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let Some(cli) = parse_cli::<PrepareDailyDialogCli, _>(
        std::iter::once("prepare_dailydialog".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    init_tracing();

    let config = DialoguePrepareConfig {
        dataset_root: cli.dataset_root,
        max_examples: cli.max_examples,
        output: cli.output,
        ..DialoguePrepareConfig::default()
    }
    .with_file_path(cli.file_path);

    let report = prepare_dialogue(&config)?;
    print_report(&report);
    Ok(())
}

/// Run the counseling preparation CLI with `args_iter` (program name excluded).
pub fn run_prepare_counseling<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let Some(cli) = parse_cli::<PrepareCounselingCli, _>(
        std::iter::once("prepare_counseling".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    init_tracing();

    let config = CounselingPrepareConfig {
        dataset_id: cli.dataset_id,
        split: cli.split,
        dataset_root: cli.dataset_root,
        max_examples: cli.max_examples,
        output: cli.output,
    };

    let report = prepare_counseling(&config)?;
    print_report(&report);
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn print_report(report: &PrepareReport) {
    println!(
        "Saved {} examples to {}",
        report.stats.examples,
        report.output.display()
    );
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}

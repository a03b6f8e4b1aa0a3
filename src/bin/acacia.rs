// src/bin/acacia.rs

//! Driver program _acacia_.
//!
//! Processes user-passed command-line arguments, loads the configuration
//! file, then runs the requested actions over the selected log groups and
//! prints the results.
//!
//! Actions run in the order: list last files, print interval, longest
//! records, remove dates.

#![allow(non_camel_case_types)]

use std::process::ExitCode;

use ::anyhow::{bail, Context};
use ::clap::{ArgGroup, Parser, ValueEnum};
use ::const_format::concatcp;
use ::termcolor::ColorChoice;

use ::acacialib::common::{FPath, FileAccessErrors};
use ::acacialib::config::{
    Config,
    ConfigFile,
    ConfigOverrides,
    CONFIG_PATH_DEFAULT,
};
use ::acacialib::data::datetime::{
    datetime_max,
    datetime_min,
    datetime_parse_user_str,
    tz_offset_parse,
    DateTimeL,
    DateTimeLOpt,
    FixedOffset,
};
use ::acacialib::debug::printers::{e_err, e_wrn};
use ::acacialib::printer::printers::PrinterResults;
use ::acacialib::readers::groupprocessor::{
    check_interval,
    extract_interval_text,
    list_last_files,
    locate_interval,
    rank_longest_records,
    strip_dates,
};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// --------------------
// command-line parsing

/// CLI enum that maps to [`termcolor::ColorChoice`].
///
/// [`termcolor::ColorChoice`]: https://docs.rs/termcolor/1.4.1/termcolor/enum.ColorChoice.html
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum CLI_Color_Choice {
    always,
    auto,
    never,
}

const CLI_HELP_AFTER: &str = concatcp!(
    "\
DateTimes for --from and --to may be RFC 3339, e.g. \"2015-02-20T09:09:25.000Z\",
or strftime patterns:
    \"%Y-%m-%dT%H:%M:%S\"
    \"%Y-%m-%d %H:%M:%S\"
    \"%Y%m%dT%H%M%S\"
each with optional fractional seconds and timezone offset, or a date
    \"%Y-%m-%d\"
DateTimes without a timezone offset are given TZ_OFFSET.

The configuration file is TOML, default \"",
    CONFIG_PATH_DEFAULT,
    "\":
    top = 10
    [groups.svc]
    directory = \"/var/log/svc\"
    filename_pattern = 'svc\\.log(\\.\\d+)?'
    timestamp_pattern = '(?m)^\\d{4}-\\d\\d-\\d\\d \\d\\d:\\d\\d:\\d\\d'
    timestamp_format = \"%Y-%m-%d %H:%M:%S\"
"
);

// Note:
// * the `about` is taken from `Cargo.toml:[package]:description`.
#[derive(Parser, Debug)]
#[clap(
    about = env!("CARGO_PKG_DESCRIPTION"),
    author = env!("CARGO_PKG_AUTHORS"),
    name = "acacia",
    version = concatcp!(
        "\n",
        "Version: ",
        env!("CARGO_PKG_VERSION_MAJOR"), ".",
        env!("CARGO_PKG_VERSION_MINOR"), ".",
        env!("CARGO_PKG_VERSION_PATCH"), "\n",
        "MSRV: ", env!("CARGO_PKG_RUST_VERSION"), "\n",
        "License: ", env!("CARGO_PKG_LICENSE"), "\n",
    ),
    after_help = CLI_HELP_AFTER,
    verbatim_doc_comment,
    group(
        ArgGroup::new("actions")
            .required(true)
            .multiple(true)
            .args(["list_last_files", "print_interval", "longest_records", "remove_dates"])
    ),
)]
struct CLI_Args {
    /// Path of the configuration file.
    #[clap(
        short = 'C',
        long = "config",
        verbatim_doc_comment,
        default_value = CONFIG_PATH_DEFAULT,
    )]
    config: FPath,

    /// Print the most recently modified file of each log group.
    #[clap(short = 'l', long = "list-last-files", verbatim_doc_comment)]
    list_last_files: bool,

    /// Print the text of each log group within the interval FROM to TO.
    #[clap(short = 'i', long = "print-interval", verbatim_doc_comment)]
    print_interval: bool,

    /// Print the TOP log records with the longest duration, the time until
    /// the next log record of the same file.
    #[clap(short = 'o', long = "longest-records", verbatim_doc_comment)]
    longest_records: bool,

    /// Print each log file with the timestamps removed.
    #[clap(short = 'r', long = "remove-dates", verbatim_doc_comment)]
    remove_dates: bool,

    /// Interval start. Log records at or after this datetime are printed.
    /// If not passed then the interval starts at the earliest record.
    #[clap(long, verbatim_doc_comment)]
    from: Option<String>,

    /// Interval end. Log records before this datetime are printed.
    /// If not passed then the interval ends at the latest record.
    #[clap(long, verbatim_doc_comment)]
    to: Option<String>,

    /// Only these log groups, separated by ";". Overrides the configuration
    /// file "include" and "exclude".
    #[clap(long, verbatim_doc_comment, value_delimiter = ';')]
    include: Option<Vec<String>>,

    /// Skip these log groups, separated by ";".
    #[clap(long, verbatim_doc_comment, value_delimiter = ';')]
    exclude: Option<Vec<String>>,

    /// Number of longest records to print. Overrides the configuration file
    /// "top". Default 10.
    #[clap(short = 'n', long, verbatim_doc_comment)]
    top: Option<usize>,

    /// Default timezone offset for timestamps without a timezone.
    /// Example values, "+12", "-0800", "+02:00", or "Z".
    /// To pass a value with leading "-" use "=" notation, e.g. "-t=-0800".
    /// If not passed then the configuration file "tz_offset" is used,
    /// otherwise the local system timezone offset.
    #[clap(
        short = 't',
        long,
        verbatim_doc_comment,
        value_parser = cli_process_tz_offset,
    )]
    tz_offset: Option<FixedOffset>,

    /// Choose to print using colors.
    #[clap(
        required = false,
        short = 'c',
        long = "color",
        verbatim_doc_comment,
        value_enum,
        default_value_t = CLI_Color_Choice::auto,
    )]
    color_choice: CLI_Color_Choice,
}

/// `clap` argument processor for `--tz-offset`.
fn cli_process_tz_offset(tzo: &str) -> std::result::Result<FixedOffset, String> {
    match tz_offset_parse(tzo) {
        Some(tz_offset) => Ok(tz_offset),
        None => Err(format!("Unable to parse a timezone offset for --tz-offset {:?}", tzo)),
    }
}

/// Transform a user-passed `--from` or `--to` datetime.
fn cli_process_datetime(
    option: &str,
    value: &Option<String>,
    tz_offset: &FixedOffset,
) -> anyhow::Result<DateTimeLOpt> {
    let value: &String = match value {
        Some(val) => val,
        None => return Ok(None),
    };
    match datetime_parse_user_str(value, tz_offset) {
        Some(dt) => Ok(Some(dt)),
        None => bail!("Unable to parse a datetime for {} {:?}", option, value),
    }
}

/// Print the per-file failures of an operation.
fn report_file_errors(errors: &FileAccessErrors) {
    for error in errors.iter() {
        e_wrn!("skipped {}", error);
    }
}

// --------------------
// run

fn run(args: CLI_Args) -> anyhow::Result<()> {
    defn!("{:?}", args);
    let color_choice: ColorChoice = match args.color_choice {
        CLI_Color_Choice::always => ColorChoice::Always,
        CLI_Color_Choice::auto => ColorChoice::Auto,
        CLI_Color_Choice::never => ColorChoice::Never,
    };
    let config_file: ConfigFile = ConfigFile::from_path(&args.config)?;
    let overrides = ConfigOverrides {
        include: args.include.clone(),
        exclude: args.exclude.clone(),
        top: args.top,
        tz_offset: args.tz_offset,
    };
    let config: Config = Config::new(&config_file, &overrides)?;
    let from: DateTimeLOpt = cli_process_datetime("--from", &args.from, &config.tz_offset)?;
    let to: DateTimeLOpt = cli_process_datetime("--to", &args.to, &config.tz_offset)?;
    if let (Some(from), Some(to)) = (from.as_ref(), to.as_ref()) {
        check_interval(from, to)?;
    }
    let group_names: Vec<String> = config
        .groups
        .iter()
        .map(|group| String::from(group.name()))
        .collect();
    defo!("groups {:?}", group_names);

    let mut printer = PrinterResults::new(color_choice, config.tz_offset, config.output_date_format.clone());

    if args.list_last_files {
        let lastfiles = list_last_files(&config.groups);
        printer
            .print_last_files(&lastfiles)
            .context("printing last files")?;
    }
    if args.print_interval {
        let from: DateTimeL = from.unwrap_or_else(datetime_min);
        let to: DateTimeL = to.unwrap_or_else(datetime_max);
        let chains = locate_interval(&config.groups, &from, &to)?;
        for chain in chains.iter() {
            report_file_errors(chain.errors());
        }
        let texts = extract_interval_text(&chains);
        report_file_errors(&texts.errors);
        printer
            .print_intervals(&chains, &texts.blocks)
            .context("printing intervals")?;
    }
    if args.longest_records {
        let ranked = rank_longest_records(&config.groups, config.top, &from, &to)?;
        report_file_errors(&ranked.errors);
        printer
            .print_ranked(&ranked.records, &group_names)
            .context("printing longest records")?;
    }
    if args.remove_dates {
        let stripped = strip_dates(&config.groups);
        report_file_errors(&stripped.errors);
        printer
            .print_stripped(&stripped.files)
            .context("printing stripped files")?;
    }
    defx!();

    Ok(())
}

/// Process the user-passed command-line arguments, run the actions, and
/// determine a process return code.
pub fn main() -> ExitCode {
    defn!();
    let args = CLI_Args::parse();
    let exitcode: ExitCode = match run(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            e_err!("{:#}", err);
            ExitCode::FAILURE
        }
    };
    defx!("exitcode {:?}", exitcode);

    exitcode
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

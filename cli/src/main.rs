use clap::Parser;
use log::info;
use std::process::ExitCode;
use verinfo_core::{
    checker::check_version_strings,
    expected::{load_expected, ExpectedSource},
    logging::setup_logging,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the PE file to check
    #[clap(value_parser)]
    path: String,

    /// TOML file with a [strings] table of expected values
    #[clap(short, long, value_parser, conflicts_with = "rc")]
    expected: Option<String>,

    /// Resource script with a VERSIONINFO block of expected values
    #[clap(short, long, value_parser)]
    rc: Option<String>,

    /// Log level: error, warn, info or debug
    #[clap(short, long, value_parser, default_value = "warn")]
    log_level: String,

    /// Write logs to a file instead of stderr
    #[clap(long, value_parser)]
    log_file: Option<String>,
}

impl Args {
    fn expected_source(&self) -> ExpectedSource {
        if let Some(toml) = &self.expected {
            return ExpectedSource::Toml(toml.clone());
        }
        if let Some(rc) = &self.rc {
            return ExpectedSource::ResourceScript(rc.clone());
        }
        ExpectedSource::Builtin
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = setup_logging(&args.log_level, args.log_file.as_deref()) {
        eprintln!("[verinfo] Failed to setup logging: {err}");
        return ExitCode::from(2);
    }

    let expected = match load_expected(&args.expected_source()) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("[verinfo] Failed to load expected strings: {err}");
            return ExitCode::from(2);
        }
    };

    let report = match check_version_strings(&args.path, &expected) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("[verinfo] Failed to read {}: {err}", args.path);
            return ExitCode::from(2);
        }
    };

    println!("version strings: {}", report.strings());
    if !report.is_match() {
        eprintln!("[verinfo] Version strings do not match expected strings");
        for difference in &report.differences {
            eprintln!("[verinfo] {difference}");
        }
        return ExitCode::from(1);
    }

    info!("[verinfo] Version strings match");
    ExitCode::SUCCESS
}

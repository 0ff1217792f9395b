use std::error::Error;
use std::process::ExitCode;

extern crate log;
use env_logger::Env;
use log::LevelFilter;
use syslog::{BasicLogger, Facility, Formatter3164};

use clap::{arg, crate_authors, crate_version, value_parser, ArgAction, Command, ErrorKind};

use atlib::{config_filez, grok_setting, is_default, load_settings, send_command};

/// Nothing on the command line or in the settings may keep the command from
/// going out, so bad arguments and broken settings files only earn a warning.
fn get_args() -> (bool, bool) {
    let defaults = config_filez();
    let default_refs: Vec<&str> = defaults.iter().map(String::as_str).collect();

    let cmd = Command::new("at-led")
        .version(crate_version!())
        .author(crate_authors!(", "))
        .about("Blinks the drone's LEDs with a single AT command")
        .arg(arg!(verbose: -v --verbose "log DEBUG level events instead of INFO").action(ArgAction::SetTrue))
        .arg(arg!(syslog: -S --syslog "log events to syslog instead of stderr").action(ArgAction::SetTrue))
        .arg(
            arg!(config: -C --config <CONFIG> "read this config file for settings (log settings only, \
                 the target and the command are fixed)")
                .value_parser(value_parser!(String))
                .action(ArgAction::Append)
                .required(false)
                .default_values(&default_refs),
        );

    let matches = match cmd.try_get_matches() {
        Ok(m) => Some(m),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            eprintln!("ignoring arguments ({:?}), sending anyway", e.kind());
            None
        }
    };

    let (filez, required) = match &matches {
        Some(m) => (
            m.get_many::<String>("config")
                .map(|v| v.cloned().collect())
                .unwrap_or_default(),
            !is_default!(m, "config"),
        ),
        None => (defaults.clone(), false),
    };

    let settings = match load_settings(&filez, required) {
        Ok(s) => s,
        Err(error) => {
            eprintln!("ignoring settings files: {error}");
            load_settings(&[], false).unwrap_or_default()
        }
    };

    match &matches {
        Some(m) => (
            grok_setting!(m, settings, "verbose", bool),
            grok_setting!(m, settings, "syslog", bool),
        ),
        None => (
            settings.get_bool("verbose").unwrap_or(false),
            settings.get_bool("syslog").unwrap_or(false),
        ),
    }
}

fn init_logging(verbose: bool, syslog: bool) -> Result<(), Box<dyn Error>> {
    if syslog {
        let formatter = Formatter3164 {
            facility: Facility::LOG_USER,
            process: "at-led".into(),
            hostname: None,
            pid: 0,
        };

        let logger = syslog::unix(formatter)?;

        log::set_boxed_logger(Box::new(BasicLogger::new(logger)))?;
        log::set_max_level(match verbose {
            true => LevelFilter::Debug,
            false => LevelFilter::Info,
        });
    } else {
        let env = Env::default()
            .filter_or("AT_LED_LOG_LEVEL", if verbose { "debug" } else { "info" })
            .write_style_or("AT_LED_LOG_STYLE", "auto");

        env_logger::try_init_from_env(env)?;
    }

    Ok(())
}

fn main() -> ExitCode {
    let (verbose, syslog) = get_args();

    if let Err(error) = init_logging(verbose, syslog) {
        // losing the logs isn't worth losing the command over
        eprintln!("logging setup failure: {error}");
    }

    send_command();

    println!("Seems to go ok at client");

    ExitCode::SUCCESS
}

//! Command-line argument parsing and processing.
//!
//! This module handles parsing of command-line arguments and provides a clean
//! interface for the main application logic. It supports the standard help,
//! version, and debug flags while gracefully handling unknown options.

/// Evaluation inputs that can be overridden on the command line.
///
/// Values are kept as raw strings here; the commands parse and validate them
/// with proper error reporting.
#[derive(Debug, PartialEq, Default, Clone)]
pub struct EvalOverrides {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub curve: Option<String>,
    pub cloud_cover: Option<String>,
    pub precipitation: Option<String>,
    pub target_lux: Option<String>,
}

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Evaluate the current instant and show the lighting target
    Current {
        debug_enabled: bool,
        config_dir: Option<String>,
        overrides: EvalOverrides,
    },
    /// Build a full-day schedule
    Schedule {
        debug_enabled: bool,
        config_dir: Option<String>,
        overrides: EvalOverrides,
        /// Day to schedule (YYYY-MM-DD); defaults to today at the location
        date: Option<String>,
        /// Comma-separated curve list overriding the configured curve
        curves: Option<String>,
        /// Emit the schedule as JSON on stdout
        json: bool,
    },
    /// List the curve registry
    Curves,
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut iter = args.into_iter();
        let mut debug_enabled = false;
        let mut config_dir: Option<String> = None;
        let mut overrides = EvalOverrides::default();
        let mut date: Option<String> = None;
        let mut curves: Option<String> = None;
        let mut json = false;
        let mut subcommand: Option<String> = None;

        while let Some(arg) = iter.next() {
            let arg = arg.as_ref();
            match arg {
                "--help" | "-h" => return ParsedArgs { action: CliAction::ShowHelp },
                "--version" | "-V" => {
                    return ParsedArgs {
                        action: CliAction::ShowVersion,
                    };
                }
                "--debug" | "-d" => debug_enabled = true,
                "--config-dir" => match iter.next() {
                    Some(dir) => config_dir = Some(dir.as_ref().to_string()),
                    None => return Self::error(),
                },
                "--lat" => match iter.next() {
                    Some(v) => overrides.latitude = Some(v.as_ref().to_string()),
                    None => return Self::error(),
                },
                "--lon" => match iter.next() {
                    Some(v) => overrides.longitude = Some(v.as_ref().to_string()),
                    None => return Self::error(),
                },
                "--curve" => match iter.next() {
                    Some(v) => overrides.curve = Some(v.as_ref().to_string()),
                    None => return Self::error(),
                },
                "--cloud" => match iter.next() {
                    Some(v) => overrides.cloud_cover = Some(v.as_ref().to_string()),
                    None => return Self::error(),
                },
                "--precip" => match iter.next() {
                    Some(v) => overrides.precipitation = Some(v.as_ref().to_string()),
                    None => return Self::error(),
                },
                "--target-lux" => match iter.next() {
                    Some(v) => overrides.target_lux = Some(v.as_ref().to_string()),
                    None => return Self::error(),
                },
                "--date" => match iter.next() {
                    Some(v) => date = Some(v.as_ref().to_string()),
                    None => return Self::error(),
                },
                "--curves" => match iter.next() {
                    Some(v) => curves = Some(v.as_ref().to_string()),
                    None => return Self::error(),
                },
                "--json" => json = true,
                "current" | "schedule" | "curves" if subcommand.is_none() => {
                    subcommand = Some(arg.to_string());
                }
                _ => return Self::error(),
            }
        }

        let action = match subcommand.as_deref() {
            Some("schedule") => CliAction::Schedule {
                debug_enabled,
                config_dir,
                overrides,
                date,
                curves,
                json,
            },
            Some("curves") => CliAction::Curves,
            // `current` is also the default action when no subcommand is given
            _ => CliAction::Current {
                debug_enabled,
                config_dir,
                overrides,
            },
        };

        ParsedArgs { action }
    }

    /// Parse from the process environment, skipping the binary name.
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args().skip(1))
    }

    fn error() -> ParsedArgs {
        ParsedArgs {
            action: CliAction::ShowHelpDueToError,
        }
    }
}

/// Display version information.
pub fn display_version_info() {
    log_version!();
    log_decorated!("Daylight-tracking CCT and brightness engine for smart lights");
    log_end!();
}

/// Display help information.
pub fn display_help() {
    log_version!();
    log_decorated!("Usage: lumenr [COMMAND] [OPTIONS]");
    log_pipe!();
    log_decorated!("Commands:");
    log_indented!("current     Evaluate the current instant (default)");
    log_indented!("schedule    Build a full-day schedule");
    log_indented!("curves      List the available curve models");
    log_pipe!();
    log_decorated!("Options:");
    log_indented!("--lat <DEG>         Latitude override (-90 to 90)");
    log_indented!("--lon <DEG>         Longitude override (-180 to 180)");
    log_indented!("--curve <NAME>      Curve model override");
    log_indented!("--cloud <FRACTION>  Cloud cover for weather adjustment (0-1)");
    log_indented!("--precip <KIND>     Precipitation: none, rain, snow, drizzle");
    log_indented!("--target-lux <LUX>  Show device intensity for a lux target");
    log_indented!("--date <YYYY-MM-DD> Day to schedule (schedule only)");
    log_indented!("--curves <LIST>     Comma-separated curve list (schedule only)");
    log_indented!("--json              Emit the schedule as JSON (schedule only)");
    log_indented!("--config-dir <DIR>  Use an alternate configuration directory");
    log_indented!("--debug, -d         Enable debug output");
    log_indented!("--help, -h          Show this help");
    log_indented!("--version, -V       Show version information");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_defaults_to_current() {
        let parsed = ParsedArgs::parse(Vec::<String>::new());
        assert!(matches!(parsed.action, CliAction::Current { .. }));
    }

    #[test]
    fn schedule_with_flags() {
        let parsed = ParsedArgs::parse([
            "schedule", "--date", "2024-06-21", "--curves", "hann,physics", "--json",
        ]);
        match parsed.action {
            CliAction::Schedule { date, curves, json, .. } => {
                assert_eq!(date.as_deref(), Some("2024-06-21"));
                assert_eq!(curves.as_deref(), Some("hann,physics"));
                assert!(json);
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn coordinate_overrides_are_captured() {
        let parsed = ParsedArgs::parse(["current", "--lat", "51.5", "--lon", "-0.13"]);
        match parsed.action {
            CliAction::Current { overrides, .. } => {
                assert_eq!(overrides.latitude.as_deref(), Some("51.5"));
                assert_eq!(overrides.longitude.as_deref(), Some("-0.13"));
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn unknown_flags_show_help_with_error() {
        let parsed = ParsedArgs::parse(["--frobnicate"]);
        assert_eq!(parsed.action, CliAction::ShowHelpDueToError);
    }

    #[test]
    fn missing_flag_value_shows_help_with_error() {
        let parsed = ParsedArgs::parse(["current", "--lat"]);
        assert_eq!(parsed.action, CliAction::ShowHelpDueToError);
    }
}

use std::env;

use config::{Config, ConfigError, Environment, File};

/// True when the named arg came from clap's defaults rather than the user.
#[macro_export]
macro_rules! is_default {
    ($matches:expr, $name:expr) => {
        matches!(
            $matches.value_source($name),
            None | Some(::clap::ValueSource::DefaultValue)
        )
    };
}

/// Command line wins if the user actually typed it, then the settings files
/// and environment, then whatever clap defaulted to.
#[macro_export]
macro_rules! grok_setting {
    ($matches:expr, $settings:expr, $name:expr, $t:ty) => {{
        let cli: Option<$t> = $matches.get_one::<$t>($name).cloned();
        let picked: Option<$t> = if $crate::is_default!($matches, $name) {
            $settings.get::<$t>($name).ok().or(cli)
        } else {
            cli
        };
        picked.unwrap_or_default()
    }};
}

pub const ENV_PREFIX: &str = "AT_LED";

/// Where we look for settings when nobody says otherwise.
pub fn config_filez() -> Vec<String> {
    let mut filez = vec!["/etc/at-led.toml".to_string()];
    if let Ok(home) = env::var("HOME") {
        filez.push(format!("{}/.config/at-led.toml", home));
    }
    filez
}

/// Layer the given files (required only if the user named them) under the
/// `AT_LED_*` environment.
pub fn load_settings(filez: &[String], required: bool) -> Result<Config, ConfigError> {
    let mut builder = Config::builder();
    for item in filez {
        builder = builder.add_source(File::with_name(item).required(required));
    }
    builder.add_source(Environment::with_prefix(ENV_PREFIX)).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch(name: &str, body: &str) -> String {
        let path = env::temp_dir().join(format!("at-led-{}-{}.toml", name, std::process::id()));
        fs::write(&path, body).expect("couldn't write scratch settings");
        path.to_string_lossy().to_string()
    }

    #[test]
    fn default_filez_are_toml() {
        let filez = config_filez();
        assert_eq!(filez[0], "/etc/at-led.toml");
        assert!(filez.iter().all(|f| f.ends_with("at-led.toml")));
    }

    #[test]
    fn missing_optional_files_are_fine() {
        let filez = vec!["/nonexistent/at-led.toml".to_string()];
        assert!(load_settings(&filez, false).is_ok());
    }

    #[test]
    fn missing_required_files_are_not() {
        let filez = vec!["/nonexistent/at-led.toml".to_string()];
        assert!(load_settings(&filez, true).is_err());
    }

    #[test]
    fn reads_settings_from_file() {
        let fname = scratch("reads", "verbose = true\nsyslog = false\n");
        let settings = load_settings(&[fname.clone()], true).expect("couldn't load");

        assert!(settings.get_bool("verbose").expect("verbose missing"));
        assert!(!settings.get_bool("syslog").expect("syslog missing"));

        fs::remove_file(fname).ok();
    }

    #[test]
    fn garbage_files_are_errors() {
        let fname = scratch("garbage", "verbose = = =\n");
        assert!(load_settings(&[fname.clone()], true).is_err());
        fs::remove_file(fname).ok();
    }
}

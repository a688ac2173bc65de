use std::str::FromStr;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use crate::errors::ConfigError;
use crate::initialization::General;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {h({l:<5})} {t} - {m}{n}";

/// Sets up log4rs with a file appender and, if asked for, a stdout appender
///
/// # Arguments
///
/// * 'general' - the general section of the configuration
pub fn setup_logger(general: &General) -> Result<(), ConfigError> {
    let config = logger_config(general)?;
    log4rs::init_config(config)?;

    Ok(())
}

/// Builds the log4rs configuration without installing it
///
/// # Arguments
///
/// * 'general' - the general section of the configuration
fn logger_config(general: &General) -> Result<Config, ConfigError> {
    let level = LevelFilter::from_str(&general.log_level)
        .map_err(|_| ConfigError(format!("unknown log level: {}", general.log_level)))?;

    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(&general.log_path)?;

    let mut builder = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)));
    let mut root = Root::builder().appender("file");

    if general.log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    Ok(builder.build(root.build(level))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn general(dir: &std::path::Path, level: &str, log_to_stdout: bool) -> General {
        General {
            log_path: dir.join("weatherproxy.log").to_string_lossy().into_owned(),
            log_level: level.to_string(),
            log_to_stdout,
        }
    }

    #[test]
    fn builds_file_and_stdout_appenders() {
        let dir = std::env::temp_dir().join("weatherproxy-logging-both");
        let config = logger_config(&general(&dir, "debug", true)).unwrap();

        assert_eq!(config.appenders().len(), 2);
        assert_eq!(config.root().appenders(), ["file", "stdout"]);
        assert_eq!(config.root().level(), LevelFilter::Debug);
    }

    #[test]
    fn stdout_is_optional() {
        let dir = std::env::temp_dir().join("weatherproxy-logging-file");
        let config = logger_config(&general(&dir, "warn", false)).unwrap();

        assert_eq!(config.root().appenders(), ["file"]);
        assert_eq!(config.root().level(), LevelFilter::Warn);
    }

    #[test]
    fn rejects_unknown_level() {
        let dir = std::env::temp_dir().join("weatherproxy-logging-bad");
        let err = logger_config(&general(&dir, "loud", false)).err();

        assert!(err.is_some_and(|e| e.to_string().contains("loud")));
    }
}

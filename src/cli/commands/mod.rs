pub mod check;
pub mod config;
pub mod diag;
pub mod groups;
pub mod settings;

use updatenotification::config::Config;
use updatenotification::datetime::ChronoFormatter;
use updatenotification::sources::DateTimeFormatter;

/// Timestamp formatter as configured under `[display]`
pub(crate) fn formatter_for(config: &Config) -> Box<dyn DateTimeFormatter> {
    let pattern = config.display.date_format.clone();
    if config.display.utc {
        Box::new(ChronoFormatter::utc().with_pattern(pattern))
    } else {
        Box::new(ChronoFormatter::local().with_pattern(pattern))
    }
}

//! Bridge from `lantern_config::Config` to catalog and telemetry types.

use std::time::Duration;

use lantern_catalog::{Locale, SortKey};
use lantern_config::Config;
use lantern_telemetry::{LogConfig, LogFormat};

/// Convert the `[logging]` section to a [`LogConfig`]. `verbose` forces
/// the `debug` level.
pub(crate) fn to_log_config(cfg: &Config, verbose: bool) -> LogConfig {
    let format = cfg.logging.format.parse().unwrap_or(LogFormat::Compact);
    let level = if verbose {
        "debug"
    } else {
        cfg.logging.level.as_str()
    };

    let mut log_config = LogConfig::new(level).with_format(format);
    for directive in &cfg.logging.directives {
        log_config = log_config.with_directive(directive);
    }
    log_config
}

/// Pick the display locale: command-line tag, then `view.locale`, then the
/// process environment.
pub(crate) fn resolve_locale(flag: Option<&str>, cfg: &Config) -> Locale {
    match flag.or(cfg.view.locale.as_deref()) {
        Some(tag) => Locale::detect(Some(tag)),
        None => Locale::from_env(),
    }
}

/// Default sort key from `view.sort`.
pub(crate) fn default_sort(cfg: &Config) -> SortKey {
    cfg.view.sort.parse().unwrap_or_default()
}

/// Search debounce window from `view.search_debounce_ms`.
pub(crate) fn search_debounce(cfg: &Config) -> Duration {
    Duration::from_millis(cfg.view.search_debounce_ms)
}

/// HTTP request timeout from `catalog.http_timeout_secs`.
pub(crate) fn http_timeout(cfg: &Config) -> Duration {
    Duration::from_secs(cfg.catalog.http_timeout_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_from_section() {
        let mut cfg = Config::default();
        cfg.logging.level = "info".to_owned();
        cfg.logging.format = "json".to_owned();
        cfg.logging.directives = vec!["lantern_catalog=trace".to_owned()];

        let lc = to_log_config(&cfg, false);
        assert_eq!(lc.level, "info");
        assert_eq!(lc.format, LogFormat::Json);
        assert_eq!(lc.directives, vec!["lantern_catalog=trace"]);
    }

    #[test]
    fn test_verbose_forces_debug() {
        let lc = to_log_config(&Config::default(), true);
        assert_eq!(lc.level, "debug");
    }

    #[test]
    fn test_flag_locale_beats_config() {
        let mut cfg = Config::default();
        cfg.view.locale = Some("zh-TW".to_owned());
        assert_eq!(resolve_locale(Some("en-GB"), &cfg), Locale::EnUs);
        assert_eq!(resolve_locale(None, &cfg), Locale::ZhCn);
    }

    #[test]
    fn test_durations() {
        let cfg = Config::default();
        assert_eq!(search_debounce(&cfg), Duration::from_millis(250));
        assert_eq!(http_timeout(&cfg), Duration::from_secs(30));
        assert_eq!(default_sort(&cfg), SortKey::Name);
    }
}

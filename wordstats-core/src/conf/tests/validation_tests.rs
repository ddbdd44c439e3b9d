use crate::conf::{ConfigError, WordstatsConfig};

fn parse(s: &str) -> ConfigError {
    s.parse::<WordstatsConfig>().unwrap_err()
}

#[test]
fn zero_feed_capacity() {
    let err = parse("[engine]\nfeed_capacity = 0\n");
    assert!(matches!(err, ConfigError::ZeroFeedCapacity));
}

#[test]
fn no_statistics() {
    let err = parse("[engine]\nstatistics = []\n");
    assert!(matches!(err, ConfigError::NoStatistics));
}

#[test]
fn duplicate_statistic() {
    let err = parse("[engine]\nstatistics = [\"count\", \"count\"]\n");
    assert!(matches!(err, ConfigError::DuplicateStatistic { .. }));
    assert_eq!(err.to_string(), "statistic 'count' is listed more than once");
}

#[test]
fn zero_reload_interval() {
    let err = parse("[stats]\nreload_interval_secs = 0\n");
    assert!(matches!(err, ConfigError::ZeroReloadInterval));
}

#[test]
fn invalid_listener_address() {
    let err = parse("[ingest]\nlisten = \"localhost\"\n");
    assert!(matches!(err, ConfigError::InvalidListenerAddr { ref addr } if addr == "localhost"));
}

#[test]
fn shared_listener_address() {
    let err = parse("[ingest]\nlisten = \"127.0.0.1:7000\"\n[stats]\nlisten = \"127.0.0.1:7000\"\n");
    assert!(matches!(err, ConfigError::DuplicateListenerAddr { .. }));
}

#[test]
fn port_override_on_invalid_address() {
    let mut cfg = WordstatsConfig::default();
    cfg.stats.listen = "nowhere".to_string();

    assert!(matches!(
        cfg.with_stats_port(1),
        Err(ConfigError::InvalidListenerAddr { .. })
    ));
}

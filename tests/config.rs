use std::collections::HashMap;
use std::time::Duration;
use tournament_dashboard::ServerConfig;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn empty_environment_gives_defaults() {
    let config = ServerConfig::from_lookup(lookup(&[]));
    assert_eq!(config, ServerConfig::default());
    assert_eq!(config.port, 8080);
    assert_eq!(config.inactivity_timeout, Duration::from_secs(12 * 3600));
}

#[test]
fn values_are_read_and_trimmed() {
    let config = ServerConfig::from_lookup(lookup(&[
        ("HOST", "127.0.0.1"),
        ("PORT", " 9000 "),
        ("INACTIVITY_HOURS", "2"),
        ("COURTS", "Hall A, Hall B ,,Hall C"),
        ("SLOT_MINUTES", "40"),
    ]));
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 9000);
    assert_eq!(config.inactivity_timeout, Duration::from_secs(7200));
    assert_eq!(config.venues, vec!["Hall A", "Hall B", "Hall C"]);
    assert_eq!(config.slot_minutes, 40);
}

#[test]
fn bad_values_fall_back() {
    let config = ServerConfig::from_lookup(lookup(&[
        ("HOST", "  "),
        ("PORT", "eighty"),
        ("INACTIVITY_HOURS", "-1"),
        ("COURTS", " , "),
        ("SLOT_MINUTES", "0"),
    ]));
    assert_eq!(config, ServerConfig::default());
}

#[test]
fn absurd_inactivity_hours_fall_back() {
    let hours = u64::MAX.to_string();
    let config = ServerConfig::from_lookup(lookup(&[("INACTIVITY_HOURS", hours.as_str())]));
    assert_eq!(config.inactivity_timeout, ServerConfig::default().inactivity_timeout);
}

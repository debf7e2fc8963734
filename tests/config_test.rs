use kodegen_tools_site_import::utils::{LINK_CACHE_CAPACITY, UNLIMITED_IMPORTS};
use kodegen_tools_site_import::{SchedulerConfig, SystemConfig};
use std::time::Duration;

#[test]
fn test_defaults() {
    let config = SchedulerConfig::default();
    assert_eq!(config.import_page_max(), UNLIMITED_IMPORTS);
    assert_eq!(config.link_cache_capacity(), LINK_CACHE_CAPACITY);
    assert_eq!(config.event_bus_capacity(), 256);
    assert_eq!(config.idle_wait(), Duration::from_millis(1_000));
}

#[test]
fn test_from_json_fills_missing_fields() {
    let config = SchedulerConfig::from_json_str(r#"{"import_page_max": 25}"#).expect("parse");
    assert_eq!(config.import_page_max(), 25);
    assert_eq!(config.link_cache_capacity(), LINK_CACHE_CAPACITY);

    assert!(SchedulerConfig::from_json_str("not json").is_err());
}

#[test]
fn test_builder_methods() {
    let config = SchedulerConfig::new()
        .with_import_page_max(3)
        .with_link_cache_capacity(0)
        .with_event_bus_capacity(8)
        .with_idle_wait(Duration::from_millis(20));

    assert_eq!(config.import_page_max(), 3);
    assert_eq!(config.link_cache_capacity(), 1);
    assert_eq!(config.event_bus_capacity(), 8);
    assert_eq!(config.idle_wait(), Duration::from_millis(20));

    let json = serde_json::to_string(&config).expect("serialize");
    assert_eq!(SchedulerConfig::from_json_str(&json).expect("parse"), config);
}

#[test]
fn test_system_config_is_shared_between_clones() {
    let system = SystemConfig::new(10);
    let reloader = system.clone();

    reloader.set_import_page_max(-1);
    assert_eq!(system.import_page_max(), -1);
    assert_eq!(SystemConfig::default().import_page_max(), UNLIMITED_IMPORTS);
}

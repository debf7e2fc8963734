use kodegen_tools_site_import::import_events::*;
use kodegen_tools_site_import::PageRef;
use std::time::Duration;
use tokio::time::timeout;

#[tokio::test]
async fn test_event_bus_creation() {
    let bus = ImportEventBus::new(16);
    assert_eq!(bus.subscriber_count(), 0);
    assert!(!bus.has_subscribers());
    assert!(!bus.is_shutdown());
}

#[tokio::test]
async fn test_publish_with_no_subscribers() {
    let bus = ImportEventBus::new(16);
    match bus.publish(ImportEvent::server_initialized()) {
        Err(EventBusError::NoSubscribers) => {}
        other => panic!("Expected EventBusError::NoSubscribers, got: {other:?}"),
    }
    assert_eq!(bus.metrics().snapshot().events_dropped, 1);
}

#[tokio::test]
async fn test_subscribe_and_publish() {
    let bus = ImportEventBus::new(16);
    let mut receiver = bus.subscribe();

    let result = bus.publish(ImportEvent::page_deleted(PageRef::new("a.example", "12")));
    assert!(matches!(result, Ok(1)));

    let received = match timeout(Duration::from_millis(100), receiver.recv()).await {
        Ok(Ok(event)) => event,
        Ok(Err(e)) => panic!("Failed to receive event: {e}"),
        Err(_) => panic!("Timeout waiting for event"),
    };

    match received {
        ImportEvent::PageDeleted { page, .. } => {
            assert_eq!(page.site_name, "a.example");
            assert_eq!(page.key, "12");
        }
        other => panic!("Unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_multiple_subscribers() {
    let bus = ImportEventBus::new(16);
    let mut first = bus.subscribe();
    let mut second = bus.subscribe();
    assert_eq!(bus.subscriber_count(), 2);

    assert!(matches!(bus.publish(ImportEvent::site_deleted("a.example")), Ok(2)));

    for receiver in [&mut first, &mut second] {
        match timeout(Duration::from_millis(100), receiver.recv()).await {
            Ok(Ok(ImportEvent::SiteDeleted { site, .. })) => assert_eq!(site.as_str(), "a.example"),
            Ok(Ok(other)) => panic!("Unexpected event: {other:?}"),
            Ok(Err(e)) => panic!("Receiver failed: {e}"),
            Err(_) => panic!("Receiver timeout waiting for event"),
        }
    }
    assert_eq!(bus.metrics().snapshot().peak_subscribers, 2);
}

#[tokio::test]
async fn test_publish_after_shutdown_is_rejected() {
    let bus = ImportEventBus::new(16);
    let _receiver = bus.subscribe();
    bus.shutdown();
    bus.shutdown();

    assert!(bus.is_shutdown());
    assert!(matches!(
        bus.publish(ImportEvent::config_changed()),
        Err(EventBusError::Shutdown)
    ));

    // Returns immediately once shut down
    assert!(timeout(Duration::from_millis(100), bus.wait_for_shutdown()).await.is_ok());
}

#[tokio::test]
async fn test_event_kinds() {
    assert_eq!(ImportEvent::server_initialized().kind(), "server_initialized");
    assert_eq!(ImportEvent::server_shutdown().kind(), "server_shutdown");
    assert_eq!(ImportEvent::site_deleted("x").kind(), "site_deleted");
    assert_eq!(ImportEvent::config_changed().kind(), "config_changed");
}

#[test]
fn test_events_serialize() {
    let event = ImportEvent::site_deleted("docs.example");
    let json = serde_json::to_string(&event).expect("serialize");
    assert!(json.contains("SiteDeleted"));
    assert!(json.contains("docs.example"));
}

#[tokio::test]
async fn test_receive_reports_lag() {
    let bus = ImportEventBus::new(2);
    let mut receiver = bus.subscribe();
    for _ in 0..4 {
        assert!(bus.publish(ImportEvent::config_changed()).is_ok());
    }

    match ImportEventBus::receive(&mut receiver).await {
        Err(EventBusError::ReceiverLagged(skipped)) => assert_eq!(skipped, 2),
        other => panic!("Expected EventBusError::ReceiverLagged, got: {other:?}"),
    }
    // Still usable after lagging
    assert!(matches!(
        ImportEventBus::receive(&mut receiver).await,
        Ok(ImportEvent::ConfigChanged { .. })
    ));
}

#[tokio::test]
async fn test_receive_after_bus_dropped_reports_shutdown() {
    let bus = ImportEventBus::new(4);
    let mut receiver = bus.subscribe();
    assert!(bus.publish(ImportEvent::server_shutdown()).is_ok());
    drop(bus);

    assert!(matches!(
        ImportEventBus::receive(&mut receiver).await,
        Ok(ImportEvent::ServerShutdown { .. })
    ));
    assert!(matches!(
        ImportEventBus::receive(&mut receiver).await,
        Err(EventBusError::Shutdown)
    ));
}

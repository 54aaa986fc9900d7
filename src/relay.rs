/// Relaying host window/tab lifecycle events to open views
use crate::errors::NotifyDeliveryError;
use serde::{Deserialize, Serialize};

/// `chrome.windows.WINDOW_ID_NONE`: focus moved away from all browser windows
pub const WINDOW_ID_NONE: i32 = -1;

/// Kind of change announced to views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    TabCreated,
    TabRemoved,
    TabUpdated,
    TabMoved,
    TabActivated,
    WindowCreated,
    WindowRemoved,
    WindowFocused,
}

/// Message posted to every view:
/// `{ "type": "TAB_WINDOW_CHANGE", "eventType": ..., "details": ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "TAB_WINDOW_CHANGE", rename_all = "camelCase")]
pub struct ChangeMessage {
    pub event_type: ChangeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Fields of `chrome.tabs.onUpdated`'s change info that matter here
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabChangeInfo {
    pub title: Option<String>,
    pub url: Option<String>,
    pub status: Option<String>,
    pub fav_icon_url: Option<String>,
}

impl TabChangeInfo {
    /// Only title, URL and finished loads change what the views show
    pub fn is_visible(&self) -> bool {
        self.title.is_some() || self.url.is_some() || self.status.as_deref() == Some("complete")
    }
}

/// Lifecycle notification as it arrives from the host
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    TabCreated(serde_json::Value),
    TabRemoved(serde_json::Value),
    TabUpdated { tab_id: i32, change: TabChangeInfo },
    TabMoved(serde_json::Value),
    TabActivated(serde_json::Value),
    WindowCreated(serde_json::Value),
    WindowRemoved(serde_json::Value),
    WindowFocusChanged { window_id: i32 },
}

impl HostEvent {
    /// Decode a `(name, details)` pair from the bridge's lifecycle listener
    pub fn from_parts(name: &str, details: serde_json::Value) -> Result<HostEvent, String> {
        let event = match name {
            "tabCreated" => HostEvent::TabCreated(details),
            "tabRemoved" => HostEvent::TabRemoved(details),
            "tabUpdated" => {
                let tab_id = details
                    .get("tabId")
                    .and_then(serde_json::Value::as_i64)
                    .ok_or("tabUpdated without tabId")? as i32;
                let change: TabChangeInfo = details
                    .get("changeInfo")
                    .cloned()
                    .map(serde_json::from_value)
                    .transpose()
                    .map_err(|e| e.to_string())?
                    .unwrap_or_default();
                HostEvent::TabUpdated { tab_id, change }
            }
            "tabMoved" => HostEvent::TabMoved(details),
            "tabActivated" => HostEvent::TabActivated(details),
            "windowCreated" => HostEvent::WindowCreated(details),
            "windowRemoved" => HostEvent::WindowRemoved(details),
            "windowFocusChanged" => {
                let window_id = details
                    .get("windowId")
                    .and_then(serde_json::Value::as_i64)
                    .ok_or("windowFocusChanged without windowId")? as i32;
                HostEvent::WindowFocusChanged { window_id }
            }
            other => return Err(format!("Unknown lifecycle event: {}", other)),
        };
        Ok(event)
    }
}

/// Decide whether a host event is worth announcing to the views
pub fn classify(event: &HostEvent) -> Option<ChangeMessage> {
    let (event_type, details) = match event {
        HostEvent::TabCreated(details) => (ChangeKind::TabCreated, details.clone()),
        HostEvent::TabRemoved(details) => (ChangeKind::TabRemoved, details.clone()),
        HostEvent::TabUpdated { tab_id, change } => {
            if !change.is_visible() {
                return None;
            }
            (
                ChangeKind::TabUpdated,
                serde_json::json!({ "tabId": tab_id, "changeInfo": change }),
            )
        }
        HostEvent::TabMoved(details) => (ChangeKind::TabMoved, details.clone()),
        HostEvent::TabActivated(details) => (ChangeKind::TabActivated, details.clone()),
        HostEvent::WindowCreated(details) => (ChangeKind::WindowCreated, details.clone()),
        HostEvent::WindowRemoved(details) => (ChangeKind::WindowRemoved, details.clone()),
        HostEvent::WindowFocusChanged { window_id } => {
            if *window_id == WINDOW_ID_NONE {
                return None;
            }
            (ChangeKind::WindowFocused, serde_json::json!({ "windowId": window_id }))
        }
    };

    Some(ChangeMessage {
        event_type,
        details: Some(details),
    })
}

/// An open view that can be sent change messages
pub trait ViewReceiver {
    fn label(&self) -> String;
    fn deliver(&self, message: &ChangeMessage) -> Result<(), NotifyDeliveryError>;
}

/// Outcome of sending one message to one view
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub receiver: String,
    pub result: Result<(), NotifyDeliveryError>,
}

impl Delivery {
    pub fn is_delivered(&self) -> bool {
        self.result.is_ok()
    }
}

/// Send `message` to every receiver. A failing receiver does not stop the
/// others; failures are logged and reported per receiver only.
pub fn fan_out<R: ViewReceiver>(receivers: &[R], message: &ChangeMessage) -> Vec<Delivery> {
    receivers
        .iter()
        .map(|receiver| {
            let result = receiver.deliver(message);
            if let Err(e) = &result {
                log::debug!("{}", e);
            }
            Delivery {
                receiver: receiver.label(),
                result,
            }
        })
        .collect()
}

/// Views connected to the background context
#[derive(Debug)]
pub struct ViewRegistry<R> {
    views: Vec<R>,
}

impl<R> Default for ViewRegistry<R> {
    fn default() -> Self {
        ViewRegistry { views: Vec::new() }
    }
}

impl<R: ViewReceiver> ViewRegistry<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&mut self, view: R) {
        log::info!("View connected: {}", view.label());
        self.views.push(view);
    }

    pub fn disconnect(&mut self, label: &str) {
        self.views.retain(|v| v.label() != label);
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Fan out to all views, then forget the ones that could not be reached
    pub fn broadcast(&mut self, message: &ChangeMessage) -> Vec<Delivery> {
        let deliveries = fan_out(&self.views, message);
        let mut outcomes = deliveries.iter();
        self.views
            .retain(|_| outcomes.next().is_some_and(Delivery::is_delivered));
        deliveries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    struct TestView {
        name: String,
        closed: bool,
        received: RefCell<Vec<ChangeMessage>>,
    }

    impl TestView {
        fn open(name: &str) -> TestView {
            TestView {
                name: name.to_string(),
                closed: false,
                received: RefCell::new(Vec::new()),
            }
        }

        fn closed(name: &str) -> TestView {
            TestView {
                closed: true,
                ..TestView::open(name)
            }
        }
    }

    impl ViewReceiver for &TestView {
        fn label(&self) -> String {
            self.name.clone()
        }

        fn deliver(&self, message: &ChangeMessage) -> Result<(), NotifyDeliveryError> {
            if self.closed {
                return Err(NotifyDeliveryError {
                    receiver: self.name.clone(),
                    message: "Receiving end does not exist.".to_string(),
                });
            }
            self.received.borrow_mut().push(message.clone());
            Ok(())
        }
    }

    fn tab_updated(change: TabChangeInfo) -> HostEvent {
        HostEvent::TabUpdated { tab_id: 4, change }
    }

    #[test]
    fn test_favicon_only_update_is_not_relayed() {
        let event = tab_updated(TabChangeInfo {
            fav_icon_url: Some("https://github.com/favicon.ico".to_string()),
            ..Default::default()
        });
        assert_eq!(classify(&event), None);
    }

    #[test]
    fn test_loading_status_is_not_relayed() {
        let event = tab_updated(TabChangeInfo {
            status: Some("loading".to_string()),
            ..Default::default()
        });
        assert_eq!(classify(&event), None);
    }

    #[test]
    fn test_complete_status_is_relayed() {
        let event = tab_updated(TabChangeInfo {
            status: Some("complete".to_string()),
            ..Default::default()
        });
        let message = classify(&event).unwrap();
        assert_eq!(message.event_type, ChangeKind::TabUpdated);
    }

    #[test]
    fn test_title_and_url_updates_are_relayed() {
        for change in [
            TabChangeInfo { title: Some("New".to_string()), ..Default::default() },
            TabChangeInfo { url: Some("https://docs.rs".to_string()), ..Default::default() },
        ] {
            assert!(classify(&tab_updated(change)).is_some());
        }
    }

    #[test]
    fn test_focus_to_no_window_is_not_relayed() {
        assert_eq!(classify(&HostEvent::WindowFocusChanged { window_id: WINDOW_ID_NONE }), None);

        let message = classify(&HostEvent::WindowFocusChanged { window_id: 12 }).unwrap();
        assert_eq!(message.event_type, ChangeKind::WindowFocused);
        assert_eq!(message.details, Some(json!({ "windowId": 12 })));
    }

    #[test]
    fn test_other_events_are_relayed_with_details() {
        let message = classify(&HostEvent::TabRemoved(json!({ "tabId": 9, "windowId": 2 }))).unwrap();
        assert_eq!(message.event_type, ChangeKind::TabRemoved);
        assert_eq!(message.details, Some(json!({ "tabId": 9, "windowId": 2 })));
    }

    #[test]
    fn test_message_wire_format() {
        let message = ChangeMessage {
            event_type: ChangeKind::WindowFocused,
            details: Some(json!({ "windowId": 3 })),
        };

        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({ "type": "TAB_WINDOW_CHANGE", "eventType": "WINDOW_FOCUSED", "details": { "windowId": 3 } })
        );

        let parsed: ChangeMessage =
            serde_json::from_value(json!({ "type": "TAB_WINDOW_CHANGE", "eventType": "TAB_MOVED" })).unwrap();
        assert_eq!(parsed.event_type, ChangeKind::TabMoved);
        assert_eq!(parsed.details, None);
    }

    #[test]
    fn test_from_parts() {
        let event = HostEvent::from_parts(
            "tabUpdated",
            json!({ "tabId": 4, "changeInfo": { "favIconUrl": "x.ico" } }),
        )
        .unwrap();
        assert_eq!(
            event,
            tab_updated(TabChangeInfo { fav_icon_url: Some("x.ico".to_string()), ..Default::default() })
        );

        assert_eq!(
            HostEvent::from_parts("windowFocusChanged", json!({ "windowId": -1 })).unwrap(),
            HostEvent::WindowFocusChanged { window_id: -1 }
        );
        assert!(HostEvent::from_parts("tabZoomed", json!({})).is_err());
    }

    #[test]
    fn test_fan_out_continues_past_failures() {
        let first = TestView::open("first");
        let gone = TestView::closed("gone");
        let last = TestView::open("last");
        let message = classify(&HostEvent::TabCreated(json!({ "id": 1 }))).unwrap();

        let deliveries = fan_out(&[&first, &gone, &last], &message);

        assert_eq!(deliveries.len(), 3);
        assert!(deliveries[0].is_delivered());
        assert!(!deliveries[1].is_delivered());
        assert_eq!(deliveries[1].receiver, "gone");
        assert!(deliveries[2].is_delivered());
        assert_eq!(last.received.borrow().len(), 1);
    }

    #[test]
    fn test_registry_prunes_unreachable_views() {
        let first = TestView::open("first");
        let gone = TestView::closed("gone");
        let mut registry = ViewRegistry::new();
        registry.connect(&first);
        registry.connect(&gone);

        let message = classify(&HostEvent::WindowCreated(json!({ "id": 5 }))).unwrap();
        registry.broadcast(&message);

        assert_eq!(registry.len(), 1);
        registry.broadcast(&message);
        assert_eq!(first.received.borrow().len(), 2);

        registry.disconnect("first");
        assert!(registry.is_empty());
    }
}

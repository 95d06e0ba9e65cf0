//! Common test utilities: routing documents and in-memory collaborators.
use campaign_routing::prelude::*;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// One channel with `E1`, one conversation with `E2`, wired by `c1`.
#[allow(dead_code)]
pub const SIMPLE_ROUTING_JSON: &str = r#"{
    "campaign_id": "campaign-1",
    "channels": [
        {"uuid": "ch1", "endpoints": [{"uuid": "E1"}]}
    ],
    "routing_blocks": [],
    "conversations": [
        {"uuid": "conv1", "endpoints": [{"uuid": "E2"}]}
    ],
    "routing_entries": [
        {"uuid": "c1", "endpoints": ["E1", "E2"]}
    ]
}"#;

/// Channel -> routing block -> conversation, with free-form attributes everywhere.
#[allow(dead_code)]
pub const FULL_ROUTING_JSON: &str = r#"{
    "campaign_id": "campaign-2",
    "name": "Spring campaign",
    "channels": [
        {
            "uuid": "ch-sms",
            "tag": ["sms", "*12345#"],
            "name": "SMS",
            "endpoints": [{"uuid": "ch-sms-out", "name": "default"}]
        }
    ],
    "routing_blocks": [
        {
            "uuid": "rb-keyword",
            "type": "keyword",
            "conversation_endpoints": [{"uuid": "rb-conv-a"}, {"uuid": "rb-conv-b"}],
            "channel_endpoints": [{"uuid": "rb-chan"}]
        }
    ],
    "conversations": [
        {
            "uuid": "conv-survey",
            "description": "Survey",
            "endpoints": [{"uuid": "conv-survey-in"}]
        },
        {
            "uuid": "conv-quiz",
            "endpoints": [{"uuid": "conv-quiz-in"}]
        }
    ],
    "routing_entries": [
        {"uuid": "r1", "endpoints": ["ch-sms-out", "rb-chan"]},
        {"uuid": "r2", "endpoints": ["rb-conv-a", "conv-survey-in"]},
        {"uuid": "r3", "endpoints": ["rb-conv-b", "conv-quiz-in"], "weight": 2}
    ]
}"#;

#[allow(dead_code)]
pub fn simple_routing() -> CampaignRouting {
    parse(SIMPLE_ROUTING_JSON).expect("simple routing should parse")
}

#[allow(dead_code)]
pub fn full_routing() -> CampaignRouting {
    parse(FULL_ROUTING_JSON).expect("full routing should parse")
}

#[allow(dead_code)]
pub fn shared(routing: CampaignRouting) -> Rc<RefCell<CampaignRouting>> {
    Rc::new(RefCell::new(routing))
}

/// Completes every save immediately with a fixed outcome, recording requests.
#[allow(dead_code)]
pub struct ImmediateStore {
    pub outcome: std::result::Result<(), TransportError>,
    pub requests: RefCell<Vec<SaveRequest>>,
}

#[allow(dead_code)]
impl ImmediateStore {
    pub fn succeeding() -> Rc<Self> {
        Rc::new(Self {
            outcome: Ok(()),
            requests: RefCell::new(Vec::new()),
        })
    }

    pub fn failing() -> Rc<Self> {
        Rc::new(Self {
            outcome: Err(TransportError::Status {
                status: 500,
                message: "Internal Server Error".to_string(),
            }),
            requests: RefCell::new(Vec::new()),
        })
    }
}

impl Store for ImmediateStore {
    fn save(&self, request: SaveRequest, done: Completion<()>) {
        self.requests.borrow_mut().push(request);
        done(self.outcome.clone());
    }
}

/// Holds saves until the test completes them.
#[allow(dead_code)]
#[derive(Default)]
pub struct DeferredStore {
    pub pending: RefCell<Vec<(SaveRequest, Completion<()>)>>,
}

#[allow(dead_code)]
impl DeferredStore {
    pub fn complete_next(&self, outcome: std::result::Result<(), TransportError>) {
        let (_, done) = self.pending.borrow_mut().remove(0);
        done(outcome);
    }
}

impl Store for DeferredStore {
    fn save(&self, request: SaveRequest, done: Completion<()>) {
        self.pending.borrow_mut().push((request, done));
    }
}

/// Records calls and holds them until the test completes them.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingTransport {
    pub requests: RefCell<Vec<CallRequest>>,
    pub pending: RefCell<Vec<Completion<Value>>>,
}

#[allow(dead_code)]
impl RecordingTransport {
    pub fn last_request(&self) -> CallRequest {
        self.requests
            .borrow()
            .last()
            .cloned()
            .expect("no request was sent")
    }

    pub fn complete_next(&self, outcome: std::result::Result<Value, TransportError>) {
        let done = self.pending.borrow_mut().remove(0);
        done(outcome);
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: CallRequest, done: Completion<Value>) {
        self.requests.borrow_mut().push(request);
        self.pending.borrow_mut().push(done);
    }
}

/// Collects events in order, tagged by source, for ordering assertions.
#[allow(dead_code)]
pub fn event_log() -> Rc<RefCell<Vec<String>>> {
    Rc::new(RefCell::new(Vec::new()))
}

/// A view that records every call made on it.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct RecordingView {
    pub calls: Rc<RefCell<Vec<String>>>,
}

impl NotifierView for RecordingView {
    fn set_text(&mut self, text: &str) {
        self.calls.borrow_mut().push(format!("text:{}", text));
    }

    fn show(&mut self) {
        self.calls.borrow_mut().push("show".to_string());
    }
}

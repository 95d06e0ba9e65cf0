//! Integration tests for campaign_routing
//!
//! End-to-end editing sessions: load a document, edit it, save or reset it.
//!
mod common;
use campaign_routing::prelude::*;
use common::*;
use serde_json::Value;
use std::rc::Rc;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_edit_and_save_session() {
        let routing = shared(full_routing());
        let store = Rc::new(DeferredStore::default());
        let save = SaveAction::new(
            Rc::clone(&routing),
            store.clone(),
            ActionOptions::named("Save").with_notifier(NotifierOptions::default()),
        )
        .with_session_id("sess-1");

        // Rewire the keyword block's second output to the survey.
        {
            let mut routing = routing.borrow_mut();
            routing.disconnect("r3").unwrap();
            routing
                .connect(Connection::new("r4", "rb-conv-b", "conv-survey-in"))
                .unwrap();
        }

        let mut click = ClickEvent::new();
        save.click(&mut click).unwrap();
        assert!(click.is_default_prevented());
        assert_eq!(save.notifier().unwrap().borrow().text(), "loading...");

        let pending = store.pending.borrow();
        let (request, _) = &pending[0];
        assert_eq!(request.session_id.as_deref(), Some("sess-1"));
        let saved = parse_value(request.body.clone()).expect("saved body should parse");
        assert!(saved.routing_entry("r3").is_none());
        assert_eq!(
            saved.routing_entry("r4").unwrap().endpoints(),
            ["rb-conv-b", "conv-survey-in"]
        );
        drop(pending);

        store.complete_next(Ok(()));
        assert_eq!(save.state(), ActionState::Succeeded);
        assert_eq!(save.notifier().unwrap().borrow().text(), "Save successful!");
    }

    #[test]
    fn test_edit_then_reset_session() {
        let routing = shared(simple_routing());
        let original: Value = serde_json::from_str(SIMPLE_ROUTING_JSON).unwrap();
        let reset = ResetAction::new(
            Rc::clone(&routing),
            ActionOptions::named("Reset").with_notifier(NotifierOptions::default()),
        )
        .unwrap();

        {
            let mut routing = routing.borrow_mut();
            routing.upsert_channel(Channel::new("ch2")).unwrap();
            routing
                .move_endpoint("E1", &EndpointOwner::Channel("ch2".to_string()))
                .unwrap();
        }
        assert_ne!(to_value(&routing.borrow()), original);

        reset.invoke().unwrap();
        assert_eq!(to_value(&routing.borrow()), original);
        assert!(routing.borrow().validate().is_ok());
        assert_eq!(reset.notifier().unwrap().borrow().text(), "Reset successful!");
    }

    #[test]
    fn test_save_and_call_share_listeners_pattern() {
        let routing = shared(simple_routing());
        let transport = Rc::new(RecordingTransport::default());
        let save = SaveAction::new(
            Rc::clone(&routing),
            ImmediateStore::succeeding(),
            ActionOptions::named("Save"),
        );
        let publish = CallAction::new(
            TriggerElement::new().with_attr("data-url", "/campaigns/campaign-1/publish"),
            transport.clone(),
            CallConfig::new().data(Value::from(routing.borrow().campaign_id())),
            ActionOptions::named("Publish"),
        );

        // Publish once the save lands.
        let publish = Rc::new(publish);
        let next = Rc::clone(&publish);
        save.on(ActionEvent::Success, move |_| {
            next.invoke().unwrap();
        });

        save.invoke().unwrap();
        assert_eq!(publish.state(), ActionState::Invoking);
        assert_eq!(
            transport.last_request().url.as_deref(),
            Some("/campaigns/campaign-1/publish")
        );

        transport.complete_next(Err(TransportError::Status {
            status: 409,
            message: "Conflict".to_string(),
        }));
        assert_eq!(save.state(), ActionState::Succeeded);
        assert_eq!(publish.state(), ActionState::Failed);
    }
}

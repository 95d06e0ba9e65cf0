//! Unit tests for core campaign_routing functionality.
mod common;
use campaign_routing::prelude::*;
use std::error::Error;

#[derive(Debug, Clone, PartialEq)]
struct Item(&'static str, u32);

impl Keyed for Item {
    fn key(&self) -> &str {
        self.0
    }
}

#[test]
fn test_collection_upsert_replaces_in_place() {
    let mut items: Collection<Item> = vec![Item("a", 1), Item("b", 2)].into_iter().collect();
    assert_eq!(items.upsert(Item("a", 9)), Some(Item("a", 1)));
    assert_eq!(items.len(), 2);
    assert_eq!(items.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(items.get("a"), Some(&Item("a", 9)));
}

#[test]
fn test_collection_rekey_keeps_index_consistent() {
    let mut items: Collection<Item> = vec![Item("a", 1), Item("b", 2)].into_iter().collect();

    // Keys only change by removing and re-inserting.
    let Item(_, value) = items.remove("a").unwrap();
    items.upsert(Item("z", value));
    assert_eq!(items.get("z"), Some(&Item("z", 1)));
    assert!(items.get("a").is_none());

    items.upsert(Item("a", 7));
    assert_eq!(items.len(), 3);
    assert_eq!(items.keys().collect::<Vec<_>>(), vec!["b", "z", "a"]);
    assert_eq!(items.get("z"), Some(&Item("z", 1)));
}

#[test]
fn test_collection_from_iter_collapses_duplicate_keys() {
    let items: Collection<Item> = vec![Item("a", 1), Item("b", 2), Item("a", 3)]
        .into_iter()
        .collect();
    assert_eq!(items.len(), 2);
    assert_eq!(items.get("a"), Some(&Item("a", 3)));
}

#[test]
fn test_collection_remove_keeps_index_consistent() {
    let mut items: Collection<Item> = vec![Item("a", 1), Item("b", 2), Item("c", 3)]
        .into_iter()
        .collect();
    assert_eq!(items.remove("a"), Some(Item("a", 1)));
    assert_eq!(items.get("b"), Some(&Item("b", 2)));
    assert_eq!(items.get("c"), Some(&Item("c", 3)));
    assert!(items.remove("a").is_none());
    assert_eq!(items.keys().collect::<Vec<_>>(), vec!["b", "c"]);
}

#[test]
fn test_error_display() {
    let err = ValidationError::EndpointNotFound {
        endpoint_id: "E9".to_string(),
        connection_id: "c1".to_string(),
    };
    assert!(err.to_string().contains("E9"));
    assert!(err.to_string().contains("c1"));

    let schema = SchemaError::MissingId {
        collection: "channels",
        index: 3,
    };
    assert!(schema.to_string().contains("channels"));
    assert!(schema.to_string().contains('3'));

    let transport = TransportError::Status {
        status: 503,
        message: "Service Unavailable".to_string(),
    };
    assert!(transport.to_string().contains("503"));

    let routing: RoutingError = schema.clone().into();
    assert_eq!(routing.to_string(), schema.to_string());
}

#[test]
fn test_suberror_is_every_ancestor() {
    let go_error = ErrorKind::root();
    let foo_error = go_error.suberror("FooError", None);
    let bar_error = foo_error.suberror("BarError", Some("bar went wrong"));

    let err = bar_error.new_error(None);
    assert!(err.is(&bar_error));
    assert!(err.is(&foo_error));
    assert!(err.is(&go_error));

    let foo = foo_error.new_error(None);
    assert!(foo.is(&foo_error));
    assert!(foo.is(&go_error));
    assert!(!foo.is(&bar_error));

    let unrelated = go_error.suberror("FooError", None);
    assert!(!foo.is(&unrelated));
}

#[test]
fn test_root_is_shared_across_callers() {
    let foo_error = ErrorKind::root().suberror("FooError", None);
    let foo = foo_error.new_error(None);

    assert_eq!(ErrorKind::root(), ErrorKind::root());
    assert!(foo.is(&ErrorKind::root()));
    assert!(ErrorKind::root().new_error(None).is(&ErrorKind::root()));
}

#[test]
fn test_suberror_is_a_native_error() {
    let foo_error = ErrorKind::root().suberror("FooError", None);
    let boxed: Box<dyn Error> = Box::new(foo_error.new_error(Some("boom")));

    let recovered = boxed
        .downcast_ref::<GoError>()
        .expect("should downcast back to GoError");
    assert!(recovered.is(&foo_error));
    assert_eq!(boxed.to_string(), "[FooError: boom]");
}

#[test]
fn test_go_error_display() {
    let root = ErrorKind::root();
    assert_eq!(root.new_error(None).to_string(), "[GoError]");
    assert_eq!(root.new_error(Some("oops")).to_string(), "[GoError: oops]");

    let with_default = root.suberror("TimeoutError", Some("took too long"));
    assert_eq!(with_default.new_error(None).to_string(), "[TimeoutError: took too long]");
    assert_eq!(
        with_default.new_error(Some("gave up")).to_string(),
        "[TimeoutError: gave up]"
    );

    // Default messages are inherited by further sub-errors.
    let child = with_default.suberror("ReadTimeoutError", None);
    assert_eq!(child.new_error(None).message(), Some("took too long"));
    assert_eq!(child.parent(), Some(&with_default));
}

#[test]
fn test_go_error_empty_message_falls_back_to_default() {
    let timeout = ErrorKind::root().suberror("TimeoutError", Some("took too long"));
    assert_eq!(
        timeout.new_error(Some("")).to_string(),
        "[TimeoutError: took too long]"
    );
    assert_eq!(ErrorKind::root().new_error(Some("")).to_string(), "[GoError]");
}

#[test]
fn test_go_error_exposes_cause() {
    let err = ErrorKind::root()
        .suberror("SaveError", None)
        .new_error(Some("could not save"))
        .with_cause(TransportError::Network {
            url: "/campaigns/1".to_string(),
            message: "connection reset".to_string(),
        });
    let source = err.source().expect("cause should be the source");
    assert!(source.to_string().contains("connection reset"));
}

#[test]
fn test_message_templates() {
    assert_eq!(
        MessageTemplate::format("{name} successful!").render("Save"),
        "Save successful!"
    );
    assert_eq!(MessageTemplate::format("Done").render("Save"), "Done");
    assert_eq!(
        MessageTemplate::dynamic(|name| name.to_uppercase()).render("Save"),
        "SAVE"
    );
}

#[test]
fn test_endpoint_owner_display() {
    assert_eq!(
        EndpointOwner::Channel("ch1".to_string()).to_string(),
        "channel 'ch1'"
    );
    assert_eq!(
        EndpointOwner::RoutingBlock("rb1".to_string(), BlockSide::Channel).to_string(),
        "routing block 'rb1' (channel side)"
    );
}

//! End-to-end pipeline flow tests
//!
//! Wires an input channel, a namespace filter, and a root-element router,
//! then drives XML payloads through the flow and asserts which channel each
//! one lands on. XML evaluation stays outside the core: the predicate and
//! key function supplied here do the payload inspection with plain regexes.

use msgflow::{
    ContentFilter, ContentRouter, FlowError, FlowResult, Message, MessageChannel, Pipeline,
    RoutingTable,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;
use tokio_test::assert_ok;

/// Root element name, with an optional prefix group and the local name
static ROOT_ELEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<\s*(?:([A-Za-z_][\w.-]*):)?([A-Za-z_][\w.-]*)").expect("static pattern parses")
});

/// Default namespace declaration on the root element
static DEFAULT_XMLNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"xmlns\s*=\s*"([^"]*)""#).expect("static pattern parses"));

fn root_namespace(payload: &str) -> Option<&str> {
    DEFAULT_XMLNS
        .captures(payload)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

fn root_local_name(payload: &str) -> FlowResult<String> {
    ROOT_ELEMENT
        .captures(payload)
        .and_then(|captures| captures.get(2))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| FlowError::processing(format!("payload has no root element: {payload}")))
}

struct XmlFlow {
    pipeline: Pipeline,
    wrong_messages: MessageChannel,
    splitting: MessageChannel,
    received: MessageChannel,
}

/// input -> namespace filter -> local-name router, with `wrong_messages`
/// doubling as both the filter's discard channel and the router's default
fn build_xml_flow() -> XmlFlow {
    let input = MessageChannel::unbounded("input");
    let filtered = MessageChannel::unbounded("filtered");
    let wrong_messages = MessageChannel::unbounded("wrong_messages");
    let splitting = MessageChannel::unbounded("splitting");
    let received = MessageChannel::unbounded("received");

    let filter = ContentFilter::new(
        |message: &Message| -> FlowResult<bool> {
            Ok(root_namespace(message.payload()) == Some("my:namespace"))
        },
        filtered.clone(),
    )
    .with_discard_channel(wrong_messages.clone());

    let table = RoutingTable::builder()
        .route("Tags", splitting.clone())
        .unwrap()
        .route("Tag", received.clone())
        .unwrap()
        .default_channel(wrong_messages.clone())
        .resolution_required(false)
        .build();
    let router = ContentRouter::new(
        |message: &Message| -> FlowResult<String> { root_local_name(message.payload()) },
        table,
    );

    let pipeline = Pipeline::builder()
        .input(input.clone())
        .stage(input, filter)
        .stage(filtered, router)
        .build()
        .unwrap();

    XmlFlow {
        pipeline,
        wrong_messages,
        splitting,
        received,
    }
}

const RECEIVE_DEADLINE: Duration = Duration::from_secs(10);

#[tokio::test]
async fn test_xml_messages_route_by_namespace_and_root_element() {
    let flow = build_xml_flow();

    // No namespace: rejected by the filter, diverted to wrong_messages
    assert_ok!(flow.pipeline.send(Message::new("<foo/>")));
    assert!(flow.wrong_messages.receive(RECEIVE_DEADLINE).await.is_some());

    // Right namespace but unmapped root: router falls back to the default
    assert_ok!(flow
        .pipeline
        .send(Message::new("<foo xmlns=\"my:namespace\"/>")));
    assert!(flow.wrong_messages.receive(RECEIVE_DEADLINE).await.is_some());

    // Mapped roots land on their mapped channels
    assert_ok!(flow
        .pipeline
        .send(Message::new("<Tags xmlns=\"my:namespace\"/>")));
    assert!(flow.splitting.receive(RECEIVE_DEADLINE).await.is_some());

    assert_ok!(flow
        .pipeline
        .send(Message::new("<Tag xmlns=\"my:namespace\"/>")));
    assert!(flow.received.receive(RECEIVE_DEADLINE).await.is_some());
}

#[tokio::test]
async fn test_routed_message_lands_on_exactly_one_channel() {
    let flow = build_xml_flow();

    flow.pipeline
        .send(Message::new("<Tag xmlns=\"my:namespace\"/>"))
        .unwrap();
    assert!(flow.received.receive(RECEIVE_DEADLINE).await.is_some());

    assert!(flow.wrong_messages.try_receive().await.is_none());
    assert!(flow.splitting.try_receive().await.is_none());
    assert!(flow.received.try_receive().await.is_none());
}

#[tokio::test]
async fn test_repeated_payloads_preserve_channel_order() {
    let flow = build_xml_flow();

    for i in 0..5 {
        let message = Message::builder("<Tag xmlns=\"my:namespace\"/>")
            .header("sequence", serde_json::json!(i))
            .build();
        flow.pipeline.send(message).unwrap();
    }

    for i in 0..5 {
        let message = flow
            .received
            .receive(RECEIVE_DEADLINE)
            .await
            .expect("all five messages should arrive");
        assert_eq!(message.header("sequence"), Some(&serde_json::json!(i)));
    }
}

#[tokio::test]
async fn test_payload_without_root_element_is_delivered_nowhere() {
    // A payload that passes the filter but defeats the key function is a
    // processing error inside the router stage: logged, not delivered.
    let flow = build_xml_flow();

    flow.pipeline
        .send(Message::new("xmlns=\"my:namespace\""))
        .unwrap();
    // Let the workers chew on it before checking the outputs
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(flow.wrong_messages.try_receive().await.is_none());
    assert!(flow.splitting.try_receive().await.is_none());
    assert!(flow.received.try_receive().await.is_none());
}

#[test]
fn test_root_local_name_strips_prefix() {
    assert_eq!(
        root_local_name("<ns2:Tags xmlns:ns2=\"my:namespace\"/>").unwrap(),
        "Tags"
    );
    assert_eq!(root_local_name("<foo/>").unwrap(), "foo");
}

#[test]
fn test_root_local_name_rejects_elementless_payload() {
    let error = root_local_name("no markup here").unwrap_err();
    assert!(matches!(error, FlowError::Processing { .. }));
}

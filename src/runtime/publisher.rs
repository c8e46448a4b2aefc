//! Publish request handling and outbox implementations.
//!
//! This module provides the two `PublishOutbox` implementations shipped with
//! the crate: a buffer that collects requests for the caller to drain, and a
//! channel-backed handle that hands requests to the transport task.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use heapless::{String, Vec};

use super::traits::PublishOutbox;

/// An owned publish request with inline storage for topic and payload.
///
/// This allows outboxes to store requests without requiring the original
/// data to remain borrowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedPublishRequest<const TOPIC_SIZE: usize, const PAYLOAD_SIZE: usize> {
    /// The topic (stored inline)
    pub topic: String<TOPIC_SIZE>,
    /// The payload (stored inline)
    pub payload: Vec<u8, PAYLOAD_SIZE>,
    /// Whether the broker should retain the message
    pub retain: bool,
}

impl<const TOPIC_SIZE: usize, const PAYLOAD_SIZE: usize>
    OwnedPublishRequest<TOPIC_SIZE, PAYLOAD_SIZE>
{
    /// Copy a request into inline storage.
    ///
    /// Returns `None` if the topic or the payload is too large.
    pub fn new(topic: &str, payload: &[u8], retain: bool) -> Option<Self> {
        let mut topic_str = String::new();
        topic_str.push_str(topic).ok()?;

        let mut payload_vec = Vec::new();
        payload_vec.extend_from_slice(payload).ok()?;

        Some(Self {
            topic: topic_str,
            payload: payload_vec,
            retain,
        })
    }
}

pub type PublishRequestChannel<
    const OUTBOX_DEPTH: usize,
    const TOPIC_SIZE: usize,
    const PAYLOAD_SIZE: usize,
> = Channel<CriticalSectionRawMutex, OwnedPublishRequest<TOPIC_SIZE, PAYLOAD_SIZE>, OUTBOX_DEPTH>;

pub type PublishRequestSender<
    'a,
    const OUTBOX_DEPTH: usize,
    const TOPIC_SIZE: usize,
    const PAYLOAD_SIZE: usize,
> = Sender<
    'a,
    CriticalSectionRawMutex,
    OwnedPublishRequest<TOPIC_SIZE, PAYLOAD_SIZE>,
    OUTBOX_DEPTH,
>;

pub type PublishRequestReceiver<
    'a,
    const OUTBOX_DEPTH: usize,
    const TOPIC_SIZE: usize,
    const PAYLOAD_SIZE: usize,
> = Receiver<
    'a,
    CriticalSectionRawMutex,
    OwnedPublishRequest<TOPIC_SIZE, PAYLOAD_SIZE>,
    OUTBOX_DEPTH,
>;

/// A handle that lets entities publish without direct access to the client.
///
/// This handle wraps a channel sender and can be copied into multiple tasks.
/// The transport task receives the requests and performs the actual publish.
#[derive(Clone, Copy)]
pub struct PublisherHandle<
    'a,
    const OUTBOX_DEPTH: usize,
    const TOPIC_SIZE: usize,
    const PAYLOAD_SIZE: usize,
> {
    tx: PublishRequestSender<'a, OUTBOX_DEPTH, TOPIC_SIZE, PAYLOAD_SIZE>,
}

impl<'a, const OUTBOX_DEPTH: usize, const TOPIC_SIZE: usize, const PAYLOAD_SIZE: usize>
    PublisherHandle<'a, OUTBOX_DEPTH, TOPIC_SIZE, PAYLOAD_SIZE>
{
    /// Create a new `PublisherHandle` from a channel sender.
    pub fn new(tx: PublishRequestSender<'a, OUTBOX_DEPTH, TOPIC_SIZE, PAYLOAD_SIZE>) -> Self {
        Self { tx }
    }

    /// Try to queue a message without waiting.
    ///
    /// Returns `false` if the channel is full or the message is too large.
    pub fn try_publish(&self, topic: &str, payload: &[u8], retain: bool) -> bool {
        OwnedPublishRequest::new(topic, payload, retain)
            .is_some_and(|req| self.tx.try_send(req).is_ok())
    }
}

impl<const OUTBOX_DEPTH: usize, const TOPIC_SIZE: usize, const PAYLOAD_SIZE: usize> PublishOutbox
    for PublisherHandle<'_, OUTBOX_DEPTH, TOPIC_SIZE, PAYLOAD_SIZE>
{
    fn publish(&mut self, topic: &str, payload: &[u8], retain: bool) -> bool {
        self.try_publish(topic, payload, retain)
    }
}

/// A buffered outbox that collects publish requests.
///
/// The transport drives a module with this outbox, then publishes the
/// collected requests and clears it.
///
/// # Type Parameters
///
/// - `CAPACITY`: Maximum number of publish requests that can be buffered
/// - `TOPIC_SIZE`: Maximum topic string length
/// - `PAYLOAD_SIZE`: Maximum payload size
pub struct BufferedOutbox<const CAPACITY: usize, const TOPIC_SIZE: usize, const PAYLOAD_SIZE: usize>
{
    requests: Vec<OwnedPublishRequest<TOPIC_SIZE, PAYLOAD_SIZE>, CAPACITY>,
}

impl<const CAPACITY: usize, const TOPIC_SIZE: usize, const PAYLOAD_SIZE: usize>
    BufferedOutbox<CAPACITY, TOPIC_SIZE, PAYLOAD_SIZE>
{
    /// Create a new empty buffered outbox.
    pub fn new() -> Self {
        Self {
            requests: Vec::new(),
        }
    }

    /// Iterate over the buffered requests in publish order.
    pub fn iter(&self) -> impl Iterator<Item = &OwnedPublishRequest<TOPIC_SIZE, PAYLOAD_SIZE>> {
        self.requests.iter()
    }

    /// Find the last request published on `topic`.
    pub fn last_on(&self, topic: &str) -> Option<&OwnedPublishRequest<TOPIC_SIZE, PAYLOAD_SIZE>> {
        self.requests.iter().rev().find(|req| req.topic.as_str() == topic)
    }

    /// Clear all buffered requests.
    pub fn clear(&mut self) {
        self.requests.clear();
    }

    /// Check if the outbox is empty.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Get the number of buffered requests.
    pub fn len(&self) -> usize {
        self.requests.len()
    }
}

impl<const CAPACITY: usize, const TOPIC_SIZE: usize, const PAYLOAD_SIZE: usize> Default
    for BufferedOutbox<CAPACITY, TOPIC_SIZE, PAYLOAD_SIZE>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAPACITY: usize, const TOPIC_SIZE: usize, const PAYLOAD_SIZE: usize> PublishOutbox
    for BufferedOutbox<CAPACITY, TOPIC_SIZE, PAYLOAD_SIZE>
{
    fn publish(&mut self, topic: &str, payload: &[u8], retain: bool) -> bool {
        OwnedPublishRequest::new(topic, payload, retain)
            .is_some_and(|req| self.requests.push(req).is_ok())
    }
}

//! Subscription list filled by modules on connection.

use heapless::{String, Vec};

use super::traits::TopicCollector;
use crate::topic::MAX_TOPIC_LEN;

/// Owned set of command topics to subscribe to.
///
/// Modules fill it through [`TopicCollector`] during `on_connected`; the
/// transport then subscribes to every entry. Topics are copied, kept in
/// insertion order and stored once even when several modules add the same
/// topic.
///
/// `TOPIC_SIZE` bounds each topic and defaults to the entity topic capacity.
///
/// ```ignore
/// let mut subscriptions = TopicRegistry::<8>::new();
/// light.on_connected(&mut outbox, &mut subscriptions);
///
/// for topic in subscriptions.iter() {
///     client.subscribe(topic).await?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct TopicRegistry<const MAX_TOPICS: usize, const TOPIC_SIZE: usize = MAX_TOPIC_LEN> {
    entries: Vec<String<TOPIC_SIZE>, MAX_TOPICS>,
}

impl<const MAX_TOPICS: usize, const TOPIC_SIZE: usize> TopicRegistry<MAX_TOPICS, TOPIC_SIZE> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Store a copy of `topic`.
    ///
    /// A topic that is already present counts as stored. Fails when the topic
    /// exceeds `TOPIC_SIZE` or no slot is left.
    pub fn add_topic(&mut self, topic: &str) -> bool {
        if self.contains(topic) {
            return true;
        }
        let Ok(entry) = String::try_from(topic) else {
            return false;
        };
        self.entries.push(entry).is_ok()
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.entries.iter().any(|entry| entry.as_str() == topic)
    }

    /// Stored topics, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every topic, e.g. before the next connection.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<const MAX_TOPICS: usize, const TOPIC_SIZE: usize> Default
    for TopicRegistry<MAX_TOPICS, TOPIC_SIZE>
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const MAX_TOPICS: usize, const TOPIC_SIZE: usize> TopicCollector
    for TopicRegistry<MAX_TOPICS, TOPIC_SIZE>
{
    fn add(&mut self, topic: &str) -> bool {
        self.add_topic(topic)
    }
}

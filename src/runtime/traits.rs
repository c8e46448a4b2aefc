//! MQTT Module trait and utilities.
//!
//! This module defines the object-safe `MqttModule` trait that entities
//! implement, and the two narrow traits through which they reach the
//! transport: `PublishOutbox` and `TopicCollector`.
//!
//! # Object Safety
//!
//! The traits are dyn-compatible, so a transport task can drive
//! `&mut dyn MqttModule` without knowing which entities it serves, and
//! entities can publish through `&mut dyn PublishOutbox` without knowing the
//! transport.
//!
//! # Publishing Pattern
//!
//! Modules never perform async I/O directly. A publish is a synchronous
//! request that either gets accepted by the outbox (`true`) or refused
//! (`false`). Delivery, retries and QoS belong to the transport.

/// Object-safe trait for queuing MQTT publish requests.
///
/// # Example
///
/// ```ignore
/// fn announce(outbox: &mut dyn PublishOutbox) -> bool {
///     outbox.publish("aha/device/avty_t", b"online", true)
/// }
/// ```
pub trait PublishOutbox {
    /// Queue a message for publishing.
    ///
    /// This is synchronous and returns immediately.
    ///
    /// # Arguments
    ///
    /// - `topic`: The MQTT topic to publish to
    /// - `payload`: The message payload bytes
    /// - `retain`: Whether the broker should retain the message
    ///
    /// Returns `true` if the message was accepted.
    fn publish(&mut self, topic: &str, payload: &[u8], retain: bool) -> bool;
}

/// Object-safe trait for collecting topics to subscribe to.
pub trait TopicCollector {
    /// Add a topic to subscribe to.
    ///
    /// The topic string is copied internally, so it only needs to live
    /// for the duration of this call.
    ///
    /// Returns `true` if the topic was added, `false` if the collector is full.
    fn add(&mut self, topic: &str) -> bool;
}

/// An inbound MQTT message, borrowed from the transport's receive buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message<'a> {
    /// The topic the message arrived on
    pub topic: &'a str,
    /// The raw payload
    pub payload: &'a [u8],
}

impl<'a> Message<'a> {
    pub const fn new(topic: &'a str, payload: &'a [u8]) -> Self {
        Self { topic, payload }
    }
}

/// Object-safe trait for MQTT modules driven by a transport.
///
/// # Example
///
/// ```ignore
/// const CMD_TOPIC: &str = "device/cmd";
/// const STATE_TOPIC: &str = "device/state";
///
/// struct MyModule;
///
/// impl MqttModule for MyModule {
///     fn register(&self, collector: &mut dyn TopicCollector) {
///         collector.add(CMD_TOPIC);
///     }
///
///     fn on_message(&mut self, msg: &Message<'_>, outbox: &mut dyn PublishOutbox) {
///         if msg.topic == CMD_TOPIC {
///             outbox.publish(STATE_TOPIC, msg.payload, true);
///         }
///     }
/// }
/// ```
pub trait MqttModule {
    /// Register topics that this module wants to subscribe to.
    ///
    /// Called after every (re)connection, once `on_start` has run.
    fn register(&self, collector: &mut dyn TopicCollector);

    /// Handle an incoming MQTT message.
    ///
    /// Called for every incoming publish. The module checks whether
    /// `msg.topic` is one of its topics and ignores the message otherwise.
    fn on_message(&mut self, msg: &Message<'_>, outbox: &mut dyn PublishOutbox);

    /// Called after every (re)connection, before subscriptions are made.
    ///
    /// Use this for discovery announces and state publishing.
    /// The default implementation does nothing.
    fn on_start(&mut self, _outbox: &mut dyn PublishOutbox) {}

    /// Connection established: announce first, then subscribe.
    fn on_connected(
        &mut self,
        outbox: &mut dyn PublishOutbox,
        collector: &mut dyn TopicCollector,
    ) {
        self.on_start(outbox);
        self.register(collector);
    }
}

/// A composite module that combines two modules into one.
///
/// Both modules receive all messages and connection events. Nest pairs to
/// drive several entities from one transport.
///
/// # Example
///
/// ```ignore
/// let lights = ModulePair::new(ceiling_light, desk_light);
/// ```
pub struct ModulePair<M1, M2> {
    /// First module
    pub first: M1,
    /// Second module
    pub second: M2,
}

impl<M1, M2> ModulePair<M1, M2> {
    /// Create a new combined module from two modules.
    pub fn new(first: M1, second: M2) -> Self {
        Self { first, second }
    }
}

impl<M1, M2> MqttModule for ModulePair<M1, M2>
where
    M1: MqttModule,
    M2: MqttModule,
{
    fn register(&self, collector: &mut dyn TopicCollector) {
        self.first.register(collector);
        self.second.register(collector);
    }

    fn on_message(&mut self, msg: &Message<'_>, outbox: &mut dyn PublishOutbox) {
        self.first.on_message(msg, outbox);
        self.second.on_message(msg, outbox);
    }

    fn on_start(&mut self, outbox: &mut dyn PublishOutbox) {
        self.first.on_start(outbox);
        self.second.on_start(outbox);
    }
}

/// Blanket implementation for mutable references to trait objects.
///
/// This allows using `&mut dyn MqttModule` wherever `MqttModule` is expected.
impl<M: MqttModule + ?Sized> MqttModule for &mut M {
    fn register(&self, collector: &mut dyn TopicCollector) {
        (**self).register(collector)
    }

    fn on_message(&mut self, msg: &Message<'_>, outbox: &mut dyn PublishOutbox) {
        (**self).on_message(msg, outbox)
    }

    fn on_start(&mut self, outbox: &mut dyn PublishOutbox) {
        (**self).on_start(outbox)
    }
}

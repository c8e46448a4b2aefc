//! MQTT Runtime Seam
//!
//! The narrow interface between entities and the MQTT transport.
//!
//! # Overview
//!
//! Entities implement [`MqttModule`] and never talk to the client directly:
//! - on (re)connection they announce themselves through a [`PublishOutbox`]
//!   and list their command topics through a [`TopicCollector`];
//! - every inbound message is offered to them as a [`Message`];
//! - application code calls their setters with an outbox of its choice.
//!
//! Two outboxes are provided: [`BufferedOutbox`] collects requests for the
//! caller to publish, [`PublisherHandle`] forwards them over an
//! `embassy-sync` channel to the transport task.

pub(crate) mod publisher;
pub(crate) mod registry;
pub(crate) mod traits;

pub use publisher::{
    BufferedOutbox, OwnedPublishRequest, PublishRequestChannel, PublishRequestReceiver,
    PublishRequestSender, PublisherHandle,
};
pub use registry::TopicRegistry;
pub use traits::{Message, ModulePair, MqttModule, PublishOutbox, TopicCollector};

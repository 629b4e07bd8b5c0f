//! mediatop core: framing, classification, decoding, and the mailbox pipeline
//! between the host link and the render loop.
//!
//! Byte flow: transport bytes -> [`framer::LineFramer`] -> [`classify`] ->
//! {[`artwork`] | [`snapshot`] | ack} -> [`hub::Hub`] mailbox, which the
//! render loop polls once per frame via [`Hub::try_take_snapshot`].

pub mod artwork;
pub mod bounded;
pub mod classify;
pub mod command;
pub mod framer;
pub mod hub;
pub mod ingest;
pub mod mailbox;
pub mod profiles;
pub mod snapshot;
pub mod transport;

pub use hub::{AckState, Hub};
pub use snapshot::Snapshot;

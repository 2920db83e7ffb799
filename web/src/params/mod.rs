//! Typed request bodies for the dispatch endpoints.
//!
//! Bodies are deserialized into these types and checked here, before anything
//! reaches the delivery layer, so handlers only ever pass validated data on.

pub(crate) mod notification;

//! View-local state for the inbox.
//!
//! DESIGN
//! ======
//! Plain structs with synchronous mutators and no timers. The `inbox` event
//! loop owns one of each and decides when to call them, which keeps every
//! rule here testable without a runtime.

pub mod assistant;
pub mod composer;
pub mod conversation;
pub mod viewport;

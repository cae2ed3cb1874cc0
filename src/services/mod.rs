//! Collaborators injected into the inbox view.
//!
//! ARCHITECTURE
//! ============
//! Everything nondeterministic (response generation, randomness, wall clock,
//! timers) sits behind a small interface here so the view can be driven
//! deterministically in tests.

pub mod clock;
pub mod random;
pub mod responder;
pub mod timers;

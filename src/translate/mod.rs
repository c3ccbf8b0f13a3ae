//! Bidirectional schema translation between the Firebender message envelope
//! and the backend chat-completions envelope.

pub mod firebender_types;
pub mod openai_types;
pub mod request;
pub mod response;

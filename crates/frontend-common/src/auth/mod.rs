//! Session context and user-facing auth messages

pub mod context;
pub mod error_messages;

pub use context::{PortalContext, PortalProvider, use_portal, use_session};
pub use error_messages::user_message;

pub mod bridge;
pub mod session;

pub use bridge::StorefrontBridge;
pub use session::{BrowserConfig, BrowserKind, new_session};

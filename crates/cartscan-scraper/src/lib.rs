pub mod error;
pub mod extract;
pub mod merge;
pub mod normalize;
pub mod orchestrate;
pub mod session;

pub use error::ScraperError;
pub use extract::{platform_specs, PlatformSpec};
pub use merge::merge;
pub use normalize::{clean_text, extract_price};
pub use orchestrate::Orchestrator;
pub use session::{ElementHandle, RenderSession, SessionFactory};

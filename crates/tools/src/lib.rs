pub mod browser;
pub mod qa;
pub mod registry;
pub mod traits;

pub use browser::{normalize_url, BrowserCapability, BrowserOpener, SystemBrowser, BROWSER_CAPABILITY};
pub use qa::{QaCapability, QA_CAPABILITY};
pub use registry::CapabilityRegistry;
pub use traits::{Arguments, Capability, CapabilityContext, CapabilityError};

pub mod deepseek;
pub mod traits;

pub use deepseek::{DeepSeekProvider, ProviderSettings};
pub use traits::{ChatBackend, Message, ProviderError, Role};

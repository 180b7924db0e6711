pub mod buffer;

pub use buffer::ConversationBuffer;

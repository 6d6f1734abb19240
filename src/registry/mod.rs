pub mod sink;

pub use sink::{ChannelRegistry, LogRegistry, MemoryRegistry, Registry};

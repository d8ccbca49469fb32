pub mod file_sink;
pub mod session_hook;
pub mod transport;

pub use file_sink::FileSink;
pub use session_hook::SessionHook;
pub use transport::{ChunkStream, Transport, TransportResponse};

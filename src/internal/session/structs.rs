pub mod download_error;
pub mod download_hooks_container;
pub(crate) mod hook_adapters;
pub mod download_session;
pub mod download_session_manager;
pub mod download_status;
pub mod saved_artifact;
pub mod session_config;

// 重导出公共类型
pub use download_error::{DownloadError, GENERIC_FAILURE_MESSAGE, SinkError, TransportError};
pub use download_hooks_container::DownloadHooksContainer;
pub use download_session::DownloadSession;
pub use download_session_manager::DownloadSessionManager;
pub use download_status::DownloadStatus;
pub use saved_artifact::SavedArtifact;
pub use session_config::{DEFAULT_CONTENT_TYPE, SessionConfig};

//! 保存接口：宿主环境的“另存为文件”能力。

use async_trait::async_trait;

use crate::internal::session::structs::download_error::SinkError;
use crate::internal::session::structs::saved_artifact::SavedArtifact;

/// 接收完整下载结果并持久化。
///
/// 会话管理器只会在数据流完整结束后调用一次，
/// 实现方需要保证写入失败时不留下部分文件。
#[async_trait]
pub trait FileSink: Send + Sync {
    async fn save(&self, artifact: SavedArtifact) -> Result<(), SinkError>;
}

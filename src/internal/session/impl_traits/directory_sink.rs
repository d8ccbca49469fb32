//! 保存到本地目录：先写临时文件，完整写入后再重命名。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::internal::session::structs::download_error::SinkError;
use crate::internal::session::structs::saved_artifact::SavedArtifact;
use crate::internal::session::traits::file_sink::FileSink;

/// 保存到指定目录的文件接收器。
///
/// 写入 `.<filename>.part` 后重命名为 `<filename>`，写入失败时删除临时文件，
/// 目录中不会出现不完整的目标文件。
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// 用户的下载目录（如 `~/Downloads`）
    pub fn downloads() -> Result<Self, SinkError> {
        dirs::download_dir()
            .map(Self::new)
            .ok_or(SinkError::NoDirectory)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 目标文件路径；文件名不能为空、不能包含路径分隔符。
    pub fn target_path(&self, filename: &str) -> Result<PathBuf, SinkError> {
        let valid = !filename.is_empty()
            && filename != "."
            && filename != ".."
            && !filename.contains(['/', '\\', '\0']);
        if !valid {
            return Err(SinkError::InvalidFileName(filename.to_string()));
        }
        Ok(self.dir.join(filename))
    }

    fn temp_path(&self, filename: &str) -> PathBuf {
        self.dir.join(format!(".{filename}.part"))
    }

    async fn write_temp(path: &Path, bytes: &[u8]) -> Result<(), SinkError> {
        let mut file = tokio::fs::File::create(path)
            .await
            .map_err(SinkError::WriteFile)?;
        file.write_all(bytes).await.map_err(SinkError::WriteFile)?;
        file.flush().await.map_err(SinkError::WriteFile)?;
        file.sync_all().await.map_err(SinkError::WriteFile)?;
        Ok(())
    }
}

#[async_trait]
impl FileSink for DirectorySink {
    async fn save(&self, artifact: SavedArtifact) -> Result<(), SinkError> {
        let target = self.target_path(&artifact.filename)?;
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(SinkError::CreateDir)?;

        let temp = self.temp_path(&artifact.filename);
        if let Err(e) = Self::write_temp(&temp, &artifact.bytes).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e);
        }
        if let Err(e) = tokio::fs::rename(&temp, &target).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(SinkError::Rename(e));
        }

        debug!(
            path = %target.display(),
            bytes = artifact.bytes.len(),
            content_type = %artifact.content_type,
            "artifact saved"
        );
        Ok(())
    }
}

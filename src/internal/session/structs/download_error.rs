//! 下载相关错误类型。
//!
//! 这些错误不会抛给 `start_download` 的调用方，只通过会话的 `status` / `error` 字段呈现，
//! 所以 Display 文本就是界面上展示的错误信息。

use thiserror::Error;

/// 会话错误信息为空时的兜底文案
pub const GENERIC_FAILURE_MESSAGE: &str = "Download failed";

/// 传输层错误（请求失败、读流失败）。
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

/// 保存文件失败。
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),

    #[error("No download directory available")]
    NoDirectory,

    #[error("Failed to create directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Failed to write file: {0}")]
    WriteFile(std::io::Error),

    #[error("Failed to finalize file: {0}")]
    Rename(std::io::Error),
}

/// 单次下载尝试的失败原因。
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Invalid download URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Download failed with status {status}{}", reason_suffix(.reason))]
    HttpStatus {
        status: u16,
        reason: Option<String>,
    },

    #[error("Download failed: response has no body")]
    MissingBody,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Download incomplete: received {received} of {expected} bytes")]
    Truncated { expected: u64, received: u64 },

    #[error("Download stalled: no data received for {0} ms")]
    Stalled(u64),

    #[error(transparent)]
    Save(#[from] SinkError),

    #[error("Download cancelled")]
    Cancelled,
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason.as_deref().map(|r| format!(" {r}")).unwrap_or_default()
}

impl DownloadError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// 写入会话 `error` 字段的文案，空信息时使用 [`GENERIC_FAILURE_MESSAGE`]。
    pub fn session_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    }
}

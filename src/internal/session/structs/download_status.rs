use serde::Serialize;

/// 下载会话状态（由会话管理器内部维护，外部只读监听）
///
/// 单次尝试内只能单向推进：
/// `Idle → Preparing → Downloading → Complete | Error | Cancelled`，
/// `Preparing` 也可以直接进入 `Error` / `Cancelled`。
/// 回到 `Idle` 只能通过显式 reset。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    #[default]
    Idle,
    Preparing,
    Downloading,
    Complete,
    Error,
    Cancelled,
}

impl DownloadStatus {
    /// 正在进行中（可以取消）
    pub fn is_active(self) -> bool {
        matches!(self, Self::Preparing | Self::Downloading)
    }

    /// 终态：完成、失败或取消
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Error | Self::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Preparing => "preparing",
            Self::Downloading => "downloading",
            Self::Complete => "complete",
            Self::Error => "error",
            Self::Cancelled => "cancelled",
        }
    }

    /// 单次尝试内是否允许从 `self` 推进到 `next`。
    ///
    /// `Downloading → Downloading` 用于逐块发布进度。
    pub(crate) fn can_advance_to(self, next: DownloadStatus) -> bool {
        use DownloadStatus::*;
        matches!(
            (self, next),
            (Idle, Preparing)
                | (Preparing, Downloading)
                | (Preparing, Error)
                | (Preparing, Cancelled)
                | (Downloading, Downloading)
                | (Downloading, Complete)
                | (Downloading, Error)
                | (Downloading, Cancelled)
        )
    }
}

impl std::fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

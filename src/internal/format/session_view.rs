//! 进度对话框的展示模型：由会话快照纯计算得出，不涉及渲染。

use chrono::{DateTime, Utc};

use crate::internal::session::structs::download_session::DownloadSession;
use crate::internal::session::structs::download_status::DownloadStatus;

use super::byte_size::format_bytes;
use super::time_remaining::format_time_remaining;

/// 对话框上可用的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Cancel,
    Retry,
    Close,
}

/// 进度条的显示方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressDisplay {
    /// idle 或终态（非完成）不显示进度条
    Hidden,
    /// 总大小未知：只显示已下载量
    Indeterminate { downloaded: String },
    Determinate {
        percentage: u8,
        downloaded: String,
        total: String,
        eta: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub headline: &'static str,
    pub progress: ProgressDisplay,
    /// 错误信息，或取消时的中性说明
    pub detail: Option<String>,
    pub actions: Vec<SessionAction>,
}

impl SessionView {
    pub fn new(session: &DownloadSession, now: DateTime<Utc>) -> Self {
        use DownloadStatus::*;

        let headline = match session.status {
            Idle => "Ready to download",
            Preparing => "Preparing download...",
            Downloading => "Downloading...",
            Complete => "Download complete",
            Error => "Download failed",
            Cancelled => "Download cancelled",
        };

        let progress = match session.status {
            Downloading if session.is_indeterminate() => ProgressDisplay::Indeterminate {
                downloaded: format_bytes(session.bytes_downloaded),
            },
            Downloading | Complete => ProgressDisplay::Determinate {
                percentage: session.percentage,
                downloaded: format_bytes(session.bytes_downloaded),
                total: format_bytes(session.total_bytes.max(session.bytes_downloaded)),
                eta: format_time_remaining(
                    session.bytes_downloaded,
                    session.total_bytes,
                    session.elapsed_ms(now),
                ),
            },
            Preparing => ProgressDisplay::Indeterminate {
                downloaded: format_bytes(0),
            },
            Idle | Error | Cancelled => ProgressDisplay::Hidden,
        };

        let detail = match session.status {
            Error => session.error.clone(),
            Cancelled => Some("The download was stopped. No file was saved.".to_string()),
            _ => None,
        };

        let actions = match session.status {
            Preparing | Downloading => vec![SessionAction::Cancel],
            Error | Cancelled => vec![SessionAction::Retry, SessionAction::Close],
            Complete => vec![SessionAction::Close],
            Idle => Vec::new(),
        };

        Self {
            headline,
            progress,
            detail,
            actions,
        }
    }
}

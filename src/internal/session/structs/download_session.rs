use chrono::{DateTime, Utc};
use serde::Serialize;

use super::download_status::DownloadStatus;

/// 下载会话快照：呈现层唯一需要读取的状态。
///
/// 序列化字段为 camelCase（`bytesDownloaded`、`totalBytes`、`startTime`），
/// 便于直接交给前端渲染。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadSession {
    pub status: DownloadStatus,
    /// 本次尝试已收到的字节数，单调不减
    pub bytes_downloaded: u64,
    /// 服务器声明的总大小（content-length），未知时为 0
    pub total_bytes: u64,
    /// 0～100；总大小未知时保持 0
    pub percentage: u8,
    /// 仅在 `Error` 状态下存在
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// 进入 `Preparing` 时记录
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
}

impl DownloadSession {
    /// 初始状态：idle、计数清零、无错误、无开始时间。
    pub fn idle() -> Self {
        Self::default()
    }

    pub(crate) fn preparing(start_time: DateTime<Utc>) -> Self {
        Self {
            status: DownloadStatus::Preparing,
            start_time: Some(start_time),
            ..Self::default()
        }
    }

    /// 总大小未知，只能显示不确定进度。
    pub fn is_indeterminate(&self) -> bool {
        self.total_bytes == 0
    }

    /// 自 `start_time` 起经过的毫秒数；未开始时为 0。
    pub fn elapsed_ms(&self, now: DateTime<Utc>) -> u64 {
        self.start_time
            .map(|start| (now - start).num_milliseconds().max(0) as u64)
            .unwrap_or(0)
    }

    /// 记录一个新到达的数据块，并重新计算百分比。
    pub(crate) fn record_chunk(&mut self, len: u64) {
        self.bytes_downloaded += len;
        self.percentage = percentage_of(self.bytes_downloaded, self.total_bytes);
    }
}

/// `round(done / total * 100)`，总大小为 0 时返回 0，超出声明大小时封顶 100。
pub(crate) fn percentage_of(done: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (done as f64 / total as f64 * 100.0).round();
    pct.min(100.0) as u8
}

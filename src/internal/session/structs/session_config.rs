use std::time::Duration;

use serde::{Deserialize, Serialize};

/// 默认保存类型：当前用于导出 PDF
pub const DEFAULT_CONTENT_TYPE: &str = "application/pdf";

/// 会话管理器配置。
///
/// 所有字段都有默认值，可以从部分 JSON / TOML 反序列化。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// 保存文件时附带的 MIME 类型
    pub content_type: String,
    /// 空闲超时（毫秒）：等待响应头或下一个数据块超过该时长即判定失败。
    /// `None` 表示不设超时，停滞的连接会一直停在 downloading。
    pub idle_timeout_ms: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            idle_timeout_ms: None,
        }
    }
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_ms.map(Duration::from_millis)
    }
}

//! 传输层接口：会话管理器只依赖本 trait，不感知具体 HTTP 客户端。

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;
use url::Url;

use crate::internal::session::structs::download_error::TransportError;

/// 响应体：按到达顺序产出的数据块。
pub type ChunkStream = BoxStream<'static, Result<Bytes, TransportError>>;

/// 响应头到达后的结果。
pub struct TransportResponse {
    pub status: u16,
    /// 状态码的原因短语（如 `Not Found`）
    pub reason: Option<String>,
    /// `content-length` 头，缺失或无法解析时为 `None`
    pub content_length: Option<u64>,
    /// 可读响应体；没有响应体时为 `None`
    pub body: Option<ChunkStream>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl std::fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("reason", &self.reason)
            .field("content_length", &self.content_length)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// 流式下载传输层。
///
/// `open` 在响应头到达时返回；响应体通过 [`TransportResponse::body`] 逐块读取。
/// 丢弃返回的流即中止底层连接。
#[async_trait]
pub trait Transport: Send + Sync {
    async fn open(&self, url: &Url) -> Result<TransportResponse, TransportError>;
}

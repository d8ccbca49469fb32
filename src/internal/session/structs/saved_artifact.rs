use bytes::Bytes;

/// 完整组装后的下载结果，交给 [`FileSink`](crate::session::FileSink) 保存。
///
/// 只会在数据流完整结束后创建，取消或失败时不存在部分产物。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArtifact {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

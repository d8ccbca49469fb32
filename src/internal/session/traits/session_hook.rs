//! 会话钩子：同步接收每一次状态发布。
//!
//! watch 通道会合并中间值，钩子不会：每个数据块对应的状态都会按顺序送达。

use crate::internal::session::structs::download_session::DownloadSession;

/// 下载会话钩子，在发布状态或收到数据块时调用。
///
/// 钩子在下载任务内同步执行，不应做耗时操作。
pub trait SessionHook: Send {
    /// 每次状态发布后调用，顺序与发布顺序一致。
    fn on_state(&mut self, _session: &DownloadSession) {}

    /// 每收到一段数据时调用。`chunk` 为本段字节。
    fn on_chunk(&mut self, _chunk: &[u8]) {}
}

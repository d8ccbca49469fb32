//! 单阶段钩子适配器：将闭包包装成 [`SessionHook`]，供 `with_on_xx_hook` 使用。

use crate::internal::session::structs::download_session::DownloadSession;
use crate::internal::session::traits::session_hook::SessionHook;

/// 仅实现「状态发布」的钩子适配器。
pub(crate) struct OnStateHookAdapter<F>(pub(crate) F);

impl<F> SessionHook for OnStateHookAdapter<F>
where
    F: FnMut(&DownloadSession) + Send + 'static,
{
    fn on_state(&mut self, session: &DownloadSession) {
        (self.0)(session);
    }
}

/// 仅实现「每块数据」的钩子适配器。
pub(crate) struct OnChunkHookAdapter<F>(pub(crate) F);

impl<F> SessionHook for OnChunkHookAdapter<F>
where
    F: FnMut(&[u8]) + Send + 'static,
{
    fn on_chunk(&mut self, chunk: &[u8]) {
        (self.0)(chunk);
    }
}

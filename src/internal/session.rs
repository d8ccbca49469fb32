//! 下载会话领域模块：一个下载组件对应一个会话管理器。
//!
//! 对外导出以 [`crate::session`] 为准，此处仅做模块划分。
//!
//! - `structs`：会话状态、错误、配置、管理器本体
//! - `traits`：传输层、保存、钩子接口
//! - `impl_traits`：reqwest 传输层与本地目录保存

pub mod impl_traits;
pub mod structs;
pub mod traits;

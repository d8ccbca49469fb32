//! # UnlockReactiveProperty
//!
//! 轻量级响应式属性容器，基于 [`tokio::sync::watch`] 实现，读写不阻塞。
//! 内部直接复用 [`super::reactive_core::ReactiveProperty`]。
//!
//! ## 使用示例
//! ```rust,no_run
//! use download_session::states::unlock_reactive::UnlockReactiveProperty;
//!
//! let prop = UnlockReactiveProperty::new(0u64);
//! prop.update(1).unwrap();
//! prop.update(2).unwrap();
//! ```

pub use super::reactive_core::{PropertyWatcher, ReactivePropertyError as UnlockReactivePropertyError};

/// 轻量级响应式属性容器，适合高频更新场景（如下载进度）。
pub type UnlockReactiveProperty<T> = super::reactive_core::ReactiveProperty<T>;

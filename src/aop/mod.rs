//! AOP (Aspect-Oriented Programming) 模块
//!
//! 面向切面的方法拦截引擎：
//! - **切入点匹配**: 类名精确/通配符匹配 + 方法 allows/ignores 过滤
//! - **切面链**: before/around/after 责任链，终止于原始方法调用
//! - **LRU 缓存**: 切面链解析结果与代理产物的有界缓存，重复调用 O(1) 摊还
//!
//! # 使用示例
//!
//! ```ignore
//! use aopx::{AopManager, AopManagerConfig, AopProxy, Aspect, AspectRegistry};
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct LogAspect;
//!
//! impl Aspect for LogAspect {
//!     fn after(&mut self, target: &aopx::AopTarget, result: &serde_json::Value) -> anyhow::Result<()> {
//!         println!("after: {}.{} -> {}", target.target_class(), target.method(), result);
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     let registry = Arc::new(AspectRegistry::new());
//!     registry.register::<LogAspect>("LogAspect");
//!
//!     let config: AopManagerConfig = json5::from_str(r#"{
//!         aspects: [
//!             { classes: ["svc.*"], aspect: ["LogAspect"] },
//!         ],
//!     }"#)?;
//!     let manager = Arc::new(AopManager::new(config, registry)?);
//!
//!     let proxy = AopProxy::new(manager, "svc.Report", Report::new());
//!     let result = proxy.call("run", vec![], |report, _| Ok(serde_json::json!(report.run())))?;
//!     Ok(())
//! }
//! ```

pub mod aspect;
pub mod cache;
pub mod chain;
pub mod core;
pub mod manager;
pub mod pointcut;
pub mod proxy;
pub mod registry;
pub mod target;

pub use aspect::Aspect;
pub use cache::LruCache;
pub use chain::AopChain;
pub use core::AopError;
pub use manager::{AopManager, AopManagerConfig, ProxyArtifact};
pub use pointcut::{Pointcut, PointcutConfig, PointcutIndex};
pub use proxy::AopProxy;
pub use registry::AspectRegistry;
pub use target::AopTarget;

//! AopX - 面向切面的方法拦截引擎
//!
//! 给定目标对象的一次方法调用，判定哪些切面适用（类名/方法名模式匹配），
//! 将调用包装为 before/around/after 责任链执行，并缓存匹配结果与代理产物，
//! 使重复调用的开销为 O(1) 摊还。
//!
//! ## 模块
//!
//! - **aop**: 拦截引擎核心（切入点索引、切面链、LRU 缓存、管理器、代理）
//!
//! ## 设计理念
//!
//! - 🧩 **组合式代理**: 以常规装饰器替代运行时代码生成
//! - 💉 **显式依赖注入**: 启动时构造一次 AopManager，传递给需要拦截决策的协作方
//! - 🛡️ **快速失败**: 非法配置与通配符模式在注册时报错，不推迟到匹配时
//! - ⚡ **有界缓存**: 两个严格 LRU 缓存，解析与代理产物查找均为 O(1) 摊还

pub mod aop;

// 重新导出主要的公共 API
pub use aop::{
    Aspect, AspectRegistry, AopChain, AopError, AopManager, AopManagerConfig, AopProxy,
    AopTarget, LruCache, Pointcut, PointcutConfig, PointcutIndex, ProxyArtifact,
};

use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;

use super::manager::AopManager;

/// AOP 代理（装饰器）
///
/// 以组合方式替代运行时代码生成：持有被代理实例与 AopManager，被拦截的
/// 方法在调用时构造调用上下文并路由到切面链，返回链的执行结果。
/// 未被任何规则命中的类走空链，退化为直接调用。
pub struct AopProxy<T: Send + Sync + 'static> {
    manager: Arc<AopManager>,
    target_class: String,
    inner: Arc<T>,
}

impl<T: Send + Sync + 'static> AopProxy<T> {
    /// 创建代理
    pub fn new(manager: Arc<AopManager>, target_class: impl Into<String>, inner: T) -> Self {
        Self {
            manager,
            target_class: target_class.into(),
            inner: Arc::new(inner),
        }
    }

    /// 目标类名
    pub fn target_class(&self) -> &str {
        &self.target_class
    }

    /// 访问被代理实例
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// 该类是否存在切入点
    ///
    /// 判定结果按类名缓存在管理器的代理产物缓存中（作为不透明 KV 存储复用），
    /// 缓存未开启时每次重新判定。
    pub fn intercepted(&self) -> bool {
        if let Some(artifact) = self.manager.proxy_cache_get(&self.target_class) {
            if let Some(intercepted) = artifact.downcast_ref::<bool>() {
                return *intercepted;
            }
        }

        let intercepted = self.manager.is_aspect(&self.target_class, None);
        self.manager
            .proxy_cache_set(&self.target_class, Arc::new(intercepted));
        intercepted
    }

    /// 调用被拦截方法
    ///
    /// `call` 以被代理实例和当前参数执行原始方法；切面或原始方法的错误
    /// 原样传播，对调用方而言与直接调用无异。
    pub fn call(
        &self,
        method: &str,
        arguments: Vec<Value>,
        mut call: impl FnMut(&T, &[Value]) -> Result<Value>,
    ) -> Result<Value> {
        let inner = Arc::clone(&self.inner);
        self.manager.call(
            self.inner.as_ref(),
            &self.target_class,
            method,
            arguments,
            move |args| call(inner.as_ref(), args),
        )
    }
}

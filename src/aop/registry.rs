use std::collections::HashMap;
use std::sync::RwLock;

use super::aspect::Aspect;
use super::core::AopError;

/// 切面工厂：每次调用产出一个全新的切面实例
type AspectFactory = Box<dyn Fn() -> Box<dyn Aspect> + Send + Sync>;

/// 切面注册表
///
/// 按名称注册切面工厂，`make` 每次返回全新实例，保证切面不会跨独立调用
/// 持有状态。注册表在启动时构造并显式传递给 AopManager，没有全局单例。
pub struct AspectRegistry {
    factories: RwLock<HashMap<String, AspectFactory>>,
}

impl AspectRegistry {
    pub fn new() -> Self {
        Self {
            factories: RwLock::new(HashMap::new()),
        }
    }

    /// 注册实现 Default 的切面类型
    ///
    /// 重复注册同名切面会覆盖之前的注册。
    pub fn register<T>(&self, name: &str)
    where
        T: Aspect + Default + 'static,
    {
        self.register_factory(name, || Box::new(T::default()));
    }

    /// 注册自定义切面工厂
    pub fn register_factory<F>(&self, name: &str, factory: F)
    where
        F: Fn() -> Box<dyn Aspect> + Send + Sync + 'static,
    {
        let mut factories = self.factories.write().unwrap();
        factories.insert(name.to_string(), Box::new(factory));
    }

    /// 创建一个全新的切面实例
    ///
    /// 名称未注册时返回 `AopError::AspectNotRegistered`。
    pub fn make(&self, name: &str) -> Result<Box<dyn Aspect>, AopError> {
        let factories = self.factories.read().unwrap();
        match factories.get(name) {
            Some(factory) => Ok(factory()),
            None => Err(AopError::AspectNotRegistered(name.to_string())),
        }
    }

    /// 检查指定名称的切面是否已注册
    pub fn contains(&self, name: &str) -> bool {
        let factories = self.factories.read().unwrap();
        factories.contains_key(name)
    }

    /// 获取所有已注册的切面名称
    pub fn names(&self) -> Vec<String> {
        let factories = self.factories.read().unwrap();
        factories.keys().cloned().collect()
    }
}

impl Default for AspectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

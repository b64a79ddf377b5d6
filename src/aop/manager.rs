use anyhow::Result;
use serde::Deserialize;
use serde_json::Value;
use smart_default::SmartDefault;
use std::any::Any;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, RwLock};

use garde::Validate;

use super::cache::LruCache;
use super::chain::AopChain;
use super::core::normalize_class_name;
use super::pointcut::{PointcutConfig, PointcutIndex};
use super::registry::AspectRegistry;
use super::target::AopTarget;

/// AopManager 配置
#[derive(Debug, Clone, Deserialize, SmartDefault, Validate)]
#[serde(default)]
pub struct AopManagerConfig {
    /// 是否开启代理产物缓存（切面链解析缓存始终开启）
    #[default = false]
    #[garde(skip)]
    pub cache: bool,

    /// 切面链解析缓存容量（按 `类名.方法名` 索引）
    #[default = 10000]
    #[garde(range(min = 1))]
    pub aspect_cache_capacity: usize,

    /// 代理产物缓存容量（按类名索引）
    #[default = 100]
    #[garde(range(min = 1))]
    pub proxy_cache_capacity: usize,

    /// 切入点规则列表
    #[garde(skip)]
    pub aspects: Vec<PointcutConfig>,
}

/// 代理产物：代理构造方写入的不透明值
pub type ProxyArtifact = Arc<dyn Any + Send + Sync>;

/// AOP 管理器
///
/// 持有切入点索引与两个 LRU 缓存，负责切面链的解析与执行。
/// 启动时构造一次，显式传递给需要拦截决策的协作方（依赖注入，没有静态门面）。
///
/// 并发模型：索引读多写少（RwLock），两个缓存各自用 Mutex 保护，
/// key -> value 映射与淘汰在任何交错下都不会被破坏。
pub struct AopManager {
    index: RwLock<PointcutIndex>,
    registry: Arc<AspectRegistry>,
    aspect_caches: Mutex<LruCache<String, Arc<Vec<String>>>>,
    proxy_caches: Mutex<LruCache<String, ProxyArtifact>>,
    cache_enabled: bool,
}

impl AopManager {
    /// 从配置创建 AopManager
    ///
    /// 规则中的通配符模式在此处一次性编译，非法模式与非法容量快速失败。
    pub fn new(config: AopManagerConfig, registry: Arc<AspectRegistry>) -> Result<Self> {
        garde::Validate::validate(&config)?;

        let index = PointcutIndex::new(config.aspects)?;

        Ok(Self {
            index: RwLock::new(index),
            registry,
            aspect_caches: Mutex::new(LruCache::new(config.aspect_cache_capacity)?),
            proxy_caches: Mutex::new(LruCache::new(config.proxy_cache_capacity)?),
            cache_enabled: config.cache,
        })
    }

    /// 调用代理类的方法
    ///
    /// 解析 (类, 方法) 的切面链，为链上每个名称从注册表创建全新切面实例，
    /// 包装调用上下文后执行。切面或原始方法的错误原样传播，对调用方而言
    /// 与直接调用无异。
    pub fn call<'a>(
        &self,
        instance: &'a (dyn Any + Send + Sync),
        target_class: &str,
        method: &str,
        arguments: Vec<Value>,
        call: impl FnMut(&[Value]) -> Result<Value> + 'a,
    ) -> Result<Value> {
        // 获取切入点列表
        let chain_names = self.resolve_chain(target_class, method);

        let mut aspects = Vec::with_capacity(chain_names.len());
        for name in chain_names.iter() {
            aspects.push(self.registry.make(name)?);
        }

        // 包装切入点属性
        let target = AopTarget::new(instance, target_class, method, arguments, call);
        // 生成并执行切面链
        let mut chain = AopChain::new(aspects, target);
        chain.invoke()
    }

    /// 解析 (类, 方法) 的切面链
    ///
    /// 缓存 key 为 `类名.方法名`。命中直接返回（空链也是合法的缓存结果，
    /// 「未解析」与「解析为空」只能通过缓存命中与否区分）；未命中时按优先级
    /// 匹配规则、过滤方法、按首次出现顺序去重后写入缓存。
    pub fn resolve_chain(&self, target_class: &str, method: &str) -> Arc<Vec<String>> {
        let cache_key = format!("{}.{}", target_class, method);

        {
            let mut caches = self.aspect_caches.lock().unwrap();
            if let Some(chain) = caches.get(&cache_key) {
                return Arc::clone(chain);
            }
        }

        let class_name = normalize_class_name(target_class);

        let mut chain = Vec::new();
        {
            let index = self.index.read().unwrap();
            index.find_aspects(class_name, |pointcut| {
                if pointcut.applies_to_method(class_name, method) {
                    chain.extend(pointcut.aspect().iter().cloned());
                }
                true
            });
        }

        // 切面去重，保留首次出现顺序
        let mut seen = HashSet::new();
        chain.retain(|name| seen.insert(name.clone()));

        log::debug!("aop chain resolved: {} -> [{}]", cache_key, chain.join(", "));

        let chain = Arc::new(chain);
        let mut caches = self.aspect_caches.lock().unwrap();
        caches.set(cache_key, Arc::clone(&chain));
        chain
    }

    /// 是否存在切入点
    ///
    /// method 为 None 时只判断类名是否命中任一规则（首个命中即返回，
    /// 不考虑方法过滤）；否则等价于解析出的切面链非空。
    pub fn is_aspect(&self, target_class: &str, method: Option<&str>) -> bool {
        match method {
            Some(method) => !self.resolve_chain(target_class, method).is_empty(),
            None => {
                let class_name = normalize_class_name(target_class);
                let mut exist = false;
                let index = self.index.read().unwrap();
                index.find_aspects(class_name, |_| {
                    exist = true;
                    false
                });
                exist
            }
        }
    }

    /// 运行时替换切入点规则
    ///
    /// 在写锁内重建索引并清空解析缓存，与并发的匹配操作互斥。
    pub fn set_aspects(&self, rules: Vec<PointcutConfig>) -> Result<()> {
        let new_index = PointcutIndex::new(rules)?;
        {
            let mut index = self.index.write().unwrap();
            *index = new_index;
        }
        self.aspect_caches.lock().unwrap().clear();

        log::debug!("aop pointcut rules replaced, resolution cache cleared");
        Ok(())
    }

    /// 清空两个缓存（显式失效）
    pub fn clear_caches(&self) {
        self.aspect_caches.lock().unwrap().clear();
        self.proxy_caches.lock().unwrap().clear();
    }

    /// 读取代理产物缓存（缓存未开启时始终返回 None）
    pub fn proxy_cache_get(&self, target_class: &str) -> Option<ProxyArtifact> {
        if !self.cache_enabled {
            return None;
        }
        let mut caches = self.proxy_caches.lock().unwrap();
        caches.get(&target_class.to_string()).cloned()
    }

    /// 写入代理产物缓存（缓存未开启时为空操作）
    pub fn proxy_cache_set(&self, target_class: &str, artifact: ProxyArtifact) {
        if !self.cache_enabled {
            return;
        }
        let mut caches = self.proxy_caches.lock().unwrap();
        caches.set(target_class.to_string(), artifact);
    }

    /// 代理产物缓存是否开启
    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    /// 切面注册表
    pub fn registry(&self) -> &Arc<AspectRegistry> {
        &self.registry
    }
}

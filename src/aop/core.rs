use thiserror::Error;

/// AOP 相关错误类型
#[derive(Error, Debug)]
pub enum AopError {
    /// 非法配置（例如缓存容量为 0）
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// 切入点通配符模式编译失败（注册时触发，快速失败）
    #[error("Failed to compile pointcut pattern '{pattern}': {source}")]
    PatternCompilation {
        pattern: String,
        #[source]
        source: regex_lite::Error,
    },

    /// 切面未注册
    #[error("Aspect '{0}' not registered")]
    AspectNotRegistered(String),
}

/// 方法集合中的通配符标记
pub const WILDCARD: &str = "*";

/// 规范化类名：去除前导分隔符
pub(crate) fn normalize_class_name(class_name: &str) -> &str {
    class_name.trim_start_matches('.')
}

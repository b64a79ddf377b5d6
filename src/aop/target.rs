use anyhow::Result;
use serde_json::Value;
use std::any::Any;

/// 目标方法调用上下文
///
/// 携带代理实例、目标类名、方法名、参数以及调用原始方法的延迟闭包。
/// 由所属的切面链独占，生命周期为一次方法调用，不跨调用共享。
pub struct AopTarget<'a> {
    instance: &'a (dyn Any + Send + Sync),
    target_class: String,
    method: String,
    arguments: Vec<Value>,
    call: Box<dyn FnMut(&[Value]) -> Result<Value> + 'a>,
}

impl<'a> AopTarget<'a> {
    /// 创建调用上下文
    ///
    /// `call` 是调用原始方法的延迟闭包，执行时传入当前参数列表。
    pub fn new(
        instance: &'a (dyn Any + Send + Sync),
        target_class: impl Into<String>,
        method: impl Into<String>,
        arguments: Vec<Value>,
        call: impl FnMut(&[Value]) -> Result<Value> + 'a,
    ) -> Self {
        Self {
            instance,
            target_class: target_class.into(),
            method: method.into(),
            arguments,
            call: Box::new(call),
        }
    }

    /// 代理实例
    pub fn instance(&self) -> &(dyn Any + Send + Sync) {
        self.instance
    }

    /// 将代理实例向下转型为具体类型
    pub fn instance_as<T: 'static>(&self) -> Option<&T> {
        self.instance.downcast_ref::<T>()
    }

    /// 目标类名
    pub fn target_class(&self) -> &str {
        &self.target_class
    }

    /// 目标方法名
    pub fn method(&self) -> &str {
        &self.method
    }

    /// 目标方法参数
    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    /// 改写目标方法参数（在原始方法执行前生效）
    pub fn set_arguments(&mut self, arguments: Vec<Value>) {
        self.arguments = arguments;
    }

    /// 以当前参数调用原始方法
    pub(crate) fn do_call(&mut self) -> Result<Value> {
        (self.call)(&self.arguments)
    }
}

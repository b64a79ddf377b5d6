use anyhow::Result;
use serde_json::Value;
use std::collections::VecDeque;

use super::aspect::Aspect;
use super::target::AopTarget;

/// 切面执行链
///
/// 持有本次调用剩余的切面实例（队头先执行）与调用上下文。
/// `invoke` 递归消费切面，队列耗尽后调用原始方法。
pub struct AopChain<'a> {
    aspects: VecDeque<Box<dyn Aspect>>,
    target: AopTarget<'a>,
}

impl<'a> AopChain<'a> {
    /// 创建切面链
    pub fn new(aspects: Vec<Box<dyn Aspect>>, target: AopTarget<'a>) -> Self {
        Self {
            aspects: aspects.into(),
            target,
        }
    }

    /// 获取调用上下文
    pub fn target(&self) -> &AopTarget<'a> {
        &self.target
    }

    /// 获取可变调用上下文
    pub fn target_mut(&mut self) -> &mut AopTarget<'a> {
        &mut self.target
    }

    /// 执行切面链
    ///
    /// 弹出队头切面，依次调用 before / around / after；around 内部通过
    /// `chain.invoke()` 递归执行剩余链。队列为空时以当前参数调用原始方法。
    /// 任一阶段的错误原样向上传播，链不做任何捕获或转换。
    pub fn invoke(&mut self) -> Result<Value> {
        match self.aspects.pop_front() {
            Some(mut aspect) => {
                // 调用前置
                aspect.before(&mut self.target)?;
                // 调用环绕（递归执行剩余链）
                let result = aspect.around(self)?;
                // 调用后置
                aspect.after(&self.target, &result)?;
                Ok(result)
            }
            // 调用原始方法
            None => self.target.do_call(),
        }
    }
}

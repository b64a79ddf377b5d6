use anyhow::Result;
use serde_json::Value;

use super::chain::AopChain;
use super::target::AopTarget;

/// 切面接口
///
/// 默认实现即「空切面」：before/after 什么都不做，around 直接委托给链上
/// 剩余的切面，具体切面只覆写需要的阶段。切面实例由注册表按调用创建，
/// 一次链构造对应一个全新实例，阶段之间可以安全地持有本次调用的状态。
pub trait Aspect {
    /// 执行前置（可通过 `target.set_arguments` 改写调用参数）
    fn before(&mut self, target: &mut AopTarget) -> Result<()> {
        let _ = target;
        Ok(())
    }

    /// 执行环绕
    ///
    /// 负责委托链上剩余的切面：不调用 `chain.invoke()` 会短路后续切面
    /// 与原始调用，直接以自身返回值作为本次调用结果。
    fn around(&mut self, chain: &mut AopChain) -> Result<Value> {
        chain.invoke()
    }

    /// 执行后置（可观察 around 的返回结果）
    fn after(&mut self, target: &AopTarget, result: &Value) -> Result<()> {
        let _ = (target, result);
        Ok(())
    }
}

impl std::fmt::Debug for dyn Aspect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Aspect")
    }
}

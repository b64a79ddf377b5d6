use regex_lite::Regex;
use serde::Deserialize;
use smart_default::SmartDefault;
use std::collections::{HashMap, HashSet};

use super::core::{normalize_class_name, AopError, WILDCARD};

/// 单条切入点规则配置
#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(default)]
pub struct PointcutConfig {
    /// 需要切入的类（精确类名或包含 `*` 的通配符模式）
    pub classes: Vec<String>,

    /// 只有这些方法才会切入（按类名索引；优先于 ignores）
    pub allows: HashMap<String, Vec<String>>,

    /// 除了这些方法，其他方法都会切入（allows 非空时不生效）
    pub ignores: HashMap<String, Vec<String>>,

    /// 切入的切面名称列表（按配置顺序执行）
    pub aspect: Vec<String>,

    /// 优先级：数值越大越先匹配，未设置视为 0
    pub priority: i32,
}

/// 编译后的类名模式
enum ClassPattern {
    /// 精确匹配
    Exact(String),
    /// 通配符匹配（已编译为首尾锚定的正则）
    Wildcard(Regex),
}

/// 归一化后的切入点规则
///
/// 通配符模式在注册时一次性编译，之后不可变。
pub struct Pointcut {
    patterns: Vec<ClassPattern>,
    allows: HashMap<String, HashSet<String>>,
    ignores: HashMap<String, HashSet<String>>,
    aspect: Vec<String>,
    priority: i32,
}

impl Pointcut {
    /// 编译一条规则配置
    fn compile(config: PointcutConfig) -> Result<Self, AopError> {
        let mut patterns = Vec::with_capacity(config.classes.len());
        for class in &config.classes {
            let class = normalize_class_name(class);
            if class.contains('*') {
                patterns.push(ClassPattern::Wildcard(compile_wildcard(class)?));
            } else {
                patterns.push(ClassPattern::Exact(class.to_string()));
            }
        }

        Ok(Self {
            patterns,
            allows: to_method_sets(config.allows),
            ignores: to_method_sets(config.ignores),
            aspect: config.aspect,
            priority: config.priority,
        })
    }

    /// 类名是否命中本规则的任一模式
    pub fn matches_class(&self, class_name: &str) -> bool {
        self.patterns.iter().any(|pattern| match pattern {
            ClassPattern::Exact(exact) => exact == class_name,
            ClassPattern::Wildcard(regex) => regex.is_match(class_name),
        })
    }

    /// 校验方法规则
    ///
    /// allows 非空时只看 allows：对应类的条目必须存在且为 `{*}` 或包含该方法，
    /// 没有该类的条目即排除。allows 为空时看 ignores：条目为 `{*}` 或包含该方法
    /// 即排除，否则切入。两者都为空时无条件切入。
    pub fn applies_to_method(&self, class_name: &str, method: &str) -> bool {
        if !self.allows.is_empty() {
            return match self.allows.get(class_name) {
                Some(methods) => contains_method(methods, method),
                None => false,
            };
        }

        if !self.ignores.is_empty() {
            if let Some(methods) = self.ignores.get(class_name) {
                if contains_method(methods, method) {
                    return false;
                }
            }
            return true;
        }

        true
    }

    /// 本规则的切面名称列表
    pub fn aspect(&self) -> &[String] {
        &self.aspect
    }

    /// 本规则的优先级
    pub fn priority(&self) -> i32 {
        self.priority
    }
}

/// 切入点索引
///
/// 持有编译后的规则，按优先级降序（同优先级保持注册顺序）提供匹配查询。
/// 注册完成后只读，可跨线程共享。
pub struct PointcutIndex {
    pointcuts: Vec<Pointcut>,
}

impl PointcutIndex {
    /// 编译并注册所有规则
    ///
    /// 非法通配符模式在此处报错（快速失败），不会推迟到匹配时。
    pub fn new(rules: Vec<PointcutConfig>) -> Result<Self, AopError> {
        let mut pointcuts = rules
            .into_iter()
            .map(Pointcut::compile)
            .collect::<Result<Vec<_>, _>>()?;

        // 稳定排序：优先级降序，同优先级保持注册顺序
        pointcuts.sort_by_key(|pointcut| std::cmp::Reverse(pointcut.priority));

        Ok(Self { pointcuts })
    }

    /// 按优先级顺序访问命中指定类名的规则
    ///
    /// visitor 返回 false 时提前终止（用于 is_aspect 的首个命中短路）。
    pub fn find_aspects<F>(&self, class_name: &str, mut visitor: F)
    where
        F: FnMut(&Pointcut) -> bool,
    {
        let class_name = normalize_class_name(class_name);
        for pointcut in &self.pointcuts {
            if pointcut.matches_class(class_name) && !visitor(pointcut) {
                return;
            }
        }
    }

    /// 已注册的规则数量
    pub fn len(&self) -> usize {
        self.pointcuts.len()
    }

    /// 是否没有任何规则
    pub fn is_empty(&self) -> bool {
        self.pointcuts.is_empty()
    }
}

/// 将通配符模式编译为锚定正则：`*` 匹配任意子串
fn compile_wildcard(pattern: &str) -> Result<Regex, AopError> {
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push('^');
    for (i, part) in pattern.split('*').enumerate() {
        if i > 0 {
            source.push_str(".*");
        }
        source.push_str(&regex_lite::escape(part));
    }
    source.push('$');

    Regex::new(&source).map_err(|err| AopError::PatternCompilation {
        pattern: pattern.to_string(),
        source: err,
    })
}

/// 方法集合是否覆盖指定方法（`{*}` 表示全部方法）
fn contains_method(methods: &HashSet<String>, method: &str) -> bool {
    (methods.len() == 1 && methods.contains(WILDCARD)) || methods.contains(method)
}

/// 方法列表转集合，类名 key 同步规范化
fn to_method_sets(map: HashMap<String, Vec<String>>) -> HashMap<String, HashSet<String>> {
    map.into_iter()
        .map(|(class, methods)| {
            (
                normalize_class_name(&class).to_string(),
                methods.into_iter().collect(),
            )
        })
        .collect()
}

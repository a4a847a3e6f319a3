//! Environment
//!
//! 变量绑定表（名称 -> 值）。重复定义直接覆盖；
//! 查找从未定义的名字得到同名的符号值。

use crate::scalar::ScalarValue;
use std::collections::HashMap;

/// 变量绑定表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    bindings: HashMap<String, ScalarValue>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// 定义或覆盖变量，返回旧值
    pub fn define(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ScalarValue>,
    ) -> Option<ScalarValue> {
        self.bindings.insert(name.into(), value.into())
    }

    /// 查找已定义的变量
    pub fn get(&self, name: &str) -> Option<&ScalarValue> {
        self.bindings.get(name)
    }

    /// 查找变量；未定义时返回 `Symbolic(name)`
    pub fn lookup(&self, name: &str) -> ScalarValue {
        match self.bindings.get(name) {
            Some(value) => value.clone(),
            None => ScalarValue::Symbolic(name.to_string()),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<ScalarValue> {
        self.bindings.remove(name)
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// 遍历所有绑定（顺序不确定）
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScalarValue)> {
        self.bindings
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<ScalarValue>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Environment::new();
        env.extend(iter);
        env
    }
}

impl<K: Into<String>, V: Into<ScalarValue>> Extend<(K, V)> for Environment {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.define(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_overwrites() {
        let mut env = Environment::new();
        assert_eq!(env.define("x", 1.0), None);
        assert_eq!(env.define("x", "y"), Some(ScalarValue::ONE));
        assert_eq!(env.get("x"), Some(&ScalarValue::from("y")));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_lookup_unbound_is_symbolic() {
        let env = Environment::new();
        assert_eq!(env.lookup("theta"), ScalarValue::from("theta"));
        assert!(!env.contains("theta"));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut env: Environment = [("a", 1.0), ("b", 2.0)].into_iter().collect();
        assert_eq!(env.remove("a"), Some(ScalarValue::ONE));
        assert_eq!(env.remove("a"), None);
        assert!(!env.is_empty());
        env.clear();
        assert!(env.is_empty());
    }
}

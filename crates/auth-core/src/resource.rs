//! 资源作用域
//!
//! 资源是调用方已加载好的任意记录，这里只按字段名读取字符串值

use std::collections::HashMap;
use std::hash::BuildHasher;

use serde_json::{Map, Value};

/// 资源字段与主体比较时所用的维度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeAxis {
    /// 组织隔离：与主体的组织 ID 比较
    Organization,
    /// 归属：与主体的用户 ID 比较
    Owner,
}

const ORGANIZATION_FIELDS: &[&str] = &["organizationId", "organization_id", "orgId", "org_id"];

impl ScopeAxis {
    /// 根据字段名判断比较维度
    ///
    /// 组织类字段之外的字段（authorId、ownerId、createdById ...）都按归属处理
    pub fn for_field(field: &str) -> Self {
        if ORGANIZATION_FIELDS.contains(&field) {
            ScopeAxis::Organization
        } else {
            ScopeAxis::Owner
        }
    }
}

/// 可按字段名读取的资源记录
pub trait ResourceRecord {
    /// 读取字符串字段，字段缺失、为 null 或非字符串时返回 None
    fn field(&self, name: &str) -> Option<&str>;
}

impl ResourceRecord for Map<String, Value> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }
}

impl ResourceRecord for Value {
    fn field(&self, name: &str) -> Option<&str> {
        self.as_object().and_then(|object| object.field(name))
    }
}

impl<S: BuildHasher> ResourceRecord for HashMap<String, String, S> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl<T: ResourceRecord + ?Sized> ResourceRecord for &T {
    fn field(&self, name: &str) -> Option<&str> {
        (**self).field(name)
    }
}

//! Registered route patterns.
//!
//! Each route is registered with axum and recorded here in the same call,
//! so `/status` reports exactly what the router serves. Role routes are
//! registered once per role and shown in one collapsed form:
//!
//! ```text
//! /{type:bootstrap|master|worker}/nic/{nic}/{mask}/{gateway}/{dns}
//! ```

use std::collections::BTreeSet;

use axum::routing::MethodRouter;
use axum::Router;

use crate::ignition::Role;

pub const NIC_PATH: &str = "/nic/{nic}/{mask}/{gateway}/{dns}";
pub const BOND_PATH: &str = "/bond/{bond}/{mask}/{gateway}/{dns}/{nic1}/{nic2}";
pub const STATUS_PATH: &str = "/status";

/// Display pattern for a path served under every role prefix.
pub fn role_pattern(path: &str) -> String {
    let roles: Vec<&str> = Role::ALL.iter().map(|role| role.as_str()).collect();
    format!("/{{type:{}}}{}", roles.join("|"), path)
}

/// The set of route patterns, kept sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    patterns: BTreeSet<String>,
}

impl RouteTable {
    pub fn register(&mut self, pattern: impl Into<String>) {
        self.patterns.insert(pattern.into());
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// One pattern per line, each line newline-terminated.
    pub fn to_text(&self) -> String {
        self.patterns.iter().fold(String::new(), |mut out, pattern| {
            out.push_str(pattern);
            out.push('\n');
            out
        })
    }
}

/// Router under construction together with its route table.
pub struct RouteRegistry<S> {
    router: Router<S>,
    table: RouteTable,
}

impl<S> RouteRegistry<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            table: RouteTable::default(),
        }
    }

    /// Serve `path` with `handler`, listing it as `pattern`.
    pub fn route(mut self, path: &str, pattern: impl Into<String>, handler: MethodRouter<S>) -> Self {
        self.router = self.router.route(path, handler);
        self.table.register(pattern);
        self
    }

    pub fn into_parts(self) -> (Router<S>, RouteTable) {
        (self.router, self.table)
    }
}

impl<S> Default for RouteRegistry<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_pattern() {
        assert_eq!(
            role_pattern(NIC_PATH),
            "/{type:bootstrap|master|worker}/nic/{nic}/{mask}/{gateway}/{dns}"
        );
    }

    #[test]
    fn test_table_ignores_registration_order() {
        let mut a = RouteTable::default();
        a.register("/status");
        a.register(role_pattern(BOND_PATH));
        a.register(role_pattern(NIC_PATH));

        let mut b = RouteTable::default();
        b.register(role_pattern(NIC_PATH));
        b.register(role_pattern(NIC_PATH));
        b.register(role_pattern(BOND_PATH));
        b.register("/status");

        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
        assert_eq!(a.to_text(), b.to_text());
        assert!(a.to_text().ends_with('\n'));
        assert_eq!(a.to_text().lines().count(), 3);
    }
}

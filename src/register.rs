//! Global deduplication register (C2): process-lifetime, shared across the
//! whole run so the same inferred triple or query is never emitted twice.

use dashmap::DashSet;

/// Two lock-free sets, one for canonical triple keys and one for rendered
/// query strings. `admit_*` is linearisable under concurrent use: a given
/// key is admitted by exactly one caller, matching `DashSet::insert`'s own
/// return-value semantics. There is no removal operation — entries live for
/// the process's lifetime.
#[derive(Debug, Default)]
pub struct GlobalRegister {
    triples: DashSet<String>,
    queries: DashSet<String>,
}

impl GlobalRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` iff `key` had not previously been admitted.
    pub fn admit_triple(&self, key: String) -> bool {
        self.triples.insert(key)
    }

    /// Returns `true` iff `query` had not previously been admitted.
    pub fn admit_query(&self, query: String) -> bool {
        self.queries.insert(query)
    }

    pub fn triple_count(&self) -> usize {
        self.triples.len()
    }

    pub fn query_count(&self) -> usize {
        self.queries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admit_triple_is_first_writer_wins() {
        let register = GlobalRegister::new();
        assert!(register.admit_triple("a|b|c".to_string()));
        assert!(!register.admit_triple("a|b|c".to_string()));
        assert_eq!(register.triple_count(), 1);
    }

    #[test]
    fn triples_and_queries_are_independent() {
        let register = GlobalRegister::new();
        assert!(register.admit_triple("k".to_string()));
        assert!(register.admit_query("k".to_string()));
        assert_eq!(register.triple_count(), 1);
        assert_eq!(register.query_count(), 1);
    }

    #[test]
    fn concurrent_admits_see_exactly_one_winner() {
        use std::sync::Arc;
        let register = Arc::new(GlobalRegister::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let register = register.clone();
                std::thread::spawn(move || register.admit_triple("shared".to_string()))
            })
            .collect();
        let wins: usize = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&won| won)
            .count();
        assert_eq!(wins, 1);
    }
}

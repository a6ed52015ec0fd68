use serde::{Deserialize, Serialize};

use crate::schema::{TableRef, WarehouseSnapshot};

/// An inferred, unverified dimension→fact relationship.
///
/// Identity is (dimension, fact, foreign key): a fact table with several
/// columns embedding the same key name yields several distinct candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipCandidate {
    pub dimension: TableRef,
    pub primary_key: String,
    pub fact: TableRef,
    pub foreign_key: String,
}

impl RelationshipCandidate {
    /// Human-readable identity used in logs and diagnostics.
    pub fn describe(&self) -> String {
        format!(
            "{}.{} -> {}.{}",
            self.fact.qualified(),
            self.foreign_key,
            self.dimension.qualified(),
            self.primary_key
        )
    }
}

/// Strip identifier-quoting characters before name comparison.
pub fn strip_quoting(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '[' | ']' | '"' | '`'))
        .collect()
}

/// Infer the candidate relationship set from a warehouse snapshot.
///
/// For every dimension × fact pair, every fact column whose quote-stripped
/// name contains the dimension's quote-stripped primary-key name as a
/// case-sensitive substring becomes a candidate. The match is a deliberately
/// loose heuristic: a short key name will over-match unrelated columns, which
/// the scan then reports as (usually clean) relationships. Output is sorted
/// by (dimension, fact, foreign key) so a fixed snapshot always produces the
/// same candidate sequence.
pub fn infer_candidates(snapshot: &WarehouseSnapshot) -> Vec<RelationshipCandidate> {
    let mut candidates = Vec::new();

    for dimension in &snapshot.dimensions {
        let key_name = strip_quoting(&dimension.primary_key);
        if key_name.is_empty() {
            continue;
        }

        for fact in &snapshot.facts {
            for column in &fact.columns {
                if strip_quoting(column).contains(&key_name) {
                    candidates.push(RelationshipCandidate {
                        dimension: dimension.table.clone(),
                        primary_key: dimension.primary_key.clone(),
                        fact: fact.table.clone(),
                        foreign_key: column.clone(),
                    });
                }
            }
        }
    }

    candidates.sort_by(|left, right| {
        (&left.dimension, &left.fact, &left.foreign_key)
            .cmp(&(&right.dimension, &right.fact, &right.foreign_key))
    });
    candidates
}

use std::collections::BTreeSet;

/// Migration hints between two handler-signature sets. Pure set difference,
/// order-independent; the vectors come out sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl SignatureDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

pub fn diff_signatures(previous: &BTreeSet<String>, current: &BTreeSet<String>) -> SignatureDiff {
    SignatureDiff {
        added: current.difference(previous).cloned().collect(),
        removed: previous.difference(current).cloned().collect(),
    }
}

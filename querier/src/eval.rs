//! Boolean evaluation over the inverted index.
//!
//! `and` binds tighter than `or`: each `and` is reduced as soon as its right
//! operand is pushed, so only the results of whole AND-groups are left on the
//! stack for the final `or` union.

use common::index::same_doc;
use common::{DocumentCount, InvertedIndex, Queue};

use crate::query::Token;

/// Documents in both sequences, scored by the smaller count. Keeps `a`'s order.
pub fn intersect(a: Queue<DocumentCount>, b: &Queue<DocumentCount>) -> Queue<DocumentCount> {
    a.into_iter()
        .filter_map(|d| {
            b.search(same_doc, &d.doc_id)
                .map(|o| DocumentCount::new(d.doc_id, d.count.min(o.count)))
        })
        .collect()
}

/// Documents in either sequence; a document in both scores the sum.
/// `a`'s documents come first, then those only in `b`.
pub fn union(mut a: Queue<DocumentCount>, b: Queue<DocumentCount>) -> Queue<DocumentCount> {
    let mut only_b = Queue::open();
    for d in b {
        match a.search_mut(same_doc, &d.doc_id) {
            Some(found) => found.count = found.count.saturating_add(d.count),
            None => only_b.put(d),
        }
    }
    a.concat(only_b);
    a
}

fn documents_for(index: &InvertedIndex, word: &str) -> Queue<DocumentCount> {
    index
        .lookup(word)
        .map(|e| e.documents.iter().copied().collect())
        .unwrap_or_default()
}

/// Evaluate a validated token stream against `index`.
pub fn evaluate(tokens: &[Token], index: &InvertedIndex) -> Queue<DocumentCount> {
    let mut stack: Vec<Queue<DocumentCount>> = Vec::new();
    let mut pending: Option<&Token> = None;

    for token in tokens {
        match token {
            Token::And | Token::Or => pending = Some(token),
            Token::Word(w) => {
                stack.push(documents_for(index, w));
                if pending.take() == Some(&Token::And) {
                    if let (Some(right), Some(left)) = (stack.pop(), stack.pop()) {
                        stack.push(intersect(left, &right));
                    }
                }
            }
        }
    }

    while stack.len() > 1 {
        if let (Some(right), Some(left)) = (stack.pop(), stack.pop()) {
            stack.push(union(left, right));
        }
    }
    stack.pop().unwrap_or_default()
}

//! Term chains for single items and term archives.

use crate::data::{ContentProvider, Permalinks, Term};

use super::crumb::Crumb;

/// Crumbs deeper than this link to the compact term url.
const FULL_URL_DEPTH: usize = 3;

/// Pick the term that anchors a trail: candidates that are ancestors of
/// another candidate are dropped, then the longest ancestor chain wins.
/// Ties go to the first candidate.
pub fn deepest<'a>(content: &'a dyn ContentProvider, candidates: &[&'a Term]) -> Option<&'a Term> {
    let chains: Vec<Vec<u64>> = candidates
        .iter()
        .map(|term| content.term_ancestors(term).iter().map(|t| t.id).collect())
        .collect();

    let mut best: Option<(&'a Term, usize)> = None;
    for (term, chain) in candidates.iter().zip(&chains) {
        let is_ancestor = chains.iter().any(|other| other.contains(&term.id));
        if is_ancestor {
            continue;
        }
        if best.is_none_or(|(_, depth)| chain.len() > depth) {
            best = Some((*term, chain.len()));
        }
    }
    best.map(|(term, _)| term)
}

/// Root-to-leaf crumbs for `term`. Depths 1-3 use hierarchical urls, deeper
/// crumbs compact ones.
pub fn chain(content: &dyn ContentProvider, links: &Permalinks<'_>, term: &Term) -> Vec<Crumb> {
    let mut path = content.term_ancestors(term);
    path.push(term);

    path.into_iter()
        .enumerate()
        .map(|(index, term)| {
            let depth = index + 1;
            let url = if depth <= FULL_URL_DEPTH {
                links.term(term)
            } else {
                links.term_compact(term)
            };
            Crumb::term(&term.name, url)
        })
        .collect()
}

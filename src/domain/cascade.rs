//! Cascading multi-stage search.
//!
//! Each stage runs a collect-and-prune search over every tree of the current
//! working set; every match becomes the root of a freshly built tree for the
//! next stage. The result is the set of roots left after the last stage.

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::domain::arena::TreeArena;
use crate::domain::builder::build_tree;
use crate::domain::criteria::SearchCriteria;
use crate::domain::error::DomainResult;
use crate::domain::producer::ChildrenProducer;
use crate::domain::search::collect_and_prune;

fn usable_stages<E, I>(criteria: I) -> Vec<SearchCriteria<E>>
where
    I: IntoIterator<Item = SearchCriteria<E>>,
{
    criteria.into_iter().filter(|c| !c.is_wildcard()).collect()
}

fn final_roots<E: Clone>(working_set: &[TreeArena<E>]) -> Vec<E> {
    working_set
        .iter()
        .filter_map(|tree| tree.root_element().cloned())
        .collect()
}

/// Search every tree of the working set in parallel, concatenating matches in
/// working-set order.
fn stage_matches_par<E>(
    working_set: &[TreeArena<E>],
    stage: &SearchCriteria<E>,
    stage_no: usize,
) -> DomainResult<Vec<E>>
where
    E: Clone + Send + Sync,
{
    let per_tree: Vec<DomainResult<Vec<E>>> = working_set
        .par_iter()
        .map(|tree| collect_and_prune(tree, stage))
        .collect();

    let mut matches = Vec::new();
    for found in per_tree {
        matches.extend(found.map_err(|e| e.at_stage(stage_no, None))?);
    }
    Ok(matches)
}

/// Narrow `root` through `criteria`, one stage per criteria.
///
/// Wildcard entries are dropped; with nothing left the result is empty. A
/// stage that matches nothing ends the search with an empty result and later
/// stages are never evaluated.
#[instrument(level = "debug", skip_all)]
pub fn extract_nodes<E, P, I>(root: E, producer: &P, criteria: I) -> DomainResult<Vec<E>>
where
    E: Clone,
    P: ChildrenProducer<E> + ?Sized,
    I: IntoIterator<Item = SearchCriteria<E>>,
{
    let stages = usable_stages(criteria);
    if stages.is_empty() {
        debug!("no usable criteria");
        return Ok(Vec::new());
    }

    let mut working_set = vec![build_tree(root, producer)?];

    for (i, stage) in stages.iter().enumerate() {
        let stage_no = i + 1;

        let mut matches = Vec::new();
        for tree in &working_set {
            let found = collect_and_prune(tree, stage).map_err(|e| e.at_stage(stage_no, None))?;
            matches.extend(found);
        }
        debug!(stage = stage_no, matches = matches.len(), "stage matched");

        if matches.is_empty() {
            return Ok(Vec::new());
        }

        working_set = matches
            .into_iter()
            .enumerate()
            .map(|(k, element)| {
                build_tree(element, producer).map_err(|e| e.at_stage(stage_no, Some(k + 1)))
            })
            .collect::<DomainResult<Vec<_>>>()?;
    }

    Ok(final_roots(&working_set))
}

/// Same contract as [`extract_nodes`], with each stage's searches and rebuilds
/// spread over the rayon thread pool.
///
/// Output order is identical to the sequential version. When several trees
/// fail, the first one in working-set order is reported.
#[instrument(level = "debug", skip_all)]
pub fn extract_nodes_par<E, P, I>(root: E, producer: &P, criteria: I) -> DomainResult<Vec<E>>
where
    E: Clone + Send + Sync,
    P: ChildrenProducer<E> + Sync + ?Sized,
    I: IntoIterator<Item = SearchCriteria<E>>,
{
    let stages = usable_stages(criteria);
    if stages.is_empty() {
        debug!("no usable criteria");
        return Ok(Vec::new());
    }

    let mut working_set = vec![build_tree(root, producer)?];

    for (i, stage) in stages.iter().enumerate() {
        let stage_no = i + 1;

        let matches = stage_matches_par(&working_set, stage, stage_no)?;
        debug!(stage = stage_no, matches = matches.len(), "stage matched");

        if matches.is_empty() {
            return Ok(Vec::new());
        }

        let built: Vec<DomainResult<TreeArena<E>>> = matches
            .into_par_iter()
            .map(|element| build_tree(element, producer))
            .collect();

        working_set = built
            .into_iter()
            .enumerate()
            .map(|(k, tree)| tree.map_err(|e| e.at_stage(stage_no, Some(k + 1))))
            .collect::<DomainResult<Vec<_>>>()?;
    }

    Ok(final_roots(&working_set))
}

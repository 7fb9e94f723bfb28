//! Decomposition search inside one block: split, local search, merge.
//!
//! Purpose
//! - Replace one `2^k` enumeration by several small ones whose results are
//!   joined pairwise, pruning at every join.
//!
//! How
//! - `split` groups the block's classes into units of at most `size` classes.
//! - Each unit is enumerated with the Gray-code search restricted to the
//!   cycles inside the unit (`enumerate::UnitEnumerator`).
//! - `Part`s (a class support plus its assignment stream) are merged
//!   pairwise in the order the merge strategy picks. A merge keeps a pair of
//!   assignments when every boundary cycle (inside the union, inside neither
//!   part) is admissible and the union's edge subgraph passes the full check.
//! - Every merge is lazy: the left stream is consumed once, the right one is
//!   cached as it is pulled and replayed for each left item. The first result
//!   costs only the prefixes of the streams needed to find it.
//!
//! Correctness does not depend on the split or merge order: every kept
//! assignment is a valid coloring (or constant) of its edge subgraph, and the
//! restriction of a valid coloring to any edge subgraph is valid there.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use rand::Rng;

use super::enumerate::{Order, UnitEnumerator};
use super::problem::{shared_count, BlockProblem};
use super::stats::Ctx;
use super::{MergeStrategy, SplitStrategy, MAX_UNIT_CLASSES};
use crate::coloring::{ClassBits, CycleMask, EdgeSubgraph};
use crate::graph::Graph;

/// Group the block's classes into units of at most `size` classes (and never
/// more than `MAX_UNIT_CLASSES`).
pub(crate) fn split(
    problem: &BlockProblem,
    strategy: SplitStrategy,
    size: usize,
) -> Vec<Vec<usize>> {
    let size = size.clamp(1, MAX_UNIT_CLASSES);
    let mut units = match strategy {
        SplitStrategy::None => (0..problem.len())
            .collect::<Vec<_>>()
            .chunks(size)
            .map(<[usize]>::to_vec)
            .collect(),
        SplitStrategy::Neighbors => grow_bfs(problem, size),
        SplitStrategy::NeighborsDegree => grow_by_degree(problem, size),
    };
    for unit in units.iter_mut() {
        unit.sort_unstable();
    }
    units
}

fn grow_bfs(problem: &BlockProblem, size: usize) -> Vec<Vec<usize>> {
    let k = problem.len();
    let mut assigned = vec![false; k];
    let mut units = Vec::new();
    for start in 0..k {
        if assigned[start] {
            continue;
        }
        assigned[start] = true;
        let mut unit = vec![start];
        let mut queue = VecDeque::from([start]);
        'grow: while let Some(c) = queue.pop_front() {
            for &(d, _) in &problem.adjacency[c] {
                if unit.len() == size {
                    break 'grow;
                }
                if !assigned[d] {
                    assigned[d] = true;
                    unit.push(d);
                    queue.push_back(d);
                }
            }
        }
        units.push(unit);
    }
    units
}

fn grow_by_degree(problem: &BlockProblem, size: usize) -> Vec<Vec<usize>> {
    let k = problem.len();
    let mut assigned = vec![false; k];
    let mut units = Vec::new();
    while let Some(start) = (0..k)
        .filter(|&c| !assigned[c])
        .min_by_key(|&c| (problem.degree(c), c))
    {
        assigned[start] = true;
        let mut unit = vec![start];
        let mut frontier = BinaryHeap::new();
        let push_neighbors =
            |c: usize, frontier: &mut BinaryHeap<Reverse<(usize, usize)>>, assigned: &[bool]| {
                for &(d, _) in &problem.adjacency[c] {
                    if !assigned[d] {
                        frontier.push(Reverse((problem.degree(d), d)));
                    }
                }
            };
        push_neighbors(start, &mut frontier, &assigned);
        while unit.len() < size {
            let Some(Reverse((_, d))) = frontier.pop() else {
                break;
            };
            if assigned[d] {
                continue;
            }
            assigned[d] = true;
            unit.push(d);
            push_neighbors(d, &mut frontier, &assigned);
        }
        units.push(unit);
    }
    units
}

/// A set of classes and the lazy stream of its accepted assignments.
#[derive(Debug)]
struct Part {
    members: Vec<usize>,
    support: ClassBits,
    vertices: Vec<usize>,
    /// Upper bound on the number of assignments the stream yields.
    estimate: u128,
    stream: BlockStream,
}

impl Part {
    fn unit(g: &Graph, problem: &BlockProblem, members: Vec<usize>, ctx: &mut Ctx) -> Self {
        let unit = UnitEnumerator::new(g, problem, members.clone(), Order::Gray, ctx);
        tracing::trace!(
            classes = members.len(),
            edges = unit.edge_count(),
            "unit opened"
        );
        Self {
            support: problem.support(&members),
            vertices: problem.vertices_of(&members),
            estimate: 1u128 << members.len(),
            members,
            stream: BlockStream::Direct(unit),
        }
    }

    /// Number of assignment pairs a merge with `other` may have to consider.
    fn pairs_with(&self, other: &Part) -> u128 {
        self.estimate.saturating_mul(other.estimate)
    }
}

/// Checks shared by all assignment pairs of one merge.
#[derive(Debug)]
struct Join {
    left: ClassBits,
    right: ClassBits,
    boundary: Vec<CycleMask>,
    sub: EdgeSubgraph,
}

impl Join {
    fn new(g: &Graph, problem: &BlockProblem, a: &Part, b: &Part, members: &[usize]) -> Self {
        assert!(
            a.support.is_disjoint(&b.support),
            "merged parts assign the same class twice"
        );
        let mut support = a.support.clone();
        support.union_with(&b.support);
        let boundary = problem
            .cycles
            .iter()
            .filter(|m| {
                m.is_inside(&support) && !m.is_inside(&a.support) && !m.is_inside(&b.support)
            })
            .cloned()
            .collect();
        Self {
            left: a.support.clone(),
            right: b.support.clone(),
            boundary,
            sub: problem.subgraph(g, members),
        }
    }

    fn accept(&self, x: &ClassBits, y: &ClassBits, ctx: &mut Ctx) -> Option<ClassBits> {
        debug_assert!(
            x.is_subset(&self.left) && y.is_subset(&self.right),
            "partial assignment colors a class outside its part"
        );
        let mut bits = x.clone();
        bits.union_with(y);
        for mask in &self.boundary {
            ctx.stats.cycle_mask_checks += 1;
            if !mask.admits(&bits) {
                return None;
            }
        }
        ctx.stats.nac_checks += 1;
        self.sub.is_nac(&bits, &mut ctx.scratch).then_some(bits)
    }
}

/// Items of a stream kept for replay, pulled from the source only on demand.
#[derive(Debug)]
pub(crate) struct Replay {
    source: BlockStream,
    seen: Vec<ClassBits>,
    done: bool,
}

impl Replay {
    pub(crate) fn new(source: BlockStream) -> Self {
        Self {
            source,
            seen: Vec::new(),
            done: false,
        }
    }

    /// Item `j`, pulling from the source until it exists; `None` past the end.
    pub(crate) fn get(&mut self, j: usize, ctx: &mut Ctx) -> Option<&ClassBits> {
        while self.seen.len() <= j && !self.done {
            match self.source.next(ctx) {
                Some(bits) => self.seen.push(bits),
                None => self.done = true,
            }
        }
        self.seen.get(j)
    }
}

/// Lazy merge: every item of the left stream is paired with the replayed
/// right stream.
#[derive(Debug)]
pub(crate) struct MergeStream {
    join: Join,
    left: BlockStream,
    right: Replay,
    current: Option<ClassBits>,
    j: usize,
}

impl MergeStream {
    pub(crate) fn next(&mut self, ctx: &mut Ctx) -> Option<ClassBits> {
        loop {
            if self.current.is_none() {
                self.current = Some(self.left.next(ctx)?);
                self.j = 0;
            }
            if !ctx.tick() {
                return None;
            }
            let j = self.j;
            self.j += 1;
            let Some(y) = self.right.get(j, ctx) else {
                if j == 0 {
                    // nothing on the right pairs with anything
                    return None;
                }
                self.current = None;
                continue;
            };
            let x = self.current.as_ref()?;
            if let Some(bits) = self.join.accept(x, y, ctx) {
                return Some(bits);
            }
        }
    }
}

/// Join two parts into one lazy part.
fn join_parts(g: &Graph, problem: &BlockProblem, a: Part, b: Part) -> Part {
    let mut members: Vec<usize> = a.members.iter().chain(&b.members).copied().collect();
    members.sort_unstable();
    let join = Join::new(g, problem, &a, &b, &members);
    tracing::trace!(
        left = a.members.len(),
        right = b.members.len(),
        boundary = join.boundary.len(),
        "parts joined"
    );
    let mut support = a.support.clone();
    support.union_with(&b.support);
    let mut vertices: Vec<usize> = a.vertices.iter().chain(&b.vertices).copied().collect();
    vertices.sort_unstable();
    vertices.dedup();
    Part {
        members,
        support,
        vertices,
        estimate: a.pairs_with(&b),
        stream: BlockStream::Merge(Box::new(MergeStream {
            join,
            left: a.stream,
            right: Replay::new(b.stream),
            current: None,
            j: 0,
        })),
    }
}

/// Pick the next pair to merge; `i < j`.
fn pick_pair(parts: &[Part], strategy: MergeStrategy, ctx: &mut Ctx) -> (usize, usize) {
    let pairs = (0..parts.len()).flat_map(|i| ((i + 1)..parts.len()).map(move |j| (i, j)));
    match strategy {
        MergeStrategy::Linear | MergeStrategy::Log => (0, 1),
        MergeStrategy::Score => {
            let key = |&(i, j): &(usize, usize)| {
                let apart = shared_count(&parts[i].vertices, &parts[j].vertices) == 0;
                (apart, parts[i].pairs_with(&parts[j]))
            };
            let Some(best) = pairs.clone().map(|p| key(&p)).min() else {
                return (0, 1);
            };
            let ties: Vec<(usize, usize)> = pairs.filter(|p| key(p) == best).collect();
            ties[ctx.rng.gen_range(0..ties.len())]
        }
        MergeStrategy::SharedVertices => pairs
            .min_by_key(|&(i, j)| {
                (
                    Reverse(shared_count(&parts[i].vertices, &parts[j].vertices)),
                    parts[i].pairs_with(&parts[j]),
                    i,
                    j,
                )
            })
            .unwrap_or((0, 1)),
    }
}

/// Build the merge tree down to a single part. No assignment is computed here.
fn reduce(
    g: &Graph,
    problem: &BlockProblem,
    mut parts: Vec<Part>,
    strategy: MergeStrategy,
    ctx: &mut Ctx,
) -> Option<Part> {
    while parts.len() > 1 {
        if strategy == MergeStrategy::Log {
            let mut next = Vec::with_capacity(parts.len().div_ceil(2));
            let mut drain = parts.into_iter();
            while let Some(a) = drain.next() {
                match drain.next() {
                    Some(b) => next.push(join_parts(g, problem, a, b)),
                    None => next.push(a),
                }
            }
            tracing::debug!(parts = next.len(), "merge round planned");
            parts = next;
            continue;
        }
        let (i, j) = pick_pair(&parts, strategy, ctx);
        let b = parts.remove(j);
        let a = parts.remove(i);
        parts.insert(i, join_parts(g, problem, a, b));
        tracing::debug!(parts = parts.len(), "merge planned");
    }
    parts.pop()
}

/// Assignments of one block, produced lazily.
#[derive(Debug)]
pub(crate) enum BlockStream {
    Direct(UnitEnumerator),
    Merge(Box<MergeStream>),
    Empty,
}

impl BlockStream {
    /// Enumerate the whole block as one unit.
    pub(crate) fn direct(g: &Graph, problem: &BlockProblem, order: Order, ctx: &mut Ctx) -> Self {
        ctx.stats.units += 1;
        let members = (0..problem.len()).collect();
        BlockStream::Direct(UnitEnumerator::new(g, problem, members, order, ctx))
    }

    /// Split into units and plan the merges; enumeration starts on `next`.
    pub(crate) fn subgraphs(
        g: &Graph,
        problem: &BlockProblem,
        merge: MergeStrategy,
        split_by: SplitStrategy,
        size: usize,
        ctx: &mut Ctx,
    ) -> Self {
        let units = split(problem, split_by, size);
        ctx.stats.units += units.len();
        tracing::debug!(
            classes = problem.len(),
            edges = problem.edge_count(),
            units = units.len(),
            "split block"
        );
        let parts = units
            .into_iter()
            .map(|members| Part::unit(g, problem, members, ctx))
            .collect();
        match reduce(g, problem, parts, merge, ctx) {
            Some(part) => part.stream,
            None => BlockStream::Empty,
        }
    }

    pub(crate) fn next(&mut self, ctx: &mut Ctx) -> Option<ClassBits> {
        match self {
            BlockStream::Direct(unit) => unit.next(ctx),
            BlockStream::Merge(stream) => stream.next(ctx),
            BlockStream::Empty => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn collect_all(mut self, ctx: &mut Ctx) -> Vec<ClassBits> {
        let mut out = Vec::new();
        while let Some(bits) = self.next(ctx) {
            out.push(bits);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::{find_classes, ClassGranularity, ClassId};
    use crate::graph::cycle_candidates;
    use crate::graph::families::{complete_bipartite, cycle, path, three_prism};
    use crate::search::Budget;

    fn whole(g: &Graph, granularity: ClassGranularity) -> BlockProblem {
        let partition = find_classes(g, granularity);
        let ids: Vec<ClassId> = (0..partition.len()).map(ClassId).collect();
        BlockProblem::build(&partition, &partition.class_graph(g), &ids, &cycle_candidates(g, 8))
    }

    fn covers_once(units: &[Vec<usize>], k: usize, size: usize) {
        let mut all: Vec<usize> = units.iter().flatten().copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..k).collect::<Vec<_>>());
        assert!(units.iter().all(|u| !u.is_empty() && u.len() <= size));
    }

    #[test]
    fn none_split_chunks_indices() {
        let problem = whole(&cycle(7), ClassGranularity::Edges);
        let units = split(&problem, SplitStrategy::None, 3);
        assert_eq!(units, vec![vec![0, 1, 2], vec![3, 4, 5], vec![6]]);
    }

    #[test]
    fn neighbor_splits_partition_the_classes() {
        let g = complete_bipartite(3, 4);
        let problem = whole(&g, ClassGranularity::Edges);
        for strategy in [SplitStrategy::Neighbors, SplitStrategy::NeighborsDegree] {
            for size in [1, 2, 3, 5, 12, 64] {
                covers_once(&split(&problem, strategy, size), problem.len(), size);
            }
        }
    }

    #[test]
    fn neighbors_split_keeps_units_connected() {
        // edges of a path: class i touches i-1 and i+1
        let problem = whole(&path(9), ClassGranularity::Edges);
        let units = split(&problem, SplitStrategy::Neighbors, 3);
        assert_eq!(units, vec![vec![0, 1, 2], vec![3, 4, 5], vec![6, 7]]);
    }

    #[test]
    fn oversized_units_are_capped() {
        let problem = whole(&cycle(70), ClassGranularity::Edges);
        for strategy in [
            SplitStrategy::None,
            SplitStrategy::Neighbors,
            SplitStrategy::NeighborsDegree,
        ] {
            let units = split(&problem, strategy, 100);
            covers_once(&units, 70, MAX_UNIT_CLASSES);
            assert_eq!(units.len(), 2, "{strategy:?}");
        }
    }

    #[test]
    fn replay_pulls_only_what_is_asked() {
        let g = complete_bipartite(3, 3);
        let problem = whole(&g, ClassGranularity::Edges);
        let mut ctx = Ctx::new(Budget::default(), None);
        let members = (0..problem.len()).collect();
        let unit = UnitEnumerator::new(&g, &problem, members, Order::Naive, &mut ctx);
        let mut replay = Replay::new(BlockStream::Direct(unit));
        let first = replay.get(0, &mut ctx).cloned();
        assert!(first.is_some());
        let checks = ctx.stats.nac_checks;
        assert!(checks < 256, "{checks}");
        // replaying an item already pulled costs nothing
        assert_eq!(replay.get(0, &mut ctx).cloned(), first);
        assert_eq!(ctx.stats.nac_checks, checks);
        assert!(replay.get(31, &mut ctx).is_some());
        assert!(replay.get(32, &mut ctx).is_none());
        assert_eq!(ctx.stats.nac_checks, 256);
    }

    #[test]
    fn degree_split_starts_at_low_degree_classes() {
        // the two end edges of a path have degree one
        let problem = whole(&path(6), ClassGranularity::Edges);
        let units = split(&problem, SplitStrategy::NeighborsDegree, 2);
        assert_eq!(units[0], vec![0, 1]);
        covers_once(&units, problem.len(), 2);
    }

    fn block_count(g: &Graph, merge: MergeStrategy, split_by: SplitStrategy, size: usize) -> usize {
        let problem = whole(g, ClassGranularity::Edges);
        let mut ctx = Ctx::new(Budget::default(), Some(3));
        BlockStream::subgraphs(g, &problem, merge, split_by, size, &mut ctx)
            .collect_all(&mut ctx)
            .len()
    }

    #[test]
    fn every_merge_order_finds_the_same_assignments() {
        let g = complete_bipartite(3, 3);
        for merge in [
            MergeStrategy::Linear,
            MergeStrategy::Log,
            MergeStrategy::Score,
            MergeStrategy::SharedVertices,
        ] {
            for split_by in [
                SplitStrategy::None,
                SplitStrategy::Neighbors,
                SplitStrategy::NeighborsDegree,
            ] {
                for size in [1, 2, 4, 9] {
                    let found = block_count(&g, merge, split_by, size);
                    assert_eq!(found, 32, "{merge:?} {split_by:?} {size}");
                }
            }
        }
    }

    #[test]
    fn prism_block_keeps_constants_and_two_colorings() {
        let g = three_prism();
        let problem = whole(&g, ClassGranularity::Monochromatic);
        let mut ctx = Ctx::new(Budget::default(), None);
        let merge = MergeStrategy::Log;
        let split_by = SplitStrategy::NeighborsDegree;
        let found =
            BlockStream::subgraphs(&g, &problem, merge, split_by, 2, &mut ctx).collect_all(&mut ctx);
        assert_eq!(found.len(), 4);
        assert!(ctx.stats.units >= 3);
    }

    #[test]
    #[should_panic(expected = "same class twice")]
    fn overlapping_parts_are_an_invariant_violation() {
        let g = cycle(4);
        let problem = whole(&g, ClassGranularity::Edges);
        let mut ctx = Ctx::new(Budget::default(), None);
        let a = Part::unit(&g, &problem, vec![0, 1], &mut ctx);
        let b = Part::unit(&g, &problem, vec![1, 2], &mut ctx);
        let _ = Join::new(&g, &problem, &a, &b, &[0, 1, 2]);
    }
}

//! Public entry points and the lazy result iterator.

use std::cmp::Reverse;
use std::mem;

use super::blocks::Product;
use super::enumerate::Order;
use super::problem::BlockProblem;
use super::stats::Ctx;
use super::subgraphs::BlockStream;
use super::{Algorithm, SearchCfg, SearchError, SearchStats, MAX_UNIT_CLASSES};
use crate::classes::{find_classes, ClassId, ClassPartition};
use crate::coloring::{ClassBits, Coloring};
use crate::feasibility::{precheck, Verdict};
use crate::graph::{biconnected_components, cycle_candidates, EdgeId, Graph};
use crate::relabel::{relabel, Relabeled};

enum State {
    Pending(Vec<BlockProblem>),
    Running(Product),
    Done,
}

/// Lazy sequence of NAC-colorings in the caller's vertex labels.
///
/// Enumeration starts on the first `next()`. After the iterator ends,
/// `stats().exhausted` tells a complete search from a budget stop.
pub struct NacColorings {
    relabeled: Relabeled,
    partition: ClassPartition,
    algorithm: Algorithm,
    ctx: Ctx,
    state: State,
}

impl std::fmt::Debug for NacColorings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NacColorings")
            .field("algorithm", &self.algorithm)
            .field("stats", &self.ctx.stats)
            .finish_non_exhaustive()
    }
}

/// Validate `cfg`, do the polynomial preprocessing, and return the lazy
/// coloring sequence.
pub fn search_colorings(graph: &Graph, cfg: &SearchCfg) -> Result<NacColorings, SearchError> {
    let relabeled = relabel(graph, cfg.relabel, cfg.seed);
    let g = &relabeled.graph;
    let mut ctx = Ctx::new(cfg.budget, cfg.seed);
    tracing::info!(
        algorithm = %cfg.algorithm,
        relabel = %cfg.relabel,
        granularity = %cfg.granularity,
        vertices = g.vertex_count(),
        edges = g.edge_count(),
        "starting NAC-coloring search"
    );

    let partition = find_classes(g, cfg.granularity);
    ctx.stats.classes = partition.len();

    if cfg.use_precheck {
        let verdict = precheck(g);
        ctx.stats.precheck = Some(verdict);
        tracing::info!(%verdict, "pre-check");
        if verdict == Verdict::NoColoring {
            return Ok(NacColorings::finished(relabeled, partition, cfg.algorithm, ctx));
        }
    }
    let block_classes = if cfg.use_decompositions {
        biconnected_components(g)
            .blocks
            .iter()
            .map(|edges| classes_of(&partition, edges))
            .collect()
    } else if partition.is_empty() {
        Vec::new()
    } else {
        vec![(0..partition.len()).map(ClassId).collect::<Vec<_>>()]
    };
    debug_assert_eq!(
        block_classes.iter().map(Vec::len).sum::<usize>(),
        partition.len(),
        "every class lies in exactly one block"
    );
    ctx.stats.blocks = block_classes.len();

    if matches!(cfg.algorithm, Algorithm::Naive | Algorithm::Cycles) {
        if let Some(largest) = block_classes.iter().map(Vec::len).max() {
            if largest > MAX_UNIT_CLASSES {
                return Err(SearchError::TooManyClasses {
                    classes: largest,
                    limit: MAX_UNIT_CLASSES,
                });
            }
        }
    }

    let cycles = match cfg.algorithm {
        Algorithm::Naive => Vec::new(),
        _ => cycle_candidates(g, cfg.max_cycles_per_edge),
    };
    let class_graph = partition.class_graph(g);
    let problems: Vec<BlockProblem> = block_classes
        .iter()
        .map(|classes| BlockProblem::build(&partition, &class_graph, classes, &cycles))
        .collect();
    tracing::debug!(
        classes = partition.len(),
        blocks = problems.len(),
        cycles = cycles.len(),
        "prepared search"
    );

    Ok(NacColorings {
        relabeled,
        partition,
        algorithm: cfg.algorithm,
        ctx,
        state: State::Pending(problems),
    })
}

/// Sorted global classes of a block's edges.
fn classes_of(partition: &ClassPartition, edges: &[EdgeId]) -> Vec<ClassId> {
    let mut classes: Vec<ClassId> = edges.iter().map(|&e| partition.class_of(e)).collect();
    classes.sort_unstable();
    classes.dedup();
    classes
}

/// All colorings with the default configuration and the given algorithm string.
pub fn nac_colorings(graph: &Graph, algorithm: &str) -> Result<NacColorings, SearchError> {
    let cfg = SearchCfg::default().with_algorithm(algorithm.parse()?);
    search_colorings(graph, &cfg)
}

/// First coloring found, if any.
pub fn single_nac_coloring(
    graph: &Graph,
    cfg: &SearchCfg,
) -> Result<Option<Coloring>, SearchError> {
    Ok(search_colorings(graph, cfg)?.next())
}

/// Whether a coloring exists. `false` can also mean the budget ran out; use
/// `search_colorings` and `stats().exhausted` to tell the two apart.
pub fn has_nac_coloring(graph: &Graph, cfg: &SearchCfg) -> Result<bool, SearchError> {
    Ok(single_nac_coloring(graph, cfg)?.is_some())
}

impl NacColorings {
    fn finished(
        relabeled: Relabeled,
        partition: ClassPartition,
        algorithm: Algorithm,
        mut ctx: Ctx,
    ) -> Self {
        ctx.stats.exhausted = true;
        ctx.touch_elapsed();
        Self {
            relabeled,
            partition,
            algorithm,
            ctx,
            state: State::Done,
        }
    }

    pub fn stats(&self) -> &SearchStats {
        &self.ctx.stats
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Open one stream per block; the largest block drives the product.
    /// Nothing is enumerated yet.
    fn start(&mut self, problems: Vec<BlockProblem>) -> State {
        let Some(largest) = (0..problems.len()).max_by_key(|&i| (problems[i].len(), Reverse(i)))
        else {
            return State::Done;
        };
        let g = &self.relabeled.graph;
        let mut others = Vec::with_capacity(problems.len().saturating_sub(1));
        for (i, problem) in problems.iter().enumerate() {
            if i != largest {
                others.push((problem, open_block(g, problem, self.algorithm, &mut self.ctx)));
            }
        }
        let stream = open_block(g, &problems[largest], self.algorithm, &mut self.ctx);
        tracing::debug!(
            streamed_classes = problems[largest].len(),
            replayed = others.len(),
            units = self.ctx.stats.units,
            "block streams ready"
        );
        State::Running(Product::new(self.partition.len(), &problems[largest], stream, others))
    }

    /// Next product item that uses both colors.
    fn next_surjective(&mut self, product: &mut Product) -> Option<ClassBits> {
        let width = self.partition.len();
        loop {
            let bits = product.next(&mut self.ctx)?;
            let count = bits.count_ones();
            if count != 0 && count != width {
                return Some(bits);
            }
        }
    }

    fn coloring(&self, red: &ClassBits) -> Coloring {
        let g = &self.relabeled.graph;
        let (mut reds, mut blues) = (Vec::new(), Vec::new());
        for e in 0..g.edge_count() {
            let edge = self.relabeled.original_edge(g.edge(EdgeId(e)));
            if red.contains(self.partition.class_of(EdgeId(e)).0) {
                reds.push(edge);
            } else {
                blues.push(edge);
            }
        }
        Coloring::new(reds, blues)
    }

    fn finish(&mut self, exhausted: bool) {
        self.state = State::Done;
        self.ctx.stats.exhausted = exhausted;
        self.ctx.touch_elapsed();
        let stats = &self.ctx.stats;
        tracing::info!(
            colorings = stats.colorings,
            exhausted,
            cycle_mask_checks = stats.cycle_mask_checks,
            nac_checks = stats.nac_checks,
            elapsed_ms = stats.elapsed_ms,
            "search finished"
        );
    }
}

fn open_block(
    g: &Graph,
    problem: &BlockProblem,
    algorithm: Algorithm,
    ctx: &mut Ctx,
) -> BlockStream {
    match algorithm {
        Algorithm::Naive => BlockStream::direct(g, problem, Order::Naive, ctx),
        Algorithm::Cycles => BlockStream::direct(g, problem, Order::Gray, ctx),
        Algorithm::Subgraphs { merge, split, size } => {
            BlockStream::subgraphs(g, problem, merge, split, size, ctx)
        }
    }
}

impl Iterator for NacColorings {
    type Item = Coloring;

    fn next(&mut self) -> Option<Coloring> {
        loop {
            match mem::replace(&mut self.state, State::Done) {
                State::Done => return None,
                State::Pending(problems) => {
                    self.state = self.start(problems);
                    if matches!(self.state, State::Done) {
                        let exhausted = !self.ctx.is_cancelled();
                        self.finish(exhausted);
                        return None;
                    }
                }
                State::Running(mut product) => {
                    if !self.ctx.check() {
                        self.finish(false);
                        return None;
                    }
                    // past the result budget, look one item ahead so a search
                    // that had nothing left still counts as exhausted
                    let spent = self.ctx.results_spent();
                    let Some(bits) = self.next_surjective(&mut product) else {
                        let exhausted = !self.ctx.is_cancelled();
                        self.finish(exhausted);
                        return None;
                    };
                    if spent {
                        self.ctx.stop_for_results();
                        self.finish(false);
                        return None;
                    }
                    self.state = State::Running(product);
                    self.ctx.stats.colorings += 1;
                    self.ctx.touch_elapsed();
                    return Some(self.coloring(&bits));
                }
            }
        }
    }
}

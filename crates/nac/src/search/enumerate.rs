//! Exhaustive enumeration of one unit's class assignments.
//!
//! A unit of `k` classes has `2^k` assignments. The first member is fixed red
//! and the remaining `k - 1` bits are enumerated; each accepted pattern is
//! yielded together with its complement. Constant assignments are included,
//! the caller filters surjectivity.
//!
//! - `Naive`: binary counting, a full NAC check per pattern.
//! - `Gray`: reflected Gray code, so consecutive patterns differ in one class.
//!   Red counts of the unit's cycles are updated incrementally on each flip,
//!   together with the number of currently violated cycles; the full check
//!   only runs when no cycle is violated.

use super::problem::BlockProblem;
use super::stats::Ctx;
use crate::coloring::{ClassBits, CycleMask, EdgeSubgraph};
use crate::graph::Graph;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Order {
    Naive,
    Gray,
}

#[derive(Debug)]
pub(crate) struct UnitEnumerator {
    order: Order,
    members: Vec<usize>,
    support: ClassBits,
    sub: EdgeSubgraph,
    /// Per cycle: `(length, red count)`.
    cycles: Vec<(u32, u32)>,
    /// Per member position: `(cycle slot, multiplicity)`.
    touching: Vec<Vec<(usize, u32)>>,
    violated: usize,
    current: ClassBits,
    next_index: u64,
    total: u64,
    complement: Option<ClassBits>,
}

impl UnitEnumerator {
    /// `members` are local class indices of `problem`, at most 64 of them.
    pub(crate) fn new(
        g: &Graph,
        problem: &BlockProblem,
        members: Vec<usize>,
        order: Order,
        ctx: &mut Ctx,
    ) -> Self {
        let k = members.len();
        assert!(
            (1..=super::MAX_UNIT_CLASSES).contains(&k),
            "unit size {k} outside 1..={}",
            super::MAX_UNIT_CLASSES
        );
        let support = problem.support(&members);
        let sub = problem.subgraph(g, &members);

        let mut current = ClassBits::new(problem.len());
        current.insert(members[0]);

        let mut cycles = Vec::new();
        let mut touching = vec![Vec::new(); k];
        if order == Order::Gray {
            let inside: Vec<&CycleMask> = problem
                .cycles
                .iter()
                .filter(|mask| mask.is_inside(&support))
                .collect();
            for (slot, mask) in inside.iter().enumerate() {
                for &(class, mult) in &mask.members {
                    if let Ok(pos) = members.binary_search(&class) {
                        touching[pos].push((slot, mult));
                    }
                }
                cycles.push((mask.len, mask.red_count(&current)));
                ctx.stats.cycle_mask_checks += 1;
            }
        }
        let violated = cycles
            .iter()
            .filter(|&&(len, red)| CycleMask::violated(red, len))
            .count();

        Self {
            order,
            members,
            support,
            sub,
            cycles,
            touching,
            violated,
            current,
            next_index: 0,
            total: 1u64 << (k - 1),
            complement: None,
        }
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.sub.edge_count()
    }

    fn flip(&mut self, pos: usize, ctx: &mut Ctx) {
        let class = self.members[pos];
        let now_red = !self.current.contains(class);
        self.current.toggle(class);
        for &(slot, mult) in &self.touching[pos] {
            let (len, red) = &mut self.cycles[slot];
            let before = CycleMask::violated(*red, *len);
            if now_red {
                *red += mult;
            } else {
                *red -= mult;
            }
            let after = CycleMask::violated(*red, *len);
            match (before, after) {
                (false, true) => self.violated += 1,
                (true, false) => self.violated -= 1,
                _ => {}
            }
            ctx.stats.cycle_mask_checks += 1;
        }
    }

    fn load_binary(&mut self, index: u64) {
        for (bit, &class) in self.members[1..].iter().enumerate() {
            if ((index >> bit) & 1 == 1) != self.current.contains(class) {
                self.current.toggle(class);
            }
        }
    }

    /// Next accepted assignment, or `None` when done or cancelled.
    pub(crate) fn next(&mut self, ctx: &mut Ctx) -> Option<ClassBits> {
        if let Some(bits) = self.complement.take() {
            return Some(bits);
        }
        while self.next_index < self.total {
            if !ctx.tick() {
                return None;
            }
            let index = self.next_index;
            self.next_index += 1;
            let admissible = match self.order {
                Order::Naive => {
                    self.load_binary(index);
                    true
                }
                Order::Gray => {
                    if index > 0 {
                        self.flip(index.trailing_zeros() as usize + 1, ctx);
                    }
                    self.violated == 0
                }
            };
            if !admissible {
                continue;
            }
            ctx.stats.nac_checks += 1;
            if self.sub.is_nac(&self.current, &mut ctx.scratch) {
                self.complement = Some(self.support.difference(&self.current));
                return Some(self.current.clone());
            }
        }
        None
    }

    /// Run to completion and collect every accepted assignment.
    #[cfg(test)]
    pub(crate) fn collect_all(mut self, ctx: &mut Ctx) -> Vec<ClassBits> {
        let mut out = Vec::new();
        while let Some(bits) = self.next(ctx) {
            out.push(bits);
        }
        out
    }
}

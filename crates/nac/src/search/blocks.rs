//! Cartesian product of per-block assignments.
//!
//! Cycles never leave a block, so a global assignment is valid exactly when
//! its restriction to every block is valid there (constants included). The
//! largest block is streamed; the other blocks are pulled on demand and
//! replayed, walked with an odometer for every streamed item.

use super::problem::BlockProblem;
use super::stats::Ctx;
use super::subgraphs::{BlockStream, Replay};
use crate::coloring::ClassBits;

#[derive(Debug)]
pub(crate) struct Product {
    stream: BlockStream,
    /// Global class index of each local class of the streamed block.
    streamed_classes: Vec<usize>,
    width: usize,
    /// Other blocks: local-to-global class map plus the replayed stream.
    others: Vec<(Vec<usize>, Replay)>,
    current: Option<ClassBits>,
    odometer: Vec<usize>,
}

impl Product {
    /// `streamed` is the block behind `stream`; `others` pairs every other
    /// block with its (unstarted) stream.
    pub(crate) fn new(
        width: usize,
        streamed: &BlockProblem,
        stream: BlockStream,
        others: Vec<(&BlockProblem, BlockStream)>,
    ) -> Self {
        let others: Vec<(Vec<usize>, Replay)> = others
            .into_iter()
            .map(|(problem, stream)| {
                let map = problem.classes.iter().map(|c| c.0).collect();
                (map, Replay::new(stream))
            })
            .collect();
        Self {
            stream,
            streamed_classes: streamed.classes.iter().map(|c| c.0).collect(),
            width,
            odometer: vec![0; others.len()],
            others,
            current: None,
        }
    }

    /// Next combined assignment over all classes.
    pub(crate) fn next(&mut self, ctx: &mut Ctx) -> Option<ClassBits> {
        if self.current.is_none() {
            let local = self.stream.next(ctx)?;
            let mut bits = ClassBits::new(self.width);
            insert_global(&mut bits, &local, &self.streamed_classes);
            self.current = Some(bits);
            self.odometer.iter_mut().for_each(|d| *d = 0);
        }
        let mut out = self.current.clone()?;
        for ((map, replay), &digit) in self.others.iter_mut().zip(&self.odometer) {
            // an empty block (or a stopped search) ends the product
            let local = replay.get(digit, ctx)?;
            insert_global(&mut out, local, map);
        }
        if !self.advance(ctx) {
            self.current = None;
        }
        Some(out)
    }

    /// Step the odometer; `false` after the last combination.
    fn advance(&mut self, ctx: &mut Ctx) -> bool {
        for ((_, replay), digit) in self.others.iter_mut().zip(self.odometer.iter_mut()).rev() {
            *digit += 1;
            if replay.get(*digit, ctx).is_some() {
                return true;
            }
            *digit = 0;
        }
        false
    }
}

fn insert_global(bits: &mut ClassBits, local: &ClassBits, map: &[usize]) {
    for i in local.iter_ones() {
        bits.insert(map[i]);
    }
}

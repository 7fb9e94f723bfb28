use super::ClassBits;

/// A cycle seen through the class partition: which classes it crosses and how
/// many of its edges each one owns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleMask {
    /// `(class index, edge multiplicity)`, sorted by class index.
    pub members: Vec<(usize, u32)>,
    /// Number of edges on the cycle.
    pub len: u32,
}

impl CycleMask {
    /// Build from the class index of every edge on the cycle.
    pub fn from_classes(classes: impl IntoIterator<Item = usize>) -> Self {
        let mut all: Vec<usize> = classes.into_iter().collect();
        all.sort_unstable();
        let len = all.len() as u32;
        let mut members: Vec<(usize, u32)> = Vec::new();
        for c in all {
            match members.last_mut() {
                Some((last, mult)) if *last == c => *mult += 1,
                _ => members.push((c, 1)),
            }
        }
        Self { members, len }
    }

    /// A cycle inside one class can never be almost constant.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.members.len() < 2
    }

    /// Exactly one edge of one color on the cycle.
    #[inline]
    pub fn violated(red: u32, len: u32) -> bool {
        red == 1 || red + 1 == len
    }

    pub fn red_count(&self, red: &ClassBits) -> u32 {
        self.members
            .iter()
            .filter(|&&(c, _)| red.contains(c))
            .map(|&(_, mult)| mult)
            .sum()
    }

    /// `true` when the assignment keeps this cycle admissible.
    pub fn admits(&self, red: &ClassBits) -> bool {
        !Self::violated(self.red_count(red), self.len)
    }

    /// All member classes are set in `within`.
    pub fn is_inside(&self, within: &ClassBits) -> bool {
        self.members.iter().all(|&(c, _)| within.contains(c))
    }
}

/// Fixed-width bitset over class indices; a set bit means red.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassBits {
    words: Vec<u64>,
}

impl ClassBits {
    pub fn new(width: usize) -> Self {
        Self {
            words: vec![0; width.div_ceil(64)],
        }
    }

    #[inline]
    pub fn contains(&self, i: usize) -> bool {
        (self.words[i / 64] >> (i % 64)) & 1 == 1
    }

    #[inline]
    pub fn insert(&mut self, i: usize) {
        self.words[i / 64] |= 1 << (i % 64);
    }

    #[inline]
    pub fn toggle(&mut self, i: usize) {
        self.words[i / 64] ^= 1 << (i % 64);
    }

    pub fn union_with(&mut self, other: &ClassBits) {
        for (w, o) in self.words.iter_mut().zip(&other.words) {
            *w |= o;
        }
    }

    pub fn is_disjoint(&self, other: &ClassBits) -> bool {
        self.words.iter().zip(&other.words).all(|(a, b)| a & b == 0)
    }

    pub fn is_subset(&self, other: &ClassBits) -> bool {
        self.words.iter().zip(&other.words).all(|(a, b)| a & !b == 0)
    }

    /// `self \ other`.
    pub fn difference(&self, other: &ClassBits) -> ClassBits {
        ClassBits {
            words: self
                .words
                .iter()
                .zip(&other.words)
                .map(|(a, b)| a & !b)
                .collect(),
        }
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(k, &w)| {
            (0..64).filter(move |b| (w >> b) & 1 == 1).map(move |b| k * 64 + b)
        })
    }
}

impl FromIterator<usize> for ClassBits {
    /// Width is one past the largest index.
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let items: Vec<usize> = iter.into_iter().collect();
        let mut bits = ClassBits::new(items.iter().max().map_or(0, |m| m + 1));
        for i in items {
            bits.insert(i);
        }
        bits
    }
}

//! Algorithm selector: `naive | cycles | subgraphs | subgraphs-<merge>-<split>-<size>`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::SearchError;

/// Order in which unit results are merged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MergeStrategy {
    /// Left to right into one accumulator.
    Linear,
    /// Pairwise rounds, halving the number of parts.
    Log,
    /// Cheapest pair first (fewest candidate pairs, sharing vertices preferred).
    Score,
    /// Pair sharing the most vertices first.
    SharedVertices,
}

/// How a block's classes are grouped into units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SplitStrategy {
    /// Consecutive class indices.
    None,
    /// BFS over class adjacency from the lowest unassigned class.
    Neighbors,
    /// Growth from the lowest-degree class, low-degree neighbors first.
    NeighborsDegree,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Algorithm {
    Naive,
    Cycles,
    Subgraphs {
        merge: MergeStrategy,
        split: SplitStrategy,
        size: usize,
    },
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::Subgraphs {
            merge: MergeStrategy::Log,
            split: SplitStrategy::NeighborsDegree,
            size: 4,
        }
    }
}

impl FromStr for MergeStrategy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Self::Linear),
            "log" => Ok(Self::Log),
            "score" => Ok(Self::Score),
            "shared_vertices" => Ok(Self::SharedVertices),
            other => Err(SearchError::UnknownMergeStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Linear => "linear",
            Self::Log => "log",
            Self::Score => "score",
            Self::SharedVertices => "shared_vertices",
        })
    }
}

impl FromStr for SplitStrategy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "neighbors" => Ok(Self::Neighbors),
            "neighbors_degree" => Ok(Self::NeighborsDegree),
            other => Err(SearchError::UnknownSplitStrategy(other.to_string())),
        }
    }
}

impl fmt::Display for SplitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Neighbors => "neighbors",
            Self::NeighborsDegree => "neighbors_degree",
        })
    }
}

fn parse_size(token: &str) -> Result<usize, SearchError> {
    match token.parse::<usize>() {
        Ok(size) if size >= 1 => Ok(size),
        _ => Err(SearchError::InvalidSubgraphSize(token.to_string())),
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();
        match parts.as_slice() {
            ["naive"] => Ok(Algorithm::Naive),
            ["cycles"] => Ok(Algorithm::Cycles),
            ["subgraphs"] => Ok(Algorithm::default()),
            ["subgraphs", merge, split, size] => Ok(Algorithm::Subgraphs {
                merge: merge.parse()?,
                split: split.parse()?,
                size: parse_size(size)?,
            }),
            _ => Err(SearchError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Naive => f.write_str("naive"),
            Algorithm::Cycles => f.write_str("cycles"),
            Algorithm::Subgraphs { merge, split, size } => {
                write!(f, "subgraphs-{merge}-{split}-{size}")
            }
        }
    }
}

impl TryFrom<String> for Algorithm {
    type Error = SearchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Algorithm> for String {
    fn from(value: Algorithm) -> Self {
        value.to_string()
    }
}

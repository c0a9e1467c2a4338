use std::fmt;

use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};

use self::avl_tree::{AvlTree, Insertion};
use crate::{
    error::{Result, TrafficError},
    graphs::{Graph, VertexId},
};

pub mod avl_tree;

pub type Congestion = u32;

/// Canonical, direction independent identifier of a road segment.
///
/// For a graph with `V` vertices the segment `{u, v}` is encoded as
/// `min(u, v) * V + max(u, v)`. The encoding is only collision free for
/// endpoints below `V`, which is why keys are created by a
/// [`CongestionIndex`] that knows `V`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey(u64);

impl EdgeKey {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Informative classification of a congestion level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CongestionBand {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl CongestionBand {
    pub fn from_level(level: Congestion) -> CongestionBand {
        match level {
            0..=1 => CongestionBand::Low,
            2..=3 => CongestionBand::Moderate,
            4..=5 => CongestionBand::High,
            _ => CongestionBand::VeryHigh,
        }
    }
}

impl fmt::Display for CongestionBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let band = match self {
            CongestionBand::Low => "low",
            CongestionBand::Moderate => "moderate",
            CongestionBand::High => "high",
            CongestionBand::VeryHigh => "very high",
        };
        write!(f, "{}", band)
    }
}

/// What to do when a segment is registered a second time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// The latest report replaces the stored level.
    #[default]
    Overwrite,
    /// The first report is kept and later ones are ignored.
    KeepFirst,
}

/// Ordered index of congestion levels per road segment.
///
/// The vertex count is bound at construction, so every key this index
/// produces or accepts is collision free. Insertion and lookup are logarithmic
/// in the number of registered segments. Segments without an entry have no
/// congestion.
#[derive(Clone, Debug)]
pub struct CongestionIndex {
    number_of_vertices: u32,
    tree: AvlTree<EdgeKey, Congestion>,
}

impl CongestionIndex {
    pub fn new(number_of_vertices: u32) -> CongestionIndex {
        CongestionIndex {
            number_of_vertices,
            tree: AvlTree::new(),
        }
    }

    pub fn for_graph(graph: &dyn Graph) -> CongestionIndex {
        CongestionIndex::new(graph.number_of_vertices())
    }

    pub fn number_of_vertices(&self) -> u32 {
        self.number_of_vertices
    }

    pub fn edge_key(&self, tail: VertexId, head: VertexId) -> Result<EdgeKey> {
        for vertex in [tail, head] {
            if vertex >= self.number_of_vertices {
                return Err(TrafficError::VertexOutOfRange {
                    vertex,
                    number_of_vertices: self.number_of_vertices,
                });
            }
        }

        Ok(self.edge_key_unchecked(tail, head))
    }

    fn edge_key_unchecked(&self, tail: VertexId, head: VertexId) -> EdgeKey {
        let low = std::cmp::min(tail, head) as u64;
        let high = std::cmp::max(tail, head) as u64;
        EdgeKey(low * self.number_of_vertices as u64 + high)
    }

    /// Recovers the `(min, max)` endpoints of a key created by this index.
    pub fn endpoints(&self, key: EdgeKey) -> Option<(VertexId, VertexId)> {
        let number_of_vertices = self.number_of_vertices as u64;
        let low = key.0.checked_div(number_of_vertices)?;
        let high = key.0.checked_rem(number_of_vertices)?;
        if low > high {
            return None;
        }
        Some((low as VertexId, high as VertexId))
    }

    /// Registers congestion for the segment `{tail, head}`. An existing level
    /// is replaced and returned.
    pub fn register(
        &mut self,
        tail: VertexId,
        head: VertexId,
        level: Congestion,
    ) -> Result<Option<Congestion>> {
        let key = self.edge_key(tail, head)?;
        match self.tree.insert(key, level) {
            Insertion::Replaced(previous) => {
                debug!(
                    "congestion of segment {}-{} changed from {} to {}",
                    tail, head, previous, level
                );
                Ok(Some(previous))
            }
            _ => Ok(None),
        }
    }

    /// Registers congestion for the segment `{tail, head}` unless the segment
    /// already has an entry. Returns whether the level was stored.
    pub fn register_if_absent(
        &mut self,
        tail: VertexId,
        head: VertexId,
        level: Congestion,
    ) -> Result<bool> {
        let key = self.edge_key(tail, head)?;
        match self.tree.insert_if_absent(key, level) {
            Insertion::Kept => {
                debug!(
                    "ignoring congestion {} for segment {}-{}, already registered",
                    level, tail, head
                );
                Ok(false)
            }
            _ => Ok(true),
        }
    }

    pub fn register_with(
        &mut self,
        tail: VertexId,
        head: VertexId,
        level: Congestion,
        policy: DuplicatePolicy,
    ) -> Result<()> {
        match policy {
            DuplicatePolicy::Overwrite => self.register(tail, head, level).map(|_| ()),
            DuplicatePolicy::KeepFirst => self.register_if_absent(tail, head, level).map(|_| ()),
        }
    }

    pub fn get(&self, key: EdgeKey) -> Option<Congestion> {
        self.tree.get(&key).copied()
    }

    /// Registered congestion of the segment `{tail, head}`. Endpoints outside
    /// the index's vertex range never have an entry.
    pub fn congestion(&self, tail: VertexId, head: VertexId) -> Option<Congestion> {
        let key = self.edge_key(tail, head).ok()?;
        self.get(key)
    }

    /// Congestion to add to the base weight of the segment, zero if none is
    /// registered.
    pub fn penalty(&self, tail: VertexId, head: VertexId) -> Congestion {
        self.congestion(tail, head).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn height(&self) -> u32 {
        self.tree.height()
    }

    pub fn is_balanced(&self) -> bool {
        self.tree.is_balanced()
    }

    /// All entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (EdgeKey, Congestion)> + '_ {
        self.tree.iter().map(|(key, level)| (*key, *level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_direction_agnostic() {
        let index = CongestionIndex::new(30);
        assert_eq!(index.edge_key(1, 8).unwrap(), index.edge_key(8, 1).unwrap());
        assert_eq!(index.edge_key(1, 8).unwrap().value(), 38);
        assert_eq!(index.endpoints(EdgeKey(38)), Some((1, 8)));
        assert_eq!(index.endpoints(EdgeKey(241)), None);
    }

    #[test]
    fn lookup_in_both_directions() {
        let mut index = CongestionIndex::new(4);
        index.register(2, 0, 5).unwrap();

        assert_eq!(index.congestion(0, 2), Some(5));
        assert_eq!(index.congestion(2, 0), Some(5));
        assert_eq!(index.penalty(1, 2), 0);
    }

    #[test]
    fn out_of_range_vertex_is_rejected() {
        let mut index = CongestionIndex::new(3);
        assert!(matches!(
            index.register(0, 3, 1),
            Err(TrafficError::VertexOutOfRange { vertex: 3, .. })
        ));
        // 0 * 3 + 4 would collide with {1, 1}
        index.register(1, 1, 4).unwrap();
        assert_eq!(index.congestion(0, 4), None);
    }

    #[test]
    fn register_overwrites() {
        let mut index = CongestionIndex::new(30);
        assert_eq!(index.register(0, 1, 10).unwrap(), None);
        assert_eq!(index.register(1, 0, 6).unwrap(), Some(10));
        assert_eq!(index.congestion(0, 1), Some(6));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn register_if_absent_keeps_first() {
        let mut index = CongestionIndex::new(30);
        assert!(index.register_if_absent(0, 1, 10).unwrap());
        assert!(!index.register_if_absent(0, 1, 6).unwrap());
        assert_eq!(index.congestion(0, 1), Some(10));

        index
            .register_with(0, 1, 3, DuplicatePolicy::KeepFirst)
            .unwrap();
        assert_eq!(index.congestion(0, 1), Some(10));
        index
            .register_with(0, 1, 3, DuplicatePolicy::Overwrite)
            .unwrap();
        assert_eq!(index.congestion(0, 1), Some(3));
    }

    #[test]
    fn bands() {
        assert_eq!(CongestionBand::from_level(0), CongestionBand::Low);
        assert_eq!(CongestionBand::from_level(1), CongestionBand::Low);
        assert_eq!(CongestionBand::from_level(2), CongestionBand::Moderate);
        assert_eq!(CongestionBand::from_level(3), CongestionBand::Moderate);
        assert_eq!(CongestionBand::from_level(5), CongestionBand::High);
        assert_eq!(CongestionBand::from_level(6), CongestionBand::VeryHigh);
        assert_eq!(CongestionBand::VeryHigh.to_string(), "very high");
    }

    #[test]
    fn iteration_is_ordered() {
        let mut index = CongestionIndex::new(10);
        index.register(9, 8, 1).unwrap();
        index.register(0, 1, 2).unwrap();
        index.register(4, 2, 3).unwrap();

        let keys: Vec<_> = index.iter().map(|(key, _)| key.value()).collect();
        assert_eq!(keys, vec![1, 24, 89]);
    }
}

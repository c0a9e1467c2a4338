use serde::{Deserialize, Serialize};

use super::{VertexId, Weight};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, PartialOrd, Ord, Debug)]
pub struct WeightedEdge {
    tail: VertexId,
    head: VertexId,
    weight: Weight,
}

impl WeightedEdge {
    pub fn new(tail: VertexId, head: VertexId, weight: Weight) -> WeightedEdge {
        WeightedEdge { tail, head, weight }
    }

    pub fn tail(&self) -> VertexId {
        self.tail
    }

    pub fn head(&self) -> VertexId {
        self.head
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaillessEdge {
    head: VertexId,
    weight: Weight,
}

impl TaillessEdge {
    pub fn new(head: VertexId, weight: Weight) -> TaillessEdge {
        TaillessEdge { head, weight }
    }

    pub fn head(&self) -> VertexId {
        self.head
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn set_tail(&self, tail: VertexId) -> WeightedEdge {
        WeightedEdge::new(tail, self.head, self.weight)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Hash, PartialEq, Eq)]
pub struct DirectedEdge {
    tail: VertexId,
    head: VertexId,
}

impl DirectedEdge {
    pub fn new(tail: VertexId, head: VertexId) -> DirectedEdge {
        DirectedEdge { tail, head }
    }

    pub fn tail(&self) -> VertexId {
        self.tail
    }

    pub fn head(&self) -> VertexId {
        self.head
    }
}

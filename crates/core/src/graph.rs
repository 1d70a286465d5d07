use crate::PointCloud;

/// A directed edge between two node indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
}

impl Edge {
    pub fn new(source: usize, target: usize) -> Self {
        Self { source, target }
    }

    pub fn reversed(self) -> Self {
        Self {
            source: self.target,
            target: self.source,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Per-edge attribute column, one entry per edge in [`Graph::edges`] order.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeAttr {
    /// Euclidean length of the edge.
    Distance(Vec<f32>),
    /// `target - source` position difference.
    Displacement(Vec<[f32; 3]>),
}

impl EdgeAttr {
    pub fn len(&self) -> usize {
        match self {
            EdgeAttr::Distance(d) => d.len(),
            EdgeAttr::Displacement(d) => d.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Nodes of a point cloud plus a directed edge list.
///
/// Node `i` is point `i` of `nodes`; the cloud is carried unchanged, features
/// included.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    pub nodes: PointCloud,
    pub edges: Vec<Edge>,
    pub edge_attr: Option<EdgeAttr>,
}

impl Graph {
    /// A graph with no edges.
    pub fn new(nodes: PointCloud) -> Self {
        Self {
            nodes,
            edges: Vec::new(),
            edge_attr: None,
        }
    }

    /// # Panics
    ///
    /// Panics if an edge references a node index out of bounds.
    pub fn from_edges(nodes: PointCloud, edges: Vec<Edge>) -> Self {
        let n = nodes.len();
        assert!(
            edges.iter().all(|e| e.source < n && e.target < n),
            "edge endpoint out of bounds"
        );
        Self {
            nodes,
            edges,
            edge_attr: None,
        }
    }

    /// # Panics
    ///
    /// Panics if the attribute column length differs from the edge count.
    pub fn with_edge_attr(mut self, attr: EdgeAttr) -> Self {
        assert_eq!(
            attr.len(),
            self.edges.len(),
            "edge attribute must have one entry per edge"
        );
        self.edge_attr = Some(attr);
        self
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Edges as parallel `(sources, targets)` columns.
    pub fn edge_index(&self) -> (Vec<usize>, Vec<usize>) {
        self.edges.iter().map(|e| (e.source, e.target)).unzip()
    }

    pub fn out_degree(&self, node: usize) -> usize {
        self.edges.iter().filter(|e| e.source == node).count()
    }

    pub fn out_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.num_nodes()];
        for e in &self.edges {
            degrees[e.source] += 1;
        }
        degrees
    }

    /// Targets of edges leaving `node`, in edge order.
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.edges
            .iter()
            .filter(move |e| e.source == node)
            .map(|e| e.target)
    }

    pub fn has_self_loops(&self) -> bool {
        self.edges.iter().any(Edge::is_self_loop)
    }

    /// True when every edge `(a, b)` has a matching `(b, a)`.
    pub fn is_undirected(&self) -> bool {
        let mut forward: Vec<Edge> = self.edges.clone();
        let mut backward: Vec<Edge> = self.edges.iter().map(|e| e.reversed()).collect();
        forward.sort_unstable();
        forward.dedup();
        backward.sort_unstable();
        backward.dedup();
        forward == backward
    }
}

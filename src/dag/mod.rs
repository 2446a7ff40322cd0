//! The game DAG built while *generating* (§4.3, §4.8): two vertex
//! kinds, adversary and algorithm, alternating along edges labelled
//! either by the item sent or the bin it was placed in. Deduplicated
//! by state hash so that transpositions collapse onto one vertex,
//! the way `dag::add_adv_vertex`/`add_alg_vertex` do against
//! `adv_by_hash`/`alg_by_hash`.
//!
//! Exploring mode never touches this structure -- it only reads
//! `BinConf`s and writes to the caches in [`crate::cache`].

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::binconf::BinConf;
use crate::heuristics::HeuristicStrategy;
use crate::{BinHash, Size};

/// a vertex's standing in the generation process. `Expand` marks a
/// boundary vertex handed off as a task (§4.9); `Fixed` marks a
/// vertex whose subtree was already resolved by a previous
/// computation but has not been regenerated this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertState {
    Fresh,
    Expand,
    Fixed,
    Finished,
}

/// the outcome recorded at a vertex. `Irrelevant` marks a vertex that
/// generation visited but pruned before a verdict was needed (e.g. a
/// sibling of an already-winning move).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Victory {
    AdvWins,
    AlgWins,
    Uncertain,
    Irrelevant,
}

impl Victory {
    pub fn is_decided(self) -> bool {
        matches!(self, Victory::AdvWins | Victory::AlgWins)
    }
}

#[derive(Debug, Clone)]
pub struct AdvVertex {
    pub conf: BinConf,
    pub state: VertState,
    pub win: Victory,
    pub heuristic: Option<HeuristicStrategy>,
    pub is_task: bool,
    pub sapling: bool,
}

impl AdvVertex {
    fn new(conf: BinConf) -> Self {
        Self {
            conf,
            state: VertState::Fresh,
            win: Victory::Uncertain,
            heuristic: None,
            is_task: false,
            sapling: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AlgVertex {
    pub conf: BinConf,
    pub next_item: Size,
    pub state: VertState,
    pub win: Victory,
}

impl AlgVertex {
    fn new(conf: BinConf, next_item: Size) -> Self {
        Self {
            conf,
            next_item,
            state: VertState::Fresh,
            win: Victory::Uncertain,
        }
    }
}

#[derive(Debug, Clone)]
pub enum VertexData {
    Adv(AdvVertex),
    Alg(AlgVertex),
}

impl VertexData {
    pub fn as_adv(&self) -> Option<&AdvVertex> {
        match self {
            VertexData::Adv(v) => Some(v),
            VertexData::Alg(_) => None,
        }
    }

    pub fn as_adv_mut(&mut self) -> Option<&mut AdvVertex> {
        match self {
            VertexData::Adv(v) => Some(v),
            VertexData::Alg(_) => None,
        }
    }

    pub fn as_alg(&self) -> Option<&AlgVertex> {
        match self {
            VertexData::Alg(v) => Some(v),
            VertexData::Adv(_) => None,
        }
    }

    pub fn as_alg_mut(&mut self) -> Option<&mut AlgVertex> {
        match self {
            VertexData::Alg(v) => Some(v),
            VertexData::Adv(_) => None,
        }
    }
}

/// an edge out of an adversary vertex is labelled with the item sent;
/// an edge out of an algorithm vertex is labelled with the bin it was
/// placed into.
#[derive(Debug, Clone, Copy)]
pub enum EdgeLabel {
    Item(Size),
    Bin(usize),
}

/// the game tree, deduplicated by state hash. Mirrors `dag` from the
/// original, built on `petgraph::StableDiGraph` so vertex removal
/// (not currently exercised by this crate's exploring path) does not
/// invalidate existing `NodeIndex` values.
pub struct Dag {
    graph: StableDiGraph<VertexData, EdgeLabel>,
    adv_by_hash: HashMap<BinHash, NodeIndex>,
    alg_by_hash: HashMap<BinHash, NodeIndex>,
    root: Option<NodeIndex>,
}

impl Dag {
    pub fn new() -> Self {
        Self {
            graph: StableDiGraph::new(),
            adv_by_hash: HashMap::new(),
            alg_by_hash: HashMap::new(),
            root: None,
        }
    }

    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    pub fn add_root(&mut self, conf: BinConf) -> NodeIndex {
        let idx = self.get_or_insert_adv(conf);
        self.root = Some(idx);
        idx
    }

    /// find or create the adversary vertex for `conf`'s state hash.
    pub fn get_or_insert_adv(&mut self, conf: BinConf) -> NodeIndex {
        let hash = conf.state_hash();
        if let Some(&idx) = self.adv_by_hash.get(&hash) {
            return idx;
        }
        let idx = self.graph.add_node(VertexData::Adv(AdvVertex::new(conf)));
        self.adv_by_hash.insert(hash, idx);
        idx
    }

    pub fn get_or_insert_alg(&mut self, conf: BinConf, next_item: Size) -> NodeIndex {
        let hash = conf.state_hash() ^ (next_item as BinHash).wrapping_mul(0x9E3779B97F4A7C15);
        if let Some(&idx) = self.alg_by_hash.get(&hash) {
            return idx;
        }
        let idx = self
            .graph
            .add_node(VertexData::Alg(AlgVertex::new(conf, next_item)));
        self.alg_by_hash.insert(hash, idx);
        idx
    }

    pub fn add_adv_edge(&mut self, from: NodeIndex, to: NodeIndex, item: Size) {
        self.graph.add_edge(from, to, EdgeLabel::Item(item));
    }

    pub fn add_alg_edge(&mut self, from: NodeIndex, to: NodeIndex, bin: usize) {
        self.graph.add_edge(from, to, EdgeLabel::Bin(bin));
    }

    pub fn adv(&self, idx: NodeIndex) -> &AdvVertex {
        self.graph[idx].as_adv().expect("index does not name an adversary vertex")
    }

    pub fn adv_mut(&mut self, idx: NodeIndex) -> &mut AdvVertex {
        self.graph[idx].as_adv_mut().expect("index does not name an adversary vertex")
    }

    pub fn alg(&self, idx: NodeIndex) -> &AlgVertex {
        self.graph[idx].as_alg().expect("index does not name an algorithm vertex")
    }

    pub fn alg_mut(&mut self, idx: NodeIndex) -> &mut AlgVertex {
        self.graph[idx].as_alg_mut().expect("index does not name an algorithm vertex")
    }

    pub fn children(&self, idx: NodeIndex) -> impl Iterator<Item = (EdgeLabel, NodeIndex)> + '_ {
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (*e.weight(), e.target()))
    }

    pub fn parents(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(idx, Direction::Incoming)
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// every boundary vertex marked `Expand` -- the flat task list the
    /// scheduler hands out, built on demand rather than kept
    /// incrementally, since it is only read once generation finishes
    /// a round.
    pub fn tasks(&self) -> Vec<NodeIndex> {
        self.adv_by_hash
            .values()
            .copied()
            .filter(|&idx| self.adv(idx).state == VertState::Expand)
            .collect()
    }

    /// every adversary vertex's index, for external consumers that
    /// need to walk the whole DAG (e.g. a text-format writer). This
    /// crate does not ship such a writer; the accessor exists so one
    /// can be built against a stable surface.
    pub fn adv_vertices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.adv_by_hash.values().copied()
    }

    /// every algorithm vertex's index, symmetric to [`Dag::adv_vertices`].
    pub fn alg_vertices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.alg_by_hash.values().copied()
    }
}

impl Default for Dag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binconf::ZobristTable;
    use crate::params::GameParams;

    #[test]
    fn identical_state_hashes_collapse_to_one_vertex() {
        let params = GameParams::toy();
        let zobrist = ZobristTable::new(params, 4);
        let mut a = BinConf::empty(params);
        a.assign_and_rehash(1, 0, &zobrist);
        let mut b = BinConf::empty(params);
        b.assign_and_rehash(1, 0, &zobrist);

        let mut dag = Dag::new();
        let idx_a = dag.get_or_insert_adv(a);
        let idx_b = dag.get_or_insert_adv(b);
        assert_eq!(idx_a, idx_b);
        assert_eq!(dag.vertex_count(), 1);
    }

    #[test]
    fn root_and_children_are_linked() {
        let params = GameParams::toy();
        let zobrist = ZobristTable::new(params, 4);
        let root_conf = BinConf::empty(params);
        let mut dag = Dag::new();
        let root = dag.add_root(root_conf.clone());

        let mut child_conf = root_conf;
        child_conf.assign_and_rehash(1, 0, &zobrist);
        let alg = dag.get_or_insert_alg(child_conf, 1);
        dag.add_adv_edge(root, alg, 1);

        let children: Vec<_> = dag.children(root).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].1, alg);
    }

    #[test]
    fn vertex_iterators_cover_both_kinds() {
        let params = GameParams::toy();
        let zobrist = ZobristTable::new(params, 4);
        let root_conf = BinConf::empty(params);
        let mut dag = Dag::new();
        let root = dag.add_root(root_conf.clone());

        let mut child_conf = root_conf;
        child_conf.assign_and_rehash(1, 0, &zobrist);
        let alg = dag.get_or_insert_alg(child_conf, 1);
        dag.add_adv_edge(root, alg, 1);

        assert_eq!(dag.adv_vertices().count(), 1);
        assert_eq!(dag.alg_vertices().count(), 1);
        assert!(dag.adv_vertices().any(|idx| idx == root));
        assert!(dag.alg_vertices().any(|idx| idx == alg));
    }
}

//! The typed layer-graph DAG.

use indexmap::IndexSet;

use helm_core::{set_accepts, Layer};

use crate::error::ShapeError;
use crate::handle::LayerHandle;

/// A directed acyclic graph of [`Layer`]s.
///
/// Layers are registered with [`Self::add_layer`], which returns a stable
/// [`LayerHandle`]; edges are then declared with [`Self::add_connection`]
/// (or the batch helpers [`Self::add_connections`]/[`Self::add_chain`]),
/// which validate that parent and child share a compatible task interface
/// and that the edge does not close a cycle.
///
/// Every registered layer is a vertex, whether or not it participates in
/// any edge — `setup` must run on every layer the caller wired up, not
/// only ones reachable through an edge.
#[derive(Default)]
pub struct LayerGraph {
    layers: Vec<Box<dyn Layer>>,
    children: indexmap::IndexMap<LayerHandle, IndexSet<LayerHandle>>,
    parents: indexmap::IndexMap<LayerHandle, IndexSet<LayerHandle>>,
}

impl LayerGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a layer, returning its handle.
    pub fn add_layer(&mut self, layer: Box<dyn Layer>) -> LayerHandle {
        let handle = LayerHandle(self.layers.len() as u32);
        self.layers.push(layer);
        handle
    }

    /// Borrows the layer behind `handle`.
    pub fn layer(&self, handle: LayerHandle) -> &dyn Layer {
        self.layers[handle.0 as usize].as_ref()
    }

    /// Mutably borrows the layer behind `handle`.
    pub fn layer_mut(&mut self, handle: LayerHandle) -> &mut dyn Layer {
        self.layers[handle.0 as usize].as_mut()
    }

    /// Declares `parent -> child`. Fails if their task interfaces share no
    /// compatible kind, or if the edge would close a cycle (in which case
    /// the edge is not added).
    pub fn add_connection(
        &mut self,
        parent: LayerHandle,
        child: LayerHandle,
    ) -> Result<(), ShapeError> {
        let parent_outs = self.layer(parent).output_tasks();
        let child_ins = self.layer(child).input_tasks();
        let compatible = parent_outs
            .iter()
            .any(|&out_kind| set_accepts(&child_ins, out_kind));
        if !compatible {
            return Err(ShapeError::IncompatibleInterface { parent, child });
        }

        self.children.entry(parent).or_default().insert(child);
        self.parents.entry(child).or_default().insert(parent);

        if self.has_cycle_from(parent) {
            self.children.get_mut(&parent).unwrap().shift_remove(&child);
            self.parents.get_mut(&child).unwrap().shift_remove(&parent);
            return Err(ShapeError::Cycle { parent, child });
        }
        Ok(())
    }

    /// Declares a batch of `(parent, child)` edges, stopping at the first
    /// error.
    pub fn add_connections(
        &mut self,
        connections: impl IntoIterator<Item = (LayerHandle, LayerHandle)>,
    ) -> Result<(), ShapeError> {
        for (parent, child) in connections {
            self.add_connection(parent, child)?;
        }
        Ok(())
    }

    /// Declares a linear chain `chain[0] -> chain[1] -> ... -> chain[n-1]`.
    pub fn add_chain(&mut self, chain: &[LayerHandle]) -> Result<(), ShapeError> {
        if chain.len() < 2 {
            return Err(ShapeError::ChainTooShort);
        }
        for pair in chain.windows(2) {
            self.add_connection(pair[0], pair[1])?;
        }
        Ok(())
    }

    /// Every registered layer.
    pub fn get_verts(&self) -> Vec<LayerHandle> {
        (0..self.layers.len() as u32).map(LayerHandle).collect()
    }

    /// `vertex`'s children, or an empty set if it has none.
    pub fn get_children(&self, vertex: LayerHandle) -> IndexSet<LayerHandle> {
        self.children.get(&vertex).cloned().unwrap_or_default()
    }

    /// `vertex`'s parents, or an empty set if it has none.
    pub fn get_parents(&self, vertex: LayerHandle) -> IndexSet<LayerHandle> {
        self.parents.get(&vertex).cloned().unwrap_or_default()
    }

    /// Vertices with no parents.
    pub fn get_sources(&self) -> Vec<LayerHandle> {
        self.get_verts()
            .into_iter()
            .filter(|v| self.parents.get(v).is_none_or(|s| s.is_empty()))
            .collect()
    }

    /// Vertices with no children.
    pub fn get_sinks(&self) -> Vec<LayerHandle> {
        self.get_verts()
            .into_iter()
            .filter(|v| self.children.get(v).is_none_or(|s| s.is_empty()))
            .collect()
    }

    fn has_cycle_from(&self, start: LayerHandle) -> bool {
        let mut visited: IndexSet<LayerHandle> = IndexSet::new();
        let mut stack: Vec<(LayerHandle, std::vec::IntoIter<LayerHandle>)> =
            vec![(start, self.get_children(start).into_iter().collect::<Vec<_>>().into_iter())];
        while let Some(top) = stack.last_mut() {
            match top.1.next() {
                Some(child) => {
                    if stack.iter().any(|(node, _)| *node == child) {
                        return true;
                    }
                    if visited.contains(&child) {
                        continue;
                    }
                    visited.insert(child);
                    let grandchildren = self.get_children(child).into_iter().collect::<Vec<_>>();
                    stack.push((child, grandchildren.into_iter()));
                }
                None => {
                    stack.pop();
                }
            }
        }
        false
    }
}

//! One parallel batch of the bulk import.
//!
//! Each importer owns a disjoint slice of the mapped id space and a
//! batch-local matrix whose rows are indexed relative to the slice start
//! while targets stay global. Nothing is shared mutably between batches;
//! the post-scan merges (`write_into`, [`Relationships`]) run
//! single-threaded after all batches have joined.

use tracing::trace;

use crate::error::{GraphError, Result};
use crate::graph::config::LoadConfig;
use crate::graph::id_map::{IdBatch, IdMapping};
use crate::graph::matrix::AdjacencyMatrix;
use crate::graph::weights::WeightMap;
use crate::import::source::{ImportProgress, RelationshipRecord, RelationshipSource};
use crate::import::visitor::{LoadStrategy, Visit};
use crate::model::{combine_ids, NodeId};
use crate::sort::IndirectSort;
use crate::tracker::AllocationTracker;

/// Finished adjacency of one batch: `rows` node slots destined for
/// `offset` in the global matrix.
pub struct Relationships {
    /// First global row the batch covers.
    pub offset: usize,
    /// Number of node rows.
    pub rows: usize,
    /// The batch-local matrix holding those rows.
    pub matrix: AdjacencyMatrix,
}

/// Import worker for one disjoint node-id batch.
pub struct RelationshipImporter<'a, S, I> {
    config: &'a LoadConfig,
    batch: IdBatch,
    strategy: LoadStrategy,
    source: &'a S,
    id_map: &'a I,
    progress: &'a dyn ImportProgress,
    matrix: AdjacencyMatrix,
    weights: WeightMap,
    out_targets: Vec<NodeId>,
    out_weights: Vec<f32>,
    in_sources: Vec<NodeId>,
    in_weights: Vec<f32>,
    indirect: IndirectSort,
    imported: u64,
}

impl<'a, S: RelationshipSource, I: IdMapping> RelationshipImporter<'a, S, I> {
    /// Creates the worker for `batch`; no scanning happens yet.
    pub fn new(
        config: &'a LoadConfig,
        batch: IdBatch,
        source: &'a S,
        id_map: &'a I,
        progress: &'a dyn ImportProgress,
        tracker: AllocationTracker,
    ) -> Self {
        let strategy = LoadStrategy::from_config(config);
        let matrix = AdjacencyMatrix::new(batch.length, strategy.matrix_direction(), tracker);
        let weights = WeightMap::new(config.default_weight);
        Self {
            config,
            batch,
            strategy,
            source,
            id_map,
            progress,
            matrix,
            weights,
            out_targets: Vec::new(),
            out_weights: Vec::new(),
            in_sources: Vec::new(),
            in_weights: Vec::new(),
            indirect: IndirectSort::new(),
            imported: 0,
        }
    }

    /// Scans every node of the batch and populates the local matrix.
    pub fn run(&mut self) -> Result<()> {
        let Some(scan_direction) = self.strategy.scan_direction() else {
            self.progress.relationships_imported(0);
            return Ok(());
        };
        let source = self.source;
        for local in 0..self.batch.length {
            let node = self.batch.start + local as NodeId;
            let original = self.id_map.to_original(node);
            let mut failure: Option<GraphError> = None;
            source.scan(original, scan_direction, &mut |record| {
                if failure.is_some() {
                    return;
                }
                if let Err(e) = self.visit_record(node, local as u64, record) {
                    failure = Some(e);
                }
            });
            if let Some(e) = failure {
                return Err(e);
            }
            self.flush_staged(node, local as u64)?;
        }
        self.progress.relationships_imported(self.imported);
        trace!(
            start = self.batch.start,
            length = self.batch.length,
            imported = self.imported,
            "batch scan finished"
        );
        Ok(())
    }

    /// Adjacency entries written by this batch so far.
    pub fn imported(&self) -> u64 {
        self.imported
    }

    fn visit_record(&mut self, node: NodeId, row: u64, record: RelationshipRecord) -> Result<()> {
        match self.strategy {
            LoadStrategy::Outgoing => {
                if let Some(target) = self.id_map.to_mapped(record.target) {
                    self.write(node, row, target, record.weight, Visit::Outgoing)?;
                }
            }
            LoadStrategy::Incoming => {
                if let Some(source) = self.id_map.to_mapped(record.source) {
                    self.write(node, row, source, record.weight, Visit::Incoming)?;
                }
            }
            LoadStrategy::Both => {
                let original = self.id_map.to_original(node);
                if record.source == original {
                    if let Some(target) = self.id_map.to_mapped(record.target) {
                        self.write(node, row, target, record.weight, Visit::Outgoing)?;
                    }
                }
                if record.target == original {
                    if let Some(source) = self.id_map.to_mapped(record.source) {
                        self.write(node, row, source, record.weight, Visit::Incoming)?;
                    }
                }
            }
            LoadStrategy::Undirected => {
                let original = self.id_map.to_original(node);
                let neighbor = if record.source == original {
                    record.target
                } else {
                    record.source
                };
                if let Some(neighbor) = self.id_map.to_mapped(neighbor) {
                    self.write(node, row, neighbor, record.weight, Visit::Outgoing)?;
                }
            }
            LoadStrategy::Skip => {}
        }
        Ok(())
    }

    /// Writes one adjacency entry, either directly or staged for the
    /// aligned co-sort of the weighted sorted path.
    fn write(
        &mut self,
        node: NodeId,
        row: u64,
        neighbor: NodeId,
        weight: Option<f64>,
        visit: Visit,
    ) -> Result<()> {
        if self.config.with_weights && self.config.sorted {
            let weight = weight.unwrap_or(self.config.default_weight) as f32;
            match visit {
                Visit::Outgoing => {
                    self.out_targets.push(neighbor);
                    self.out_weights.push(weight);
                }
                Visit::Incoming => {
                    self.in_sources.push(neighbor);
                    self.in_weights.push(weight);
                }
            }
            self.imported += 1;
            return Ok(());
        }
        match visit {
            Visit::Outgoing => {
                self.matrix.add_outgoing(row, u64::from(neighbor))?;
                if self.config.with_weights {
                    let value = weight.unwrap_or(self.config.default_weight);
                    self.weights.put(combine_ids(node, neighbor), value);
                }
            }
            Visit::Incoming => {
                self.matrix.add_incoming(u64::from(neighbor), row)?;
                if self.config.with_weights {
                    let value = weight.unwrap_or(self.config.default_weight);
                    self.weights.put(combine_ids(neighbor, node), value);
                }
            }
        }
        self.imported += 1;
        Ok(())
    }

    /// Flushes one node's staged weighted records: co-sorts targets and
    /// weights, collapses duplicate targets (first record wins), arms the
    /// row with the exact degree and writes it out.
    fn flush_staged(&mut self, node: NodeId, row: u64) -> Result<()> {
        if !(self.config.with_weights && self.config.sorted) {
            return Ok(());
        }
        if !self.out_targets.is_empty() {
            let staged = self.out_targets.len();
            let length = self
                .indirect
                .sort(&mut self.out_targets, &mut self.out_weights, staged);
            self.matrix.arm_out(row, length)?;
            for i in 0..length {
                let target = self.out_targets[i];
                self.matrix.add_outgoing(row, u64::from(target))?;
                self.weights
                    .put(combine_ids(node, target), f64::from(self.out_weights[i]));
            }
            self.out_targets.clear();
            self.out_weights.clear();
        }
        if !self.in_sources.is_empty() {
            let staged = self.in_sources.len();
            let length = self
                .indirect
                .sort(&mut self.in_sources, &mut self.in_weights, staged);
            self.matrix.arm_in(row, length)?;
            for i in 0..length {
                let source = self.in_sources[i];
                self.matrix.add_incoming(u64::from(source), row)?;
                self.weights
                    .put(combine_ids(source, node), f64::from(self.in_weights[i]));
            }
            self.in_sources.clear();
            self.in_weights.clear();
        }
        Ok(())
    }

    /// Merges this batch's staged weights into a caller-supplied global
    /// map. Disjoint batches never collide on a combined edge id, so the
    /// union is purely additive.
    pub fn write_into(&mut self, global: &mut WeightMap) {
        let staged = std::mem::replace(&mut self.weights, WeightMap::new(self.config.default_weight));
        global.merge_from(staged);
    }

    /// Consumes the worker, releasing its collaborator references and
    /// yielding the batch's rows for the matrix merge.
    pub fn finish(self) -> Relationships {
        Relationships {
            offset: self.batch.start as usize,
            rows: self.batch.length,
            matrix: self.matrix,
        }
    }
}

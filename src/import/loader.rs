//! Top-level bulk loader.
//!
//! `GraphLoader` partitions the mapped id space, runs one
//! [`RelationshipImporter`] per batch on the rayon pool and merges the
//! batch results into a single [`HeavyGraph`]. Batches own disjoint row
//! ranges, so the parallel phase shares nothing mutable; all merging is
//! sequential after the scans have joined.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{GraphError, Result};
use crate::graph::config::LoadConfig;
use crate::graph::heavy::HeavyGraph;
use crate::graph::id_map::{partition, IdMapping};
use crate::graph::matrix::AdjacencyMatrix;
use crate::graph::weights::WeightMap;
use crate::import::importer::RelationshipImporter;
use crate::import::source::{ImportProgress, NoProgress, RelationshipSource};
use crate::import::visitor::LoadStrategy;
use crate::tracker::AllocationTracker;

/// Builds a [`HeavyGraph`] from a relationship source and an id mapping.
pub struct GraphLoader<'a, S, I> {
    config: LoadConfig,
    source: &'a S,
    id_map: I,
    tracker: AllocationTracker,
}

impl<'a, S: RelationshipSource, I: IdMapping> GraphLoader<'a, S, I> {
    /// Creates a loader; nothing is read until [`load`](Self::load).
    pub fn new(config: LoadConfig, source: &'a S, id_map: I) -> Self {
        Self {
            config,
            source,
            id_map,
            tracker: AllocationTracker::empty(),
        }
    }

    /// Attaches an allocation tracker shared by all batches.
    pub fn with_tracker(mut self, tracker: AllocationTracker) -> Self {
        self.tracker = tracker;
        self
    }

    /// Runs the import without progress reporting.
    pub fn load(self) -> Result<HeavyGraph<I>> {
        self.load_with_progress(&NoProgress)
    }

    /// Runs the import, reporting per-batch counts to `progress`.
    pub fn load_with_progress(self, progress: &dyn ImportProgress) -> Result<HeavyGraph<I>> {
        let Self {
            config,
            source,
            id_map,
            tracker,
        } = self;
        config.validate()?;

        let node_count = id_map.node_count();
        let strategy = LoadStrategy::from_config(&config);
        let batches = partition(node_count, config.batch_size)?;
        info!(
            node_count,
            batches = batches.len(),
            strategy = ?strategy,
            weighted = config.with_weights,
            "importing relationships"
        );

        let config_ref = &config;
        let id_map_ref = &id_map;
        let tracker_ref = &tracker;
        let run_batches = || {
            batches
                .par_iter()
                .map(|&batch| {
                    let mut importer = RelationshipImporter::new(
                        config_ref,
                        batch,
                        source,
                        id_map_ref,
                        progress,
                        tracker_ref.clone(),
                    );
                    importer.run()?;
                    Ok(importer)
                })
                .collect::<Result<Vec<_>>>()
        };
        let importers = match config.concurrency {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| {
                        GraphError::InvalidArgument(format!("failed to build import pool: {e}"))
                    })?;
                pool.install(run_batches)?
            }
            None => run_batches()?,
        };

        // All batches have joined; merges run single-threaded from here.
        let mut weights = WeightMap::new(config.default_weight);
        let mut matrix =
            AdjacencyMatrix::new(node_count, strategy.matrix_direction(), tracker.clone());
        let mut imported = 0u64;
        for mut importer in importers {
            imported += importer.imported();
            importer.write_into(&mut weights);
            let part = importer.finish();
            matrix.add_matrix(part.matrix, part.offset, part.rows)?;
        }

        if config.sorted {
            matrix.sort_all(config.concurrency)?;
            debug!("adjacency rows sorted");
        }
        info!(imported, "relationship import finished");
        Ok(HeavyGraph::new(id_map, matrix, weights))
    }
}

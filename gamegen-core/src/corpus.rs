//! Batch generation of many graphs from one model.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{info, instrument};

use crate::{
    generators::{Generated, GeneratorError, GraphGenerator},
    rng::{derive_seed, seeded},
};

/// Generates `instances` graphs from `generator`.
///
/// Instance `i` draws from a generator seeded with
/// [`derive_seed`]`(base_seed, i)`, so the corpus is identical whether it is
/// built on one thread or fanned out with the `parallel` feature.
///
/// # Errors
/// Returns the first [`GeneratorError`] any instance reports.
///
/// # Examples
/// ```
/// use gamegen_core::{SmallWorld, corpus::generate_corpus};
///
/// let model = SmallWorld::new(12, 2, 0.3)?;
/// let corpus = generate_corpus(&model, 4, 99)?;
/// assert_eq!(corpus.len(), 4);
/// assert!(corpus.iter().all(|instance| instance.graph.edge_count() == 48));
/// # Ok::<(), gamegen_core::GeneratorError>(())
/// ```
#[instrument(
    name = "corpus.generate",
    err,
    skip(generator),
    fields(model = generator.name(), partial),
)]
pub fn generate_corpus<G>(
    generator: &G,
    instances: usize,
    base_seed: u64,
) -> Result<Vec<Generated>, GeneratorError>
where
    G: GraphGenerator + Sync,
{
    let build = |index: usize| {
        generator.generate::<(), (), _>(&mut seeded(derive_seed(base_seed, index)))
    };

    #[cfg(feature = "parallel")]
    let corpus = (0..instances)
        .into_par_iter()
        .map(build)
        .collect::<Result<Vec<_>, _>>()?;

    #[cfg(not(feature = "parallel"))]
    let corpus = (0..instances)
        .map(build)
        .collect::<Result<Vec<_>, _>>()?;

    let partial = corpus
        .iter()
        .filter(|instance| !instance.outcome.is_complete())
        .count();
    tracing::Span::current().record("partial", partial);
    info!(instances, partial, "corpus generated");
    Ok(corpus)
}

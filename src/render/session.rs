use rayon::prelude::*;
use smallvec::SmallVec;

use crate::accum::index::AccumIndex;
use crate::foundation::core::Argb;
use crate::foundation::error::{StackcompError, StackcompResult};
use crate::layer::assign::LayerAssigner;
use crate::render::raster::{ArgbBuffer, PixelSource};
use crate::source::classify::SourceClassifier;

/// Per-worker row buffers, one per source.
type RowScratch = SmallVec<[Vec<u32>; 8]>;

/// Options controlling how a [`RenderSession`] spreads work over threads.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderOpts {
    /// Render row bands in parallel on a dedicated rayon thread pool.
    pub parallel: bool,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Rows per scheduled band. `0` is treated as `1`.
    pub rows_per_task: usize,
}

impl RenderOpts {
    /// Reject option combinations a session cannot run with.
    pub fn validate(&self) -> StackcompResult<()> {
        if self.threads == Some(0) {
            return Err(StackcompError::validation(
                "render option 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
            rows_per_task: 16,
        }
    }
}

/// Counters for one render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Output pixels written.
    pub pixels: u64,
    /// Row bands scheduled.
    pub partitions: u64,
}

/// One render session over a fixed source list.
///
/// Construction classifies the sources, assigns layers and builds the [`AccumIndex`]; the tables
/// are complete before any worker starts and are only read afterwards. Changing layer membership
/// or transparency links means building a new session.
pub struct RenderSession<S> {
    sources: Vec<S>,
    index: AccumIndex,
    opts: RenderOpts,
    pool: Option<rayon::ThreadPool>,
}

impl<S: PartialEq> RenderSession<S> {
    /// Build a session for `sources`.
    #[tracing::instrument(level = "debug", skip_all, fields(sources = sources.len()))]
    pub fn new<C, A>(
        sources: Vec<S>,
        classifier: &C,
        assigner: &A,
        opts: RenderOpts,
    ) -> StackcompResult<Self>
    where
        C: SourceClassifier<S> + ?Sized,
        A: LayerAssigner<S> + ?Sized,
    {
        opts.validate()?;
        let pool = if opts.parallel {
            Some(worker_pool(opts.threads)?)
        } else {
            None
        };
        let index = AccumIndex::build(&sources, classifier, assigner);
        Ok(Self {
            sources,
            index,
            opts,
            pool,
        })
    }
}

impl<S> RenderSession<S> {
    /// Sources in list order; pixel sources passed to rendering must follow this order.
    pub fn sources(&self) -> &[S] {
        &self.sources
    }

    /// Lookup tables built for this session.
    pub fn index(&self) -> &AccumIndex {
        &self.index
    }

    /// Options the session was built with.
    pub fn opts(&self) -> &RenderOpts {
        &self.opts
    }

    /// Render a `width` x `height` raster into a new buffer.
    pub fn render(
        &self,
        width: u32,
        height: u32,
        sources: &[&dyn PixelSource],
    ) -> StackcompResult<ArgbBuffer> {
        let mut target = ArgbBuffer::new(width, height, Argb::OPAQUE_WHITE)?;
        self.render_into(sources, &mut target)?;
        Ok(target)
    }

    /// Composite every pixel of `target` from `sources`.
    ///
    /// `sources[i]` must be the raster of the session's source `i` and match the target size.
    /// Rows are grouped into bands of [`RenderOpts::rows_per_task`]; each band is rendered by one
    /// worker with its own row buffers. The first failed read aborts the pass and is returned.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(width = target.width(), height = target.height(), sources = sources.len())
    )]
    pub fn render_into(
        &self,
        sources: &[&dyn PixelSource],
        target: &mut ArgbBuffer,
    ) -> StackcompResult<RenderStats> {
        if sources.len() != self.index.len() {
            return Err(StackcompError::validation(format!(
                "session has {} sources, got {} pixel sources",
                self.index.len(),
                sources.len()
            )));
        }
        let dims = (target.width(), target.height());
        if let Some((i, s)) = sources.iter().enumerate().find(|(_, s)| s.dims() != dims) {
            let (w, h) = s.dims();
            return Err(StackcompError::validation(format!(
                "pixel source {i} is {w}x{h}, target is {}x{}",
                dims.0, dims.1
            )));
        }

        let width = dims.0 as usize;
        if width == 0 || dims.1 == 0 {
            return Ok(RenderStats::default());
        }
        let rows_per_task = self.opts.rows_per_task.max(1);
        let band_len = rows_per_task.saturating_mul(width);
        let partitions = target.pixels().len().div_ceil(band_len) as u64;

        let index = &self.index;
        let scratch = || -> RowScratch { sources.iter().map(|_| vec![0u32; width]).collect() };
        let band = |rows: &mut RowScratch, (i, out): (usize, &mut [u32])| {
            render_band(index, sources, i * rows_per_task, width, out, rows)
        };

        match &self.pool {
            Some(pool) => pool.install(|| {
                target
                    .pixels_mut()
                    .par_chunks_mut(band_len)
                    .enumerate()
                    .try_for_each_init(scratch, band)
            })?,
            None => {
                let mut rows = scratch();
                for item in target.pixels_mut().chunks_mut(band_len).enumerate() {
                    band(&mut rows, item)?;
                }
            }
        }

        let stats = RenderStats {
            pixels: target.pixels().len() as u64,
            partitions,
        };
        tracing::debug!(pixels = stats.pixels, partitions, "render pass complete");
        Ok(stats)
    }
}

fn render_band(
    index: &AccumIndex,
    sources: &[&dyn PixelSource],
    first_row: usize,
    width: usize,
    out: &mut [u32],
    rows: &mut RowScratch,
) -> StackcompResult<()> {
    for (dy, out_row) in out.chunks_exact_mut(width).enumerate() {
        let y = u32::try_from(first_row + dy)
            .map_err(|_| StackcompError::render("row index exceeds u32"))?;
        for (source, row) in sources.iter().zip(rows.iter_mut()) {
            source.read_row(y, row)?;
        }
        for (x, px) in out_row.iter_mut().enumerate() {
            *px = index.accumulate_with(|i| rows[i][x]).0;
        }
    }
    Ok(())
}

fn worker_pool(threads: Option<usize>) -> StackcompResult<rayon::ThreadPool> {
    threads
        .into_iter()
        .fold(rayon::ThreadPoolBuilder::new(), |b, n| b.num_threads(n))
        .thread_name(|i| format!("stackcomp-band-{i}"))
        .build()
        .map_err(|e| StackcompError::render(format!("cannot start band workers: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/session.rs"]
mod tests;

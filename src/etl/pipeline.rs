//! Pipeline orchestration for ETL operations

use super::{Extractor, Loader, Transformer};
use eyre::Result;

/// ETL Pipeline that orchestrates Extract, Transform, and Load operations
///
/// # Type Parameters
/// - `E`: Extractor type
/// - `T`: Transformer type (must transform from E::Item)
/// - `L`: Loader type (must load T::Output)
///
/// The loader only runs after the transformer has consumed the whole source,
/// so a structural error while extracting aborts before anything is written.
///
/// # Example
/// ```
/// use restaurant_inspections::etl::Pipeline;
/// # use restaurant_inspections::etl::{Extractor, Transformer, Loader};
/// # use eyre::Result;
/// # struct MyExtractor;
/// # impl Extractor for MyExtractor {
/// #     type Item = i32;
/// #     type Iter = std::vec::IntoIter<Result<i32>>;
/// #     fn extract(&self) -> Result<Self::Iter> { Ok(vec![Ok(1), Ok(2)].into_iter()) }
/// # }
/// # #[derive(Default)]
/// # struct MyTransformer(Vec<i32>);
/// # impl Transformer for MyTransformer {
/// #     type Input = i32;
/// #     type Output = Vec<i32>;
/// #     fn transform(&mut self, input: Self::Input) { self.0.push(input) }
/// #     fn finalize(self) -> Self::Output { self.0 }
/// # }
/// # struct MyLoader;
/// # impl Loader for MyLoader {
/// #     type Item = Vec<i32>;
/// #     fn load(&self, item: &Self::Item) -> Result<usize> { Ok(item.len()) }
/// # }
///
/// # fn example() -> Result<()> {
/// let pipeline = Pipeline::new(MyExtractor, MyTransformer::default(), MyLoader);
///
/// let report = pipeline.run()?;
/// println!("Processed {} records", report.records);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub struct Pipeline<E, T, L> {
    extractor: E,
    transformer: T,
    loader: L,
}

/// Counts reported by a completed pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineReport {
    /// Records pulled from the source
    pub records: usize,
    /// Rows written by the loader
    pub loaded: usize,
}

impl<E, T, L> Pipeline<E, T, L>
where
    E: Extractor,
    T: Transformer<Input = E::Item>,
    L: Loader<Item = T::Output>,
{
    /// Create a new pipeline
    pub fn new(extractor: E, transformer: T, loader: L) -> Self {
        Self {
            extractor,
            transformer,
            loader,
        }
    }

    /// Run the complete ETL pipeline
    ///
    /// Steps:
    /// 1. Open the source
    /// 2. Stream every record through the transformer
    /// 3. Finalize and load the result
    ///
    /// # Errors
    /// Returns an error if any stage fails
    pub fn run(self) -> Result<PipelineReport> {
        let Self {
            extractor,
            mut transformer,
            loader,
        } = self;

        log::info!("Starting ETL pipeline");

        // Extract + Transform
        log::debug!("Streaming records from source...");
        let records = transformer.transform_all(extractor.extract()?)?;
        log::info!("Transformed {} records", records);

        if records == 0 {
            log::warn!("No records extracted, loading empty output");
        }

        // Load
        log::debug!("Loading to destination...");
        let output = transformer.finalize();
        let loaded = loader.load(&output)?;
        log::info!("Loaded {} rows", loaded);

        Ok(PipelineReport { records, loaded })
    }
}

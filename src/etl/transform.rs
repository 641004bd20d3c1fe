//! Transformer trait for stateful, single-pass transformation

use eyre::Result;

/// Transformer trait that folds a stream of items into one output
///
/// Items are fed strictly in order through `transform`; `finalize` consumes
/// the transformer and yields the finished output. Per-item problems are the
/// implementor's to absorb, so `transform` itself cannot fail.
///
/// # Example
/// ```
/// use restaurant_inspections::etl::Transformer;
///
/// #[derive(Default)]
/// struct Summer(i64);
///
/// impl Transformer for Summer {
///     type Input = i64;
///     type Output = i64;
///
///     fn transform(&mut self, input: Self::Input) {
///         self.0 += input;
///     }
///
///     fn finalize(self) -> Self::Output {
///         self.0
///     }
/// }
///
/// let mut summer = Summer::default();
/// summer.transform_all(vec![Ok(1), Ok(2), Ok(3)]).unwrap();
/// assert_eq!(summer.finalize(), 6);
/// ```
pub trait Transformer {
    /// Input item type
    type Input;

    /// Output produced once every input has been consumed
    type Output;

    /// Consume one item
    fn transform(&mut self, input: Self::Input);

    /// Consume the transformer, returning the accumulated output
    fn finalize(self) -> Self::Output;

    /// Feed every item of a fallible stream, stopping at the first error
    ///
    /// Returns the number of items consumed.
    fn transform_all<I>(&mut self, inputs: I) -> Result<usize>
    where
        I: IntoIterator<Item = Result<Self::Input>>,
    {
        let mut count = 0;
        for input in inputs {
            self.transform(input?);
            count += 1;
        }
        Ok(count)
    }
}

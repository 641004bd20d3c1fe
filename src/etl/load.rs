//! Loader trait for writing output to destinations

use eyre::Result;

/// Loader trait for writing a finished item to a destination
///
/// # Example
/// ```
/// use restaurant_inspections::etl::Loader;
/// use eyre::Result;
///
/// struct CountingLoader;
///
/// impl Loader for CountingLoader {
///     type Item = Vec<String>;
///
///     fn load(&self, item: &Self::Item) -> Result<usize> {
///         Ok(item.len())
///     }
/// }
///
/// assert_eq!(CountingLoader.load(&vec!["a".to_string()]).unwrap(), 1);
/// ```
pub trait Loader {
    /// The type of item to load
    type Item;

    /// Load the item to the destination
    ///
    /// Returns the number of rows written
    ///
    /// # Errors
    /// Returns an error if the destination cannot be written
    fn load(&self, item: &Self::Item) -> Result<usize>;
}

use crate::error::{BuildError, BuildResult};

/// The sorted, duplicate-free set of variable indices an expression uses.
///
/// Indices are inserted in place by binary search, so the set stays in
/// ascending order and the last element is always the largest index. Storage
/// grows by doubling and reports allocation failure instead of aborting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarRegistry {
    indices: Vec<usize>,
    limit:   usize,
}

impl VarRegistry {
    /// Creates an empty registry accepting at most `limit` distinct indices.
    #[must_use]
    pub const fn with_limit(limit: usize) -> Self {
        Self { indices: Vec::new(),
               limit }
    }

    /// Records `index`; recording an index twice is a no-op.
    ///
    /// # Errors
    /// - `BuildError::TooManyVariables` if a new index would exceed the limit.
    /// - `BuildError::Memory` if the storage cannot grow.
    ///
    /// # Example
    /// ```
    /// use varexpr::interpreter::registry::VarRegistry;
    ///
    /// let mut registry = VarRegistry::with_limit(8);
    /// for index in [4, 1, 4, 0] {
    ///     registry.record(index).unwrap();
    /// }
    /// assert_eq!(registry.indices(), &[0, 1, 4]);
    /// assert_eq!(registry.max(), Some(4));
    /// ```
    pub fn record(&mut self, index: usize) -> BuildResult<()> {
        let Err(pos) = self.indices.binary_search(&index) else {
            return Ok(());
        };

        if self.indices.len() >= self.limit {
            return Err(BuildError::TooManyVariables { limit: self.limit });
        }

        if self.indices.len() == self.indices.capacity() {
            let additional = self.indices.len().max(1);
            self.indices
                .try_reserve_exact(additional)
                .map_err(|_| BuildError::Memory)?;
        }

        self.indices.insert(pos, index);
        Ok(())
    }

    /// All recorded indices in ascending order.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// The largest recorded index.
    #[must_use]
    pub fn max(&self) -> Option<usize> {
        self.indices.last().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

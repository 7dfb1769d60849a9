//! Region dropdown state.

/// Single-select choice over the regions found in the loaded data.
///
/// The region list is never empty; a dataset without regions cannot be
/// loaded in the first place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSelector {
    regions: Vec<String>,
    index: usize,
}

impl RegionSelector {
    /// Build a selector over `regions` (sorted and deduplicated here).
    ///
    /// The initial selection is the first entry of `preferred` that is
    /// present, otherwise the first region alphabetically.  Returns `None`
    /// when `regions` is empty.
    pub fn new(mut regions: Vec<String>, preferred: &[String]) -> Option<Self> {
        regions.sort();
        regions.dedup();
        if regions.is_empty() {
            return None;
        }

        let index = preferred
            .iter()
            .find_map(|p| regions.iter().position(|r| r == p))
            .unwrap_or(0);

        Some(Self { regions, index })
    }

    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn selected(&self) -> &str {
        &self.regions[self.index]
    }

    /// Move to the next region, wrapping to the first.
    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.regions.len();
    }

    /// Move to the previous region, wrapping to the last.
    pub fn previous(&mut self) {
        self.index = self
            .index
            .checked_sub(1)
            .unwrap_or(self.regions.len() - 1);
    }

    /// Select `name` if present.  Returns whether the selection changed.
    pub fn select(&mut self, name: &str) -> bool {
        match self.regions.iter().position(|r| r == name) {
            Some(i) if i != self.index => {
                self.index = i;
                true
            }
            _ => false,
        }
    }
}

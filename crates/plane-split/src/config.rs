//! Tunable behaviour of the split operation.

/// Where a polygon with no vertex strictly above the cut goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BelowRouting {
    /// Wholly-below polygons (`BELOW` or `ON_BELOW`) go to the below list.
    #[default]
    Below,
    /// Wholly-below polygons are grouped with the coplanar ones in the on
    /// list. Kept for callers that treat "not above" as a single bucket.
    On,
}

/// Options for [`split_with_config`](crate::split_with_config).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitConfig {
    /// Routing of polygons that touch or lie below the cut without crossing it.
    pub below_routing: BelowRouting,
    /// Remove ON vertices that end up strictly inside a straight run of ON
    /// vertices after bridging.
    pub merge_collinear: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            below_routing: BelowRouting::Below,
            merge_collinear: true,
        }
    }
}

impl SplitConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the routing of wholly-below polygons.
    pub fn with_below_routing(mut self, routing: BelowRouting) -> Self {
        self.below_routing = routing;
        self
    }

    /// Enables or disables the collinear merge after each bridge.
    pub fn with_merge_collinear(mut self, merge: bool) -> Self {
        self.merge_collinear = merge;
        self
    }
}

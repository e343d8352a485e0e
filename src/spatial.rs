//! Spatial indexing for fast position-to-site lookups
//!
//! This module is only available with the `spatial-index` feature.

#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;
#[cfg(feature = "spatial-index")]
use glam::DVec2;

/// Wrapper around KD-tree for nearest-site queries
///
/// The nearest site to a position owns the Voronoi cell containing it, so
/// this answers "which cell is under the cursor" in O(log n).
///
/// # Performance
///
/// - Construction: O(n log n), once per generated surface
/// - Query: O(log n)
/// - Memory: ~24 bytes per site
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f64, usize, 2, 32>,
}

#[cfg(feature = "spatial-index")]
impl SpatialIndex {
    /// Build spatial index from site positions
    ///
    /// Site indices are preserved, so query results index straight into the
    /// slice passed here.
    ///
    /// # Arguments
    ///
    /// * `sites` - Site positions in index order
    ///
    /// # Example
    ///
    /// ```
    /// use rust_voronoi_surface::*;
    /// use glam::DVec2;
    ///
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let sites = vec![DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0), DVec2::new(0.0, 10.0)];
    /// let index = SpatialIndex::new(&sites);
    /// assert_eq!(index.find_nearest(DVec2::new(9.0, 1.0)), 1);
    /// # }
    /// ```
    pub fn new(sites: &[DVec2]) -> Self {
        let points: Vec<[f64; 2]> = sites.iter().map(|s| [s.x, s.y]).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Find the site nearest to a position
    ///
    /// # Arguments
    ///
    /// * `position` - 2D position in diagram coordinates
    ///
    /// # Returns
    ///
    /// Index of the site whose Voronoi cell contains `position`; ties go to
    /// whichever site the tree visits first
    pub fn find_nearest(&self, position: DVec2) -> usize {
        let query = [position.x, position.y];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item as usize
    }
}

#[cfg(test)]
#[cfg(feature = "spatial-index")]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_index_basic() {
        let sites = vec![
            DVec2::new(1.0, 1.0),
            DVec2::new(9.0, 1.0),
            DVec2::new(9.0, 9.0),
            DVec2::new(1.0, 9.0),
        ];
        let index = SpatialIndex::new(&sites);

        assert_eq!(index.find_nearest(DVec2::new(2.0, 2.0)), 0);
        assert_eq!(index.find_nearest(DVec2::new(8.0, 0.5)), 1);
        assert_eq!(index.find_nearest(DVec2::new(7.0, 7.5)), 2);
        assert_eq!(index.find_nearest(DVec2::new(0.0, 6.0)), 3);
    }

    #[test]
    fn test_spatial_index_exact_match() {
        let sites = vec![DVec2::new(3.0, 4.0), DVec2::new(-3.0, 4.0)];
        let index = SpatialIndex::new(&sites);

        assert_eq!(index.find_nearest(sites[0]), 0);
        assert_eq!(index.find_nearest(sites[1]), 1);
    }
}

//! Spatial-Index (KD-Tree) über projizierten Marker-Positionen.

use glam::DVec2;
use kiddo::{KdTree, SquaredEuclidean};

/// Ergebnis einer Distanzabfrage gegen den Punkt-Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMatch {
    /// Index des Punkts in der Eingabereihenfolge
    pub index: usize,
    /// Euklidische Distanz zum Suchpunkt in Pixeln
    pub distance: f64,
}

/// Read-only KD-Tree über einer Punktmenge in Pixel-Koordinaten.
///
/// Die Punkte werden über ihren Index in der Eingabereihenfolge
/// identifiziert; der Index bleibt über die Lebensdauer stabil.
#[derive(Debug)]
pub struct PointIndex {
    tree: KdTree<f64, 2>,
    len: usize,
}

impl PointIndex {
    /// Baut einen neuen Index aus den übergebenen Punkten.
    pub fn from_points(points: &[DVec2]) -> Self {
        let entries: Vec<[f64; 2]> = points.iter().map(|p| [p.x, p.y]).collect();
        let tree: KdTree<f64, 2> = (&entries).into();
        Self {
            tree,
            len: points.len(),
        }
    }

    /// Gibt die Anzahl indexierter Punkte zurück.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Gibt `true` zurück, wenn keine Punkte im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Findet den nächsten Punkt zur Query-Position.
    pub fn nearest(&self, query: DVec2) -> Option<PointMatch> {
        if self.is_empty() {
            return None;
        }

        let result = self.tree.nearest_one::<SquaredEuclidean>(&[query.x, query.y]);
        Some(PointMatch {
            index: result.item as usize,
            distance: result.distance.sqrt(),
        })
    }

    /// Findet alle Punkte innerhalb eines Radius, nach Distanz sortiert.
    pub fn within_radius(&self, query: DVec2, radius: f64) -> Vec<PointMatch> {
        if self.is_empty() || radius.is_sign_negative() {
            return Vec::new();
        }

        let mut results = self
            .tree
            .within::<SquaredEuclidean>(&[query.x, query.y], radius * radius)
            .into_iter()
            .map(|entry| PointMatch {
                index: entry.item as usize,
                distance: entry.distance.sqrt(),
            })
            .collect::<Vec<_>>();

        results.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.index.cmp(&b.index))
        });
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<DVec2> {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(10.0, 0.0),
            DVec2::new(4.0, 3.0),
        ]
    }

    #[test]
    fn nearest_returns_expected_point() {
        let index = PointIndex::from_points(&sample_points());
        let nearest = index
            .nearest(DVec2::new(3.9, 2.9))
            .expect("Treffer erwartet");

        assert_eq!(nearest.index, 2);
        assert!(nearest.distance < 0.2);
    }

    #[test]
    fn radius_query_returns_sorted_matches() {
        let index = PointIndex::from_points(&sample_points());
        let matches = index.within_radius(DVec2::new(0.0, 0.0), 6.0);

        let ids: Vec<usize> = matches.into_iter().map(|m| m.index).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn empty_index_has_no_entries() {
        let index = PointIndex::from_points(&[]);

        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.nearest(DVec2::new(0.0, 0.0)).is_none());
    }
}

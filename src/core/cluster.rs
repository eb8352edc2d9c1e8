//! Greedy-Radius-Clustering in Screen-Pixel-Koordinaten plus
//! Spiderfy-Layout für aufgefächerte Cluster auf maximaler Zoom-Stufe.

use super::spatial::PointIndex;
use glam::DVec2;

/// Fuß-Abstand benachbarter Marker auf dem Spiderfy-Kreis (Pixel).
const SPIDERFY_FOOT_SEPARATION: f64 = 25.0;
/// Ab dieser Mitgliederzahl wird statt des Kreises eine Spirale gelegt.
const SPIDERFY_SPIRAL_THRESHOLD: usize = 9;
/// Startradius der Spirale (Pixel).
const SPIDERFY_SPIRAL_START: f64 = 11.0;
/// Radius-Zuwachs der Spirale pro Umdrehung (Pixel).
const SPIDERFY_SPIRAL_GROWTH: f64 = 28.0;

/// Eine Gruppe räumlich benachbarter Marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Schwerpunkt der Mitglieder in Pixel-Koordinaten
    pub center: DVec2,
    /// Indizes der Mitglieder (aufsteigend, Eingabereihenfolge)
    pub members: Vec<usize>,
}

impl Cluster {
    /// Anzahl der Mitglieder.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Gibt `true` zurück, wenn der Cluster nur einen Marker enthält.
    pub fn is_single(&self) -> bool {
        self.members.len() == 1
    }
}

/// Gruppiert Punkte per Greedy-Radius-Verfahren.
///
/// Es wird in Eingabereihenfolge iteriert: der erste noch nicht
/// zugeordnete Punkt wird Saat eines Clusters und sammelt alle noch
/// freien Punkte innerhalb des Radius ein. Bei gleicher Punktmenge in
/// gleicher Reihenfolge ist das Ergebnis damit reproduzierbar.
pub fn cluster_points(points: &[DVec2], radius: f64) -> Vec<Cluster> {
    if points.is_empty() {
        return Vec::new();
    }

    let index = PointIndex::from_points(points);
    let mut assigned = vec![false; points.len()];
    let mut clusters = Vec::new();

    for seed in 0..points.len() {
        if assigned[seed] {
            continue;
        }

        let mut members: Vec<usize> = index
            .within_radius(points[seed], radius)
            .into_iter()
            .map(|m| m.index)
            .filter(|&i| !assigned[i])
            .collect();
        members.sort_unstable();

        let mut centroid = DVec2::ZERO;
        for &i in &members {
            assigned[i] = true;
            centroid += points[i];
        }
        centroid /= members.len() as f64;

        clusters.push(Cluster {
            center: centroid,
            members,
        });
    }

    clusters
}

/// Berechnet die Pixel-Offsets, mit denen die Mitglieder eines Clusters
/// auf maximaler Zoom-Stufe aufgefächert werden.
///
/// Kleine Cluster liegen auf einem Kreis, große auf einer Spirale
/// (gleiche Heuristik wie die Leaflet-Markercluster-Auffächerung).
pub fn spiderfy_offsets(count: usize) -> Vec<DVec2> {
    if count == 0 {
        return Vec::new();
    }

    if count <= SPIDERFY_SPIRAL_THRESHOLD {
        // Kreis: Umfang proportional zur Mitgliederzahl
        let circumference = SPIDERFY_FOOT_SEPARATION * (2.0 + count as f64);
        let radius = circumference / (2.0 * std::f64::consts::PI);
        (0..count)
            .map(|i| {
                let angle = 2.0 * std::f64::consts::PI * i as f64 / count as f64;
                DVec2::new(angle.cos(), angle.sin()) * radius
            })
            .collect()
    } else {
        // Spirale: Radius wächst mit der Bogenlänge
        let mut offsets = Vec::with_capacity(count);
        let mut angle = 0.0f64;
        for _ in 0..count {
            let radius = SPIDERFY_SPIRAL_START
                + SPIDERFY_SPIRAL_GROWTH * angle / (2.0 * std::f64::consts::PI);
            offsets.push(DVec2::new(angle.cos(), angle.sin()) * radius);
            // Schrittweite so wählen, dass der Fußabstand konstant bleibt
            angle += SPIDERFY_FOOT_SEPARATION / radius.max(1.0);
        }
        offsets
    }
}

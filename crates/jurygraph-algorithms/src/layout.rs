//! Force-directed layout
//!
//! Fruchterman-Reingold spring embedding in two dimensions. Initial
//! positions come from a seeded RNG, so a given view and config always
//! produce the same coordinates.

use super::common::GraphView;
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Spring layout configuration
#[derive(Debug, Clone)]
pub struct SpringLayoutConfig {
    /// Optimal distance between nodes; defaults to `sqrt(1 / n)`
    pub k: Option<f64>,
    /// Maximum number of iterations
    pub iterations: usize,
    /// Stop once the mean displacement per node falls below this value
    pub threshold: f64,
    /// Seed for the initial positions
    pub seed: u64,
    /// Largest absolute coordinate after rescaling
    pub scale: f64,
}

impl Default for SpringLayoutConfig {
    fn default() -> Self {
        Self {
            k: None,
            iterations: 50,
            threshold: 1e-4,
            seed: 1234,
            scale: 1.0,
        }
    }
}

/// Compute 2D positions for every node in the view, indexed like its nodes
pub fn spring_layout(view: &GraphView, config: &SpringLayoutConfig) -> Vec<(f64, f64)> {
    let n = view.node_count;
    match n {
        0 => return Vec::new(),
        1 => return vec![(0.0, 0.0)],
        _ => {}
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut pos = Array2::from_shape_fn((n, 2), |_| rng.gen::<f64>());

    // Dense weighted adjacency; parallel edges in the view are summed
    let mut adjacency = Array2::<f64>::zeros((n, n));
    for u in 0..n {
        for (v, w) in view.weighted_neighbors(u) {
            adjacency[[u, v]] += w;
        }
    }

    let k = config.k.unwrap_or_else(|| (1.0 / n as f64).sqrt());
    let extent = |pos: &Array2<f64>| {
        (0..2)
            .map(|axis| {
                let column = pos.column(axis);
                let max = column.fold(f64::NEG_INFINITY, |a, &b| a.max(b));
                let min = column.fold(f64::INFINITY, |a, &b| a.min(b));
                max - min
            })
            .fold(0.0, f64::max)
    };
    let mut temperature = extent(&pos) * 0.1;
    let cooling = temperature / (config.iterations as f64 + 1.0);

    for _ in 0..config.iterations {
        let mut displacement = Array2::<f64>::zeros((n, 2));
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let dx = pos[[i, 0]] - pos[[j, 0]];
                let dy = pos[[i, 1]] - pos[[j, 1]];
                let distance = (dx * dx + dy * dy).sqrt().max(0.01);
                let force = k * k / (distance * distance) - adjacency[[i, j]] * distance / k;
                displacement[[i, 0]] += dx * force;
                displacement[[i, 1]] += dy * force;
            }
        }

        let mut step = Array2::<f64>::zeros((n, 2));
        for i in 0..n {
            let row = displacement.row(i);
            let mut length = row.dot(&row).sqrt();
            if length < 0.01 {
                length = 0.1;
            }
            step[[i, 0]] = row[0] * temperature / length;
            step[[i, 1]] = row[1] * temperature / length;
        }

        pos += &step;
        temperature -= cooling;

        let norm = step.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm / (n as f64) < config.threshold {
            break;
        }
    }

    rescale(&mut pos, config.scale);

    pos.rows().into_iter().map(|row| (row[0], row[1])).collect()
}

/// Center on the origin and scale so the largest absolute coordinate is `scale`
fn rescale(pos: &mut Array2<f64>, scale: f64) {
    let mean: Array1<f64> = match pos.mean_axis(Axis(0)) {
        Some(mean) => mean,
        None => return,
    };
    *pos -= &mean;

    let lim = pos.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if lim > 0.0 {
        *pos *= scale / lim;
    }
}

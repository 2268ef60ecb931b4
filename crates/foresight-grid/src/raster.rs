//! Rasterization of hazard predictions into the occupancy grid.
//!
//! Marking is a logical OR: cells only ever go from free to blocked, so the
//! order in which hazards (or samples) are applied never changes the result.

use foresight_core::types::SpacetimePoint;
use foresight_predict::{Hazard, Trajectory};

use crate::grid::OccupancyGrid;
use crate::layout::GridLayout;

impl GridLayout {
    /// Mark the cells a hazard covers at one instant. Returns newly marked cells.
    pub(crate) fn stamp<T: Trajectory + ?Sized>(
        &self,
        predictor: &T,
        time: f64,
        bounding_box_width: f64,
        mask: &mut [bool],
        samples: Option<&mut Vec<SpacetimePoint>>,
    ) -> usize {
        let position = predictor.position(time);
        if let Some(samples) = samples {
            samples.push(SpacetimePoint::new(position, time));
        }

        let center = self.world_to_cell(position, time);
        if center.t < 0 || center.t as usize >= self.steps {
            return 0;
        }

        // Reach box misses the grid entirely.
        let reach = predictor.radius().max(bounding_box_width / 2.0);
        let (min, max) = self.world_bounds();
        if !(position.x + reach >= min.x
            && position.x - reach <= max.x
            && position.y + reach >= min.y
            && position.y - reach <= max.y)
        {
            return 0;
        }

        let padding = window_padding(bounding_box_width, self.shape.cell_size, self.side);
        let last = self.side as i64 - 1;
        let x_range = (center.x as i64 - padding).max(0)..=(center.x as i64 + padding).min(last);
        let y_range = (center.y as i64 - padding).max(0)..=(center.y as i64 + padding).min(last);
        let half = self.half_extents();
        let t = center.t as usize;

        let mut marked = 0;
        for x in x_range {
            let x = x as usize;
            let row = (x * self.steps + t) * self.side;
            for y in y_range.clone() {
                let y = y as usize;
                let idx = row + y;
                if mask[idx] {
                    continue;
                }
                if predictor.overlaps_cell(position, self.centers[x * self.side + y], half) {
                    mask[idx] = true;
                    marked += 1;
                }
            }
        }
        marked
    }

    /// Stamp evenly spaced instants over `[0, duration)`.
    ///
    /// At least one sample lands in every time slice, so hazards that move
    /// little (or not at all) still occupy the whole horizon.
    pub(crate) fn stamp_horizon<T: Trajectory + ?Sized>(
        &self,
        predictor: &T,
        duration: f64,
        resolution: f64,
        bounding_box_width: f64,
        mask: &mut [bool],
        mut samples: Option<&mut Vec<SpacetimePoint>>,
    ) -> usize {
        if !duration.is_finite() || duration < 0.0 {
            return 0;
        }
        let count = predictor
            .sample_count(duration, resolution)
            .max(self.steps);

        let mut marked = 0;
        for i in 0..count {
            let time = i as f64 / count as f64 * duration;
            marked += self.stamp(
                predictor,
                time,
                bounding_box_width,
                mask,
                samples.as_deref_mut(),
            );
        }
        marked
    }
}

/// `ceil(width / cell / 2)` cells, capped at the grid side.
fn window_padding(bounding_box_width: f64, cell_size: f64, side: usize) -> i64 {
    let padding = (bounding_box_width / cell_size / 2.0).ceil();
    if padding.is_finite() && padding > 0.0 {
        (padding as i64).min(side as i64)
    } else {
        0
    }
}

impl OccupancyGrid {
    /// Mark the cells a hazard covers at `time` seconds into the horizon.
    ///
    /// Times outside the horizon are a no-op. Returns newly marked cells.
    pub fn rasterize<T: Trajectory + ?Sized>(
        &mut self,
        predictor: &T,
        time: f64,
        bounding_box_width: f64,
    ) -> usize {
        let samples = self.record_samples.then_some(&mut self.samples);
        self.layout
            .stamp(predictor, time, bounding_box_width, &mut self.cells, samples)
    }

    /// Rasterize a predictor at evenly spaced instants across `[0, duration)`.
    pub fn rasterize_over_horizon<T: Trajectory + ?Sized>(
        &mut self,
        predictor: &T,
        duration: f64,
        resolution: f64,
        bounding_box_width: f64,
    ) -> usize {
        let samples = self.record_samples.then_some(&mut self.samples);
        self.layout.stamp_horizon(
            predictor,
            duration,
            resolution,
            bounding_box_width,
            &mut self.cells,
            samples,
        )
    }

    /// Rasterize a batch of hazards over the grid's own horizon.
    ///
    /// With the `parallel` feature, hazards are stamped into per-worker
    /// masks and merged with OR. Recording samples forces the sequential
    /// path so the trace stays in hazard order.
    pub fn rasterize_all(&mut self, hazards: &[Hazard], resolution: f64) -> usize {
        #[cfg(feature = "parallel")]
        {
            if !self.record_samples {
                return self.rasterize_all_parallel(hazards, resolution);
            }
        }

        let duration = self.duration();
        let mut marked = 0;
        for hazard in hazards {
            let hits = self.rasterize_over_horizon(
                &hazard.predictor,
                duration,
                resolution,
                hazard.bounding_box_width,
            );
            log::trace!("hazard rasterized: {hits} new cells");
            marked += hits;
        }
        marked
    }

    #[cfg(feature = "parallel")]
    fn rasterize_all_parallel(&mut self, hazards: &[Hazard], resolution: f64) -> usize {
        use rayon::prelude::*;

        let layout = &self.layout;
        let duration = layout.shape.duration;
        let len = self.cells.len();
        let merged = hazards
            .par_iter()
            .fold(
                || vec![false; len],
                |mut mask, hazard| {
                    layout.stamp_horizon(
                        &hazard.predictor,
                        duration,
                        resolution,
                        hazard.bounding_box_width,
                        &mut mask,
                        None,
                    );
                    mask
                },
            )
            .reduce(
                || vec![false; len],
                |mut a, b| {
                    a.iter_mut().zip(b).for_each(|(a, b)| *a |= b);
                    a
                },
            );

        let mut marked = 0;
        for (cell, hit) in self.cells.iter_mut().zip(merged) {
            if hit && !*cell {
                *cell = true;
                marked += 1;
            }
        }
        marked
    }
}

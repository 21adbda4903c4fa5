//! Visual scales for node size and edge thickness.
//!
//! Both scales are fitted to the largest value in the current dataset and
//! clamp their output, so they stay bounded however large the data grows.

pub const MIN_RADIUS: f64 = 5.0;
pub const MAX_RADIUS: f64 = 24.0;
pub const MIN_EDGE_WIDTH: f64 = 1.0;
pub const MAX_EDGE_WIDTH: f64 = 6.0;

/// Square-root scale from case-study count to node radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusScale {
	max_count: f64,
}

impl RadiusScale {
	pub fn fit(counts: impl IntoIterator<Item = u32>) -> Self {
		let max = counts.into_iter().max().unwrap_or(0).max(1);
		Self {
			max_count: f64::from(max),
		}
	}

	pub fn radius(&self, count: u32) -> f64 {
		let t = (f64::from(count) / self.max_count).clamp(0.0, 1.0).sqrt();
		MIN_RADIUS + (MAX_RADIUS - MIN_RADIUS) * t
	}
}

/// Linear scale from co-occurrence weight to stroke width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WidthScale {
	max_weight: f64,
}

impl WidthScale {
	pub fn fit(weights: impl IntoIterator<Item = u32>) -> Self {
		let max = weights.into_iter().max().unwrap_or(1).max(1);
		Self {
			max_weight: f64::from(max),
		}
	}

	pub fn width(&self, weight: u32) -> f64 {
		// Single-weight datasets collapse the domain; draw them thin.
		if self.max_weight <= 1.0 {
			return MIN_EDGE_WIDTH;
		}
		let t = ((f64::from(weight.max(1)) - 1.0) / (self.max_weight - 1.0)).clamp(0.0, 1.0);
		MIN_EDGE_WIDTH + (MAX_EDGE_WIDTH - MIN_EDGE_WIDTH) * t
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	#[test]
	fn radius_spans_the_range() {
		let scale = RadiusScale::fit([0, 4, 16]);
		assert_eq!(scale.radius(0), MIN_RADIUS);
		assert_eq!(scale.radius(16), MAX_RADIUS);
		assert!((scale.radius(4) - (MIN_RADIUS + 19.0 * 0.5)).abs() < 1e-9);
	}

	#[test]
	fn empty_dataset_still_has_a_usable_scale() {
		assert_eq!(RadiusScale::fit([]).radius(0), MIN_RADIUS);
		assert_eq!(WidthScale::fit([]).width(1), MIN_EDGE_WIDTH);
	}

	#[test]
	fn width_is_linear_between_one_and_max() {
		let scale = WidthScale::fit([1, 5, 9]);
		assert_eq!(scale.width(1), MIN_EDGE_WIDTH);
		assert_eq!(scale.width(9), MAX_EDGE_WIDTH);
		assert!((scale.width(5) - 3.5).abs() < 1e-9);
		assert_eq!(scale.width(0), MIN_EDGE_WIDTH);
	}

	proptest! {
		#[test]
		fn radius_is_monotonic_and_clamped(
			counts in proptest::collection::vec(0u32..100_000, 0..40),
			a in 0u32..200_000,
			b in 0u32..200_000,
		) {
			let scale = RadiusScale::fit(counts);
			let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
			prop_assert!(scale.radius(lo) <= scale.radius(hi));
			for r in [scale.radius(lo), scale.radius(hi)] {
				prop_assert!((MIN_RADIUS..=MAX_RADIUS).contains(&r));
			}
		}

		#[test]
		fn width_is_monotonic_and_clamped(
			weights in proptest::collection::vec(1u32..10_000, 0..40),
			a in 0u32..20_000,
			b in 0u32..20_000,
		) {
			let scale = WidthScale::fit(weights);
			let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
			prop_assert!(scale.width(lo) <= scale.width(hi));
			prop_assert!((MIN_EDGE_WIDTH..=MAX_EDGE_WIDTH).contains(&scale.width(hi)));
		}
	}
}

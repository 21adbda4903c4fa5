//! Small 2D value types shared by both engines.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Point) -> f64 {
		(self.x - other.x).hypot(self.y - other.y)
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
	pub width: f64,
	pub height: f64,
}

impl Size {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}
}

/// A drawable area with strictly positive, finite dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	width: f64,
	height: f64,
}

impl Viewport {
	/// `None` for zero, negative or non-finite sizes.
	pub fn new(width: f64, height: f64) -> Option<Self> {
		let valid = |v: f64| v.is_finite() && v > 0.0;
		(valid(width) && valid(height)).then_some(Self { width, height })
	}

	pub fn width(&self) -> f64 {
		self.width
	}

	pub fn height(&self) -> f64 {
		self.height
	}

	pub fn center(&self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}

	/// Half-open containment: the right and bottom edges are outside.
	pub fn contains(&self, p: Point) -> bool {
		p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
	}
}

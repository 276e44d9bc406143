//! Geometry and tracking value types shared by every stage.

use std::fmt;

/// The two ball colors the tracker follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BallColor {
    Green,
    Red,
}

impl BallColor {
    pub const ALL: [BallColor; 2] = [BallColor::Green, BallColor::Red];

    /// Human-readable name used in status strings.
    pub fn label(self) -> &'static str {
        match self {
            BallColor::Green => "Green",
            BallColor::Red => "Red",
        }
    }

    /// Upper-case tag used in calibration file names.
    pub fn file_tag(self) -> &'static str {
        match self {
            BallColor::Green => "GREEN",
            BallColor::Red => "RED",
        }
    }

    /// Calibration file name, e.g. `colour_hist_GREEN.yml`.
    pub fn histogram_file_name(self) -> String {
        format!("colour_hist_{}.yml", self.file_tag())
    }

    pub(crate) fn index(self) -> usize {
        match self {
            BallColor::Green => 0,
            BallColor::Red => 1,
        }
    }
}

impl fmt::Display for BallColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> u32 {
        self.width * self.height
    }
}

/// Axis-aligned rectangle in pixel coordinates. The default value is the
/// empty box at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Center point, rounded towards the top-left like integer division.
    pub fn center(&self) -> Point {
        Point {
            x: self.x + (self.width / 2) as i32,
            y: self.y + (self.height / 2) as i32,
        }
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    pub fn area(&self) -> u32 {
        self.width * self.height
    }
}

/// The latest position and extent of one ball, as seen by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackedObject {
    pub centroid: Point,
    pub size: Size,
}

impl TrackedObject {
    pub fn from_bounding_box(bbox: &BoundingBox) -> Self {
        Self {
            centroid: bbox.center(),
            size: bbox.size(),
        }
    }

    pub fn area(&self) -> u32 {
        self.size.area()
    }
}

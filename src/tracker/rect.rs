use nalgebra::Point2;

/// Pixel-space bounding box in TLWH form (top-left x, top-left y, width, height).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: f32,
    /// Top-left y coordinate
    pub y: f32,
    /// Width of the bounding box
    pub width: f32,
    /// Height of the bounding box
    pub height: f32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    /// Create a Rect from its center point and dimensions.
    #[inline]
    pub fn from_center(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self {
            x: cx - width / 2.0,
            y: cy - height / 2.0,
            width,
            height,
        }
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [f32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    /// Center point of the bounding box.
    #[inline]
    pub fn center(&self) -> Point2<f32> {
        Point2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Width over height; zero for a box without height.
    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            0.0
        }
    }

    /// Half of the shorter side. A detection further than this from a
    /// track's center cannot belong to it.
    #[inline]
    pub fn gating_radius(&self) -> f32 {
        0.5 * self.width.min(self.height)
    }

    /// Whether the box has strictly positive, finite dimensions.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Pixel dimensions of the frame being processed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSize {
    pub width: f32,
    pub height: f32,
}

impl FrameSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Geometric center of the frame.
    #[inline]
    pub fn center(&self) -> Point2<f32> {
        Point2::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_conversions() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);

        assert_eq!(rect.to_tlwh(), [10.0, 20.0, 30.0, 40.0]);
        assert_eq!(rect.to_tlbr(), [10.0, 20.0, 40.0, 60.0]);

        let c = rect.center();
        assert_eq!(c.x, 25.0);
        assert_eq!(c.y, 40.0);
        assert!((rect.aspect_ratio() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_from_tlbr() {
        let rect = Rect::from_tlbr(10.0, 20.0, 40.0, 60.0);
        assert_eq!(rect.to_tlwh(), [10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn test_from_center() {
        let rect = Rect::from_center(25.0, 40.0, 30.0, 40.0);
        assert!((rect.x - 10.0).abs() < 1e-6);
        assert!((rect.y - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_gating_radius_uses_shorter_side() {
        assert_eq!(Rect::new(0.0, 0.0, 50.0, 50.0).gating_radius(), 25.0);
        assert_eq!(Rect::new(0.0, 0.0, 10.0, 40.0).gating_radius(), 5.0);
    }

    #[test]
    fn test_frame_center() {
        let frame = FrameSize::new(640.0, 480.0);
        assert_eq!(frame.center(), Point2::new(320.0, 240.0));
        assert_eq!(frame.area(), 307_200.0);
    }

    #[test]
    fn test_malformed_boxes() {
        assert!(!Rect::new(0.0, 0.0, 0.0, 10.0).is_well_formed());
        assert!(!Rect::new(0.0, 0.0, 10.0, -1.0).is_well_formed());
        assert!(!Rect::new(0.0, 0.0, f32::NAN, 10.0).is_well_formed());
        assert!(Rect::new(0.0, 0.0, 1.0, 1.0).is_well_formed());
        assert_eq!(Rect::new(0.0, 0.0, 10.0, 0.0).aspect_ratio(), 0.0);
    }
}

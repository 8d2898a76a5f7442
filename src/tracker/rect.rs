/// Axis-aligned bounding box.
///
/// Stored as top-left corner plus size. Detections arrive as two corner
/// points (TLBR); the motion model works in XYAH:
/// - TLBR: Top-Left X, Top-Left Y, Bottom-Right X, Bottom-Right Y
/// - XYAH: Center X, Center Y, Aspect Ratio (w/h), Height
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
    /// Create a new Rect from top-left coordinates and dimensions.
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from two corner points given in any order.
    #[inline]
    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        let (left, right) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let (top, bottom) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        Self {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Create a Rect from XYAH format (center x, center y, aspect ratio, height).
    #[inline]
    pub fn from_xyah(cx: f32, cy: f32, aspect_ratio: f32, height: f32) -> Self {
        let height = height.max(0.0);
        let width = (aspect_ratio * height).max(0.0);
        Self {
            x: cx - width / 2.0,
            y: cy - height / 2.0,
            width,
            height,
        }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    /// Convert to XYAH format: (center_x, center_y, aspect_ratio, height).
    #[inline]
    pub fn to_xyah(&self) -> [f32; 4] {
        let (cx, cy) = self.center();
        let aspect_ratio = if self.height > 0.0 {
            self.width / self.height
        } else {
            0.0
        };
        [cx, cy, aspect_ratio, self.height]
    }

    /// Top-left and bottom-right corners as points.
    #[inline]
    pub fn corners(&self) -> [[f32; 2]; 2] {
        let [x1, y1, x2, y2] = self.to_tlbr();
        [[x1, y1], [x2, y2]]
    }

    /// Get the center point of the bounding box.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Get the area of the bounding box.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Calculate Intersection over Union (IoU) with another bounding box.
    pub fn iou(&self, other: &Rect) -> f32 {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = (self.x + self.width).min(other.x + other.width);
        let y2 = (self.y + self.height).min(other.y + other.height);

        let inter_width = (x2 - x1).max(0.0);
        let inter_height = (y2 - y1).max(0.0);
        let inter_area = inter_width * inter_height;

        let union_area = self.area() + other.area() - inter_area;

        if union_area > 0.0 {
            inter_area / union_area
        } else {
            0.0
        }
    }
}

//! Largest-blob selection module
//!
//! Reduces a label map to the bounding box of its largest region: strict
//! re-binarization, a 3x3 opening, external contour extraction, then the
//! contour with the greatest enclosed area wins.

use image::GrayImage;
use imageproc::contours::{BorderType, Contour, find_contours};
use imageproc::distance_transform::Norm;
use imageproc::morphology::open;
use tracing::{debug, instrument};

use crate::tracking::label::LabelMap;
use crate::tracking::types::BoundingBox;

/// One external contour summarized by its bounding box and enclosed area.
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    pub bbox: BoundingBox,
    pub area: f64,
}

/// Bounding box of the largest region in `labels`, or the empty box when no
/// region encloses any area.
#[instrument(skip(labels), fields(width = labels.width, height = labels.height))]
pub fn select(labels: &LabelMap, threshold: u8) -> BoundingBox {
    let binary = labels.to_binary(threshold);
    // 3x3 all-ones opening, separate from the segmenter's erode/dilate.
    let opened = open(&binary, Norm::LInf, 1);

    let blobs = find_blobs(&opened);
    match largest_blob(&blobs) {
        Some(blob) => {
            debug!(candidates = blobs.len(), area = blob.area, "Largest blob selected");
            blob.bbox
        }
        None => BoundingBox::default(),
    }
}

/// Summarizes every external contour of a binary image. Non-zero pixels are
/// foreground; holes and regions nested inside holes are ignored.
pub fn find_blobs(binary: &GrayImage) -> Vec<Blob> {
    find_contours::<i32>(binary)
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .filter_map(|c| {
            bounding_rect(&c).map(|bbox| Blob {
                bbox,
                area: contour_area(&c),
            })
        })
        .collect()
}

/// The blob with the strictly greatest area. Ties go to the earlier blob and
/// blobs enclosing no area are never chosen.
pub fn largest_blob(blobs: &[Blob]) -> Option<&Blob> {
    let mut largest_area = 0.0;
    let mut largest = None;
    for blob in blobs {
        if blob.area > largest_area {
            largest_area = blob.area;
            largest = Some(blob);
        }
    }
    largest
}

/// Polygon area (shoelace) of the contour's boundary pixel centers.
fn contour_area(contour: &Contour<i32>) -> f64 {
    let points = &contour.points;
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0f64;
    for i in 0..n {
        let p0 = points[i];
        let p1 = points[(i + 1) % n];
        area += p0.x as f64 * p1.y as f64 - p1.x as f64 * p0.y as f64;
    }
    area.abs() * 0.5
}

fn bounding_rect(contour: &Contour<i32>) -> Option<BoundingBox> {
    let first = contour.points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &contour.points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(BoundingBox::new(
        min_x,
        min_y,
        (max_x - min_x + 1) as u32,
        (max_y - min_y + 1) as u32,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::label::label;
    use crate::tracking::test_support::mask_with_rects;
    use crate::tracking::types::Point;

    fn labels_for(rects: &[(u32, u32, u32, u32)]) -> LabelMap {
        label(&mask_with_rects(64, 48, rects, 255), 100, 200)
    }

    #[test]
    fn test_single_square() {
        let bbox = select(&labels_for(&[(10, 12, 20, 20)]), 100);

        assert_eq!(bbox, BoundingBox::new(10, 12, 20, 20));
        assert_eq!(bbox.center(), Point::new(20, 22));
    }

    #[test]
    fn test_largest_of_several() {
        let bbox = select(&labels_for(&[(2, 2, 6, 6), (20, 5, 15, 12), (40, 30, 10, 10)]), 100);
        assert_eq!(bbox, BoundingBox::new(20, 5, 15, 12));
    }

    #[test]
    fn test_empty_map_gives_empty_box() {
        let bbox = select(&LabelMap::new(64, 48), 100);
        assert_eq!(bbox, BoundingBox::default());
        assert_eq!(bbox.center(), Point::new(0, 0));
    }

    #[test]
    fn test_thin_lines_are_opened_away() {
        // A 2-pixel-wide bar does not survive a 3x3 opening.
        let bbox = select(&labels_for(&[(5, 5, 30, 2)]), 100);
        assert!(bbox.is_empty());
    }

    #[test]
    fn test_ties_go_to_first_blob() {
        let blobs = vec![
            Blob { bbox: BoundingBox::new(0, 0, 5, 5), area: 16.0 },
            Blob { bbox: BoundingBox::new(10, 10, 5, 5), area: 16.0 },
        ];
        assert_eq!(largest_blob(&blobs), Some(&blobs[0]));
    }

    #[test]
    fn test_zero_area_blobs_are_never_chosen() {
        let blobs = vec![Blob { bbox: BoundingBox::new(3, 3, 1, 1), area: 0.0 }];
        assert_eq!(largest_blob(&blobs), None);
    }

    #[test]
    fn test_chosen_blob_dominates_others() {
        let binary = mask_with_rects(64, 48, &[(1, 1, 9, 9), (20, 20, 12, 4), (40, 2, 6, 20)], 255);
        let blobs = find_blobs(&binary);
        assert_eq!(blobs.len(), 3);

        let best = largest_blob(&blobs).unwrap();
        assert!(blobs.iter().all(|b| best.area >= b.area));
        assert!(best.bbox.width > 0 && best.bbox.height > 0);
    }

    #[test]
    fn test_hole_is_not_an_external_contour() {
        let mut binary = mask_with_rects(32, 32, &[(4, 4, 20, 20)], 255);
        for y in 10..16 {
            for x in 10..16 {
                binary.put_pixel(x, y, image::Luma([0]));
            }
        }

        let blobs = find_blobs(&binary);
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].bbox, BoundingBox::new(4, 4, 20, 20));
        assert_eq!(blobs[0].area, 19.0 * 19.0);
    }
}

use image::{GrayImage, Luma};

use crate::tracking::config::{DEFAULT_FLOOD_TOLERANCE, DEFAULT_THRESHOLD};
use crate::tracking::label::label;
use crate::tracking::test_support::mask_with_rects;

const T: u8 = DEFAULT_THRESHOLD;
const TOLERANCE: u8 = DEFAULT_FLOOD_TOLERANCE;

#[test]
fn test_empty_mask_has_no_labels() {
    let mask = GrayImage::new(16, 16);
    let labels = label(&mask, T, TOLERANCE);

    assert!(labels.labels().is_empty());
    assert_eq!(labels.dimensions(), (16, 16));
}

#[test]
fn test_single_component_gets_one_label() {
    let mask = mask_with_rects(32, 24, &[(4, 5, 10, 7)], 180);
    let labels = label(&mask, T, TOLERANCE);

    assert_eq!(labels.labels(), vec![101]);
    assert_eq!(labels.count(101), 70);
    assert_eq!(labels.labeled_pixels(), 70);
}

#[test]
fn test_disjoint_components_get_increasing_labels() {
    let rects = [(1, 1, 3, 3), (10, 1, 2, 5), (2, 10, 6, 2)];
    let mask = mask_with_rects(20, 20, &rects, 255);
    let labels = label(&mask, T, TOLERANCE);

    assert_eq!(labels.labels(), vec![101, 102, 103]);
    // Seeds are found in row-major order.
    assert_eq!(labels.get(1, 1), 101);
    assert_eq!(labels.get(10, 1), 102);
    assert_eq!(labels.get(2, 10), 103);
    assert_eq!(labels.count(101), 9);
    assert_eq!(labels.count(102), 10);
    assert_eq!(labels.count(103), 12);
}

#[test]
fn test_diagonal_neighbors_are_separate_regions() {
    let mut mask = GrayImage::new(4, 4);
    mask.put_pixel(1, 1, Luma([200]));
    mask.put_pixel(2, 2, Luma([200]));

    let labels = label(&mask, T, TOLERANCE);
    assert_eq!(labels.labels(), vec![101, 102]);
}

#[test]
fn test_values_below_threshold_are_background() {
    let mut mask = mask_with_rects(8, 8, &[(0, 0, 8, 8)], 99);
    mask.put_pixel(3, 3, Luma([100]));

    let labels = label(&mask, T, TOLERANCE);
    assert_eq!(labels.labels(), vec![101]);
    assert_eq!(labels.count(101), 1);
    assert_eq!(labels.get(0, 0), 0);
}

#[test]
fn test_components_touching_the_border() {
    let mask = mask_with_rects(10, 6, &[(0, 0, 10, 1), (0, 5, 10, 1)], 150);
    let labels = label(&mask, T, TOLERANCE);

    assert_eq!(labels.labels(), vec![101, 102]);
    assert_eq!(labels.count(101), 10);
    assert_eq!(labels.count(102), 10);
}

#[test]
fn test_gradient_component_stays_whole_at_default_tolerance() {
    let mut mask = GrayImage::new(6, 1);
    for (x, value) in [100u8, 255, 100, 255, 100, 255].into_iter().enumerate() {
        mask.put_pixel(x as u32, 0, Luma([value]));
    }

    let labels = label(&mask, T, TOLERANCE);
    assert_eq!(labels.labels(), vec![101]);
}

#[test]
fn test_default_tolerance_joins_what_threshold_tolerance_splits() {
    let mut mask = GrayImage::new(2, 1);
    mask.put_pixel(0, 0, Luma([100]));
    mask.put_pixel(1, 0, Luma([255]));

    assert_eq!(label(&mask, T, TOLERANCE).labels(), vec![101]);
    assert_eq!(label(&mask, T, T).labels(), vec![101, 102]);
}

#[test]
fn test_tight_tolerance_splits_on_steps() {
    let mut mask = GrayImage::new(4, 1);
    for (x, value) in [100u8, 110, 250, 255].into_iter().enumerate() {
        mask.put_pixel(x as u32, 0, Luma([value]));
    }

    let labels = label(&mask, T, 20);
    assert_eq!(labels.labels(), vec![101, 102]);
    assert_eq!(labels.get(1, 0), 101);
    assert_eq!(labels.get(2, 0), 102);
}

#[test]
fn test_label_does_not_modify_input() {
    let mask = mask_with_rects(12, 12, &[(2, 2, 4, 4)], 200);
    let before = mask.clone();
    let first = label(&mask, T, TOLERANCE);
    let second = label(&mask, T, TOLERANCE);

    assert_eq!(mask, before);
    assert_eq!(first, second);
}

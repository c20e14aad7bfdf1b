//! End-to-end tests chaining resize, curves, filters and histograms.

use raster_core::{Channel, PixelBuffer};
use raster_ops::{
    apply_curve, apply_filter, resize, CurvePoint, CurvePoints, Histogram, Kernel,
};

fn mid_gray(w: u32, h: u32) -> PixelBuffer {
    PixelBuffer::filled(w, h, [128, 128, 128, 255]).unwrap()
}

#[test]
fn test_gray_resize_then_curve() {
    let src = mid_gray(10, 10);

    let small = resize(&src, 5, 5).unwrap();
    assert_eq!(small.dimensions(), (5, 5));
    assert!(small.iter_pixels().all(|p| p == [128, 128, 128, 255]));

    let points = CurvePoints::new(CurvePoint::new(0, 0), CurvePoint::new(128, 255)).unwrap();
    let bright = apply_curve(&small, &points).unwrap();
    assert!(bright.iter_pixels().all(|p| p == [255, 255, 255, 255]));

    // Inputs are never modified
    assert_eq!(src.pixel(0, 0), [128, 128, 128, 255]);
    assert_eq!(small.pixel(4, 4), [128, 128, 128, 255]);
}

#[test]
fn test_curve_example_values() {
    let src = PixelBuffer::new(3, 1, vec![30, 30, 30, 255, 220, 220, 220, 255, 125, 125, 125, 255])
        .unwrap();
    let points = CurvePoints::new(CurvePoint::new(50, 0), CurvePoint::new(200, 255)).unwrap();
    let out = apply_curve(&src, &points).unwrap();
    assert_eq!(out.pixel(0, 0), [0, 0, 0, 255]);
    assert_eq!(out.pixel(1, 0), [255, 255, 255, 255]);
    assert_eq!(out.pixel(2, 0), [128, 128, 128, 255]);
}

#[test]
fn test_histogram_after_edits() {
    let src = PixelBuffer::from_fn(32, 24, |x, y| [(x * 8) as u8, (y * 10) as u8, 60, 255]).unwrap();
    let resized = resize(&src, 50, 7).unwrap();
    let filtered = apply_filter(&resized, &Kernel::gaussian(3, 0.8)).unwrap();

    for buf in [&src, &resized, &filtered] {
        let hist = Histogram::build(buf);
        for ch in Channel::RGB {
            assert_eq!(hist.total(ch), buf.pixel_count() as u64);
        }
    }

    // Constant blue channel collapses into one bin
    let hist = Histogram::build(&filtered);
    assert_eq!(hist.b[60], 50 * 7);
}

#[test]
fn test_resize_roundtrip_is_identity_for_integer_factor() {
    let src = PixelBuffer::from_fn(6, 4, |x, y| [x as u8 * 40, y as u8 * 60, 0, 255]).unwrap();
    let up = resize(&src, 18, 12).unwrap();
    let down = resize(&up, 6, 4).unwrap();
    assert_eq!(down, src);
}

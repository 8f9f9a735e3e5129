// src/contour_location.rs

use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType, Contour};

use crate::types::CenterTrack;

/// Find the marking blob closest to the horizontal midpoint of the mask.
///
/// Works on a private copy of the mask: the one-pixel border is cleared so
/// every traced blob lies fully inside the frame, then external contours
/// are traced (holes and nested contours are ignored). Contours with a zero
/// area moment have no centroid and are skipped. Each frame is judged
/// independently; there is no smoothing or track continuity.
pub fn locate_center_track(mask: &GrayImage) -> Option<CenterTrack> {
    let mut scratch = mask.clone();
    clear_border(&mut scratch);

    let midpoint = (scratch.width() / 2) as i32;
    let contours: Vec<Contour<i32>> = find_contours(&scratch);

    let mut best: Option<(i32, CenterTrack)> = None;
    for contour in contours {
        if contour.border_type != BorderType::Outer || contour.parent.is_some() {
            continue;
        }
        let points: Vec<(i32, i32)> = contour.points.iter().map(|p| (p.x, p.y)).collect();
        let centroid = match polygon_centroid(&points) {
            Some(c) => c,
            None => continue,
        };
        let distance = (centroid.0 - midpoint).abs();
        let closer = match &best {
            Some((best_distance, _)) => distance < *best_distance,
            None => true,
        };
        if closer {
            best = Some((distance, CenterTrack { points, centroid }));
        }
    }

    best.map(|(_, track)| track)
}

/// Centroid from the contour's zeroth and first moments (Green's theorem
/// over the boundary polygon), integer-truncated. `None` when the area
/// moment is zero.
fn polygon_centroid(points: &[(i32, i32)]) -> Option<(i32, i32)> {
    if points.len() < 3 {
        return None;
    }

    let mut m00 = 0.0f64;
    let mut m10 = 0.0f64;
    let mut m01 = 0.0f64;

    for i in 0..points.len() {
        let (x0, y0) = points[i];
        let (x1, y1) = points[(i + 1) % points.len()];
        let (x0, y0) = (x0 as f64, y0 as f64);
        let (x1, y1) = (x1 as f64, y1 as f64);
        let cross = x0 * y1 - x1 * y0;
        m00 += cross;
        m10 += (x0 + x1) * cross;
        m01 += (y0 + y1) * cross;
    }

    m00 /= 2.0;
    if m00 == 0.0 {
        return None;
    }
    m10 /= 6.0;
    m01 /= 6.0;

    Some(((m10 / m00) as i32, (m01 / m00) as i32))
}

fn clear_border(mask: &mut GrayImage) {
    let (width, height) = mask.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    for x in 0..width {
        mask.put_pixel(x, 0, Luma([0]));
        mask.put_pixel(x, height - 1, Luma([0]));
    }
    for y in 0..height {
        mask.put_pixel(0, y, Luma([0]));
        mask.put_pixel(width - 1, y, Luma([0]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_rect(mask: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32) {
        for y in y0..=y1 {
            for x in x0..=x1 {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
    }

    #[test]
    fn test_polygon_centroid_of_square() {
        let square = [(0, 0), (10, 0), (10, 10), (0, 10)];
        assert_eq!(polygon_centroid(&square), Some((5, 5)));
    }

    #[test]
    fn test_degenerate_polygon_has_no_centroid() {
        // collinear boundary: zero area moment
        let line = [(0, 0), (5, 0), (10, 0), (5, 0)];
        assert_eq!(polygon_centroid(&line), None);
        assert_eq!(polygon_centroid(&[(0, 0), (1, 1)]), None);
    }

    #[test]
    fn test_selects_contour_closest_to_midpoint() {
        // centroids near x=600 and x=700 on a 1280-wide mask: the first is
        // 41px from the midpoint, the second 59px
        let mut mask = GrayImage::new(1280, 200);
        fill_rect(&mut mask, 580, 80, 619, 119);
        fill_rect(&mut mask, 680, 80, 719, 119);

        let track = locate_center_track(&mask).unwrap();
        assert_eq!(track.centroid.0, 599);
    }

    #[test]
    fn test_empty_mask_has_no_track() {
        let mask = GrayImage::new(1280, 720);
        assert!(locate_center_track(&mask).is_none());
    }

    #[test]
    fn test_degenerate_blob_is_skipped() {
        // a one-pixel-tall run traces to a collinear contour
        let mut mask = GrayImage::new(200, 100);
        fill_rect(&mut mask, 10, 50, 90, 50);
        assert!(locate_center_track(&mask).is_none());
    }

    #[test]
    fn test_border_touching_blob_is_confined_to_interior() {
        // a mask that is entirely foreground still yields one centered blob
        let mask = GrayImage::from_pixel(101, 101, Luma([255]));
        let track = locate_center_track(&mask).unwrap();
        assert_eq!(track.centroid, (50, 50));
    }

    #[test]
    fn test_caller_mask_is_not_mutated() {
        let mask = GrayImage::from_pixel(64, 64, Luma([255]));
        let before = mask.clone();
        let _ = locate_center_track(&mask);
        assert_eq!(mask, before);
    }
}

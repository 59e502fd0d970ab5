//! Rectangle → triangle expansion shared by the fill and outline buffers.

use crate::coords::Rect;
use crate::paint::Rgba8;
use crate::vertex::Vertex;

/// Two triangles covering `rect`:
/// (min, max-x, max) then (min, max, min-y-at-max-y).
pub fn rect_to_triangles(rect: Rect, color: Rgba8) -> [Vertex; 6] {
    let x = rect.origin.x;
    let y = rect.origin.y;
    let w = rect.size.x;
    let h = rect.size.y;

    [
        Vertex::new(x, y, color),
        Vertex::new(x + w, y, color),
        Vertex::new(x + w, y + h, color),
        Vertex::new(x, y, color),
        Vertex::new(x + w, y + h, color),
        Vertex::new(x, y + h, color),
    ]
}

/// Border of `rect` as four quads (bottom, right, top, left), each extended
/// outward by `width` so the corners meet.
#[rustfmt::skip]
pub fn rect_to_border_triangles(rect: Rect, color: Rgba8, width: f32) -> [Vertex; 24] {
    let x = rect.origin.x;
    let y = rect.origin.y;
    let w = rect.size.x;
    let h = rect.size.y;
    let t = width;

    // outer corners
    let (ox0, oy0, ox1, oy1) = (x - t, y - t, x + w + t, y + h + t);
    // inner corners
    let (ix0, iy0, ix1, iy1) = (x, y, x + w, y + h);

    let v = |x: f32, y: f32| Vertex::new(x, y, color);

    [
        v(ox0, oy0), v(ox1, oy0), v(ix1, iy0),
        v(ox0, oy0), v(ix1, iy0), v(ix0, iy0),

        v(ox1, oy0), v(ox1, oy1), v(ix1, iy1),
        v(ox1, oy0), v(ix1, iy1), v(ix1, iy0),

        v(ox1, oy1), v(ox0, oy1), v(ix0, iy1),
        v(ox1, oy1), v(ix0, iy1), v(ix1, iy1),

        v(ox0, oy1), v(ox0, oy0), v(ix0, iy0),
        v(ox0, oy1), v(ix0, iy0), v(ix0, iy1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba8 = Rgba8::new(255, 0, 0, 255);

    #[test]
    fn fill_vertex_order() {
        let tris = rect_to_triangles(Rect::new(10.0, 20.0, 30.0, 40.0), RED);
        let pos: Vec<[f32; 2]> = tris.iter().map(|v| v.position).collect();
        assert_eq!(
            pos,
            vec![[10.0, 20.0], [40.0, 20.0], [40.0, 60.0], [10.0, 20.0], [40.0, 60.0], [10.0, 60.0]]
        );
        assert!(tris.iter().all(|v| v.color == RED));
    }

    #[test]
    fn border_stays_within_outer_rect() {
        let tris = rect_to_border_triangles(Rect::new(0.0, 0.0, 10.0, 10.0), RED, 2.0);
        for v in tris {
            assert!(v.position[0] >= -2.0 && v.position[0] <= 12.0);
            assert!(v.position[1] >= -2.0 && v.position[1] <= 12.0);
        }
        // bottom quad starts at the outer min corner
        assert_eq!(tris[0].position, [-2.0, -2.0]);
        assert_eq!(tris[23].position, [0.0, 10.0]);
    }

    #[test]
    fn degenerate_rect_is_accepted() {
        let tris = rect_to_triangles(Rect::new(5.0, 5.0, 0.0, -3.0), RED);
        assert_eq!(tris[2].position, [5.0, 2.0]);
    }
}

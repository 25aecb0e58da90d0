//! Pieces module - tetromino shape matrices, rotation and the fixed catalogs
//!
//! A shape is a small boolean matrix (at most 4x4) whose top-left corner is the
//! piece origin. Rotation never mutates a shape; it builds a new matrix.

use crate::types::{Rgb, ShapeKind};

/// Largest side of any shape matrix
pub const MAX_SHAPE_SIZE: usize = 4;

/// Boolean shape matrix, row-major, `height` rows of `width` columns.
///
/// Cells outside `width x height` are always `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from rows of 0/1 values.
    ///
    /// Rows must be non-empty, equally long and no larger than 4x4.
    pub const fn from_rows(rows: &[&[u8]]) -> Self {
        assert!(!rows.is_empty() && rows.len() <= MAX_SHAPE_SIZE);
        let width = rows[0].len();
        assert!(width > 0 && width <= MAX_SHAPE_SIZE);

        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < rows.len() {
            assert!(rows[y].len() == width);
            let mut x = 0;
            while x < width {
                cells[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }

        Self {
            width: width as u8,
            height: rows.len() as u8,
            cells,
        }
    }

    /// Number of columns in the bounding box
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Number of rows in the bounding box
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the cell at column `x`, row `y` of the matrix is filled
    pub fn is_filled(&self, x: u8, y: u8) -> bool {
        x < self.width && y < self.height && self.cells[y as usize][x as usize]
    }

    /// Offsets `(x, y)` of every filled cell, in row-major order.
    pub fn filled(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width)
                .filter(move |&x| self.cells[y as usize][x as usize])
                .map(move |x| (x as i8, y as i8))
        })
    }

    /// Rotate 90 degrees clockwise.
    ///
    /// The last row of `self` becomes the first column of the result, so a
    /// `w x h` shape turns into an `h x w` one.
    pub fn rotated(&self) -> Shape {
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let h = self.height as usize;
        for (y, row) in cells.iter_mut().enumerate().take(self.width as usize) {
            for (x, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.cells[h - 1 - x][y];
            }
        }

        Shape {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    /// Rows as 0/1 vectors (handy in tests and debug output)
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.height as usize)
            .map(|y| {
                (0..self.width as usize)
                    .map(|x| u8::from(self.cells[y][x]))
                    .collect()
            })
            .collect()
    }
}

/// Shape catalog, indexed like [`ShapeKind::ALL`].
pub static SHAPES: [Shape; 7] = [
    // T
    Shape::from_rows(&[&[1, 1, 1], &[0, 1, 0]]),
    // S
    Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
    // Z
    Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
    // I
    Shape::from_rows(&[&[1, 1, 1, 1]]),
    // O
    Shape::from_rows(&[&[1, 1], &[1, 1]]),
    // L
    Shape::from_rows(&[&[1, 1, 1], &[1, 0, 0]]),
    // J
    Shape::from_rows(&[&[1, 1, 1], &[0, 0, 1]]),
];

/// Color catalog. Drawn independently of the shape.
pub static COLORS: [Rgb; 9] = [
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(255, 255, 0),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 0, 255),
    Rgb::new(255, 165, 0),
    Rgb::new(128, 0, 128),
    Rgb::new(0, 128, 128),
];

/// Spawn orientation of a catalog shape
pub fn get_shape(kind: ShapeKind) -> &'static Shape {
    &SHAPES[kind.index()]
}

/// Column that horizontally centers a shape on a board of `board_width` columns.
pub fn spawn_column(shape: &Shape, board_width: u8) -> i8 {
    (board_width / 2) as i8 - (shape.width() / 2) as i8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_dimensions() {
        let t = get_shape(ShapeKind::T);
        assert_eq!(t.width(), 3);
        assert_eq!(t.height(), 2);
        assert!(t.is_filled(1, 1));
        assert!(!t.is_filled(0, 1));
        // Outside the bounding box
        assert!(!t.is_filled(3, 0));
        assert!(!t.is_filled(0, 2));
    }

    #[test]
    fn test_every_catalog_shape_has_four_cells() {
        for shape in SHAPES.iter() {
            assert_eq!(shape.filled().count(), 4);
        }
    }

    #[test]
    fn test_rotate_t_clockwise() {
        let rotated = get_shape(ShapeKind::T).rotated();
        assert_eq!(rotated.to_rows(), vec![vec![0, 1], vec![1, 1], vec![0, 1]]);
    }

    #[test]
    fn test_rotate_i_changes_bounding_box() {
        let rotated = get_shape(ShapeKind::I).rotated();
        assert_eq!(rotated.width(), 1);
        assert_eq!(rotated.height(), 4);
    }

    #[test]
    fn test_rotation_does_not_mutate_catalog() {
        let before = SHAPES[ShapeKind::L.index()];
        let _ = get_shape(ShapeKind::L).rotated();
        assert_eq!(SHAPES[ShapeKind::L.index()], before);
    }

    #[test]
    fn test_filled_offsets_row_major() {
        let s = get_shape(ShapeKind::S);
        let cells: Vec<_> = s.filled().collect();
        assert_eq!(cells, vec![(1, 0), (2, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn test_spawn_column_centers_shape() {
        assert_eq!(spawn_column(get_shape(ShapeKind::I), 10), 3);
        assert_eq!(spawn_column(get_shape(ShapeKind::O), 10), 4);
        assert_eq!(spawn_column(get_shape(ShapeKind::T), 10), 4);
    }
}

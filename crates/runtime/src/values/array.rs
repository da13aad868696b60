use std::fmt::Display;

use super::{RuntimeVal, ValueError};

// Fixed-length array, allocated undefined-filled at declaration. No
// resizing, no negative indices.
#[derive(Debug)]
pub struct Array1D {
    elems: Vec<RuntimeVal>,
}

impl Array1D {
    pub fn new(len: usize) -> Self {
        Self {
            elems: vec![RuntimeVal::Undefined; len],
        }
    }

    pub fn len(&self) -> usize {
        self.elems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    pub fn get(&self, index: i64) -> Result<RuntimeVal, ValueError> {
        let id = check_index(index, self.elems.len())?;

        Ok(self.elems[id].clone())
    }

    // A trailing second index is tolerated the way the source runtime stored
    // 1D arrays as a single-column grid: it must stay inside that column
    pub fn get_pair(&self, index: i64, second: i64) -> Result<RuntimeVal, ValueError> {
        check_index(second, 1)?;

        self.get(index)
    }

    // Initializer values land in declaration order. Capacity is validated
    // by the caller before any element is evaluated
    pub(crate) fn fill(&mut self, values: Vec<RuntimeVal>) {
        for (slot, value) in self.elems.iter_mut().zip(values) {
            *slot = value;
        }
    }
}

impl Display for Array1D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;

        for (idx, val) in self.elems.iter().enumerate() {
            write!(f, "{}", val)?;

            // A comma only if there is another value after
            if idx != self.elems.len() - 1 {
                write!(f, ", ")?;
            }
        }

        write!(f, "]")
    }
}

// Fixed rows x cols grid. Storage is column-major: linear slot i + j * rows,
// so initializer index k lands at [k % rows, k / rows].
#[derive(Debug)]
pub struct Array2D {
    elems: Vec<RuntimeVal>,
    rows: usize,
    cols: usize,
}

impl Array2D {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            elems: vec![RuntimeVal::Undefined; rows * cols],
            rows,
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: i64, col: i64) -> Result<RuntimeVal, ValueError> {
        let i = check_index(row, self.rows)?;
        let j = check_index(col, self.cols)?;

        Ok(self.elems[i + j * self.rows].clone())
    }

    // A single-index read of a grid takes column 0
    pub fn get_single(&self, row: i64) -> Result<RuntimeVal, ValueError> {
        self.get(row, 0)
    }

    pub(crate) fn fill(&mut self, values: Vec<RuntimeVal>) {
        for (slot, value) in self.elems.iter_mut().zip(values) {
            *slot = value;
        }
    }
}

impl Display for Array2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;

        for i in 0..self.rows {
            write!(f, "[")?;

            for j in 0..self.cols {
                write!(f, "{}", self.elems[i + j * self.rows])?;

                if j != self.cols - 1 {
                    write!(f, ", ")?;
                }
            }

            write!(f, "]")?;

            if i != self.rows - 1 {
                write!(f, ", ")?;
            }
        }

        write!(f, "]")
    }
}

// Bounds check for one dimension: no negative indices, no remapping
fn check_index(index: i64, extent: usize) -> Result<usize, ValueError> {
    if index < 0 || index as usize >= extent {
        return Err(ValueError::IndexOutOfBounds(index, extent));
    }

    Ok(index as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_arrays_start_undefined() {
        let arr = Array1D::new(3);
        assert_eq!(arr.len(), 3);
        assert_eq!(arr.get(2), Ok(RuntimeVal::Undefined));

        let grid = Array2D::new(2, 3);
        assert_eq!(grid.get(1, 2), Ok(RuntimeVal::Undefined));
    }

    #[test]
    fn out_of_bounds_reads_fail_per_dimension() {
        let arr = Array1D::new(3);
        assert_eq!(arr.get(3), Err(ValueError::IndexOutOfBounds(3, 3)));
        assert_eq!(arr.get(-1), Err(ValueError::IndexOutOfBounds(-1, 3)));

        let grid = Array2D::new(2, 3);
        assert_eq!(grid.get(2, 0), Err(ValueError::IndexOutOfBounds(2, 2)));
        assert_eq!(grid.get(0, 3), Err(ValueError::IndexOutOfBounds(3, 3)));
    }

    #[test]
    fn second_index_on_1d_is_bounded_by_one() {
        let mut arr = Array1D::new(2);
        arr.fill(vec![RuntimeVal::Int(10), RuntimeVal::Int(20)]);

        assert_eq!(arr.get_pair(1, 0), Ok(RuntimeVal::Int(20)));
        assert_eq!(arr.get_pair(1, 1), Err(ValueError::IndexOutOfBounds(1, 1)));
    }

    #[test]
    fn fill_order_is_column_major() {
        let mut grid = Array2D::new(2, 3);
        grid.fill((1..=6).map(RuntimeVal::Int).collect());

        // [i, j] holds initializer index i + j * rows
        for i in 0..2i64 {
            for j in 0..3i64 {
                assert_eq!(grid.get(i, j), Ok(RuntimeVal::Int(i + j * 2 + 1)));
            }
        }
    }

    #[test]
    fn partial_fill_leaves_tail_undefined() {
        let mut arr = Array1D::new(3);
        arr.fill(vec![RuntimeVal::Int(1)]);

        assert_eq!(arr.get(0), Ok(RuntimeVal::Int(1)));
        assert_eq!(arr.get(2), Ok(RuntimeVal::Undefined));
    }

    #[test]
    fn display_presents_rows() {
        let mut grid = Array2D::new(2, 3);
        grid.fill((1..=6).map(RuntimeVal::Int).collect());

        assert_eq!(grid.to_string(), "[[1, 3, 5], [2, 4, 6]]");

        let mut arr = Array1D::new(3);
        arr.fill((1..=3).map(RuntimeVal::Int).collect());

        assert_eq!(arr.to_string(), "[1, 2, 3]");
    }
}

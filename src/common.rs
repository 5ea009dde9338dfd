/// Grid cell as `(x, y)`; `x` is the column and `y` the row.
pub type Coordinate = (usize, usize);

/// Manhattan distance, the heuristic used for every estimated cost.
pub fn manhattan_distance(from: Coordinate, to: Coordinate) -> usize {
    from.0.abs_diff(to.0) + from.1.abs_diff(to.1)
}

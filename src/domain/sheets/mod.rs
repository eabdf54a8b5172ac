pub mod a1_notation;
pub mod cell;
pub mod column;
pub mod formula_shift;
pub mod row;

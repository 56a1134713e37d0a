pub mod matmul;
pub mod matrix_transpose;

pub use matmul::{matmul_cvs, matmul_dok};
pub use matrix_transpose::{transpose_ccs, transpose_crs, transpose_cvs, transpose_dok};

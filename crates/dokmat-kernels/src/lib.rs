//! Sparse matrix kernels for dokmat (pure Rust, rayon parallel)
//!
//! Every kernel is generic over the element type and, for DOK operands, over
//! the key strategy of each operand and of the target independently.

pub mod convert;
pub mod elementwise;
pub mod linalg;
pub mod spmv;
pub mod utility;

pub use convert::{
    ccs_to_crs, ccs_to_dense, compress_ccs, compress_crs, compress_cvs, crs_to_ccs, crs_to_dense, cvs_to_dense,
    decompress_ccs, decompress_crs, decompress_cvs,
};
pub use elementwise::{add_cvs, add_dok, scale_cvs, scale_dok, scale_dok_in_place, sub_cvs, sub_dok};
pub use linalg::{matmul_cvs, matmul_dok, transpose_ccs, transpose_crs, transpose_cvs, transpose_dok};
pub use spmv::{spmv_ccs, spmv_crs, spmv_cvs, spmv_dok};
pub use utility::util::{current_threads, init_parallel};

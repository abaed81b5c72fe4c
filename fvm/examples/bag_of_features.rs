//! Mix bag-of-features documents with dense embeddings in one matrix

use fvm::{FeatureMatrix, Matrix, MatrixConfig, MatrixElement, Row};
use std::time::Instant;

fn main() -> fvm::Result<()> {
    let mut matrix = Matrix::new(MatrixConfig::<f64>::default());
    matrix.set_columns(["len", "has_title"])?;

    println!("Adding rows...");
    matrix.add_row(vec![120.0, 1.0], Some("doc_a"))?;
    matrix.add_row(
        Row::sparse([("len", 87.0), ("word:rust", 3.0), ("word:matrix", 1.0)]),
        Some("doc_b"),
    )?;
    matrix.add_row(Row::sparse([("word:rust", 1.0)]), Some("doc_c"))?;

    let (nrows, ncols) = matrix.dimensions();
    println!("Matrix dimensions: {nrows} x {ncols}");
    println!("Columns: {:?}", matrix.column_names());

    for key in matrix.keys()? {
        let dense = matrix.row_as_dense(key)?;
        let total: f64 = dense.iter().map(|v| v.to_f64()).sum();
        println!("   {key}: {:?} (sum {total})", &*dense);
    }

    let start = Instant::now();
    let transposed = matrix.transpose()?;
    println!("Transposed in {:?}", start.elapsed());

    for key in transposed.keys()? {
        println!("   {key}: {:?}", &*transposed.row_as_sparse(key)?);
    }
    Ok(())
}

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fvm::{Matrix, MatrixConfig, Row};
use rand::{rngs::StdRng, Rng, SeedableRng};

const COLUMNS: usize = 2_000;
const ROWS: usize = 500;
const FEATURES_PER_ROW: usize = 40;

/// Half dense, half bag-of-features rows over a shared vocabulary
fn build_matrix() -> Matrix<f64> {
    let mut rng = StdRng::seed_from_u64(7);
    let mut matrix = Matrix::new(MatrixConfig::default());
    matrix
        .set_columns((0..COLUMNS).map(|c| format!("feature_{c}")))
        .unwrap();

    for row in 0..ROWS {
        let name = format!("doc_{row}");
        if row % 2 == 0 {
            let len = rng.gen_range(0..=COLUMNS);
            let values: Vec<f64> = (0..len).map(|_| rng.gen_range(0.0..1.0)).collect();
            matrix.add_row(values, Some(&name)).unwrap();
        } else {
            let pairs = (0..FEATURES_PER_ROW).map(|_| {
                (
                    format!("feature_{}", rng.gen_range(0..COLUMNS + 100)),
                    rng.gen_range(0.0..1.0),
                )
            });
            matrix.add_row(Row::sparse(pairs), Some(&name)).unwrap();
        }
    }
    matrix
}

fn bench_row_views(c: &mut Criterion) {
    let matrix = build_matrix();

    c.bench_function("row_as_dense (sparse rows, cached)", |b| {
        b.iter(|| {
            for row in (1..ROWS).step_by(2) {
                black_box(matrix.row_as_dense(row).unwrap());
            }
        })
    });

    c.bench_function("row_as_sparse (dense rows, cached)", |b| {
        b.iter(|| {
            for row in (0..ROWS).step_by(2) {
                black_box(matrix.row_as_sparse(row).unwrap());
            }
        })
    });
}

fn bench_dense_export(c: &mut Criterion) {
    let matrix = build_matrix();

    c.bench_function("to_dense_matrix", |b| {
        b.iter(|| black_box(matrix.to_dense_matrix()))
    });

    c.bench_function("transpose", |b| {
        b.iter(|| black_box(matrix.transpose().unwrap()))
    });
}

criterion_group!(benches, bench_row_views, bench_dense_export);
criterion_main!(benches);

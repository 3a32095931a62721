use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlforge::{Select, SqlStatement};

/// Build a SELECT with `n` columns and `n` WHERE predicates:
/// SELECT t.col0, ... FROM t WHERE t.col0 = :t_col0 AND ...
fn build_select(n: usize) -> Select {
    let mut stmt = Select::new("t");
    for i in 0..n {
        stmt = stmt.column(&format!("col{i}"));
    }
    let mut chain = stmt.where_();
    for i in 0..n {
        if i > 0 {
            chain = chain.and();
        }
        chain = chain.equal(&format!("col{i}"), i as i64);
    }
    chain.end()
}

fn bench_get_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/get_query");

    for n in [1, 5, 10, 50, 100] {
        let stmt = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &stmt, |b, stmt| {
            b.iter(|| black_box(stmt.get_query(true)));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/build_and_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let stmt = build_select(n);
                black_box(stmt.get_query(true));
            });
        });
    }

    group.finish();
}

fn bench_in_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/in_list");

    for n in [5, 20, 100, 500] {
        let values: Vec<i64> = (0..n).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| {
                let stmt = Select::new("t")
                    .all()
                    .where_()
                    .in_list("id", values.clone())
                    .end();
                black_box(stmt.get_query(true));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_get_query, bench_build_and_render, bench_in_list);
criterion_main!(benches);

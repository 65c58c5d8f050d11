use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pgstring::{BindingTable, Record, create_table, insert_into, select_all, update};

#[derive(Record)]
struct Event {
    #[db = "id,primarykey"]
    id: i64,
    #[db = "kind,notnull"]
    kind: String,
    payload: Option<String>,
    tags: Vec<String>,
    created_at: chrono::NaiveDateTime,
    #[db = "-"]
    scratch: Vec<u8>,
}

fn event() -> Event {
    Event {
        id: 1,
        kind: "signup".to_string(),
        payload: Some("{}".to_string()),
        tags: vec!["web".to_string(), "eu".to_string()],
        created_at: chrono::NaiveDateTime::default(),
        scratch: Vec::new(),
    }
}

fn bench_resolve_and_bind(c: &mut Criterion) {
    let e = event();
    c.bench_function("record/columns", |b| b.iter(|| black_box(Event::columns())));
    c.bench_function("record/bindings", |b| b.iter(|| black_box(e.bindings())));
}

fn bench_insert(c: &mut Criterion) {
    let e = event();
    c.bench_function("statement/insert", |b| {
        b.iter(|| {
            black_box(
                insert_into("events")
                    .columns(&e)
                    .values(&e)
                    .returning_columns(["id"])
                    .build(),
            )
        });
    });
}

fn bench_update_positional(c: &mut Criterion) {
    let e = event();
    c.bench_function("statement/update_to_positional", |b| {
        b.iter(|| {
            black_box(
                update("events")
                    .set(&e)
                    .where_("id = @id")
                    .to_positional(),
            )
        });
    });
}

fn bench_in_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement/in_list");

    for n in [5, 20, 100, 500] {
        let values: Vec<i64> = (0..n).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| {
                let stmt = select_all()
                    .from("events")
                    .in_list("id", values.iter().copied());
                black_box(stmt.to_positional())
            });
        });
    }

    group.finish();
}

fn bench_to_positional(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement/to_positional");

    for n in [1, 10, 50, 100] {
        let mut sql = String::from("SELECT * FROM t WHERE ");
        let mut args = BindingTable::new();
        for i in 0..n {
            if i > 0 {
                sql.push_str(" AND ");
            }
            sql.push_str(&format!("col{i} = @p{i}"));
            args.insert(format!("p{i}"), i as i64);
        }
        group.bench_with_input(BenchmarkId::from_parameter(n), &(sql, args), |b, (sql, args)| {
            b.iter(|| black_box(pgstring::to_positional(sql, args)));
        });
    }

    group.finish();
}

fn bench_create_table(c: &mut Criterion) {
    c.bench_function("statement/create_table", |b| {
        b.iter(|| black_box(create_table::<Event>("events", None).build()));
    });
}

criterion_group!(
    benches,
    bench_resolve_and_bind,
    bench_insert,
    bench_update_positional,
    bench_in_list,
    bench_to_positional,
    bench_create_table
);
criterion_main!(benches);

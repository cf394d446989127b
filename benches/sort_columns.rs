use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use journey_grid::{
    assemble::{assemble_columns, column_fields},
    grid::DataGrid,
    journey::{JourneySchema, Translations},
    projection::Row,
    registry::ColumnTypeRegistry,
    sort::SortDirective,
};
use serde_json::json;

fn generate_rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| {
            let day = (i % 28) + 1;
            let answers = (0..3)
                .map(|n| {
                    json!({
                        "submission_id": i * 3 + n,
                        "submitted": format!("2024-02-{:02}T00:00:00Z", n + 1),
                        "text": format!("answer {} {}", i % 13, n),
                    })
                })
                .collect::<Vec<_>>();
            Row::from_json(json!({
                "id": i,
                "people": [{"id": i, "first_name": format!("First{}", i % 97), "last_name": "Person"}],
                "created_at": format!("2024-01-{day:02}T08:00:00Z"),
                "summary": format!("Summary {}", (i * 7919) % 1000),
                "answers": answers,
            }))
        })
        .collect()
}

fn bench_sorting(c: &mut Criterion) {
    let journey = JourneySchema::new("Case").with_field("answers", "survey_response");
    let translations = Translations::scaffold(column_fields(&journey).iter().map(String::as_str));
    let columns = assemble_columns(&journey, &translations, &ColumnTypeRegistry::standard())
        .expect("assemble columns");
    let rows = generate_rows(10_000);

    for spec in ["answers", "created_at:desc", "people,summary"] {
        let directives = spec
            .split(',')
            .map(SortDirective::parse)
            .collect::<Result<Vec<_>, _>>()
            .expect("parse directives");
        c.bench_function(&format!("sort_10k_by_{}", spec.replace([',', ':'], "_")), |b| {
            b.iter_batched(
                || DataGrid::new(&columns, rows.clone()),
                |mut grid| {
                    grid.sort(&directives).expect("sort");
                    grid
                },
                BatchSize::LargeInput,
            )
        });
    }

    c.bench_function("search_10k", |b| {
        b.iter_batched(
            || DataGrid::new(&columns, rows.clone()),
            |mut grid| {
                grid.search("answer 7");
                grid
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_sorting);
criterion_main!(benches);

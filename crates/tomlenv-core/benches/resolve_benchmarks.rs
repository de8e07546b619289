use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::fs;
use tempfile::tempdir;
use toml::Table;
use tomlenv_core::settings::schema;
use tomlenv_core::{Environment, Resolver, deep_merge, validate};

const BASE: &str = r#"[database]
user = "app"
password = "app-password"
name = "appdb"
host = "localhost"
port = 5432
driver = "asyncpg"

[engine]
echo = false
echo_pool = false
pool_size = 5
max_overflow = 10

[logging]
level = "INFO"
"#;

const OVERLAY: &str = r#"[database]
host = "prod-db"

[engine]
pool_size = 20

[logging]
level = "WARNING"
"#;

fn deep_merge_benchmark(c: &mut Criterion) {
    c.bench_function("merge::deep_merge", |b| {
        let base: Table = BASE.parse().unwrap();
        let overlay: Table = OVERLAY.parse().unwrap();
        b.iter(|| deep_merge(black_box(&base), black_box(&overlay)))
    });
}

fn validate_benchmark(c: &mut Criterion) {
    c.bench_function("validate::validate", |b| {
        let base: Table = BASE.parse().unwrap();
        let overlay: Table = OVERLAY.parse().unwrap();
        let merged = deep_merge(&base, &overlay);
        let schema = schema();
        b.iter(|| {
            validate(black_box(&schema), black_box(&merged), Environment::Prod).unwrap()
        })
    });
}

fn resolve_benchmark(c: &mut Criterion) {
    c.bench_function("resolver::resolve (load + merge + validate)", |b| {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), BASE).unwrap();
        fs::create_dir_all(dir.path().join("prod")).unwrap();
        fs::write(dir.path().join("prod").join("config.toml"), OVERLAY).unwrap();
        let resolver = Resolver::new(dir.path(), schema());
        b.iter(|| resolver.resolve(black_box(Environment::Prod)).unwrap())
    });
}

criterion_group!(
    benches,
    deep_merge_benchmark,
    validate_benchmark,
    resolve_benchmark
);
criterion_main!(benches);

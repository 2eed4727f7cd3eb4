//! パフォーマンスベンチマーク
//!
//! 合成した行データで2つの分類モードとTypeScriptの描画を測定します。
//! 行数は実際のシートの行範囲（材料費144行、労務費114行）の10倍程度です。

use casa_precos::{
    classify_by_code, classify_by_description, render_catalog_body, Row, LABOR_RULES,
    MATERIAL_INDEX, MATERIAL_RULES,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

/// 規則表のコードを循環させた材料費の行（一部は未登録コード）
fn material_rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| {
            let label = if i % 7 == 0 {
                format!("9.{}.{}", i / 100, i % 100)
            } else {
                MATERIAL_RULES[i % MATERIAL_RULES.len()].key.to_string()
            };
            Row::new(7 + i as u32, label, 10.0 + (i % 50) as f64)
        })
        .collect()
}

/// センチネル・キーワード・未登録の説明文を混ぜた労務費の行
fn labor_rows(count: usize) -> Vec<Row> {
    const SENTINELS: [&str; 3] = ["Parede", "Teto", "Pisos"];

    (0..count)
        .map(|i| {
            let label = match i % 10 {
                0 => SENTINELS[(i / 10) % 3].to_string(),
                1 => "Revestimento cerâmico esmaltado".to_string(),
                2 => "Serviços gerais de apoio à obra".to_string(),
                _ => format!(
                    "{} conforme projeto",
                    LABOR_RULES[i % LABOR_RULES.len()].key.to_uppercase()
                ),
            };
            Row::new(7 + i as u32, label, 5.0 + (i % 30) as f64)
        })
        .collect()
}

fn benchmark_classify_by_code(c: &mut Criterion) {
    let rows = material_rows(1_500);
    let mut group = c.benchmark_group("classify_by_code");
    group.throughput(Throughput::Elements(rows.len() as u64));
    group.bench_function("1500_rows", |b| {
        b.iter(|| classify_by_code(black_box(rows.clone()), &MATERIAL_INDEX))
    });
    group.finish();
}

fn benchmark_classify_by_description(c: &mut Criterion) {
    let rows = labor_rows(1_200);
    let mut group = c.benchmark_group("classify_by_description");
    group.throughput(Throughput::Elements(rows.len() as u64));
    group.bench_function("1200_rows", |b| {
        b.iter(|| classify_by_description(black_box(rows.clone()), LABOR_RULES))
    });
    group.finish();
}

fn benchmark_render(c: &mut Criterion) {
    let extraction = classify_by_code(material_rows(1_500), &MATERIAL_INDEX);
    c.bench_function("render_catalog_body", |b| {
        b.iter(|| render_catalog_body(black_box(&extraction.catalog)))
    });
}

criterion_group!(
    benches,
    benchmark_classify_by_code,
    benchmark_classify_by_description,
    benchmark_render
);
criterion_main!(benches);

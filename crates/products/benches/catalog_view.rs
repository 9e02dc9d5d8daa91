use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use std::collections::HashMap;

use storefront_core::{CategoryKey, ProductId};
use storefront_products::{
    CategorySelection, FilterState, Product, RatingIndex, RatingSummary, SortMode, catalog_view,
};

const CATEGORIES: [&str; 4] = ["ayakkabi", "sapka", "sweat", "tshirt"];

fn synthetic_catalog(n: usize) -> (Vec<Product>, RatingIndex) {
    let products: Vec<Product> = (0..n)
        .map(|i| Product {
            id: ProductId::new(format!("p_{i:05}")).unwrap(),
            name: format!("Product {i}"),
            price: ((i * 37) % 2000) as f64 + 0.99,
            category: CATEGORIES[i % 4].to_string(),
            category_key: Some(CategoryKey::new(CATEGORIES[i % 4]).unwrap()),
            images: vec![format!("images/p_{i:05}_1.jpg")],
            stock: None,
            rating: None,
            description: String::new(),
        })
        .collect();

    let summaries: HashMap<ProductId, RatingSummary> = products
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let summary = RatingSummary {
                avg: 1.0 + ((i * 13) % 40) as f64 / 10.0,
                total: (i % 50) as u64,
                ..RatingSummary::empty()
            };
            (p.id.clone(), summary)
        })
        .collect();

    (products, RatingIndex::new(summaries, false))
}

fn bench_catalog_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_view");

    for size in [100usize, 1_000, 10_000] {
        let (products, ratings) = synthetic_catalog(size);
        group.throughput(Throughput::Elements(size as u64));

        for sort in [SortMode::Original, SortMode::PriceAsc, SortMode::RatingDesc] {
            let state = FilterState {
                category: CategorySelection::parse("tshirt"),
                min_price: Some(100.0),
                max_price: Some(1500.0),
                min_rating: Some(2.5),
                sort,
            };
            group.bench_with_input(
                BenchmarkId::new(sort.as_str(), size),
                &state,
                |b, state| b.iter(|| black_box(catalog_view(&products, state, &ratings).len())),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_catalog_view);
criterion_main!(benches);

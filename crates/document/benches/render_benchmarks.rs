use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use feedforge_core::{AttributeTree, Value};
use feedforge_document::{CategoryDispatcher, DocumentSerializer, RenderOptions};

/// Category tree with `width` keys per level, `depth` levels deep.
fn category_tree(width: usize, depth: usize) -> AttributeTree {
    let mut tree = AttributeTree::new();
    for i in 0..width {
        let key = format!("attr_{i}");
        if depth > 1 && i % 2 == 0 {
            tree.set(key, category_tree(width, depth - 1));
        } else if i % 3 == 0 {
            tree.set(key, Value::list(["a", "b", "c"]));
        } else {
            tree.set(key, format!("value {i} & more"));
        }
    }
    tree
}

fn bench_render(c: &mut Criterion) {
    let dispatcher = CategoryDispatcher::default();
    let mut group = c.benchmark_group("category_render");

    for depth in [1usize, 3, 5] {
        let tree = category_tree(6, depth);
        group.throughput(Throughput::Elements(depth as u64));

        for (label, options) in [
            ("compact", RenderOptions::default()),
            (
                "pretty",
                RenderOptions {
                    indent: Some(2),
                    xml_declaration: true,
                },
            ),
        ] {
            let serializer = DocumentSerializer::new(options);
            group.bench_with_input(BenchmarkId::new(label, depth), &tree, |b, tree| {
                b.iter(|| {
                    let doc = serializer
                        .render("ProductData", |e| dispatcher.serialize("ce", black_box(tree), e))
                        .unwrap();
                    black_box(doc.to_xml_string().unwrap())
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);

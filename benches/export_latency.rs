use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use clipmark::dom::{Element, Node};
use clipmark::inline::inline_styles;
use clipmark::theme::{ThemeResolver, ThemeRules};

/// A list-heavy document tree: `sections` top-level divs, each holding a
/// heading, a paragraph, and a list of `items`.
fn document_tree(sections: usize, items: usize) -> Element {
    let mut root = Element::new("div");
    for s in 0..sections {
        let mut section = Element::new("div");
        let mut h2 = Element::new("h2");
        h2.push(Node::Text(format!("Section {s}")));
        section.push(Node::Element(h2));
        let mut p = Element::new("p");
        p.push(Node::Text("Intro paragraph with some text content.".into()));
        section.push(Node::Element(p));
        let mut ul = Element::new("ul");
        for i in 0..items {
            let mut li = Element::new("li");
            li.push(Node::Text(format!("item {i}")));
            ul.push(Node::Element(li));
        }
        section.push(Node::Element(ul));
        root.push(Node::Element(section));
    }
    root
}

fn bench_inline_styles(c: &mut Criterion) {
    let resolver = ThemeResolver::new(ThemeRules::standard());
    let tree = document_tree(20, 30);

    c.bench_function("inline_styles_document", |b| {
        b.iter_batched(
            || tree.clone(),
            |mut tree| inline_styles(black_box(&mut tree), &resolver),
            BatchSize::SmallInput,
        )
    });
}

fn bench_serialize(c: &mut Criterion) {
    let resolver = ThemeResolver::new(ThemeRules::standard());
    let mut tree = document_tree(20, 30);
    inline_styles(&mut tree, &resolver);

    c.bench_function("serialize_inlined_document", |b| {
        b.iter(|| black_box(&tree).inner_html())
    });
}

criterion_group!(benches, bench_inline_styles, bench_serialize);
criterion_main!(benches);

//! Emission benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use sprout_codegen::emit;
use sprout_core::{ComponentKind, ComponentNode, ComponentTree};

fn login_screen() -> ComponentTree {
    sprout_validator::validate(&json!({
        "components": [{
            "kind": "Container",
            "properties": { "style": "container" },
            "children": [
                { "kind": "Image", "properties": { "style": "image", "source": { "uri": "logo.png" } } },
                { "kind": "Text", "properties": { "style": "text" } },
                { "kind": "TextInput", "properties": { "style": "input", "placeholder": "Email" } },
                { "kind": "TextInput", "properties": { "style": "input", "placeholder": "Password", "secureTextEntry": true } },
                { "kind": "Button", "properties": { "style": "button", "title": "Sign in" } }
            ]
        }]
    }))
    .expect("benchmark tree is valid")
}

fn deep_list(depth: usize, width: usize) -> ComponentTree {
    let mut node = ComponentNode::new(ComponentKind::Text).with_property("style", "text");
    for _ in 0..depth {
        let mut parent = ComponentNode::new(ComponentKind::Container).with_property("style", "container");
        for _ in 0..width {
            parent = parent.with_child(node.clone());
        }
        node = parent;
    }
    ComponentTree::new(vec![node])
}

fn emit_login(c: &mut Criterion) {
    let tree = login_screen();
    c.bench_function("emit_login", |b| b.iter(|| emit(black_box(&tree))));
}

fn emit_nested(c: &mut Criterion) {
    let tree = deep_list(6, 3);
    c.bench_function("emit_nested", |b| b.iter(|| emit(black_box(&tree))));
}

criterion_group!(benches, emit_login, emit_nested);
criterion_main!(benches);

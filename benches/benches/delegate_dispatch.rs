// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_delegate::{Delegate, Handler, Options};
use canopy_dom::{Dom, ElementData, NodeId};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

// A straight chain of `depth` sections under the root, ending in a button.
fn chain_dom(depth: usize) -> (Dom, NodeId) {
    let mut dom = Dom::new();
    let mut parent = dom.root();
    for _ in 0..depth {
        parent = dom.insert(Some(parent), ElementData::new("section"));
    }
    let leaf = dom.insert(Some(parent), ElementData::new("button").with_class("leaf"));
    (dom, leaf)
}

fn bench_dispatch_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch_depth");
    for depth in [4_usize, 16, 64] {
        let (mut dom, leaf) = chain_dom(depth);
        let mut delegate: Delegate<Dom> = Delegate::new();
        let handler = Handler::new(|target, _| {
            black_box(target);
        });
        delegate.on(&mut dom, "click", "button.leaf", &handler, Options::default());

        group.throughput(Throughput::Elements(1));
        group.bench_function(format!("depth_{depth}"), |b| {
            b.iter(|| delegate.emit(&mut dom, "click", Some(black_box(leaf)), None));
        });
    }
    group.finish();
}

fn bench_dispatch_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch_fanout");
    for entries in [1_usize, 16, 128] {
        let (mut dom, leaf) = chain_dom(8);
        let mut delegate: Delegate<Dom> = Delegate::new();
        for _ in 0..entries {
            let handler = Handler::new(|target, _| {
                black_box(target);
            });
            delegate.on(&mut dom, "click", "button.leaf", &handler, Options::default());
        }

        group.throughput(Throughput::Elements(entries as u64));
        group.bench_function(format!("entries_{entries}"), |b| {
            b.iter(|| delegate.emit(&mut dom, "click", Some(black_box(leaf)), None));
        });
    }
    group.finish();
}

fn bench_register_remove_churn(c: &mut Criterion) {
    let (mut dom, _leaf) = chain_dom(8);
    c.bench_function("register_remove_churn", |b| {
        b.iter_batched(
            || Handler::new(|target, _| {
                black_box(target);
            }),
            |handler| {
                let mut delegate: Delegate<Dom> = Delegate::new();
                delegate.on(&mut dom, "click", "button.leaf", &handler, Options::default());
                delegate.off(&mut dom, "click", "button.leaf", &handler, Options::default());
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_dispatch_depth,
    bench_dispatch_fanout,
    bench_register_remove_churn
);
criterion_main!(benches);

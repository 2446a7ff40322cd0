criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        exploring_the_toy_instance,
        generating_the_toy_instance,
        assigning_and_unassigning_an_item,
        looking_up_the_guarantee_cache,
        computing_max_feasible_multiset,
}

fn exploring_the_toy_instance(c: &mut criterion::Criterion) {
    let params = GameParams::toy();
    let thresholds = Thresholds::default();
    let ctx = SearchContext::new(params, &thresholds).unwrap();
    c.bench_function("explore the toy instance from empty", |b| {
        b.iter(|| {
            let mut conf = BinConf::empty(params);
            minimax::explore(&ctx, &mut conf, 0, &thresholds, None)
        })
    });
}

fn generating_the_toy_instance(c: &mut criterion::Criterion) {
    let params = GameParams::toy();
    let thresholds = Thresholds::default();
    let ctx = SearchContext::new(params, &thresholds).unwrap();
    c.bench_function("generate the toy instance from empty", |b| {
        b.iter(|| {
            let mut conf = BinConf::empty(params);
            let mut dag = Dag::new();
            minimax::generate(&ctx, &mut dag, &mut conf, 0, &thresholds)
        })
    });
}

fn assigning_and_unassigning_an_item(c: &mut criterion::Criterion) {
    let params = GameParams::five_nine();
    let zobrist = ZobristTable::new(params, 7);
    c.bench_function("assign then unassign an item", |b| {
        b.iter(|| {
            let mut conf = BinConf::empty(params);
            let prev_last = conf.last_item();
            let from = conf.assign_and_rehash(5, 0, &zobrist);
            conf.unassign_and_rehash(5, from, prev_last, &zobrist);
        })
    });
}

fn looking_up_the_guarantee_cache(c: &mut criterion::Criterion) {
    let cache = GuaranteeCache::new(16, 4).unwrap();
    cache.insert(0xABCD_0000_0000_0010, true);
    c.bench_function("guarantee cache lookup (hit)", |b| {
        b.iter(|| cache.lookup(0xABCD_0000_0000_0010))
    });
}

fn computing_max_feasible_multiset(c: &mut criterion::Criterion) {
    let params = GameParams::five_nine();
    let items = ItemMultiset::from_conf(&BinConf::empty(params)).with_extra(5, 4);
    c.bench_function("max feasible multiset (five-nine scale)", |b| {
        b.iter(|| max_feasible_multiset(&items))
    });
}

use binstretch::binconf::{BinConf, ZobristTable};
use binstretch::cache::GuaranteeCache;
use binstretch::dag::Dag;
use binstretch::dp::{max_feasible_multiset, ItemMultiset};
use binstretch::minimax::{self, SearchContext};
use binstretch::params::{GameParams, Thresholds};

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use votesim::metrics::NoopMetrics;
use votesim::voters::synthetic::random_request;
use votesim::{
    BaseConfig, Category, Election, FixedSource, MetricsSinkVariant, PartyCatalog,
    PartyCatalogVariant, SeededCatalog, VoteDecisionEngine, VoteRequest,
};

const N: usize = 10_000;
const CATEGORIES: [Category; 3] = [Category::National, Category::Provincial, Category::Local];

// deterministic ballots, one per distinct voter
fn gen_requests(n: usize) -> Vec<VoteRequest> {
    let mut rng = StdRng::seed_from_u64(42);
    let codes: Vec<String> = SeededCatalog::new()
        .parties()
        .iter()
        .map(|p| p.code.clone())
        .collect();
    (0..n)
        .map(|i| random_request(&mut rng, format!("voter-{i}"), &CATEGORIES, &codes, 4))
        .collect()
}

fn open_election() -> Arc<Election> {
    let election = Election::new(
        BaseConfig::default(),
        PartyCatalogVariant::seeded(),
        MetricsSinkVariant::Noop(NoopMetrics),
    );
    let _ = election.start_round(2024, &CATEGORIES, N as u32);
    Arc::new(election)
}

fn bench_decide(c: &mut Criterion) {
    let requests = gen_requests(1_000);
    let catalog = SeededCatalog::new();

    c.bench_function("decide_1k", |b| {
        b.iter(|| {
            let mut rng = FixedSource::new(0.05, 2000);
            for request in &requests {
                black_box(VoteDecisionEngine::decide(
                    request,
                    catalog.forecasts(),
                    &mut rng,
                ));
            }
        })
    });
}

fn bench_submit(c: &mut Criterion) {
    let requests = Arc::new(gen_requests(N));

    let mut group = c.benchmark_group("submit_votes");
    group.sample_size(10);
    group.warm_up_time(Duration::from_secs(2));
    group.measurement_time(Duration::from_secs(8));

    for threads in [1usize, 4, 16] {
        group.bench_function(BenchmarkId::new("threads", threads), |b| {
            b.iter_batched(
                open_election,
                |election| {
                    let chunk = N.div_ceil(threads);
                    thread::scope(|scope| {
                        for part in requests.chunks(chunk) {
                            let election = Arc::clone(&election);
                            scope.spawn(move || {
                                let mut rng = FixedSource::new(0.05, 2000);
                                for request in part {
                                    let _ = black_box(election.submit(request, &mut rng));
                                }
                            });
                        }
                    });
                    black_box(election.vote_count());
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decide, bench_submit);
criterion_main!(benches);

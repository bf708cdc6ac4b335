//! Criterion benchmarks for u-evolve.
//!
//! Uses a random Euclidean travelling-salesman instance to measure engine
//! and operator overhead.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use std::sync::Arc;
use u_evolve::ea::{
    operators, CycleCrossover, Engine, EngineConfig, InversionMutation, OrderedCrossover,
    PlusSelection, Problem, StandardReproduction, SwapMutation, TournamentSelection,
};

// ===========================================================================
// Random Euclidean TSP: maximize the negated tour length
// ===========================================================================

#[derive(Clone)]
struct Tsp {
    distances: Arc<Vec<Vec<f64>>>,
}

impl Tsp {
    fn random(cities: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let points: Vec<(f64, f64)> = (0..cities)
            .map(|_| (rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
            .collect();
        let distances = points
            .iter()
            .map(|&(x1, y1)| {
                points
                    .iter()
                    .map(|&(x2, y2)| ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt())
                    .collect()
            })
            .collect();
        Self {
            distances: Arc::new(distances),
        }
    }
}

impl Problem for Tsp {
    type Genotype = Vec<usize>;

    fn initialize(&self, rng: &mut dyn RngCore) -> Vec<usize> {
        let mut tour: Vec<usize> = (0..self.distances.len()).collect();
        tour.shuffle(rng);
        tour
    }

    fn fitness(&self, tour: &Vec<usize>) -> f64 {
        let n = tour.len();
        let length: f64 = (0..n)
            .map(|i| self.distances[tour[i]][tour[(i + 1) % n]])
            .sum();
        -length
    }

    fn name(&self) -> &str {
        "EuclideanTsp"
    }
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_engine_tsp(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_tsp");
    group.sample_size(10);

    for (cities, pop, gen) in [(20usize, 50usize, 50usize), (50, 100, 30), (100, 100, 20)] {
        let problem = Tsp::random(cities, 42);
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_p{}_g{}", cities, pop, gen), cities),
            &problem,
            |b, p| {
                b.iter(|| {
                    let mut engine = Engine::new(
                        p.clone(),
                        EngineConfig::default()
                            .with_population_size(pop)
                            .with_seed(42),
                        TournamentSelection::new(3).unwrap(),
                        StandardReproduction::new(
                            OrderedCrossover::new(0.9),
                            InversionMutation::new(0.2),
                        ),
                        PlusSelection::new(pop).unwrap(),
                    )
                    .unwrap();
                    black_box(engine.run(black_box(gen)).unwrap())
                })
            },
        );
    }
    group.finish();
}

fn bench_engine_cycle_crossover(c: &mut Criterion) {
    let problem = Tsp::random(50, 7);
    c.bench_function("engine_tsp_cx_n50_p100_g30", |b| {
        b.iter(|| {
            let mut engine = Engine::new(
                problem.clone(),
                EngineConfig::default().with_population_size(100).with_seed(7),
                TournamentSelection::new(3).unwrap(),
                StandardReproduction::new(CycleCrossover::new(0.9), SwapMutation::new(0.2)),
                PlusSelection::new(100).unwrap(),
            )
            .unwrap();
            black_box(engine.run(30).unwrap())
        })
    });
}

fn bench_permutation_operators(c: &mut Criterion) {
    let mut group = c.benchmark_group("permutation_operators");

    for n in [50usize, 200, 1000] {
        let mut rng = StdRng::seed_from_u64(42);
        let p1: Vec<usize> = (0..n).collect();
        let mut p2 = p1.clone();
        p2.shuffle(&mut rng);

        group.bench_with_input(BenchmarkId::new("ox1", n), &(p1.clone(), p2.clone()), |b, (a, z)| {
            b.iter(|| operators::order_crossover(black_box(a), black_box(z), &mut rng).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("cx", n), &(p1, p2), |b, (a, z)| {
            b.iter(|| operators::cycle_crossover(black_box(a), black_box(z)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_engine_tsp,
    bench_engine_cycle_crossover,
    bench_permutation_operators
);
criterion_main!(benches);

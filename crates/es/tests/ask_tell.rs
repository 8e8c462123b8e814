use es::{Es, EsError};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|v| (v - 3.0).powi(2)).sum()
}

#[test]
fn ask_returns_population_of_configured_shape() {
    let es = Es::new(5, 0.5, 7).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let pop = es.ask(&mut rng);
    assert_eq!(pop.len(), 7);
    assert!(pop.iter().all(|x| x.len() == 5));
}

#[test]
fn same_seed_same_population() {
    let es = Es::new(4, 1.0, 6).unwrap();
    let a = es.ask(&mut StdRng::seed_from_u64(42));
    let b = es.ask(&mut StdRng::seed_from_u64(42));
    assert_eq!(a, b);
    let c = es.ask(&mut StdRng::seed_from_u64(43));
    assert_ne!(a, c);
}

#[test]
fn lazy_samples_match_ask() {
    let es = Es::new(3, 2.0, 4).unwrap();
    let eager = es.ask(&mut StdRng::seed_from_u64(9));
    let mut rng = StdRng::seed_from_u64(9);
    let lazy: Vec<Vec<f64>> = es.samples(&mut rng).take(2).collect();
    assert_eq!(&eager[..2], &lazy[..]);
}

#[test]
fn tell_picks_up_the_best_candidate_and_keeps_sigma() {
    let mut es = Es::new(2, 1.0, 2).unwrap();
    let pop = vec![vec![1.0, 1.0], vec![-4.0, 2.0]];
    es.tell(&pop, &[5.0, -1.0]).unwrap();
    // mu = 1, so the mean jumps to the single best candidate
    assert_eq!(es.mean(), &[-4.0, 2.0]);
    assert_eq!(es.sigma(), 1.0);
    assert_eq!(es.generation(), 1);
}

#[test]
fn nan_fitness_never_ranks_best() {
    let inf = std::hint::black_box(f64::INFINITY);
    let runtime_nan = inf - inf;
    for nan in [runtime_nan, -f64::NAN, f64::NAN] {
        let mut es = Es::new(1, 1.0, 2).unwrap();
        es.tell(&[vec![1.0], vec![-4.0]], &[nan, 3.0]).unwrap();
        assert_eq!(es.mean(), &[-4.0], "nan sign negative: {}", nan.is_sign_negative());
    }

    let mut es = Es::new(1, 1.0, 3).unwrap();
    es.tell(&[vec![7.0], vec![2.0], vec![5.0]], &[-f64::NAN, f64::NEG_INFINITY, f64::NAN])
        .unwrap();
    assert_eq!(es.mean(), &[2.0]);
}

#[test]
fn tell_rejects_mismatched_input() {
    let mut es = Es::new(2, 1.0, 3).unwrap();
    let short = vec![vec![0.0, 0.0]; 2];
    assert!(matches!(
        es.tell(&short, &[0.0, 0.0]),
        Err(EsError::InvalidDimension { context: "population", expected: 3, found: 2 })
    ));

    let pop = vec![vec![0.0, 0.0], vec![0.0, 0.0], vec![0.0]];
    assert!(matches!(
        es.tell(&pop, &[0.0, 0.0, 0.0]),
        Err(EsError::InvalidDimension { context: "candidate", expected: 2, found: 1 })
    ));

    let pop = vec![vec![0.0, 0.0]; 3];
    assert!(matches!(
        es.tell(&pop, &[0.0]),
        Err(EsError::InvalidDimension { context: "fitness", .. })
    ));
    assert_eq!(es.generation(), 0);
}

#[test]
fn repeated_generations_approach_optimum() {
    let mut es = Es::new(3, 1.0, 12).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let start = sphere(es.mean());
    for _ in 0..60 {
        let pop = es.ask(&mut rng);
        let fit: Vec<f64> = pop.iter().map(|x| sphere(x)).collect();
        es.tell(&pop, &fit).unwrap();
        es.scale_sigma(0.95);
    }
    assert!(sphere(es.mean()) < start * 0.1, "mean should move towards (3,3,3)");
}

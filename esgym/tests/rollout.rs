use esgym::app::{run, RunOptions};
use esgym::policy::PolicyKind;
use rl::{EnvConfig, EpisodeLog, Mode};

#[test]
fn rollout_cycles_problems_and_writes_log() {
    let config = EnvConfig::load("tests/data/tiny.json").unwrap();
    let path = std::env::temp_dir().join(format!("esgym-episode-log-{}.json", std::process::id()));
    let options = RunOptions {
        episodes: 3,
        policy: PolicyKind::OneFifth,
        episode_log: Some(path.clone()),
        ..RunOptions::default()
    };
    let summaries = run(config, &options).unwrap();
    assert_eq!(summaries.len(), 3);
    let problems: Vec<usize> = summaries.iter().map(|s| s.problem_index).collect();
    assert_eq!(problems, vec![12, 1, 2]);
    for s in &summaries {
        assert_eq!(s.generations, 8);
        assert_eq!(s.countevals, 40);
        assert!(s.best_fitness.is_some());
    }

    let json = std::fs::read_to_string(&path).unwrap();
    let log: EpisodeLog = serde_json::from_str(&json).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(log.len(), 3);
    assert_eq!(log.records()[2].episode, 3);
    assert_eq!(log.records()[0].problem_index, 12);
}

#[test]
fn testing_mode_stays_on_one_problem() {
    let config = EnvConfig {
        dim: 2,
        fes_max: 20,
        population_size: 4,
        seed: Some(1),
        problem_index: 5,
        mode: Mode::Testing,
        ..EnvConfig::default()
    };
    let options = RunOptions {
        episodes: 2,
        policy: PolicyKind::Random,
        ..RunOptions::default()
    };
    let summaries = run(config, &options).unwrap();
    assert!(summaries.iter().all(|s| s.problem_index == 5 && s.generations == 7));
}

#[test]
fn invalid_config_is_reported() {
    let config = EnvConfig { dim: 0, ..EnvConfig::default() };
    let err = run(config, &RunOptions::default()).unwrap_err();
    assert!(format!("{err:#}").contains("dim must be positive"));
}

use wheelsieve::{Engine, EngineConfig};

fn engine() -> Engine {
    Engine::new(EngineConfig::default()).unwrap()
}

#[test]
fn pi_of_thirty_is_ten() {
    assert_eq!(engine().count(0, 30).unwrap(), 10);
}

#[test]
fn pi_of_one_hundred_is_twenty_five() {
    assert_eq!(engine().count(0, 100).unwrap(), 25);
}

#[test]
fn pi_of_one_thousand_is_one_hundred_sixty_eight() {
    assert_eq!(engine().count(0, 1_000).unwrap(), 168);
}

#[test]
fn pi_of_one_million_is_78498() {
    assert_eq!(engine().count(0, 1_000_000).unwrap(), 78498);
}

#[test]
fn window_one_hundred_to_two_hundred_has_21_primes() {
    assert_eq!(engine().count(100, 200).unwrap(), 21);
}

#[test]
fn window_near_a_billion_has_49_primes() {
    assert_eq!(engine().count(1_000_000_000, 1_000_001_000).unwrap(), 49);
}

#[test]
fn max_twenty_nine_uses_the_table_path() {
    assert_eq!(engine().count(0, 29).unwrap(), 10);
}

#[test]
fn min_two_includes_two() {
    assert_eq!(engine().count(2, 100).unwrap(), 25);
}

#[test]
fn single_prime_point_interval_counts_one() {
    assert_eq!(engine().count(97, 97).unwrap(), 1);
    assert_eq!(engine().count(1_000_003, 1_000_003).unwrap(), 1);
}

#[test]
fn single_composite_point_interval_counts_zero() {
    assert_eq!(engine().count(100, 100).unwrap(), 0);
}

#[test]
fn counts_are_consistent_across_segment_boundaries() {
    // Force a segment that is much smaller than a single pre-sieve
    // pattern length to exercise advance()'s inactive-list unloading.
    let mut config = EngineConfig::default();
    config.segment_bytes = 128;
    let e = Engine::new(config).unwrap();
    assert_eq!(e.count(0, 1_000_000).unwrap(), 78498);
}

#[test]
fn smaller_small_threshold_moves_more_primes_into_bucket_lists() {
    let mut config = EngineConfig::default();
    config.small_threshold_factor = 0.0;
    let e = Engine::new(config).unwrap();
    assert_eq!(e.count(0, 1_000_000).unwrap(), 78498);
}

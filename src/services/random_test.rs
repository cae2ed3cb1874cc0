use super::*;

#[test]
fn chance_compares_against_probability() {
    assert!(FixedRandom(0.29).chance(0.3));
    assert!(!FixedRandom(0.3).chance(0.3));
    assert!(!FixedRandom(0.0).chance(0.0));
    assert!(FixedRandom(0.999).chance(1.0));
}

#[test]
fn delay_in_spans_range() {
    let range = DelayRange::new(1000, 2000);
    assert_eq!(FixedRandom(0.0).delay_in(range), Duration::from_millis(1000));
    assert_eq!(FixedRandom(0.5).delay_in(range), Duration::from_millis(1500));
    assert_eq!(FixedRandom(0.9999).delay_in(range), Duration::from_millis(2000));
}

#[test]
fn delay_in_fixed_range() {
    assert_eq!(FixedRandom(0.7).delay_in(DelayRange::fixed(250)), Duration::from_millis(250));
}

#[test]
fn index_stays_in_bounds() {
    assert_eq!(FixedRandom(0.0).index(4), 0);
    assert_eq!(FixedRandom(0.5).index(4), 2);
    assert_eq!(FixedRandom(0.9999).index(4), 3);
}

#[test]
fn seeded_rng_is_reproducible() {
    let mut a = RngSource::new(Some(7));
    let mut b = RngSource::new(Some(7));
    for _ in 0..5 {
        assert!((a.unit() - b.unit()).abs() < f64::EPSILON);
    }
}

#[test]
fn rng_draws_are_unit_interval() {
    let mut rng = RngSource::new(None);
    for _ in 0..100 {
        let draw = rng.unit();
        assert!((0.0..1.0).contains(&draw));
    }
}

#[test]
fn seeded_delays_stay_in_range() {
    let mut rng = RngSource::new(Some(42));
    let range = DelayRange::new(2000, 5000);
    for _ in 0..50 {
        let delay = rng.delay_in(range);
        assert!(delay >= Duration::from_millis(2000) && delay <= Duration::from_millis(5000));
    }
}

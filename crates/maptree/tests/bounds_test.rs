use maptree::bounds::BoundCalculator;
use maptree::likelihood::TreeLikelihood;
use maptree::prior::TreePrior;

fn close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() < tol,
        "expected {expected}, got {actual}"
    );
}

fn calculator(num_features: usize) -> BoundCalculator {
    BoundCalculator::new(
        TreeLikelihood::new([1.0, 1.0]).unwrap(),
        TreePrior::bcart(0.95, 0.5).unwrap(),
        num_features,
    )
}

#[test]
fn unexpanded_root_bounds_reference_values() {
    // 40-sample dataset with 11 zero and 29 one labels over 4 features
    let bounds = calculator(4);
    close(bounds.lower_bound([11, 29], 0, None), 5.937397326, 1e-6);
    close(bounds.upper_bound([11, 29], 0, None), 28.270597242, 1e-6);
}

#[test]
fn lower_bound_never_exceeds_upper_bound() {
    let bounds = calculator(6);
    for lc in [[0, 1], [5, 0], [3, 5], [11, 29], [100, 100]] {
        for depth in [0, 1, 4, 9] {
            for nvs in [None, Some(1), Some(3), Some(6)] {
                let lower = bounds.lower_bound(lc, depth, nvs);
                let upper = bounds.upper_bound(lc, depth, nvs);
                assert!(
                    lower <= upper,
                    "lc={lc:?} depth={depth} nvs={nvs:?}: {lower} > {upper}"
                );
                assert!(lower > 0.0);
            }
        }
    }
}

#[test]
fn unknown_split_count_bounds_are_admissible() {
    // the unknown-count substitution must not overestimate any known case
    let bounds = calculator(6);
    for lc in [[3, 5], [11, 29]] {
        for depth in [0, 2, 5] {
            for nvs in 1..=6 {
                assert!(
                    bounds.lower_bound(lc, depth, None)
                        <= bounds.lower_bound(lc, depth, Some(nvs)) + 1e-12
                );
            }
        }
    }
}

#[test]
fn exhausted_leaf_cost_is_pure_likelihood() {
    // with no valid splits the stop probability is one, leaving only the
    // Beta-Binomial term
    let bounds = calculator(4);
    close(bounds.upper_bound([0, 10], 3, Some(0)), 11f64.ln(), 1e-12);
}

#[test]
fn split_penalty_reference_value() {
    let bounds = calculator(4);
    // -(ln 0.95 - 0.5 ln 1 - ln 4)
    close(bounds.split_penalty(0, 4), 1.4375877, 1e-6);
    // deeper splits cost more
    assert!(bounds.split_penalty(3, 4) > bounds.split_penalty(0, 4));
}

use super::{Constraints, INFINITY};

#[test]
fn tight_constraints_have_single_size() {
    let constraints = Constraints::tight(100, 200);
    assert!(constraints.is_tight());
    assert_eq!(constraints.constrain(37, 512), (100, 200));
}

#[test]
fn loose_constraints_clamp_to_max() {
    let constraints = Constraints::loose(100, 200);
    assert!(!constraints.is_tight());
    assert_eq!(constraints.constrain_width(150), 100);
    assert_eq!(constraints.constrain_height(150), 150);
}

#[test]
fn constrain_respects_minimums() {
    let constraints = Constraints {
        min_width: 50,
        max_width: 100,
        min_height: 10,
        max_height: 20,
    };
    assert_eq!(constraints.constrain(0, 0), (50, 10));
}

#[test]
fn unbounded_max_is_reported() {
    let constraints = Constraints::loose(INFINITY, 200);
    assert!(!constraints.has_bounded_width());
    assert!(constraints.has_bounded_height());
    assert!(!constraints.is_bounded());
}

#[test]
fn loosen_clears_minimums() {
    let constraints = Constraints::tight(100, 200).loosen();
    assert_eq!(constraints.constrain(0, 0), (0, 0));
    assert_eq!(constraints.constrain(300, 300), (100, 200));
}

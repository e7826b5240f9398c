use crate::avatars::allocator::flat_zip;

#[test]
fn test_interleaves_before_truncating() {
    let groups = vec![vec!["p1", "p2", "p3"], vec!["q1", "q2"]];
    assert_eq!(flat_zip(groups, 4), vec!["p1", "q1", "p2", "q2"]);
}

#[test]
fn test_large_group_continues_after_small_one_empties() {
    let groups = vec![vec!["p1"], vec!["q1", "q2", "q3"]];
    assert_eq!(flat_zip(groups, 10), vec!["p1", "q1", "q2", "q3"]);
}

#[test]
fn test_zero_limit_yields_nothing() {
    let groups = vec![vec![1, 2], vec![3]];
    assert!(flat_zip(groups, 0).is_empty());
}

#[test]
fn test_empty_groups_are_skipped() {
    let groups: Vec<Vec<u32>> = vec![vec![], vec![1, 2], vec![], vec![3]];
    assert_eq!(flat_zip(groups, 10), vec![1, 3, 2]);
}

#[test]
fn test_no_groups() {
    let groups: Vec<Vec<u32>> = Vec::new();
    assert!(flat_zip(groups, 5).is_empty());
}

#[test]
fn test_limit_beyond_total_returns_everything() {
    let groups = vec![vec![1], vec![2], vec![3]];
    assert_eq!(flat_zip(groups, 100), vec![1, 2, 3]);
}

#[test]
fn test_single_group_passes_through_in_order() {
    let groups = vec![vec![1, 2, 3, 4]];
    assert_eq!(flat_zip(groups, 3), vec![1, 2, 3]);
}

#[test]
fn test_deterministic_for_identical_input() {
    let make = || vec![vec![1, 2, 3], vec![4, 5], vec![6, 7, 8, 9]];
    assert_eq!(flat_zip(make(), 6), flat_zip(make(), 6));
}

#[test]
fn test_declaration_order_breaks_sweep_ties() {
    let groups = vec![vec!["a1"], vec!["b1"], vec!["c1"]];
    assert_eq!(flat_zip(groups, 3), vec!["a1", "b1", "c1"]);
}

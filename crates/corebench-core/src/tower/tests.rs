use super::*;

#[test]
fn test_canonical_run() {
    let bench = TowerBenchmark::canonical();
    let moves = bench.run().unwrap();
    assert_eq!(moves, EXPECTED_MOVES);
    assert!(bench.verify(&moves).unwrap());
    assert!(!bench.verify(&8190).unwrap());
}

#[test]
fn test_small_towers() {
    for (disks, moves) in [(1, 1), (2, 3), (3, 7), (4, 15)] {
        assert_eq!(TowerBenchmark::new(disks).run().unwrap(), moves);
        assert_eq!(expected_moves(disks), moves);
    }
}

#[test]
fn test_final_piles() {
    let towers = TowerBenchmark::canonical().solve().unwrap();

    let moved = towers.pile_sizes(1).unwrap();
    assert_eq!(moved, (0..CANONICAL_DISKS).collect::<Vec<_>>());
    assert!(towers.pile_sizes(2).unwrap().is_empty());
    // The base disk is built but never part of the moved stack
    assert_eq!(towers.pile_sizes(0).unwrap(), vec![CANONICAL_DISKS]);
}

#[test]
fn test_build_tower_is_sorted() {
    let mut towers = Towers::new(DEFAULT_MAX_DEPTH);
    towers.build_tower_at(2, 4).unwrap();
    assert_eq!(towers.pile_sizes(2).unwrap(), vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_push_onto_smaller_disk_fails() {
    let mut towers = Towers::new(DEFAULT_MAX_DEPTH);
    let small = towers.create_disk(1);
    let big = towers.create_disk(5);
    towers.push_disk(small, 0).unwrap();

    let err = towers.push_disk(big, 0).unwrap_err();
    assert!(matches!(err, BenchError::IllegalState(_)));
    assert_eq!(towers.pile_sizes(0).unwrap(), vec![1]);
}

#[test]
fn test_push_equal_size_fails() {
    let mut towers = Towers::new(DEFAULT_MAX_DEPTH);
    let a = towers.create_disk(3);
    let b = towers.create_disk(3);
    towers.push_disk(a, 1).unwrap();
    assert!(towers.push_disk(b, 1).is_err());
}

#[test]
fn test_pop_empty_pile_fails() {
    let mut towers = Towers::new(DEFAULT_MAX_DEPTH);
    let err = towers.pop_disk_from(0).unwrap_err();
    assert!(matches!(err, BenchError::IllegalState(_)));
}

#[test]
fn test_move_from_empty_pile_propagates() {
    let mut towers = Towers::new(DEFAULT_MAX_DEPTH);
    assert!(towers.move_disks(2, 0, 1).is_err());
    assert_eq!(towers.moves_done(), 0);
}

#[test]
fn test_unknown_pile_fails() {
    let mut towers = Towers::new(DEFAULT_MAX_DEPTH);
    let disk = towers.create_disk(0);
    assert!(towers.push_disk(disk, PILES).is_err());
    assert!(towers.pile_sizes(7).is_err());
}

#[test]
fn test_recursion_limit() {
    let bench = TowerBenchmark::canonical().with_max_depth(4);
    assert_eq!(bench.run(), Err(BenchError::RecursionLimit { limit: 4 }));
}

#[test]
fn test_oversized_tower_is_rejected() {
    for disks in [MAX_DISKS + 1, 63, 64, usize::MAX] {
        let bench = TowerBenchmark::new(disks);
        assert!(matches!(bench.run(), Err(BenchError::Configuration(_))), "{disks}");
        assert!(matches!(bench.verify(&0), Err(BenchError::Configuration(_))));
    }
}

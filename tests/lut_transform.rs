use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use zcorrect::{LutGrid, LutTable, ZCorrectError, ABOVE_RANGE, BELOW_RANGE};

fn shifted_table() -> LutTable {
    LutTable::new(vec![1.0, 2.0, 3.0, 4.0]).unwrap()
}

/// Strictly increasing table with irregular spacing.
fn random_table(seed: u64, len: usize) -> LutTable {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut values = Vec::with_capacity(len);
    let mut current = rng.random_range(-5.0..5.0);
    for _ in 0..len {
        values.push(current);
        current += rng.random_range(0.1..2.0);
    }
    LutTable::new(values).unwrap()
}

#[test]
fn apply_interpolates_between_entries() {
    let table = shifted_table();
    assert_eq!(table.max_index(), 3);
    assert_eq!(table.apply(1.5), 2.5);
    assert_eq!(table.apply(0.0), 1.0);
    assert_eq!(table.apply(3.0), 4.0);
}

#[test]
fn apply_inverse_recovers_fractional_position() {
    let table = shifted_table();
    assert_eq!(table.apply_inverse(2.5), 1.5);
    assert_eq!(table.apply_inverse(1.0), 0.0);
}

#[test]
fn checked_apply_saturates_outside_the_index_range() {
    let table = shifted_table();
    assert_eq!(table.apply_checked(-0.001), BELOW_RANGE);
    assert_eq!(table.apply_checked(3.001), ABOVE_RANGE);
    assert_eq!(table.apply_checked(0.0), 1.0);
    assert_eq!(table.apply_checked(3.0), 4.0);
}

#[test]
fn checked_inverse_saturates_outside_the_value_range() {
    let table = shifted_table();
    assert_eq!(table.apply_inverse_checked(0.999), BELOW_RANGE);
    assert_eq!(table.apply_inverse_checked(4.001), ABOVE_RANGE);
    assert_eq!(table.apply_inverse_checked(2.5), 1.5);
}

#[test]
fn find_floor_index_brackets_in_range_queries() {
    let table = random_table(11, 64);
    let values = table.values().to_vec();
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..200 {
        let query = rng.random_range(values[0]..values[values.len() - 1]);
        let i = table.find_floor_index(query);
        assert!(values[i] <= query, "values[{i}] > query {query}");
        assert!(query < values[i + 1], "query {query} >= values[{}]", i + 1);
    }
}

#[test]
fn find_floor_index_clamps_out_of_range_queries() {
    let table = shifted_table();
    assert_eq!(table.find_floor_index(-10.0), 0);
    assert_eq!(table.find_floor_index(100.0), table.max_index() - 1);
}

#[test]
fn forward_then_inverse_round_trips() {
    let table = random_table(23, 32);
    let mut t = 0.0;
    while t < table.max_index() as f64 {
        let round_trip = table.apply_inverse(table.apply(t));
        assert!(
            (round_trip - t).abs() < 1e-9,
            "round trip of {t} gave {round_trip}"
        );
        t += 0.25;
    }
}

#[test]
fn min_and_max_are_the_table_ends() {
    let table = random_table(5, 16);
    assert_eq!(table.min_value(), table.values()[0]);
    assert_eq!(table.max_value(), table.values()[15]);
}

#[test]
fn non_monotonic_table_is_rejected() {
    let err = LutTable::new(vec![0.0, 1.0, 0.5]).err().unwrap();
    assert_eq!(err, ZCorrectError::NonMonotonicTable { index: 2 });
}

#[test]
fn short_table_is_rejected() {
    let err = LutTable::new(vec![1.0]).err().unwrap();
    assert_eq!(err, ZCorrectError::TableTooShort { len: 1 });
}

#[test]
fn grid_blends_tables_between_cells() {
    // Two cells along one grid axis: identity and a doubled table.
    let grid = LutGrid::from_parts(
        vec![0.0, 1.0, 2.0, 3.0, 0.0, 2.0, 4.0, 6.0],
        &[2],
        4,
    )
    .unwrap();
    assert_eq!(grid.num_grid_dimensions(), 1);
    assert_eq!(grid.lut_max_index(), 3);

    assert_eq!(grid.apply(&[0.0], 1.0), 1.0);
    assert_eq!(grid.apply(&[1.0], 1.0), 2.0);
    // Midway between the cells the entries average.
    assert_eq!(grid.apply(&[0.5], 1.0), 1.5);
    assert_eq!(grid.apply(&[0.5], 0.5), 0.75);

    assert_eq!(grid.min_transformed_coordinate(&[0.5]), 0.0);
    assert_eq!(grid.max_transformed_coordinate(&[0.5]), 4.5);

    assert_eq!(grid.apply_inverse(&[0.5], 1.5), 1.0);
    assert_eq!(grid.find_floor_index(&[0.5], 1.6), 1);
}

#[test]
fn grid_coordinates_clamp_to_the_border() {
    let grid = LutGrid::from_parts(
        vec![0.0, 1.0, 2.0, 3.0, 0.0, 2.0, 4.0, 6.0],
        &[2],
        4,
    )
    .unwrap();
    assert_eq!(grid.apply(&[-3.0], 1.0), grid.apply(&[0.0], 1.0));
    assert_eq!(grid.apply(&[7.5], 1.0), grid.apply(&[1.0], 1.0));
}

#[test]
fn grid_checked_variants_saturate() {
    let grid = LutGrid::from_parts(
        vec![1.0, 2.0, 3.0, 4.0, 2.0, 4.0, 6.0, 8.0],
        &[2],
        4,
    )
    .unwrap();
    assert_eq!(grid.apply_checked(&[0.5], -0.001), BELOW_RANGE);
    assert_eq!(grid.apply_checked(&[0.5], 3.001), ABOVE_RANGE);
    assert_eq!(grid.apply_inverse_checked(&[0.0], 0.5), BELOW_RANGE);
    assert_eq!(grid.apply_inverse_checked(&[0.0], 4.5), ABOVE_RANGE);
    assert_eq!(grid.apply_inverse_checked(&[0.0], 2.5), 1.5);
}

#[test]
fn global_grid_has_no_grid_dimensions() {
    let grid = LutGrid::from_table(shifted_table());
    assert_eq!(grid.num_grid_dimensions(), 0);
    assert_eq!(grid.apply(&[], 1.5), 2.5);
    assert_eq!(grid.apply_inverse(&[], 2.5), 1.5);
}

#[test]
fn interpolated_snapshot_matches_direct_queries() {
    let grid = LutGrid::from_parts(
        vec![0.0, 1.0, 2.0, 3.0, 0.0, 2.0, 4.0, 6.0],
        &[2],
        4,
    )
    .unwrap();
    let snapshot = grid.interpolated(&[0.25]);
    let mut t = 0.0;
    while t <= 3.0 {
        assert_eq!(snapshot.apply(t), grid.apply(&[0.25], t));
        t += 0.5;
    }
}

#[test]
fn two_dimensional_grid_blends_all_four_neighbors() {
    // 2x2 grid; each cell's table is [v, v + 1] with v = 10*i + j.
    let mut data = Vec::new();
    for i in 0..2 {
        for j in 0..2 {
            let v = (10 * i + j) as f64;
            data.push(v);
            data.push(v + 1.0);
        }
    }
    let grid = LutGrid::from_parts(data, &[2, 2], 2).unwrap();
    // Center of the four cells: mean of {0, 1, 10, 11}.
    assert_eq!(grid.apply(&[0.5, 0.5], 0.0), 5.5);
    // Along axis 1 only.
    assert_eq!(grid.apply(&[0.0, 0.5], 0.0), 0.5);
    // Along axis 0 only.
    assert_eq!(grid.apply(&[0.5, 0.0], 0.0), 5.0);
}

#[test]
fn grid_rejects_bad_shapes() {
    let err = LutGrid::from_parts(vec![0.0; 7], &[2], 4).err().unwrap();
    assert_eq!(
        err,
        ZCorrectError::InvalidGrid {
            reason: "buffer length does not match grid shape"
        }
    );

    let err = LutGrid::from_parts(vec![0.0, 1.0, 1.0, 0.5], &[2], 2)
        .err()
        .unwrap();
    assert_eq!(err, ZCorrectError::NonMonotonicTable { index: 3 });

    let err = LutGrid::from_parts(Vec::new(), &[0], 2).err().unwrap();
    assert_eq!(
        err,
        ZCorrectError::InvalidGrid {
            reason: "zero-sized grid axis"
        }
    );
}

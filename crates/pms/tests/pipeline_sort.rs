//! Pipeline merge sort against the standard library sort.

use anyhow::Result;
use pms::pipeline_merge_sort;
use proptest::prelude::*;

fn reference_sort(values: &[u8]) -> Vec<u8> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    sorted
}

/// Byte vectors of length 2^k for k in 0..=9.
fn power_of_two_input() -> impl Strategy<Value = Vec<u8>> {
    (0u32..=9).prop_flat_map(|k| prop::collection::vec(any::<u8>(), 1usize << k))
}

#[test]
fn sorts_every_size_the_runner_asks_for() -> Result<()> {
    for e in 1..=10u32 {
        let len = 1usize << e;
        let values: Vec<u8> = (0..len).map(|i| (i * 37 % 251) as u8).rev().collect();
        assert_eq!(pipeline_merge_sort(&values)?, reference_sort(&values), "size {len}");
    }
    Ok(())
}

#[test]
fn already_sorted_and_reversed_inputs() -> Result<()> {
    let ascending: Vec<u8> = (0..=255).collect();
    let descending: Vec<u8> = ascending.iter().rev().copied().collect();
    assert_eq!(pipeline_merge_sort(&ascending)?, ascending);
    assert_eq!(pipeline_merge_sort(&descending)?, ascending);
    Ok(())
}

#[test]
fn all_equal_values() -> Result<()> {
    let values = vec![9u8; 64];
    assert_eq!(pipeline_merge_sort(&values)?, values);
    Ok(())
}

proptest! {
    #[test]
    fn matches_reference_sort(values in power_of_two_input()) {
        let sorted = pipeline_merge_sort(&values).unwrap();
        prop_assert_eq!(sorted, reference_sort(&values));
    }
}

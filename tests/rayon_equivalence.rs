#![cfg(feature = "rayon")]

use zcorrect::{ncc, similarity_matrix, SectionStack};

fn make_stack(width: usize, height: usize, sections: usize) -> SectionStack {
    let mut data = Vec::with_capacity(width * height * sections);
    for z in 0..sections {
        for y in 0..height {
            for x in 0..width {
                let value = ((x * 11) ^ (y * 3) ^ (x * y) ^ (z * 29)) & 0xFF;
                data.push(value as f32 / 256.0);
            }
        }
    }
    SectionStack::from_vec(data, width, height).unwrap()
}

#[test]
fn parallel_sweep_matches_direct_evaluation() {
    let stack = make_stack(24, 20, 12);
    let range = 4;
    let matrix = similarity_matrix(&stack, range);

    for i in 0..stack.num_sections() {
        for k in 0..stack.num_sections() {
            let value = matrix.get(i, k);
            if i == k {
                assert_eq!(value, 1.0);
            } else if i.abs_diff(k) <= range {
                let (lo, hi) = (i.min(k), i.max(k));
                let expected = ncc(stack.section(lo).unwrap(), stack.section(hi).unwrap());
                assert_eq!(value.to_bits(), expected.to_bits());
            } else {
                assert!(value.is_nan());
            }
        }
    }
}

#[test]
fn parallel_sweep_is_deterministic() {
    let stack = make_stack(16, 16, 10);
    let first = similarity_matrix(&stack, 3);
    let second = similarity_matrix(&stack, 3);
    for (a, b) in first.as_slice().iter().zip(second.as_slice()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

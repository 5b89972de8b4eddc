//! Stable LSD radix sort of keys with satellite values.
//!
//! Keys are biased by their minimum so the pass count depends only on the key
//! range, four bits per pass. Each pass scatters from the live buffer into the
//! other one; a parity flag tracks which buffer holds the data.

use num_traits::{PrimInt, Unsigned};

const DIGIT_BITS: usize = 4;
const BUCKETS: usize = 1 << DIGIT_BITS;

/// Sorts `keys` ascending, permuting `values` alongside; equal keys keep their
/// relative order.
///
/// `keys_aux` and `values_aux` are scratch space of at least `keys.len()`
/// entries. On return `keys` and `values` hold the sorted data; the scratch
/// contents are unspecified.
///
/// # Panics
/// Panics if `values.len() != keys.len()` or a scratch buffer is too short.
pub fn radix_sort_keys_and_values<K, V>(
    keys: &mut [K],
    keys_aux: &mut [K],
    values: &mut [V],
    values_aux: &mut [V],
) where
    K: PrimInt + Unsigned,
    V: Copy,
{
    let n = keys.len();
    assert_eq!(values.len(), n, "one value per key expected");
    assert!(
        keys_aux.len() >= n && values_aux.len() >= n,
        "scratch buffers must hold {n} entries"
    );
    if n < 2 {
        return;
    }
    let keys_aux = &mut keys_aux[..n];
    let values_aux = &mut values_aux[..n];

    let (min, max) = keys
        .iter()
        .fold((K::max_value(), K::min_value()), |(lo, hi), &k| (lo.min(k), hi.max(k)));
    for k in keys.iter_mut() {
        *k = *k - min;
    }

    let key_bits = K::zero().count_zeros() as usize;
    let sort_bits = key_bits - (max - min).leading_zeros() as usize;
    let passes = sort_bits.div_ceil(DIGIT_BITS);
    let mask = (K::one() << DIGIT_BITS) - K::one();

    let mut in_aux = false;
    for pass in 0..passes {
        let shift = pass * DIGIT_BITS;
        if in_aux {
            scatter(keys_aux, values_aux, keys, values, shift, mask);
        } else {
            scatter(keys, values, keys_aux, values_aux, shift, mask);
        }
        in_aux = !in_aux;
    }

    if in_aux {
        keys.copy_from_slice(keys_aux);
        values.copy_from_slice(values_aux);
    }
    for k in keys.iter_mut() {
        *k = *k + min;
    }
}

fn scatter<K, V>(src_keys: &[K], src_values: &[V], dst_keys: &mut [K], dst_values: &mut [V], shift: usize, mask: K)
where
    K: PrimInt,
    V: Copy,
{
    let mut count = [0usize; BUCKETS];
    for &k in src_keys {
        count[digit(k, shift, mask)] += 1;
    }

    let mut next = [0usize; BUCKETS];
    for b in 1..BUCKETS {
        next[b] = next[b - 1] + count[b - 1];
    }

    for (&k, &v) in src_keys.iter().zip(src_values) {
        let b = digit(k, shift, mask);
        dst_keys[next[b]] = k;
        dst_values[next[b]] = v;
        next[b] += 1;
    }
}

#[inline]
fn digit<K: PrimInt>(key: K, shift: usize, mask: K) -> usize {
    // `mask` keeps four bits, which always fit in `usize`.
    ((key >> shift) & mask).to_usize().unwrap_or(0)
}

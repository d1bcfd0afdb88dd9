//! PKCS#7 block padding.
//!
//! Every padded buffer ends in `k` bytes of value `k`, `1 <= k <= block_size`.
//! A buffer whose length is already a multiple of the block size still gets a
//! full block of padding, so unpadding is never ambiguous.

use thiserror::Error;

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Errors produced when stripping padding from decrypted data.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PaddingError {
    /// There are no bytes to read a padding length from.
    #[error("padded data is empty")]
    Empty,

    /// The trailing length byte is zero, larger than the block size, or
    /// larger than the data itself.
    #[error("invalid padding length {0}")]
    InvalidLength(u8),

    /// The padding bytes do not all repeat the padding length.
    #[error("inconsistent padding bytes")]
    Inconsistent,
}

/// Append PKCS#7 padding for `block_size` (1..=255) to `data`.
pub fn pad(mut data: Vec<u8>, block_size: usize) -> Vec<u8> {
    debug_assert!((1..=255).contains(&block_size));
    let k = block_size - data.len() % block_size;
    data.resize(data.len() + k, k as u8);
    data
}

/// Strip PKCS#7 padding for `block_size` from `data`.
///
/// # Errors
///
/// Returns [`PaddingError`] if `data` is empty, the trailing length byte is `0`
/// or exceeds `block_size` or `data.len()`, or the padding bytes disagree.
pub fn unpad(data: &[u8], block_size: usize) -> Result<&[u8], PaddingError> {
    let Some(&last) = data.last() else {
        return Err(PaddingError::Empty);
    };
    let k = usize::from(last);
    if k == 0 || k > block_size || k > data.len() {
        return Err(PaddingError::InvalidLength(last));
    }
    let (body, padding) = data.split_at(data.len() - k);
    if padding.iter().any(|&b| b != last) {
        return Err(PaddingError::Inconsistent);
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_partial_block() {
        let padded = pad(b"hello".to_vec(), BLOCK_SIZE);
        assert_eq!(padded.len(), BLOCK_SIZE);
        assert!(padded[5..].iter().all(|&b| b == 11));
    }

    #[test]
    fn aligned_input_gets_full_block() {
        let padded = pad(vec![0xAB; BLOCK_SIZE], BLOCK_SIZE);
        assert_eq!(padded.len(), 2 * BLOCK_SIZE);
        assert!(padded[BLOCK_SIZE..].iter().all(|&b| b == 16));
    }

    #[test]
    fn empty_input_gets_full_block() {
        let padded = pad(Vec::new(), BLOCK_SIZE);
        assert_eq!(padded, vec![16u8; BLOCK_SIZE]);
        assert_eq!(unpad(&padded, BLOCK_SIZE).unwrap(), b"");
    }

    #[test]
    fn unpad_reverses_pad() {
        for len in 0..40 {
            let data: Vec<u8> = (0..len as u8).collect();
            let padded = pad(data.clone(), BLOCK_SIZE);
            assert_eq!(padded.len() % BLOCK_SIZE, 0);
            assert_eq!(unpad(&padded, BLOCK_SIZE).unwrap(), &data[..]);
        }
    }

    #[test]
    fn unpad_rejects_empty() {
        assert_eq!(unpad(&[], BLOCK_SIZE), Err(PaddingError::Empty));
    }

    #[test]
    fn unpad_rejects_zero_length_byte() {
        let mut data = vec![1u8; BLOCK_SIZE];
        data[BLOCK_SIZE - 1] = 0;
        assert_eq!(unpad(&data, BLOCK_SIZE), Err(PaddingError::InvalidLength(0)));
    }

    #[test]
    fn unpad_rejects_length_beyond_block() {
        let data = vec![17u8; 32];
        assert_eq!(unpad(&data, BLOCK_SIZE), Err(PaddingError::InvalidLength(17)));
    }

    #[test]
    fn unpad_rejects_length_beyond_data() {
        assert_eq!(unpad(&[1, 2, 9], BLOCK_SIZE), Err(PaddingError::InvalidLength(9)));
    }

    #[test]
    fn unpad_rejects_inconsistent_bytes() {
        let mut data = pad(b"abc".to_vec(), BLOCK_SIZE);
        data[BLOCK_SIZE - 2] ^= 0x01;
        assert_eq!(unpad(&data, BLOCK_SIZE), Err(PaddingError::Inconsistent));
    }
}

//! Bit-packed symbolic words.
//!
//! A word stores `word_length` symbols of `bits_per_symbol(alphabet_size)`
//! bits each, first symbol in the highest occupied bits. Masking a word keeps
//! its low bits, which lets one quantizer fit serve several shorter target
//! word lengths.

/// A quantized window: symbols packed into the low bits of an integer.
pub type SymbolicWord = u64;

/// Number of bits needed to store one of `alphabet_size` symbols (`ceil(log2(n))`).
pub fn bits_per_symbol(alphabet_size: usize) -> u32 {
    if alphabet_size <= 1 {
        0
    } else {
        usize::BITS - (alphabet_size - 1).leading_zeros()
    }
}

/// Mask keeping the low `bits_per_symbol(alphabet_size) * word_length` bits.
pub fn word_mask(alphabet_size: usize, word_length: usize) -> u64 {
    let bits = bits_per_symbol(alphabet_size) as usize * word_length;
    if bits >= u64::BITS as usize {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Truncate a word to the symbols selected by `mask`.
#[inline]
pub fn mask_word(word: SymbolicWord, mask: u64) -> SymbolicWord {
    word & mask
}

/// Pack symbols into a word, first symbol in the highest bits.
///
/// Symbols at or above `alphabet_size` are clamped to the largest symbol.
pub fn pack_symbols(symbols: &[usize], alphabet_size: usize) -> SymbolicWord {
    let bits = bits_per_symbol(alphabet_size);
    let max_symbol = alphabet_size.saturating_sub(1) as u64;
    symbols.iter().fold(0u64, |word, &s| {
        let s = (s as u64).min(max_symbol);
        word.checked_shl(bits).unwrap_or(0) | s
    })
}

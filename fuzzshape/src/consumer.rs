//! Decoding primitive values off the front of a fuzzer-supplied buffer.

/// Number of bytes a pointer-sized integer is decoded from.
pub const NATIVE_BYTES: usize = core::mem::size_of::<usize>();

/// Integer width, in the sense of how many input bytes a value takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Width {
    /// 1 byte
    W8,
    /// 2 bytes
    W16,
    /// 4 bytes
    W32,
    /// 8 bytes
    W64,
    /// Pointer-sized (`isize`, `usize`)
    Native,
}

impl Width {
    /// Number of bytes a value of this width is decoded from.
    pub const fn bytes(self) -> usize {
        match self {
            Width::W8 => 1,
            Width::W16 => 2,
            Width::W32 => 4,
            Width::W64 => 8,
            Width::Native => NATIVE_BYTES,
        }
    }

    /// Smallest and largest value of a signed integer of this width.
    pub const fn signed_bounds(self) -> (i64, i64) {
        let bits = self.bytes() * 8;
        if bits >= 64 {
            (i64::MIN, i64::MAX)
        } else {
            (-(1i64 << (bits - 1)), (1i64 << (bits - 1)) - 1)
        }
    }

    /// Largest value of an unsigned integer of this width.
    pub const fn unsigned_max(self) -> u64 {
        let bits = self.bytes() * 8;
        if bits >= 64 {
            u64::MAX
        } else {
            (1u64 << bits) - 1
        }
    }
}

/// Float width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatWidth {
    /// `f32`
    F32,
    /// `f64`
    F64,
}

impl FloatWidth {
    /// Number of bytes a value of this width is decoded from.
    pub const fn bytes(self) -> usize {
        match self {
            FloatWidth::F32 => 4,
            FloatWidth::F64 => 8,
        }
    }
}

/// Reads fixed-width values from the front of a byte buffer.
///
/// Reading never fails: once the buffer runs dry every read is padded with
/// zero bytes, so the values decoded from an exhausted consumer are zeroes.
#[derive(Debug, Clone)]
pub struct ByteConsumer<'a> {
    bytes: &'a [u8],
    consumed: usize,
}

impl<'a> ByteConsumer<'a> {
    /// Wraps `bytes`, starting at the front.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, consumed: 0 }
    }

    /// Number of bytes left.
    pub fn len(&self) -> usize {
        self.bytes.len() - self.consumed
    }

    /// Whether every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of bytes consumed so far, padding excluded.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// The bytes not consumed yet.
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.consumed..]
    }

    /// Takes exactly `n` bytes, zero-padded if fewer than `n` remain.
    pub fn consume(&mut self, n: usize) -> Vec<u8> {
        let mut out = vec![0u8; n];
        self.consume_into(&mut out);
        out
    }

    fn consume_into(&mut self, out: &mut [u8]) {
        let available = self.remaining();
        let taken = available.len().min(out.len());
        out[..taken].copy_from_slice(&available[..taken]);
        self.consumed += taken;
    }

    fn array<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        self.consume_into(&mut out);
        out
    }

    /// A single byte.
    pub fn byte(&mut self) -> u8 {
        let [b] = self.array::<1>();
        b
    }

    /// Little-endian unsigned integer of the given width.
    pub fn uint64(&mut self, width: Width) -> u64 {
        match width {
            Width::W8 => u64::from(self.byte()),
            Width::W16 => u64::from(u16::from_le_bytes(self.array())),
            Width::W32 => u64::from(u32::from_le_bytes(self.array())),
            Width::W64 => u64::from_le_bytes(self.array()),
            Width::Native => usize::from_le_bytes(self.array()) as u64,
        }
    }

    /// Little-endian signed integer of the given width, sign-extended.
    pub fn int64(&mut self, width: Width) -> i64 {
        match width {
            Width::W8 => i64::from(i8::from_le_bytes(self.array())),
            Width::W16 => i64::from(i16::from_le_bytes(self.array())),
            Width::W32 => i64::from(i32::from_le_bytes(self.array())),
            Width::W64 => i64::from_le_bytes(self.array()),
            Width::Native => isize::from_le_bytes(self.array()) as i64,
        }
    }

    /// IEEE-754 float. Single precision is widened.
    pub fn float64(&mut self, width: FloatWidth) -> f64 {
        match width {
            FloatWidth::F32 => f64::from(f32::from_le_bytes(self.array())),
            FloatWidth::F64 => f64::from_le_bytes(self.array()),
        }
    }

    /// One byte; odd means `true`.
    pub fn bool(&mut self) -> bool {
        self.byte() % 2 == 1
    }

    /// Consumes `n` bytes and keeps the characters that decode cleanly.
    ///
    /// Invalid sequences are dropped, as is U+FFFD itself, so the result
    /// can be shorter than `n` bytes.
    pub fn string(&mut self, n: usize) -> String {
        let bytes = self.consume(n);
        let mut out = String::with_capacity(n);
        for chunk in bytes.utf8_chunks() {
            out.extend(
                chunk
                    .valid()
                    .chars()
                    .filter(|&ch| ch != char::REPLACEMENT_CHARACTER),
            );
        }
        out
    }
}

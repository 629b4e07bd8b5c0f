//! Fixed-capacity building blocks for the POD snapshot payload.

/// Bounded, always NUL-terminated string storage. Writes truncate on a UTF-8
/// boundary; reads stop at the first NUL.
#[derive(Clone, Copy)]
pub struct FixedStr<const N: usize> {
    buf: [u8; N],
}

impl<const N: usize> FixedStr<N> {
    pub const CAPACITY: usize = N;

    pub fn new() -> Self {
        Self { buf: [0; N] }
    }

    pub fn from_str(s: &str) -> Self {
        let mut out = Self::new();
        out.set(s);
        out
    }

    // Truncating copy; at most N-1 bytes land in the buffer, the rest is NUL.
    pub fn set(&mut self, s: &str) {
        let mut n = s.len().min(N - 1);
        while n > 0 && !s.is_char_boundary(n) {
            n -= 1;
        }
        self.buf[..n].copy_from_slice(&s.as_bytes()[..n]);
        self.buf[n..].fill(0);
    }

    pub fn as_str(&self) -> &str {
        let end = self.buf.iter().position(|&b| b == 0).unwrap_or(N - 1);
        std::str::from_utf8(&self.buf[..end]).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf[0] == 0
    }
}

impl<const N: usize> Default for FixedStr<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> std::fmt::Debug for FixedStr<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl<const N: usize> PartialEq for FixedStr<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<const N: usize> PartialEq<&str> for FixedStr<N> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Bounded sequence with an explicit length; `push` saturates instead of
/// overflowing.
#[derive(Clone, Copy, Debug)]
pub struct BoundedList<T: Copy + Default, const N: usize> {
    items: [T; N],
    len: u8,
}

impl<T: Copy + Default, const N: usize> BoundedList<T, N> {
    pub const CAPACITY: usize = N;

    pub fn new() -> Self {
        Self {
            items: [T::default(); N],
            len: 0,
        }
    }

    // Returns false (and drops the item) when full.
    pub fn push(&mut self, item: T) -> bool {
        if (self.len as usize) < N {
            self.items[self.len as usize] = item;
            self.len += 1;
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, i: usize) -> Option<&T> {
        self.as_slice().get(i)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items[..self.len as usize]
    }
}

impl<T: Copy + Default, const N: usize> Default for BoundedList<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

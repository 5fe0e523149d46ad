use arrayvec::ArrayVec;

/// Inputs whose canonical form fits in this many bytes never touch the heap.
pub const INLINE_CAPACITY: usize = 128;

/// Scratch region for one `normalize` call.
///
/// Starts empty and is only filled once the output diverges from the input
/// (see [`Scratch::materialize`]). Bytes past the write cursor are dropped on
/// the next write, so `len()` always equals the cursor after a write.
#[derive(Debug)]
pub enum Scratch {
    Inline(ArrayVec<u8, INLINE_CAPACITY>),
    Heap(Vec<u8>),
}

impl Scratch {
    /// Pick a tier able to hold `input_len + 1` bytes (room for a synthesized
    /// leading `/`).
    pub fn for_input(input_len: usize) -> Self {
        let worst = input_len.saturating_add(1);
        if worst <= INLINE_CAPACITY {
            Self::Inline(ArrayVec::new())
        } else {
            Self::Heap(Vec::with_capacity(worst))
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Inline(b) => b.is_empty(),
            Self::Heap(b) => b.is_empty(),
        }
    }

    fn as_slice(&self) -> &[u8] {
        match self {
            Self::Inline(b) => b.as_slice(),
            Self::Heap(b) => b.as_slice(),
        }
    }

    /// Byte at `i`, if already written.
    #[inline]
    pub fn get(&self, i: usize) -> Option<u8> {
        self.as_slice().get(i).copied()
    }

    /// Fill an empty buffer with the output produced so far.
    pub fn materialize(&mut self, prefix: &[u8]) {
        self.truncate(0);
        for &b in prefix {
            self.push(b);
        }
    }

    /// Write `c` at position `w`, discarding everything from `w` on.
    #[inline]
    pub fn write_at(&mut self, w: usize, c: u8) {
        self.truncate(w);
        self.push(c);
    }

    fn truncate(&mut self, len: usize) {
        match self {
            Self::Inline(b) => b.truncate(len),
            Self::Heap(b) => b.truncate(len),
        }
    }

    fn push(&mut self, c: u8) {
        match self {
            Self::Inline(b) => {
                if let Err(overflow) = b.try_push(c) {
                    // Spill. `for_input` never picks an inline tier this small.
                    let mut heap = Vec::with_capacity(b.len() + 1);
                    heap.extend_from_slice(b.as_slice());
                    heap.push(overflow.element());
                    *self = Self::Heap(heap);
                }
            }
            Self::Heap(b) => b.push(c),
        }
    }

    /// First `w` bytes as an owned vector.
    pub fn into_vec(self, w: usize) -> Vec<u8> {
        match self {
            Self::Inline(b) => b[..w.min(b.len())].to_vec(),
            Self::Heap(mut b) => {
                b.truncate(w);
                b
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_inline_for_short_inputs() {
        assert!(matches!(Scratch::for_input(0), Scratch::Inline(_)));
        assert!(matches!(
            Scratch::for_input(INLINE_CAPACITY - 1),
            Scratch::Inline(_)
        ));
        assert!(matches!(
            Scratch::for_input(INLINE_CAPACITY),
            Scratch::Heap(_)
        ));
    }

    #[test]
    fn write_at_drops_stale_tail() {
        let mut s = Scratch::for_input(8);
        s.materialize(b"/abc/def");
        s.write_at(5, b'x');
        assert_eq!(s.into_vec(6), b"/abc/x".to_vec());
    }

    #[test]
    fn inline_spills_to_heap_on_overflow() {
        let mut s = Scratch::Inline(ArrayVec::new());
        for i in 0..INLINE_CAPACITY + 10 {
            s.write_at(i, b'a');
        }
        assert!(matches!(s, Scratch::Heap(_)));
        assert_eq!(s.get(INLINE_CAPACITY + 9), Some(b'a'));
        assert_eq!(s.into_vec(INLINE_CAPACITY + 10).len(), INLINE_CAPACITY + 10);
    }

    #[test]
    fn empty_until_materialized() {
        let mut s = Scratch::for_input(3);
        assert!(s.is_empty());
        assert_eq!(s.get(0), None);
        s.materialize(b"/");
        assert!(!s.is_empty());
        assert_eq!(s.get(0), Some(b'/'));
    }
}

use std::borrow::Cow;

use super::buffer::Scratch;

const SEP: u8 = b'/';
const DOT: u8 = b'.';

/// Output side of the scan.
///
/// While every emitted byte matches the input at the same offset the output
/// is just `src[..w]`. The scratch buffer is filled on the first mismatch and
/// receives every write after that.
struct Output<'a> {
    src: &'a [u8],
    buf: Scratch,
    w: usize,
}

impl<'a> Output<'a> {
    fn new(src: &'a [u8]) -> Self {
        let mut buf = Scratch::for_input(src.len());
        let w = 1;
        if src[0] != SEP {
            buf.materialize(&[SEP]);
        }
        Self { src, buf, w }
    }

    #[inline]
    fn materialized(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Byte `i` of the output produced so far.
    #[inline]
    fn byte_at(&self, i: usize) -> Option<u8> {
        if self.materialized() {
            self.buf.get(i)
        } else {
            self.src.get(i).copied()
        }
    }

    #[inline]
    fn emit(&mut self, c: u8) {
        if !self.materialized() {
            if self.src.get(self.w) == Some(&c) {
                self.w += 1;
                return;
            }
            self.buf.materialize(&self.src[..self.w]);
        }
        self.buf.write_at(self.w, c);
        self.w += 1;
    }

    /// Drop the last written segment. The root is never removed.
    fn backtrack(&mut self) {
        if self.w <= 1 {
            return;
        }
        self.w -= 1;
        while self.w > 1 && self.byte_at(self.w) != Some(SEP) {
            self.w -= 1;
        }
    }

    fn finish(self) -> Cow<'a, [u8]> {
        if self.materialized() {
            Cow::Owned(self.buf.into_vec(self.w))
        } else {
            Cow::Borrowed(&self.src[..self.w])
        }
    }
}

/// Single pass over a non-empty `path`.
pub(super) fn clean(path: &[u8]) -> Cow<'_, [u8]> {
    let n = path.len();
    let mut out = Output::new(path);
    let mut r = if path[0] == SEP { 1 } else { 0 };
    let mut trailing = n > 1 && path[n - 1] == SEP;

    while r < n {
        let at = |i: usize| path.get(i).copied();
        match (path[r], at(r + 1), at(r + 2)) {
            // Empty segment; a trailing separator is re-added at the end.
            (SEP, _, _) => r += 1,
            (DOT, None, _) => {
                trailing = true;
                r += 1;
            }
            (DOT, Some(SEP), _) => r += 2,
            (DOT, Some(DOT), None | Some(SEP)) => {
                r += 3;
                out.backtrack();
            }
            _ => {
                if out.w > 1 {
                    out.emit(SEP);
                }
                while r < n && path[r] != SEP {
                    out.emit(path[r]);
                    r += 1;
                }
            }
        }
    }

    if trailing && out.w > 1 {
        out.emit(SEP);
    }

    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaned(p: &str) -> String {
        String::from_utf8(clean(p.as_bytes()).into_owned()).unwrap()
    }

    #[test]
    fn dot_dot_without_materializing() {
        // Output after backtracking equals the input prefix again.
        let out = clean(b"/a/../a");
        assert_eq!(&*out, b"/a");
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn backtrack_reads_materialized_output() {
        // `//` forces materialization before `..` has to look back.
        assert_eq!(cleaned("/a//b/c/.."), "/a/b");
        assert_eq!(cleaned("/a//b/c/../.."), "/a");
        assert_eq!(cleaned("x/y/.."), "/x");
    }

    #[test]
    fn dot_dot_prefix_is_a_real_segment() {
        assert_eq!(cleaned("/..a/b"), "/..a/b");
        assert_eq!(cleaned("/a../b"), "/a../b");
        assert_eq!(cleaned("/.a"), "/.a");
        assert_eq!(cleaned("/..."), "/...");
    }

    #[test]
    fn separator_only_inputs() {
        assert_eq!(cleaned("/"), "/");
        assert_eq!(cleaned("//"), "/");
        assert_eq!(cleaned("///"), "/");
    }

    #[test]
    fn trailing_dot_forces_separator() {
        assert_eq!(cleaned("/a/."), "/a/");
        assert_eq!(cleaned("/a/b/.."), "/a");
        assert_eq!(cleaned("/."), "/");
        assert_eq!(cleaned("."), "/");
    }

    #[test]
    fn dot_dot_with_trailing_separator() {
        assert_eq!(cleaned("/a/b/../"), "/a/");
        assert_eq!(cleaned("/a/../"), "/");
    }
}

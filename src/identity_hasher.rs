//! A hasher which hands integer keys back as their own hash. Plugging it into
//! a [`ChainedHashMap`](crate::ChainedHashMap) makes bucket placement easy to
//! predict: integer key `k` always lands in bucket `k % bucket_count`, which
//! is handy when eyeballing bucket distributions.

use std::hash::{BuildHasher, Hasher};

/// Proxies integers for themselves.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityHasher(u64);

impl IdentityHasher {
    // starting from zero, a single write leaves exactly that word behind.
    // later writes (string terminators, tuple fields) still perturb it.
    fn mix(&mut self, word: u64) {
        self.0 = self.0.rotate_left(5) ^ word;
    }
}

impl Hasher for IdentityHasher {
    fn write(&mut self, bytes: &[u8]) {
        // anything that isn't one of the integer writes below gets folded in
        // little-endian, eight bytes at a time
        for chunk in bytes.chunks(8) {
            let mut word = 0u64;
            for byte in chunk.iter().rev() {
                word = (word << 8) | *byte as u64;
            }
            self.mix(word);
        }
    }

    fn write_u8(&mut self, i: u8) {
        self.mix(i as u64);
    }

    fn write_u16(&mut self, i: u16) {
        self.mix(i as u64);
    }

    fn write_u32(&mut self, i: u32) {
        self.mix(i as u64);
    }

    fn write_u64(&mut self, i: u64) {
        self.mix(i);
    }

    fn write_usize(&mut self, i: usize) {
        self.mix(i as u64);
    }

    fn write_i8(&mut self, i: i8) {
        self.mix(i as u64);
    }

    fn write_i16(&mut self, i: i16) {
        self.mix(i as u64);
    }

    fn write_i32(&mut self, i: i32) {
        self.mix(i as u64);
    }

    fn write_i64(&mut self, i: i64) {
        self.mix(i as u64);
    }

    fn write_isize(&mut self, i: isize) {
        self.mix(i as u64);
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

/// Builds new IdentityHashers on demand.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuildIdentityHasher;

impl BuildHasher for BuildIdentityHasher {
    type Hasher = IdentityHasher;

    fn build_hasher(&self) -> Self::Hasher {
        IdentityHasher(0)
    }
}

#[cfg(test)]
mod tests {
    use std::hash::{BuildHasher, Hash, Hasher};

    use super::{BuildIdentityHasher, IdentityHasher};

    #[test]
    fn test_hasher() {
        let mut h0 = IdentityHasher(0);
        h0.write_u64(0xc8c8c8c8);
        assert_eq!(0xc8c8c8c8, h0.finish());

        let mut h1 = IdentityHasher(0);
        h1.write_u64(0xc8c8c8c8c8c8c8c8);
        assert_eq!(0xc8c8c8c8c8c8c8c8, h1.finish());
    }

    #[test]
    fn test_integer_keys_hash_to_themselves() {
        let hash = |k: &dyn Fn(&mut IdentityHasher)| {
            let mut h = BuildIdentityHasher.build_hasher();
            k(&mut h);
            h.finish()
        };

        assert_eq!(4, hash(&|h| 4u8.hash(h)));
        assert_eq!(4, hash(&|h| 4u32.hash(h)));
        assert_eq!(4, hash(&|h| 4usize.hash(h)));
        assert_eq!(4, hash(&|h| 4i64.hash(h)));
        // negative numbers sign-extend, same as an `as u64` cast
        assert_eq!(-1i64 as u64, hash(&|h| (-1i32).hash(h)));
    }

    #[test]
    fn test_strings_do_not_collapse() {
        let hash = |s: &str| {
            let mut h = BuildIdentityHasher.build_hasher();
            s.hash(&mut h);
            h.finish()
        };

        assert_ne!(hash("alpha"), hash("omega"));
        assert_eq!(hash("alpha"), hash("alpha"));
    }

    #[test]
    fn test_bytes_are_deterministic() {
        let mut a = BuildIdentityHasher.build_hasher();
        let mut b = BuildIdentityHasher.build_hasher();
        a.write(b"a fairly long byte string");
        b.write(b"a fairly long byte string");
        assert_eq!(a.finish(), b.finish());
    }
}

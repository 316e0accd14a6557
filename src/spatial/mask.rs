use bitvec::prelude::*;

/// Bit-packed visited flags covering every pixel of one sheet
///
/// Always created cleared, so a mask can never carry state from an earlier
/// detection call.
#[derive(Clone, Debug)]
pub struct VisitedMask {
    bits: BitVec,
    width: u32,
    height: u32,
}

impl VisitedMask {
    /// Create a mask with every pixel unvisited
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            bits: bitvec![0; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Test whether a pixel was visited; out-of-range pixels count as visited
    pub fn is_visited(&self, x: u32, y: u32) -> bool {
        self.offset(x, y)
            .is_none_or(|offset| self.bits.get(offset).as_deref() == Some(&true))
    }

    /// Mark a pixel visited, returning false if it already was (or lies outside)
    pub fn visit(&mut self, x: u32, y: u32) -> bool {
        let Some(offset) = self.offset(x, y) else {
            return false;
        };
        match self.bits.get_mut(offset) {
            Some(mut bit) if !*bit => {
                bit.set(true);
                true
            }
            _ => false,
        }
    }

    const fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}

// Memory module - Flat byte storage shared by every RAM/ROM region
//
// WRAM, extended cartridge RAM, nametable VRAM, palette RAM, OAM, PRG-ROM and
// CHR-ROM/RAM are all backed by a `Memory`. The owning bus (or mapper) is
// responsible for reducing an address into range before it reaches here; an
// out-of-range index is an emulator bug and panics like any slice index.
//
// # Regions backed by Memory
//
// ```text
// WRAM        0x0800 bytes  CpuBus   (mirrored with & 0x07FF)
// Ext RAM     0x2000 bytes  CpuBus   ($6000-$7FFF)
// VRAM        0x0800 bytes  PpuBus   (0x1000 for four-screen)
// Palette     0x0020 bytes  PpuBus
// OAM         0x0100 bytes  Ppu
// PRG / CHR   variable      Mapper
// ```

/// A flat, fixed-size byte buffer
///
/// # Examples
///
/// ```
/// use nes_core::memory::Memory;
///
/// let mut wram = Memory::new(0x800);
/// wram.write(0x07FF, 0x42);
/// assert_eq!(wram.read(0x07FF), 0x42);
/// assert_eq!(wram.size(), 0x800);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Create a zero-filled region of `size` bytes
    pub fn new(size: usize) -> Self {
        Self::with_pattern(size, 0x00)
    }

    /// Create a region of `size` bytes filled with `fill_byte`
    ///
    /// OAM powers up as 0xFF so that unused sprites sit below the screen.
    pub fn with_pattern(size: usize, fill_byte: u8) -> Self {
        Memory {
            data: vec![fill_byte; size],
        }
    }

    /// Wrap an existing buffer (ROM images)
    pub fn from_vec(data: Vec<u8>) -> Self {
        Memory { data }
    }

    /// Read a byte
    ///
    /// # Arguments
    /// * `addr` - Offset into the region, already masked by the caller
    #[inline]
    pub fn read(&self, addr: usize) -> u8 {
        self.data[addr]
    }

    /// Write a byte
    ///
    /// # Arguments
    /// * `addr` - Offset into the region, already masked by the caller
    /// * `data` - The byte to store
    #[inline]
    pub fn write(&mut self, addr: usize, data: u8) {
        self.data[addr] = data;
    }

    /// Size of the region in bytes
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Reset every byte to `fill_byte`
    pub fn fill(&mut self, fill_byte: u8) {
        self.data.fill(fill_byte);
    }

    /// Borrow the raw contents
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_new_is_zeroed() {
        let mem = Memory::new(0x20);
        assert_eq!(mem.size(), 0x20);
        assert!(mem.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_memory_with_pattern() {
        let mem = Memory::with_pattern(0x100, 0xFF);
        assert_eq!(mem.read(0x00), 0xFF);
        assert_eq!(mem.read(0xFF), 0xFF);
    }

    #[test]
    fn test_memory_read_write() {
        let mut mem = Memory::new(0x800);
        mem.write(0x0000, 0x11);
        mem.write(0x07FF, 0x22);
        assert_eq!(mem.read(0x0000), 0x11);
        assert_eq!(mem.read(0x07FF), 0x22);

        mem.write(0x0000, 0x33);
        assert_eq!(mem.read(0x0000), 0x33, "Second write should overwrite");
    }

    #[test]
    fn test_memory_from_vec_keeps_contents() {
        let mem = Memory::from_vec(vec![1, 2, 3, 4]);
        assert_eq!(mem.size(), 4);
        assert_eq!(mem.read(2), 3);
    }

    #[test]
    fn test_memory_fill() {
        let mut mem = Memory::new(16);
        mem.write(3, 0x42);
        mem.fill(0xAA);
        assert_eq!(mem.read(3), 0xAA);
    }

    #[test]
    #[should_panic]
    fn test_memory_out_of_bounds_panics() {
        let mem = Memory::new(0x800);
        let _ = mem.read(0x800);
    }
}

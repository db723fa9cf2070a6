use std::io::{self, BufWriter, Write};

pub const FILE_HEADER_SIZE: usize = 14;
pub const INFO_HEADER_SIZE: usize = 40;

#[derive(Debug, Copy, Clone)]
pub struct BmpFHEAD {
    pub bf_type: u16,
    pub bf_size: u32,
    pub bf_reserved: u32,
    pub bf_off_bits: u32,
}

impl BmpFHEAD {
    pub fn from(pixel_array_size: usize) -> Self {
        Self {
            bf_type: 0x4d42, // "BM"
            bf_size: (FILE_HEADER_SIZE + INFO_HEADER_SIZE + pixel_array_size) as u32,
            bf_reserved: 0,
            bf_off_bits: (FILE_HEADER_SIZE + INFO_HEADER_SIZE) as u32,
        }
    }

    fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.bf_type.to_le_bytes())?;
        out.write_all(&self.bf_size.to_le_bytes())?;
        out.write_all(&self.bf_reserved.to_le_bytes())?;
        out.write_all(&self.bf_off_bits.to_le_bytes())
    }
}

#[derive(Debug, Copy, Clone)]
pub struct BmpIHEAD {
    pub bi_size: u32,
    pub bi_width: i32,
    pub bi_height: i32,
    pub bi_planes: u16,
    pub bi_bit_count: u16,
    pub bi_compression: u32,
    pub bi_size_image: u32,
    pub bi_x_pels_per_meter: i32,
    pub bi_y_pels_per_meter: i32,
    pub bi_clr_used: u32,
    pub bi_clr_important: u32,
}

impl BmpIHEAD {
    pub fn from(width: usize, height: usize, pixel_array_size: usize) -> Self {
        Self {
            bi_size: INFO_HEADER_SIZE as u32,
            bi_width: width as i32,
            // negative height: rows are stored top-down
            bi_height: -(height as i32),
            bi_planes: 1,
            bi_bit_count: 24,
            bi_compression: 0,
            bi_size_image: pixel_array_size as u32,
            bi_x_pels_per_meter: 2835,
            bi_y_pels_per_meter: 2835,
            bi_clr_used: 0,
            bi_clr_important: 0,
        }
    }

    fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.bi_size.to_le_bytes())?;
        out.write_all(&self.bi_width.to_le_bytes())?;
        out.write_all(&self.bi_height.to_le_bytes())?;
        out.write_all(&self.bi_planes.to_le_bytes())?;
        out.write_all(&self.bi_bit_count.to_le_bytes())?;
        out.write_all(&self.bi_compression.to_le_bytes())?;
        out.write_all(&self.bi_size_image.to_le_bytes())?;
        out.write_all(&self.bi_x_pels_per_meter.to_le_bytes())?;
        out.write_all(&self.bi_y_pels_per_meter.to_le_bytes())?;
        out.write_all(&self.bi_clr_used.to_le_bytes())?;
        out.write_all(&self.bi_clr_important.to_le_bytes())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Uncompressed 24-bit bitmap backed by a borrowed pixel buffer.
///
/// `pixels` holds `width * height` BGR triplets, row by row from the top.
pub struct BMP<'a> {
    pub width: usize,
    pub height: usize,
    pub pixels: &'a [u8],
}

impl<'a> BMP<'a> {
    pub fn from_mem(width: usize, height: usize, pixels: &'a [u8]) -> io::Result<Self> {
        if width == 0 || height == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("bitmap dimensions must be non-zero, got {width} x {height}"),
            ));
        }
        if pixels.len() != 3 * width * height {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "expected {} bytes of BGR pixels for {width} x {height}, got {}",
                    3 * width * height,
                    pixels.len()
                ),
            ));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Row size in bytes, padded to 4 bytes.
    pub fn row_size(&self) -> usize {
        (3 * self.width + 3) & !3
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let row_size = self.row_size();
        let pixel_array_size = row_size * self.height;
        BmpFHEAD::from(pixel_array_size).write_to(out)?;
        BmpIHEAD::from(self.width, self.height, pixel_array_size).write_to(out)?;

        let padding = vec![0u8; row_size - self.width * 3];
        for row in self.pixels.chunks_exact(self.width * 3) {
            out.write_all(row)?;
            out.write_all(&padding)?;
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes =
            Vec::with_capacity(FILE_HEADER_SIZE + INFO_HEADER_SIZE + self.row_size() * self.height);
        // writing into a Vec cannot fail
        let _ = self.write_to(&mut bytes);
        bytes
    }

    pub fn to_file(&self, filename: &std::path::Path) -> io::Result<()> {
        let mut file = BufWriter::new(std::fs::File::create(filename)?);
        self.write_to(&mut file)?;
        file.flush()
    }
}

/// Packs pixels into the BGR byte order the bitmap expects.
pub fn pack_bgr(pixels: &[Pixel]) -> Vec<u8> {
    pixels.iter().flat_map(|p| [p.b, p.g, p.r]).collect()
}

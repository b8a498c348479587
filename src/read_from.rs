use std::io::{self, Cursor, Read};
use byteorder::{ReadBytesExt, LE};

pub trait ReadFrom: Sized {
    /// Width of one encoded value in bytes.
    const SIZE: usize;

    fn read_from<R: Read + ?Sized>(r: &mut R) -> io::Result<Self>;
}

macro_rules! read_byteorder {
    ($($ty:ty, $size:expr, $read_one:ident;)*) => {
        $(
            impl ReadFrom for $ty {
                const SIZE: usize = $size;

                fn read_from<R: Read + ?Sized>(r: &mut R) -> io::Result<Self> {
                    r.$read_one::<LE>()
                }
            }
        )*
    };
}

read_byteorder! {
    u16, 2, read_u16;
    u32, 4, read_u32;
    i16, 2, read_i16;
    f32, 4, read_f32;
}

impl ReadFrom for u8 {
    const SIZE: usize = 1;

    fn read_from<R: Read + ?Sized>(r: &mut R) -> io::Result<Self> {
        r.read_u8()
    }
}

impl ReadFrom for i8 {
    const SIZE: usize = 1;

    fn read_from<R: Read + ?Sized>(r: &mut R) -> io::Result<Self> {
        r.read_i8()
    }
}

pub trait ReadExt: Read {
    fn read_one<T: ReadFrom>(&mut self) -> io::Result<T> {
        T::read_from(self)
    }

    fn read_many<T: ReadFrom>(&mut self, n: usize) -> io::Result<Vec<T>> {
        let mut v = Vec::with_capacity(n);
        for _ in 0 .. n {
            v.push(self.read_one()?);
        }
        Ok(v)
    }
}

impl<R: Read + ?Sized> ReadExt for R {}

/// Read `n` consecutive values starting at `offset` in `bytes`.
///
/// Fails with `UnexpectedEof` if the values would run past the end of the slice.
pub fn read_many_at<T: ReadFrom>(bytes: &[u8], offset: usize, n: usize) -> io::Result<Vec<T>> {
    let end = n.checked_mul(T::SIZE)
        .and_then(|len| offset.checked_add(len))
        .filter(|&end| end <= bytes.len())
        .ok_or_else(|| io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("{} values of {} bytes at offset {} overrun {} bytes",
                n, T::SIZE, offset, bytes.len()),
        ))?;
    let mut curs = Cursor::new(&bytes[offset .. end]);
    curs.read_many(n)
}

pub mod color;
pub mod hsl;
pub mod palette;

#[cfg(test)]
pub(crate) mod testing;

pub use color::sRGB;

#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use subpel_image as image;

#[doc(inline)]
pub use subpel_mc as mc;

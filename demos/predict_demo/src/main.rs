use argh::FromArgs;

use subpel::image::{Pixel, Plane, PlaneError};
use subpel::mc::{
    convolve::ConvolveScratch,
    filter::{kernels, KernelTable, SubpelFilter},
    predict::{predict_block, Compose},
};

// wide enough for a 64x64 block at the largest step
const BORDER: usize = 8;
const REF_SIZE: usize = 64 * 5 + 2 * BORDER;

#[derive(FromArgs)]
/// Predict one block from a synthetic reference frame and print it
struct Args {
    /// block width in samples
    #[argh(option, default = "8")]
    width: usize,

    /// block height in samples
    #[argh(option, default = "8")]
    height: usize,

    /// horizontal start position in 1/16 samples
    #[argh(option, short = 'x', default = "8")]
    x_q4: u32,

    /// vertical start position in 1/16 samples
    #[argh(option, short = 'y', default = "8")]
    y_q4: u32,

    /// horizontal step in 1/16 samples
    #[argh(option, default = "16")]
    x_step: u32,

    /// vertical step in 1/16 samples
    #[argh(option, default = "16")]
    y_step: u32,

    /// filter family: regular, sharp, smooth or bilinear
    #[argh(option, short = 'f', default = "String::from(\"regular\")")]
    filter: String,

    /// average into a mid-grey block instead of overwriting it
    #[argh(switch, short = 'a')]
    average: bool,

    /// sample bit depth: 8, 10 or 12
    #[argh(option, short = 'b', default = "8")]
    bit_depth: u32,
}

fn kernel_table(name: &str) -> Result<&'static KernelTable, Box<dyn std::error::Error>> {
    match name {
        "regular" => Ok(&kernels::REGULAR),
        "sharp" => Ok(&kernels::SHARP),
        "smooth" => Ok(&kernels::SMOOTH),
        "bilinear" => Ok(&kernels::BILINEAR),
        _ => Err(format!("unknown filter family: {name}").into()),
    }
}

/// Largest sample value at `bit_depth`, if `T` can carry it.
fn sample_max<T: Pixel>(bit_depth: u32) -> Result<i32, PlaneError> {
    if !T::supports_bit_depth(bit_depth) {
        return Err(PlaneError::UnsupportedBitDepth(
            bit_depth,
            T::MIN_BIT_DEPTH,
            T::MAX_BIT_DEPTH,
        ));
    }
    Ok((1 << bit_depth) - 1)
}

fn run<T: Pixel + std::fmt::Display>(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let table = kernel_table(&args.filter)?;
    let x_filter = SubpelFilter::new(table, args.x_q4, args.x_step)?;
    let y_filter = SubpelFilter::new(table, args.y_q4, args.y_step)?;

    // diagonal ramp with a sharp edge through the middle
    let max = sample_max::<T>(args.bit_depth)?;
    let data: Vec<T> = (0..REF_SIZE * REF_SIZE)
        .map(|i| {
            let (col, row) = ((i % REF_SIZE) as i32, (i / REF_SIZE) as i32);
            let ramp = (col + row) * max / (2 * REF_SIZE as i32);
            T::from_clamped(if col > row { ramp } else { max - ramp })
        })
        .collect();
    let reference =
        Plane::from_size_slice([REF_SIZE, REF_SIZE].into(), &data)?.with_bit_depth(args.bit_depth)?;

    let compose = if args.average {
        Compose::Average
    } else {
        Compose::Overwrite
    };
    let mut block = Plane::from_size_val([args.width, args.height].into(), T::from_clamped(max / 2))?
        .with_bit_depth(args.bit_depth)?;
    let mut scratch = ConvolveScratch::new();

    log::debug!(
        "predicting {}x{} block with the {} filter at bit depth {}",
        args.width,
        args.height,
        args.filter,
        args.bit_depth
    );
    let path = predict_block(
        &reference.view_at(BORDER, BORDER)?,
        &mut block.view_mut(),
        &x_filter,
        &y_filter,
        compose,
        &mut scratch,
    )?;
    log::debug!("prediction path: {path:?}");

    for row in block.rows() {
        let line: Vec<String> = row.iter().map(|v| format!("{v:>4}")).collect();
        println!("{}", line.join(" "));
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    if args.bit_depth == 8 {
        run::<u8>(&args)
    } else {
        run::<u16>(&args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_max() -> Result<(), PlaneError> {
        assert_eq!(sample_max::<u8>(8)?, 255);
        assert_eq!(sample_max::<u16>(10)?, 1023);
        assert_eq!(sample_max::<u16>(12)?, 4095);
        assert_eq!(
            sample_max::<u16>(32),
            Err(PlaneError::UnsupportedBitDepth(32, 8, 12))
        );
        assert_eq!(
            sample_max::<u8>(10),
            Err(PlaneError::UnsupportedBitDepth(10, 8, 8))
        );
        Ok(())
    }
}

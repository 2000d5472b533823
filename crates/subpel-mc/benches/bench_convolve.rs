use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use subpel_image::Plane;
use subpel_mc::{
    convolve::{convolve_2d, convolve_avg_2d, convolve_copy, convolve_horiz, ConvolveScratch},
    filter::{kernels, SubpelFilter},
};

const BORDER: usize = 80;

fn bench_convolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("Convolve");

    // reference frame with a border wide enough for scaled 64x64 blocks
    let ref_size = [64 * 5 + 2 * BORDER, 64 * 5 + 2 * BORDER].into();
    let data: Vec<u8> = (0..(64 * 5 + 2 * BORDER) * (64 * 5 + 2 * BORDER))
        .map(|i| (i * 31 % 251) as u8)
        .collect();
    let reference = Plane::<u8>::from_size_slice(ref_size, &data).unwrap();
    let src = reference.view_at(BORDER, BORDER).unwrap();

    for block in [4usize, 8, 16, 32, 64].iter() {
        for step in [16u32, 32, 80].iter() {
            group.throughput(Throughput::Elements((*block * *block) as u64));
            let parameter_string = format!("{}x{}/step{}", block, block, step);

            let x_filter = SubpelFilter::new(&kernels::REGULAR, 5, *step).unwrap();
            let y_filter = SubpelFilter::new(&kernels::REGULAR, 11, *step).unwrap();
            let mut dst = Plane::<u8>::from_size_val([*block, *block].into(), 0).unwrap();
            let mut scratch = ConvolveScratch::new();

            group.bench_with_input(
                BenchmarkId::new("convolve_horiz", &parameter_string),
                &x_filter,
                |b, x| b.iter(|| black_box(convolve_horiz(&src, &mut dst.view_mut(), x))),
            );

            group.bench_with_input(
                BenchmarkId::new("convolve_2d", &parameter_string),
                &(&x_filter, &y_filter),
                |b, (x, y)| {
                    b.iter(|| black_box(convolve_2d(&src, &mut dst.view_mut(), x, y, &mut scratch)))
                },
            );

            group.bench_with_input(
                BenchmarkId::new("convolve_avg_2d", &parameter_string),
                &(&x_filter, &y_filter),
                |b, (x, y)| {
                    b.iter(|| {
                        black_box(convolve_avg_2d(&src, &mut dst.view_mut(), x, y, &mut scratch))
                    })
                },
            );
        }

        let mut dst = Plane::<u8>::from_size_val([*block, *block].into(), 0).unwrap();
        group.bench_with_input(
            BenchmarkId::new("convolve_copy", format!("{}x{}", block, block)),
            &src,
            |b, src| b.iter(|| black_box(convolve_copy(src, &mut dst.view_mut()))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_convolve);
criterion_main!(benches);

//! PNG I/O regression test
//!
//! Lossless write/read of synthetic images at every supported depth,
//! through files in the regression output directory.
//!
//! # See also
//!
//! C Leptonica: `reference/leptonica/prog/pngio_reg.c`

use leptonica_core::{Pix, PixelDepth, color};
use leptonica_io::{read_png_file, write_png_file};
use leptonica_test::{RegParams, regout_dir};
use std::fs;
use std::path::PathBuf;

fn make_pix(depth: PixelDepth) -> Pix {
    let (w, h) = (45u32, 23u32);
    let mut pm = Pix::new(w, h, depth).unwrap().to_mut();
    for y in 0..h {
        for x in 0..w {
            let v = x * 11 + y * 5;
            let val = match depth {
                PixelDepth::Bit32 => color::compose_rgb(v as u8, (v / 2) as u8, (255 - v % 256) as u8),
                _ => v % (depth.max_value() + 1),
            };
            pm.set_pixel(x, y, val).unwrap();
        }
    }
    pm.into()
}

#[test]
fn pngio_reg() {
    let mut rp = RegParams::new("pngio");
    let outdir = PathBuf::from(regout_dir());
    fs::create_dir_all(&outdir).unwrap();

    for depth in [
        PixelDepth::Bit1,
        PixelDepth::Bit2,
        PixelDepth::Bit4,
        PixelDepth::Bit8,
        PixelDepth::Bit16,
        PixelDepth::Bit32,
    ] {
        let pix = make_pix(depth);
        let path = outdir.join(format!("pngio_{}bpp.png", depth.bits()));
        write_png_file(&pix, &path).unwrap();
        let back = read_png_file(&path).unwrap();
        rp.compare_values(depth.bits() as f64, back.depth().bits() as f64, 0.0);

        let same = (0..pix.height()).all(|y| {
            (0..pix.width()).all(|x| match depth {
                PixelDepth::Bit32 => {
                    color::extract_rgb(pix.get_pixel_unchecked(x, y))
                        == color::extract_rgb(back.get_pixel_unchecked(x, y))
                }
                _ => pix.get_pixel_unchecked(x, y) == back.get_pixel_unchecked(x, y),
            })
        });
        rp.compare_values(1.0, same as u8 as f64, 0.0);
    }

    rp.compare_values(
        1.0,
        read_png_file(outdir.join("pngio_missing.png")).is_err() as u8 as f64,
        0.0,
    );

    assert!(rp.cleanup(), "pngio regression test failed");
}

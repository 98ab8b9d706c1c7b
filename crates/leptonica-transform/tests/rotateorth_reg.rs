//! Orthogonal rotation regression test
//!
//! # See also
//!
//! C Leptonica: `reference/leptonica/prog/rotateorth_reg.c`

use leptonica_core::{FPix, Pix, PixelDepth};
use leptonica_transform::{rotate_180, rotate_90, rotate_orth, rotate_orth_fpix};
use leptonica_test::RegParams;

fn make_pix(depth: PixelDepth) -> Pix {
    let (w, h) = (57u32, 31u32);
    let maxval = depth.max_value();
    let mut pm = Pix::new(w, h, depth).unwrap().to_mut();
    for y in 0..h {
        for x in 0..w {
            pm.set_pixel(x, y, (x * 7 + y * 13) % (maxval.min(255) + 1)).unwrap();
        }
    }
    pm.into()
}

#[test]
fn rotateorth_reg() {
    let mut rp = RegParams::new("rotateorth");

    for depth in [PixelDepth::Bit1, PixelDepth::Bit8, PixelDepth::Bit32] {
        let pixs = make_pix(depth);

        // Four quarter turns restore the image
        let mut pix = pixs.clone();
        for _ in 0..4 {
            pix = rotate_orth(&pix, 1).unwrap();
        }
        rp.compare_pix(&pixs, &pix);

        // Two quarter turns equal a half turn
        let twice = rotate_90(&rotate_90(&pixs, true).unwrap(), true).unwrap();
        rp.compare_pix(&twice, &rotate_180(&pixs).unwrap());

        // Clockwise then counterclockwise
        let back = rotate_orth(&rotate_orth(&pixs, 1).unwrap(), 3).unwrap();
        rp.compare_pix(&pixs, &back);

        let cw = rotate_orth(&pixs, 1).unwrap();
        rp.compare_values(pixs.height() as f64, cw.width() as f64, 0.0);
        rp.compare_values(pixs.width() as f64, cw.height() as f64, 0.0);
    }

    assert!(rp.cleanup(), "rotateorth regression test failed");
}

#[test]
fn rotateorth_reg_fpix() {
    let mut rp = RegParams::new("rotateorth_fpix");
    let (w, h) = (9u32, 5u32);
    let data: Vec<f32> = (0..w * h).map(|i| i as f32 * 0.5 - 3.0).collect();
    let fpix = FPix::from_data(w, h, data).unwrap();

    let cw = rotate_orth_fpix(&fpix, 1).unwrap();
    rp.compare_values(h as f64, cw.width() as f64, 0.0);
    // Top-left of the clockwise result is the bottom-left source value
    rp.compare_values(
        fpix.get_pixel(0, h - 1).unwrap() as f64,
        cw.get_pixel(0, 0).unwrap() as f64,
        0.0,
    );
    let back = rotate_orth_fpix(&cw, 3).unwrap();
    rp.compare_values(1.0, (back == fpix) as u8 as f64, 0.0);

    assert!(rp.cleanup(), "rotateorth_fpix regression test failed");
}
